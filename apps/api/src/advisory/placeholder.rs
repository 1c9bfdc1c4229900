//! Static results served when the caller's AI flag is off.
//!
//! This path never touches the generative client. Content is deliberately generic;
//! richer sample data belongs to the UI.

use crate::advisory::models::{
    CareerGuidance, CareerPath, CulturalGuide, CulturalTip, DocumentEnhancement, DocumentRequest,
    ProfessorMatch, ProfessorMatches, ProfileEvaluation, UniversityMatch, VisaGuidance,
    VisaMilestone,
};

const SAMPLE_NOTE: &str = "Sample data. Enable AI mode for personalised advice.";

pub fn profile() -> ProfileEvaluation {
    ProfileEvaluation {
        strength_score: 70.0,
        university_matches: vec![UniversityMatch {
            name: "Sample State University".to_string(),
            program: "MS (sample program)".to_string(),
            cost: 30000.0,
            match_score: 75.0,
        }],
        recommendations: vec![SAMPLE_NOTE.to_string()],
    }
}

/// Echoes the submitted text back unchanged.
pub fn document(request: &DocumentRequest) -> DocumentEnhancement {
    DocumentEnhancement {
        enhanced_content: request.content.clone(),
        suggestions: vec![SAMPLE_NOTE.to_string()],
        overall_score: 50.0,
    }
}

pub fn research() -> ProfessorMatches {
    ProfessorMatches {
        professors: vec![ProfessorMatch {
            name: "Dr. Sample Advisor".to_string(),
            university: "Sample State University".to_string(),
            department: "Sample Department".to_string(),
            research_areas: vec![SAMPLE_NOTE.to_string()],
            match_score: 70.0,
            email: None,
        }],
    }
}

pub fn visa() -> VisaGuidance {
    VisaGuidance {
        visa_type: "Student visa".to_string(),
        requirements: vec!["Letter of admission".to_string()],
        required_documents: vec!["Valid passport".to_string()],
        timeline: vec![VisaMilestone {
            stage: "Submit application".to_string(),
            duration: "Varies by country".to_string(),
        }],
        tips: vec![SAMPLE_NOTE.to_string()],
    }
}

pub fn cultural() -> CulturalGuide {
    CulturalGuide {
        tips: vec![CulturalTip {
            category: "academic".to_string(),
            title: "Visit office hours".to_string(),
            description: SAMPLE_NOTE.to_string(),
        }],
        resources: vec!["Your university's international student office".to_string()],
    }
}

pub fn career() -> CareerGuidance {
    CareerGuidance {
        career_paths: vec![CareerPath {
            title: "Graduate analyst".to_string(),
            average_salary: 60000.0,
            match_score: 70.0,
        }],
        recommended_skills: vec!["Communication".to_string()],
        market_outlook: SAMPLE_NOTE.to_string(),
    }
}
