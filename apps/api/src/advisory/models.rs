//! Request and result types for the six advisory domains.
//!
//! Field names are camelCase on the wire. Result types mirror the shapes in
//! `advisory::schema` field for field.

use std::fmt;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Profile evaluation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub gpa: f64,
    pub toefl_score: Option<f64>,
    pub sat_gre_score: Option<f64>,
    /// Annual budget in USD.
    pub budget: f64,
    pub field_of_study: String,
    pub extracurriculars: Option<String>,
    #[serde(default)]
    pub preferred_countries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversityMatch {
    pub name: String,
    pub program: String,
    pub cost: f64,
    pub match_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEvaluation {
    pub strength_score: f64,
    /// Best match first.
    pub university_matches: Vec<UniversityMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Document enhancement
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Sop,
    Lor,
    Resume,
    Essay,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentKind::Sop => "statement of purpose",
            DocumentKind::Lor => "letter of recommendation",
            DocumentKind::Resume => "resume",
            DocumentKind::Essay => "admission essay",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    pub document_type: DocumentKind,
    pub content: String,
    pub target_program: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEnhancement {
    pub enhanced_content: String,
    pub suggestions: Vec<String>,
    pub overall_score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Professor / research matching
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchRequest {
    pub research_interests: String,
    pub field_of_study: String,
    pub degree_level: Option<String>,
    #[serde(default)]
    pub preferred_countries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorMatch {
    pub name: String,
    pub university: String,
    pub department: String,
    pub research_areas: Vec<String>,
    pub match_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorMatches {
    pub professors: Vec<ProfessorMatch>,
}

// ────────────────────────────────────────────────────────────────────────────
// Visa guidance
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaRequest {
    pub destination_country: String,
    pub nationality: String,
    pub visa_type: Option<String>,
    pub university: Option<String>,
    /// Free text, e.g. "Fall 2026".
    pub program_start: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaMilestone {
    pub stage: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaGuidance {
    pub visa_type: String,
    pub requirements: Vec<String>,
    pub required_documents: Vec<String>,
    pub timeline: Vec<VisaMilestone>,
    pub tips: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Cultural adaptation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalRequest {
    pub home_country: String,
    pub destination_country: String,
    pub concerns: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalTip {
    pub category: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalGuide {
    pub tips: Vec<CulturalTip>,
    pub resources: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Career guidance
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRequest {
    pub field_of_study: String,
    pub degree_level: String,
    pub target_country: String,
    pub interests: Option<String>,
    pub experience: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPath {
    pub title: String,
    /// Annual, USD.
    pub average_salary: f64,
    pub match_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerGuidance {
    pub career_paths: Vec<CareerPath>,
    pub recommended_skills: Vec<String>,
    pub market_outlook: String,
}
