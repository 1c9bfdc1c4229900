// All LLM prompt templates for the advisory domains.
// Reuses the JSON-only preamble and the single-pass renderer from llm_client::prompts.
//
// Builders are pure: identical requests produce byte-identical prompts. Optional
// request fields become a "- Label: value" line inside `{optional_details}` and
// vanish entirely when absent.

use std::fmt::Display;

use crate::advisory::models::{
    CareerRequest, CulturalRequest, DocumentRequest, ProfileRequest, ResearchRequest, VisaRequest,
};
use crate::llm_client::prompts::{render_template, JSON_ONLY_PREAMBLE};
use crate::llm_client::Prompt;

/// Replace: {preamble}, {gpa}, {budget}, {field_of_study}, {optional_details}
pub const PROFILE_PROMPT_TEMPLATE: &str = r#"{preamble}

You are an experienced international admissions counselor. Evaluate the student profile below and recommend universities that fit it.

STUDENT PROFILE:
- GPA: {gpa}
- Annual budget (USD): {budget}
- Field of study: {field_of_study}
{optional_details}
Return a JSON object with this EXACT schema:
{
  "strengthScore": 75,
  "universityMatches": [
    {"name": "University name", "program": "Program name", "cost": 45000, "matchScore": 88}
  ],
  "recommendations": ["Concrete step that would strengthen the application"]
}

HARD RULES:
1. strengthScore rates overall admission competitiveness from 0 (weak) to 100 (exceptional)
2. List 3 to 5 universityMatches ordered from best to weakest match
3. cost is the estimated total annual cost in USD and is never negative
4. matchScore is between 0 and 100
5. Respect the budget: prefer programs whose cost does not exceed it"#;

/// Replace: {preamble}, {document_type}, {optional_details}, {content}
pub const DOCUMENT_PROMPT_TEMPLATE: &str = r#"{preamble}

You are an expert admissions editor. Improve the following {document_type} for a graduate application while keeping the applicant's voice and facts.
{optional_details}
Return a JSON object with this EXACT schema:
{
  "enhancedContent": "The full improved document text",
  "suggestions": ["Specific change and why it helps"],
  "overallScore": 72
}

HARD RULES:
1. Do NOT invent achievements, names, or numbers that are not in the original
2. overallScore rates the ORIGINAL document from 0 to 100
3. Give 3 to 6 actionable suggestions

DOCUMENT:
{content}"#;

/// Replace: {preamble}, {research_interests}, {field_of_study}, {optional_details}
pub const RESEARCH_PROMPT_TEMPLATE: &str = r#"{preamble}

You are a research advisor who knows faculty across universities worldwide. Suggest professors whose current research fits the student's interests.

STUDENT:
- Research interests: {research_interests}
- Field of study: {field_of_study}
{optional_details}
Return a JSON object with this EXACT schema:
{
  "professors": [
    {
      "name": "Prof. Full Name",
      "university": "University name",
      "department": "Department name",
      "researchAreas": ["Area one", "Area two"],
      "matchScore": 85,
      "email": "optional public contact address"
    }
  ]
}

HARD RULES:
1. List 3 to 6 professors ordered from best to weakest match
2. matchScore is between 0 and 100
3. Omit email unless it is publicly listed"#;

/// Replace: {preamble}, {nationality}, {destination_country}, {optional_details}
pub const VISA_PROMPT_TEMPLATE: &str = r#"{preamble}

You are an immigration advisor specialising in student visas. Explain how this student should obtain a study visa.

STUDENT:
- Nationality: {nationality}
- Destination country: {destination_country}
{optional_details}
Return a JSON object with this EXACT schema:
{
  "visaType": "Name of the student visa category",
  "requirements": ["Eligibility requirement"],
  "requiredDocuments": ["Document to prepare"],
  "timeline": [
    {"stage": "Apply for visa appointment", "duration": "2-4 weeks"}
  ],
  "tips": ["Practical advice"]
}

HARD RULES:
1. timeline stages are in chronological order
2. Mention when rules change often and the student should confirm with the embassy"#;

/// Replace: {preamble}, {home_country}, {destination_country}, {optional_details}
pub const CULTURAL_PROMPT_TEMPLATE: &str = r#"{preamble}

You are an international student mentor. Help a student from {home_country} adapt to academic and daily life in {destination_country}.
{optional_details}
Return a JSON object with this EXACT schema:
{
  "tips": [
    {"category": "academic", "title": "Short title", "description": "Concrete advice"}
  ],
  "resources": ["Helpful organisation, website, or service"]
}

HARD RULES:
1. category is one of: academic, social, daily_life, communication, wellbeing
2. Give 5 to 8 tips covering at least three categories
3. Be specific to the two countries, not generic travel advice"#;

/// Replace: {preamble}, {field_of_study}, {degree_level}, {target_country}, {optional_details}
pub const CAREER_PROMPT_TEMPLATE: &str = r#"{preamble}

You are a career counselor for international graduates. Suggest career paths for this student.

STUDENT:
- Field of study: {field_of_study}
- Degree level: {degree_level}
- Target country: {target_country}
{optional_details}
Return a JSON object with this EXACT schema:
{
  "careerPaths": [
    {"title": "Job title", "averageSalary": 85000, "matchScore": 80}
  ],
  "recommendedSkills": ["Skill to develop"],
  "marketOutlook": "Two or three sentences on hiring demand"
}

HARD RULES:
1. averageSalary is annual, in USD, and never negative
2. matchScore is between 0 and 100
3. List 3 to 5 careerPaths ordered from best to weakest match"#;

pub fn profile_prompt(request: &ProfileRequest) -> Prompt {
    let optional_details = [
        optional_line("TOEFL score", request.toefl_score),
        optional_line("SAT/GRE score", request.sat_gre_score),
        optional_line("Extracurriculars", request.extracurriculars.as_deref()),
        list_line("Preferred countries", &request.preferred_countries),
    ]
    .concat();
    let gpa = request.gpa.to_string();
    let budget = request.budget.to_string();

    render(
        PROFILE_PROMPT_TEMPLATE,
        &[
            ("gpa", gpa.as_str()),
            ("budget", budget.as_str()),
            ("field_of_study", request.field_of_study.trim()),
            ("optional_details", optional_details.as_str()),
        ],
    )
}

pub fn document_prompt(request: &DocumentRequest) -> Prompt {
    let optional_details = optional_line("Target program", request.target_program.as_deref());
    let document_type = request.document_type.to_string();

    render(
        DOCUMENT_PROMPT_TEMPLATE,
        &[
            ("document_type", document_type.as_str()),
            ("optional_details", optional_details.as_str()),
            ("content", request.content.trim()),
        ],
    )
}

pub fn research_prompt(request: &ResearchRequest) -> Prompt {
    let optional_details = [
        optional_line("Degree level", request.degree_level.as_deref()),
        list_line("Preferred countries", &request.preferred_countries),
    ]
    .concat();

    render(
        RESEARCH_PROMPT_TEMPLATE,
        &[
            ("research_interests", request.research_interests.trim()),
            ("field_of_study", request.field_of_study.trim()),
            ("optional_details", optional_details.as_str()),
        ],
    )
}

pub fn visa_prompt(request: &VisaRequest) -> Prompt {
    let optional_details = [
        optional_line("Requested visa type", request.visa_type.as_deref()),
        optional_line("Admitted university", request.university.as_deref()),
        optional_line("Program start", request.program_start.as_deref()),
    ]
    .concat();

    render(
        VISA_PROMPT_TEMPLATE,
        &[
            ("nationality", request.nationality.trim()),
            ("destination_country", request.destination_country.trim()),
            ("optional_details", optional_details.as_str()),
        ],
    )
}

pub fn cultural_prompt(request: &CulturalRequest) -> Prompt {
    let optional_details = optional_line("Student's concerns", request.concerns.as_deref());

    render(
        CULTURAL_PROMPT_TEMPLATE,
        &[
            ("home_country", request.home_country.trim()),
            ("destination_country", request.destination_country.trim()),
            ("optional_details", optional_details.as_str()),
        ],
    )
}

pub fn career_prompt(request: &CareerRequest) -> Prompt {
    let optional_details = [
        optional_line("Interests", request.interests.as_deref()),
        optional_line("Prior experience", request.experience.as_deref()),
    ]
    .concat();

    render(
        CAREER_PROMPT_TEMPLATE,
        &[
            ("field_of_study", request.field_of_study.trim()),
            ("degree_level", request.degree_level.trim()),
            ("target_country", request.target_country.trim()),
            ("optional_details", optional_details.as_str()),
        ],
    )
}

fn render(template: &str, values: &[(&str, &str)]) -> Prompt {
    let mut all = Vec::with_capacity(values.len() + 1);
    all.push(("preamble", JSON_ONLY_PREAMBLE));
    all.extend_from_slice(values);
    Prompt::new(render_template(template, &all))
}

/// `- Label: value\n`, or nothing when the value is absent or blank.
fn optional_line<T: Display>(label: &str, value: Option<T>) -> String {
    match value {
        Some(v) => {
            let text = v.to_string();
            let text = text.trim();
            if text.is_empty() {
                String::new()
            } else {
                format!("- {label}: {text}\n")
            }
        }
        None => String::new(),
    }
}

fn list_line(label: &str, items: &[String]) -> String {
    let items: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        String::new()
    } else {
        format!("- {label}: {}\n", items.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::models::DocumentKind;

    fn profile() -> ProfileRequest {
        ProfileRequest {
            gpa: 3.8,
            toefl_score: Some(100.0),
            sat_gre_score: Some(320.0),
            budget: 50000.0,
            field_of_study: "CS".to_string(),
            extracurriculars: Some("debate club".to_string()),
            preferred_countries: vec![],
        }
    }

    #[test]
    fn test_profile_prompt_is_deterministic() {
        assert_eq!(profile_prompt(&profile()), profile_prompt(&profile()));
    }

    #[test]
    fn test_profile_prompt_renders_fields() {
        let prompt = profile_prompt(&profile());
        let text = prompt.as_str();
        assert!(text.starts_with(JSON_ONLY_PREAMBLE));
        assert!(text.contains("- GPA: 3.8\n"));
        assert!(text.contains("- Annual budget (USD): 50000\n"));
        assert!(text.contains("- TOEFL score: 100\n"));
        assert!(text.contains("- SAT/GRE score: 320\n"));
        assert!(text.contains("- Extracurriculars: debate club\n"));
        assert!(text.contains("\"strengthScore\""));
        assert!(!text.contains("{gpa}"));
        assert!(!text.contains("{optional_details}"));
    }

    #[test]
    fn test_missing_optional_fields_are_omitted() {
        let request = ProfileRequest {
            toefl_score: None,
            sat_gre_score: None,
            extracurriculars: Some("   ".to_string()),
            ..profile()
        };
        let prompt = profile_prompt(&request);
        assert!(!prompt.as_str().contains("TOEFL"));
        assert!(!prompt.as_str().contains("SAT/GRE"));
        assert!(!prompt.as_str().contains("Extracurriculars"));
        assert!(!prompt.as_str().contains("Preferred countries"));
    }

    #[test]
    fn test_preferred_countries_join() {
        let request = ProfileRequest {
            preferred_countries: vec!["Canada".to_string(), " ".to_string(), "Germany".to_string()],
            ..profile()
        };
        assert!(profile_prompt(&request)
            .as_str()
            .contains("- Preferred countries: Canada, Germany\n"));
    }

    #[test]
    fn test_document_prompt_keeps_user_braces_literal() {
        let request = DocumentRequest {
            document_type: DocumentKind::Sop,
            content: "I love {content} and {preamble}".to_string(),
            target_program: None,
        };
        let prompt = document_prompt(&request);
        assert!(prompt.as_str().contains("statement of purpose"));
        assert!(prompt.as_str().ends_with("I love {content} and {preamble}"));
    }

    #[test]
    fn test_every_template_asks_for_json() {
        let prompts = [
            profile_prompt(&profile()),
            document_prompt(&DocumentRequest {
                document_type: DocumentKind::Resume,
                content: "text".to_string(),
                target_program: Some("MS CS".to_string()),
            }),
            research_prompt(&ResearchRequest {
                research_interests: "robotics".to_string(),
                field_of_study: "EE".to_string(),
                degree_level: None,
                preferred_countries: vec![],
            }),
            visa_prompt(&VisaRequest {
                destination_country: "Canada".to_string(),
                nationality: "India".to_string(),
                visa_type: None,
                university: None,
                program_start: Some("Fall 2026".to_string()),
            }),
            cultural_prompt(&CulturalRequest {
                home_country: "Brazil".to_string(),
                destination_country: "Japan".to_string(),
                concerns: None,
            }),
            career_prompt(&CareerRequest {
                field_of_study: "Data Science".to_string(),
                degree_level: "Masters".to_string(),
                target_country: "Germany".to_string(),
                interests: None,
                experience: None,
            }),
        ];

        for prompt in &prompts {
            assert!(prompt.as_str().contains("valid JSON only"));
            assert!(prompt.as_str().contains("EXACT schema"));
            assert!(!prompt.as_str().contains("{preamble}"));
            assert!(!prompt.as_str().contains("{optional_details}"));
        }
    }
}
