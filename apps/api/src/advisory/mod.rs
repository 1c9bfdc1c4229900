//! The six domain advisory functions.
//!
//! Every domain runs the same pipeline: build prompt → invoke client → parse.
//! The pipeline is written once (`advise`) over the closed set of domain request
//! types; each type supplies its prompt builder, result shape, and placeholder.
//!
//! Callers decide between AI and placeholder mode. `advise` assumes AI mode and
//! must not be reached when the caller's flag is off.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::llm_client::{GenerativeClient, LlmError, Prompt, RawModelResponse};

pub mod handlers;
pub mod models;
pub mod parser;
pub mod placeholder;
pub mod prompts;
pub mod schema;

use models::{
    CareerGuidance, CareerRequest, CulturalGuide, CulturalRequest, DocumentEnhancement,
    DocumentRequest, ProfessorMatches, ProfileEvaluation, ProfileRequest, ResearchRequest,
    VisaGuidance, VisaRequest,
};
use schema::Shape;

/// The closed set of advisory topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Profile,
    Document,
    Research,
    Visa,
    Cultural,
    Career,
}

impl Domain {
    pub const ALL: [Domain; 6] = [
        Domain::Profile,
        Domain::Document,
        Domain::Research,
        Domain::Visa,
        Domain::Cultural,
        Domain::Career,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Profile => "profile",
            Domain::Document => "document",
            Domain::Research => "research",
            Domain::Visa => "visa",
            Domain::Cultural => "cultural",
            Domain::Career => "career",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-domain table entry: prompt template, expected shape, placeholder.
pub trait AdvisoryDomain: Send + Sync {
    const DOMAIN: Domain;
    const SHAPE: Shape;
    type Output: DeserializeOwned + Serialize + Send;

    /// Pure and deterministic.
    fn build_prompt(&self) -> Prompt;

    /// Input checks run before any call. Returns a user-facing message.
    fn validate(&self) -> Result<(), String>;

    /// Result for AI-disabled mode.
    fn placeholder(&self) -> Self::Output;
}

impl AdvisoryDomain for ProfileRequest {
    const DOMAIN: Domain = Domain::Profile;
    const SHAPE: Shape = schema::PROFILE;
    type Output = ProfileEvaluation;

    fn build_prompt(&self) -> Prompt {
        prompts::profile_prompt(self)
    }

    fn validate(&self) -> Result<(), String> {
        require_amount("gpa", self.gpa)?;
        require_amount("budget", self.budget)?;
        optional_amount("toeflScore", self.toefl_score)?;
        optional_amount("satGreScore", self.sat_gre_score)?;
        require_text("fieldOfStudy", &self.field_of_study)
    }

    fn placeholder(&self) -> ProfileEvaluation {
        placeholder::profile()
    }
}

impl AdvisoryDomain for DocumentRequest {
    const DOMAIN: Domain = Domain::Document;
    const SHAPE: Shape = schema::DOCUMENT;
    type Output = DocumentEnhancement;

    fn build_prompt(&self) -> Prompt {
        prompts::document_prompt(self)
    }

    fn validate(&self) -> Result<(), String> {
        require_text("content", &self.content)
    }

    fn placeholder(&self) -> DocumentEnhancement {
        placeholder::document(self)
    }
}

impl AdvisoryDomain for ResearchRequest {
    const DOMAIN: Domain = Domain::Research;
    const SHAPE: Shape = schema::RESEARCH;
    type Output = ProfessorMatches;

    fn build_prompt(&self) -> Prompt {
        prompts::research_prompt(self)
    }

    fn validate(&self) -> Result<(), String> {
        require_text("researchInterests", &self.research_interests)?;
        require_text("fieldOfStudy", &self.field_of_study)
    }

    fn placeholder(&self) -> ProfessorMatches {
        placeholder::research()
    }
}

impl AdvisoryDomain for VisaRequest {
    const DOMAIN: Domain = Domain::Visa;
    const SHAPE: Shape = schema::VISA;
    type Output = VisaGuidance;

    fn build_prompt(&self) -> Prompt {
        prompts::visa_prompt(self)
    }

    fn validate(&self) -> Result<(), String> {
        require_text("destinationCountry", &self.destination_country)?;
        require_text("nationality", &self.nationality)
    }

    fn placeholder(&self) -> VisaGuidance {
        placeholder::visa()
    }
}

impl AdvisoryDomain for CulturalRequest {
    const DOMAIN: Domain = Domain::Cultural;
    const SHAPE: Shape = schema::CULTURAL;
    type Output = CulturalGuide;

    fn build_prompt(&self) -> Prompt {
        prompts::cultural_prompt(self)
    }

    fn validate(&self) -> Result<(), String> {
        require_text("homeCountry", &self.home_country)?;
        require_text("destinationCountry", &self.destination_country)
    }

    fn placeholder(&self) -> CulturalGuide {
        placeholder::cultural()
    }
}

impl AdvisoryDomain for CareerRequest {
    const DOMAIN: Domain = Domain::Career;
    const SHAPE: Shape = schema::CAREER;
    type Output = CareerGuidance;

    fn build_prompt(&self) -> Prompt {
        prompts::career_prompt(self)
    }

    fn validate(&self) -> Result<(), String> {
        require_text("fieldOfStudy", &self.field_of_study)?;
        require_text("degreeLevel", &self.degree_level)?;
        require_text("targetCountry", &self.target_country)
    }

    fn placeholder(&self) -> CareerGuidance {
        placeholder::career()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Builds the prompt, makes exactly one call, and parses the reply.
/// The first failing stage's error is returned unchanged.
pub async fn advise<R: AdvisoryDomain>(
    client: &dyn GenerativeClient,
    request: &R,
) -> Result<R::Output, LlmError> {
    let domain = R::DOMAIN;
    let prompt = request.build_prompt();
    debug!(%domain, prompt_bytes = prompt.len(), "dispatching advisory request");

    let raw = client.invoke(&prompt).await.map_err(|e| {
        warn!(%domain, stage = e.stage(), error = %e, "advisory call failed");
        e
    })?;

    let result = parser::parse_structured::<R::Output>(R::SHAPE, &raw).map_err(|e| {
        warn!(%domain, stage = e.stage(), error = %e, "advisory reply rejected");
        e
    })?;

    info!(%domain, "advisory result parsed");
    Ok(result)
}

pub async fn evaluate_profile(
    client: &dyn GenerativeClient,
    request: &ProfileRequest,
) -> Result<ProfileEvaluation, LlmError> {
    advise(client, request).await
}

pub async fn enhance_document(
    client: &dyn GenerativeClient,
    request: &DocumentRequest,
) -> Result<DocumentEnhancement, LlmError> {
    advise(client, request).await
}

pub async fn match_professors(
    client: &dyn GenerativeClient,
    request: &ResearchRequest,
) -> Result<ProfessorMatches, LlmError> {
    advise(client, request).await
}

pub async fn visa_guidance(
    client: &dyn GenerativeClient,
    request: &VisaRequest,
) -> Result<VisaGuidance, LlmError> {
    advise(client, request).await
}

pub async fn cultural_tips(
    client: &dyn GenerativeClient,
    request: &CulturalRequest,
) -> Result<CulturalGuide, LlmError> {
    advise(client, request).await
}

pub async fn career_guidance(
    client: &dyn GenerativeClient,
    request: &CareerRequest,
) -> Result<CareerGuidance, LlmError> {
    advise(client, request).await
}

// ────────────────────────────────────────────────────────────────────────────
// Domain-tagged variants
// ────────────────────────────────────────────────────────────────────────────

/// A request for any domain, tagged by `"domain"` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "lowercase")]
pub enum AdvisoryRequest {
    Profile(ProfileRequest),
    Document(DocumentRequest),
    Research(ResearchRequest),
    Visa(VisaRequest),
    Cultural(CulturalRequest),
    Career(CareerRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "domain", content = "result", rename_all = "lowercase")]
pub enum AdvisoryResult {
    Profile(ProfileEvaluation),
    Document(DocumentEnhancement),
    Research(ProfessorMatches),
    Visa(VisaGuidance),
    Cultural(CulturalGuide),
    Career(CareerGuidance),
}

impl AdvisoryRequest {
    pub fn domain(&self) -> Domain {
        match self {
            AdvisoryRequest::Profile(_) => Domain::Profile,
            AdvisoryRequest::Document(_) => Domain::Document,
            AdvisoryRequest::Research(_) => Domain::Research,
            AdvisoryRequest::Visa(_) => Domain::Visa,
            AdvisoryRequest::Cultural(_) => Domain::Cultural,
            AdvisoryRequest::Career(_) => Domain::Career,
        }
    }
}

impl AdvisoryResult {
    pub fn domain(&self) -> Domain {
        match self {
            AdvisoryResult::Profile(_) => Domain::Profile,
            AdvisoryResult::Document(_) => Domain::Document,
            AdvisoryResult::Research(_) => Domain::Research,
            AdvisoryResult::Visa(_) => Domain::Visa,
            AdvisoryResult::Cultural(_) => Domain::Cultural,
            AdvisoryResult::Career(_) => Domain::Career,
        }
    }
}

pub fn build_prompt(request: &AdvisoryRequest) -> Prompt {
    match request {
        AdvisoryRequest::Profile(r) => r.build_prompt(),
        AdvisoryRequest::Document(r) => r.build_prompt(),
        AdvisoryRequest::Research(r) => r.build_prompt(),
        AdvisoryRequest::Visa(r) => r.build_prompt(),
        AdvisoryRequest::Cultural(r) => r.build_prompt(),
        AdvisoryRequest::Career(r) => r.build_prompt(),
    }
}

/// Parses `raw` against `domain`'s shape.
pub fn parse(domain: Domain, raw: &RawModelResponse) -> Result<AdvisoryResult, LlmError> {
    use parser::parse_structured;

    Ok(match domain {
        Domain::Profile => AdvisoryResult::Profile(parse_structured(schema::PROFILE, raw)?),
        Domain::Document => AdvisoryResult::Document(parse_structured(schema::DOCUMENT, raw)?),
        Domain::Research => AdvisoryResult::Research(parse_structured(schema::RESEARCH, raw)?),
        Domain::Visa => AdvisoryResult::Visa(parse_structured(schema::VISA, raw)?),
        Domain::Cultural => AdvisoryResult::Cultural(parse_structured(schema::CULTURAL, raw)?),
        Domain::Career => AdvisoryResult::Career(parse_structured(schema::CAREER, raw)?),
    })
}

pub async fn advise_any(
    client: &dyn GenerativeClient,
    request: &AdvisoryRequest,
) -> Result<AdvisoryResult, LlmError> {
    Ok(match request {
        AdvisoryRequest::Profile(r) => AdvisoryResult::Profile(advise(client, r).await?),
        AdvisoryRequest::Document(r) => AdvisoryResult::Document(advise(client, r).await?),
        AdvisoryRequest::Research(r) => AdvisoryResult::Research(advise(client, r).await?),
        AdvisoryRequest::Visa(r) => AdvisoryResult::Visa(advise(client, r).await?),
        AdvisoryRequest::Cultural(r) => AdvisoryResult::Cultural(advise(client, r).await?),
        AdvisoryRequest::Career(r) => AdvisoryResult::Career(advise(client, r).await?),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Input checks
// ────────────────────────────────────────────────────────────────────────────

fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    Ok(())
}

fn require_amount(field: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{field} must be a non-negative number"));
    }
    Ok(())
}

fn optional_amount(field: &str, value: Option<f64>) -> Result<(), String> {
    value.map_or(Ok(()), |v| require_amount(field, v))
}
