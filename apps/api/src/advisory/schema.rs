//! Static descriptors of each domain's required fields and numeric ranges.
//!
//! The parser validates the model's JSON against these before deserializing, so a
//! violation is reported by field path (`universityMatches[0].matchScore`) rather
//! than as an opaque serde message. Nothing here fills defaults or clamps.

use serde_json::{Map, Value};

use crate::llm_client::LlmError;

#[derive(Debug)]
pub enum FieldKind {
    /// Non-blank string.
    Text,
    /// Inclusive range.
    Number { min: f64, max: f64 },
    /// Array of strings (may be empty).
    TextList,
    ObjectList(Shape),
}

impl FieldKind {
    /// Lists decode into `Vec`, which has no null form. Optional scalars decode
    /// into `Option` and treat null as absent.
    fn is_list(&self) -> bool {
        matches!(self, FieldKind::TextList | FieldKind::ObjectList(_))
    }
}

#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

pub type Shape = &'static [Field];

const fn required(name: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, kind: FieldKind) -> Field {
    Field {
        name,
        kind,
        required: false,
    }
}

const SCORE: FieldKind = FieldKind::Number {
    min: 0.0,
    max: 100.0,
};

const AMOUNT: FieldKind = FieldKind::Number {
    min: 0.0,
    max: f64::INFINITY,
};

const UNIVERSITY_MATCH: Shape = &[
    required("name", FieldKind::Text),
    required("program", FieldKind::Text),
    required("cost", AMOUNT),
    required("matchScore", SCORE),
];

pub const PROFILE: Shape = &[
    required("strengthScore", SCORE),
    required("universityMatches", FieldKind::ObjectList(UNIVERSITY_MATCH)),
    optional("recommendations", FieldKind::TextList),
];

pub const DOCUMENT: Shape = &[
    required("enhancedContent", FieldKind::Text),
    required("suggestions", FieldKind::TextList),
    required("overallScore", SCORE),
];

const PROFESSOR: Shape = &[
    required("name", FieldKind::Text),
    required("university", FieldKind::Text),
    required("department", FieldKind::Text),
    required("researchAreas", FieldKind::TextList),
    required("matchScore", SCORE),
    optional("email", FieldKind::Text),
];

pub const RESEARCH: Shape = &[required("professors", FieldKind::ObjectList(PROFESSOR))];

const VISA_MILESTONE: Shape = &[
    required("stage", FieldKind::Text),
    required("duration", FieldKind::Text),
];

pub const VISA: Shape = &[
    required("visaType", FieldKind::Text),
    required("requirements", FieldKind::TextList),
    required("requiredDocuments", FieldKind::TextList),
    required("timeline", FieldKind::ObjectList(VISA_MILESTONE)),
    required("tips", FieldKind::TextList),
];

const CULTURAL_TIP: Shape = &[
    required("category", FieldKind::Text),
    required("title", FieldKind::Text),
    required("description", FieldKind::Text),
];

pub const CULTURAL: Shape = &[
    required("tips", FieldKind::ObjectList(CULTURAL_TIP)),
    required("resources", FieldKind::TextList),
];

const CAREER_PATH: Shape = &[
    required("title", FieldKind::Text),
    required("averageSalary", AMOUNT),
    required("matchScore", SCORE),
];

pub const CAREER: Shape = &[
    required("careerPaths", FieldKind::ObjectList(CAREER_PATH)),
    required("recommendedSkills", FieldKind::TextList),
    required("marketOutlook", FieldKind::Text),
];

/// Checks `value` against `shape`, failing on the first missing or out-of-range field.
pub fn validate(shape: Shape, value: &Value) -> Result<(), LlmError> {
    let object = value
        .as_object()
        .ok_or_else(|| violation("$", "expected a JSON object at the top level"))?;
    validate_object(shape, object, "")
}

fn validate_object(shape: Shape, object: &Map<String, Value>, prefix: &str) -> Result<(), LlmError> {
    for field in shape {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{prefix}.{}", field.name)
        };

        match object.get(field.name) {
            None | Some(Value::Null) if field.required => {
                return Err(violation(&path, "required field is missing"));
            }
            None => continue,
            Some(Value::Null) if field.kind.is_list() => {
                return Err(violation(&path, "expected an array, got null"));
            }
            Some(Value::Null) => continue,
            Some(value) => check_kind(&field.kind, value, &path)?,
        }
    }
    Ok(())
}

fn check_kind(kind: &FieldKind, value: &Value, path: &str) -> Result<(), LlmError> {
    match kind {
        FieldKind::Text => match value.as_str() {
            Some(s) if !s.trim().is_empty() => Ok(()),
            Some(_) => Err(violation(path, "must not be blank")),
            None => Err(violation(path, "expected a string")),
        },
        FieldKind::Number { min, max } => {
            let n = value
                .as_f64()
                .ok_or_else(|| violation(path, "expected a number"))?;
            if n < *min || n > *max {
                let reason = if max.is_finite() {
                    format!("{n} is outside [{min}, {max}]")
                } else {
                    format!("{n} is below the minimum {min}")
                };
                return Err(violation(path, &reason));
            }
            Ok(())
        }
        FieldKind::TextList => {
            let items = value
                .as_array()
                .ok_or_else(|| violation(path, "expected an array of strings"))?;
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    return Err(violation(&format!("{path}[{i}]"), "expected a string"));
                }
            }
            Ok(())
        }
        FieldKind::ObjectList(shape) => {
            let items = value
                .as_array()
                .ok_or_else(|| violation(path, "expected an array of objects"))?;
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{i}]");
                let object = item
                    .as_object()
                    .ok_or_else(|| violation(&item_path, "expected an object"))?;
                validate_object(shape, object, &item_path)?;
            }
            Ok(())
        }
    }
}

fn violation(field: &str, reason: &str) -> LlmError {
    LlmError::SchemaViolation {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn field_of(err: LlmError) -> String {
        match err {
            LlmError::SchemaViolation { field, .. } => field,
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        let value = json!({
            "strengthScore": 82,
            "universityMatches": [
                {"name": "X", "program": "MS CS", "cost": 40000, "matchScore": 90}
            ]
        });
        assert!(validate(PROFILE, &value).is_ok());
    }

    #[test]
    fn test_missing_required_field_is_named() {
        let value = json!({"universityMatches": []});
        assert_eq!(field_of(validate(PROFILE, &value).unwrap_err()), "strengthScore");
    }

    #[test]
    fn test_null_required_field_counts_as_missing() {
        let value = json!({"strengthScore": null, "universityMatches": []});
        assert_eq!(field_of(validate(PROFILE, &value).unwrap_err()), "strengthScore");
    }

    #[test]
    fn test_nested_out_of_range_reports_path() {
        let value = json!({
            "strengthScore": 50,
            "universityMatches": [
                {"name": "A", "program": "P", "cost": 1, "matchScore": 10},
                {"name": "B", "program": "P", "cost": 1, "matchScore": 140}
            ]
        });
        assert_eq!(
            field_of(validate(PROFILE, &value).unwrap_err()),
            "universityMatches[1].matchScore"
        );
    }

    #[test]
    fn test_score_bounds_are_inclusive() {
        for score in [0, 100] {
            let value = json!({"enhancedContent": "x", "suggestions": [], "overallScore": score});
            assert!(validate(DOCUMENT, &value).is_ok(), "score {score} rejected");
        }
        let value = json!({"enhancedContent": "x", "suggestions": [], "overallScore": -0.5});
        assert_eq!(field_of(validate(DOCUMENT, &value).unwrap_err()), "overallScore");
    }

    #[test]
    fn test_negative_amount_rejected() {
        let value = json!({
            "careerPaths": [{"title": "SWE", "averageSalary": -1, "matchScore": 50}],
            "recommendedSkills": [],
            "marketOutlook": "good"
        });
        assert_eq!(
            field_of(validate(CAREER, &value).unwrap_err()),
            "careerPaths[0].averageSalary"
        );
    }

    #[test]
    fn test_string_score_is_not_coerced() {
        let value = json!({"strengthScore": "82", "universityMatches": []});
        assert_eq!(field_of(validate(PROFILE, &value).unwrap_err()), "strengthScore");
    }

    #[test]
    fn test_blank_text_rejected() {
        let value = json!({"enhancedContent": "   ", "suggestions": [], "overallScore": 10});
        assert_eq!(field_of(validate(DOCUMENT, &value).unwrap_err()), "enhancedContent");
    }

    #[test]
    fn test_optional_field_may_be_absent_but_not_wrong_type() {
        let professor = json!({
            "name": "Dr. A", "university": "U", "department": "CS",
            "researchAreas": ["ML"], "matchScore": 70
        });
        assert!(validate(RESEARCH, &json!({"professors": [professor.clone()]})).is_ok());

        let mut with_bad_email = professor;
        with_bad_email["email"] = json!(42);
        assert_eq!(
            field_of(validate(RESEARCH, &json!({"professors": [with_bad_email]})).unwrap_err()),
            "professors[0].email"
        );
    }

    #[test]
    fn test_null_optional_list_is_named_violation() {
        let value = json!({
            "strengthScore": 82,
            "universityMatches": [],
            "recommendations": null
        });
        assert_eq!(field_of(validate(PROFILE, &value).unwrap_err()), "recommendations");
    }

    #[test]
    fn test_null_optional_text_counts_as_absent() {
        let professor = json!({
            "name": "Dr. A", "university": "U", "department": "CS",
            "researchAreas": ["ML"], "matchScore": 70, "email": null
        });
        assert!(validate(RESEARCH, &json!({"professors": [professor]})).is_ok());
    }

    #[test]
    fn test_non_string_list_item_rejected() {
        let value = json!({
            "tips": [],
            "resources": ["ok", 3]
        });
        assert_eq!(field_of(validate(CULTURAL, &value).unwrap_err()), "resources[1]");
    }

    #[test]
    fn test_top_level_array_rejected() {
        assert_eq!(field_of(validate(VISA, &json!([])).unwrap_err()), "$");
    }
}
