//! Persona synthesis: analysis text → validated `TeacherProfile`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{info, warn};

use teachclone_core::{Error, Result, TeacherProfile, REQUIRED_PROFILE_FIELDS};

use crate::gemini::TextGenerator;
use crate::prompts;

static FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n?```[A-Za-z]*[ \t]*\r?\n?").unwrap());

/// Remove markdown code-fence markers (```` ```json ````, ```` ``` ````) and
/// surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    FENCE_RE.replace_all(text, "").trim().to_string()
}

fn upstream(cause: impl std::fmt::Display) -> Error {
    Error::Upstream(format!("Failed to create tutor profile: {}", cause))
}

/// Parse model output into a persona, checking that every required field is present.
///
/// Presence is the only check: field values are taken as the model emitted
/// them, and a value of the wrong JSON type fails deserialization.
pub fn parse_teacher_profile(text: &str) -> Result<TeacherProfile> {
    let cleaned = strip_code_fences(text);
    let value: Value = serde_json::from_str(&cleaned).map_err(upstream)?;

    let Some(object) = value.as_object() else {
        return Err(upstream("response is not a JSON object"));
    };

    if let Some(missing) = REQUIRED_PROFILE_FIELDS
        .iter()
        .find(|field| matches!(object.get(**field), None | Some(Value::Null)))
    {
        warn!("Synthesized profile is missing '{}'", missing);
        return Err(Error::Validation(format!("Missing required field: {}", missing)));
    }

    serde_json::from_value(value).map_err(upstream)
}

/// Ask the model for a persona matching the analysis, then validate it.
pub async fn create_teacher(generator: &dyn TextGenerator, analysis: &str) -> Result<TeacherProfile> {
    if analysis.trim().is_empty() {
        return Err(Error::InvalidInput("Analysis cannot be empty".into()));
    }

    let prompt = prompts::persona_prompt(analysis);
    let text = generator.generate(&prompt).await.map_err(upstream)?;
    let profile = parse_teacher_profile(&text)?;
    info!("Created teacher profile '{}'", profile.name);
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeGenerator;
    use serde_json::json;

    fn full_profile() -> Value {
        json!({
            "name": "Professor Sparks",
            "style": "Energetic walkthroughs with worked examples",
            "tone": "Enthusiastic",
            "strengths": ["Clarity", "Examples", "Pacing"],
            "specializations": ["Chemistry", "Lab safety"],
            "useAnalogies": true,
            "stepByStep": true
        })
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{}\n```\n"), "{}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_fenced_profile() {
        let text = format!("```json\n{}\n```", full_profile());
        let profile = parse_teacher_profile(&text).unwrap();
        assert_eq!(profile.name, "Professor Sparks");
        assert_eq!(profile.strengths.len(), 3);
        assert!(profile.use_analogies);
        assert!(profile.step_by_step);
    }

    #[test]
    fn test_each_missing_field_is_named() {
        for field in REQUIRED_PROFILE_FIELDS {
            let mut value = full_profile();
            value.as_object_mut().unwrap().remove(field);
            let err = parse_teacher_profile(&value.to_string()).unwrap_err();
            match err {
                Error::Validation(msg) => {
                    assert_eq!(msg, format!("Missing required field: {}", field))
                }
                other => panic!("expected validation error for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_null_field_counts_as_missing() {
        let mut value = full_profile();
        value["tone"] = Value::Null;
        let err = parse_teacher_profile(&value.to_string()).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: tone");
    }

    #[test]
    fn test_first_missing_field_reported() {
        let mut value = full_profile();
        let object = value.as_object_mut().unwrap();
        object.remove("stepByStep");
        object.remove("style");
        let err = parse_teacher_profile(&value.to_string()).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: style");
    }

    #[test]
    fn test_invalid_json_and_non_object_are_upstream() {
        assert!(matches!(
            parse_teacher_profile("Sure! Here is your tutor."),
            Err(Error::Upstream(_))
        ));
        assert!(matches!(parse_teacher_profile("[1, 2, 3]"), Err(Error::Upstream(_))));
    }

    #[test]
    fn test_wrong_type_is_upstream() {
        let mut value = full_profile();
        value["useAnalogies"] = json!("sometimes");
        assert!(matches!(
            parse_teacher_profile(&value.to_string()),
            Err(Error::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn test_create_teacher_end_to_end() {
        let generator = FakeGenerator::replying(&format!("```json\n{}\n```", full_profile()));
        let profile = create_teacher(&generator, "<h2>Teaching Style</h2>").await.unwrap();
        assert_eq!(profile.specializations, vec!["Chemistry", "Lab safety"]);
        assert!(generator.prompts()[0].contains("<h2>Teaching Style</h2>"));
    }

    #[tokio::test]
    async fn test_create_teacher_rejects_blank() {
        let generator = FakeGenerator::replying("{}");
        let err = create_teacher(&generator, "   ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_create_teacher_upstream_failure() {
        let generator = FakeGenerator::failing("timeout");
        let err = create_teacher(&generator, "analysis").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to create tutor profile: timeout");
    }
}
