//! The structured record the model is asked to produce.
//!
//! The model's JSON is not schema-checked, so every field is parsed on its own
//! and a field of the wrong shape is simply absent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(rename = "One liner", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub one_liner: Option<String>,

    #[serde(rename = "Value Proposition", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub value_proposition: Option<String>,

    #[serde(rename = "Site Map", default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub site_map: Option<Vec<String>>,

    #[serde(rename = "Blog Ideas", default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub blog_ideas: Option<Vec<String>>,

    #[serde(rename = "SEO Terms", default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub seo_terms: Option<Vec<String>>,
}

impl GenerationResult {
    /// Parses the model's message content.
    ///
    /// Fails only when `content` is not JSON. Valid JSON that is not an object
    /// gives a record with every field absent.
    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Ok(match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        })
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_list<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(None),
    };
    Ok(Some(
        items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn parses_well_formed_record() {
        let result = GenerationResult::parse(
            r#"{
                "One liner": "Rockets for everyone",
                "Value Proposition": "Cheap, fast launches",
                "Site Map": ["Home", "Pricing", "Blog"],
                "Blog Ideas": ["Why rockets", "Launch checklist"],
                "SEO Terms": ["rockets", "space launch"]
            }"#,
        )
        .unwrap();

        assert_eq!(result.one_liner.as_deref(), Some("Rockets for everyone"));
        assert_eq!(result.value_proposition.as_deref(), Some("Cheap, fast launches"));
        assert_eq!(result.site_map, Some(vec!["Home".into(), "Pricing".into(), "Blog".into()]));
        assert_eq!(result.blog_ideas, Some(vec!["Why rockets".into(), "Launch checklist".into()]));
        assert_eq!(result.seo_terms, Some(vec!["rockets".into(), "space launch".into()]));
    }

    #[test]
    fn empty_object_has_no_fields() {
        assert_eq!(GenerationResult::parse("{}").unwrap(), GenerationResult::default());
    }

    #[test]
    fn wrong_shape_only_drops_that_field() {
        let result = GenerationResult::parse(
            r#"{"One liner": "Hi", "Site Map": "Home, About", "SEO Terms": ["a"]}"#,
        )
        .unwrap();
        assert_eq!(result.one_liner.as_deref(), Some("Hi"));
        assert_eq!(result.site_map, None);
        assert_eq!(result.seo_terms, Some(vec!["a".into()]));
    }

    #[test]
    fn non_string_items_keep_their_json_text() {
        let result = GenerationResult::parse(r#"{"Blog Ideas": ["one", 2, true, null]}"#).unwrap();
        assert_eq!(
            result.blog_ideas,
            Some(vec!["one".into(), "2".into(), "true".into(), "null".into()])
        );
    }

    #[test]
    fn object_text_field_is_absent() {
        let result = GenerationResult::parse(r#"{"Value Proposition": {"a": 1}, "One liner": 7}"#).unwrap();
        assert_eq!(result.value_proposition, None);
        assert_eq!(result.one_liner.as_deref(), Some("7"));
    }

    #[test]
    fn non_object_json_is_empty_record() {
        for content in ["[]", "null", "\"text\"", "42"] {
            assert_eq!(GenerationResult::parse(content).unwrap(), GenerationResult::default());
        }
    }

    #[test]
    fn prose_is_a_parse_error() {
        let err = GenerationResult::parse("Sure! Here is your JSON:").unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn serializes_with_model_key_names() {
        let result = GenerationResult {
            one_liner: Some("Hi".into()),
            seo_terms: Some(vec!["a".into()]),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"One liner": "Hi", "SEO Terms": ["a"]})
        );
    }
}
