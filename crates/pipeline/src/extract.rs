//! Deployment tag extraction from `values.yaml` documents.

use serde::Deserialize;

use crate::{DeploymentTag, ExtractError};

#[derive(Debug, Deserialize)]
struct ValuesDocument {
    global: Option<GlobalSection>,
}

#[derive(Debug, Deserialize)]
struct GlobalSection {
    config: Option<ConfigSection>,
}

#[derive(Debug, Deserialize)]
struct ConfigSection {
    #[serde(rename = "DEPLOYMENT_TAG")]
    deployment_tag: Option<String>,
}

/// Parses `content` as YAML and returns `global.config.DEPLOYMENT_TAG`.
///
/// The tag is returned exactly as written, so an unquoted short SHA such as
/// `1234e56` is never reinterpreted as a number. Only the first document is
/// read when the content holds several. An absent key, a `null` anywhere
/// along the path, or an empty string is [`ExtractError::MissingField`].
/// Invalid YAML, or a document whose shape does not match the path, is
/// [`ExtractError::Parse`].
pub fn extract_deployment_tag(content: &[u8]) -> Result<DeploymentTag, ExtractError> {
    let Some(first) = serde_yaml::Deserializer::from_slice(content).next() else {
        return Err(ExtractError::MissingField);
    };
    let document = Option::<ValuesDocument>::deserialize(first).map_err(|e| {
        ExtractError::Parse {
            message: e.to_string(),
        }
    })?;

    document
        .and_then(|doc| doc.global)
        .and_then(|global| global.config)
        .and_then(|config| config.deployment_tag)
        .and_then(DeploymentTag::new)
        .ok_or(ExtractError::MissingField)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(doc: &str) -> Result<DeploymentTag, ExtractError> {
        extract_deployment_tag(doc.as_bytes())
    }

    #[test]
    fn returns_tag_verbatim() {
        let doc = "global:\n  config:\n    DEPLOYMENT_TAG: \"abc123\"\n";
        assert_eq!(extract(doc).unwrap().as_str(), "abc123");
    }

    #[test]
    fn ignores_unrelated_keys() {
        let doc = r#"
replicaCount: 2
global:
  image: registry/app
  config:
    LOG_LEVEL: debug
    DEPLOYMENT_TAG: deadbeef
other:
  nested: [1, 2, 3]
"#;
        assert_eq!(extract(doc).unwrap().as_str(), "deadbeef");
    }

    #[test]
    fn number_like_tags_keep_their_source_text() {
        for tag in ["1234567", "1234e56", "0x1234", "0777"] {
            let doc = format!("global:\n  config:\n    DEPLOYMENT_TAG: {tag}\n");
            assert_eq!(extract(&doc).unwrap().as_str(), tag, "tag {tag}");
        }
    }

    #[test]
    fn tilde_tag_is_missing_field() {
        let doc = "global:\n  config:\n    DEPLOYMENT_TAG: ~\n";
        assert_eq!(extract(doc).unwrap_err(), ExtractError::MissingField);
    }

    #[test]
    fn only_first_document_is_read() {
        let doc = "global:\n  config:\n    DEPLOYMENT_TAG: first\n---\nglobal:\n  config:\n    DEPLOYMENT_TAG: second\n";
        assert_eq!(extract(doc).unwrap().as_str(), "first");
    }

    #[test]
    fn empty_content_is_missing_field() {
        assert_eq!(extract("").unwrap_err(), ExtractError::MissingField);
    }

    #[test]
    fn absent_tag_is_missing_field() {
        let doc = "global:\n  config:\n    OTHER: x\n";
        assert_eq!(extract(doc).unwrap_err(), ExtractError::MissingField);
    }

    #[test]
    fn empty_tag_is_missing_field() {
        let doc = "global:\n  config:\n    DEPLOYMENT_TAG: \"\"\n";
        assert_eq!(extract(doc).unwrap_err(), ExtractError::MissingField);
    }

    #[test]
    fn null_intermediate_is_missing_field() {
        assert_eq!(extract("global:\n").unwrap_err(), ExtractError::MissingField);
        assert_eq!(
            extract("global:\n  config: ~\n").unwrap_err(),
            ExtractError::MissingField
        );
    }

    #[test]
    fn missing_global_is_missing_field() {
        assert_eq!(extract("foo: bar\n").unwrap_err(), ExtractError::MissingField);
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let err = extract("global: [unterminated\n").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
    }

    #[test]
    fn scalar_where_mapping_expected_is_parse_error() {
        let err = extract("global: just-a-string\n").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }), "got {err:?}");

        let err = extract("global:\n  config: [1, 2]\n").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn sequence_tag_is_parse_error() {
        let doc = "global:\n  config:\n    DEPLOYMENT_TAG: [a, b]\n";
        assert!(matches!(extract(doc).unwrap_err(), ExtractError::Parse { .. }));
    }
}
