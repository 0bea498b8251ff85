//! Front-matter extraction and decoding.

use serde_yml::{Mapping, Value};

use crate::error::{Error, Result};

const FENCE: &str = "---";

/// Decode the YAML front matter delimited by `---` fences at the top of
/// `text` into a key-value mapping.
///
/// Every failure mode (missing fences, malformed YAML, a non-mapping
/// document) collapses into `Error::Metadata` naming the file; partial
/// metadata is never returned.
pub fn parse_metadata(text: &str, file_name: &str) -> Result<Mapping> {
    let mut parts = text.splitn(3, FENCE);
    let _leading = parts.next();
    let region = parts.next();
    let rest = parts.next();

    let (Some(region), Some(_)) = (region, rest) else {
        return Err(metadata_error(file_name, "missing '---' front matter fences"));
    };

    let value: Value =
        serde_yml::from_str(region).map_err(|e| metadata_error(file_name, &e.to_string()))?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(metadata_error(
            file_name,
            "front matter is not a key-value mapping",
        )),
    }
}

fn metadata_error(file_name: &str, reason: &str) -> Error {
    Error::Metadata {
        file: file_name.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_front_matter_mapping() {
        let text = "---\ndeployDoc: true\nname: stack\n---\n# Body\n";
        let metadata = parse_metadata(text, "doc.md").unwrap();
        assert_eq!(metadata.get("deployDoc"), Some(&Value::Bool(true)));
        assert_eq!(
            metadata.get("name"),
            Some(&Value::String("stack".to_string()))
        );
    }

    #[test]
    fn missing_fences_is_metadata_error() {
        let err = parse_metadata("# Just markdown\n", "doc.md").unwrap_err();
        assert_eq!(err.code(), "METADATA_ERROR");
        assert!(err.to_string().contains("doc.md"));
    }

    #[test]
    fn single_fence_is_metadata_error() {
        let err = parse_metadata("---\ndeployDoc: true\n", "doc.md").unwrap_err();
        assert_eq!(err.code(), "METADATA_ERROR");
    }

    #[test]
    fn malformed_yaml_is_metadata_error() {
        let text = "---\ndeployDoc: [unclosed\n---\n";
        let err = parse_metadata(text, "doc.md").unwrap_err();
        assert_eq!(err.code(), "METADATA_ERROR");
        assert!(err.to_string().contains("doc.md"));
    }

    #[test]
    fn non_mapping_front_matter_is_metadata_error() {
        let text = "---\n- just\n- a list\n---\n";
        let err = parse_metadata(text, "doc.md").unwrap_err();
        assert_eq!(err.code(), "METADATA_ERROR");
    }

    #[test]
    fn later_fences_do_not_confuse_the_split() {
        // A horizontal rule further down the document is part of the body,
        // not a third front-matter fence.
        let text = "---\ndeployDoc: true\n---\nbody\n\n---\n\nmore body\n";
        let metadata = parse_metadata(text, "doc.md").unwrap();
        assert_eq!(metadata.get("deployDoc"), Some(&Value::Bool(true)));
    }
}
