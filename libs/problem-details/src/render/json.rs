//! `application/problem+json` encoder

use serde_json::Value;

use crate::normalize::ProblemDocument;

/// Serialize the document as a flat JSON object, keeping field order.
#[must_use]
pub fn encode(document: ProblemDocument) -> String {
    Value::Object(document.into_map()).to_string()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> ProblemDocument {
        match value {
            Value::Object(map) => ProblemDocument::from(map),
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn encodes_flat_object_in_order() {
        let body = encode(doc(json!({
            "status": 500,
            "detail": "bad stuff happened",
            "title": "Something evil this way comes.",
        })));

        assert_eq!(
            body,
            r#"{"status":500,"detail":"bad stuff happened","title":"Something evil this way comes."}"#
        );
    }

    #[test]
    fn encodes_nested_extensions() {
        let body = encode(doc(json!({
            "status": 422,
            "errors": [{"field": "email", "codes": ["required", "format"]}],
        })));

        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["errors"][0]["codes"][1], json!("format"));
    }
}
