//! `application/problem+xml` encoder
//!
//! Standard fields come first in RFC order, then a blank line, then the
//! extension members. Extension values are first reduced to [`XmlNode`],
//! which only knows scalars, sequences and mappings:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <problem xmlns="urn:ietf:rfc:7807">
//!   <status>400</status>
//!
//!   <sequence>
//!     <i>abc</i>
//!   </sequence>
//! </problem>
//! ```

use quick_xml::escape::partial_escape;
use serde_json::Value;

use crate::normalize::ProblemDocument;
use crate::problem::STANDARD_FIELDS;

/// Namespace of the `<problem>` root element.
pub const NAMESPACE: &str = "urn:ietf:rfc:7807";

/// Tag used for every element of a sequence.
pub const SEQUENCE_ITEM_TAG: &str = "i";

const INDENT: &str = "  ";

/// Extension value reduced to the shapes the tree serializer understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Scalar(String),
    Sequence(Vec<XmlNode>),
    Mapping(Vec<(String, XmlNode)>),
}

impl From<Value> for XmlNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
            Value::String(text) => Self::Scalar(text),
            Value::Null => Self::Scalar(String::new()),
            scalar => Self::Scalar(scalar.to_string()),
        }
    }
}

impl XmlNode {
    /// Append this node as element `name`, each line prefixed by `indent`.
    pub fn write_element(&self, out: &mut String, name: &str, indent: &str) {
        match self {
            Self::Sequence(items) => {
                let inner = format!("{indent}{INDENT}");
                open_block(out, name, indent);
                for item in items {
                    item.write_element(out, SEQUENCE_ITEM_TAG, &inner);
                }
                close_block(out, name, indent);
            }
            Self::Mapping(entries) => {
                let inner = format!("{indent}{INDENT}");
                open_block(out, name, indent);
                for (key, value) in entries {
                    value.write_element(out, key, &inner);
                }
                close_block(out, name, indent);
            }
            Self::Scalar(text) => write_leaf(out, name, text, indent),
        }
    }
}

/// Serialize the document as an RFC 7807 XML problem report.
#[must_use]
pub fn encode(document: ProblemDocument) -> String {
    let mut data = document.into_map();
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<problem xmlns=\"");
    out.push_str(NAMESPACE);
    out.push_str("\">\n");

    let mut have_data = false;
    for name in STANDARD_FIELDS {
        if let Some(value) = data.shift_remove(name) {
            have_data = true;
            write_leaf(&mut out, name, &leaf_text(&value), INDENT);
        }
    }

    if !data.is_empty() {
        if have_data {
            out.push('\n');
        }
        for (name, value) in data {
            XmlNode::from(value).write_element(&mut out, &name, INDENT);
        }
    }

    out.push_str("</problem>\n");
    out
}

/// Standard fields are always leaves; structured values keep their JSON text.
fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn write_leaf(out: &mut String, name: &str, text: &str, indent: &str) {
    out.push_str(indent);
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&partial_escape(text));
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}

fn open_block(out: &mut String, name: &str, indent: &str) {
    out.push_str(indent);
    out.push('<');
    out.push_str(name);
    out.push_str(">\n");
}

fn close_block(out: &mut String, name: &str, indent: &str) {
    out.push_str(indent);
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}
