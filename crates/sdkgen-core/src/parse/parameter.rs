use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::definition::{ItemSchema, Property};

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Body,
    Header,
    FormData,
    /// Missing or unrecognized `in`.
    #[default]
    #[serde(other)]
    Other,
}

/// Schema attached to a `body` parameter: a definition reference, an inline
/// object or a primitive type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BodySchema {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub schema_type: String,

    #[serde(rename = "$ref", default, skip_serializing_if = "String::is_empty")]
    pub ref_path: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Property>,
}

/// An operation parameter.
///
/// Every field is optional so that one unusual entry (for example a
/// `{"$ref": "#/parameters/..."}` pointer) does not fail the whole document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "in", default)]
    pub location: ParameterLocation,

    /// Pointer to a shared parameter; not resolved.
    #[serde(rename = "$ref", default, skip_serializing_if = "String::is_empty")]
    pub ref_path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Primitive type for non-body parameters.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub schema_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Element type when `type` is `array`.
    #[serde(default)]
    pub items: ItemSchema,

    /// Only present on body parameters.
    #[serde(default)]
    pub schema: BodySchema,
}

/// Shape of a body parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape<'a> {
    /// Reference to an object definition, flattened into individual arguments.
    Reference(&'a str),
    /// Object properties declared on the body schema itself, flattened the
    /// same way.
    Inline(&'a IndexMap<String, Property>),
    /// A primitive schema passed through as a single argument.
    Primitive(&'a str),
    /// Neither a reference nor a type.
    Empty,
}

impl Parameter {
    pub fn is_body(&self) -> bool {
        self.location == ParameterLocation::Body
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Whether the parameter has a name to bind. Unresolved `$ref` entries
    /// and nameless parameters are skipped by the renderer.
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// Classify a body parameter's schema. A reference wins over inline
    /// properties, which win over a type.
    pub fn body_shape(&self) -> BodyShape<'_> {
        if !self.schema.ref_path.is_empty() {
            BodyShape::Reference(&self.schema.ref_path)
        } else if !self.schema.properties.is_empty() {
            BodyShape::Inline(&self.schema.properties)
        } else if !self.schema.schema_type.is_empty() {
            BodyShape::Primitive(&self.schema.schema_type)
        } else {
            BodyShape::Empty
        }
    }
}
