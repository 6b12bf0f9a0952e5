use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Primitive `type` keywords with a dedicated mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Integer,
    String,
    Boolean,
    Array,
    Object,
}

impl Primitive {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "integer" => Some(Primitive::Integer),
            "string" => Some(Primitive::String),
            "boolean" => Some(Primitive::Boolean),
            "array" => Some(Primitive::Array),
            "object" => Some(Primitive::Object),
            _ => None,
        }
    }
}

/// Element or value schema of an array or map property.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemSchema {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub schema_type: String,

    #[serde(rename = "$ref", default, skip_serializing_if = "String::is_empty")]
    pub ref_path: String,
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(ItemSchema),
}

/// A property of an object definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub schema_type: String,

    #[serde(rename = "$ref", default, skip_serializing_if = "String::is_empty")]
    pub ref_path: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub items: ItemSchema,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,
}

impl Property {
    /// The `$ref` this property is built from, when no recognized primitive
    /// `type` overrides it.
    pub fn definition_ref(&self) -> Option<&str> {
        if self.ref_path.is_empty() || Primitive::from_keyword(&self.schema_type).is_some() {
            None
        } else {
            Some(&self.ref_path)
        }
    }

    /// Description with an empty fallback.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// A named, reusable data shape: an enumeration or an object.
///
/// A valid schema never produces both `enum` values and `properties` on the
/// same definition, but nothing here relies on that.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeDefinition {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub schema_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Property>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl TypeDefinition {
    pub fn is_enum(&self) -> bool {
        !self.enum_values.is_empty()
    }

    /// Anything that is not an enumeration is treated as an object.
    pub fn is_object(&self) -> bool {
        !self.is_enum()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}
