pub mod definition;
pub mod operation;
pub mod parameter;
pub mod spec;

use crate::error::ParseError;
use spec::SchemaDocument;

/// Parse a Swagger 2.0 document from JSON.
pub fn from_json(input: &str) -> Result<SchemaDocument, ParseError> {
    let doc: SchemaDocument = serde_json::from_str(input)?;
    Ok(doc)
}

/// Parse a Swagger 2.0 document from YAML.
pub fn from_yaml(input: &str) -> Result<SchemaDocument, ParseError> {
    let doc: SchemaDocument = serde_yaml_ng::from_str(input)?;
    Ok(doc)
}
