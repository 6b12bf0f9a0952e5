use indexmap::IndexMap;

use crate::error::ParseError;
use crate::parse;
use crate::parse::definition::{Property, TypeDefinition};
use crate::parse::spec::SchemaDocument;
use crate::transform::DefinitionIndex;

/// A loaded, read-only schema document together with its definition index.
///
/// Every mapping and flattening call takes this context explicitly.
#[derive(Debug, Clone)]
pub struct SchemaContext {
    document: SchemaDocument,
    index: DefinitionIndex,
}

impl SchemaContext {
    /// Normalize definition keys and validate the reference graph.
    pub fn new(document: SchemaDocument) -> Result<Self, ParseError> {
        let index = DefinitionIndex::build(&document.definitions)?;
        Ok(Self { document, index })
    }

    pub fn from_json(input: &str) -> Result<Self, ParseError> {
        Self::new(parse::from_json(input)?)
    }

    pub fn from_yaml(input: &str) -> Result<Self, ParseError> {
        Self::new(parse::from_yaml(input)?)
    }

    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }

    pub fn definitions(&self) -> &IndexMap<String, TypeDefinition> {
        &self.document.definitions
    }

    /// Resolve a reference (with or without `#/definitions/`) in either casing.
    pub fn definition(&self, reference: &str) -> Option<(&str, &TypeDefinition)> {
        let key = self.index.resolve_key(reference)?;
        self.document
            .definitions
            .get_key_value(key)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Whether a reference resolves to a definition with at least one enum value.
    pub fn is_enum(&self, reference: &str) -> bool {
        self.definition(reference)
            .is_some_and(|(_, def)| def.is_enum())
    }

    /// Properties of the object definition a reference names, or `None` when
    /// the reference is missing or names an enumeration.
    pub fn object_properties(&self, reference: &str) -> Option<&IndexMap<String, Property>> {
        self.definition(reference)
            .filter(|(_, def)| def.is_object())
            .map(|(_, def)| &def.properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r##"{
        "swagger": "2.0",
        "paths": {},
        "definitions": {
            "ApiOperator": { "type": "string", "enum": ["NO_OVERRIDE", "BEST"] },
            "apiAccount": {
                "type": "object",
                "properties": { "wallet": { "type": "string" } }
            }
        }
    }"##;

    #[test]
    fn test_is_enum() {
        let ctx = SchemaContext::from_json(SCHEMA).unwrap();
        assert!(ctx.is_enum("#/definitions/apiOperator"));
        assert!(ctx.is_enum("#/definitions/ApiOperator"));
        assert!(!ctx.is_enum("#/definitions/apiAccount"));
        assert!(!ctx.is_enum("#/definitions/missing"));
        assert!(!ctx.is_enum(""));
    }

    #[test]
    fn test_object_properties() {
        let ctx = SchemaContext::from_json(SCHEMA).unwrap();
        let props = ctx.object_properties("#/definitions/ApiAccount").unwrap();
        assert!(props.contains_key("wallet"));
        assert!(ctx.object_properties("#/definitions/apiOperator").is_none());
        assert!(ctx.object_properties("#/definitions/nothing").is_none());
    }

    #[test]
    fn test_definition_returns_original_key() {
        let ctx = SchemaContext::from_json(SCHEMA).unwrap();
        let (key, _) = ctx.definition("ApiAccount").unwrap();
        assert_eq!(key, "apiAccount");
    }
}
