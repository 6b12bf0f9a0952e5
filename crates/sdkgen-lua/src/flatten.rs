use indexmap::IndexMap;
use sdkgen_core::SchemaContext;
use sdkgen_core::parse::definition::Property;
use sdkgen_core::transform::name_normalizer::strip_newlines;

use crate::type_mapper::{FieldKind, LuaType};

/// One property of a flattened request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyField {
    pub name: String,
    /// The property's `type` keyword as declared in the schema (may be empty).
    pub declared_type: String,
    pub lua_type: LuaType,
    pub description: String,
}

impl BodyField {
    /// `-- @param name (type) description`
    pub fn doc_line(&self) -> String {
        format!(
            "-- @param {} ({}) {}",
            self.name,
            self.declared_type,
            strip_newlines(&self.description)
        )
    }

    /// Accepts `nil` or a value of the mapped Lua type.
    pub fn assertion(&self) -> String {
        nil_or_type_assertion(&self.name, self.lua_type)
    }

    /// `name = name,` entry of the request payload table.
    pub fn table_entry(&self) -> String {
        format!("{name} = {name},", name = self.name)
    }
}

/// Runtime check that `name` is absent or of type `ty`; the message names both.
pub fn nil_or_type_assertion(name: &str, ty: LuaType) -> String {
    format!(
        "assert(not {name} or type({name}) == \"{ty}\", \"Argument '{name}' must be 'nil' or of type '{ty}'\")"
    )
}

/// The properties of a body definition, in one fixed order shared by the
/// argument list, docs, assertions and payload table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyFields {
    fields: Vec<BodyField>,
}

impl BodyFields {
    /// Flatten the object definition a body reference names.
    ///
    /// Missing definitions and enumerations produce an empty result.
    pub fn flatten(schema: &SchemaContext, reference: &str) -> Self {
        let Some(properties) = schema.object_properties(reference) else {
            log::warn!(
                "body reference {reference:?} does not name an object definition; no arguments expanded"
            );
            return Self::default();
        };
        Self::from_properties(schema, properties)
    }

    /// Flatten properties declared inline on a body schema.
    pub fn from_properties(
        schema: &SchemaContext,
        properties: &IndexMap<String, Property>,
    ) -> Self {
        let fields = properties
            .iter()
            .map(|(name, property)| BodyField {
                name: name.clone(),
                declared_type: property.schema_type.clone(),
                lua_type: FieldKind::resolve(schema, &property.schema_type, &property.ref_path)
                    .lua_type(),
                description: property.description().to_string(),
            })
            .collect();

        Self { fields }
    }

    pub fn fields(&self) -> &[BodyField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `, a, b`, spliced after the preceding parameters.
    pub fn argument_list(&self) -> String {
        self.fields
            .iter()
            .map(|f| format!(", {}", f.name))
            .collect()
    }

    pub fn doc_lines(&self) -> Vec<String> {
        self.fields.iter().map(BodyField::doc_line).collect()
    }

    pub fn assertions(&self) -> Vec<String> {
        self.fields.iter().map(BodyField::assertion).collect()
    }

    pub fn table_entries(&self) -> Vec<String> {
        self.fields.iter().map(BodyField::table_entry).collect()
    }
}
