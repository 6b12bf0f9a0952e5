use std::fmt;

use sdkgen_core::SchemaContext;
pub use sdkgen_core::parse::definition::Primitive;
use sdkgen_core::transform::name_normalizer::{
    pascal_to_snake, sanitize_identifier, strip_definition_prefix, title_case,
};

/// Prefix of generated object constructor functions.
pub const CONSTRUCTOR_PREFIX: &str = "M.create_";

/// A Lua runtime type, as reported by `type(value)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuaType {
    Number,
    String,
    Boolean,
    Table,
}

impl LuaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LuaType::Number => "number",
            LuaType::String => "string",
            LuaType::Boolean => "boolean",
            LuaType::Table => "table",
        }
    }
}

impl fmt::Display for LuaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a schema field's declared `type` and `$ref`.
///
/// The runtime type, default literal, variable suffix and doc comment are all
/// read off this one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Primitive(Primitive),
    /// Reference to an enumeration; values travel as strings. Holds the
    /// snake-cased definition name.
    Enum(String),
    /// Reference to any other definition. Holds the snake-cased definition name.
    Ref(String),
    /// Unrecognized type and no reference: treated as a generic table.
    Unknown,
}

impl FieldKind {
    /// Classify a field. Enum references win over the declared type; otherwise
    /// the declared type wins over a reference.
    pub fn resolve(schema: &SchemaContext, ty: &str, reference: &str) -> Self {
        if schema.is_enum(reference) {
            return FieldKind::Enum(definition_snake_name(reference));
        }
        if let Some(primitive) = Primitive::from_keyword(ty) {
            return FieldKind::Primitive(primitive);
        }
        if reference.is_empty() {
            FieldKind::Unknown
        } else {
            FieldKind::Ref(definition_snake_name(reference))
        }
    }

    pub fn lua_type(&self) -> LuaType {
        match self {
            FieldKind::Primitive(Primitive::Integer) => LuaType::Number,
            FieldKind::Primitive(Primitive::String) => LuaType::String,
            FieldKind::Primitive(Primitive::Boolean) => LuaType::Boolean,
            FieldKind::Primitive(Primitive::Array | Primitive::Object) => LuaType::Table,
            FieldKind::Enum(_) => LuaType::String,
            FieldKind::Ref(_) | FieldKind::Unknown => LuaType::Table,
        }
    }

    pub fn default_literal(&self) -> String {
        match self {
            FieldKind::Primitive(Primitive::Integer) => "0".to_string(),
            FieldKind::Primitive(Primitive::String) | FieldKind::Enum(_) => "\"\"".to_string(),
            FieldKind::Primitive(Primitive::Boolean) => "false".to_string(),
            FieldKind::Primitive(Primitive::Array) | FieldKind::Unknown => "{}".to_string(),
            // A non-empty table so json.encode emits an object rather than an array.
            FieldKind::Primitive(Primitive::Object) => "{ _ = '' }".to_string(),
            FieldKind::Ref(name) => format!("{CONSTRUCTOR_PREFIX}{name}()"),
        }
    }

    pub fn suffix(&self) -> String {
        match self {
            FieldKind::Primitive(Primitive::Integer) => "_int".to_string(),
            FieldKind::Primitive(Primitive::String) => "_str".to_string(),
            FieldKind::Primitive(Primitive::Boolean) => "_bool".to_string(),
            FieldKind::Primitive(Primitive::Array) => "_arr".to_string(),
            FieldKind::Primitive(Primitive::Object) | FieldKind::Unknown => "_obj".to_string(),
            FieldKind::Enum(name) | FieldKind::Ref(name) => format!("_{name}"),
        }
    }

    /// Human-readable type for doc comments. `item` describes array elements.
    pub fn comment(&self, item: &FieldKind) -> String {
        match self {
            FieldKind::Primitive(Primitive::Array) => format!("table ({})", item.lua_type()),
            FieldKind::Primitive(Primitive::Object) => "table (object)".to_string(),
            FieldKind::Enum(name) => format!("string ({name})"),
            FieldKind::Ref(name) => format!("table ({name})"),
            other => other.lua_type().to_string(),
        }
    }
}

/// `#/definitions/apiAccountDevice` → `api_account_device`.
pub fn definition_snake_name(reference: &str) -> String {
    pascal_to_snake(&title_case(strip_definition_prefix(reference)))
}

/// Lua type a value of this field must have at runtime.
pub fn runtime_type_name(schema: &SchemaContext, ty: &str, reference: &str) -> &'static str {
    FieldKind::resolve(schema, ty, reference).lua_type().as_str()
}

/// Zero value for a field, or a constructor call for definition references.
pub fn default_literal(schema: &SchemaContext, ty: &str, reference: &str) -> String {
    FieldKind::resolve(schema, ty, reference).default_literal()
}

/// Argument name with a suffix describing the expected shape, e.g. `limit_int`.
pub fn suffixed_variable_name(
    schema: &SchemaContext,
    name: &str,
    ty: &str,
    reference: &str,
) -> String {
    let kind = FieldKind::resolve(schema, ty, reference);
    format!("{}{}", sanitize_identifier(name), kind.suffix())
}

/// Type description for doc comments; arrays also describe their elements.
pub fn type_comment(schema: &SchemaContext, ty: &str, reference: &str, item_type: &str) -> String {
    let kind = FieldKind::resolve(schema, ty, reference);
    let item = FieldKind::resolve(schema, item_type, reference);
    kind.comment(&item)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r##"{
        "definitions": {
            "ApiOperator": { "type": "string", "enum": ["NO_OVERRIDE", "BEST"] },
            "apiUserProfile": {
                "type": "object",
                "properties": { "name": { "type": "string" } }
            }
        }
    }"##;

    fn schema() -> SchemaContext {
        SchemaContext::from_json(SCHEMA).unwrap()
    }

    #[test]
    fn test_runtime_type_name() {
        let ctx = schema();
        let cases = [
            ("integer", "", "number"),
            ("string", "", "string"),
            ("boolean", "", "boolean"),
            ("array", "", "table"),
            ("object", "", "table"),
            ("number", "", "table"),
            ("", "", "table"),
            ("", "#/definitions/apiUserProfile", "table"),
            ("", "#/definitions/apiOperator", "string"),
            ("integer", "#/definitions/ApiOperator", "string"),
        ];
        for (ty, reference, expected) in cases {
            assert_eq!(
                runtime_type_name(&ctx, ty, reference),
                expected,
                "type={ty:?} ref={reference:?}"
            );
        }
    }

    #[test]
    fn test_default_literal() {
        let ctx = schema();
        assert_eq!(default_literal(&ctx, "integer", ""), "0");
        assert_eq!(default_literal(&ctx, "string", ""), "\"\"");
        assert_eq!(default_literal(&ctx, "boolean", ""), "false");
        assert_eq!(default_literal(&ctx, "array", ""), "{}");
        assert_eq!(default_literal(&ctx, "object", ""), "{ _ = '' }");
        assert_eq!(default_literal(&ctx, "", "#/definitions/apiOperator"), "\"\"");
        assert_eq!(default_literal(&ctx, "", ""), "{}");
    }

    #[test]
    fn test_default_literal_calls_constructor() {
        let ctx = schema();
        let literal = default_literal(&ctx, "", "#/definitions/UserProfile");
        assert_eq!(literal, "M.create_user_profile()");
        assert!(literal.contains("create_user_profile"));
    }

    #[test]
    fn test_suffixed_variable_name() {
        let ctx = schema();
        assert_eq!(suffixed_variable_name(&ctx, "limit", "integer", ""), "limit_int");
        assert_eq!(suffixed_variable_name(&ctx, "name", "string", ""), "name_str");
        assert_eq!(suffixed_variable_name(&ctx, "create", "boolean", ""), "create_bool");
        assert_eq!(suffixed_variable_name(&ctx, "ids", "array", ""), "ids_arr");
        assert_eq!(suffixed_variable_name(&ctx, "vars", "object", ""), "vars_obj");
        assert_eq!(suffixed_variable_name(&ctx, "@type", "string", ""), "type_str");
        assert_eq!(
            suffixed_variable_name(&ctx, "profile", "", "#/definitions/apiUserProfile"),
            "profile_api_user_profile"
        );
        assert_eq!(
            suffixed_variable_name(&ctx, "operator", "", "#/definitions/apiOperator"),
            "operator_api_operator"
        );
    }

    #[test]
    fn test_type_comment() {
        let ctx = schema();
        assert_eq!(type_comment(&ctx, "integer", "", ""), "number");
        assert_eq!(type_comment(&ctx, "array", "", "string"), "table (string)");
        assert_eq!(type_comment(&ctx, "array", "", "integer"), "table (number)");
        assert_eq!(type_comment(&ctx, "array", "", ""), "table (table)");
        assert_eq!(type_comment(&ctx, "object", "", ""), "table (object)");
        assert_eq!(
            type_comment(&ctx, "", "#/definitions/apiUserProfile", ""),
            "table (api_user_profile)"
        );
        assert_eq!(
            type_comment(&ctx, "", "#/definitions/apiOperator", ""),
            "string (api_operator)"
        );
    }

    #[test]
    fn test_four_mappings_per_field() {
        let ctx = schema();
        let profile = "#/definitions/apiUserProfile";
        let operator = "#/definitions/apiOperator";
        // (type, ref, runtime type, default, variable, comment)
        let cases = [
            ("integer", "", "number", "0", "x_int", "number"),
            ("string", "", "string", "\"\"", "x_str", "string"),
            ("boolean", "", "boolean", "false", "x_bool", "boolean"),
            ("array", "", "table", "{}", "x_arr", "table (table)"),
            ("object", "", "table", "{ _ = '' }", "x_obj", "table (object)"),
            ("number", "", "table", "{}", "x_obj", "table"),
            ("", profile, "table", "M.create_api_user_profile()", "x_api_user_profile", "table (api_user_profile)"),
            ("object", profile, "table", "{ _ = '' }", "x_obj", "table (object)"),
            ("", operator, "string", "\"\"", "x_api_operator", "string (api_operator)"),
            ("string", operator, "string", "\"\"", "x_api_operator", "string (api_operator)"),
        ];
        for (ty, reference, runtime, default, variable, comment) in cases {
            let case = format!("type={ty:?} ref={reference:?}");
            assert_eq!(runtime_type_name(&ctx, ty, reference), runtime, "{case}");
            assert_eq!(default_literal(&ctx, ty, reference), default, "{case}");
            assert_eq!(suffixed_variable_name(&ctx, "x", ty, reference), variable, "{case}");
            assert_eq!(type_comment(&ctx, ty, reference, ""), comment, "{case}");
        }
    }

    #[test]
    fn test_constructor_refs_match_property_classification() {
        use sdkgen_core::parse::definition::Property;

        let ctx = schema();
        for ty in ["", "object", "array", "integer", "number"] {
            let property = Property {
                schema_type: ty.to_string(),
                ref_path: "#/definitions/apiUserProfile".to_string(),
                ..Property::default()
            };
            let kind = FieldKind::resolve(&ctx, &property.schema_type, &property.ref_path);
            assert_eq!(
                matches!(kind, FieldKind::Ref(_)),
                property.definition_ref().is_some(),
                "type={ty:?}"
            );
        }
    }
}
