use minijinja::{Environment, context};
use sdkgen_core::SchemaContext;
use sdkgen_core::parse::definition::TypeDefinition;
use sdkgen_core::transform::name_normalizer::{pascal_to_snake, title_case};

use super::strip_newlines_filter;
use crate::GeneratorError;
use crate::flatten::nil_or_type_assertion;
use crate::type_mapper::{FieldKind, suffixed_variable_name};

/// Emit enum constants and object constructors for every definition.
pub fn emit_definitions(
    schema: &SchemaContext,
    no_doc: bool,
) -> Result<String, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("strip_newlines", strip_newlines_filter);
    env.add_template(
        "definitions.lua.j2",
        include_str!("../../templates/definitions.lua.j2"),
    )?;
    let tmpl = env.get_template("definitions.lua.j2")?;

    let mut enums = Vec::new();
    let mut objects = Vec::new();
    for (name, definition) in schema.definitions() {
        if definition.is_enum() {
            enums.push(enum_to_ctx(name, definition));
        } else if !definition.properties.is_empty() {
            objects.push(object_to_ctx(schema, name, definition));
        }
        log::debug!("definition {name}");
    }

    let rendered = tmpl.render(context! {
        enums => enums,
        objects => objects,
        no_doc => no_doc,
    })?;
    Ok(rendered)
}

fn enum_to_ctx(name: &str, definition: &TypeDefinition) -> minijinja::Value {
    let class_name = title_case(name);
    context! {
        snake => pascal_to_snake(&class_name),
        constant_prefix => class_name.to_uppercase(),
        description => definition.description.clone(),
        constants => definition.enum_values.clone(),
    }
}

fn object_to_ctx(
    schema: &SchemaContext,
    name: &str,
    definition: &TypeDefinition,
) -> minijinja::Value {
    let mut params = Vec::new();
    let mut assertions = Vec::new();
    let mut fields = Vec::new();

    for (prop_name, property) in &definition.properties {
        let kind = FieldKind::resolve(schema, &property.schema_type, &property.ref_path);
        let var_name = pascal_to_snake(&suffixed_variable_name(
            schema,
            prop_name,
            &property.schema_type,
            &property.ref_path,
        ));
        assertions.push(nil_or_type_assertion(&var_name, kind.lua_type()));
        fields.push(context! {
            key => pascal_to_snake(prop_name),
            var_name => var_name.clone(),
            lua_type => kind.lua_type().as_str(),
            description => property.description().to_string(),
        });
        params.push(var_name);
    }

    context! {
        snake => pascal_to_snake(&title_case(name)),
        description => definition.description.clone(),
        params => params.join(", "),
        assertions => assertions,
        fields => fields,
    }
}
