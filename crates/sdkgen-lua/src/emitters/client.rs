use std::collections::HashSet;

use minijinja::{Environment, context};
use sdkgen_core::SchemaContext;
use sdkgen_core::config::NamingConfig;
use sdkgen_core::parse::operation::{HttpMethod, Operation};
use sdkgen_core::parse::parameter::{BodyShape, Parameter, ParameterLocation};
use sdkgen_core::transform::name_normalizer::{
    is_authenticate_operation_with, pascal_to_snake, route_to_name, strip_newlines, strip_prefixes,
};

use super::strip_newlines_filter;
use crate::GeneratorError;
use crate::flatten::{BodyFields, nil_or_type_assertion};
use crate::type_mapper::{
    FieldKind, LuaType, definition_snake_name, suffixed_variable_name, type_comment,
};

/// Emit one client function per operation, in document order.
pub fn emit_operations(
    schema: &SchemaContext,
    naming: &NamingConfig,
    no_doc: bool,
) -> Result<String, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("strip_newlines", strip_newlines_filter);
    env.add_template("client.lua.j2", include_str!("../../templates/client.lua.j2"))?;
    let tmpl = env.get_template("client.lua.j2")?;

    let mut seen_functions = HashSet::new();
    let mut operations = Vec::new();
    for (path, item) in &schema.document().paths {
        for (method, op) in item.operations() {
            let name = function_name(op, method, path, naming);
            if !seen_functions.insert(name.clone()) {
                log::warn!(
                    "skipping {} {path}: function {name} already generated",
                    method.as_str()
                );
                continue;
            }
            log::debug!("operation {name} ({} {path})", method.as_str());

            let parameters: Vec<&Parameter> =
                item.parameters.iter().chain(op.parameters.iter()).collect();
            operations.push(build_operation(
                schema,
                naming,
                &name,
                method,
                path,
                op,
                &parameters,
            ));
        }
    }

    let rendered = tmpl.render(context! {
        operations => operations,
        no_doc => no_doc,
    })?;
    Ok(rendered)
}

/// Generated function name: the operation id (or a route-derived name),
/// snake-cased, with vendor prefixes removed.
pub fn function_name(
    op: &Operation,
    method: HttpMethod,
    path: &str,
    naming: &NamingConfig,
) -> String {
    let id = if op.operation_id.is_empty() {
        route_to_name(method.as_str(), path)
    } else {
        op.operation_id.clone()
    };
    strip_prefixes(&pascal_to_snake(&id), &naming.strip_prefixes)
}

/// Argument variable for a non-body parameter, e.g. `@limit` → `limit_int`.
fn parameter_variable(schema: &SchemaContext, param: &Parameter) -> String {
    pascal_to_snake(&suffixed_variable_name(
        schema,
        &param.name,
        &param.schema_type,
        &param.schema.ref_path,
    ))
}

#[derive(Default)]
struct ParamsResult {
    arguments: String,
    doc_lines: Vec<String>,
    assertions: Vec<String>,
    path_substitutions: Vec<minijinja::Value>,
    query_params: Vec<minijinja::Value>,
    body: Option<minijinja::Value>,
}

fn build_params(schema: &SchemaContext, parameters: &[&Parameter]) -> ParamsResult {
    let mut result = ParamsResult::default();

    for param in parameters {
        if !param.is_named() && !param.is_body() {
            log::warn!(
                "skipping unnamed parameter {:?}; shared parameter references are not resolved",
                param.ref_path
            );
            continue;
        }

        if !param.is_body() {
            let var_name = parameter_variable(schema, param);
            let comment = type_comment(
                schema,
                &param.schema_type,
                &param.schema.ref_path,
                &param.items.schema_type,
            );
            result.doc_lines.push(format!(
                "-- @param {var_name} ({comment}) {}",
                strip_newlines(param.description())
            ));
            result.arguments.push_str(&format!(", {var_name}"));
            match param.location {
                ParameterLocation::Path => result.path_substitutions.push(context! {
                    placeholder => format!("{{{}}}", param.name),
                    var_name => var_name,
                }),
                ParameterLocation::Query => result.query_params.push(context! {
                    name => param.name.clone(),
                    var_name => var_name,
                }),
                // Header and form parameters are accepted but not sent.
                _ => {}
            }
            continue;
        }

        match param.body_shape() {
            BodyShape::Reference(reference) => {
                push_body_fields(&mut result, BodyFields::flatten(schema, reference));
            }
            BodyShape::Inline(properties) => {
                push_body_fields(&mut result, BodyFields::from_properties(schema, properties));
            }
            BodyShape::Primitive(ty) if param.is_named() => {
                let lua_type = FieldKind::resolve(schema, ty, "").lua_type();
                let name = &param.name;
                result.doc_lines.push(format!(
                    "-- @param {name} ({ty}) {}",
                    strip_newlines(param.description())
                ));
                result.arguments.push_str(&format!(", {name}"));
                result
                    .assertions
                    .push(primitive_body_assertion(name, lua_type, param.required));
                result.body = Some(context! {
                    kind => "value",
                    value => name.clone(),
                });
            }
            BodyShape::Primitive(_) | BodyShape::Empty => {
                log::warn!(
                    "body parameter {:?} has no name, type or reference; skipped",
                    param.name
                );
            }
        }
    }

    result
}

fn push_body_fields(result: &mut ParamsResult, fields: BodyFields) {
    result.arguments.push_str(&fields.argument_list());
    result.doc_lines.extend(fields.doc_lines());
    result.assertions.extend(fields.assertions());
    result.body = Some(context! {
        kind => "table",
        entries => fields.table_entries(),
    });
}

/// A required body must be present; an optional one may be `nil`.
fn primitive_body_assertion(name: &str, lua_type: LuaType, required: bool) -> String {
    if required {
        format!(
            "assert({name} and type({name}) == \"{lua_type}\", \"Argument '{name}' must be of type '{lua_type}'\")"
        )
    } else {
        nil_or_type_assertion(name, lua_type)
    }
}

fn build_operation(
    schema: &SchemaContext,
    naming: &NamingConfig,
    function_name: &str,
    method: HttpMethod,
    path: &str,
    op: &Operation,
    parameters: &[&Parameter],
) -> minijinja::Value {
    let params = build_params(schema, parameters);
    let response_wrapper = op.success_ref().map(definition_snake_name);

    context! {
        function_name => function_name,
        summary => op.summary(),
        http_method => method.as_str(),
        path => path,
        arguments => params.arguments,
        doc_lines => params.doc_lines,
        assertions => params.assertions,
        is_authenticate => is_authenticate_operation_with(
            &op.operation_id,
            &naming.authenticate_prefix,
        ),
        path_substitutions => params.path_substitutions,
        query_params => params.query_params,
        body => params.body,
        response_wrapper => response_wrapper,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operation(id: &str) -> Operation {
        Operation {
            operation_id: id.to_string(),
            ..Operation::default()
        }
    }

    #[test]
    fn test_function_name_strips_vendor_prefix() {
        let naming = NamingConfig::default();
        let op = operation("Nakama_AuthenticateEmail");
        assert_eq!(
            function_name(&op, HttpMethod::Post, "/v2/account/authenticate/email", &naming),
            "authenticate_email"
        );
    }

    #[test]
    fn test_function_name_falls_back_to_route() {
        let naming = NamingConfig::default();
        let op = operation("");
        assert_eq!(
            function_name(&op, HttpMethod::Get, "/healthcheck", &naming),
            "list_healthcheck"
        );
        assert_eq!(
            function_name(&op, HttpMethod::Delete, "/v2/group/{id}", &naming),
            "delete_v2group"
        );
    }

    #[test]
    fn test_primitive_body_assertion() {
        assert_eq!(
            primitive_body_assertion("payload", LuaType::String, true),
            "assert(payload and type(payload) == \"string\", \"Argument 'payload' must be of type 'string'\")"
        );
        assert_eq!(
            primitive_body_assertion("payload", LuaType::Number, false),
            "assert(not payload or type(payload) == \"number\", \"Argument 'payload' must be 'nil' or of type 'number'\")"
        );
    }

    #[test]
    fn test_function_name_custom_prefixes() {
        let naming = NamingConfig {
            strip_prefixes: vec!["acme_".to_string()],
            ..NamingConfig::default()
        };
        let op = operation("Acme_ListThings");
        assert_eq!(
            function_name(&op, HttpMethod::Get, "/things", &naming),
            "list_things"
        );
    }
}
