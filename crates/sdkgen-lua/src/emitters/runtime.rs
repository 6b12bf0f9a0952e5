use minijinja::{Environment, context};
use sdkgen_core::SchemaContext;
use sdkgen_core::config::ClientConfig;

use super::strip_newlines_filter;
use crate::GeneratorError;

/// Emit the module header and the helpers every generated call relies on
/// (cancellation tokens, coroutine runner, HTTP dispatch).
pub fn emit_runtime(
    schema: &SchemaContext,
    client: &ClientConfig,
) -> Result<String, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("strip_newlines", strip_newlines_filter);
    env.add_template(
        "runtime.lua.j2",
        include_str!("../../templates/runtime.lua.j2"),
    )?;
    let tmpl = env.get_template("runtime.lua.j2")?;

    let info = &schema.document().info;
    let rendered = tmpl.render(context! {
        module_name => client.module_name_for(&info.title),
        title => info.title.clone(),
        version => info.version.clone(),
        description => info.description.clone(),
        runtime => client.runtime_module.clone(),
        no_doc => client.no_doc,
    })?;
    Ok(rendered)
}
