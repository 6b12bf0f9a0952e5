use sdkgen_core::SchemaContext;
use sdkgen_core::config::SdkgenConfig;

use crate::GeneratorError;
use crate::emitters;

/// Lua client module generator.
pub struct LuaClientGenerator;

impl LuaClientGenerator {
    /// Render the complete client module as one string.
    ///
    /// Nothing is returned unless every section renders.
    pub fn generate(
        &self,
        schema: &SchemaContext,
        config: &SdkgenConfig,
    ) -> Result<String, GeneratorError> {
        let no_doc = config.client.no_doc;

        let mut out = emitters::runtime::emit_runtime(schema, &config.client)?;
        out.push_str(&emitters::definitions::emit_definitions(schema, no_doc)?);
        out.push_str(&emitters::client::emit_operations(
            schema,
            &config.naming,
            no_doc,
        )?);
        out.push_str("\nreturn M\n");

        log::info!(
            "generated Lua client: {} definitions, {} paths",
            schema.definitions().len(),
            schema.document().paths.len()
        );
        Ok(out)
    }
}
