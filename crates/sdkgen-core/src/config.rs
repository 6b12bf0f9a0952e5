use std::fs;
use std::path::Path;

use heck::ToSnakeCase;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::transform::name_normalizer::{AUTHENTICATE_PREFIX, KNOWN_PREFIXES};

/// Top-level project configuration loaded from `.sdkgen.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SdkgenConfig {
    /// Schema document to read when no input is given on the command line.
    pub input: Option<String>,
    /// Destination file; standard output when absent.
    pub output: Option<String>,
    pub naming: NamingConfig,
    pub client: ClientConfig,
}

/// Identifier derivation options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Prefixes removed from generated function names, wherever they occur.
    pub strip_prefixes: Vec<String>,
    /// Operation ids starting with this are authentication calls.
    pub authenticate_prefix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            strip_prefixes: KNOWN_PREFIXES.iter().map(|p| p.to_string()).collect(),
            authenticate_prefix: AUTHENTICATE_PREFIX.to_string(),
        }
    }
}

/// Generated client options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Lua package prefix of the runtime helpers (`<runtime>.util.log`, ...).
    pub runtime_module: String,
    /// Name shown in the generated header; defaults to the snake-cased API title.
    pub module_name: Option<String>,
    /// Skip `--` doc comments on generated functions.
    pub no_doc: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            runtime_module: "nakama".to_string(),
            module_name: None,
            no_doc: false,
        }
    }
}

impl ClientConfig {
    /// Configured module name, or one derived from the API title.
    pub fn module_name_for(&self, title: &str) -> String {
        match self.module_name {
            Some(ref name) => name.clone(),
            None if title.trim().is_empty() => "client".to_string(),
            None => title.to_snake_case(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".sdkgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SdkgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: SdkgenConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# sdkgen configuration
input: apigrpc.swagger.json
# output: nakama/nakama.lua   # omit to write to stdout

naming:
  strip_prefixes:
    - nakama_
    - satori_
  authenticate_prefix: Nakama_Authenticate

client:
  runtime_module: nakama   # require "<runtime_module>.util.log", ...
  # module_name: nakama_api
  no_doc: false
"#
}
