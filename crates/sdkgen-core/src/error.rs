use thiserror::Error;

/// Failures while loading a schema document.
///
/// Every variant is a malformed-schema condition: generation aborts and
/// nothing is written.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed schema: invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed schema: invalid YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("malformed schema: definitions `{first}` and `{second}` differ only in leading-letter case")]
    AmbiguousDefinition { first: String, second: String },

    #[error("malformed schema: circular definition reference: {0}")]
    CircularDefinition(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
