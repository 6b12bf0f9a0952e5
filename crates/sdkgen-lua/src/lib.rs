pub mod emitters;
pub mod flatten;
pub mod generator;
pub mod type_mapper;

pub use generator::LuaClientGenerator;

use thiserror::Error;

/// Errors raised while rendering a client module.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template render failed: {0}")]
    Render(#[from] minijinja::Error),
}
