pub mod config;
pub mod context;
pub mod error;
pub mod parse;
pub mod transform;

pub use context::SchemaContext;
