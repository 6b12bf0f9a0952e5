pub mod definition_index;
pub mod name_normalizer;

pub use definition_index::DefinitionIndex;
