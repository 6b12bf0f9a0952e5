pub mod client;
pub mod definitions;
pub mod runtime;

use sdkgen_core::transform::name_normalizer::strip_newlines;

/// Template filter keeping descriptions inside single-line `--` comments.
fn strip_newlines_filter(value: String) -> String {
    strip_newlines(&value)
}
