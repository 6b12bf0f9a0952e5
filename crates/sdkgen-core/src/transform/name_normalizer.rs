use heck::ToPascalCase;

/// Prefix carried by every definition reference.
pub const DEFINITION_PREFIX: &str = "#/definitions/";

/// Vendor prefixes removed from generated function names.
pub const KNOWN_PREFIXES: &[&str] = &["nakama_", "satori_"];

/// Operation id prefix of authentication operations.
pub const AUTHENTICATE_PREFIX: &str = "Nakama_Authenticate";

/// Continuation marker used when a description spans several comment lines.
pub const COMMENT_CONTINUATION: &str = "\n--";

/// Remove the `#/definitions/` prefix from a reference, if present.
pub fn strip_definition_prefix(reference: &str) -> &str {
    reference
        .strip_prefix(DEFINITION_PREFIX)
        .unwrap_or(reference)
}

/// Capitalize the first letter of each whitespace-delimited word.
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if at_word_start {
            result.extend(ch.to_uppercase());
        } else {
            result.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }
    result
}

/// Convert `PascalCase` or `camelCase` to `snake_case`.
///
/// A separator is inserted only where an uppercase letter directly follows a
/// lowercase one, so acronyms stay glued: `HTTPCode` becomes `httpcode`.
pub fn pascal_to_snake(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_ascii_uppercase() && prev_lower {
            result.push('_');
        }
        result.extend(ch.to_lowercase());
        prev_lower = ch.is_ascii_lowercase();
    }
    result
}

/// Upper-case the first character.
pub fn camel_to_pascal(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character.
pub fn pascal_to_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Remove every occurrence of each prefix, anywhere in the string.
pub fn strip_prefixes<S: AsRef<str>>(name: &str, prefixes: &[S]) -> String {
    prefixes
        .iter()
        .fold(name.to_string(), |acc, prefix| match prefix.as_ref() {
            "" => acc,
            p => acc.replace(p, ""),
        })
}

/// Remove the built-in vendor prefixes (`nakama_`, `satori_`).
pub fn strip_known_prefixes(name: &str) -> String {
    strip_prefixes(name, KNOWN_PREFIXES)
}

pub fn is_authenticate_operation_with(operation_id: &str, prefix: &str) -> bool {
    !prefix.is_empty() && operation_id.starts_with(prefix)
}

/// Whether an operation id denotes an authentication call.
pub fn is_authenticate_operation(operation_id: &str) -> bool {
    is_authenticate_operation_with(operation_id, AUTHENTICATE_PREFIX)
}

/// Keep multi-line descriptions inside single-line comments.
pub fn strip_newlines(text: &str) -> String {
    text.replace('\n', COMMENT_CONTINUATION)
}

/// Drop characters that cannot appear in an identifier.
pub fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if result.is_empty() && ch.is_ascii_digit() {
                result.push('_');
            }
            result.push(ch);
        }
    }
    result
}

/// Derive a PascalCase operation name from HTTP method + path, used when an
/// operation has no `operationId`.
///
/// Examples:
/// - `GET /v2/account` → `ListV2Account`
/// - `GET /v2/user/{id}` → `GetV2User`
/// - `POST /v2/friend` → `CreateV2Friend`
pub fn route_to_name(method: &str, path: &str) -> String {
    let mut resource_parts: Vec<&str> = Vec::new();
    let mut ends_with_param = false;

    for seg in path.split('/').filter(|s| !s.is_empty()) {
        if seg.starts_with('{') && seg.ends_with('}') {
            ends_with_param = true;
        } else {
            resource_parts.push(seg);
            ends_with_param = false;
        }
    }

    let prefix = match method.to_uppercase().as_str() {
        "GET" if ends_with_param => "Get",
        "GET" => "List",
        "POST" => "Create",
        "PUT" => "Update",
        "DELETE" => "Delete",
        "PATCH" => "Patch",
        "OPTIONS" => "Options",
        "HEAD" => "Head",
        _ => "Call",
    };

    let resource: String = resource_parts
        .iter()
        .map(|part| part.to_pascal_case())
        .collect();

    format!("{prefix}{resource}")
}
