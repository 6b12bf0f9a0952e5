use sdkgen_core::transform::name_normalizer::{
    camel_to_pascal, is_authenticate_operation, pascal_to_camel, pascal_to_snake,
    strip_definition_prefix, strip_known_prefixes, strip_prefixes, title_case,
};

#[test]
fn test_operation_id_to_function_name() {
    let name = strip_known_prefixes(&pascal_to_snake("Nakama_AuthenticateEmail"));
    assert_eq!(name, "authenticate_email");

    let name = strip_known_prefixes(&pascal_to_snake("Satori_GetFlags"));
    assert_eq!(name, "get_flags");
}

#[test]
fn test_reference_to_constructor_name() {
    let class = title_case(strip_definition_prefix("#/definitions/apiAccountDevice"));
    assert_eq!(class, "ApiAccountDevice");
    assert_eq!(pascal_to_snake(&class), "api_account_device");
}

#[test]
fn test_acronyms_stay_glued() {
    assert_eq!(pascal_to_snake("HTTPCode"), "httpcode");
    assert_eq!(pascal_to_snake("GetHTTPKey"), "get_httpkey");
    assert_eq!(pascal_to_snake("user_id"), "user_id");
}

#[test]
fn test_case_swap_roundtrip() {
    assert_eq!(pascal_to_camel(&camel_to_pascal("apiSession")), "apiSession");
    assert_eq!(camel_to_pascal("a"), "A");
}

#[test]
fn test_custom_prefixes() {
    assert_eq!(strip_prefixes("acme_do_acme_thing", &["acme_"]), "do_thing");
    assert_eq!(strip_prefixes("keep", &[""]), "keep");
}

#[test]
fn test_authenticate_predicate() {
    assert!(is_authenticate_operation("Nakama_AuthenticateDevice"));
    assert!(!is_authenticate_operation("Nakama_GetAccount"));
    assert!(!is_authenticate_operation("nakama_authenticate_email"));
}
