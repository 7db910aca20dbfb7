use crate::HttpStatusCode;

/// **VALUE**: Verifies the status ranges used when describing undecodable responses.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one at the range edges (299/300, 499/500).
#[test]
fn given_status_codes_when_categorized_then_ranges_are_exclusive() {
    assert!(HttpStatusCode(200).is_success());
    assert!(!HttpStatusCode(300).is_success());
    assert!(HttpStatusCode(404).is_client_error());
    assert!(!HttpStatusCode(404).is_server_error());
    assert!(HttpStatusCode(500).is_server_error());
    assert!(!HttpStatusCode(499).is_server_error());
}

#[test]
fn given_status_code_when_displayed_then_prints_number_only() {
    assert_eq!(HttpStatusCode::from(401).to_string(), "401");
}
