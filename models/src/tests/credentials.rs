use crate::{Credentials, ModelError};

/// **VALUE**: Verifies credentials serialize to the flat JSON object the login endpoint reads.
///
/// **WHY THIS MATTERS**: The password is wrapped in a type that refuses serialization, so
/// the container has to opt in explicitly. If it does not, every login request fails.
///
/// **BUG THIS CATCHES**: Would catch serializing the wrapper instead of `as_str()`, or
/// nesting extra form fields under a sub-object.
#[test]
fn given_form_pairs_when_serialized_then_flat_json_object() {
    // GIVEN: Form pairs including an extra field
    let credentials = Credentials::from_form_pairs([
        ("username", "alice"),
        ("password", "s3cret"),
        ("remember", "on"),
    ])
    .unwrap();

    // WHEN: Serializing
    let json = serde_json::to_value(&credentials).unwrap();

    // THEN: All fields should sit at the top level, verbatim
    assert_eq!(
        json,
        serde_json::json!({"username": "alice", "password": "s3cret", "remember": "on"})
    );
}

#[test]
fn given_credentials_when_debug_formatted_then_password_hidden() {
    let credentials = Credentials::builder()
        .with_username("alice")
        .with_password("s3cret")
        .build()
        .unwrap();

    let debug = format!("{credentials:?}");

    assert!(debug.contains("alice"));
    assert!(!debug.contains("s3cret"));
}

#[test]
fn given_missing_password_when_built_then_validation_error() {
    let result = Credentials::builder().with_username("alice").build();

    assert!(matches!(result, Err(ModelError::Validation { .. })));
}

/// **VALUE**: Verifies the form's `required` constraint on the username is enforced.
#[test]
fn given_empty_username_when_built_then_validation_error() {
    let result = Credentials::from_form_pairs([("username", ""), ("password", "x")]);

    match result {
        Err(error) => assert_eq!(error.message(), "Username cannot be empty"),
        Ok(_) => panic!("Empty username should be rejected"),
    }
}
