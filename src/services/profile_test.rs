use super::*;

#[test]
fn looks_like_email_accepts_basic_address() {
    assert!(looks_like_email("demo@example.com"));
    assert!(looks_like_email("a@b.c"));
}

#[test]
fn looks_like_email_rejects_bad_shapes() {
    assert!(!looks_like_email("demo"));
    assert!(!looks_like_email("@example.com"));
    assert!(!looks_like_email("demo@example"));
    assert!(!looks_like_email("demo@.com"));
    assert!(!looks_like_email("demo@example."));
    assert!(!looks_like_email("demo @example.com"));
}

#[test]
fn looks_like_email_matches_anywhere_in_value() {
    assert!(looks_like_email("contact: demo@example.com"));
}

#[test]
fn validate_form_accepts_complete_input() {
    assert!(validate_profile_form("demo", "demo@example.com").is_empty());
}

#[test]
fn validate_form_requires_both_fields() {
    let errors = validate_profile_form("", "");
    assert_eq!(
        errors,
        vec![
            FieldError { field: ProfileField::Username, message: "Username is required" },
            FieldError { field: ProfileField::Email, message: "Email is required" },
        ]
    );
}

#[test]
fn validate_form_flags_invalid_email() {
    let errors = validate_profile_form("demo", "not-an-email");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, ProfileField::Email);
    assert_eq!(errors[0].message, "Email is invalid");
}

fn current() -> User {
    User {
        id: 1,
        username: "demo".into(),
        email: "demo@example.com".into(),
        first_name: None,
        last_name: None,
    }
}

#[test]
fn validate_update_checks_untouched_fields_from_current() {
    let patch = UserPatch { first_name: Some("A".into()), ..UserPatch::default() };
    assert!(validate_update(&current(), &patch).is_empty());

    let broken = User { email: "legacy".into(), ..current() };
    assert_eq!(validate_update(&broken, &patch)[0].message, "Email is invalid");
}

#[test]
fn validate_update_rejects_blanked_username() {
    let patch = UserPatch { username: Some(String::new()), ..UserPatch::default() };
    let errors = validate_update(&current(), &patch);
    assert_eq!(errors, vec![FieldError { field: ProfileField::Username, message: "Username is required" }]);
}

#[test]
fn validate_update_rejects_invalid_email() {
    let patch = UserPatch { email: Some("nope".into()), ..UserPatch::default() };
    assert_eq!(validate_update(&current(), &patch)[0].message, "Email is invalid");
}
