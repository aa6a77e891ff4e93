use provenance_portal::handlers::is_valid_email;
use provenance_portal::models::{JoinWaitlistRequest, WaitlistResponse};

// --- Email shape validation ---

#[test]
fn accepts_basic_well_formed_addresses() {
    for email in [
        "a@b.com",
        "curator@gallery.co.uk",
        "first.last@museum.org",
        "x+waitlist@provenance.art",
    ] {
        assert!(is_valid_email(email), "should accept {email}");
    }
}

#[test]
fn rejects_malformed_addresses() {
    for email in [
        "",
        "not-an-email",
        "@b.com",
        "a@",
        "a@b",
        "a@.com",
        "a@b.",
        "a@@b.com",
        "a@b@c.com",
        "a b@c.com",
        "a@b .com",
    ] {
        assert!(!is_valid_email(email), "should reject {email:?}");
    }
}

// --- JSON envelope shapes ---

#[test]
fn waitlist_response_omits_absent_fields() {
    let body = serde_json::to_string(&WaitlistResponse {
        success: Some(true),
        error: None,
    })
    .unwrap();
    assert_eq!(body, r#"{"success":true}"#);

    let body = serde_json::to_string(&WaitlistResponse {
        success: None,
        error: Some("Email is required".to_string()),
    })
    .unwrap();
    assert_eq!(body, r#"{"error":"Email is required"}"#);
}

#[test]
fn duplicate_notice_carries_both_fields() {
    let body = serde_json::to_string(&WaitlistResponse {
        success: Some(true),
        error: Some("This email is already on the waitlist".to_string()),
    })
    .unwrap();
    assert_eq!(
        body,
        r#"{"success":true,"error":"This email is already on the waitlist"}"#
    );
}

#[test]
fn join_request_tolerates_missing_fields() {
    // A bare `{}` must deserialize so the handler (not serde) owns the
    // "Email is required" rejection.
    let request: JoinWaitlistRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(request.email, None);
    assert_eq!(request.name, None);
    assert_eq!(request.role, None);

    let request: JoinWaitlistRequest =
        serde_json::from_str(r#"{"email":"a@b.com","name":"Ada","role":"collector"}"#).unwrap();
    assert_eq!(request.email.as_deref(), Some("a@b.com"));
    assert_eq!(request.name.as_deref(), Some("Ada"));
    assert_eq!(request.role.as_deref(), Some("collector"));
}
