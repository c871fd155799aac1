use super::*;

#[test]
fn user_accepts_mongo_style_id() {
    let user: User = serde_json::from_str(r#"{"_id":"u1","username":"alice","email":"a@x.io"}"#).unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.username, "alice");
    assert!(user.avatar.is_none());
}

#[test]
fn user_accepts_plain_id() {
    let user: User = serde_json::from_str(r#"{"id":"u2","username":"bob","email":"b@x.io"}"#).unwrap();
    assert_eq!(user.id, "u2");
}

#[test]
fn update_body_omits_current_password_when_absent() {
    let body = UpdateProfileBody { username: "alice", email: "a@x.io", new_password: "", current_password: None };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "username": "alice", "email": "a@x.io", "newPassword": "" }));
}

#[test]
fn update_body_includes_current_password_when_present() {
    let body =
        UpdateProfileBody { username: "alice", email: "a@x.io", new_password: "n3w", current_password: Some("old") };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["currentPassword"], "old");
    assert_eq!(json["newPassword"], "n3w");
}

#[test]
fn error_body_tolerates_missing_message() {
    let body: ErrorBody = serde_json::from_str(r#"{"code":7}"#).unwrap();
    assert!(body.message.is_none());
}

#[test]
fn user_tolerates_missing_profile_fields() {
    let user: User = serde_json::from_str(r#"{"_id":"u3"}"#).unwrap();
    assert_eq!(user.id, "u3");
    assert!(user.username.is_empty());
    assert!(user.email.is_empty());
}
