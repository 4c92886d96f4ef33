use super::*;

#[test]
fn test_control_request_deserialization() {
    let start: ControlRequest = serde_json::from_str(r#"{"action":"start"}"#).unwrap();
    let stop: ControlRequest = serde_json::from_str(r#"{"action":"stop"}"#).unwrap();
    let status: ControlRequest = serde_json::from_str(r#"{"action":"status"}"#).unwrap();
    assert_eq!(start, ControlRequest::Start);
    assert_eq!(stop, ControlRequest::Stop);
    assert_eq!(status, ControlRequest::Status);
}

#[test]
fn test_control_request_unknown_action_rejected() {
    let result: Result<ControlRequest, _> = serde_json::from_str(r#"{"action":"pause"}"#);
    assert!(result.is_err());
}

#[test]
fn test_start_response_wire_shape() {
    let json = serde_json::to_value(ControlResponse::rejected("already running")).unwrap();
    assert_eq!(json, serde_json::json!({"success": false, "message": "already running"}));
}

#[test]
fn test_status_response_uses_camel_case() {
    let resp = ControlResponse::Status {
        is_running: true,
        total_applied: 3,
        current_page: 2,
    };
    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"isRunning": true, "totalApplied": 3, "currentPage": 2})
    );
}

#[test]
fn test_untagged_response_deserializes_by_fields() {
    let start: ControlResponse =
        serde_json::from_str(r#"{"success":true,"message":"started"}"#).unwrap();
    assert_eq!(start, ControlResponse::started("started"));

    let stop: ControlResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
    assert_eq!(stop, ControlResponse::Stop { success: true });

    let status: ControlResponse =
        serde_json::from_str(r#"{"isRunning":false,"totalApplied":0,"currentPage":0}"#).unwrap();
    assert!(matches!(status, ControlResponse::Status { is_running: false, .. }));
}

#[test]
fn test_completed_notification_wire_shape() {
    let note = Notification::completed(7, Confirmation::Unconfirmed);
    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "action": "completed",
            "runId": 7,
            "success": true,
            "confirmation": "unconfirmed"
        })
    );
}

#[test]
fn test_failed_notification_carries_error() {
    let note = Notification::failed(2, "entry point not found");
    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "entry point not found");
    assert!(json.get("confirmation").is_none());
    assert_eq!(note.run_id(), 2);
}

#[test]
fn test_confirmation_success_mapping() {
    assert!(Confirmation::Confirmed.is_success());
    assert!(Confirmation::FormDrained.is_success());
    assert!(Confirmation::Unconfirmed.is_success());
    assert!(!Confirmation::SubmitNotReached.is_success());
    assert!(!Confirmation::Stopped.is_success());
}

#[test]
fn test_confirmation_display_matches_wire() {
    for c in [
        Confirmation::Confirmed,
        Confirmation::FormDrained,
        Confirmation::SubmitNotReached,
    ] {
        let wire = serde_json::to_value(c).unwrap();
        assert_eq!(wire, serde_json::Value::String(c.to_string()));
    }
}
