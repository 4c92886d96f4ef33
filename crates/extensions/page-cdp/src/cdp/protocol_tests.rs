use super::*;

fn page(id: &str, kind: &str, url: &str) -> PageInfo {
    PageInfo {
        id: id.to_string(),
        page_type: kind.to_string(),
        title: String::new(),
        url: url.to_string(),
        web_socket_debugger_url: None,
    }
}

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 1,
        method: "Runtime.evaluate".to_string(),
        params: Some(serde_json::json!({"expression": "1 + 1"})),
        session_id: Some("S1".to_string()),
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("Runtime.evaluate"));
    assert!(json.contains("\"sessionId\":\"S1\""));
}

#[test]
fn test_cdp_response_deserialize() {
    let json = r#"{"id": 1, "result": {"result": {"type": "number", "value": 2}}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(1));
    assert!(resp.error.is_none());
}

#[test]
fn test_cdp_error_response_deserialize() {
    let json = r#"{"id": 7, "error": {"code": -32000, "message": "No node"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    let error = resp.error.unwrap();
    assert_eq!(error.code, -32000);
    assert_eq!(error.message, "No node");
}

#[test]
fn test_browser_version_deserialize() {
    let json = r#"{
        "Browser": "Chrome/126.0",
        "Protocol-Version": "1.3",
        "User-Agent": "Mozilla/5.0",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/abc"
    }"#;
    let version: BrowserVersion = serde_json::from_str(json).unwrap();
    assert_eq!(version.protocol_version, "1.3");
    assert!(version.web_socket_debugger_url.starts_with("ws://"));
}

#[test]
fn test_select_page_applies_filter() {
    let pages = vec![
        page("w1", "service_worker", "https://www.linkedin.com/jobs/view/1"),
        page("p1", "page", "https://example.com"),
        page("p2", "page", "https://www.linkedin.com/jobs/view/1"),
    ];
    assert_eq!(select_page(&pages, Some("linkedin.com/jobs")).map(|p| p.id.as_str()), Some("p2"));
    assert_eq!(select_page(&pages, None).map(|p| p.id.as_str()), Some("p1"));
    assert!(select_page(&pages, Some("indeed.com")).is_none());
}
