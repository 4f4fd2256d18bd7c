//! Unit tests for backend wire types.
//!
//! Covers message constructors, the JSON shapes sent to the backend, and
//! tolerance for sparse or null fields in what comes back.

use super::*;
use serde_json::json;

use crate::session::ClickstreamEvent;

#[test]
fn test_message_constructors() {
    let msg = Message::system("You are an Incident Wizard");
    assert_eq!(msg.role, MessageRole::System);

    let msg = Message::user("My laptop won't boot");
    assert_eq!(msg.role, MessageRole::User);
    assert_eq!(msg.content, "My laptop won't boot");

    let msg = Message::assistant("What is the error?");
    assert_eq!(msg.role, MessageRole::Assistant);
}

#[test]
fn test_message_role_serializes_lowercase() {
    let value = serde_json::to_value(Message::assistant("hi")).unwrap();
    assert_eq!(value, json!({"role": "assistant", "content": "hi"}));
}

#[test]
fn test_chat_request_shape() {
    let req = ChatRequest::new(vec![Message::system("sys"), Message::user("hello")]);
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(
        value,
        json!({
            "messages": [
                {"role": "system", "content": "sys"},
                {"role": "user", "content": "hello"}
            ]
        })
    );
}

#[test]
fn test_chat_response_failure_without_reply() {
    let resp: ChatResponse =
        serde_json::from_value(json!({"success": false, "error": "quota exceeded"})).unwrap();
    assert!(!resp.success);
    assert!(resp.reply.is_none());
    assert_eq!(resp.error.as_deref(), Some("quota exceeded"));
}

#[test]
fn test_incident_record_tolerates_nulls_and_missing_fields() {
    let rec: IncidentRecord = serde_json::from_value(json!({
        "number": "INC0010001",
        "description": null,
        "priority": "3"
    }))
    .unwrap();
    assert_eq!(rec.number, "INC0010001");
    assert_eq!(rec.description, "");
    assert_eq!(rec.u_related_issues, "");
    assert!(rec.sys_id.is_none());
}

#[test]
fn test_compare_request_shape() {
    let req = CompareRequest::new("printer jammed", "printer is jammed");
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(
        value,
        json!({"description1": "printer jammed", "description2": "printer is jammed"})
    );
}

#[test]
fn test_create_payload_serializes_clickstream_flat() {
    let mut event = ClickstreamEvent::new("chat_opened");
    event.details.insert("page".to_string(), json!("/home"));

    let payload = CreateIncidentPayload {
        short_description: "VPN down".to_string(),
        description: "Cannot reach VPN".to_string(),
        category: "network".to_string(),
        impact: "N/A".to_string(),
        urgency: "N/A".to_string(),
        u_version: "1.0.0".to_string(),
        correlation_id: "abc".to_string(),
        u_page: "/home".to_string(),
        u_os: "Linux".to_string(),
        u_browser: "Firefox".to_string(),
        u_html_of_page: String::new(),
        u_clickstream_data: vec![event],
    };

    let value = serde_json::to_value(&payload).unwrap();
    let first = &value["u_clickstream_data"][0];
    assert_eq!(first["event"], "chat_opened");
    assert_eq!(first["page"], "/home");
    assert!(first["ts"].is_string());
    assert_eq!(value["impact"], "N/A");
}

#[test]
fn test_update_request_shape() {
    let req = UpdateIncidentRequest {
        u_related_issues: "a\nb".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&req).unwrap(),
        json!({"u_related_issues": "a\nb"})
    );
}

#[test]
fn test_example_data_defaults() {
    let resp: ExampleDataResponse = serde_json::from_value(json!({
        "success": true,
        "banks": [{"bank_name": "First Bank", "iban": "GB00"}]
    }))
    .unwrap();
    assert!(resp.success);
    assert_eq!(resp.banks.len(), 1);
    assert_eq!(resp.banks[0].bank_name, "First Bank");
    assert_eq!(resp.banks[0].swift_bic, "");
}
