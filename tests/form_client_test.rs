mod common;

use common::*;
use consultation_relay::domain::options::{CareType, Relationship, Urgency};
use consultation_relay::{ConsultationClient, ConsultationForm, FormStatus, RelayFailurePolicy};
use httpmock::prelude::*;
use serde_json::json;

fn fill(form: &mut ConsultationForm) {
    let fields = form.fields_mut();
    fields.first_name = "Margaret".to_string();
    fields.last_name = "Okafor".to_string();
    fields.email = "margaret@example.co.uk".to_string();
    fields.phone = "07544 152585".to_string();
    fields.area = "Leeds".to_string();
    fields.care_recipient_name = "Grace Okafor".to_string();
    fields.consent = true;
    form.select_care_type(CareType::Companionship);
}

fn client(server: &MockServer) -> ConsultationClient {
    ConsultationClient::new(server.url("/api/consultation"), BROWSER_AGENT).unwrap()
}

#[tokio::test]
async fn test_consultation_form_success_keeps_fields() {
    let server = MockServer::start_async().await;
    let endpoint_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/consultation")
                .header("user-agent", BROWSER_AGENT)
                .json_body_partial(
                    r#"{"firstName": "Margaret", "relationship": "Spouse/Partner", "consent": true}"#,
                );
            then.status(200).json_body(json!({
                "success": true,
                "message": "Consultation request submitted successfully!"
            }));
        })
        .await;

    let mut form = ConsultationForm::consultation();
    fill(&mut form);
    form.select_relationship(Relationship::SpouseOrPartner);
    form.select_urgency(Urgency::WithinOneWeek);

    let status = form.submit(&client(&server)).await.clone();
    assert_eq!(
        status,
        FormStatus::Success("Consultation request submitted successfully!".to_string())
    );
    assert_eq!(form.fields().first_name, "Margaret");
    assert_eq!(form.fields().care_recipient_name, "Grace Okafor");
    endpoint_mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_contact_form_omits_recipient_and_resets() {
    let server = MockServer::start_async().await;
    let endpoint_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/consultation")
                .json_body_partial(
                    r#"{"careRecipientName": "", "urgency": "Just exploring options"}"#,
                );
            then.status(200)
                .json_body(json!({"success": true, "message": "Thanks"}));
        })
        .await;

    let mut form = ConsultationForm::contact();
    fill(&mut form);

    let status = form.submit(&client(&server)).await.clone();
    assert_eq!(status, FormStatus::Success("Thanks".to_string()));
    assert!(form.fields().first_name.is_empty());
    assert!(!form.fields().consent);
    assert_eq!(form.fields().urgency, "Just exploring options");
    endpoint_mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_server_error_message_is_shown() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/consultation");
            then.status(400)
                .json_body(json!({"success": false, "error": "Please enter a valid phone number."}));
        })
        .await;

    let mut form = ConsultationForm::contact();
    fill(&mut form);

    let status = form.submit(&client(&server)).await.clone();
    assert_eq!(
        status,
        FormStatus::Error("Please enter a valid phone number.".to_string())
    );
    assert_eq!(form.fields().first_name, "Margaret");
}

#[tokio::test]
async fn test_unparseable_answer_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/consultation");
            then.status(502).body("<html>Bad Gateway</html>");
        })
        .await;

    let mut form = ConsultationForm::contact();
    fill(&mut form);

    let status = form.submit(&client(&server)).await.clone();
    assert_eq!(
        status,
        FormStatus::Error(consultation_relay::client::form::FALLBACK_ERROR.to_string())
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_network_error() {
    let client =
        ConsultationClient::new("http://127.0.0.1:1/api/consultation", BROWSER_AGENT).unwrap();
    let mut form = ConsultationForm::contact();
    fill(&mut form);

    let status = form.submit(&client).await.clone();
    assert_eq!(
        status,
        FormStatus::Error(consultation_relay::client::form::NETWORK_ERROR.to_string())
    );
}

#[tokio::test]
async fn test_form_against_running_server() {
    let provider = MockServer::start_async().await;
    let relay_mock = provider
        .mock_async(|when, then| {
            when.method(POST)
                .path("/submit")
                .body_contains("Care Recipient: Not specified")
                .body_contains("Urgency: Just exploring options");
            then.status(200).json_body(json!({"success": true}));
        })
        .await;

    let app = build_app(
        &provider.url("/submit"),
        Some(TEST_ACCESS_KEY),
        RelayFailurePolicy::FailLoudly,
        false,
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client =
        ConsultationClient::new(format!("http://{}/api/consultation", addr), BROWSER_AGENT)
            .unwrap();
    let mut form = ConsultationForm::contact();
    fill(&mut form);

    let status = form.submit(&client).await.clone();
    assert_eq!(
        status,
        FormStatus::Success("Consultation request submitted successfully!".to_string())
    );
    relay_mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_contact_form_always_sends_exploring_urgency() {
    let server = MockServer::start_async().await;
    let endpoint_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/consultation")
                .json_body_partial(r#"{"urgency": "Just exploring options"}"#);
            then.status(400)
                .json_body(json!({"success": false, "error": "Please enter a valid phone number."}));
        })
        .await;

    let mut form = ConsultationForm::contact();
    fill(&mut form);
    form.select_urgency(Urgency::Immediately);

    form.submit(&client(&server)).await;
    assert_eq!(form.fields().urgency, "Just exploring options");
    endpoint_mock.assert_hits_async(1).await;
}
