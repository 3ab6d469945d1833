use std::time::Duration;

use wiremock::{
    matchers::{any, body_string_contains, method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::helpers::spawn_app;

const VALID_BODY: &str = "cbxname=Jane&cbxemail=jane%40x.com&cbxmessage=Hi&cbxsubject=Hello";

async fn wait_for_requests(server: &MockServer, expected: usize) -> usize {
    for _ in 0..50 {
        let received = server.received_requests().await.unwrap_or_default().len();
        if received >= expected {
            return received;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    server.received_requests().await.unwrap_or_default().len()
}

#[tokio::test]
async fn contact_relays_a_valid_message_to_the_admin() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(VALID_BODY).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "validation_error": false,
            "error_field": [],
            "message": {},
            "error": false,
            "successmessage": "Message has been sent successfully !",
        })
    );
}

#[tokio::test]
async fn the_admin_alert_carries_the_subject_and_message() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    app.post_contact(VALID_BODY).await;

    let email_request = &app.email_server.received_requests().await.unwrap()[0];
    let request_body: serde_json::Value = serde_json::from_slice(&email_request.body).unwrap();

    assert_eq!(request_body["To"], "Admin_Name <xyz@exampledomain.com>");
    assert_eq!(request_body["From"], "System <noreply@exampledomain.com>");
    assert_eq!(request_body["Subject"], "Hello");
    assert!(request_body["TextBody"].as_str().unwrap().contains("Hi"));
    assert!(request_body["HtmlBody"].as_str().unwrap().contains("Hi"));
}

#[tokio::test]
async fn missing_fields_are_all_reported_and_nothing_is_sent() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact("cbxemail=").await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "validation_error": true,
            "error_field": ["cbxname", "cbxemail", "cbxmessage", "cbxsubject"],
            "message": {
                "cbxname": "The Name field is required.",
                "cbxemail": "The Email field is required.",
                "cbxmessage": "The Message field is required.",
                "cbxsubject": "The Subject field is required.",
            },
            "error": false,
        })
    );
}

#[tokio::test]
async fn contact_rejects_fields_that_are_present_but_invalid() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (
            "cbxname=Jane2&cbxemail=jane%40x.com&cbxmessage=Hi&cbxsubject=Hello",
            "cbxname",
            "digits in the name",
        ),
        (
            "cbxname=Jane&cbxemail=definitely-not-an-email&cbxmessage=Hi&cbxsubject=Hello",
            "cbxemail",
            "invalid email",
        ),
        (
            "cbxname=Jane&cbxemail=jane%40x.com&cbxmessage=%3Cscript%3E&cbxsubject=Hello",
            "cbxmessage",
            "markup in the message",
        ),
        (
            "cbxname=Jane&cbxemail=jane%40x.com&cbxmessage=Hi&cbxsubject=+++",
            "cbxsubject",
            "blank subject",
        ),
    ];

    for (body, field, description) in test_cases {
        let response = app.post_contact(body).await;
        let json: serde_json::Value = response.json().await.unwrap();

        assert_eq!(
            json["validation_error"], true,
            "The API accepted the payload with {}",
            description
        );
        assert_eq!(json["error_field"], serde_json::json!([field]), "{}", description);
    }
}

#[tokio::test]
async fn no_copy_is_sent_when_the_author_did_not_ask_for_one() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(VALID_BODY).await;
    assert_eq!(200, response.status().as_u16());

    // leave room for a stray detached send to show up
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn a_failing_copy_still_reports_success() {
    let app = spawn_app().await;

    Mock::given(body_string_contains("xyz@exampledomain.com"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(body_string_contains("Jane <jane@x.com>"))
        .and(body_string_contains("Thanks for contact, your copy"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_contact(&format!("{}&cbxsendme=on", VALID_BODY))
        .await;

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], false);
    assert_eq!(body["successmessage"], "Message has been sent successfully !");
    assert_eq!(wait_for_requests(&app.email_server, 2).await, 2);
}

#[tokio::test]
async fn a_delivery_failure_is_reported_without_transport_detail() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500).set_body_string("relay 127.0.0.1:1025 refused"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_contact(&format!("{}&cbxsendme=on", VALID_BODY))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["validation_error"], false);
    assert_eq!(body["error"], true);
    assert_eq!(
        body["successmessage"],
        "Sorry, Mail could not be sent. Please contact server admin."
    );
}

#[tokio::test]
async fn an_empty_submission_is_rejected_with_a_400() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact("").await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], true);
    assert_eq!(body["successmessage"], "No form data was submitted.");
}

#[tokio::test]
async fn a_bare_post_without_body_gets_the_json_rejection() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(format!("{}/contact", app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], true);
    assert_eq!(body["validation_error"], false);
    assert_eq!(body["successmessage"], "No form data was submitted.");
}

#[tokio::test]
async fn an_oversized_form_is_refused_before_any_mail_is_sent() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let body = format!(
        "cbxname=Jane&cbxemail=jane%40x.com&cbxsubject=Hello&cbxmessage={}",
        "a".repeat(20_000)
    );
    let response = app.post_contact(&body).await;

    assert_eq!(413, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], true);
    assert_eq!(body["successmessage"], "The submitted form is too large.");
}

#[tokio::test]
async fn a_body_that_is_not_url_encoded_gets_the_json_rejection() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(format!("{}/contact", app.address))
        .header("Content-Type", "application/json")
        .body(r#"{"cbxname": "Jane"}"#)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], true);
    assert_eq!(body["successmessage"], "The submitted form could not be read.");
}
