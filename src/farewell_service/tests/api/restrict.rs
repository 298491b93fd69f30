use farewell_adapters::config::DeleteAccountConfig;
use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn browser_without_session_is_sent_to_login() {
    let app = TestApp::new().await;

    let response = app.get_delete_account("/deleteaccount", false).await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(
        response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/login?redirect=/deleteaccount")
    );
    assert!(app.events().is_empty());
}

#[tokio::test]
async fn rest_client_without_session_is_unauthorized() {
    let config = DeleteAccountConfig::builder().rest("api").build().unwrap();
    let app = TestApp::with_config(config).await;

    let response = app.get_delete_account("/api/deleteaccount", false).await;

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn post_without_session_never_reaches_the_store() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(format!("{}/deleteaccount", app.address))
        .form(&crate::helpers::valid_form())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 303);
    assert!(!app.stored_user().await.account_invalid());
    assert!(app.events().is_empty());
}
