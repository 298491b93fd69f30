use farewell_adapters::config::{DeleteAccountConfig, MISSING_VIEW_MARKUP};
use serde_json::{Value, json};

use crate::helpers::{EMAIL, PASSWORD, TestApp, valid_form};

#[tokio::test]
async fn get_shows_confirmation_form() {
    let app = TestApp::new().await;

    let response = app.get_delete_account("/deleteaccount", true).await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("<form"));
    assert!(body.contains("DELETE ACCOUNT"));
    assert_eq!(app.events().len(), 1);
}

#[tokio::test]
async fn correct_form_deletes_account_and_ends_session() {
    let app = TestApp::new().await;

    let response = app
        .post_delete_account_form("/deleteaccount", &valid_form())
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("farewell.sid="));
    assert!(response.text().await.unwrap().contains("has been deleted"));

    let user = app.stored_user().await;
    assert!(user.account_locked());
    assert!(user.account_invalid());
    assert_eq!(user.email(), None);
    assert!(!app.session_store.contains(&app.session_id));

    assert_eq!(
        app.events(),
        vec![("/deleteaccount".to_string(), None)]
    );

    let again = app.get_delete_account("/deleteaccount", true).await;
    assert_eq!(again.status().as_u16(), 303);
}

#[tokio::test]
async fn validation_errors_are_shown_on_the_form() {
    let app = TestApp::new().await;

    let cases = [
        (
            vec![("email", EMAIL), ("phrase", "DELETE ACCOUNT")],
            "All fields are required",
        ),
        (
            vec![
                ("email", EMAIL),
                ("phrase", "Delete Account"),
                ("password", PASSWORD),
            ],
            "The phrase is incorrect",
        ),
        (
            vec![
                ("email", "someone@example.com"),
                ("phrase", "DELETE ACCOUNT"),
                ("password", PASSWORD),
            ],
            "Please enter your email address",
        ),
        (
            vec![
                ("email", EMAIL),
                ("phrase", "DELETE ACCOUNT"),
                ("password", "wrong"),
            ],
            "The password is incorrect",
        ),
    ];

    for (form, message) in cases {
        let response = app.post_delete_account_form("/deleteaccount", &form).await;

        assert_eq!(response.status().as_u16(), 200, "{message}");
        let body = response.text().await.unwrap();
        assert!(body.contains(message), "expected {message:?} in {body}");
    }

    let user = app.stored_user().await;
    assert!(!user.account_invalid());
    assert_eq!(user.email(), Some(EMAIL));
    assert!(app.session_store.contains(&app.session_id));
    assert_eq!(app.events().len(), 4);
}

#[tokio::test]
async fn rest_clients_get_json() {
    let app = TestApp::new().await;

    let response = app
        .post_delete_account_json(
            "/deleteaccount?rest",
            &json!({ "email": EMAIL, "phrase": "DELETE ACCOUNT", "password": "wrong" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 403);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "message": "The password is incorrect", "error": "incorrect_password" })
    );

    let response = app
        .post_delete_account_json(
            "/deleteaccount?rest",
            &json!({ "email": EMAIL, "phrase": "DELETE ACCOUNT", "password": PASSWORD }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "result": true }));
}

#[tokio::test]
async fn completion_route_redirects_after_deletion() {
    let config = DeleteAccountConfig::builder()
        .completion_route("/goodbye")
        .build()
        .unwrap();
    let app = TestApp::with_config(config).await;

    let response = app
        .post_delete_account_form("/deleteaccount", &valid_form())
        .await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(
        response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/goodbye")
    );
    assert!(app.stored_user().await.account_invalid());
}

#[tokio::test]
async fn custom_event_name_reaches_observers() {
    let config = DeleteAccountConfig::builder()
        .event_message("account_removed")
        .build()
        .unwrap();
    let app = TestApp::with_config(config).await;

    app.post_delete_account_form(
        "/deleteaccount",
        &[("email", EMAIL), ("phrase", "nope"), ("password", PASSWORD)],
    )
    .await;

    assert_eq!(
        app.events(),
        vec![(
            "account_removed".to_string(),
            Some("The phrase is incorrect".to_string())
        )]
    );
}

#[tokio::test]
async fn missing_view_is_reported() {
    let config = DeleteAccountConfig::builder()
        .remove_view(None)
        .build()
        .unwrap();
    let app = TestApp::with_config(config).await;

    let response = app.get_delete_account("/deleteaccount", true).await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.text().await.unwrap(), MISSING_VIEW_MARKUP);
}
