use std::sync::{Arc, Mutex};

use farewell_adapters::{
    config::{DeleteAccountConfig, test},
    hashing::Argon2Hasher,
    persistence::{DashMapSessionStore, HashMapUserStore},
    views::AskamaViewRenderer,
};
use farewell_axum::DeleteAccount;
use farewell_core::{
    DeletionEvent, Email, Password, PasswordHasher, SessionId, SessionUser, UserRecord,
};
use farewell_service::DeleteAccountService;
use secrecy::{ExposeSecret, Secret};

pub const EMAIL: &str = "jane@example.com";
pub const PASSWORD: &str = "correct horse battery staple";
pub const USER_ID: &str = "user-1";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub user_store: HashMapUserStore,
    pub session_store: DashMapSessionStore,
    pub session_id: SessionId,
    /// Names and error messages of every event the observers received.
    pub events: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(DeleteAccountConfig::default()).await
    }

    pub async fn with_config(config: DeleteAccountConfig) -> Self {
        let hasher = Argon2Hasher::new(64, 1, 1);
        let salt = Argon2Hasher::generate_salt();
        let password = Password::try_from(Secret::new(PASSWORD.to_string())).unwrap();
        let derived_key = hasher.hash(&password, &salt, Some(3)).await.unwrap();

        let user_store = HashMapUserStore::new();
        user_store
            .insert(
                UserRecord::new(USER_ID, EMAIL, salt, derived_key.expose_secret().clone())
                    .with_iterations(3),
            )
            .await;

        let session_store = DashMapSessionStore::new();
        let email = Email::try_from(EMAIL.to_string()).unwrap();
        let session_id = session_store.open(Some(SessionUser::with_email(email)));

        let events = Arc::new(Mutex::new(Vec::new()));
        let recorded = events.clone();

        let delete_account = DeleteAccount::new(
            config,
            user_store.clone(),
            hasher,
            session_store.clone(),
            AskamaViewRenderer,
        )
        .observer(move |event: &DeletionEvent<'_>| {
            recorded
                .lock()
                .unwrap()
                .push((event.name.to_string(), event.error.map(|e| e.message())));
        });

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let service = DeleteAccountService::new(delete_account);
        let _ = tokio::spawn(service.run_standalone(listener, Vec::new()));

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            address,
            http_client,
            user_store,
            session_store,
            session_id,
            events,
        }
    }

    pub fn session_cookie(&self) -> String {
        format!("farewell.sid={}", self.session_id)
    }

    pub async fn get_delete_account(&self, path: &str, with_session: bool) -> reqwest::Response {
        let mut request = self.http_client.get(format!("{}{}", self.address, path));
        if with_session {
            request = request.header("cookie", self.session_cookie());
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn post_delete_account_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .header("cookie", self.session_cookie())
            .form(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_delete_account_json<Body>(&self, path: &str, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .header("cookie", self.session_cookie())
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn stored_user(&self) -> UserRecord {
        self.user_store.get(USER_ID).await.expect("User vanished")
    }

    pub fn events(&self) -> Vec<(String, Option<String>)> {
        self.events.lock().unwrap().clone()
    }
}

pub fn valid_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("email", EMAIL),
        ("phrase", "DELETE ACCOUNT"),
        ("password", PASSWORD),
    ]
}
