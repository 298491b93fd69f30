use color_eyre::eyre::Result;
use farewell_adapters::{
    config::{DeleteAccountSettings, DemoAccount},
    hashing::Argon2Hasher,
    persistence::{DashMapSessionStore, HashMapUserStore},
    views::AskamaViewRenderer,
};
use farewell_axum::DeleteAccount;
use farewell_core::{
    Email, Password, PasswordHasher, Session, SessionId, SessionUser, UserRecord,
};
use farewell_service::DeleteAccountService;
use secrecy::{ExposeSecret, Secret};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Standalone account deletion service backed by the in-memory stores
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = DeleteAccountSettings::load()?;
    let config = settings.delete_account_config()?;

    let user_store = HashMapUserStore::new();
    let session_store = DashMapSessionStore::new();
    let hasher = Argon2Hasher::default();

    if let Some(demo) = &settings.demo {
        seed_demo_account(demo, &user_store, &session_store, &hasher).await?;
    }

    let service = DeleteAccountService::new(DeleteAccount::new(
        config,
        user_store,
        hasher,
        session_store,
        AskamaViewRenderer,
    ));

    let listener = tokio::net::TcpListener::bind(&settings.server.address).await?;
    tracing::info!("Starting account deletion service...");

    service
        .run_standalone(listener, settings.server.allowed_origins.clone())
        .await?;

    Ok(())
}

/// Create the demo user and a logged-in session for it.
async fn seed_demo_account(
    demo: &DemoAccount,
    user_store: &HashMapUserStore,
    session_store: &DashMapSessionStore,
    hasher: &Argon2Hasher,
) -> Result<()> {
    let email = Email::try_from(demo.email.clone())?;
    let password = Password::try_from(Secret::new(demo.password.expose_secret().clone()))?;

    let salt = Argon2Hasher::generate_salt();
    let derived_key = hasher.hash(&password, &salt, demo.iterations).await?;

    let mut user = UserRecord::new(
        uuid::Uuid::new_v4().to_string(),
        email.as_str(),
        salt,
        derived_key.expose_secret().clone(),
    );
    if let Some(iterations) = demo.iterations {
        user = user.with_iterations(iterations);
    }
    user_store.insert(user).await;

    let session_id = SessionId::new(demo.session_id.clone());
    session_store.insert(Session::new(
        session_id.clone(),
        Some(SessionUser::with_email(email)),
    ));

    tracing::info!(session = %session_id, "Seeded demo account");
    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
