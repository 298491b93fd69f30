use axum::{
    Router,
    http::{HeaderValue, Method},
};
use farewell_axum::DeleteAccount;
use farewell_core::{PasswordHasher, SessionStore, UserStore, ViewRenderer};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// Service exposing the account deletion routes
pub struct DeleteAccountService {
    router: Router,
}

impl DeleteAccountService {
    /// Create the service from configured deletion routes
    ///
    /// # Arguments
    /// * `delete_account` - Route builder carrying configuration, stores, hasher, views
    ///   and observers
    pub fn new<U, H, S, V>(delete_account: DeleteAccount<U, H, S, V>) -> Self
    where
        U: UserStore + 'static,
        H: PasswordHasher + 'static,
        S: SessionStore + Clone + 'static,
        V: ViewRenderer + 'static,
    {
        Self {
            router: delete_account.router(),
        }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - CORS origins allowed to call the routes with credentials;
    ///   empty leaves CORS handling out. Values that are not valid header values are
    ///   skipped.
    pub fn as_nested_router(mut self, allowed_origins: &[String]) -> Router {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        if !origins.is_empty() {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::list(origins));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    /// * `allowed_origins` - CORS origins, see `as_nested_router`
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Vec<String>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(&allowed_origins);

        tracing::info!("Account deletion service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
