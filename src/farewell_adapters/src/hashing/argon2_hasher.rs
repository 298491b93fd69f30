use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use farewell_core::{HashError, Password, PasswordHasher};
use rand::RngCore;
use secrecy::{ExposeSecret, Secret};

const DEFAULT_MEMORY_COST: u32 = 15000;
const DEFAULT_ITERATIONS: u32 = 2;
const DEFAULT_PARALLELISM: u32 = 1;
const DERIVED_KEY_LEN: usize = 32;
const SALT_LEN: usize = 16;

/// Argon2id key derivation producing hex-encoded keys.
///
/// The record's `iterations` is used as the argon2 time cost for that one call;
/// the hasher itself holds no per-record state.
#[derive(Debug, Clone, Copy)]
pub struct Argon2Hasher {
    memory_cost: u32,
    default_iterations: u32,
    parallelism: u32,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            memory_cost: DEFAULT_MEMORY_COST,
            default_iterations: DEFAULT_ITERATIONS,
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

impl Argon2Hasher {
    pub fn new(memory_cost: u32, default_iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            default_iterations,
            parallelism,
        }
    }

    /// A random hex salt for new records.
    pub fn generate_salt() -> String {
        let mut salt = [0u8; SALT_LEN];
        rand::rng().fill_bytes(&mut salt);
        hex::encode(salt)
    }

    fn derive(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
    ) -> Result<Secret<String>, HashError> {
        let params = Params::new(
            self.memory_cost,
            iterations,
            self.parallelism,
            Some(DERIVED_KEY_LEN),
        )
        .map_err(|e| HashError::InvalidParameters(e.to_string()))?;

        let mut output = [0u8; DERIVED_KEY_LEN];
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password_into(password, salt, &mut output)
            .map_err(|e| HashError::InvalidParameters(e.to_string()))?;

        Ok(Secret::new(hex::encode(output)))
    }
}

#[async_trait]
impl PasswordHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing password hash", skip_all, fields(work_factor))]
    async fn hash(
        &self,
        password: &Password,
        salt: &str,
        work_factor: Option<u32>,
    ) -> Result<Secret<String>, HashError> {
        let iterations = work_factor.unwrap_or(self.default_iterations);
        tracing::Span::current().record("work_factor", iterations);

        let hasher = *self;
        let password = password.as_ref().expose_secret().clone();
        let salt = salt.to_string();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| hasher.derive(password.as_bytes(), salt.as_bytes(), iterations))
        })
        .await
        .map_err(|e| HashError::UnexpectedError(e.to_string()))?
    }
}
