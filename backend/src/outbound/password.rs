//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Hashing is CPU-bound, so both operations run on tokio's blocking pool.

use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Argon2id hasher producing PHC strings.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use explicit cost parameters for new hashes. Verification always uses
    /// the parameters recorded in the stored hash.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

fn hash_blocking(password: &[u8], params: Params) -> Result<PasswordHash, PasswordHasherError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2PasswordHasher::argon2(params)
        .hash_password(password, &salt)
        .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
    Ok(PasswordHash::new(hash.to_string()))
}

fn verify_blocking(password: &[u8], stored: &str) -> Result<bool, PasswordHasherError> {
    let parsed =
        PhcHash::new(stored).map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password, &parsed)
        .is_ok())
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let password = Zeroizing::new(password.as_bytes().to_vec());
        let params = self.params.clone();
        tokio::task::spawn_blocking(move || hash_blocking(&password, params))
            .await
            .map_err(|err| PasswordHasherError::hashing(format!("hashing task failed: {err}")))?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = Zeroizing::new(password.as_bytes().to_vec());
        let stored = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&password, &stored))
            .await
            .map_err(|err| PasswordHasherError::hashing(format!("verify task failed: {err}")))?
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        // Minimal cost keeps the suite fast.
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("valid params");
        Argon2PasswordHasher::with_params(params)
    }

    #[rstest]
    #[tokio::test]
    async fn hash_verifies_original_password_only(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("secret1").await.expect("hash succeeds");

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("secret1", &hash).await.expect("verify"));
        assert!(!hasher.verify("secret2", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn hashes_are_salted(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("secret1").await.expect("hash succeeds");
        let second = hasher.hash("secret1").await.expect("hash succeeds");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_is_an_error(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("secret1", &PasswordHash::new("not-a-phc-string"))
            .await
            .expect_err("malformed hash");
        assert!(matches!(err, PasswordHasherError::MalformedHash { .. }));
    }
}
