//! Password hashing and bearer-token issuance/verification.
//!
//! Passwords are hashed with Argon2 in PHC string format; plaintext is never
//! persisted. Tokens are HS256 JWTs whose claims carry exactly the principal
//! identity (`userId`, `username`). No expiry claim is set and none is
//! enforced; a token is valid iff it verifies against the server secret.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

// ---

/// Claims embedded in every token the server issues. This is also the
/// `user` object returned by sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i64,
    pub username: String,
}

/// The authenticated identity attached to a request after token
/// verification, available to protected handlers as an extension.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Principal {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

// ---

/// Signs and verifies bearer tokens with a server-held secret.
///
/// Cheaply cloneable; lives in the application state.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenSigner {
    // ---
    pub fn new(secret: &str) -> Self {
        // ---
        TokenSigner {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a signed token for the given claims.
    pub fn sign(&self, claims: &Claims) -> Result<String> {
        // ---
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| anyhow!("failed to sign token: {e}"))
    }

    /// Verify a token's signature and decode its claims.
    ///
    /// Tokens carry no `exp` claim, so expiry validation is disabled.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        // ---
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| anyhow!("invalid token: {e}"))?;
        Ok(data.claims)
    }
}

// ---

/// One-way hash a password for storage.
pub fn hash_password(password: &str) -> Result<String> {
    // ---
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("failed to hash password: {e}"))
}

/// Check a candidate password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    // ---
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow!("malformed password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn signer() -> TokenSigner {
        // ---
        TokenSigner::new("test-secret")
    }

    #[test]
    fn token_round_trip() {
        // ---
        let claims = Claims {
            user_id: 42,
            username: "alice".to_string(),
        };

        let token = signer().sign(&claims).expect("sign failed");
        let decoded = signer().verify(&token).expect("verify failed");

        assert_eq!(decoded, claims);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        // ---
        let claims = Claims {
            user_id: 1,
            username: "mallory".to_string(),
        };

        let token = TokenSigner::new("other-secret")
            .sign(&claims)
            .expect("sign failed");

        assert!(signer().verify(&token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        // ---
        let claims = Claims {
            user_id: 7,
            username: "bob".to_string(),
        };

        let mut token = signer().sign(&claims).expect("sign failed");
        token.pop();
        token.push('A');

        assert!(signer().verify(&token).is_err());
    }

    #[test]
    fn password_hash_verifies() {
        // ---
        let hash = hash_password("pw1").expect("hash failed");

        assert_ne!(hash, "pw1");
        assert!(verify_password("pw1", &hash).expect("verify failed"));
        assert!(!verify_password("wrong", &hash).expect("verify failed"));
    }

    #[test]
    fn distinct_hashes_for_same_password() {
        // ---
        // Salted hashing must not be deterministic.
        let a = hash_password("pw1").unwrap();
        let b = hash_password("pw1").unwrap();
        assert_ne!(a, b);
    }
}
