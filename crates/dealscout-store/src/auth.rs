//! OAuth2 service-account flow: sign an RS256 JWT assertion with the key's
//! private key and exchange it at the key's `token_uri` for a bearer token.
//!
//! The job commits one batch per run, so tokens are fetched per commit and
//! not cached.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::credentials::ServiceAccountKey;
use crate::error::StoreError;

/// Scope granting Firestore document access.
const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime. Google rejects anything over an hour.
const ASSERTION_TTL_SECS: i64 = 3600;

#[derive(Serialize)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Obtains a bearer token for the given service account.
///
/// # Errors
///
/// - [`StoreError::Jwt`] — the private key is not a usable RSA PEM, or
///   signing failed.
/// - [`StoreError::Http`] — transport failure reaching the token endpoint.
/// - [`StoreError::TokenExchange`] — the endpoint rejected the assertion.
/// - [`StoreError::Deserialize`] — the endpoint returned a 2xx body that is
///   not a token document.
pub(crate) async fn fetch_access_token(
    http: &reqwest::Client,
    key: &ServiceAccountKey,
) -> Result<String, StoreError> {
    let assertion = sign_assertion(key)?;

    let response = http
        .post(&key.token_uri)
        .form(&[
            ("grant_type", JWT_BEARER_GRANT),
            ("assertion", assertion.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(StoreError::TokenExchange {
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|source| StoreError::Deserialize {
            context: format!("token response from {}", key.token_uri),
            source,
        })?;
    Ok(token.access_token)
}

fn sign_assertion(key: &ServiceAccountKey) -> Result<String, StoreError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        iss: key.client_email.clone(),
        scope: DATASTORE_SCOPE.to_string(),
        aud: key.token_uri.clone(),
        iat: now,
        exp: now + ASSERTION_TTL_SECS,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(key.private_key_id.clone());

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(jsonwebtoken::encode(&header, &claims, &encoding_key)?)
}
