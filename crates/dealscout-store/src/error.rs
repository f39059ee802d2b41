use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(
        "no usable store credentials: set FIREBASE_SERVICE_ACCOUNT or the discrete \
         PROJECT_ID/PRIVATE_KEY_ID/PRIVATE_KEY/CLIENT_EMAIL/CLIENT_ID/CLIENT_CERT_URL variables"
    )]
    CredentialsMissing,

    #[error("incomplete discrete credentials: missing {var}")]
    CredentialsIncomplete { var: String },

    #[error("FIREBASE_SERVICE_ACCOUNT is not a valid service-account key document: {0}")]
    CredentialsParse(#[source] serde_json::Error),

    #[error("failed to sign service-account assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token exchange rejected with status {status}: {body}")]
    TokenExchange { status: u16, body: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
