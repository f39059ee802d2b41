mod auth;
mod client;
mod credentials;
mod encode;
mod error;

pub use client::FirestoreClient;
pub use credentials::{resolve_service_account, resolve_service_account_from_env, ServiceAccountKey};
pub use error::StoreError;
