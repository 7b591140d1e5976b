mod credentials;
mod token_provider;

pub use credentials::{CredentialsError, ServiceAccountKey};
pub use token_provider::{GcpTokenProvider, TokenError};
