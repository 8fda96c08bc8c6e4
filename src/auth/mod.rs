pub mod claims;
pub mod service;
pub mod store;

pub use claims::{Claims, TokenCodec, TokenRejection};
pub use service::{hash_password, AuthError, AuthService, DEFAULT_BCRYPT_COST};
pub use store::{CredentialStore, PgCredentialStore, StoreError};
