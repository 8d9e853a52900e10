pub mod error;
pub mod init_data;
pub mod models;
pub mod username_policy;

pub use error::{CoreError, Result};
pub use init_data::{InitPayload, extract_identity, identity_from_raw};
pub use models::external_identity::ExternalIdentity;
pub use models::user::{NewUser, User};
pub use username_policy::UsernamePolicy;

#[cfg(test)]
mod tests;
