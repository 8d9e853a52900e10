pub mod access_token;
pub mod account_service;
pub mod error;
pub mod reconciler;
pub mod reconciler_config;

pub use access_token::AccessToken;
pub use account_service::AccountService;
pub use error::{AccountError, Result};
pub use reconciler::ImplicitLoginReconciler;
pub use reconciler_config::ReconcilerConfig;
