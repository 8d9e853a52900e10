pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{login, me, register, webapp_init},
        login_request::LoginRequest,
        register_request::RegisterRequest,
        user_response::UserResponse,
        webapp_init_request::WebAppInitRequest,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::bearer_token::BearerToken,
};
pub use error::{Result as ServerResult, ServerError};
pub use routes::build_router;
pub use state::AppState;
