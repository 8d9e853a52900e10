pub mod auth;
pub mod login_request;
pub mod register_request;
pub mod user_response;
pub mod webapp_init_request;
