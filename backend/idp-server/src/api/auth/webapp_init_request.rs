use serde::Deserialize;

/// Body of `POST /auth/webapp-init`.
#[derive(Debug, Deserialize)]
pub struct WebAppInitRequest {
    /// Raw init payload as handed to the mini-application, JSON or form-encoded
    #[serde(rename = "initData")]
    pub init_data: String,
}
