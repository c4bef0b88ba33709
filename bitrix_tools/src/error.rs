use thiserror::Error;

#[derive(Debug, Error)]
pub enum BitrixApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Method {method} failed with HTTP status {status}. {message}")]
    QueryError { method: String, status: u16, message: String },
    #[error("Method {method} returned error {code}. {description}")]
    MethodError { method: String, code: String, description: String },
    #[error("Method {0} returned an empty result")]
    EmptyResult(String),
}
