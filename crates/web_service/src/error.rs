use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid application: {0}")]
    InvalidApplication(#[from] loan_core::PromptError),

    #[error("Invalid contract address '{0}'")]
    InvalidAddress(String),

    #[error("Failed to generate contract: {0}")]
    Generation(#[from] llm_client::LlmError),

    #[error("Failed to compile or deploy contract: {0}")]
    Deployment(#[from] deploy_manager::DeployError),

    #[error("Chain read failed: {0}")]
    Chain(#[from] chain_client::ChainError),
}

#[derive(Serialize)]
struct JsonError {
    message: String,
    r#type: String,
}

#[derive(Serialize)]
struct JsonErrorWrapper {
    error: JsonError,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidApplication(_) | AppError::InvalidAddress(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Chain(_) => StatusCode::BAD_GATEWAY,
            AppError::Generation(_) | AppError::Deployment(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_response = JsonErrorWrapper {
            error: JsonError {
                message: self.to_string(),
                r#type: "api_error".to_string(),
            },
        };
        HttpResponse::build(status_code).json(error_response)
    }
}
