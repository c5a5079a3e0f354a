use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Provider API key is not configured")]
    ConfigurationMissing,

    #[error("Provider rejected the charge with status {status}")]
    ProviderRejected { status: u16, body: String },

    #[error("Incomplete provider response: {0}")]
    IncompleteProviderResponse(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            GatewayError::ProviderRejected { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::ConfigurationMissing
            | GatewayError::IncompleteProviderResponse(_)
            | GatewayError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::InvalidAmount(_) => "INVALID_AMOUNT",
            GatewayError::ConfigurationMissing => "CONFIGURATION_MISSING",
            GatewayError::ProviderRejected { .. } => "PROVIDER_REJECTED",
            GatewayError::IncompleteProviderResponse(_) => "INCOMPLETE_PROVIDER_RESPONSE",
            GatewayError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to the front-end.
    pub fn public_message(&self) -> &'static str {
        match self {
            GatewayError::InvalidAmount(_) => "Valor inválido recebido.",
            GatewayError::ConfigurationMissing => {
                "Erro: A chave de API da PushinPay não foi configurada."
            }
            GatewayError::ProviderRejected { .. } => "Erro ao processar o PIX na PushinPay.",
            GatewayError::IncompleteProviderResponse(_) => {
                "A PushinPay retornou uma resposta incompleta."
            }
            GatewayError::InternalError(_) => "Erro interno do servidor.",
        }
    }

    /// Raw diagnostic detail, when there is any worth surfacing.
    pub fn details(&self) -> Option<String> {
        match self {
            GatewayError::ProviderRejected { body, .. } => Some(body.clone()),
            GatewayError::IncompleteProviderResponse(reason) => Some(reason.clone()),
            GatewayError::InternalError(message) => Some(message.clone()),
            GatewayError::InvalidAmount(_) | GatewayError::ConfigurationMissing => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    pub error_code: String,
    pub request_id: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        let body = ErrorResponse {
            message: self.public_message().to_string(),
            details: self.details(),
            error_code: error_code.to_string(),
            request_id: Uuid::new_v4().to_string(),
        };

        if status.is_client_error() {
            tracing::warn!(
                error = %self,
                error_code = error_code,
                request_id = %body.request_id,
                "Request rejected"
            );
        } else {
            tracing::error!(
                error = ?self,
                error_code = error_code,
                request_id = %body.request_id,
                "Request failed"
            );
        }

        (status, Json(body)).into_response()
    }
}
