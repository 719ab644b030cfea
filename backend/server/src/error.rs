use axum::http::StatusCode;
use domain_types::errors::ConnectorError;

use crate::{http::error::HttpError, logger};

/// Allow [error_stack::Report] contexts to be escalated into another error type
/// without consuming the source error.
pub trait ErrorSwitch<T> {
    /// Get the next error type that the source error can be escalated into
    fn switch(&self) -> T;
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid host for socket: {0}")]
    AddressError(#[from] std::net::AddrParseError),
    #[error("Unable to load configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ErrorSwitch<HttpError> for ConnectorError {
    fn switch(&self) -> HttpError {
        let status = match self {
            Self::SignatureMismatch
            | Self::MissingRequiredField { .. }
            | Self::InvalidCardDetails { .. }
            | Self::InvalidAmount { .. }
            | Self::InvalidTransactionReference => StatusCode::BAD_REQUEST,
            Self::ResponseDeserializationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            Self::FailedToObtainAuthType
            | Self::ConfigurationError { .. }
            | Self::RequestEncodingFailed
            | Self::SignatureComputationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        };

        HttpError {
            status,
            message: self.to_string(),
        }
    }
}

pub trait IntoHttpError {
    fn into_http_error(self) -> HttpError;
}

pub trait ResultExtHttp<T> {
    fn into_http_error(self) -> Result<T, HttpError>;
}

impl<T, E> ResultExtHttp<T> for error_stack::Result<T, E>
where
    error_stack::Report<E>: IntoHttpError,
{
    fn into_http_error(self) -> Result<T, HttpError> {
        self.map_err(IntoHttpError::into_http_error)
    }
}

impl IntoHttpError for error_stack::Report<ConnectorError> {
    fn into_http_error(self) -> HttpError {
        let context = self.current_context();
        if context.is_configuration_error() {
            logger::error!(error = ?self, "merchant store is misconfigured");
        } else {
            logger::warn!(error = ?self);
        }
        // only the context's message reaches the caller, attachments stay in the logs
        context.switch()
    }
}
