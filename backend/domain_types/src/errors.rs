/// Errors raised while building requests for, or interpreting responses from, a connector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectorError {
    #[error("Failed to obtain authentication type")]
    FailedToObtainAuthType,
    #[error("Missing connector configuration: {field_name}")]
    ConfigurationError { field_name: &'static str },
    #[error("Callback hash does not match the expected value")]
    SignatureMismatch,
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Invalid card details: {message}")]
    InvalidCardDetails { message: &'static str },
    #[error("Invalid amount: {field_name} must not be negative")]
    InvalidAmount { field_name: &'static str },
    #[error("Invalid transaction reference, expected `<order id>::<transaction date>`")]
    InvalidTransactionReference,
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Failed to compute the request signature")]
    SignatureComputationFailed,
}

impl ConnectorError {
    /// Errors caused by the merchant's own setup rather than by the caller's input.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::FailedToObtainAuthType | Self::ConfigurationError { .. }
        )
    }
}
