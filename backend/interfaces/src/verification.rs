use common_utils::{crypto, CustomResult};
use domain_types::{errors, router_data::ConnectorAuthType};
use error_stack::ResultExt;

/// Core trait for source verification of inbound callbacks
pub trait SourceVerification {
    /// Callback payload as received
    type Payload: ?Sized;

    /// Key material used to verify the callback
    fn get_secrets(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<u8>, errors::ConnectorError>;

    /// Get the verification algorithm being used
    fn get_algorithm(
        &self,
    ) -> CustomResult<Box<dyn crypto::VerifySignature + Send>, errors::ConnectorError> {
        Ok(Box::new(crypto::NoAlgorithm))
    }

    /// Get the signature/hash value from the payload for verification
    fn get_signature(
        &self,
        payload: &Self::Payload,
    ) -> CustomResult<Vec<u8>, errors::ConnectorError>;

    /// Get the message/payload that should be verified
    fn get_message(
        &self,
        payload: &Self::Payload,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<u8>, errors::ConnectorError>;

    /// Perform the verification
    fn verify(
        &self,
        auth_type: &ConnectorAuthType,
        payload: &Self::Payload,
    ) -> CustomResult<bool, errors::ConnectorError> {
        let algorithm = self.get_algorithm()?;
        let extracted_secrets = self.get_secrets(auth_type)?;
        let signature = self.get_signature(payload)?;
        let message = self.get_message(payload, auth_type)?;

        // Verify the signature against the message
        algorithm
            .verify_signature(&extracted_secrets, &signature, &message)
            .change_context(errors::ConnectorError::SignatureComputationFailed)
    }
}
