//! Utilities for cryptographic algorithms
use error_stack::ResultExt;
use ring::hmac;
use subtle::ConstantTimeEq;

use crate::errors::{self, CustomResult};

/// Trait for cryptographically signing messages
pub trait SignMessage {
    /// Takes in a secret and a message and returns the calculated signature as bytes
    fn sign_message(
        &self,
        _secret: &[u8],
        _msg: &[u8],
    ) -> CustomResult<Vec<u8>, errors::CryptoError>;
}

/// Trait for cryptographically verifying a message against a signature
pub trait VerifySignature {
    /// Takes in a secret, the signature and the message and verifies the message
    /// against the signature
    fn verify_signature(
        &self,
        _secret: &[u8],
        _signature: &[u8],
        _msg: &[u8],
    ) -> CustomResult<bool, errors::CryptoError>;
}

/// Represent no encryption algorithm
#[derive(Debug)]
pub struct NoAlgorithm;

impl SignMessage for NoAlgorithm {
    fn sign_message(
        &self,
        _secret: &[u8],
        _msg: &[u8],
    ) -> CustomResult<Vec<u8>, errors::CryptoError> {
        Ok(Vec::new())
    }
}

impl VerifySignature for NoAlgorithm {
    fn verify_signature(
        &self,
        _secret: &[u8],
        _signature: &[u8],
        _msg: &[u8],
    ) -> CustomResult<bool, errors::CryptoError> {
        Ok(true)
    }
}

/// Represents the HMAC-SHA-256 algorithm
#[derive(Debug)]
pub struct HmacSha256;

impl SignMessage for HmacSha256 {
    fn sign_message(
        &self,
        secret: &[u8],
        msg: &[u8],
    ) -> CustomResult<Vec<u8>, errors::CryptoError> {
        if secret.is_empty() {
            return Err(errors::CryptoError::EmptyKey)
                .attach_printable("HMAC-SHA256 requires a non-empty key");
        }
        let key = hmac::Key::new(hmac::HMAC_SHA256, secret);
        Ok(hmac::sign(&key, msg).as_ref().to_vec())
    }
}

/// HMAC-SHA256 where signatures travel as padded standard base64 text, the way
/// IPG hash fields are transmitted.
#[derive(Debug)]
pub struct HmacSha256Base64;

impl SignMessage for HmacSha256Base64 {
    fn sign_message(
        &self,
        secret: &[u8],
        msg: &[u8],
    ) -> CustomResult<Vec<u8>, errors::CryptoError> {
        hmac_sha256_base64(secret, msg).map(String::into_bytes)
    }
}

impl VerifySignature for HmacSha256Base64 {
    fn verify_signature(
        &self,
        secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, errors::CryptoError> {
        let expected = self.sign_message(secret, msg)?;
        Ok(constant_time_eq(&expected, signature))
    }
}

/// Compares two byte strings without short-circuiting on the first differing byte.
///
/// Lengths are compared first; a length mismatch returns early since signature
/// lengths are public.
pub fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.ct_eq(right).into()
}

/// Signs `msg` with HMAC-SHA256 and returns the digest as padded standard base64.
pub fn hmac_sha256_base64(secret: &[u8], msg: &[u8]) -> CustomResult<String, errors::CryptoError> {
    use base64::Engine;

    let digest = HmacSha256
        .sign_message(secret, msg)
        .change_context(errors::CryptoError::MessageSigningFailed)?;
    Ok(crate::consts::BASE64_ENGINE.encode(digest))
}
