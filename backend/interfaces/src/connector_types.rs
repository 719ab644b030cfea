use common_utils::CustomResult;
use domain_types::{
    errors,
    router_data::{ConnectorAuthType, RouterData},
};

use crate::api::ConnectorCommon;

/// One way of talking to the provider for the request type `Req`.
///
/// A variant turns a request into a provider payload, optionally signs it,
/// wraps it into whatever the caller has to send, and reads back what the
/// provider answered. Variants are chosen explicitly by the caller.
pub trait GatewayVariant<Req>: ConnectorCommon {
    /// Provider payload before it is signed or encoded.
    type Payload;
    /// What the caller sends (or redirects the customer with).
    type Output;
    /// Raw provider answer.
    type RawResponse: ?Sized;
    /// Interpreted provider answer.
    type Response;

    fn build_payload(
        &self,
        router_data: &RouterData<'_, Req>,
    ) -> CustomResult<Self::Payload, errors::ConnectorError>;

    /// Signature over `payload`, `None` for variants that authenticate at the
    /// transport level instead.
    fn compute_signature(
        &self,
        auth_type: &ConnectorAuthType,
        payload: &Self::Payload,
    ) -> CustomResult<Option<String>, errors::ConnectorError>;

    fn build_request(
        &self,
        router_data: &RouterData<'_, Req>,
    ) -> CustomResult<Self::Output, errors::ConnectorError>;

    fn interpret_response(
        &self,
        auth_type: &ConnectorAuthType,
        response: &Self::RawResponse,
    ) -> CustomResult<Self::Response, errors::ConnectorError>;
}
