use common_utils::CustomResult;
use domain_types::{
    errors,
    router_data::ConnectorAuthType,
    types::{Connectors, MerchantConnectorAccount},
};
use hyperswitch_masking::Maskable;

pub trait ConnectorCommon {
    /// Name of the connector (in lowercase).
    fn id(&self) -> &'static str;

    /// HTTP header used for authorization.
    fn get_auth_header(
        &self,
        _auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        Ok(Vec::new())
    }

    /// HTTP `Content-Type` to be used for POST requests.
    /// Defaults to `application/json`.
    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    /// The base URL for interacting with the connector's API, for the
    /// profile and mode the merchant account is provisioned on.
    fn base_url<'a>(
        &self,
        connectors: &'a Connectors,
        merchant_account: &MerchantConnectorAccount,
    ) -> &'a str;
}
