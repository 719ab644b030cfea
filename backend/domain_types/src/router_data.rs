use hyperswitch_masking::Secret;
use time::PrimitiveDateTime;

use crate::types::{Connectors, MerchantConnectorAccount};

/// Credentials provisioned for a store.
///
/// `store_id` is echoed into signed payloads as `storename`; `shared_secret` is
/// only ever used as the HMAC key.
#[derive(Default, Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(tag = "auth_type")]
pub enum ConnectorAuthType {
    SignatureKey {
        store_id: String,
        shared_secret: Secret<String>,
    },
    /// Hosted checkout credentials plus the client certificate and basic-auth
    /// user issued for the webservice API.
    SignatureKeyWithCertificate {
        store_id: String,
        shared_secret: Secret<String>,
        user_name: Secret<String>,
        password: Secret<String>,
        certificate: Secret<String>,
        certificate_key: Secret<String>,
    },
    #[default]
    NoKey,
}

/// Everything a connector needs to turn one request into provider payloads.
#[derive(Debug, Clone)]
pub struct RouterData<'a, Req> {
    pub request: Req,
    pub merchant_account: &'a MerchantConnectorAccount,
    pub connectors: &'a Connectors,
    /// Point in time the request is issued at, in the merchant's clock.
    pub timestamp: PrimitiveDateTime,
}

impl<'a, Req> RouterData<'a, Req> {
    pub fn new(
        request: Req,
        merchant_account: &'a MerchantConnectorAccount,
        connectors: &'a Connectors,
    ) -> Self {
        Self {
            request,
            merchant_account,
            connectors,
            timestamp: common_utils::date_time::now_with_offset(i32::from(
                merchant_account.utc_offset_minutes,
            ) * 60),
        }
    }

    pub fn with_timestamp(mut self, timestamp: PrimitiveDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }
}
