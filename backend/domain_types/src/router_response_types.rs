use std::collections::BTreeMap;

use common_enums::TransactionStatus;
use common_utils::request::Method;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RedirectForm {
    Form {
        endpoint: String,
        method: Method,
        form_fields: BTreeMap<String, String>,
    },
}

impl RedirectForm {
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Form { endpoint, .. } => endpoint,
        }
    }

    pub fn form_fields(&self) -> &BTreeMap<String, String> {
        match self {
            Self::Form { form_fields, .. } => form_fields,
        }
    }
}

/// Result of building a hosted checkout purchase. The payment itself only
/// happens once the customer's browser posts the form.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseRedirectResponse {
    pub redirection_data: RedirectForm,
    pub is_redirect: bool,
    pub is_successful: bool,
}

impl PurchaseRedirectResponse {
    pub fn new(redirection_data: RedirectForm) -> Self {
        Self {
            redirection_data,
            is_redirect: true,
            is_successful: false,
        }
    }
}

/// A callback whose hash has been verified.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationDetails {
    pub status: TransactionStatus,
    pub is_successful: bool,
    /// 200 on success, 400 otherwise
    pub code: u16,
    /// merchant order id (`oid`)
    pub transaction_id: Option<String>,
    /// provider reference (`refnumber`)
    pub transaction_reference: Option<String>,
    /// raw `status` value
    pub message: Option<String>,
    pub approval_code: Option<String>,
    pub fields: BTreeMap<String, String>,
}

/// Outcome of a webservice order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebserviceResponseData {
    pub status: TransactionStatus,
    pub is_successful: bool,
    pub transaction_result: Option<String>,
    pub approval_code: Option<String>,
    pub order_id: Option<String>,
    pub tdate: Option<String>,
    /// `<order id>::<transaction date>`, usable for a later refund
    pub transaction_reference: Option<String>,
    pub message: Option<String>,
}
