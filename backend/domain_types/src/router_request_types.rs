use common_enums::Currency;
use serde::Deserialize;

use crate::{payment_method_data::Card, utils::Error};

/// A purchase as submitted by the merchant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurchaseRequestData {
    /// amount in the currency's minor unit
    pub minor_amount: Option<i64>,
    pub currency: Option<Currency>,
    /// merchant order id, sent as `oid`
    pub transaction_id: Option<String>,
    pub return_url: Option<String>,
    pub notification_url: Option<String>,
    pub customer_id: Option<String>,
    /// id of a card stored on the provider side
    pub hosted_data_id: Option<String>,
    pub payment_method: Option<String>,
    pub tax_refund_indicator: Option<String>,
    pub card: Option<Card>,
}

impl PurchaseRequestData {
    pub fn get_minor_amount(&self) -> Result<u64, Error> {
        crate::utils::non_negative_amount(self.minor_amount, "amount")
    }

    pub fn get_currency(&self) -> Result<Currency, Error> {
        self.currency
            .ok_or_else(crate::utils::missing_field_err("currency"))
    }

    pub fn get_transaction_id(&self) -> Result<&str, Error> {
        crate::utils::non_empty(self.transaction_id.as_deref())
            .ok_or_else(crate::utils::missing_field_err("transaction_id"))
    }

    pub fn get_hosted_data_id(&self) -> Result<&str, Error> {
        crate::utils::non_empty(self.hosted_data_id.as_deref())
            .ok_or_else(crate::utils::missing_field_err("hosted_data_id"))
    }

    pub fn get_card(&self) -> Result<&Card, Error> {
        self.card
            .as_ref()
            .ok_or_else(crate::utils::missing_field_err("card"))
    }
}

/// Refund of an earlier webservice purchase.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefundRequestData {
    pub minor_amount: Option<i64>,
    pub currency: Option<Currency>,
    /// `<order id>::<transaction date>` as returned by the purchase
    pub transaction_reference: Option<String>,
}

impl RefundRequestData {
    pub fn get_minor_amount(&self) -> Result<u64, Error> {
        crate::utils::non_negative_amount(self.minor_amount, "amount")
    }

    pub fn get_currency(&self) -> Result<Currency, Error> {
        self.currency
            .ok_or_else(crate::utils::missing_field_err("currency"))
    }

    pub fn get_transaction_reference(&self) -> Result<&str, Error> {
        crate::utils::non_empty(self.transaction_reference.as_deref())
            .ok_or_else(crate::utils::missing_field_err("transaction_reference"))
    }
}
