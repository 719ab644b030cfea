use hyperswitch_masking::Secret;
use serde::Serialize;

pub const IPGAPI_NAMESPACE: &str = "http://ipg-online.com/ipgapi/schemas/ipgapi";
pub const V1_NAMESPACE: &str = "http://ipg-online.com/ipgapi/schemas/v1";

#[derive(Debug, Serialize)]
#[serde(rename = "ipgapi:IPGApiOrderRequest")]
pub struct IpgApiOrderRequest {
    #[serde(rename = "@xmlns:v1")]
    pub xmlns_v1: &'static str,
    #[serde(rename = "@xmlns:ipgapi")]
    pub xmlns_ipgapi: &'static str,
    #[serde(rename = "v1:Transaction")]
    pub transaction: IpgApiTransaction,
}

impl IpgApiOrderRequest {
    pub fn new(transaction: IpgApiTransaction) -> Self {
        Self {
            xmlns_v1: V1_NAMESPACE,
            xmlns_ipgapi: IPGAPI_NAMESPACE,
            transaction,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IpgApiTransaction {
    #[serde(rename = "v1:CreditCardTxType")]
    pub credit_card_tx_type: IpgApiCreditCardTxType,
    #[serde(rename = "v1:CreditCardData", skip_serializing_if = "Option::is_none")]
    pub credit_card_data: Option<IpgApiCreditCardData>,
    #[serde(rename = "v1:Payment")]
    pub payment: IpgApiPayment,
    #[serde(rename = "v1:TransactionDetails")]
    pub transaction_details: IpgApiTransactionDetails,
}

#[derive(Debug, Serialize)]
pub struct IpgApiCreditCardTxType {
    #[serde(rename = "v1:StoreId")]
    pub store_id: String,
    #[serde(rename = "v1:Type")]
    pub tx_type: IpgApiTransactionType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IpgApiTransactionType {
    Sale,
    Return,
}

#[derive(Debug, Serialize)]
pub struct IpgApiCreditCardData {
    #[serde(rename = "v1:CardCodeValue")]
    pub card_code_value: Secret<String>,
}

#[derive(Debug, Serialize)]
pub struct IpgApiPayment {
    #[serde(rename = "v1:HostedDataID", skip_serializing_if = "Option::is_none")]
    pub hosted_data_id: Option<String>,
    #[serde(rename = "v1:ChargeTotal")]
    pub charge_total: String,
    #[serde(rename = "v1:Currency")]
    pub currency: String,
}

#[derive(Debug, Serialize)]
pub struct IpgApiTransactionDetails {
    #[serde(rename = "v1:OrderId")]
    pub order_id: String,
    #[serde(rename = "v1:TDate", skip_serializing_if = "Option::is_none")]
    pub tdate: Option<String>,
}
