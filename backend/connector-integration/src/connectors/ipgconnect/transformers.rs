use base64::Engine;
use common_enums::{Currency, TransactionStatus};
use common_utils::{consts::BASE64_ENGINE, date_time};
use domain_types::{
    errors,
    router_data::{ConnectorAuthType, RouterData},
    router_request_types::{PurchaseRequestData, RefundRequestData},
    router_response_types::{NotificationDetails, WebserviceResponseData},
    utils::non_empty,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{ExposeInterface, Mask, Maskable, PeekInterface, Secret};

use super::{
    requests::{
        IpgApiCreditCardData, IpgApiCreditCardTxType, IpgApiOrderRequest, IpgApiPayment,
        IpgApiTransaction, IpgApiTransactionDetails, IpgApiTransactionType,
    },
    responses::IpgApiOrderResponse,
    signature::FieldMap,
};

type Error = error_stack::Report<errors::ConnectorError>;

pub const HASH_ALGORITHM: &str = "HMACSHA256";
pub const HASH_EXTENDED: &str = "hashExtended";
const TRANSACTION_REFERENCE_SEPARATOR: &str = "::";

// ===== AUTHENTICATION STRUCTURE =====

#[derive(Debug, Clone)]
pub struct IpgConnectAuthType {
    pub store_id: String,
    pub shared_secret: Secret<String>,
    pub webservice: Option<WebserviceCredentials>,
}

/// Basic-auth user and client certificate issued for the webservice API.
#[derive(Debug, Clone)]
pub struct WebserviceCredentials {
    pub user_name: Secret<String>,
    pub password: Secret<String>,
    pub certificate: Secret<String>,
    pub certificate_key: Secret<String>,
}

impl WebserviceCredentials {
    pub fn basic_auth_header(&self) -> Maskable<String> {
        format!(
            "Basic {}",
            BASE64_ENGINE.encode(format!(
                "{}:{}",
                self.user_name.peek(),
                self.password.peek()
            ))
        )
        .into_masked()
    }
}

impl IpgConnectAuthType {
    pub fn get_store_id(&self) -> Result<&str, Error> {
        non_empty(Some(self.store_id.as_str())).ok_or_else(|| {
            report!(errors::ConnectorError::ConfigurationError {
                field_name: "store_id"
            })
        })
    }

    /// HMAC key for every hash exchanged with the gateway.
    pub fn get_signing_key(&self) -> Result<&[u8], Error> {
        let secret = self.shared_secret.peek();
        if secret.is_empty() {
            return Err(report!(errors::ConnectorError::ConfigurationError {
                field_name: "shared_secret"
            }));
        }
        Ok(secret.as_bytes())
    }

    pub fn get_webservice_credentials(&self) -> Result<&WebserviceCredentials, Error> {
        self.webservice.as_ref().ok_or_else(|| {
            report!(errors::ConnectorError::ConfigurationError {
                field_name: "webservice credentials"
            })
        })
    }
}

impl TryFrom<&ConnectorAuthType> for IpgConnectAuthType {
    type Error = Error;

    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::SignatureKey {
                store_id,
                shared_secret,
            } => Ok(Self {
                store_id: store_id.to_owned(),
                shared_secret: shared_secret.to_owned(),
                webservice: None,
            }),
            ConnectorAuthType::SignatureKeyWithCertificate {
                store_id,
                shared_secret,
                user_name,
                password,
                certificate,
                certificate_key,
            } => Ok(Self {
                store_id: store_id.to_owned(),
                shared_secret: shared_secret.to_owned(),
                webservice: Some(WebserviceCredentials {
                    user_name: user_name.to_owned(),
                    password: password.to_owned(),
                    certificate: certificate.to_owned(),
                    certificate_key: certificate_key.to_owned(),
                }),
            }),
            ConnectorAuthType::NoKey => {
                Err(report!(errors::ConnectorError::FailedToObtainAuthType))
            }
        }
    }
}

// ===== AMOUNT / CURRENCY =====

/// Amount as the gateway expects it, e.g. `13.00`.
pub fn get_charge_total(minor_amount: u64, currency: Currency) -> String {
    currency.to_currency_base_unit(minor_amount)
}

/// ISO 4217 numeric code, zero padded to three digits.
pub fn get_currency_numeric(currency: Currency) -> String {
    format!("{:0>3}", currency.iso_4217())
}

// ===== HOSTED PAYMENT PAGE =====

impl TryFrom<(&RouterData<'_, PurchaseRequestData>, &IpgConnectAuthType)> for FieldMap {
    type Error = Error;

    fn try_from(
        (item, auth): (&RouterData<'_, PurchaseRequestData>, &IpgConnectAuthType),
    ) -> Result<Self, Self::Error> {
        let request = &item.request;
        let minor_amount = request.get_minor_amount()?;
        let currency = request.get_currency()?;
        let card = request.card.as_ref();

        if let Some(card) = card {
            let hosted_data_id = non_empty(request.hosted_data_id.as_deref());
            if hosted_data_id.is_none() || card.has_number() {
                card.validate(item.timestamp.date())?;
            } else if !card.has_cvc() {
                return Err(report!(errors::ConnectorError::InvalidCardDetails {
                    message: "The CVV parameter is required when using hosteddataid",
                }));
            }
        }

        let txn_datetime = date_time::format_ipg_txn_datetime(item.timestamp)
            .change_context(errors::ConnectorError::RequestEncodingFailed)
            .attach_printable("Failed to format txndatetime")?;

        let mut fields = Self::new();
        fields.insert("txntype", "sale");
        fields.insert("timezone", item.merchant_account.timezone.as_str());
        fields.insert("txndatetime", txn_datetime);
        fields.insert("hash_algorithm", HASH_ALGORITHM);
        fields.insert("storename", auth.get_store_id()?);
        fields.insert("mode", "payonly");
        fields.insert("paymentMethod", request.payment_method.clone());
        fields.insert("chargetotal", get_charge_total(minor_amount, currency));
        fields.insert("currency", get_currency_numeric(currency));
        fields.insert("responseSuccessURL", request.return_url.clone());
        fields.insert("responseFailURL", request.return_url.clone());
        fields.insert("oid", request.transaction_id.clone());
        fields.insert("taxRefundIndicator", request.tax_refund_indicator.clone());
        fields.insert("transactionNotificationURL", request.notification_url.clone());
        fields.insert("customerid", request.customer_id.clone());
        fields.insert("hosteddataid", request.hosted_data_id.clone());
        fields.insert("full_bypass", card.is_some());

        if let Some(card) = card {
            fields.insert("cardnumber", card.get_card_number().map(|number| number.expose()));
            fields.insert("cvm", card.card_cvc.clone().map(|cvc| cvc.expose()));
            fields.insert(
                "expmonth",
                card.card_exp_month
                    .as_ref()
                    .map(|_| card.get_card_expiry_month_2_digit())
                    .transpose()?
                    .map(|month| month.expose()),
            );
            fields.insert(
                "expyear",
                card.card_exp_year
                    .as_ref()
                    .map(|_| card.get_expiry_year_2_digit())
                    .transpose()?
                    .map(|year| year.expose()),
            );
        }

        if item
            .connectors
            .ipgconnect
            .get(item.merchant_account.profile)
            .send_language
        {
            fields.insert("language", item.merchant_account.language.as_str());
        }

        Ok(fields)
    }
}

// ===== CALLBACKS =====

pub fn get_transaction_status(status: Option<&str>) -> TransactionStatus {
    match status {
        Some("APPROVED" | "APROBADO") => TransactionStatus::Completed,
        Some("DECLINED" | "RECHAZADO") => TransactionStatus::Failed,
        _ => TransactionStatus::Pending,
    }
}

impl From<FieldMap> for NotificationDetails {
    fn from(fields: FieldMap) -> Self {
        let message = fields.get_text("status").map(str::to_string);
        let status = get_transaction_status(message.as_deref());
        let is_successful = status == TransactionStatus::Completed;
        Self {
            status,
            is_successful,
            code: if is_successful { 200 } else { 400 },
            transaction_id: fields.get_text("oid").map(str::to_string),
            transaction_reference: fields.get_text("refnumber").map(str::to_string),
            message,
            approval_code: fields.get_text("approval_code").map(str::to_string),
            fields: fields.to_text_fields(),
        }
    }
}

// ===== WEBSERVICE =====

/// Splits `<order id>::<transaction date>` as produced by [`get_transaction_reference`].
pub fn split_transaction_reference(reference: &str) -> Result<(&str, &str), Error> {
    reference
        .split_once(TRANSACTION_REFERENCE_SEPARATOR)
        .filter(|(order_id, tdate)| !order_id.is_empty() && !tdate.is_empty())
        .ok_or_else(|| report!(errors::ConnectorError::InvalidTransactionReference))
        .attach_printable_lazy(|| format!("transaction reference `{reference}`"))
}

pub fn get_transaction_reference(order_id: &str, tdate: &str) -> String {
    format!("{order_id}{TRANSACTION_REFERENCE_SEPARATOR}{tdate}")
}

impl TryFrom<(&RouterData<'_, PurchaseRequestData>, &IpgConnectAuthType)> for IpgApiOrderRequest {
    type Error = Error;

    fn try_from(
        (item, auth): (&RouterData<'_, PurchaseRequestData>, &IpgConnectAuthType),
    ) -> Result<Self, Self::Error> {
        let request = &item.request;
        let minor_amount = request.get_minor_amount()?;
        let card = request.get_card()?;
        let order_id = request.get_transaction_id()?;
        let store_id = auth.get_store_id()?;
        let hosted_data_id = request.get_hosted_data_id()?;
        let currency = request.get_currency()?;
        let card_code_value = card
            .card_cvc
            .clone()
            .filter(|cvc| !cvc.peek().is_empty())
            .ok_or(errors::ConnectorError::InvalidCardDetails {
                message: "The CVV parameter is required when using hosteddataid",
            })?;

        Ok(Self::new(IpgApiTransaction {
            credit_card_tx_type: IpgApiCreditCardTxType {
                store_id: store_id.to_string(),
                tx_type: IpgApiTransactionType::Sale,
            },
            credit_card_data: Some(IpgApiCreditCardData { card_code_value }),
            payment: IpgApiPayment {
                hosted_data_id: Some(hosted_data_id.to_string()),
                charge_total: get_charge_total(minor_amount, currency),
                currency: get_currency_numeric(currency),
            },
            transaction_details: IpgApiTransactionDetails {
                order_id: order_id.to_string(),
                tdate: None,
            },
        }))
    }
}

impl TryFrom<(&RouterData<'_, RefundRequestData>, &IpgConnectAuthType)> for IpgApiOrderRequest {
    type Error = Error;

    fn try_from(
        (item, auth): (&RouterData<'_, RefundRequestData>, &IpgConnectAuthType),
    ) -> Result<Self, Self::Error> {
        let request = &item.request;
        let minor_amount = request.get_minor_amount()?;
        let currency = request.get_currency()?;
        let (order_id, tdate) = split_transaction_reference(request.get_transaction_reference()?)?;

        Ok(Self::new(IpgApiTransaction {
            credit_card_tx_type: IpgApiCreditCardTxType {
                store_id: auth.get_store_id()?.to_string(),
                tx_type: IpgApiTransactionType::Return,
            },
            credit_card_data: None,
            payment: IpgApiPayment {
                hosted_data_id: None,
                charge_total: get_charge_total(minor_amount, currency),
                currency: get_currency_numeric(currency),
            },
            transaction_details: IpgApiTransactionDetails {
                order_id: order_id.to_string(),
                tdate: Some(tdate.to_string()),
            },
        }))
    }
}

impl From<IpgApiOrderResponse> for WebserviceResponseData {
    fn from(response: IpgApiOrderResponse) -> Self {
        let status = match response.transaction_result.as_deref() {
            Some("APPROVED") => TransactionStatus::Completed,
            Some("DECLINED" | "FAILED") => TransactionStatus::Failed,
            _ => TransactionStatus::Pending,
        };
        let transaction_reference = response
            .order_id
            .as_deref()
            .zip(response.tdate.as_deref())
            .map(|(order_id, tdate)| get_transaction_reference(order_id, tdate));
        let message = response
            .error_message
            .or(response.processor_response_message);

        Self {
            status,
            is_successful: status == TransactionStatus::Completed,
            transaction_result: response.transaction_result,
            approval_code: response.approval_code,
            order_id: response.order_id,
            tdate: response.tdate,
            transaction_reference,
            message,
        }
    }
}
