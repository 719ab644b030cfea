#![allow(clippy::unwrap_used, clippy::expect_used)]

use common_enums::{Currency, TransactionStatus};
use common_utils::request::Method;
use domain_types::{
    errors::ConnectorError,
    payment_method_data::Card,
    router_data::{ConnectorAuthType, RouterData},
    router_request_types::{PurchaseRequestData, RefundRequestData},
    types::{
        ConnectorParams, Connectors, EndpointProfile, IpgConnectProfiles,
        MerchantConnectorAccount,
    },
};
use hyperswitch_masking::{PeekInterface, Secret};
use interfaces::connector_types::GatewayVariant;
use time::macros::datetime;

use super::{
    signature::{self, FieldMap, FieldValue, NotificationOrder},
    transformers::{self, IpgConnectAuthType},
    HostedRedirect, Webservice,
};

const STORE_ID: &str = "1120540155";
const SHARED_SECRET: &str = "96MbdNvxTa";

fn connectors() -> Connectors {
    Connectors {
        ipgconnect: IpgConnectProfiles {
            ipg_online: ConnectorParams {
                base_url: "https://www.ipg-online.com".to_string(),
                test_base_url: "https://test.ipg-online.com".to_string(),
                send_language: false,
            },
            ipg_online_www2: ConnectorParams {
                base_url: "https://www2.ipg-online.com".to_string(),
                test_base_url: "https://test.ipg-online.com".to_string(),
                send_language: true,
            },
        },
    }
}

fn signature_key() -> ConnectorAuthType {
    ConnectorAuthType::SignatureKey {
        store_id: STORE_ID.to_string(),
        shared_secret: Secret::new(SHARED_SECRET.to_string()),
    }
}

fn signature_key_with_certificate() -> ConnectorAuthType {
    ConnectorAuthType::SignatureKeyWithCertificate {
        store_id: STORE_ID.to_string(),
        shared_secret: Secret::new(SHARED_SECRET.to_string()),
        user_name: Secret::new("WS1120540155._.1".to_string()),
        password: Secret::new("passWORD".to_string()),
        certificate: Secret::new("WS1120540155._.1.pem".to_string()),
        certificate_key: Secret::new("WS1120540155._.1.key".to_string()),
    }
}

fn auth() -> IpgConnectAuthType {
    IpgConnectAuthType::try_from(&signature_key()).unwrap()
}

fn valid_card() -> Card {
    Card {
        card_number: Some(Secret::new("4111111111111111".to_string())),
        card_exp_month: Some(Secret::new("12".to_string())),
        card_exp_year: Some(Secret::new("2030".to_string())),
        card_cvc: Some(Secret::new("123".to_string())),
    }
}

fn purchase() -> PurchaseRequestData {
    PurchaseRequestData {
        minor_amount: Some(1300),
        currency: Some(Currency::GBP),
        transaction_id: Some("abc123".to_string()),
        return_url: Some("https://www.example.com/return".to_string()),
        customer_id: Some("54321".to_string()),
        card: Some(valid_card()),
        ..Default::default()
    }
}

fn form(fields: &[(&str, &str)]) -> FieldMap {
    fields.iter().map(|(name, value)| (*name, *value)).collect()
}

fn approved_callback() -> FieldMap {
    form(&[
        ("chargetotal", "110.00"),
        ("response_hash", "0nM0t9K6QV3Z+zEaQoVHZuNFPD+FZ/fD0kcdML4Tw3o="),
        ("status", "APROBADO"),
        ("oid", "abc123456"),
        ("txndatetime", "2013:09:27-16:06:26"),
        ("approval_code", "Y:136432:0013649958:PPXM:0015"),
    ])
}

fn declined_callback() -> FieldMap {
    form(&[
        ("chargetotal", "110.00"),
        ("response_hash", "P+j1yR9obVqpTqzWBgU3c50u800rRXTedHs6VSlMR5Y="),
        ("status", "DECLINED"),
        ("oid", "abc1234"),
        ("txndatetime", "2013:09:27-16:00:19"),
        ("approval_code", "N:05:DECLINED"),
    ])
}

// ===== CANONICALIZATION =====

#[test]
fn test_canonicalize_skips_falsy_values() {
    let fields = form(&[("a", "1"), ("b", "0"), ("c", "2")]);
    assert_eq!(signature::canonicalize(&fields, ["a", "b", "c"]), "1|2");

    let empty = form(&[("a", "1"), ("b", ""), ("c", "2")]);
    assert_eq!(signature::canonicalize(&empty, ["a", "b", "c"]), "1|2");

    let absent = form(&[("a", "1"), ("c", "2")]);
    assert_eq!(signature::canonicalize(&absent, ["a", "b", "c"]), "1|2");

    let mut typed = FieldMap::new();
    typed.insert("a", FieldValue::Flag(true));
    typed.insert("b", FieldValue::Flag(false));
    typed.insert("c", FieldValue::Null);
    typed.insert("d", FieldValue::Integer(0));
    typed.insert("e", FieldValue::Integer(42));
    assert_eq!(
        signature::canonicalize(&typed, ["a", "b", "c", "d", "e"]),
        "1|42"
    );
}

#[test]
fn test_form_values_keep_falsy_fields_empty() {
    let mut fields = FieldMap::new();
    fields.insert("full_bypass", false);
    fields.insert("hosteddataid", None::<String>);
    fields.insert("flag", true);
    fields.insert("zero", "0");

    let form_fields = fields.to_form_fields();
    assert_eq!(form_fields["full_bypass"], "");
    assert_eq!(form_fields["hosteddataid"], "");
    assert_eq!(form_fields["flag"], "1");
    assert_eq!(form_fields["zero"], "0");
}

#[test]
fn test_extended_signature_uses_byte_order_of_keys() {
    let fields = form(&[("b", "2"), ("B", "1"), ("a", "3")]);
    let expected = common_utils::crypto::hmac_sha256_base64(SHARED_SECRET.as_bytes(), b"1|3|2")
        .unwrap();
    assert_eq!(
        signature::compute_extended_signature(&fields, &auth()).unwrap(),
        expected
    );
}

#[test]
fn test_extended_signature_is_deterministic() {
    let fields = form(&[("storename", STORE_ID), ("chargetotal", "13.00")]);
    let first = signature::compute_extended_signature(&fields, &auth()).unwrap();
    let second = signature::compute_extended_signature(&fields, &auth()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 44);
}

#[test]
fn test_notification_orders_sign_differently() {
    let fields = form(&[
        ("chargetotal", "110.00"),
        ("currency", "032"),
        ("txndatetime", "2013:09:27-16:06:26"),
        ("approval_code", "Y:136432:0013649958:PPXM:0015"),
    ]);
    let notification =
        signature::compute_notification_signature(&fields, &auth(), NotificationOrder::NotificationHash)
            .unwrap();
    let response =
        signature::compute_notification_signature(&fields, &auth(), NotificationOrder::ResponseHash)
            .unwrap();

    assert_eq!(notification, "vD4y9waficDUIMQEwyhBcZgcZzchAaHGz+LkNw1h6x8=");
    assert_ne!(notification, response);
}

#[test]
fn test_missing_credentials_are_configuration_errors() {
    let no_secret = IpgConnectAuthType::try_from(&ConnectorAuthType::SignatureKey {
        store_id: STORE_ID.to_string(),
        shared_secret: Secret::new(String::new()),
    })
    .unwrap();
    let error = signature::compute_extended_signature(&approved_callback(), &no_secret)
        .unwrap_err();
    assert_eq!(
        error.current_context(),
        &ConnectorError::ConfigurationError {
            field_name: "shared_secret"
        }
    );

    let no_store = IpgConnectAuthType::try_from(&ConnectorAuthType::SignatureKey {
        store_id: String::new(),
        shared_secret: Secret::new(SHARED_SECRET.to_string()),
    })
    .unwrap();
    let error = signature::compute_notification_signature(
        &approved_callback(),
        &no_store,
        NotificationOrder::ResponseHash,
    )
    .unwrap_err();
    assert_eq!(
        error.current_context(),
        &ConnectorError::ConfigurationError {
            field_name: "store_id"
        }
    );

    let error = IpgConnectAuthType::try_from(&ConnectorAuthType::NoKey).unwrap_err();
    assert_eq!(error.current_context(), &ConnectorError::FailedToObtainAuthType);
}

// ===== CALLBACK VERIFICATION =====

#[test]
fn test_verify_approved_callback() {
    let details = HostedRedirect::new()
        .interpret_response(&signature_key(), &approved_callback())
        .unwrap();

    assert_eq!(details.status, TransactionStatus::Completed);
    assert!(details.is_successful);
    assert_eq!(details.code, 200);
    assert_eq!(details.transaction_id.as_deref(), Some("abc123456"));
    assert_eq!(details.message.as_deref(), Some("APROBADO"));
    assert_eq!(details.transaction_reference, None);
    assert_eq!(
        details.approval_code.as_deref(),
        Some("Y:136432:0013649958:PPXM:0015")
    );
}

#[test]
fn test_verify_declined_callback() {
    let details = HostedRedirect::new()
        .interpret_response(&signature_key(), &declined_callback())
        .unwrap();

    assert_eq!(details.status, TransactionStatus::Failed);
    assert!(!details.is_successful);
    assert_eq!(details.code, 400);
    assert_eq!(details.transaction_id.as_deref(), Some("abc1234"));
    assert_eq!(details.message.as_deref(), Some("DECLINED"));
}

#[test]
fn test_tampered_callback_is_rejected() {
    let mut fields = approved_callback();
    fields.insert("chargetotal", "1.00");

    let error = signature::verify_notification(fields, &signature_key()).unwrap_err();
    assert_eq!(error.current_context(), &ConnectorError::SignatureMismatch);
    // the expected hash is only visible to operators reading the report
    assert!(!error
        .current_context()
        .to_string()
        .contains("response_hash"));
    assert!(format!("{error:?}").contains("expected response_hash"));
}

#[test]
fn test_fake_hash_is_rejected() {
    let mut fields = approved_callback();
    fields.insert("response_hash", "FAKE");
    let error = signature::verify_notification(fields, &signature_key()).unwrap_err();
    assert_eq!(error.current_context(), &ConnectorError::SignatureMismatch);
    assert!(format!("{error:?}").contains("0nM0t9K6QV3Z+zEaQoVHZuNFPD+FZ/fD0kcdML4Tw3o="));
}

#[test]
fn test_missing_hash_is_rejected() {
    let mut fields = approved_callback();
    fields.insert("response_hash", "");
    let error = signature::verify_notification(fields, &signature_key()).unwrap_err();
    assert_eq!(error.current_context(), &ConnectorError::SignatureMismatch);

    let fields = form(&[
        ("chargetotal", "110.00"),
        ("txndatetime", "2013:09:27-16:06:26"),
        ("approval_code", "Y:136432:0013649958:PPXM:0015"),
    ]);
    assert!(signature::verify_notification(fields, &signature_key()).is_err());
}

#[test]
fn test_storename_comes_from_configuration() {
    let mut fields = approved_callback();
    fields.insert("storename", "9999999999");
    assert!(signature::verify_notification(fields, &signature_key()).is_ok());

    let other_store = ConnectorAuthType::SignatureKey {
        store_id: "9999999999".to_string(),
        shared_secret: Secret::new(SHARED_SECRET.to_string()),
    };
    assert!(signature::verify_notification(approved_callback(), &other_store).is_err());
}

#[test]
fn test_notification_order_selection() {
    assert_eq!(
        NotificationOrder::select(&approved_callback()),
        NotificationOrder::ResponseHash
    );

    let both = form(&[("notification_hash", "abc"), ("response_hash", "def")]);
    assert_eq!(
        NotificationOrder::select(&both),
        NotificationOrder::NotificationHash
    );

    let empty_notification_hash = form(&[("notification_hash", ""), ("response_hash", "def")]);
    assert_eq!(
        NotificationOrder::select(&empty_notification_hash),
        NotificationOrder::ResponseHash
    );
}

#[test]
fn test_verify_server_to_server_notification() {
    let mut fields = form(&[
        ("chargetotal", "110.00"),
        ("currency", "032"),
        ("txndatetime", "2013:09:27-16:06:26"),
        ("approval_code", "Y:136432:0013649958:PPXM:0015"),
        ("status", "APPROVED"),
        ("oid", "abc123456"),
        ("refnumber", "84512"),
    ]);
    fields.insert(
        "notification_hash",
        "vD4y9waficDUIMQEwyhBcZgcZzchAaHGz+LkNw1h6x8=",
    );
    // a valid response_hash must not rescue a wrong notification_hash
    fields.insert("response_hash", "garbage");

    let details = HostedRedirect::new()
        .interpret_response(&signature_key(), &fields)
        .unwrap();
    assert_eq!(details.status, TransactionStatus::Completed);
    assert_eq!(details.transaction_reference.as_deref(), Some("84512"));

    let mut wrong = fields.clone();
    wrong.insert("notification_hash", "bogus");
    wrong.insert("response_hash", "0nM0t9K6QV3Z+zEaQoVHZuNFPD+FZ/fD0kcdML4Tw3o=");
    assert!(signature::verify_notification(wrong, &signature_key()).is_err());
}

#[test]
fn test_transaction_status_mapping() {
    let cases = [
        (Some("APPROVED"), TransactionStatus::Completed),
        (Some("APROBADO"), TransactionStatus::Completed),
        (Some("DECLINED"), TransactionStatus::Failed),
        (Some("RECHAZADO"), TransactionStatus::Failed),
        (Some("WAITING"), TransactionStatus::Pending),
        (Some("approved"), TransactionStatus::Pending),
        (Some(""), TransactionStatus::Pending),
        (None, TransactionStatus::Pending),
    ];
    for (status, expected) in cases {
        assert_eq!(transformers::get_transaction_status(status), expected, "{status:?}");
    }
}

// ===== HOSTED PAYMENT PAGE =====

#[test]
fn test_hosted_purchase_form() {
    let connectors = connectors();
    let account = MerchantConnectorAccount::new(signature_key(), EndpointProfile::IpgOnline, true);
    let router_data = RouterData::new(purchase(), &account, &connectors)
        .with_timestamp(datetime!(2013-09-27 16:06:26));

    let response = HostedRedirect::new().build_request(&router_data).unwrap();
    assert!(response.is_redirect);
    assert!(!response.is_successful);

    let domain_types::router_response_types::RedirectForm::Form {
        endpoint,
        method,
        form_fields,
    } = response.redirection_data;
    assert_eq!(
        endpoint,
        "https://test.ipg-online.com/connect/gateway/processing"
    );
    assert_eq!(method, Method::Post);
    assert_eq!(form_fields["txntype"], "sale");
    assert_eq!(form_fields["timezone"], "America/Argentina/Buenos_Aires");
    assert_eq!(form_fields["txndatetime"], "2013:09:27-16:06:26");
    assert_eq!(form_fields["hash_algorithm"], "HMACSHA256");
    assert_eq!(form_fields["storename"], STORE_ID);
    assert_eq!(form_fields["mode"], "payonly");
    assert_eq!(form_fields["chargetotal"], "13.00");
    assert_eq!(form_fields["currency"], "826");
    assert_eq!(form_fields["oid"], "abc123");
    assert_eq!(form_fields["responseSuccessURL"], "https://www.example.com/return");
    assert_eq!(form_fields["responseFailURL"], "https://www.example.com/return");
    assert_eq!(form_fields["customerid"], "54321");
    assert_eq!(form_fields["full_bypass"], "1");
    assert_eq!(form_fields["cardnumber"], "4111111111111111");
    assert_eq!(form_fields["cvm"], "123");
    assert_eq!(form_fields["expmonth"], "12");
    assert_eq!(form_fields["expyear"], "30");
    assert_eq!(form_fields["hosteddataid"], "");
    assert!(!form_fields.contains_key("language"));
    assert_eq!(
        form_fields["hashExtended"],
        "wSx+4/n2X4s/B2Jye/DLXV4oXnpHLKUNwHaJ4WROVJ4="
    );
}

#[test]
fn test_hash_extended_covers_every_other_field() {
    let connectors = connectors();
    let account = MerchantConnectorAccount::new(signature_key(), EndpointProfile::IpgOnline, false);
    let request = PurchaseRequestData {
        notification_url: Some("https://shop.example.com/ipg/notify".to_string()),
        payment_method: Some("V".to_string()),
        tax_refund_indicator: Some("N".to_string()),
        ..purchase()
    };
    let router_data = RouterData::new(request, &account, &connectors);

    let hosted = HostedRedirect::new();
    let payload = hosted.build_payload(&router_data).unwrap();
    let response = hosted.build_request(&router_data).unwrap();
    let form_fields = response.redirection_data.form_fields();

    assert_eq!(
        form_fields["hashExtended"],
        signature::compute_extended_signature(&payload, &auth()).unwrap()
    );
    assert_eq!(form_fields.len(), payload.len() + 1);
    assert_eq!(
        response.redirection_data.endpoint(),
        "https://www.ipg-online.com/connect/gateway/processing"
    );
}

#[test]
fn test_www2_profile_sends_language() {
    let connectors = connectors();
    let account =
        MerchantConnectorAccount::new(signature_key(), EndpointProfile::IpgOnlineWww2, false);
    let router_data = RouterData::new(purchase(), &account, &connectors);

    let response = HostedRedirect::new().build_request(&router_data).unwrap();
    let form_fields = response.redirection_data.form_fields();
    assert_eq!(form_fields["language"], "es_AR");
    assert_eq!(
        response.redirection_data.endpoint(),
        "https://www2.ipg-online.com/connect/gateway/processing"
    );
}

#[test]
fn test_purchase_without_card() {
    let connectors = connectors();
    let account = MerchantConnectorAccount::new(signature_key(), EndpointProfile::IpgOnline, true);
    let request = PurchaseRequestData {
        card: None,
        ..purchase()
    };
    let router_data = RouterData::new(request, &account, &connectors);

    let payload = HostedRedirect::new().build_payload(&router_data).unwrap();
    assert_eq!(payload.get("full_bypass"), Some(&FieldValue::Flag(false)));
    assert!(!payload.contains_key("cardnumber"));
    assert!(!payload.contains_key("cvm"));
}

#[test]
fn test_purchase_requires_amount() {
    let connectors = connectors();
    let account = MerchantConnectorAccount::new(signature_key(), EndpointProfile::IpgOnline, true);
    let request = PurchaseRequestData {
        minor_amount: None,
        ..purchase()
    };
    let router_data = RouterData::new(request, &account, &connectors);

    let error = HostedRedirect::new().build_request(&router_data).unwrap_err();
    assert_eq!(
        error.current_context(),
        &ConnectorError::MissingRequiredField {
            field_name: "amount"
        }
    );
}

#[test]
fn test_purchase_rejects_negative_amount() {
    let connectors = connectors();
    let account = MerchantConnectorAccount::new(signature_key(), EndpointProfile::IpgOnline, true);
    let request = PurchaseRequestData {
        minor_amount: Some(-1300),
        ..purchase()
    };
    let router_data = RouterData::new(request, &account, &connectors);

    let error = HostedRedirect::new().build_request(&router_data).unwrap_err();
    assert_eq!(
        error.current_context(),
        &ConnectorError::InvalidAmount {
            field_name: "amount"
        }
    );
}

#[test]
fn test_purchase_with_hosted_data_id() {
    let connectors = connectors();
    let account = MerchantConnectorAccount::new(signature_key(), EndpointProfile::IpgOnline, true);
    let request = PurchaseRequestData {
        hosted_data_id: Some("1804289383".to_string()),
        ..purchase()
    };
    let router_data = RouterData::new(request, &account, &connectors);

    let response = HostedRedirect::new().build_request(&router_data).unwrap();
    assert_eq!(
        response.redirection_data.form_fields()["hosteddataid"],
        "1804289383"
    );
}

#[test]
fn test_stored_card_purchase_requires_cvv() {
    let connectors = connectors();
    let account = MerchantConnectorAccount::new(signature_key(), EndpointProfile::IpgOnline, true);
    let request = PurchaseRequestData {
        hosted_data_id: Some("1804289383".to_string()),
        card: Some(Card {
            card_number: None,
            card_cvc: None,
            ..valid_card()
        }),
        ..purchase()
    };
    let router_data = RouterData::new(request, &account, &connectors);

    let error = HostedRedirect::new().build_request(&router_data).unwrap_err();
    assert_eq!(
        error.current_context(),
        &ConnectorError::InvalidCardDetails {
            message: "The CVV parameter is required when using hosteddataid"
        }
    );
}

#[test]
fn test_stored_card_purchase_with_cvv_only() {
    let connectors = connectors();
    let account = MerchantConnectorAccount::new(signature_key(), EndpointProfile::IpgOnline, true);
    let request = PurchaseRequestData {
        hosted_data_id: Some("1804289383".to_string()),
        card: Some(Card {
            card_cvc: Some(Secret::new("123".to_string())),
            ..Default::default()
        }),
        ..purchase()
    };
    let router_data = RouterData::new(request, &account, &connectors);

    let response = HostedRedirect::new().build_request(&router_data).unwrap();
    let form_fields = response.redirection_data.form_fields();
    assert_eq!(form_fields["full_bypass"], "1");
    assert_eq!(form_fields["cvm"], "123");
    assert_eq!(form_fields["cardnumber"], "");
    assert_eq!(form_fields["expmonth"], "");
}

#[test]
fn test_invalid_card_is_rejected() {
    let connectors = connectors();
    let account = MerchantConnectorAccount::new(signature_key(), EndpointProfile::IpgOnline, true);
    let request = PurchaseRequestData {
        card: Some(Card {
            card_number: Some(Secret::new("4111111111111112".to_string())),
            ..valid_card()
        }),
        ..purchase()
    };
    let router_data = RouterData::new(request, &account, &connectors);

    let error = HostedRedirect::new().build_request(&router_data).unwrap_err();
    assert!(matches!(
        error.current_context(),
        ConnectorError::InvalidCardDetails { .. }
    ));
}

// ===== WEBSERVICE =====

fn webservice_body(request: &common_utils::request::Request) -> String {
    request
        .body
        .as_ref()
        .map(|body| body.get_inner_value().peek().clone())
        .unwrap_or_default()
}

#[test]
fn test_webservice_refund_request() {
    let connectors = connectors();
    let account = MerchantConnectorAccount::new(
        signature_key_with_certificate(),
        EndpointProfile::IpgOnline,
        true,
    );
    let refund = RefundRequestData {
        minor_amount: Some(1200),
        currency: Some(Currency::ARS),
        transaction_reference: Some("98765::ABCDEF".to_string()),
    };
    let router_data = RouterData::new(refund, &account, &connectors);

    let request = Webservice::new().build_request(&router_data).unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "https://test.ipg-online.com/ipgapi/services");
    assert_eq!(request.get_header("content-type").as_deref(), Some("text/xml"));
    assert!(request
        .get_redacted_headers()
        .iter()
        .any(|(name, value)| name == "Authorization" && value == "Redacted"));
    assert_eq!(
        request.certificate.as_ref().map(|c| c.peek().clone()).as_deref(),
        Some("WS1120540155._.1.pem")
    );

    let body = webservice_body(&request);
    assert!(body.contains("<SOAP-ENV:Body><ipgapi:IPGApiOrderRequest"));
    assert!(body.contains("<v1:Type>return</v1:Type>"));
    assert!(body.contains("<v1:StoreId>1120540155</v1:StoreId>"));
    assert!(body.contains("<v1:ChargeTotal>12.00</v1:ChargeTotal>"));
    assert!(body.contains("<v1:Currency>032</v1:Currency>"));
    assert!(body.contains("<v1:OrderId>98765</v1:OrderId>"));
    assert!(body.contains("<v1:TDate>ABCDEF</v1:TDate>"));
    assert!(!body.contains("CardCodeValue"));
}

#[test]
fn test_webservice_refund_rejects_negative_amount() {
    let connectors = connectors();
    let account = MerchantConnectorAccount::new(
        signature_key_with_certificate(),
        EndpointProfile::IpgOnline,
        true,
    );
    let refund = RefundRequestData {
        minor_amount: Some(-500),
        currency: Some(Currency::ARS),
        transaction_reference: Some("98765::ABCDEF".to_string()),
    };
    let router_data = RouterData::new(refund, &account, &connectors);

    let error = Webservice::new().build_request(&router_data).unwrap_err();
    assert_eq!(
        error.current_context(),
        &ConnectorError::InvalidAmount {
            field_name: "amount"
        }
    );
}

#[test]
fn test_webservice_purchase_request() {
    let connectors = connectors();
    let account = MerchantConnectorAccount::new(
        signature_key_with_certificate(),
        EndpointProfile::IpgOnline,
        false,
    );
    let request = PurchaseRequestData {
        hosted_data_id: Some("1804289383".to_string()),
        currency: Some(Currency::ARS),
        card: Some(Card {
            card_cvc: Some(Secret::new("123".to_string())),
            ..Default::default()
        }),
        ..purchase()
    };
    let router_data = RouterData::new(request, &account, &connectors);

    let request = Webservice::new().build_request(&router_data).unwrap();
    assert_eq!(request.url, "https://www.ipg-online.com/ipgapi/services");
    let body = webservice_body(&request);
    assert!(body.contains("<v1:Type>sale</v1:Type>"));
    assert!(body.contains("<v1:CardCodeValue>123</v1:CardCodeValue>"));
    assert!(body.contains("<v1:HostedDataID>1804289383</v1:HostedDataID>"));
    assert!(body.contains("<v1:ChargeTotal>13.00</v1:ChargeTotal>"));
    assert!(body.contains("<v1:OrderId>abc123</v1:OrderId>"));
}

#[test]
fn test_mask_webservice_body_hides_card_code() {
    let body = "<v1:CreditCardData><v1:CardCodeValue>123</v1:CardCodeValue></v1:CreditCardData>\
                <v1:ChargeTotal>13.00</v1:ChargeTotal>";

    let masked = super::mask_webservice_body(body);
    assert_eq!(
        masked,
        "<v1:CreditCardData><v1:CardCodeValue>Redacted</v1:CardCodeValue></v1:CreditCardData>\
         <v1:ChargeTotal>13.00</v1:ChargeTotal>"
    );
    assert_eq!(super::mask_webservice_body("<v1:Type>return</v1:Type>"), "<v1:Type>return</v1:Type>");
}

#[test]
fn test_webservice_purchase_requires_hosted_data_id() {
    let connectors = connectors();
    let account = MerchantConnectorAccount::new(
        signature_key_with_certificate(),
        EndpointProfile::IpgOnline,
        true,
    );
    let router_data = RouterData::new(purchase(), &account, &connectors);

    let error = Webservice::new().build_request(&router_data).unwrap_err();
    assert_eq!(
        error.current_context(),
        &ConnectorError::MissingRequiredField {
            field_name: "hosted_data_id"
        }
    );
}

#[test]
fn test_webservice_requires_certificate_credentials() {
    let connectors = connectors();
    let account = MerchantConnectorAccount::new(signature_key(), EndpointProfile::IpgOnline, true);
    let refund = RefundRequestData {
        minor_amount: Some(1200),
        currency: Some(Currency::ARS),
        transaction_reference: Some("98765::ABCDEF".to_string()),
    };
    let router_data = RouterData::new(refund, &account, &connectors);

    let error = Webservice::new().build_request(&router_data).unwrap_err();
    assert!(error.current_context().is_configuration_error());
}

#[test]
fn test_transaction_reference_split() {
    assert_eq!(
        transformers::split_transaction_reference("98765::ABCDEF").unwrap(),
        ("98765", "ABCDEF")
    );
    for malformed in ["98765", "98765::", "::ABCDEF"] {
        let error = transformers::split_transaction_reference(malformed).unwrap_err();
        assert_eq!(
            error.current_context(),
            &ConnectorError::InvalidTransactionReference
        );
    }
}

#[test]
fn test_currency_numeric_code() {
    assert_eq!(transformers::get_currency_numeric(Currency::ARS), "032");
    assert_eq!(transformers::get_currency_numeric(Currency::GBP), "826");
    assert_eq!(transformers::get_charge_total(1200, Currency::ARS), "12.00");
}

#[test]
fn test_webservice_approved_response() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Header/>
  <SOAP-ENV:Body>
    <ipgapi:IPGApiOrderResponse xmlns:ipgapi="http://ipg-online.com/ipgapi/schemas/ipgapi">
      <ipgapi:ApprovalCode>Y:ECI2/3:Authorised</ipgapi:ApprovalCode>
      <ipgapi:OrderId>A-7d7a2f3e</ipgapi:OrderId>
      <ipgapi:ProcessorResponseMessage>Function performed error-free</ipgapi:ProcessorResponseMessage>
      <ipgapi:TDate>1380297986</ipgapi:TDate>
      <ipgapi:TransactionResult>APPROVED</ipgapi:TransactionResult>
    </ipgapi:IPGApiOrderResponse>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

    let response = GatewayVariant::<RefundRequestData>::interpret_response(
        Webservice::new(),
        &signature_key_with_certificate(),
        xml,
    )
    .unwrap();
    assert_eq!(response.status, TransactionStatus::Completed);
    assert!(response.is_successful);
    assert_eq!(
        response.transaction_reference.as_deref(),
        Some("A-7d7a2f3e::1380297986")
    );
    assert_eq!(
        response.message.as_deref(),
        Some("Function performed error-free")
    );
}

#[test]
fn test_webservice_fault_response() {
    let xml = r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Body>
    <SOAP-ENV:Fault>
      <faultcode>SOAP-ENV:Client</faultcode>
      <faultstring xml:lang="en">ProcessingException</faultstring>
      <detail>
        <ipgapi:IPGApiOrderResponse xmlns:ipgapi="http://ipg-online.com/ipgapi/schemas/ipgapi">
          <ipgapi:ApprovalCode>N:05:Do not honour</ipgapi:ApprovalCode>
          <ipgapi:ErrorMessage>SGS-050005: Do not honour</ipgapi:ErrorMessage>
          <ipgapi:OrderId>A-1</ipgapi:OrderId>
          <ipgapi:TransactionResult>DECLINED</ipgapi:TransactionResult>
        </ipgapi:IPGApiOrderResponse>
      </detail>
    </SOAP-ENV:Fault>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

    let response = GatewayVariant::<PurchaseRequestData>::interpret_response(
        Webservice::new(),
        &signature_key_with_certificate(),
        xml,
    )
    .unwrap();
    assert_eq!(response.status, TransactionStatus::Failed);
    assert_eq!(
        response.message.as_deref(),
        Some("SGS-050005: Do not honour")
    );
    assert_eq!(response.transaction_reference, None);
}

#[test]
fn test_webservice_unrelated_response_fails() {
    let error = GatewayVariant::<PurchaseRequestData>::interpret_response(
        Webservice::new(),
        &signature_key_with_certificate(),
        "<html><body>Service unavailable</body></html>",
    )
    .unwrap_err();
    assert_eq!(
        error.current_context(),
        &ConnectorError::ResponseDeserializationFailed
    );
}

mod properties {
    use proptest::prelude::*;

    use super::{auth, signature, FieldMap, FieldValue};

    fn field_map() -> impl Strategy<Value = FieldMap> {
        proptest::collection::btree_map("[a-y][a-z_]{0,7}", "[ -~]{0,12}", 0..8)
            .prop_map(FieldMap::from)
    }

    fn falsy_value() -> impl Strategy<Value = FieldValue> {
        prop_oneof![
            Just(FieldValue::Text(String::new())),
            Just(FieldValue::Text("0".to_string())),
            Just(FieldValue::Flag(false)),
            Just(FieldValue::Integer(0)),
            Just(FieldValue::Null),
        ]
    }

    proptest! {
        /// Property: same fields and secret always produce the same signature
        #[test]
        fn prop_extended_signature_deterministic(fields in field_map()) {
            let first = signature::compute_extended_signature(&fields, &auth()).unwrap();
            let second = signature::compute_extended_signature(&fields.clone(), &auth()).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: adding a falsy field never changes the signature
        #[test]
        fn prop_falsy_fields_do_not_affect_signature(
            fields in field_map(),
            name in "z[a-z]{0,7}",
            value in falsy_value(),
        ) {
            let mut extended = fields.clone();
            extended.insert(name, value);
            prop_assert_eq!(
                signature::compute_extended_signature(&fields, &auth()).unwrap(),
                signature::compute_extended_signature(&extended, &auth()).unwrap()
            );
        }
    }
}
