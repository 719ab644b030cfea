//! Hash canonicalization and verification for IPG Connect.
//!
//! Every hash the gateway exchanges is an HMAC-SHA256 over the `|`-joined values
//! of a set of fields, base64 encoded. Outbound requests are signed over all of
//! their fields in key order (`hashExtended`); callbacks are signed over a fixed
//! subset whose order depends on which hash field the gateway sent.

use std::{
    borrow::Cow,
    collections::{btree_map, BTreeMap},
};

use common_utils::{crypto, CustomResult};
use domain_types::{errors, router_data::ConnectorAuthType};
use error_stack::{report, ResultExt};
use interfaces::verification::SourceVerification;

use super::transformers::IpgConnectAuthType;

pub const NOTIFICATION_HASH: &str = "notification_hash";
pub const RESPONSE_HASH: &str = "response_hash";
pub const STORENAME: &str = "storename";

/// A single field value. The variants mirror what the gateway's own
/// (loosely typed) integration would put into a payload, so that falsy values
/// can be recognised exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Integer(i64),
    Null,
}

impl FieldValue {
    /// Empty string, `"0"`, `false`, `0` and null never take part in a hash.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty() || text == "0",
            Self::Flag(flag) => !flag,
            Self::Integer(number) => *number == 0,
            Self::Null => true,
        }
    }

    /// Value as it appears in the canonical string, `None` when it is skipped.
    pub fn canonical(&self) -> Option<Cow<'_, str>> {
        if self.is_falsy() {
            return None;
        }
        Some(self.render())
    }

    /// Value as posted in a form, `false` and null as empty strings.
    pub fn to_form_value(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Flag(false) | Self::Null => String::new(),
            Self::Flag(true) | Self::Integer(_) => self.render().into_owned(),
        }
    }

    fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Flag(true) => Cow::Borrowed("1"),
            Self::Flag(false) | Self::Null => Cow::Borrowed(""),
            Self::Integer(number) => Cow::Owned(number.to_string()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Named field values of a request or callback. Keys iterate in byte order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap(BTreeMap<String, FieldValue>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text value of a field, treating an empty string as absent.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(FieldValue::as_text)
            .filter(|text| !text.is_empty())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields rendered for an HTML form post.
    pub fn to_form_fields(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(name, value)| (name.clone(), value.to_form_value()))
            .collect()
    }

    /// Text fields only, as they would be echoed back to a caller.
    pub fn to_text_fields(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .filter_map(|(name, value)| value.as_text().map(|text| (name.clone(), text.to_string())))
            .collect()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for FieldMap {
    fn from(fields: BTreeMap<String, String>) -> Self {
        fields.into_iter().collect()
    }
}

/// The two field orders the gateway uses when signing a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOrder {
    /// server-to-server notification, signed into `notification_hash`
    NotificationHash,
    /// customer redirect back to the shop, signed into `response_hash`
    ResponseHash,
}

impl NotificationOrder {
    /// A non-empty `notification_hash` wins over `response_hash`.
    pub fn select(fields: &FieldMap) -> Self {
        match fields.get(NOTIFICATION_HASH) {
            Some(value) if !value.is_falsy() => Self::NotificationHash,
            _ => Self::ResponseHash,
        }
    }

    pub const fn fields(self) -> [&'static str; 5] {
        match self {
            Self::NotificationHash => [
                "chargetotal",
                "currency",
                "txndatetime",
                STORENAME,
                "approval_code",
            ],
            Self::ResponseHash => [
                "approval_code",
                "chargetotal",
                "currency",
                "txndatetime",
                STORENAME,
            ],
        }
    }

    /// Field carrying the hash presented by the gateway.
    pub const fn hash_field(self) -> &'static str {
        match self {
            Self::NotificationHash => NOTIFICATION_HASH,
            Self::ResponseHash => RESPONSE_HASH,
        }
    }

    /// Presented hash, empty when the gateway did not send one.
    pub fn presented_hash(self, fields: &FieldMap) -> Cow<'_, str> {
        fields
            .get(self.hash_field())
            .map(FieldValue::render)
            .unwrap_or(Cow::Borrowed(""))
    }
}

/// Joins the non-falsy values of `order` with `|`. Names missing from
/// `fields` are skipped like falsy values.
pub fn canonicalize<'a>(fields: &FieldMap, order: impl IntoIterator<Item = &'a str>) -> String {
    order
        .into_iter()
        .filter_map(|name| fields.get(name))
        .filter_map(FieldValue::canonical)
        .collect::<Vec<_>>()
        .join("|")
}

fn sign(
    auth: &IpgConnectAuthType,
    canonical: &str,
) -> CustomResult<String, errors::ConnectorError> {
    crypto::hmac_sha256_base64(auth.get_signing_key()?, canonical.as_bytes())
        .change_context(errors::ConnectorError::SignatureComputationFailed)
}

/// `hashExtended`: signature over every field, in key order. `storename` must
/// already be part of `fields`.
pub fn compute_extended_signature(
    fields: &FieldMap,
    auth: &IpgConnectAuthType,
) -> CustomResult<String, errors::ConnectorError> {
    sign(auth, &canonicalize(fields, fields.keys()))
}

/// Signature of a callback. `storename` is always taken from the merchant's
/// own configuration, whatever the callback claims.
pub fn compute_notification_signature(
    fields: &FieldMap,
    auth: &IpgConnectAuthType,
    order: NotificationOrder,
) -> CustomResult<String, errors::ConnectorError> {
    let store_id = auth.get_store_id()?;
    let mut fields = fields.clone();
    fields.insert(STORENAME, store_id);
    sign(auth, &canonicalize(&fields, order.fields()))
}

/// Checks the hash of a callback and hands the fields back once trusted.
pub fn verify_notification(
    fields: FieldMap,
    auth_type: &ConnectorAuthType,
) -> CustomResult<FieldMap, errors::ConnectorError> {
    if CallbackVerifier.verify(auth_type, &fields)? {
        return Ok(fields);
    }

    let auth = IpgConnectAuthType::try_from(auth_type)?;
    let order = NotificationOrder::select(&fields);
    let expected = compute_notification_signature(&fields, &auth, order)?;
    Err(report!(errors::ConnectorError::SignatureMismatch))
        .attach_printable(format!("expected {} {expected}", order.hash_field()))
}

/// Source verification of IPG callbacks.
#[derive(Debug, Clone, Copy)]
pub struct CallbackVerifier;

impl SourceVerification for CallbackVerifier {
    type Payload = FieldMap;

    fn get_secrets(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<u8>, errors::ConnectorError> {
        let auth = IpgConnectAuthType::try_from(auth_type)?;
        Ok(auth.get_signing_key()?.to_vec())
    }

    fn get_algorithm(
        &self,
    ) -> CustomResult<Box<dyn crypto::VerifySignature + Send>, errors::ConnectorError> {
        Ok(Box::new(crypto::HmacSha256Base64))
    }

    fn get_signature(
        &self,
        payload: &Self::Payload,
    ) -> CustomResult<Vec<u8>, errors::ConnectorError> {
        let order = NotificationOrder::select(payload);
        Ok(order.presented_hash(payload).as_bytes().to_vec())
    }

    fn get_message(
        &self,
        payload: &Self::Payload,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<u8>, errors::ConnectorError> {
        let auth = IpgConnectAuthType::try_from(auth_type)?;
        let mut fields = payload.clone();
        fields.insert(STORENAME, auth.get_store_id()?);
        let order = NotificationOrder::select(payload);
        Ok(canonicalize(&fields, order.fields()).into_bytes())
    }
}
