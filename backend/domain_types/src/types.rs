use serde::Deserialize;

use crate::router_data::ConnectorAuthType;

/// Hosts for every connector known to the service.
#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
pub struct Connectors {
    pub ipgconnect: IpgConnectProfiles,
}

/// The two IPG deployment targets. They share the hashing scheme but differ in
/// live host and in whether the hosted page accepts a `language` field.
#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
pub struct IpgConnectProfiles {
    pub ipg_online: ConnectorParams,
    pub ipg_online_www2: ConnectorParams,
}

impl IpgConnectProfiles {
    pub fn get(&self, profile: EndpointProfile) -> &ConnectorParams {
        match profile {
            EndpointProfile::IpgOnline => &self.ipg_online,
            EndpointProfile::IpgOnlineWww2 => &self.ipg_online_www2,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
pub struct ConnectorParams {
    /// live base url
    #[serde(default)]
    pub base_url: String,
    /// base url used when the merchant account runs in test mode
    #[serde(default)]
    pub test_base_url: String,
    /// whether the hosted payment page of this profile takes a `language` field
    #[serde(default)]
    pub send_language: bool,
}

impl ConnectorParams {
    pub fn base_url(&self, test_mode: bool) -> &str {
        if test_mode {
            &self.test_base_url
        } else {
            &self.base_url
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EndpointProfile {
    #[default]
    IpgOnline,
    IpgOnlineWww2,
}

fn default_timezone() -> String {
    "America/Argentina/Buenos_Aires".to_string()
}

fn default_language() -> String {
    "es_AR".to_string()
}

fn default_utc_offset_minutes() -> i16 {
    -180
}

/// Per-store settings: credentials plus the deployment profile the store is provisioned on.
#[derive(Clone, Deserialize, Debug)]
pub struct MerchantConnectorAccount {
    pub auth: ConnectorAuthType,
    #[serde(default)]
    pub profile: EndpointProfile,
    #[serde(default)]
    pub test_mode: bool,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// offset of `timezone` from UTC, used to stamp `txndatetime`
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i16,
}

impl MerchantConnectorAccount {
    pub fn new(auth: ConnectorAuthType, profile: EndpointProfile, test_mode: bool) -> Self {
        Self {
            auth,
            profile,
            test_mode,
            timezone: default_timezone(),
            language: default_language(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}
