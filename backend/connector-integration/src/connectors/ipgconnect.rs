pub mod requests;
pub mod responses;
pub mod signature;
pub mod transformers;

#[cfg(test)]
mod test;

use common_utils::{
    consts,
    errors::CustomResult,
    request::{Method, Request, RequestBuilder, RequestContent},
};
use domain_types::{
    errors,
    router_data::{ConnectorAuthType, RouterData},
    router_request_types::{PurchaseRequestData, RefundRequestData},
    router_response_types::{
        NotificationDetails, PurchaseRedirectResponse, RedirectForm, WebserviceResponseData,
    },
    types::{Connectors, MerchantConnectorAccount},
};
use error_stack::ResultExt;
use hyperswitch_masking::Maskable;
use interfaces::{api::ConnectorCommon, connector_types::GatewayVariant};
use requests::IpgApiOrderRequest;
use responses::IpgApiOrderResponse;
use signature::FieldMap;
use transformers::{self as ipgconnect, IpgConnectAuthType};

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    pub(crate) const AUTHORIZATION: &str = "Authorization";
}

const CONNECTOR_NAME: &str = "ipgconnect";
const HOSTED_PAYMENT_PATH: &str = "/connect/gateway/processing";
const WEBSERVICE_PATH: &str = "/ipgapi/services";
const MASKED_ELEMENTS: [&str; 1] = ["v1:CardCodeValue"];

fn get_base_url<'a>(
    connectors: &'a Connectors,
    merchant_account: &MerchantConnectorAccount,
) -> &'a str {
    connectors
        .ipgconnect
        .get(merchant_account.profile)
        .base_url(merchant_account.test_mode)
}

/// Hosted payment page: the customer's browser posts a signed form to the
/// gateway, and the gateway reports back through signed callbacks.
#[derive(Debug, Clone, Copy)]
pub struct HostedRedirect;

impl HostedRedirect {
    pub const fn new() -> &'static Self {
        &Self
    }
}

impl ConnectorCommon for HostedRedirect {
    fn id(&self) -> &'static str {
        CONNECTOR_NAME
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/x-www-form-urlencoded"
    }

    fn base_url<'a>(
        &self,
        connectors: &'a Connectors,
        merchant_account: &MerchantConnectorAccount,
    ) -> &'a str {
        get_base_url(connectors, merchant_account)
    }
}

impl GatewayVariant<PurchaseRequestData> for HostedRedirect {
    type Payload = FieldMap;
    type Output = PurchaseRedirectResponse;
    type RawResponse = FieldMap;
    type Response = NotificationDetails;

    fn build_payload(
        &self,
        router_data: &RouterData<'_, PurchaseRequestData>,
    ) -> CustomResult<FieldMap, errors::ConnectorError> {
        let auth = IpgConnectAuthType::try_from(&router_data.merchant_account.auth)?;
        FieldMap::try_from((router_data, &auth))
    }

    fn compute_signature(
        &self,
        auth_type: &ConnectorAuthType,
        payload: &FieldMap,
    ) -> CustomResult<Option<String>, errors::ConnectorError> {
        let auth = IpgConnectAuthType::try_from(auth_type)?;
        signature::compute_extended_signature(payload, &auth).map(Some)
    }

    fn build_request(
        &self,
        router_data: &RouterData<'_, PurchaseRequestData>,
    ) -> CustomResult<PurchaseRedirectResponse, errors::ConnectorError> {
        let mut payload = self.build_payload(router_data)?;
        if let Some(hash) = self.compute_signature(&router_data.merchant_account.auth, &payload)? {
            payload.insert(ipgconnect::HASH_EXTENDED, hash);
        }

        let endpoint = format!(
            "{}{HOSTED_PAYMENT_PATH}",
            self.base_url(router_data.connectors, router_data.merchant_account)
        );
        tracing::debug!(
            connector = CONNECTOR_NAME,
            oid = ?payload.get_text("oid"),
            field_count = payload.len(),
            "built hosted payment form"
        );

        Ok(PurchaseRedirectResponse::new(RedirectForm::Form {
            endpoint,
            method: Method::Post,
            form_fields: payload.to_form_fields(),
        }))
    }

    /// Handles both the customer's return to the shop and the server-to-server
    /// notification; the hash field present decides how it is checked.
    fn interpret_response(
        &self,
        auth_type: &ConnectorAuthType,
        response: &FieldMap,
    ) -> CustomResult<NotificationDetails, errors::ConnectorError> {
        signature::verify_notification(response.clone(), auth_type).map(NotificationDetails::from)
    }
}

/// XML webservice API, authenticated with basic auth and a client
/// certificate. Used for stored-card purchases and refunds.
#[derive(Debug, Clone, Copy)]
pub struct Webservice;

impl Webservice {
    pub const fn new() -> &'static Self {
        &Self
    }

    fn build_order_request<Req>(
        &self,
        router_data: &RouterData<'_, Req>,
        order: &IpgApiOrderRequest,
    ) -> CustomResult<Request, errors::ConnectorError> {
        let auth_type = &router_data.merchant_account.auth;
        let auth = IpgConnectAuthType::try_from(auth_type)?;
        let credentials = auth.get_webservice_credentials()?;

        let order_xml = quick_xml::se::to_string(order)
            .change_context(errors::ConnectorError::RequestEncodingFailed)
            .attach_printable("Failed to serialize IPGApiOrderRequest")?;

        let url = format!(
            "{}{WEBSERVICE_PATH}",
            self.base_url(router_data.connectors, router_data.merchant_account)
        );
        tracing::debug!(connector = CONNECTOR_NAME, %url, "built webservice order request");

        Ok(RequestBuilder::new()
            .method(Method::Post)
            .url(&url)
            .attach_default_headers()
            .header(headers::CONTENT_TYPE, self.common_get_content_type())
            .headers(self.get_auth_header(auth_type)?)
            .set_body(RequestContent::Xml(wrap_in_soap_envelope(&order_xml)))
            .add_certificate(Some(credentials.certificate.clone()))
            .add_certificate_key(Some(credentials.certificate_key.clone()))
            .build())
    }
}

/// Copy of a webservice request body with the card security code replaced by
/// [`consts::REDACTED`].
pub fn mask_webservice_body(body: &str) -> String {
    MASKED_ELEMENTS
        .iter()
        .fold(body.to_string(), |body, element| mask_element(&body, element))
}

fn mask_element(body: &str, element: &str) -> String {
    let open = format!("<{element}>");
    let close = format!("</{element}>");
    let mut masked = String::with_capacity(body.len());
    let mut rest = body;
    while let Some((before, after_open)) = rest.split_once(open.as_str()) {
        let Some((_, after_close)) = after_open.split_once(close.as_str()) else {
            break;
        };
        masked.push_str(before);
        masked.push_str(&open);
        masked.push_str(consts::REDACTED);
        masked.push_str(&close);
        rest = after_close;
    }
    masked.push_str(rest);
    masked
}

fn wrap_in_soap_envelope(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/"><SOAP-ENV:Header/><SOAP-ENV:Body>{body}</SOAP-ENV:Body></SOAP-ENV:Envelope>"#
    )
}

impl ConnectorCommon for Webservice {
    fn id(&self) -> &'static str {
        CONNECTOR_NAME
    }

    fn common_get_content_type(&self) -> &'static str {
        "text/xml"
    }

    fn base_url<'a>(
        &self,
        connectors: &'a Connectors,
        merchant_account: &MerchantConnectorAccount,
    ) -> &'a str {
        get_base_url(connectors, merchant_account)
    }

    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let auth = IpgConnectAuthType::try_from(auth_type)?;
        let credentials = auth.get_webservice_credentials()?;
        Ok(vec![(
            headers::AUTHORIZATION.to_string(),
            credentials.basic_auth_header(),
        )])
    }
}

macro_rules! impl_webservice_order {
    ($request:ty) => {
        impl GatewayVariant<$request> for Webservice {
            type Payload = IpgApiOrderRequest;
            type Output = Request;
            type RawResponse = str;
            type Response = WebserviceResponseData;

            fn build_payload(
                &self,
                router_data: &RouterData<'_, $request>,
            ) -> CustomResult<IpgApiOrderRequest, errors::ConnectorError> {
                let auth = IpgConnectAuthType::try_from(&router_data.merchant_account.auth)?;
                IpgApiOrderRequest::try_from((router_data, &auth))
            }

            fn compute_signature(
                &self,
                _auth_type: &ConnectorAuthType,
                _payload: &IpgApiOrderRequest,
            ) -> CustomResult<Option<String>, errors::ConnectorError> {
                Ok(None)
            }

            fn build_request(
                &self,
                router_data: &RouterData<'_, $request>,
            ) -> CustomResult<Request, errors::ConnectorError> {
                let order = self.build_payload(router_data)?;
                self.build_order_request(router_data, &order)
            }

            fn interpret_response(
                &self,
                _auth_type: &ConnectorAuthType,
                response: &str,
            ) -> CustomResult<WebserviceResponseData, errors::ConnectorError> {
                IpgApiOrderResponse::parse(response).map(WebserviceResponseData::from)
            }
        }
    };
}

impl_webservice_order!(PurchaseRequestData);
impl_webservice_order!(RefundRequestData);
