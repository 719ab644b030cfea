use axum::{extract::State, http::HeaderMap, Json};
use common_utils::request::{Method, Request, RequestContent};
use connector_integration::connectors::{ipgconnect::mask_webservice_body, Webservice};
use domain_types::{
    router_data::RouterData,
    router_request_types::{PurchaseRequestData, RefundRequestData},
    router_response_types::WebserviceResponseData,
};
use hyperswitch_masking::PeekInterface;
use interfaces::connector_types::GatewayVariant;
use serde::Serialize;

use crate::{
    error::ResultExtHttp,
    http::{
        error::HttpError,
        state::AppState,
        utils::{merchant_account_from_headers, ValidatedJson},
    },
};

/// A webservice call ready to be sent. Masked headers and the card security
/// code are redacted and the client certificate is left out.
#[derive(Debug, Serialize)]
pub struct WebserviceRequest {
    pub url: String,
    pub method: Method,
    pub content_type: Option<&'static str>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl From<Request> for WebserviceRequest {
    fn from(request: Request) -> Self {
        Self {
            headers: request.get_redacted_headers(),
            content_type: request
                .body
                .as_ref()
                .map(RequestContent::content_type)
                .map(|content_type| content_type.mime()),
            body: request
                .body
                .as_ref()
                .map(|body| mask_webservice_body(body.get_inner_value().peek())),
            url: request.url,
            method: request.method,
        }
    }
}

#[tracing::instrument(skip_all, fields(flow = "webservice_purchase"))]
pub async fn purchase(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(request): ValidatedJson<PurchaseRequestData>,
) -> Result<Json<WebserviceRequest>, HttpError> {
    let merchant_account = merchant_account_from_headers(&state.config, &headers)?;
    let router_data = RouterData::new(request, merchant_account, &state.config.connectors);

    GatewayVariant::<PurchaseRequestData>::build_request(Webservice::new(), &router_data)
        .into_http_error()
        .map(|request| Json(request.into()))
}

#[tracing::instrument(skip_all, fields(flow = "webservice_refund"))]
pub async fn refund(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(request): ValidatedJson<RefundRequestData>,
) -> Result<Json<WebserviceRequest>, HttpError> {
    let merchant_account = merchant_account_from_headers(&state.config, &headers)?;
    let router_data = RouterData::new(request, merchant_account, &state.config.connectors);

    GatewayVariant::<RefundRequestData>::build_request(Webservice::new(), &router_data)
        .into_http_error()
        .map(|request| Json(request.into()))
}

/// Parses the XML the gateway answered a webservice order with.
#[tracing::instrument(skip_all, fields(flow = "webservice_transform"))]
pub async fn transform(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<WebserviceResponseData>, HttpError> {
    let merchant_account = merchant_account_from_headers(&state.config, &headers)?;

    GatewayVariant::<PurchaseRequestData>::interpret_response(
        Webservice::new(),
        &merchant_account.auth,
        body.as_str(),
    )
    .into_http_error()
    .map(Json)
}
