use std::collections::BTreeMap;

use axum::{extract::State, http::HeaderMap, Json};
use connector_integration::connectors::{ipgconnect::signature::FieldMap, HostedRedirect};
use domain_types::{
    router_data::RouterData,
    router_request_types::PurchaseRequestData,
    router_response_types::{NotificationDetails, PurchaseRedirectResponse},
};
use interfaces::connector_types::GatewayVariant;

use crate::{
    error::ResultExtHttp,
    http::{
        error::HttpError,
        state::AppState,
        utils::{merchant_account_from_headers, ValidatedForm, ValidatedJson},
    },
    logger,
};

/// Builds the signed form the customer's browser posts to the hosted payment page.
#[tracing::instrument(skip_all, fields(flow = "purchase"))]
pub async fn purchase(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(request): ValidatedJson<PurchaseRequestData>,
) -> Result<Json<PurchaseRedirectResponse>, HttpError> {
    let merchant_account = merchant_account_from_headers(&state.config, &headers)?;
    let router_data = RouterData::new(request, merchant_account, &state.config.connectors);

    let response = HostedRedirect::new()
        .build_request(&router_data)
        .into_http_error()?;
    logger::info!(
        endpoint = response.redirection_data.endpoint(),
        "hosted payment form ready"
    );
    Ok(Json(response))
}

/// The customer returning to the shop after the hosted page.
#[tracing::instrument(skip_all, fields(flow = "complete_purchase"))]
pub async fn complete_purchase(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedForm(fields): ValidatedForm<BTreeMap<String, String>>,
) -> Result<Json<NotificationDetails>, HttpError> {
    verify_callback(&state, &headers, fields).map(Json)
}

/// Server-to-server notification sent by the gateway.
#[tracing::instrument(skip_all, fields(flow = "notification"))]
pub async fn notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedForm(fields): ValidatedForm<BTreeMap<String, String>>,
) -> Result<Json<NotificationDetails>, HttpError> {
    verify_callback(&state, &headers, fields).map(Json)
}

fn verify_callback(
    state: &AppState,
    headers: &HeaderMap,
    fields: BTreeMap<String, String>,
) -> Result<NotificationDetails, HttpError> {
    let merchant_account = merchant_account_from_headers(&state.config, headers)?;
    let details = HostedRedirect::new()
        .interpret_response(&merchant_account.auth, &FieldMap::from(fields))
        .into_http_error()?;

    logger::info!(
        oid = ?details.transaction_id,
        status = %details.status,
        "callback verified"
    );
    Ok(details)
}
