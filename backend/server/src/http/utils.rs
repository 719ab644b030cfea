use axum::{
    extract::{FromRequest, Request},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use common_utils::consts;
use domain_types::types::MerchantConnectorAccount;
use serde::de::DeserializeOwned;

use super::error::HttpError;
use crate::configs::Config;

/// Custom JSON extractor that converts 422 errors to 400 with original error messages
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(HttpError {
                status: StatusCode::BAD_REQUEST,
                message: rejection.to_string(),
            }
            .into_response()),
        }
    }
}

/// Form extractor for gateway callbacks, rejecting malformed bodies with 400
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(Self(value)),
            Err(rejection) => Err(HttpError {
                status: StatusCode::BAD_REQUEST,
                message: rejection.to_string(),
            }
            .into_response()),
        }
    }
}

/// Resolves the store named by the `x-merchant-id` header.
pub fn merchant_account_from_headers<'a>(
    config: &'a Config,
    headers: &HeaderMap,
) -> Result<&'a MerchantConnectorAccount, HttpError> {
    let merchant_id = headers
        .get(consts::X_MERCHANT_ID)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Missing {} header", consts::X_MERCHANT_ID),
        })?;

    config
        .merchant_account(merchant_id)
        .ok_or_else(|| HttpError {
            status: StatusCode::NOT_FOUND,
            message: format!("No store configured for merchant `{merchant_id}`"),
        })
}
