use std::sync::Arc;

use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, OriginalUri, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use common::metrics::{self, ACCOUNTS_CREATED_TOTAL, ACCOUNTS_DELETED_TOTAL, ACCOUNTS_UPDATED_TOTAL, ACCOUNT_FETCHES_TOTAL};
use common::types::ResponseDto;
use configs::ContactInfo;
use service::accounts::{domain::CustomerDto, repository::AccountsRepository, AccountsService};

use crate::constants::*;
use crate::errors::ApiError;

pub type DynAccountsService = AccountsService<dyn AccountsRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub accounts: Arc<DynAccountsService>,
    pub build_version: String,
    pub contact: ContactInfo,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MobileNumberQuery {
    /// 10-digit mobile number of the customer
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
}

type StatusReply = (StatusCode, Json<ResponseDto>);

fn reply(status: StatusCode, code: &str, msg: &str) -> StatusReply {
    (status, Json(ResponseDto::new(code, msg)))
}

fn body_error(path: &str, e: JsonRejection) -> ApiError {
    ApiError::new(e.status(), path, e.body_text())
}

fn query_error(path: &str, e: QueryRejection) -> ApiError {
    ApiError::new(e.status(), path, e.body_text())
}

#[utoipa::path(
    post, path = "/api/accounts/create", tag = "accounts",
    request_body = crate::openapi::CustomerDtoDoc,
    responses(
        (status = 201, description = "Account created", body = crate::openapi::ResponseDtoDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 409, description = "Customer already exists", body = crate::openapi::ErrorResponseDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<CustomerDto>, JsonRejection>,
) -> Result<StatusReply, ApiError> {
    let Json(input) = payload.map_err(|e| body_error(uri.path(), e))?;
    match state.accounts.create_account(input).await {
        Ok(created) => {
            ACCOUNTS_CREATED_TOTAL.inc();
            let number = created.accounts_dto.map(|a| a.account_number).unwrap_or_default();
            info!(account_number = number, "create account ok");
            Ok(reply(StatusCode::CREATED, STATUS_201, MESSAGE_201))
        }
        Err(e) => {
            metrics::record_error("create", e.kind());
            Err(ApiError::from_accounts(uri.path(), &e))
        }
    }
}

#[utoipa::path(
    get, path = "/api/accounts/fetch", tag = "accounts",
    params(MobileNumberQuery),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CustomerDtoDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn fetch(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<MobileNumberQuery>, QueryRejection>,
) -> Result<Json<CustomerDto>, ApiError> {
    let Query(q) = query.map_err(|e| query_error(uri.path(), e))?;
    match state.accounts.fetch_account(&q.mobile_number).await {
        Ok(found) => {
            ACCOUNT_FETCHES_TOTAL.inc();
            Ok(Json(found))
        }
        Err(e) => {
            metrics::record_error("fetch", e.kind());
            Err(ApiError::from_accounts(uri.path(), &e))
        }
    }
}

#[utoipa::path(
    put, path = "/api/accounts/update", tag = "accounts",
    request_body = crate::openapi::CustomerDtoDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ResponseDtoDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc),
        (status = 417, description = "Nothing updated", body = crate::openapi::ResponseDtoDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<CustomerDto>, JsonRejection>,
) -> Result<StatusReply, ApiError> {
    let Json(input) = payload.map_err(|e| body_error(uri.path(), e))?;
    match state.accounts.update_account(input).await {
        Ok(true) => {
            ACCOUNTS_UPDATED_TOTAL.inc();
            Ok(reply(StatusCode::OK, STATUS_200, MESSAGE_200))
        }
        Ok(false) => {
            metrics::record_error("update", "expectation_failed");
            Ok(reply(StatusCode::EXPECTATION_FAILED, STATUS_417, MESSAGE_417_UPDATE))
        }
        Err(e) => {
            metrics::record_error("update", e.kind());
            Err(ApiError::from_accounts(uri.path(), &e))
        }
    }
}

#[utoipa::path(
    delete, path = "/api/accounts/delete", tag = "accounts",
    params(MobileNumberQuery),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::ResponseDtoDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc),
        (status = 417, description = "Nothing deleted", body = crate::openapi::ResponseDtoDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<MobileNumberQuery>, QueryRejection>,
) -> Result<StatusReply, ApiError> {
    let Query(q) = query.map_err(|e| query_error(uri.path(), e))?;
    match state.accounts.delete_account(&q.mobile_number).await {
        Ok(true) => {
            ACCOUNTS_DELETED_TOTAL.inc();
            Ok(reply(StatusCode::OK, STATUS_200, MESSAGE_200))
        }
        Ok(false) => {
            metrics::record_error("delete", "expectation_failed");
            Ok(reply(StatusCode::EXPECTATION_FAILED, STATUS_417, MESSAGE_417_DELETE))
        }
        Err(e) => {
            metrics::record_error("delete", e.kind());
            Err(ApiError::from_accounts(uri.path(), &e))
        }
    }
}

#[utoipa::path(get, path = "/api/build-info", tag = "info", responses((status = 200, description = "Build version", body = String)))]
pub async fn build_info(State(state): State<ServerState>) -> (StatusCode, String) {
    (StatusCode::OK, state.build_version.clone())
}

#[utoipa::path(get, path = "/api/contact-info", tag = "info", responses((status = 200, description = "Contact details", body = crate::openapi::ContactInfoDoc)))]
pub async fn contact_info(State(state): State<ServerState>) -> Json<ContactInfo> {
    Json(state.contact.clone())
}
