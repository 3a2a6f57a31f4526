use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AccountsDtoDoc {
    #[schema(example = 1234567890_i64)]
    pub account_number: i64,
    #[schema(example = "Savings")]
    pub account_type: String,
    #[schema(example = "123 Main Street, New York")]
    pub branch_address: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CustomerDtoDoc {
    #[schema(example = "Eazy Bytes")]
    pub name: String,
    #[schema(example = "tutor@eazybytes.com")]
    pub email: String,
    #[schema(example = "9345432123")]
    pub mobile_number: String,
    pub accounts_dto: Option<AccountsDtoDoc>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ResponseDtoDoc {
    #[schema(example = "200")]
    pub status_code: String,
    #[schema(example = "Request processed successfully")]
    pub status_msg: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ErrorResponseDoc {
    pub api_path: String,
    pub error_code: String,
    pub error_message: String,
    pub error_time: String,
}

#[derive(ToSchema)]
pub struct ContactInfoDoc {
    pub message: String,
    pub name: String,
    pub email: String,
    pub phones: Vec<String>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Accounts microservice REST API", description = "Create, fetch, update and delete customer accounts"),
    paths(
        crate::routes::health,
        crate::routes::accounts::create,
        crate::routes::accounts::fetch,
        crate::routes::accounts::update,
        crate::routes::accounts::delete,
        crate::routes::accounts::build_info,
        crate::routes::accounts::contact_info,
    ),
    components(
        schemas(
            HealthResponse,
            AccountsDtoDoc,
            CustomerDtoDoc,
            ResponseDtoDoc,
            ErrorResponseDoc,
            ContactInfoDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "accounts"),
        (name = "info")
    )
)]
pub struct ApiDoc;
