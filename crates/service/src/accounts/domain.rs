use models::accounts::AccountType;
use serde::{Deserialize, Serialize};

/// Account part of the wire representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsDto {
    pub account_number: i64,
    pub account_type: String,
    pub branch_address: String,
}

/// Customer with its account, as exchanged over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts_dto: Option<AccountsDto>,
}

/// Domain customer (business view, audit columns omitted)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub mobile_number: String,
}

/// Input for a customer that has no id yet
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
}

/// Domain account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub account_number: i64,
    pub customer_id: i64,
    pub account_type: AccountType,
    pub branch_address: String,
}
