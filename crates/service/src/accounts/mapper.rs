//! Conversions between persistence rows, domain records and DTOs.

use models::accounts::AccountType;

use super::domain::{Account, AccountsDto, Customer, CustomerDto};
use super::errors::AccountsError;

impl From<models::customer::Model> for Customer {
    fn from(m: models::customer::Model) -> Self {
        Customer { customer_id: m.customer_id, name: m.name, email: m.email, mobile_number: m.mobile_number }
    }
}

impl From<models::accounts::Model> for Account {
    fn from(m: models::accounts::Model) -> Self {
        Account {
            account_number: m.account_number,
            customer_id: m.customer_id,
            account_type: m.account_type,
            branch_address: m.branch_address,
        }
    }
}

pub fn to_accounts_dto(account: &Account) -> AccountsDto {
    AccountsDto {
        account_number: account.account_number,
        account_type: account.account_type.to_string(),
        branch_address: account.branch_address.clone(),
    }
}

pub fn to_customer_dto(customer: &Customer, account: Option<&Account>) -> CustomerDto {
    CustomerDto {
        name: customer.name.clone(),
        email: customer.email.clone(),
        mobile_number: customer.mobile_number.clone(),
        accounts_dto: account.map(to_accounts_dto),
    }
}

/// Copy the mutable account fields from the DTO. The account number is never changed.
pub fn apply_accounts_dto(dto: &AccountsDto, account: &mut Account) -> Result<(), AccountsError> {
    account.account_type = dto.account_type.parse::<AccountType>()?;
    account.branch_address = dto.branch_address.trim().to_string();
    Ok(())
}

pub fn apply_customer_dto(dto: &CustomerDto, customer: &mut Customer) {
    customer.name = dto.name.trim().to_string();
    customer.email = dto.email.trim().to_string();
    customer.mobile_number = dto.mobile_number.clone();
}
