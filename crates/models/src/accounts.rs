use std::fmt;
use std::str::FromStr;

use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::customer;

/// Lowest account number handed out; generated numbers are always 10 digits.
pub const ACCOUNT_NUMBER_BASE: i64 = 1_000_000_000;
const ACCOUNT_NUMBER_SPAN: i64 = 900_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum AccountType {
    #[sea_orm(string_value = "Savings")]
    Savings,
    #[sea_orm(string_value = "Current")]
    Current,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "Savings",
            AccountType::Current => "Current",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for AccountType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "savings" | "saving" => Ok(AccountType::Savings),
            "current" => Ok(AccountType::Current),
            other => Err(ModelError::Validation(format!("unknown account type '{other}', expected Savings or Current"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_number: i64,
    pub customer_id: i64,
    pub account_type: AccountType,
    pub branch_address: String,
    pub created_at: DateTimeWithTimeZone,
    pub created_by: String,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Customer }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::belongs_to(customer::Entity)
                .from(Column::CustomerId)
                .to(customer::Column::CustomerId)
                .into(),
        }
    }
}

impl Related<customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Random 10-digit account number in `[1_000_000_000, 1_900_000_000)`.
pub fn generate_account_number() -> i64 {
    ACCOUNT_NUMBER_BASE + rand::thread_rng().gen_range(0..ACCOUNT_NUMBER_SPAN)
}

pub fn validate_account_number(account_number: i64) -> Result<(), ModelError> {
    if !(ACCOUNT_NUMBER_BASE..=9_999_999_999).contains(&account_number) {
        return Err(ModelError::Validation("AccountNumber must be 10 digits".into()));
    }
    Ok(())
}

pub fn validate_branch_address(branch_address: &str) -> Result<(), ModelError> {
    if branch_address.trim().is_empty() {
        return Err(ModelError::Validation("BranchAddress can not be a null or empty".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    customer_id: i64,
    account_number: i64,
    account_type: AccountType,
    branch_address: &str,
    auditor: &str,
) -> Result<Model, ModelError> {
    validate_account_number(account_number)?;
    validate_branch_address(branch_address)?;
    let am = ActiveModel {
        account_number: Set(account_number),
        customer_id: Set(customer_id),
        account_type: Set(account_type),
        branch_address: Set(branch_address.to_string()),
        created_at: Set(Utc::now().into()),
        created_by: Set(auditor.to_string()),
        updated_at: Set(None),
        updated_by: Set(None),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_customer_id<C: ConnectionTrait>(db: &C, customer_id: i64) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::CustomerId.eq(customer_id))
        .one(db)
        .await?;
    Ok(found)
}

/// Change account type and branch in place and stamp the update audit columns.
pub async fn update_details<C: ConnectionTrait>(
    db: &C,
    account_number: i64,
    account_type: AccountType,
    branch_address: &str,
    auditor: &str,
) -> Result<Model, ModelError> {
    validate_branch_address(branch_address)?;
    let mut found: ActiveModel = Entity::find_by_id(account_number)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::NotFound { entity: "Account", key: "AccountNumber", value: account_number.to_string() })?
        .into();
    found.account_type = Set(account_type);
    found.branch_address = Set(branch_address.to_string());
    found.updated_at = Set(Some(Utc::now().into()));
    found.updated_by = Set(Some(auditor.to_string()));
    Ok(found.update(db).await?)
}

pub async fn delete_by_customer_id<C: ConnectionTrait>(db: &C, customer_id: i64) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::CustomerId.eq(customer_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_numbers_are_ten_digits() {
        for _ in 0..1_000 {
            let n = generate_account_number();
            assert_eq!(n.to_string().len(), 10);
            assert!(validate_account_number(n).is_ok());
        }
    }

    #[test]
    fn account_type_parsing_is_lenient() {
        assert_eq!("SAVINGS".parse::<AccountType>().unwrap(), AccountType::Savings);
        assert_eq!("Saving".parse::<AccountType>().unwrap(), AccountType::Savings);
        assert_eq!(" current ".parse::<AccountType>().unwrap(), AccountType::Current);
        assert!("checking".parse::<AccountType>().is_err());
    }

    #[test]
    fn short_account_number_rejected() {
        assert!(validate_account_number(100).is_err());
        assert!(validate_account_number(11_918_611_911).is_err());
    }
}
