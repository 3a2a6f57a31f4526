use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::accounts;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    #[sea_orm(unique)]
    pub mobile_number: String,
    pub created_at: DateTimeWithTimeZone,
    pub created_by: String,
    pub updated_at: Option<DateTimeWithTimeZone>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Accounts,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Accounts => Entity::has_many(accounts::Entity).into() }
    }
}

impl Related<accounts::Entity> for Entity {
    fn to() -> RelationDef { Relation::Accounts.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    let len = name.trim().chars().count();
    if !(5..=30).contains(&len) {
        return Err(ModelError::Validation("The length of the customer name should be between 5 and 30".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let invalid = || ModelError::Validation("Email address should be a valid value".into());
    let (local, domain) = email.trim().split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.split_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() && !domain.ends_with('.') => Ok(()),
        _ => Err(invalid()),
    }
}

pub fn validate_mobile_number(mobile_number: &str) -> Result<(), ModelError> {
    if mobile_number.len() != 10 || !mobile_number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModelError::Validation("Mobile number must be 10 digits".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    email: &str,
    mobile_number: &str,
    auditor: &str,
) -> Result<Model, ModelError> {
    validate_name(name)?;
    validate_email(email)?;
    validate_mobile_number(mobile_number)?;
    let am = ActiveModel {
        name: Set(name.trim().to_string()),
        email: Set(email.trim().to_string()),
        mobile_number: Set(mobile_number.to_string()),
        created_at: Set(Utc::now().into()),
        created_by: Set(auditor.to_string()),
        updated_at: Set(None),
        updated_by: Set(None),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_mobile_number<C: ConnectionTrait>(db: &C, mobile_number: &str) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::MobileNumber.eq(mobile_number))
        .one(db)
        .await?;
    Ok(found)
}

/// Overwrite the contact fields of an existing customer and stamp the update audit columns.
pub async fn update_details<C: ConnectionTrait>(
    db: &C,
    customer_id: i64,
    name: &str,
    email: &str,
    mobile_number: &str,
    auditor: &str,
) -> Result<Model, ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(customer_id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::NotFound { entity: "Customer", key: "CustomerID", value: customer_id.to_string() })?
        .into();
    found.name = Set(name.trim().to_string());
    found.email = Set(email.trim().to_string());
    found.mobile_number = Set(mobile_number.to_string());
    found.updated_at = Set(Some(Utc::now().into()));
    found.updated_by = Set(Some(auditor.to_string()));
    Ok(found.update(db).await?)
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, customer_id: i64) -> Result<u64, ModelError> {
    let res = Entity::delete_by_id(customer_id).exec(db).await?;
    Ok(res.rows_affected)
}
