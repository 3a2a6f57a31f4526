use sea_orm::{DatabaseConnection, EntityTrait};

use crate::accounts::domain::{Account, Customer, NewCustomer};
use crate::accounts::errors::AccountsError;
use crate::accounts::repository::AccountsRepository;

/// Postgres-backed repository; `auditor` is written to the audit columns.
pub struct SeaOrmAccountsRepository {
    pub db: DatabaseConnection,
    pub auditor: String,
}

impl SeaOrmAccountsRepository {
    pub fn new(db: DatabaseConnection, auditor: impl Into<String>) -> Self {
        Self { db, auditor: auditor.into() }
    }
}

fn db_err(e: sea_orm::DbErr) -> AccountsError {
    AccountsError::Repository(e.to_string())
}

#[async_trait::async_trait]
impl AccountsRepository for SeaOrmAccountsRepository {
    async fn find_customer_by_mobile(&self, mobile_number: &str) -> Result<Option<Customer>, AccountsError> {
        let res = models::customer::find_by_mobile_number(&self.db, mobile_number).await?;
        Ok(res.map(Customer::from))
    }

    async fn find_customer_by_id(&self, customer_id: i64) -> Result<Option<Customer>, AccountsError> {
        let res = models::customer::Entity::find_by_id(customer_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(res.map(Customer::from))
    }

    async fn create_customer(&self, input: NewCustomer) -> Result<Customer, AccountsError> {
        let created = models::customer::create(&self.db, &input.name, &input.email, &input.mobile_number, &self.auditor).await?;
        Ok(created.into())
    }

    async fn update_customer(&self, customer: &Customer) -> Result<Customer, AccountsError> {
        let updated = models::customer::update_details(
            &self.db,
            customer.customer_id,
            &customer.name,
            &customer.email,
            &customer.mobile_number,
            &self.auditor,
        )
        .await?;
        Ok(updated.into())
    }

    async fn delete_customer(&self, customer_id: i64) -> Result<(), AccountsError> {
        models::customer::delete_by_id(&self.db, customer_id).await?;
        Ok(())
    }

    async fn find_account_by_number(&self, account_number: i64) -> Result<Option<Account>, AccountsError> {
        let res = models::accounts::Entity::find_by_id(account_number)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(res.map(Account::from))
    }

    async fn find_account_by_customer_id(&self, customer_id: i64) -> Result<Option<Account>, AccountsError> {
        let res = models::accounts::find_by_customer_id(&self.db, customer_id).await?;
        Ok(res.map(Account::from))
    }

    async fn create_account(&self, account: &Account) -> Result<Account, AccountsError> {
        let created = models::accounts::create(
            &self.db,
            account.customer_id,
            account.account_number,
            account.account_type,
            &account.branch_address,
            &self.auditor,
        )
        .await?;
        Ok(created.into())
    }

    async fn update_account(&self, account: &Account) -> Result<Account, AccountsError> {
        let updated = models::accounts::update_details(
            &self.db,
            account.account_number,
            account.account_type,
            &account.branch_address,
            &self.auditor,
        )
        .await?;
        Ok(updated.into())
    }

    async fn delete_accounts_by_customer_id(&self, customer_id: i64) -> Result<u64, AccountsError> {
        Ok(models::accounts::delete_by_customer_id(&self.db, customer_id).await?)
    }
}
