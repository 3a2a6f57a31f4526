use std::sync::Arc;

use models::accounts::{generate_account_number, validate_account_number, validate_branch_address, AccountType};
use models::customer::{validate_email, validate_mobile_number, validate_name};
use tracing::{debug, info, instrument};

use super::domain::{Account, AccountsDto, CustomerDto, NewCustomer};
use super::errors::AccountsError;
use super::mapper;
use super::repository::AccountsRepository;

/// Accounts service configuration
#[derive(Clone, Debug)]
pub struct AccountsServiceConfig {
    /// Branch assigned to every newly opened account.
    pub branch_address: String,
}

impl Default for AccountsServiceConfig {
    fn default() -> Self {
        Self { branch_address: "123 Main Street, New York".into() }
    }
}

/// Account business service independent of web framework
pub struct AccountsService<R: AccountsRepository + ?Sized> {
    repo: Arc<R>,
    cfg: AccountsServiceConfig,
}

impl<R: AccountsRepository + ?Sized> AccountsService<R> {
    pub fn new(repo: Arc<R>, cfg: AccountsServiceConfig) -> Self { Self { repo, cfg } }

    /// Open a savings account for a customer not yet known by mobile number.
    ///
    /// Returns the stored customer with its generated account.
    ///
    /// # Examples
    /// ```
    /// use service::accounts::{AccountsService, AccountsServiceConfig, repository::mock::MockAccountsRepository};
    /// use service::accounts::domain::CustomerDto;
    /// use std::sync::Arc;
    /// let svc = AccountsService::new(Arc::new(MockAccountsRepository::default()), AccountsServiceConfig::default());
    /// let input = CustomerDto { name: "Hemant".into(), email: "hemantraghav@gmail.com".into(), mobile_number: "9278091701".into(), accounts_dto: None };
    /// let created = tokio_test::block_on(svc.create_account(input)).unwrap();
    /// assert_eq!(created.accounts_dto.unwrap().account_type, "Savings");
    /// ```
    #[instrument(skip(self, input), fields(mobile_number = %input.mobile_number))]
    pub async fn create_account(&self, input: CustomerDto) -> Result<CustomerDto, AccountsError> {
        validate_customer_fields(&input)?;
        if let Some(existing) = self.repo.find_customer_by_mobile(&input.mobile_number).await? {
            debug!(customer_id = existing.customer_id, "customer exists");
            return Err(AccountsError::Conflict(format!(
                "Customer already registered with given mobileNumber {}",
                input.mobile_number
            )));
        }

        let customer = self
            .repo
            .create_customer(NewCustomer {
                name: input.name.trim().to_string(),
                email: input.email.trim().to_string(),
                mobile_number: input.mobile_number.clone(),
            })
            .await?;
        let account = self
            .repo
            .create_account(&Account {
                account_number: generate_account_number(),
                customer_id: customer.customer_id,
                account_type: AccountType::Savings,
                branch_address: self.cfg.branch_address.clone(),
            })
            .await?;
        info!(customer_id = customer.customer_id, account_number = account.account_number, "account_created");
        Ok(mapper::to_customer_dto(&customer, Some(&account)))
    }

    /// Customer and account details for a mobile number.
    ///
    /// # Examples
    /// ```
    /// use service::accounts::{AccountsService, AccountsServiceConfig, repository::mock::MockAccountsRepository};
    /// use service::accounts::errors::AccountsError;
    /// use std::sync::Arc;
    /// let svc = AccountsService::new(Arc::new(MockAccountsRepository::default()), AccountsServiceConfig::default());
    /// let err = tokio_test::block_on(svc.fetch_account("9278091701")).unwrap_err();
    /// assert!(matches!(err, AccountsError::NotFound { .. }));
    /// ```
    #[instrument(skip(self))]
    pub async fn fetch_account(&self, mobile_number: &str) -> Result<CustomerDto, AccountsError> {
        validate_mobile_number(mobile_number)?;
        let customer = self
            .repo
            .find_customer_by_mobile(mobile_number)
            .await?
            .ok_or_else(|| AccountsError::not_found("Customer", "mobileNumber", mobile_number))?;
        let account = self
            .repo
            .find_account_by_customer_id(customer.customer_id)
            .await?
            .ok_or_else(|| AccountsError::not_found("Account", "customerId", customer.customer_id))?;
        Ok(mapper::to_customer_dto(&customer, Some(&account)))
    }

    /// Update account type/branch and the owning customer's details.
    ///
    /// Customer fields are validated first. `Ok(false)` means the request
    /// carried no account section, so nothing changed.
    #[instrument(skip(self, input), fields(mobile_number = %input.mobile_number))]
    pub async fn update_account(&self, input: CustomerDto) -> Result<bool, AccountsError> {
        validate_customer_fields(&input)?;
        let Some(accounts_dto) = input.accounts_dto.as_ref() else {
            debug!("no account section in update request");
            return Ok(false);
        };
        validate_accounts_fields(accounts_dto)?;

        let mut account = self
            .repo
            .find_account_by_number(accounts_dto.account_number)
            .await?
            .ok_or_else(|| AccountsError::not_found("Account", "AccountNumber", accounts_dto.account_number))?;
        mapper::apply_accounts_dto(accounts_dto, &mut account)?;
        let account = self.repo.update_account(&account).await?;

        let mut customer = self
            .repo
            .find_customer_by_id(account.customer_id)
            .await?
            .ok_or_else(|| AccountsError::not_found("Customer", "CustomerID", account.customer_id))?;
        mapper::apply_customer_dto(&input, &mut customer);
        self.repo.update_customer(&customer).await?;

        info!(customer_id = customer.customer_id, account_number = account.account_number, "account_updated");
        Ok(true)
    }

    /// Remove the customer identified by mobile number together with its account.
    #[instrument(skip(self))]
    pub async fn delete_account(&self, mobile_number: &str) -> Result<bool, AccountsError> {
        validate_mobile_number(mobile_number)?;
        let customer = self
            .repo
            .find_customer_by_mobile(mobile_number)
            .await?
            .ok_or_else(|| AccountsError::not_found("Customer", "mobileNumber", mobile_number))?;
        let removed = self.repo.delete_accounts_by_customer_id(customer.customer_id).await?;
        self.repo.delete_customer(customer.customer_id).await?;
        info!(customer_id = customer.customer_id, accounts_removed = removed, "account_deleted");
        Ok(true)
    }
}

fn validate_customer_fields(input: &CustomerDto) -> Result<(), AccountsError> {
    validate_name(&input.name)?;
    validate_email(&input.email)?;
    validate_mobile_number(&input.mobile_number)?;
    Ok(())
}

fn validate_accounts_fields(input: &AccountsDto) -> Result<(), AccountsError> {
    validate_account_number(input.account_number)?;
    validate_branch_address(&input.branch_address)?;
    input.account_type.parse::<AccountType>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::domain::Customer;
    use crate::accounts::repository::mock::MockAccountsRepository;

    fn customer_dto() -> CustomerDto {
        CustomerDto {
            name: "Hemant".into(),
            email: "hemantraghav@gmail.com".into(),
            mobile_number: "9278091701".into(),
            accounts_dto: None,
        }
    }

    fn setup() -> (Arc<MockAccountsRepository>, AccountsService<MockAccountsRepository>) {
        let repo = Arc::new(MockAccountsRepository::default());
        let svc = AccountsService::new(
            repo.clone(),
            AccountsServiceConfig { branch_address: "Bank of Delhi, Connaught place, New Delhi".into() },
        );
        (repo, svc)
    }

    #[tokio::test]
    async fn create_account_for_new_customer() {
        let (repo, svc) = setup();
        let created = svc.create_account(customer_dto()).await.unwrap();

        assert_eq!(repo.calls("create_customer"), 1);
        assert_eq!(repo.calls("create_account"), 1);
        let acc = created.accounts_dto.unwrap();
        assert_eq!(acc.account_type, "Savings");
        assert_eq!(acc.branch_address, "Bank of Delhi, Connaught place, New Delhi");
        assert_eq!(acc.account_number.to_string().len(), 10);
    }

    #[tokio::test]
    async fn create_account_conflict_writes_nothing() {
        let (repo, svc) = setup();
        svc.create_account(customer_dto()).await.unwrap();

        let err = svc.create_account(customer_dto()).await.unwrap_err();
        assert!(matches!(err, AccountsError::Conflict(_)));
        assert_eq!(err.to_string(), "Customer already registered with given mobileNumber 9278091701");
        assert_eq!(repo.calls("find_customer_by_mobile"), 2);
        assert_eq!(repo.calls("create_customer"), 1);
        assert_eq!(repo.calls("create_account"), 1);
    }

    #[tokio::test]
    async fn create_account_rejects_invalid_input_before_lookup() {
        let (repo, svc) = setup();
        let mut input = customer_dto();
        input.mobile_number = "12345".into();
        let err = svc.create_account(input).await.unwrap_err();
        assert!(matches!(err, AccountsError::Validation(_)));
        assert_eq!(repo.calls("find_customer_by_mobile"), 0);
    }

    #[tokio::test]
    async fn fetch_account_is_repeatable() {
        let (_repo, svc) = setup();
        let created = svc.create_account(customer_dto()).await.unwrap();

        let first = svc.fetch_account("9278091701").await.unwrap();
        let second = svc.fetch_account("9278091701").await.unwrap();
        assert_eq!(first, created);
        assert_eq!(first, second);
        assert_eq!(first.name, "Hemant");
    }

    #[tokio::test]
    async fn fetch_account_unknown_mobile_skips_account_lookup() {
        let (repo, svc) = setup();
        let err = svc.fetch_account("1234567890").await.unwrap_err();
        assert!(matches!(err, AccountsError::NotFound { resource: "Customer", .. }));
        assert_eq!(repo.calls("find_customer_by_mobile"), 1);
        assert_eq!(repo.calls("find_account_by_customer_id"), 0);
    }

    #[tokio::test]
    async fn update_account_persists_changes() {
        let (repo, svc) = setup();
        let created = svc.create_account(customer_dto()).await.unwrap();
        let number = created.accounts_dto.unwrap().account_number;

        let mut input = customer_dto();
        input.email = "hemant.new@gmail.com".into();
        input.accounts_dto = Some(AccountsDto { account_number: number, account_type: "CURRENT".into(), branch_address: "New Address".into() });
        assert!(svc.update_account(input).await.unwrap());
        assert_eq!(repo.calls("update_account"), 1);
        assert_eq!(repo.calls("update_customer"), 1);

        let fetched = svc.fetch_account("9278091701").await.unwrap();
        assert_eq!(fetched.email, "hemant.new@gmail.com");
        let acc = fetched.accounts_dto.unwrap();
        assert_eq!(acc.account_type, "Current");
        assert_eq!(acc.branch_address, "New Address");
        assert_eq!(acc.account_number, number);
    }

    #[tokio::test]
    async fn update_account_unknown_number_not_found() {
        let (repo, svc) = setup();
        let mut input = customer_dto();
        input.accounts_dto = Some(AccountsDto { account_number: 1000000000, account_type: "CURRENT".into(), branch_address: "New Address".into() });
        let err = svc.update_account(input).await.unwrap_err();
        assert!(matches!(err, AccountsError::NotFound { resource: "Account", .. }));
        assert_eq!(repo.calls("find_account_by_number"), 1);
        assert_eq!(repo.calls("update_customer"), 0);
    }

    #[tokio::test]
    async fn update_without_account_section_is_noop() {
        let (repo, svc) = setup();
        assert!(!svc.update_account(customer_dto()).await.unwrap());
        assert_eq!(repo.calls("find_account_by_number"), 0);
    }

    #[tokio::test]
    async fn update_validates_customer_even_without_account_section() {
        let (repo, svc) = setup();
        let input = CustomerDto { name: "Ab".into(), email: "not-an-email".into(), mobile_number: "12".into(), accounts_dto: None };
        let err = svc.update_account(input).await.unwrap_err();
        assert!(matches!(err, AccountsError::Validation(_)));
        assert_eq!(repo.calls("find_account_by_number"), 0);
    }

    #[tokio::test]
    async fn fetch_account_customer_without_account_not_found() {
        let (repo, svc) = setup();
        repo.insert_customer(Customer {
            customer_id: 7,
            name: "Hemant".into(),
            email: "hemantraghav@gmail.com".into(),
            mobile_number: "9278091701".into(),
        });

        let err = svc.fetch_account("9278091701").await.unwrap_err();
        assert!(matches!(err, AccountsError::NotFound { resource: "Account", field: "customerId", .. }));
        assert_eq!(err.to_string(), "Account not found with the given input data customerId : '7'");
    }

    #[tokio::test]
    async fn update_account_orphaned_account_not_found() {
        let (repo, svc) = setup();
        repo.insert_account(Account {
            account_number: 1234567890,
            customer_id: 42,
            account_type: AccountType::Savings,
            branch_address: "Delhi".into(),
        });

        let mut input = customer_dto();
        input.accounts_dto = Some(AccountsDto { account_number: 1234567890, account_type: "Savings".into(), branch_address: "Delhi".into() });
        let err = svc.update_account(input).await.unwrap_err();
        assert!(matches!(err, AccountsError::NotFound { resource: "Customer", field: "CustomerID", .. }));
        assert_eq!(err.to_string(), "Customer not found with the given input data CustomerID : '42'");
        assert_eq!(repo.calls("update_customer"), 0);
    }

    #[tokio::test]
    async fn update_to_taken_mobile_number_is_conflict() {
        let (repo, svc) = setup();
        let first = svc.create_account(customer_dto()).await.unwrap();
        let mut other = customer_dto();
        other.mobile_number = "9278091702".into();
        svc.create_account(other).await.unwrap();

        let mut input = customer_dto();
        input.mobile_number = "9278091702".into();
        input.accounts_dto = first.accounts_dto;
        let err = svc.update_account(input).await.unwrap_err();
        assert!(matches!(err, AccountsError::Conflict(_)));
        assert_eq!(repo.calls("update_customer"), 1);
        assert_eq!(svc.fetch_account("9278091701").await.unwrap().name, "Hemant");
    }

    #[tokio::test]
    async fn delete_account_removes_customer_and_account() {
        let (repo, svc) = setup();
        svc.create_account(customer_dto()).await.unwrap();

        assert!(svc.delete_account("9278091701").await.unwrap());
        assert_eq!(repo.calls("delete_accounts_by_customer_id"), 1);
        assert_eq!(repo.calls("delete_customer"), 1);
        assert_eq!(repo.customer_count(), 0);
        assert_eq!(repo.account_count(), 0);
        assert!(svc.fetch_account("9278091701").await.is_err());
    }

    #[tokio::test]
    async fn delete_account_unknown_mobile_deletes_nothing() {
        let (repo, svc) = setup();
        let err = svc.delete_account("1234567890").await.unwrap_err();
        assert!(matches!(err, AccountsError::NotFound { .. }));
        assert_eq!(repo.calls("delete_accounts_by_customer_id"), 0);
        assert_eq!(repo.calls("delete_customer"), 0);
    }
}
