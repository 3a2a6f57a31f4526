use async_trait::async_trait;

use super::domain::{Account, Customer, NewCustomer};
use super::errors::AccountsError;

/// Repository abstraction for customer and account persistence.
#[async_trait]
pub trait AccountsRepository: Send + Sync {
    async fn find_customer_by_mobile(&self, mobile_number: &str) -> Result<Option<Customer>, AccountsError>;
    async fn find_customer_by_id(&self, customer_id: i64) -> Result<Option<Customer>, AccountsError>;
    async fn create_customer(&self, input: NewCustomer) -> Result<Customer, AccountsError>;
    async fn update_customer(&self, customer: &Customer) -> Result<Customer, AccountsError>;
    async fn delete_customer(&self, customer_id: i64) -> Result<(), AccountsError>;

    async fn find_account_by_number(&self, account_number: i64) -> Result<Option<Account>, AccountsError>;
    async fn find_account_by_customer_id(&self, customer_id: i64) -> Result<Option<Account>, AccountsError>;
    async fn create_account(&self, account: &Account) -> Result<Account, AccountsError>;
    async fn update_account(&self, account: &Account) -> Result<Account, AccountsError>;
    async fn delete_accounts_by_customer_id(&self, customer_id: i64) -> Result<u64, AccountsError>;
}

/// Simple in-memory mock repository for tests and doc examples.
///
/// Every trait call is counted under its method name, so tests can assert
/// which reads and writes a workflow performed.
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Tables {
        customers: BTreeMap<i64, Customer>, // key: customer_id
        accounts: BTreeMap<i64, Account>,   // key: account_number
        next_customer_id: i64,
    }

    #[derive(Default)]
    pub struct MockAccountsRepository {
        tables: Mutex<Tables>,
        calls: Mutex<HashMap<&'static str, usize>>,
    }

    impl MockAccountsRepository {
        /// Number of times `op` (a trait method name) was invoked.
        pub fn calls(&self, op: &str) -> usize {
            self.calls.lock().unwrap().get(op).copied().unwrap_or(0)
        }

        pub fn customer_count(&self) -> usize {
            self.tables.lock().unwrap().customers.len()
        }

        pub fn account_count(&self) -> usize {
            self.tables.lock().unwrap().accounts.len()
        }

        /// Store a customer row as-is, bypassing the trait (no call is counted).
        pub fn insert_customer(&self, customer: Customer) {
            let mut t = self.tables.lock().unwrap();
            t.next_customer_id = t.next_customer_id.max(customer.customer_id);
            t.customers.insert(customer.customer_id, customer);
        }

        /// Store an account row as-is; its `customer_id` is not checked.
        pub fn insert_account(&self, account: Account) {
            self.tables.lock().unwrap().accounts.insert(account.account_number, account);
        }

        fn hit(&self, op: &'static str) {
            *self.calls.lock().unwrap().entry(op).or_default() += 1;
        }
    }

    #[async_trait]
    impl AccountsRepository for MockAccountsRepository {
        async fn find_customer_by_mobile(&self, mobile_number: &str) -> Result<Option<Customer>, AccountsError> {
            self.hit("find_customer_by_mobile");
            let t = self.tables.lock().unwrap();
            Ok(t.customers.values().find(|c| c.mobile_number == mobile_number).cloned())
        }

        async fn find_customer_by_id(&self, customer_id: i64) -> Result<Option<Customer>, AccountsError> {
            self.hit("find_customer_by_id");
            Ok(self.tables.lock().unwrap().customers.get(&customer_id).cloned())
        }

        async fn create_customer(&self, input: NewCustomer) -> Result<Customer, AccountsError> {
            self.hit("create_customer");
            let mut t = self.tables.lock().unwrap();
            if t.customers.values().any(|c| c.mobile_number == input.mobile_number) {
                return Err(AccountsError::Conflict("mobile_number already exists".into()));
            }
            t.next_customer_id += 1;
            let customer = Customer {
                customer_id: t.next_customer_id,
                name: input.name,
                email: input.email,
                mobile_number: input.mobile_number,
            };
            t.customers.insert(customer.customer_id, customer.clone());
            Ok(customer)
        }

        async fn update_customer(&self, customer: &Customer) -> Result<Customer, AccountsError> {
            self.hit("update_customer");
            let mut t = self.tables.lock().unwrap();
            if t.customers
                .values()
                .any(|c| c.mobile_number == customer.mobile_number && c.customer_id != customer.customer_id)
            {
                return Err(AccountsError::Conflict("mobile_number already exists".into()));
            }
            match t.customers.get_mut(&customer.customer_id) {
                Some(slot) => {
                    *slot = customer.clone();
                    Ok(customer.clone())
                }
                None => Err(AccountsError::not_found("Customer", "CustomerID", customer.customer_id)),
            }
        }

        async fn delete_customer(&self, customer_id: i64) -> Result<(), AccountsError> {
            self.hit("delete_customer");
            let mut t = self.tables.lock().unwrap();
            t.customers.remove(&customer_id);
            t.accounts.retain(|_, a| a.customer_id != customer_id);
            Ok(())
        }

        async fn find_account_by_number(&self, account_number: i64) -> Result<Option<Account>, AccountsError> {
            self.hit("find_account_by_number");
            Ok(self.tables.lock().unwrap().accounts.get(&account_number).cloned())
        }

        async fn find_account_by_customer_id(&self, customer_id: i64) -> Result<Option<Account>, AccountsError> {
            self.hit("find_account_by_customer_id");
            let t = self.tables.lock().unwrap();
            Ok(t.accounts.values().find(|a| a.customer_id == customer_id).cloned())
        }

        async fn create_account(&self, account: &Account) -> Result<Account, AccountsError> {
            self.hit("create_account");
            let mut t = self.tables.lock().unwrap();
            if t.accounts.contains_key(&account.account_number) {
                return Err(AccountsError::Conflict("account_number already exists".into()));
            }
            t.accounts.insert(account.account_number, account.clone());
            Ok(account.clone())
        }

        async fn update_account(&self, account: &Account) -> Result<Account, AccountsError> {
            self.hit("update_account");
            let mut t = self.tables.lock().unwrap();
            match t.accounts.get_mut(&account.account_number) {
                Some(slot) => {
                    *slot = account.clone();
                    Ok(account.clone())
                }
                None => Err(AccountsError::not_found("Account", "AccountNumber", account.account_number)),
            }
        }

        async fn delete_accounts_by_customer_id(&self, customer_id: i64) -> Result<u64, AccountsError> {
            self.hit("delete_accounts_by_customer_id");
            let mut t = self.tables.lock().unwrap();
            let before = t.accounts.len();
            t.accounts.retain(|_, a| a.customer_id != customer_id);
            Ok((before - t.accounts.len()) as u64)
        }
    }
}
