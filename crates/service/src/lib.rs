//! Service layer for customer accounts.
//! - Business rules (uniqueness by mobile number, existence checks) live here.
//! - Persistence sits behind the `AccountsRepository` trait; entities and
//!   row-level validation come from the `models` crate.

pub mod accounts;
#[cfg(test)]
pub mod test_support;
