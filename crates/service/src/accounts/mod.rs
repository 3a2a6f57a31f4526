//! Accounts module: three-layer architecture (domain, repository, service).
//!
//! Create, fetch, update and delete of a customer together with its single account.

pub mod domain;
pub mod errors;
pub mod mapper;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{AccountsService, AccountsServiceConfig};
