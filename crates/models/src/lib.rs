pub mod errors;
pub mod db;
pub mod customer;
pub mod accounts;

#[cfg(test)]
mod tests;
