//! Boutique
//!
//! Boutique is a point-of-sale simulator for a small second hand shop: a catalog of products,
//! a checkout that sells them against stock, and receipts describing each sale.

pub mod catalog;
pub mod checkout;
pub mod discounts;
pub mod fixtures;
pub mod logging;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod requests;
pub mod session;
