//! Boutique prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError, normalize_key},
    checkout::Checkout,
    discounts::DiscountError,
    fixtures::{FixtureError, Shop},
    pricing::PricingError,
    logging::{LogFormat, LoggingError},
    products::{MAX_PRICE, Pricing, Product, ProductError, ProductKey, StockError},
    receipt::{Outcome, Receipt},
    requests::{PurchaseRequest, RequestError, RequestParser},
    session::{Action, Session, SessionError, UnknownAction},
};
