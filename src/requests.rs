//! Purchase requests
//!
//! Turns a customer's shopping list, e.g. `3 coffeecup, spork, 2 vase`, into
//! [`PurchaseRequest`]s. Each comma separated entry is an optional quantity followed by the item
//! name. A missing quantity means one unit.

use regex::Regex;
use smallvec::SmallVec;
use thiserror::Error;

/// Errors produced while reading a shopping list.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The quantity in front of an item was zero or too large.
    #[error("Sorry, {quantity} is not a quantity of {item} we can sell.")]
    InvalidQuantity {
        /// Quantity as typed by the customer
        quantity: String,
        /// Item the quantity was given for
        item: String,
    },

    /// The entry pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

/// A request for `quantity` units of the product named `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    /// Item name as typed by the customer, trimmed
    pub key: String,

    /// Units requested, at least one
    pub quantity: u32,
}

/// Parsed entries of one shopping list, in the order they were written.
pub type PurchaseRequests = SmallVec<[Result<PurchaseRequest, RequestError>; 4]>;

/// Shopping list parser
#[derive(Debug, Clone)]
pub struct RequestParser {
    entry: Regex,
}

impl RequestParser {
    /// Create a new parser.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Pattern`] if the entry pattern can't be compiled.
    pub fn new() -> Result<Self, RequestError> {
        Ok(Self {
            entry: Regex::new(r"^\s*([0-9]*)\s*(.*?)\s*$")?,
        })
    }

    /// Parse every entry of a shopping list.
    ///
    /// Blank entries are skipped. An entry with a bad quantity yields an error in its place
    /// without affecting the others.
    pub fn parse(&self, line: &str) -> PurchaseRequests {
        line.split(',')
            .filter_map(|entry| self.parse_entry(entry))
            .collect()
    }

    fn parse_entry(&self, entry: &str) -> Option<Result<PurchaseRequest, RequestError>> {
        let captures = self.entry.captures(entry)?;

        let quantity = captures.get(1).map_or("", |m| m.as_str());
        let item = captures.get(2).map_or("", |m| m.as_str());

        if item.is_empty() {
            return None;
        }

        if quantity.is_empty() {
            return Some(Ok(PurchaseRequest {
                key: item.to_string(),
                quantity: 1,
            }));
        }

        let request = match quantity.parse::<u32>() {
            Ok(parsed) if parsed > 0 => Ok(PurchaseRequest {
                key: item.to_string(),
                quantity: parsed,
            }),
            _ => Err(RequestError::InvalidQuantity {
                quantity: quantity.to_string(),
                item: item.to_string(),
            }),
        };

        Some(request)
    }
}
