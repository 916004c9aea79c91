use std::collections::BTreeSet;

use crate::error::ConfigError;
use crate::rules::DeliveryType;
use crate::scalars::*;

/// A signed-in buyer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomerContext {
    pub id: ID,
    /// Active tags, lowercased.
    pub tags: BTreeSet<String>,
    /// Percentage stored directly on the customer, if any.
    pub override_percent: Option<Float>,
}

impl CustomerContext {
    pub fn new<I, S>(id: impl Into<ID>, tags: I, override_percent: Option<Float>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            id: id.into(),
            tags: tags
                .into_iter()
                .map(|tag| tag.as_ref().trim().to_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
            override_percent,
        }
    }

    /// Customers without an id are treated as guests.
    pub fn is_authenticated(&self) -> bool {
        !self.id.trim().is_empty()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> + Clone {
        self.tags.iter().map(String::as_str)
    }
}

/// Everything the calculator needs to know about one cart evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckoutContext {
    pub selected_delivery_type: Option<DeliveryType>,
    /// `None` for guest checkouts.
    pub customer: Option<CustomerContext>,
    pub cart_subtotal: Option<Decimal>,
    /// Product variant ids of the cart lines.
    pub line_targets: Vec<ID>,
    /// The pickup date the buyer picked, if any.
    pub pickup_date: Option<String>,
}

impl CheckoutContext {
    /// The customer, if signed in.
    pub fn authenticated_customer(&self) -> Option<&CustomerContext> {
        self.customer
            .as_ref()
            .filter(|customer| customer.is_authenticated())
    }

    pub fn is_pickup(&self) -> bool {
        self.selected_delivery_type == Some(DeliveryType::Pickup)
    }

    /// Returns the cart subtotal if the cart can be discounted at all.
    pub fn validate(&self) -> Result<Decimal, ConfigError> {
        if self.line_targets.is_empty() {
            return Err(ConfigError::InvalidContext("cart has no product lines"));
        }
        match self.cart_subtotal {
            Some(subtotal) if subtotal.is_finite() && *subtotal >= 0.0 => Ok(subtotal),
            Some(_) => Err(ConfigError::InvalidContext("cart subtotal is not a valid amount")),
            None => Err(ConfigError::InvalidContext("cart subtotal is missing")),
        }
    }
}
