//! Merchant-configured discount rules.
//!
//! Rules are stored by the admin app as JSON lists in two shop metafields and
//! are read here on a best-effort basis: a missing or unparsable list is the
//! same as an empty one.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::ConfigError;
use crate::log;
use crate::scalars::*;

/// How the buyer receives the order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    Pickup,
    Shipping,
}

impl DeliveryType {
    /// Parses the value written to the cart's delivery type attribute.
    /// Anything other than `pickup` or `shipping` is not a selection.
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pickup" => Some(Self::Pickup),
            "shipping" => Some(Self::Shipping),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Shipping => "shipping",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    Percentage,
    Fixed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRule {
    #[serde(default)]
    pub id: ID,
    #[serde(default)]
    pub name: String,
    /// Kept as written by the admin UI; see [`DeliveryRule::delivery_type`].
    #[serde(rename = "type")]
    pub method_type: String,
    #[serde(default)]
    pub enabled: Boolean,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub discount_value: Float,
}

impl DeliveryRule {
    pub fn delivery_type(&self) -> Option<DeliveryType> {
        DeliveryType::from_attribute(&self.method_type)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerTagRule {
    #[serde(default)]
    pub id: ID,
    pub customer_tag: String,
    pub discount_percentage: Float,
    #[serde(default)]
    pub discount_name: String,
    #[serde(default)]
    pub enabled: Boolean,
}

impl CustomerTagRule {
    /// Case-insensitive match against any of the customer's tags.
    pub fn matches<'t>(&self, mut tags: impl Iterator<Item = &'t str>) -> bool {
        let wanted = self.customer_tag.trim().to_lowercase();
        tags.any(|tag| tag.trim().to_lowercase() == wanted)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSet {
    pub delivery_rules: Vec<DeliveryRule>,
    pub tag_rules: Vec<CustomerTagRule>,
}

impl RuleSet {
    /// Loads both rule lists from their raw metafield values. Each list is
    /// loaded independently, so a broken tag rule list does not disable the
    /// pickup discount.
    pub fn from_metafields(delivery_rules: Option<&str>, tag_rules: Option<&str>) -> Self {
        Self {
            delivery_rules: load_rules("delivery", delivery_rules),
            tag_rules: load_rules("customer tag", tag_rules),
        }
    }

    /// The first enabled rule for in-store pickup.
    pub fn pickup_rule(&self) -> Option<&DeliveryRule> {
        self.delivery_rules
            .iter()
            .find(|rule| rule.enabled && rule.delivery_type() == Some(DeliveryType::Pickup))
    }

    /// The enabled tag rule with the strictly greatest percentage among those
    /// matching `tags`. Ties keep the rule listed first.
    pub fn best_tag_rule<'t>(
        &self,
        tags: impl Iterator<Item = &'t str> + Clone,
    ) -> Option<&CustomerTagRule> {
        let mut best: Option<&CustomerTagRule> = None;
        for rule in self.tag_rules.iter().filter(|rule| rule.enabled) {
            if !rule.matches(tags.clone()) {
                continue;
            }
            match best {
                Some(current) if rule.discount_percentage <= current.discount_percentage => {}
                _ => best = Some(rule),
            }
        }
        best
    }
}

/// Parses a JSON list of rules. An absent or blank blob is
/// [`ConfigError::Missing`].
pub fn parse_rules<T: DeserializeOwned>(blob: Option<&str>) -> Result<Vec<T>, ConfigError> {
    let blob = blob
        .filter(|blob| !blob.trim().is_empty())
        .ok_or(ConfigError::Missing)?;
    Ok(serde_json::from_str(blob)?)
}

fn load_rules<T: DeserializeOwned>(kind: &str, blob: Option<&str>) -> Vec<T> {
    match parse_rules(blob) {
        Ok(rules) => rules,
        Err(ConfigError::Missing) => vec![],
        Err(err) => {
            log!("Ignoring {kind} rules: {err}");
            vec![]
        }
    }
}
