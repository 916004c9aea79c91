use serde::{Deserialize, Serialize};

use crate::calculator::DiscountScope;
use crate::classifier::DeliveryClassifier;
use crate::log;

/// Where the selected delivery type is read from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliverySignal {
    /// The cart attribute maintained by the checkout delivery tracker.
    #[default]
    CartAttribute,
    /// Classify the option selected in the cart's delivery groups.
    DeliveryGroups,
}

/// The discount a deployment emits.
///
/// The host applies a single discount per function result, and a product
/// discount cannot carry order subtotal targets. The customer and pickup
/// discounts therefore run as two deployments of the same binary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscountRole {
    /// The override or tag rule percentage.
    Customer,
    /// The compounded pickup amount on the order subtotal.
    #[default]
    Pickup,
}

/// Per-deployment settings, stored as JSON on the discount node's metafield.
///
/// Every field is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunctionConfig {
    pub delivery_signal: DeliverySignal,
    pub discount: DiscountRole,
    pub customer_scope: DiscountScope,
    pub customer_label: String,
    pub pickup_label: String,
    pub pickup_keywords: Vec<String>,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            delivery_signal: DeliverySignal::default(),
            discount: DiscountRole::default(),
            customer_scope: DiscountScope::LineItems,
            customer_label: "Korting".to_string(),
            pickup_label: "Pickup Korting".to_string(),
            pickup_keywords: vec![],
        }
    }
}

impl FunctionConfig {
    pub fn classifier(&self) -> DeliveryClassifier {
        DeliveryClassifier::new(&self.pickup_keywords)
    }
}

/// Parses a configuration blob, falling back to the defaults when it is
/// absent or unreadable.
pub fn parse_config<'a, T: Default + Deserialize<'a>>(config: Option<&'a str>) -> T {
    match config.filter(|config| !config.trim().is_empty()) {
        None => T::default(),
        Some(config) => serde_json::from_str(config).unwrap_or_else(|err| {
            log!("Using default configuration: {err}");
            T::default()
        }),
    }
}
