//! Per-cart delivery tracking for the checkout UI.
//!
//! The checkout extension watches the buyer's delivery selection and mirrors it
//! into a cart attribute, which is what the discount function reads. All state
//! lives in a [`DeliverySession`] owned by one checkout, so two carts can never
//! see each other's last selection.

use serde::{Deserialize, Serialize};

use crate::classifier::DeliveryClassifier;
use crate::input::DeliveryGroup;
use crate::rules::DeliveryType;

pub const DELIVERY_TYPE_ATTRIBUTE: &str = "selected_delivery_type";
pub const PICKUP_DATE_ATTRIBUTE: &str = "pickup_delivery_date";

/// A cart attribute change for the host to apply. An empty value clears the
/// attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AttributeChange {
    UpdateAttribute { key: String, value: String },
}

impl AttributeChange {
    pub fn set(key: &str, value: &str) -> Self {
        Self::UpdateAttribute {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn clear(key: &str) -> Self {
        Self::set(key, "")
    }
}

#[derive(Clone, Debug, Default)]
pub struct DeliverySession {
    classifier: DeliveryClassifier,
    started: bool,
    published: Option<DeliveryType>,
    pickup_date: Option<String>,
}

impl DeliverySession {
    pub fn new(classifier: DeliveryClassifier) -> Self {
        Self {
            classifier,
            started: false,
            published: None,
            pickup_date: None,
        }
    }

    /// The delivery type last written to the cart.
    pub fn published(&self) -> Option<DeliveryType> {
        self.published
    }

    pub fn pickup_date(&self) -> Option<&str> {
        self.pickup_date.as_deref()
    }

    /// Clears a delivery type left on the cart by an earlier checkout. Called
    /// when the checkout loads; [`DeliverySession::observe`] does it on its
    /// first call otherwise.
    pub fn start(&mut self) -> AttributeChange {
        self.started = true;
        self.published = None;
        AttributeChange::clear(DELIVERY_TYPE_ATTRIBUTE)
    }

    /// Reacts to a new set of delivery groups. Returns the attribute changes
    /// needed to keep the cart in sync; nothing when the selection is unchanged
    /// or cannot be resolved yet.
    pub fn observe(&mut self, groups: &[DeliveryGroup]) -> Vec<AttributeChange> {
        let mut changes = vec![];
        if !self.started {
            changes.push(self.start());
        }

        let Some(first) = groups.first() else {
            if self.published.take().is_some() {
                changes.push(AttributeChange::clear(DELIVERY_TYPE_ATTRIBUTE));
            }
            changes.extend(self.clear_pickup_date());
            return changes;
        };

        let Some(option) = first.resolve_selected() else {
            return changes;
        };

        let delivery_type = self.classifier.classify(&option.descriptor());
        if self.published == Some(delivery_type) {
            return changes;
        }

        self.published = Some(delivery_type);
        changes.push(AttributeChange::set(
            DELIVERY_TYPE_ATTRIBUTE,
            delivery_type.as_str(),
        ));
        if delivery_type != DeliveryType::Pickup {
            changes.extend(self.clear_pickup_date());
        }
        changes
    }

    /// Records the buyer's pickup date. Ignored unless pickup is selected.
    pub fn choose_pickup_date(&mut self, date: &str) -> Option<AttributeChange> {
        if self.published != Some(DeliveryType::Pickup) {
            return None;
        }
        let date = date.trim();
        if date.is_empty() || self.pickup_date.as_deref() == Some(date) {
            return None;
        }
        self.pickup_date = Some(date.to_string());
        Some(AttributeChange::set(PICKUP_DATE_ATTRIBUTE, date))
    }

    fn clear_pickup_date(&mut self) -> Option<AttributeChange> {
        self.pickup_date
            .take()
            .map(|_| AttributeChange::clear(PICKUP_DATE_ATTRIBUTE))
    }
}
