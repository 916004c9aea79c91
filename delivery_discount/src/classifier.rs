//! Maps a delivery option offered by the host onto [`DeliveryType`].
//!
//! The structured method type wins when the host provides one. Otherwise the
//! option's title, handle and carrier handle are searched for pickup and
//! shipping keywords. Anything ambiguous is shipping, so a pickup discount is
//! only ever granted for an option that clearly is pickup.

use crate::rules::DeliveryType;

const PICKUP_METHOD_TYPES: &[&str] = &[
    "pickup",
    "pick_up",
    "local",
    "localpickup",
    "local_pickup",
    "pickup_point",
];

const SHIPPING_METHOD_TYPES: &[&str] = &["shipping", "delivery", "local_delivery"];

const PICKUP_KEYWORDS: &[&str] = &[
    "pickup",
    "pick up",
    "pick-up",
    "afhalen",
    "ophalen",
    "abholung",
    "abholen",
    "retrait",
    "mağazadan",
];

/// Only searched for in the carrier service handle, where local pickup
/// carriers are named.
const CARRIER_PICKUP_KEYWORDS: &[&str] = &["local"];

const SHIPPING_KEYWORDS: &[&str] = &[
    "shipping",
    "delivery",
    "verzending",
    "bezorging",
    "versand",
    "standard",
    "express",
    "fedex",
    "ups",
    "dhl",
    "postnl",
    "canada post",
    "purolator",
];

/// The parts of a delivery option the classifier looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OptionDescriptor<'a> {
    pub title: Option<&'a str>,
    pub handle: Option<&'a str>,
    pub method_type: Option<&'a str>,
    pub carrier_service_handle: Option<&'a str>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeliveryClassifier {
    store_keywords: Vec<String>,
}

impl DeliveryClassifier {
    /// `store_keywords` are extra pickup keywords, typically fragments of the
    /// store's name or street that appear in pickup option titles.
    pub fn new<I, S>(store_keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            store_keywords: store_keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }

    pub fn classify(&self, option: &OptionDescriptor<'_>) -> DeliveryType {
        if let Some(delivery_type) = option.method_type.and_then(classify_method_type) {
            return delivery_type;
        }

        let haystacks: Vec<String> = [option.title, option.handle, option.carrier_service_handle]
            .into_iter()
            .flatten()
            .map(str::to_lowercase)
            .collect();
        let mentions = |keyword: &str| haystacks.iter().any(|text| text.contains(keyword));

        let carrier = option.carrier_service_handle.map(str::to_lowercase);
        let is_pickup = PICKUP_KEYWORDS.iter().any(|keyword| mentions(*keyword))
            || self.store_keywords.iter().any(|keyword| mentions(keyword.as_str()))
            || carrier.is_some_and(|carrier| {
                CARRIER_PICKUP_KEYWORDS
                    .iter()
                    .any(|keyword| carrier.contains(keyword))
            });
        if is_pickup {
            DeliveryType::Pickup
        } else {
            DeliveryType::Shipping
        }
    }

    /// Whether the option names a known shipping method. Only informational:
    /// options matching neither list are shipping as well.
    pub fn mentions_shipping(&self, option: &OptionDescriptor<'_>) -> bool {
        [option.title, option.handle, option.carrier_service_handle]
            .into_iter()
            .flatten()
            .map(str::to_lowercase)
            .any(|text| SHIPPING_KEYWORDS.iter().any(|keyword| text.contains(keyword)))
    }
}

fn classify_method_type(method_type: &str) -> Option<DeliveryType> {
    let method_type = method_type.trim().to_ascii_lowercase();
    if PICKUP_METHOD_TYPES.contains(&method_type.as_str()) {
        Some(DeliveryType::Pickup)
    } else if SHIPPING_METHOD_TYPES.contains(&method_type.as_str()) {
        Some(DeliveryType::Shipping)
    } else {
        None
    }
}
