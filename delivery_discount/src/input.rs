//! The function's input, as selected by its input query.
//!
//! Every field the host may leave out defaults to empty, so a partial payload
//! resolves to a context that simply earns no discount.

use serde::{Deserialize, Serialize};

use crate::classifier::{DeliveryClassifier, OptionDescriptor};
use crate::config::{parse_config, DeliverySignal, FunctionConfig};
use crate::context::{CheckoutContext, CustomerContext};
use crate::log;
use crate::rules::{DeliveryType, RuleSet};
use crate::scalars::*;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Input {
    pub cart: Cart,
    pub shop: Shop,
    pub discount_node: DiscountNode,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cart {
    pub lines: Vec<CartLine>,
    pub cost: Option<CartCost>,
    pub buyer_identity: Option<BuyerIdentity>,
    /// The `selected_delivery_type` attribute written by the checkout tracker.
    pub attribute: Option<Attribute>,
    /// The `pickup_delivery_date` attribute.
    pub pickup_date: Option<Attribute>,
    pub delivery_groups: Vec<DeliveryGroup>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartLine {
    pub id: ID,
    pub quantity: Int,
    pub merchandise: Merchandise,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Merchandise {
    #[serde(rename = "__typename")]
    pub typename: Option<String>,
    pub id: Option<ID>,
}

impl Merchandise {
    /// The variant id, unless this line is something other than a product
    /// variant (a custom product, for instance).
    pub fn variant_id(&self) -> Option<&str> {
        match self.typename.as_deref() {
            None | Some("ProductVariant") => self.id.as_deref().filter(|id| !id.is_empty()),
            Some(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCost {
    pub subtotal_amount: MoneyV2,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyV2 {
    pub amount: Decimal,
    #[serde(default)]
    pub currency_code: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuyerIdentity {
    pub customer: Option<Customer>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub id: ID,
    pub email: Option<String>,
    pub has_tags: Vec<HasTagResponse>,
    /// The customer's own discount percentage metafield.
    pub discount_percentage: Option<Metafield>,
}

impl Customer {
    pub fn active_tags(&self) -> impl Iterator<Item = &str> {
        self.has_tags
            .iter()
            .filter(|tag| tag.has_tag)
            .map(|tag| tag.tag.as_str())
    }

    /// The override percentage, when it is set to a number.
    pub fn override_percent(&self) -> Option<Float> {
        let value = self.discount_percentage.as_ref()?.value.as_deref()?;
        value
            .trim()
            .parse::<Float>()
            .ok()
            .filter(|percent| percent.is_finite())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HasTagResponse {
    pub has_tag: Boolean,
    pub tag: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attribute {
    pub key: Option<String>,
    pub value: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryGroup {
    pub selected_delivery_option: Option<DeliveryOption>,
    pub delivery_options: Vec<DeliveryOption>,
}

impl DeliveryGroup {
    /// The full option matching the selected handle.
    pub fn resolve_selected(&self) -> Option<&DeliveryOption> {
        let selected = self.selected_delivery_option.as_ref()?;
        self.delivery_options
            .iter()
            .find(|option| option.handle == selected.handle)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryOption {
    pub handle: Handle,
    pub title: Option<String>,
    #[serde(alias = "type")]
    pub delivery_method_type: Option<String>,
    pub carrier_service_handle: Option<String>,
}

impl DeliveryOption {
    pub fn descriptor(&self) -> OptionDescriptor<'_> {
        OptionDescriptor {
            title: self.title.as_deref(),
            handle: Some(self.handle.as_str()).filter(|handle| !handle.is_empty()),
            method_type: self.delivery_method_type.as_deref(),
            carrier_service_handle: self.carrier_service_handle.as_deref(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Shop {
    pub delivery_discount_settings: Option<Metafield>,
    pub customer_tag_discount_rules: Option<Metafield>,
}

impl Shop {
    pub fn rules(&self) -> RuleSet {
        RuleSet::from_metafields(
            metafield_value(&self.delivery_discount_settings),
            metafield_value(&self.customer_tag_discount_rules),
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountNode {
    pub metafield: Option<Metafield>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metafield {
    pub value: Option<String>,
}

fn metafield_value(metafield: &Option<Metafield>) -> Option<&str> {
    metafield.as_ref()?.value.as_deref()
}

impl Input {
    pub fn configuration(&self) -> FunctionConfig {
        parse_config(metafield_value(&self.discount_node.metafield))
    }

    pub fn checkout_context(&self, config: &FunctionConfig) -> CheckoutContext {
        let selected_delivery_type = match config.delivery_signal {
            DeliverySignal::CartAttribute => self.cart.attribute_delivery_type(),
            DeliverySignal::DeliveryGroups => {
                self.cart.classify_delivery_groups(&config.classifier())
            }
        };

        CheckoutContext {
            selected_delivery_type,
            customer: self.cart.customer(),
            cart_subtotal: self
                .cart
                .cost
                .as_ref()
                .map(|cost| cost.subtotal_amount.amount),
            pickup_date: self.cart.pickup_date(),
            line_targets: self
                .cart
                .lines
                .iter()
                .filter_map(|line| line.merchandise.variant_id())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl Cart {
    pub fn attribute_delivery_type(&self) -> Option<DeliveryType> {
        let value = self.attribute.as_ref()?.value.as_deref()?;
        let delivery_type = DeliveryType::from_attribute(value);
        if delivery_type.is_none() && !value.trim().is_empty() {
            log!("Unknown delivery type attribute {value:?}");
        }
        delivery_type
    }

    /// Classifies the first delivery group that has a selection.
    pub fn classify_delivery_groups(
        &self,
        classifier: &DeliveryClassifier,
    ) -> Option<DeliveryType> {
        let option = self.delivery_groups.iter().find_map(|group| {
            group
                .resolve_selected()
                .or(group.selected_delivery_option.as_ref())
        })?;
        let descriptor = option.descriptor();
        let delivery_type = classifier.classify(&descriptor);
        if delivery_type == DeliveryType::Shipping && !classifier.mentions_shipping(&descriptor) {
            log!("Delivery option {:?} is ambiguous, treating as shipping", option.handle);
        }
        Some(delivery_type)
    }

    pub fn pickup_date(&self) -> Option<String> {
        let value = self.pickup_date.as_ref()?.value.as_deref()?.trim();
        Some(value.to_string()).filter(|date| !date.is_empty())
    }

    pub fn customer(&self) -> Option<CustomerContext> {
        let customer = self.buyer_identity.as_ref()?.customer.as_ref()?;
        Some(CustomerContext::new(
            customer.id.clone(),
            customer.active_tags(),
            customer.override_percent(),
        ))
    }
}
