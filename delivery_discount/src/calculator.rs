//! The discount decision.
//!
//! At most two discounts come out of one evaluation: the customer's own
//! discount (a percentage from an override or the best tag rule) and, when
//! pickup is selected, a pickup discount. The pickup discount is a fixed amount
//! computed on the subtotal *after* the customer discount, so engines that apply
//! every discount to the original subtotal still charge the compounded price.

use serde::{Deserialize, Serialize};

use crate::config::FunctionConfig;
use crate::context::{CheckoutContext, CustomerContext};
use crate::log;
use crate::rules::{CustomerTagRule, DeliveryRule, DiscountType, RuleSet};
use crate::scalars::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscountKind {
    Percentage,
    FixedAmount,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscountScope {
    OrderSubtotal,
    #[default]
    LineItems,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscountSource {
    Override,
    Tag,
    Pickup,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountInstruction {
    pub kind: DiscountKind,
    pub value: Decimal,
    pub message: String,
    pub scope: DiscountScope,
    pub source: DiscountSource,
}

/// The customer's winning discount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CustomerDiscount<'a> {
    pub percent: Float,
    pub source: DiscountSource,
    /// The tag rule that won, when `source` is [`DiscountSource::Tag`].
    pub rule: Option<&'a CustomerTagRule>,
}

/// Picks the customer discount: a positive override first, then the best
/// matching tag rule. Guests never get one.
pub fn resolve_customer_discount<'a>(
    customer: Option<&CustomerContext>,
    rules: &'a RuleSet,
) -> Option<CustomerDiscount<'a>> {
    let customer = customer.filter(|customer| customer.is_authenticated())?;

    if let Some(percent) = customer.override_percent.filter(|percent| *percent > 0.0) {
        return Some(CustomerDiscount {
            percent,
            source: DiscountSource::Override,
            rule: None,
        });
    }

    let rule = rules.best_tag_rule(customer.tags())?;
    Some(CustomerDiscount {
        percent: rule.discount_percentage,
        source: DiscountSource::Tag,
        rule: Some(rule),
    })
    .filter(|discount| discount.percent > 0.0)
}

/// `subtotal * (1 - customer%) * pickup%`, rounded to cents.
pub fn compounded_pickup_amount(
    subtotal: Decimal,
    customer_percent: Float,
    pickup_percent: Float,
) -> Decimal {
    let after_customer = *subtotal * (1.0 - customer_percent / 100.0);
    Decimal(after_customer * (pickup_percent / 100.0)).round_to_cents()
}

/// Turns a [`CheckoutContext`] and the merchant's rules into discount
/// instructions. Never fails: anything missing or invalid means no discount.
#[derive(Clone, Debug, PartialEq)]
pub struct Calculator {
    customer_scope: DiscountScope,
    customer_label: String,
    pickup_label: String,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(&FunctionConfig::default())
    }
}

impl Calculator {
    pub fn new(config: &FunctionConfig) -> Self {
        Self {
            customer_scope: config.customer_scope,
            customer_label: config.customer_label.clone(),
            pickup_label: config.pickup_label.clone(),
        }
    }

    pub fn compute(&self, context: &CheckoutContext, rules: &RuleSet) -> Vec<DiscountInstruction> {
        let subtotal = match context.validate() {
            Ok(subtotal) => subtotal,
            Err(err) => {
                log!("No discount: {err}");
                return vec![];
            }
        };

        let mut instructions = Vec::with_capacity(2);

        let customer = resolve_customer_discount(context.authenticated_customer(), rules);
        if let Some(customer) = &customer {
            instructions.push(self.customer_instruction(customer));
        }

        if context.is_pickup() {
            match rules.pickup_rule() {
                Some(rule) => {
                    let customer_percent = customer.map_or(0.0, |customer| customer.percent);
                    let instruction = self.pickup_instruction(rule, subtotal, customer_percent);
                    if let Some(instruction) = instruction {
                        if let Some(date) = &context.pickup_date {
                            log!("Pickup scheduled for {date}");
                        }
                        instructions.push(instruction);
                    }
                }
                None => log!("Pickup selected but no enabled pickup rule"),
            }
        }

        instructions
    }

    fn customer_instruction(&self, customer: &CustomerDiscount<'_>) -> DiscountInstruction {
        let message = customer
            .rule
            .map(|rule| rule.discount_name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(self.customer_label.as_str())
            .to_string();
        log!(
            "Customer discount {}% ({:?})",
            customer.percent,
            customer.source
        );
        DiscountInstruction {
            kind: DiscountKind::Percentage,
            value: Decimal(customer.percent),
            message,
            scope: self.customer_scope,
            source: customer.source,
        }
    }

    fn pickup_instruction(
        &self,
        rule: &DeliveryRule,
        subtotal: Decimal,
        customer_percent: Float,
    ) -> Option<DiscountInstruction> {
        let (amount, message) = match rule.discount_type {
            DiscountType::Percentage => (
                compounded_pickup_amount(subtotal, customer_percent, rule.discount_value),
                format!("{}% {}", rule.discount_value, self.pickup_label),
            ),
            DiscountType::Fixed => (
                Decimal(rule.discount_value).round_to_cents(),
                self.pickup_label.clone(),
            ),
        };
        if !amount.is_positive() {
            return None;
        }
        log!(
            "Pickup discount {amount} on subtotal {subtotal} after {customer_percent}% customer discount"
        );
        Some(DiscountInstruction {
            kind: DiscountKind::FixedAmount,
            value: amount,
            message,
            scope: DiscountScope::OrderSubtotal,
            source: DiscountSource::Pickup,
        })
    }
}

/// Evaluates with the default configuration.
pub fn compute_discounts(context: &CheckoutContext, rules: &RuleSet) -> Vec<DiscountInstruction> {
    Calculator::default().compute(context, rules)
}
