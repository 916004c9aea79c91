use crate::calculator::{DiscountInstruction, DiscountKind, DiscountScope, DiscountSource};
use crate::config::{DiscountRole, FunctionConfig};
use crate::context::CheckoutContext;
use crate::discounts::{
    Discount, DiscountApplicationStrategy, FixedAmount, FunctionResult, Percentage, Target, Value,
    NO_DISCOUNT,
};
use crate::log;

/// Formats calculator instructions as the host's discount output.
///
/// Only the instruction for the deployment's [`DiscountRole`] is emitted, so a
/// result holds at most one discount and never mixes product variant and
/// order subtotal targets. Line item discounts target every product variant in
/// the cart and are dropped when there is none.
pub fn emit(
    instructions: &[DiscountInstruction],
    context: &CheckoutContext,
    config: &FunctionConfig,
) -> FunctionResult {
    let discount = instructions
        .iter()
        .find(|instruction| role_of(instruction.source) == config.discount)
        .and_then(|instruction| to_discount(instruction, context));

    match discount {
        Some(discount) => FunctionResult {
            discounts: vec![discount],
            discount_application_strategy: DiscountApplicationStrategy::First,
        },
        None => NO_DISCOUNT,
    }
}

fn role_of(source: DiscountSource) -> DiscountRole {
    match source {
        DiscountSource::Override | DiscountSource::Tag => DiscountRole::Customer,
        DiscountSource::Pickup => DiscountRole::Pickup,
    }
}

fn to_discount(instruction: &DiscountInstruction, context: &CheckoutContext) -> Option<Discount> {
    let targets = match instruction.scope {
        DiscountScope::OrderSubtotal => vec![Target::OrderSubtotal {
            excluded_variant_ids: vec![],
        }],
        DiscountScope::LineItems => context
            .line_targets
            .iter()
            .map(|id| Target::ProductVariant {
                id: id.clone(),
                quantity: None,
            })
            .collect(),
    };
    if targets.is_empty() {
        log!("Dropping {:?} discount without targets", instruction.source);
        return None;
    }

    let value = match instruction.kind {
        DiscountKind::Percentage => Value::Percentage(Percentage {
            value: instruction.value,
        }),
        DiscountKind::FixedAmount => Value::FixedAmount(FixedAmount {
            amount: instruction.value,
            applies_to_each_item: None,
        }),
    };

    Some(Discount {
        value,
        targets,
        message: Some(instruction.message.clone()),
    })
}
