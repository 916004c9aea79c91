use delivery_discount::prelude::*;
use delivery_discount::Result;

#[discount_function]
fn run(input: input::Input) -> Result<discounts::FunctionResult> {
    let config = input.configuration();
    let context = input.checkout_context(&config);
    let rules = input.shop.rules();

    let instructions = Calculator::new(&config).compute(&context, &rules);
    log!(
        "{} discount(s) for {:?} delivery",
        instructions.len(),
        context.selected_delivery_type
    );

    Ok(emit(&instructions, &context, &config))
}

#[cfg(test)]
mod tests;
