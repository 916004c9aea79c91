//! Delivery-aware customer discounts for Shopify Functions.
//!
//! This crate holds everything a discount Function needs to grant a customer
//! discount (tag rules or a per-customer override) and an extra pickup discount
//! that compounds on top of it. The host input is deserialized into
//! [`input::Input`], turned into a [`context::CheckoutContext`], evaluated by
//! the [`calculator`] and formatted by the [`emitter`].
//!
//! ```ignore
//! use delivery_discount::prelude::*;
//! use delivery_discount::Result;
//!
//! #[discount_function]
//! fn run(input: input::Input) -> Result<discounts::FunctionResult> {
//!     let config = input.configuration();
//!     let context = input.checkout_context(&config);
//!     let instructions = Calculator::new(&config).compute(&context, &input.shop.rules());
//!     Ok(emit(&instructions, &context, &config))
//! }
//! ```

pub use delivery_discount_macro::discount_function;
pub use serde;
pub use serde_json;

#[macro_export]
macro_rules! log {
    ($($args:tt)*) => {
        {
            use std::fmt::Write;
            let mut buf = String::new();
            writeln!(&mut buf, $($args)*).unwrap();
            $crate::write_log(&buf);
        }
    };
}

pub mod calculator;
pub mod classifier;
pub mod config;
pub mod context;
pub mod discounts;
pub mod emitter;
pub mod error;
pub mod input;
pub mod rules;
pub mod scalars;
pub mod session;

pub mod prelude {
    pub use crate::calculator::{compute_discounts, Calculator, DiscountInstruction};
    pub use crate::config::FunctionConfig;
    pub use crate::emitter::emit;
    pub use crate::log;
    pub use crate::scalars::*;
    pub use crate::{discounts, input};
    pub use delivery_discount_macro::discount_function;
}

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Writes a formatted log line to the function's log stream. Shopify collects
/// everything a Function writes to stderr as its run logs.
#[doc(hidden)]
pub fn write_log(buf: &str) {
    use std::io::Write;
    let _ = std::io::stderr().lock().write_all(buf.as_bytes());
}

/// Runs the given function `f` with the invocation payload, returning the
/// deserialized output. This function is provided as a helper when writing
/// tests.
pub fn run_function_with_input<F, P, O>(f: F, payload: &str) -> Result<O>
where
    F: Fn(P) -> Result<O>,
    P: serde::de::DeserializeOwned,
{
    let input: P = serde_json::from_str(payload)?;
    f(input)
}
