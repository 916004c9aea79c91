use thiserror::Error;

/// Reasons a discount evaluation degrades to "no discount".
///
/// None of these escape [`crate::calculator::compute_discounts`]; they are
/// logged (or silently ignored, for [`ConfigError::Missing`]) and the
/// affected input is treated as empty.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration blob is stored for the shop.
    #[error("no configuration found")]
    Missing,

    /// The stored configuration is not valid JSON or has the wrong shape.
    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The cart is missing something the calculator needs.
    #[error("invalid checkout context: {0}")]
    InvalidContext(&'static str),
}
