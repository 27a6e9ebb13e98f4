//! Defines some common functions used in this library.

/// Defines some useful numerical functions such as log-sum-exp.
pub(crate) mod utils;

/// Defines some checker functions.
pub(crate) mod checker;
