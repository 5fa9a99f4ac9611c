//! Generation parameters and their normalization

/// Normalization of percentages into native ranges
pub mod normalize;
/// Parameter sets and partial updates
pub mod parameters;
