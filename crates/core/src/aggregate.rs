//! Aggregate root trait.

/// Aggregate root marker + minimal interface.
///
/// An aggregate is mutated only through its own operations. Every successful
/// mutation bumps `version()` by one; rejected operations leave it untouched.
pub trait AggregateRoot {
    /// Monotonically increasing version of the aggregate's state.
    fn version(&self) -> u64;
}
