//! Budget accounting.
//!
//! A project's `used_minutes` counter is never recomputed. Each entry
//! transition yields a list of signed [`CounterDelta`]s that the store
//! applies, together with the entry write, in one atomic unit.

pub mod delta;

#[cfg(test)]
mod props;

pub use delta::{
    CounterDelta, apply_deltas, contribution, plan_create, plan_delete, plan_restore,
    plan_transition, plan_update,
};
