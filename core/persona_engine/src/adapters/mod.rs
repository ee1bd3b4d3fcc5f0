//! Rule sets that nudge a trait vector from observed and user-supplied context.

pub mod jitter;
pub mod physical;
pub mod purpose;

pub use jitter::apply_jitter;
pub use physical::PhysicalTraitAdapter;
pub use purpose::{PurposeAdapter, PurposeCluster, PurposeOutcome};
