//! Edge predicates
//!
//! A predicate is the typed label describing what an edge means. The base
//! variant is a plain marker; custom variants add their own operations and
//! are reached through a capability check (`Edge::predicate_as`).

use std::any::Any;
use std::fmt::Debug;

pub trait Predicate: Any + Debug + Send + Sync {
    /// Marker name of this predicate
    fn name(&self) -> &str {
        BasePredicate::NAME
    }

    /// Upcast used for capability checks
    fn as_any(&self) -> &dyn Any;

    fn is_base(&self) -> bool {
        self.as_any().is::<BasePredicate>()
    }
}

/// Default predicate assigned when an edge is created without one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasePredicate;

impl BasePredicate {
    pub const NAME: &'static str = "predicate";
}

impl Predicate for BasePredicate {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
