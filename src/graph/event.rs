//! Attribute change records
//!
//! Captures the mutation that triggered an attribute notification, so
//! observers (indexers, persistence layers) can react to what changed
//! instead of diffing the whole bag.

use super::property::AttributeValue;
use super::types::Identifier;

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeChange {
    Set {
        owner: Identifier,
        key: String,
        old_value: Option<AttributeValue>,
        new_value: AttributeValue,
    },
    Unset {
        owner: Identifier,
        key: String,
        old_value: AttributeValue,
    },
}

impl AttributeChange {
    /// Entity whose bag was mutated
    pub fn owner(&self) -> Identifier {
        match self {
            AttributeChange::Set { owner, .. } | AttributeChange::Unset { owner, .. } => *owner,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            AttributeChange::Set { key, .. } | AttributeChange::Unset { key, .. } => key,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, AttributeChange::Unset { .. })
    }
}
