use std::fmt;

use crate::types::{EntityId, GroupId};

/// Errors raised at the public boundary. The per-frame collision path never fails.
#[derive(Clone, Debug, PartialEq)]
pub enum CollisionError {
    /// Handle refers to a destroyed or never-allocated entity slot.
    StaleEntity(EntityId),
    /// Handle refers to a destroyed or never-allocated group slot.
    StaleGroup(GroupId),
    /// Adding `child` to `parent` would make a group contain itself.
    GroupCycle { parent: GroupId, child: GroupId },
    /// Configuration rejected by [`crate::WorldConfig::validate`].
    InvalidConfig(String),
    /// Configuration text could not be parsed.
    Config(String),
}

impl fmt::Display for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleEntity(id) => write!(f, "entity {id:?} is not alive in this world"),
            Self::StaleGroup(id) => write!(f, "group {id:?} is not alive in this world"),
            Self::GroupCycle { parent, child } => {
                write!(f, "adding group {child:?} to {parent:?} would create a cycle")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid world config: {msg}"),
            Self::Config(msg) => write!(f, "could not parse world config: {msg}"),
        }
    }
}

impl std::error::Error for CollisionError {}

pub type Result<T> = std::result::Result<T, CollisionError>;
