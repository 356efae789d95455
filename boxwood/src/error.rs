//! Error types for tree mutations.

use thiserror::Error;

use crate::tree::NodeId;

/// Errors raised by arena and widget mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The id refers to a slot that has been freed (or never existed).
    #[error("node {0} no longer exists")]
    StaleNode(NodeId),

    /// The root anchor cannot be removed, re-parented, or given siblings.
    #[error("the root anchor cannot be modified")]
    RootImmutable,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
