//! Error types for the interaction core.
//!
//! Nothing here is surfaced to the user: the interaction controller is the
//! boundary where these are logged and turned into no-ops.

use thiserror::Error;

use crate::api::types::NodeId;

#[derive(Error, Debug)]
pub enum StageError {
    /// A node referenced by id is no longer in the scene.
    #[error("node {0:?} is not in the scene")]
    MissingNode(NodeId),

    /// Reparenting `child` under `parent` would create a cycle.
    #[error("cannot parent {child:?} under its own descendant {parent:?}")]
    InvalidParent { parent: NodeId, child: NodeId },

    /// The ray through a screen point never reaches the requested depth plane.
    #[error("screen point ({x}, {y}) does not reach the depth plane")]
    Unprojectable { x: f32, y: f32 },

    /// Configuration JSON failed to parse.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StageError>;
