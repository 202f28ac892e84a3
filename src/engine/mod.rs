//! Layout and analysis engine for knowledge graphs.
//!
//! Everything here is synchronous and pure: inputs are borrowed, results
//! are freshly allocated, and a loaded [`GraphModel`] is never mutated.

pub mod config;
pub mod layout;
pub mod model;
pub mod path;
pub mod selection;
pub mod types;
pub mod viewport;

pub use config::{GraphConfig, LayoutGeometry, LayoutKind};
pub use layout::{CancelToken, LayoutStrategy, PositionMap};
pub use model::{GraphModel, ValidationError};
pub use path::{LearningPath, PathFinder};
pub use selection::{HighlightSet, HighlightState, SelectionIndex};
pub use types::{Edge, EdgeId, GraphSnapshot, Node, NodeProperties, NodeType, Position, Relationship};
pub use viewport::{Offset, Viewport, ViewportController};
