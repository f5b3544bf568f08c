//! Feature-to-solid construction engine.
//!
//! Walks a part's ordered feature list, resolves each feature's
//! side-relative placement, builds its base geometry through the
//! [`geom_kernel::GeometryKernel`] capability interface, and assembles the
//! finished solid with a deterministic sequence of boolean operations.
//!
//! The engine is synchronous and single-threaded: one build owns its kernel
//! handles start to finish. Failures are fatal for the current build and
//! propagate out uncaught; the engine itself never logs.

pub mod bevel;
pub mod error;
pub mod placement;
pub mod planner;
pub mod primitives;

pub use error::EngineError;
pub use planner::construct_part;
