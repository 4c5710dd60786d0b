//! Dependency-ordered generation engine for the plastics schema.
//!
//! One "business event" is a referentially-complete cluster of rows (a hire,
//! a sale, a production run); the orchestrator threads entity and
//! relationship inserts in the single FK-valid order and the driver loops it
//! under one commit boundary.

pub mod driver;
pub mod identity;
pub mod orchestrator;
pub mod providers;

pub use driver::BatchDriver;
pub use identity::{IdAllocator, PersonRole};
pub use orchestrator::{EventKeys, EventOrchestrator};
