//! Component documentation compiler.
//!
//! Stages a docs tree, compiles every component's API page and demos into JSON
//! artifacts, and writes the component list and demo mapping the docs site
//! loads at runtime.

pub mod api;
pub mod builder;
pub mod demo;
pub mod manifest;
pub mod stage;

pub use builder::{BuildConfig, BuildError, BuildResult, DocsBuilder};
pub use manifest::{ComponentEntry, MappingEntry};
pub use stage::{StageError, StagedSource};
