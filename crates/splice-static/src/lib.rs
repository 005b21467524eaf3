//! Static site builder for splice.
//!
//! Copies a source tree of HTML pages into a fresh output directory and
//! splices shared partials into every page that references them.

pub mod builder;
pub mod tree;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
