//! Partial expansion for HTML pages.
//!
//! This crate finds `<!-- PARTIAL:name -->` marker lines in page content,
//! loads the named fragments, and resolves depth-relative template variables
//! such as `{{BASE}}` before splicing them in.

pub mod expand;
pub mod marker;
pub mod registry;
pub mod vars;

pub use expand::{expand, Expansion};
pub use marker::{find_markers, PartialMarker};
pub use registry::{PartialError, PartialRegistry, PartialSource};
pub use vars::{page_depth, TemplateVars};
