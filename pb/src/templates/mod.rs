//! Template Catalog
//!
//! Named bundles of field values the user can load into the form.
//!
//! Template resolution chain:
//! 1. Configured template directories, searched in order (`{name}.yml`)
//! 2. Embedded built-ins (blank, analysis, writing, coding)
//!
//! Templates never define the creativity field; applying one leaves it
//! unchanged. Unknown names resolve to nothing and callers treat that as a
//! no-op.

pub mod embedded;
mod loader;

pub use loader::{Template, TemplateLoader};
