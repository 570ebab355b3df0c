// ============================================================================
// ROUTING MODULE - Catálogo de endpoints + router por fragmento
// ============================================================================

pub mod catalog;
pub mod router;

pub use router::{resolve, Route};
