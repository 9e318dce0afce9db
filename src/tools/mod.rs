//! Open-web access (search + main-content extraction).

/// Web search and page extraction behind the [`web::WebAccess`] trait.
pub mod web;

pub use web::{DaedraWeb, SearchHit, WebAccess};
