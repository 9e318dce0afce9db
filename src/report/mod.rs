//! Report assembly and the rendering boundary.

/// Orchestrates resolver output and source adapters into one document.
pub mod assembler;
/// Document rendering boundary (markup + filename convention).
pub mod render;

pub use assembler::ReportAssembler;
