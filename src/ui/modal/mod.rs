//! Modal dialog components for the TUI.

pub mod annotation;

pub use annotation::{AnnotationKeyResult, AnnotationModal, AnnotationModalState, AnnotationTarget};
