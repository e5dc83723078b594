//! odontogram library crate.
//!
//! This library provides the core functionality for odontogram, including:
//! - The dental chart selection and bulk-annotation engine
//! - Chart record persistence and configuration
//! - Terminal UI components and event handling

pub mod app;
pub mod chart;
pub mod config;
pub mod event;
pub mod event_loop;
pub mod handlers;
pub mod logging;
pub mod record;
pub mod ui;
