//! Event handlers that translate terminal input into app actions.

pub mod keyboard;
pub mod modal;
pub mod mouse;
