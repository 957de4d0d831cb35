//! Orthodox (F3..F8) keyboard shortcuts for a dual-pane graphical file manager.
//!
//! The host's widget tree is reached through the [`widget::Locatable`] and
//! [`widget::HostWidget`] traits; everything else works against those.

pub mod config;
pub mod error;
pub mod extension;
pub mod keybindings;
pub mod logging;
pub mod remap;
pub mod services;
pub mod ui;
pub mod widget;

pub use error::{OrthokeysError, Result};
pub use extension::Extension;
