//! Display subsystem collaborator for Vellum
//!
//! This crate provides what every display-type component shares:
//! - `PixelFormat` enumeration with per-format channel metadata
//! - `Rotation` values
//! - The base display schema fragment (`lambda`, `pages`, `rotation`, ...)
//! - `DisplaySubsystem` trait and its standard implementation, which
//!   registers instances as display targets
//!
//! # Architecture
//!
//! Component adapters (such as the display buffer) receive a
//! `DisplaySubsystem` explicitly instead of looking up display types by
//! name. The subsystem owns the pixel-format list and the reference types
//! drawing callbacks are compiled against.

#![deny(unsafe_code)]

pub mod config;
pub mod pixel;
pub mod rotation;
pub mod subsystem;

// Re-export key types
pub use config::{DisplayConfig, PageConfig, CONF_LAMBDA, CONF_PAGES};
pub use pixel::{DisplayType, PixelFormat, PIXEL_TYPES};
pub use rotation::Rotation;
pub use subsystem::{DisplaySubsystem, StandardDisplay, DISPLAY_BUFFER_REF, DISPLAY_REF};
