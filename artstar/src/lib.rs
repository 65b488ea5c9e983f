//! artstar - Interactive image compositing tool
//!
//! A small interactive collage tool: a collection of source photographs,
//! each with its own translation, rotation, skew and zoom, composited
//! live with optional edge detection and neighbor blending, driven
//! entirely from the keyboard. Parameters persist across runs in a JSON
//! document.
//!
//! The image algorithms live in the `artstar-core`, `artstar-transform`
//! and `artstar-filter` crates; this crate holds the application state,
//! persistence, key dispatch and the display window.

pub mod collection;
pub mod command;
pub mod display;
pub mod params;
pub mod session;
pub mod store;

pub use collection::{CollectionError, ImageCollection, SourceImage};
pub use command::Command;
pub use params::TransformParameters;
pub use session::{BlendDirection, CommandOutcome, Session, SessionError};
