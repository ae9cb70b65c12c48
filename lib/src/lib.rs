//! ASCII Signature - text to FIGlet-style ASCII art
//!
//! This library renders short, possibly multi-line text as block-character
//! art. FIGlet fonts and their smushing rules come from `letrs`; on top of
//! them sit a memoizing multi-line pipeline and the form controller used by
//! the desktop app.
//!
//! # Example
//! ```no_run
//! use ascii_sig::{FigletRenderer, RenderConfig, RenderPipeline};
//! use std::sync::Arc;
//!
//! let renderer = FigletRenderer::new();
//! let pipeline = RenderPipeline::new(Arc::new(renderer));
//! let art = pipeline.render("hello\nworld", &RenderConfig::default()).unwrap();
//! println!("{art}");
//! ```

pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod pipeline;
pub mod postprocess;
pub mod renderer;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use config::{DisplayOptions, HorizontalLayout, InputLimit, RenderConfig, Settings};
pub use controller::{Controller, DOWNLOAD_FILE_NAME, FormAction, FormState, RenderJob, Waker};
pub use error::{ConfigError, ExportError, RenderError, SubmitError};
pub use pipeline::RenderPipeline;
pub use postprocess::strip_blank_separators;
pub use renderer::{FigletRenderer, GlyphRenderer};
