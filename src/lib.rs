//! # blackdrop
//!
//! A library for turning near-black pixels fully transparent across a
//! batch of images.
//!
//! Each image is classified once at load time as three-channel colour,
//! four-channel colour+alpha, or unsupported. Three-channel images are
//! masked on luminance and gain an alpha channel; four-channel images
//! are masked on a per-channel comparison and keep their existing alpha
//! outside the mask; unsupported layouts pass through untouched.
//!
//! ## Example
//!
//! ```no_run
//! use blackdrop::{Config, Pipeline};
//!
//! # fn main() -> blackdrop::Result<()> {
//! let pipeline = Pipeline::new(Config { threshold: 40 });
//! let summary = pipeline.run("images/".as_ref(), "processed/".as_ref())?;
//! println!("{} images converted", summary.processed);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod mask;
pub mod pipeline;

pub use error::{Error, Result};
pub use pipeline::{BatchSummary, Config, Pipeline};
