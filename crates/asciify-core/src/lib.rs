/// Configuration, types, and shared structures for asciify.
///
/// This crate contains the image and grid types, the density ramp catalog,
/// and configuration logic used across the asciify workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;

pub use charset::DensityRamp;
pub use config::ConvertConfig;
pub use error::CoreError;
pub use frame::{CharGrid, FrameBuffer};
