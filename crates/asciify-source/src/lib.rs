/// Image sources and resampling for asciify.

pub mod image;
pub mod resize;

pub use resize::{Resizer, resample};
