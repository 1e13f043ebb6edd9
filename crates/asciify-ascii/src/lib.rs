/// ASCII conversion engine for asciify.
///
/// Converts RGB frames to character grids via perceived luminance.
pub mod luminance;

pub use luminance::{map_frame, perceived_luminance};
