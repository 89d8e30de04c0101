//! Application use cases for gembridge conversions.
//!
//! The CLI binaries stay thin: they read files and map errors to exit
//! codes. Everything between raw input text and serialized output text
//! happens here.

#![forbid(unsafe_code)]

pub mod convert;
pub mod error;
pub mod render;

pub use convert::{
    ForwardOutput, ReverseOutput, default_forward_output, read_input_file, run_forward,
    run_reverse,
};
pub use error::{ConvertError, ConvertResult, InputFormat};
pub use render::{FORWARD_FOLLOW_UP, render_forward_summary};
