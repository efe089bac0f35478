//! Reading inputs and writing images.

pub mod export;
pub mod input;

pub use export::{export, to_image, write_escaped_text, write_png};
pub use input::{read_window, read_window_from, InputWindow, STDIO_PATH};
