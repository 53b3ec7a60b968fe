pub mod file;
pub mod keyboard;
pub mod pointer;

pub use file::wire_file_input;
pub use keyboard::wire_global_keydown;
pub use pointer::{wire_input_handlers, wire_resize};
