//! CSV reading and writing for split runs.

mod reader;
mod writer;

pub use reader::{read_input_from, read_input_table};
pub use writer::{write_output, write_output_to};
