pub mod emitters;
pub mod generator;
pub mod writer;

pub use generator::{PythonAdapterGenerator, emit_adapter, generate_file, render_adapter};
