mod append;
mod atomic;
mod line_index;

pub use append::append_lines;
pub use atomic::write_atomic;
pub use line_index::LineIndex;
