pub mod axes;
pub mod margins;
pub mod matrix;
