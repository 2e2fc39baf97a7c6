pub mod pairs;

mod axes_draw;
mod diagonal;
