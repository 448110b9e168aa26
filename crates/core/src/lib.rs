pub mod range;
pub mod selection;

pub use range::{CellPos, CellRange};
pub use selection::Selection;
