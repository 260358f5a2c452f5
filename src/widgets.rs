pub mod sort;

pub use sort::Sort;
