pub mod analyzer;
pub mod hashmap;
pub mod index;
pub mod skiplist;

pub use analyzer::{Analyzer, Language};
pub use index::{BooleanIndex, IndexStats};
