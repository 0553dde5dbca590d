pub mod error;
pub mod solution;

pub use error::{RagError, Result};
pub use solution::QuerySolution;
