pub mod analyze;
pub mod config;
pub mod error;
pub mod input;
pub mod report;
pub mod stats;
pub mod store;
pub mod types;

pub use analyze::{ContextSource, EmptyContext, Grader, StaticContext};
pub use error::{GraderError, Result};
