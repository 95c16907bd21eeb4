pub mod driver;
pub mod error;
pub mod generator;
pub mod report;
pub mod runner;
pub mod utils;

// Re-export common items
pub use error::{GeneratorError, GeneratorResult};
pub use generator::PomGenerator;
pub use runner::run_batch;
