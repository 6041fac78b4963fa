mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from voidscan for tests
pub use voidscan::{AnalysisConfig, Verdict, VoidAnalyzer, VoidError};
