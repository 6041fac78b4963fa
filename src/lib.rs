pub mod analysis;
pub mod config;
pub mod error;
pub mod figure;
pub mod models;
pub mod pipeline;

pub use analysis::VoidAnalyzer;
pub use config::{AnalysisConfig, ConfigOverrides};
pub use error::{Result, VoidError};
pub use models::{Verdict, VoidAnalysis, VoidReport};
pub use pipeline::{DebugConfig, Pipeline, PipelineContext, PipelineData, PipelineStep};

#[cfg(feature = "gui")]
pub mod gui;
