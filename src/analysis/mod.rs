// src/analysis/mod.rs
pub mod sentiment;
pub mod summary;

// Re-export commonly used types
pub use sentiment::{
    AnalysisResult,
    EvalRow,
    EvaluationReport,
    ResultOrigin,
    ResultSet,
    SentimentClass,
};
