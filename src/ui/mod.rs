// src/ui/mod.rs
pub mod analysis;
pub mod evaluation;
pub mod results;
pub mod widgets;

/// What the user asked for during a frame. The app carries these out after
/// drawing, where file dialogs and worker threads are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    AnalyzeText,
    PickBatchFile,
    AnalyzeFile,
    PickEvalFile,
    Export,
}
