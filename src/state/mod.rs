// src/state/mod.rs
use std::path::Path;
use std::sync::Arc;

use tracing::error;

use crate::analysis::EvaluationReport;
use crate::api::workflow;
use crate::api::SentimentBackend;
use crate::error::ClientError;
use crate::file::export::{self, EMPTY_EXPORT_ALERT};
use crate::file::SelectedFile;
use crate::state::request::{Completion, Dispatcher, Lane, Outcome};
use crate::state::result_store::ResultStore;

pub mod request;
pub mod result_store;

// Screen/tab tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Analysis,
    Evaluation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Info, text: text.into() }
    }

    pub fn loading(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Loading, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, text: text.into() }
    }

    /// Input problems are shown as-is, everything else gets the error prefix.
    pub fn from_error(err: &ClientError) -> Self {
        let text = match err {
            ClientError::Input(message) => message.clone(),
            other => format!("Ошибка: {}", other),
        };
        Self { kind: StatusKind::Error, text }
    }

    pub fn is_loading(&self) -> bool {
        self.kind == StatusKind::Loading
    }
}

const SUPERSEDED_MESSAGE: &str = "Результат заменён более новым запросом";

// Core application state
pub struct AppState {
    pub backend: Arc<dyn SentimentBackend>,
    pub results: ResultStore,
    pub requests: Dispatcher,

    // Inputs
    pub single_text: String,
    pub batch_file: Option<SelectedFile>,
    pub eval_file: Option<SelectedFile>,
    pub last_evaluation: Option<EvaluationReport>,

    // Minimal UI state
    pub current_screen: Screen,
    pub quick_status: Option<StatusMessage>,
    pub file_status: Option<StatusMessage>,
    pub eval_status: Option<StatusMessage>,
    pub alert: Option<String>,
    pub files_hovered: bool,

    pub export_file_name: String,
}

impl AppState {
    pub fn new(backend: Arc<dyn SentimentBackend>, export_file_name: impl Into<String>) -> Self {
        Self {
            backend,
            results: ResultStore::new(),
            requests: Dispatcher::new(),
            single_text: String::new(),
            batch_file: None,
            eval_file: None,
            last_evaluation: None,
            current_screen: Screen::Analysis,
            quick_status: None,
            file_status: None,
            eval_status: None,
            alert: None,
            files_hovered: false,
            export_file_name: export_file_name.into(),
        }
    }

    pub fn analyze_single_text<N>(&mut self, notify: N)
    where
        N: FnOnce() + Send + 'static,
    {
        let text = match workflow::prepare_text(&self.single_text) {
            Ok(text) => text,
            Err(e) => {
                self.quick_status = Some(StatusMessage::from_error(&e));
                return;
            }
        };

        let backend = Arc::clone(&self.backend);
        self.quick_status = Some(StatusMessage::loading("Анализируем..."));
        self.requests.spawn(
            Lane::Analysis,
            move || Outcome::SingleText(workflow::analyze_single_text(backend.as_ref(), &text)),
            notify,
        );
    }

    pub fn select_batch_file(&mut self, file: SelectedFile) {
        self.file_status = Some(StatusMessage::info(file.ready_message()));
        self.batch_file = Some(file);
    }

    pub fn analyze_file<N>(&mut self, notify: N)
    where
        N: FnOnce() + Send + 'static,
    {
        let Some(file) = self.batch_file.clone() else {
            self.file_status = Some(StatusMessage::from_error(&ClientError::Input(
                workflow::NO_FILE_MESSAGE.to_string(),
            )));
            return;
        };

        let backend = Arc::clone(&self.backend);
        self.file_status = Some(StatusMessage::loading("Анализируем..."));
        self.requests.spawn(
            Lane::Analysis,
            move || Outcome::File(workflow::analyze_file(backend.as_ref(), &file)),
            notify,
        );
    }

    /// Choosing an evaluation file starts the evaluation right away.
    pub fn select_eval_file<N>(&mut self, file: SelectedFile, notify: N)
    where
        N: FnOnce() + Send + 'static,
    {
        self.eval_file = Some(file.clone());
        self.last_evaluation = None;

        let backend = Arc::clone(&self.backend);
        self.eval_status = Some(StatusMessage::loading("Считаем Macro-F1..."));
        self.requests.spawn(
            Lane::Evaluation,
            move || Outcome::Evaluation(workflow::evaluate_file(backend.as_ref(), &file)),
            notify,
        );
    }

    /// Applies everything the workers have finished since the last frame.
    pub fn poll_requests(&mut self) {
        for completion in self.requests.drain() {
            self.apply(completion);
        }
    }

    pub fn apply(&mut self, completion: Completion) {
        if !completion.current {
            let status = match completion.outcome {
                Outcome::SingleText(_) => &mut self.quick_status,
                Outcome::File(_) => &mut self.file_status,
                Outcome::Evaluation(_) => &mut self.eval_status,
            };
            if status.as_ref().map_or(false, StatusMessage::is_loading) {
                *status = Some(StatusMessage::info(SUPERSEDED_MESSAGE));
            }
            return;
        }

        let request = completion.ticket.id;
        match completion.outcome {
            Outcome::SingleText(Ok(results)) => {
                self.results.replace(results);
                self.quick_status = Some(StatusMessage::success("Текст проанализирован"));
            }
            Outcome::SingleText(Err(e)) => {
                error!(%request, error = %e, "Text analysis failed");
                self.quick_status = Some(StatusMessage::from_error(&e));
            }
            Outcome::File(Ok(results)) => {
                let count = results.len();
                self.results.replace(results);
                self.file_status = Some(StatusMessage::success(format!(
                    "✅ Проанализировано {} сегментов",
                    count
                )));
            }
            Outcome::File(Err(e)) => {
                error!(%request, error = %e, "File analysis failed");
                self.file_status = Some(StatusMessage::from_error(&e));
            }
            Outcome::Evaluation(Ok(report)) => {
                self.eval_status = Some(StatusMessage::success(report.summary()));
                self.last_evaluation = Some(report);
            }
            Outcome::Evaluation(Err(e)) => {
                error!(%request, error = %e, "Evaluation failed");
                self.eval_status = Some(StatusMessage::from_error(&e));
            }
        }
    }

    /// False (and an alert) when there is nothing to export.
    pub fn begin_export(&mut self) -> bool {
        if self.results.is_empty() {
            self.alert = Some(EMPTY_EXPORT_ALERT.to_string());
            return false;
        }
        true
    }

    pub fn export_results(&mut self, path: &Path) {
        let Some(results) = self.results.current() else {
            self.alert = Some(EMPTY_EXPORT_ALERT.to_string());
            return;
        };

        match export::save_results(results, path) {
            Ok(()) => {
                self.file_status = Some(StatusMessage::success(format!(
                    "Результаты сохранены: {}",
                    path.display()
                )));
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Export failed");
                self.alert = Some(format!("Ошибка: {}", e));
            }
        }
    }

    pub fn is_busy(&self, lane: Lane) -> bool {
        self.requests.in_flight(lane)
    }
}
