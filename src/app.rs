// src/app.rs
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use rfd::FileDialog;
use tracing::info;

use crate::api::SentimentBackend;
use crate::file::SelectedFile;
use crate::state::request::Lane;
use crate::state::{AppState, Screen};
use crate::ui::UiAction;

pub struct SentimentApp {
    state: AppState,
}

impl SentimentApp {
    pub fn new(backend: Arc<dyn SentimentBackend>, export_file_name: String) -> Self {
        Self {
            state: AppState::new(backend, export_file_name),
        }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) -> Option<UiAction> {
        let mut action = None;

        egui::menu::bar(ui, |ui| {
            ui.menu_button("Файл", |ui| {
                if ui.button("Открыть CSV для анализа...").clicked() {
                    action = Some(UiAction::PickBatchFile);
                    ui.close_menu();
                }
                if ui.button("Открыть CSV для оценки...").clicked() {
                    action = Some(UiAction::PickEvalFile);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Скачать результаты CSV...").clicked() {
                    action = Some(UiAction::Export);
                    ui.close_menu();
                }
            });

            ui.separator();

            // Tab selection using buttons
            let tabs = [
                (Screen::Analysis, "Анализ"),
                (Screen::Evaluation, "Оценка"),
            ];

            for (mode, label) in tabs {
                if ui.selectable_label(self.state.current_screen == mode, label).clicked() {
                    self.state.current_screen = mode;
                }
            }
        });

        action
    }

    fn pick_csv(title: &str) -> Option<SelectedFile> {
        FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_title(title)
            .pick_file()
            .map(SelectedFile::from_path)
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: UiAction) {
        let repaint = {
            let ctx = ctx.clone();
            move || ctx.request_repaint()
        };

        match action {
            UiAction::AnalyzeText => self.state.analyze_single_text(repaint),
            UiAction::AnalyzeFile => self.state.analyze_file(repaint),
            UiAction::PickBatchFile => {
                if let Some(file) = Self::pick_csv("Файл для анализа") {
                    self.state.current_screen = Screen::Analysis;
                    self.state.select_batch_file(file);
                }
            }
            UiAction::PickEvalFile => {
                if let Some(file) = Self::pick_csv("Файл с разметкой") {
                    self.state.current_screen = Screen::Evaluation;
                    self.state.select_eval_file(file, repaint);
                }
            }
            UiAction::Export => {
                if !self.state.begin_export() {
                    return;
                }
                let path = FileDialog::new()
                    .add_filter("CSV files", &["csv"])
                    .set_file_name(self.state.export_file_name.as_str())
                    .set_title("Сохранить результаты")
                    .save_file();
                if let Some(path) = path {
                    self.state.export_results(&path);
                }
            }
        }
    }

    /// Files dropped anywhere on the window go to the input of the current tab.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        self.state.files_hovered = ctx.input(|i| !i.raw.hovered_files.is_empty());

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.iter().find_map(SelectedFile::from_dropped) else {
            return;
        };
        info!(file = %file.name, "File dropped");

        match self.state.current_screen {
            Screen::Analysis => self.state.select_batch_file(file),
            Screen::Evaluation => {
                let ctx = ctx.clone();
                self.state.select_eval_file(file, move || ctx.request_repaint());
            }
        }
    }
}

impl eframe::App for SentimentApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_requests();
        self.handle_dropped_files(ctx);

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            actions.extend(self.show_menu(ui));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let screen_actions = match self.state.current_screen {
                Screen::Analysis => crate::ui::analysis::show_analysis_view(ui, &mut self.state),
                Screen::Evaluation => crate::ui::evaluation::show_evaluation_view(ui, &self.state),
            };
            actions.extend(screen_actions);
        });

        // Show alert modal if needed
        let alert = self.state.alert.clone();
        if let Some(message) = alert {
            egui::Window::new("Внимание")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(&message);
                    if ui.button("OK").clicked() {
                        self.state.alert = None;
                    }
                });
        }

        for action in actions {
            self.handle_action(ctx, action);
        }

        // Workers wake the UI on completion; this only keeps spinners moving
        if self.state.is_busy(Lane::Analysis) || self.state.is_busy(Lane::Evaluation) {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
