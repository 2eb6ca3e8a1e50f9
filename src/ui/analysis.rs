// src/ui/analysis.rs
use eframe::egui;

use crate::state::request::Lane;
use crate::state::AppState;
use crate::ui::results::show_results;
use crate::ui::widgets::{status_line, upload_area};
use crate::ui::UiAction;

pub fn show_analysis_view(ui: &mut egui::Ui, state: &mut AppState) -> Vec<UiAction> {
    let mut actions = Vec::new();
    let busy = state.is_busy(Lane::Analysis);

    egui::ScrollArea::vertical()
        .id_source("analysis_view_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.horizontal_top(|ui| {
                let half = (ui.available_width() - 12.0) / 2.0;

                // Quick analysis of a single text
                ui.group(|ui| {
                    ui.set_width(half);
                    ui.vertical(|ui| {
                        ui.heading("Быстрый анализ");
                        ui.add_space(4.0);
                        ui.add(
                            egui::TextEdit::multiline(&mut state.single_text)
                                .hint_text("Введите текст для анализа")
                                .desired_rows(5)
                                .desired_width(f32::INFINITY),
                        );
                        ui.add_space(4.0);
                        if ui.button("🔍 Анализировать текст").clicked() {
                            actions.push(UiAction::AnalyzeText);
                        }
                        status_line(ui, state.quick_status.as_ref());
                    });
                });

                // Batch analysis of a CSV file
                ui.group(|ui| {
                    ui.set_width(half);
                    ui.vertical(|ui| {
                        ui.heading("Анализ файла");
                        ui.label(egui::RichText::new("CSV с колонкой \"text\"").weak());
                        ui.add_space(4.0);

                        let placeholder = state
                            .batch_file
                            .as_ref()
                            .map(|f| f.placeholder())
                            .unwrap_or_else(|| "📄 Файл не выбран".to_string());
                        if upload_area(ui, &placeholder, state.files_hovered) {
                            actions.push(UiAction::PickBatchFile);
                        }

                        ui.add_space(4.0);
                        ui.horizontal(|ui| {
                            if ui.button("▶ Анализировать файл").clicked() {
                                actions.push(UiAction::AnalyzeFile);
                            }
                            if busy {
                                ui.spinner();
                            }
                        });
                        status_line(ui, state.file_status.as_ref());
                    });
                });
            });

            ui.add_space(16.0);

            if show_results(ui, &state.results) {
                actions.push(UiAction::Export);
            }
        });

    actions
}
