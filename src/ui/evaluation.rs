// src/ui/evaluation.rs
use eframe::egui;

use crate::analysis::SentimentClass;
use crate::state::AppState;
use crate::ui::widgets::{status_line, upload_area};
use crate::ui::UiAction;

pub fn show_evaluation_view(ui: &mut egui::Ui, state: &AppState) -> Vec<UiAction> {
    let mut actions = Vec::new();

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading("Оценка качества (Macro-F1)");
        ui.label(
            egui::RichText::new("CSV с колонками \"text\" и \"label\" (0, 1, 2)").weak(),
        );
        ui.add_space(4.0);

        let placeholder = state
            .eval_file
            .as_ref()
            .map(|f| f.placeholder())
            .unwrap_or_else(|| "📄 Файл не выбран".to_string());
        if upload_area(ui, &placeholder, state.files_hovered) {
            actions.push(UiAction::PickEvalFile);
        }

        ui.add_space(4.0);
        status_line(ui, state.eval_status.as_ref());
    });

    if let Some(report) = &state.last_evaluation {
        ui.add_space(12.0);
        ui.group(|ui| {
            ui.heading(report.summary());
            ui.label(format!("Строк с разметкой: {}", report.rows));
            ui.add_space(4.0);

            egui::Grid::new("evaluation_support")
                .num_columns(3)
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.strong("Класс");
                    ui.strong("Истинных");
                    ui.strong("Предсказанных");
                    ui.end_row();

                    for class in SentimentClass::ALL {
                        let code = class.code();
                        ui.colored_label(class.color(), class.label());
                        ui.label(report.y_true.iter().filter(|&&y| y == code).count().to_string());
                        ui.label(report.y_pred.iter().filter(|&&y| y == code).count().to_string());
                        ui.end_row();
                    }
                });
        });
    }

    actions
}
