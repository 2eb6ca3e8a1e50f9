// src/ui/results.rs
use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::analysis::summary::{
    distribution_slices, table_rows, ConfidenceBuckets, DistributionSlice, Statistics,
    BUCKET_SERIES_NAME,
};
use crate::analysis::{ResultSet, SentimentClass};
use crate::state::result_store::ResultStore;
use crate::ui::widgets::{stat_card, ACCENT};

const DOUGHNUT_SIZE: f32 = 220.0;
const DOUGHNUT_HOLE: f32 = 0.55;
// Angular step used to split a segment into convex quads
const SEGMENT_STEP: f64 = 0.05;

/// Draws the whole results section, or nothing before the first analysis.
/// Returns true when the export button was clicked.
pub fn show_results(ui: &mut egui::Ui, store: &ResultStore) -> bool {
    let Some(results) = store.current() else {
        return false;
    };

    let mut export_clicked = false;
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.heading("Результаты анализа");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                export_clicked = ui.button("⬇ Скачать CSV").clicked();
            });
        });
        ui.label(
            egui::RichText::new(format!(
                "Источник: {}, {}",
                results.origin,
                results.completed_at.format("%Y-%m-%d %H:%M:%S")
            ))
            .weak(),
        );
        ui.add_space(8.0);

        let stats = Statistics::from_results(results);
        show_statistics(ui, &stats);
        ui.add_space(12.0);

        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(ui.available_width() / 2.0);
                ui.heading("Распределение тональности");
                show_distribution_chart(ui, &stats);
            });
            ui.vertical(|ui| {
                ui.heading("Уверенность модели");
                show_confidence_chart(ui, &ConfidenceBuckets::from_results(results));
            });
        });
        ui.add_space(12.0);

        show_table(ui, results);
    });

    export_clicked
}

fn show_statistics(ui: &mut egui::Ui, stats: &Statistics) {
    ui.horizontal(|ui| {
        for class in SentimentClass::ALL {
            stat_card(ui, class.plural_label(), stats.count(class), class.color());
        }
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_width(120.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(format!("Всего: {}", stats.total)).size(20.0).strong());
            });
        });
    });
}

fn show_table(ui: &mut egui::Ui, results: &ResultSet) {
    let rows = table_rows(results);

    egui::ScrollArea::vertical()
        .id_source("results_table_scroll")
        .max_height(360.0)
        .show(ui, |ui| {
            egui::Grid::new("results_table")
                .num_columns(4)
                .striped(true)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    ui.strong("ID");
                    ui.strong("Текст");
                    ui.strong("Тональность");
                    ui.strong("Уверенность");
                    ui.end_row();

                    for row in &rows {
                        ui.label(&row.id);
                        ui.add(egui::Label::new(&row.text).wrap(true));
                        ui.colored_label(row.sentiment.color(), row.label);
                        ui.label(&row.confidence);
                        ui.end_row();
                    }
                });
        });
}

fn show_distribution_chart(ui: &mut egui::Ui, stats: &Statistics) {
    let slices = distribution_slices(stats);
    let (response, painter) = ui.allocate_painter(
        egui::vec2(DOUGHNUT_SIZE, DOUGHNUT_SIZE),
        egui::Sense::hover(),
    );

    let center = response.rect.center();
    let outer = DOUGHNUT_SIZE / 2.0 - 4.0;
    let inner = outer * DOUGHNUT_HOLE;

    for slice in &slices {
        for shape in segment_shapes(slice, center, inner, outer) {
            painter.add(shape);
        }
    }

    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        stats.total.to_string(),
        egui::FontId::proportional(22.0),
        ui.visuals().strong_text_color(),
    );

    // Legend
    ui.horizontal_wrapped(|ui| {
        for class in SentimentClass::ALL {
            ui.colored_label(class.color(), "⏺");
            ui.label(format!("{} ({})", class.plural_label(), stats.count(class)));
        }
    });
}

fn ring_point(center: egui::Pos2, radius: f32, angle: f64) -> egui::Pos2 {
    egui::pos2(
        center.x + radius * angle.sin() as f32,
        center.y - radius * angle.cos() as f32,
    )
}

fn segment_shapes(
    slice: &DistributionSlice,
    center: egui::Pos2,
    inner: f32,
    outer: f32,
) -> Vec<egui::Shape> {
    let color = slice.class.color();
    let span = slice.end_angle - slice.start_angle;
    let steps = ((span / SEGMENT_STEP).ceil() as usize).max(1);

    (0..steps)
        .map(|i| {
            let a0 = slice.start_angle + span * i as f64 / steps as f64;
            let a1 = slice.start_angle + span * (i + 1) as f64 / steps as f64;
            egui::Shape::convex_polygon(
                vec![
                    ring_point(center, outer, a0),
                    ring_point(center, outer, a1),
                    ring_point(center, inner, a1),
                    ring_point(center, inner, a0),
                ],
                color,
                egui::Stroke::NONE,
            )
        })
        .collect()
}

fn show_confidence_chart(ui: &mut egui::Ui, buckets: &ConfidenceBuckets) {
    let bars: Vec<Bar> = buckets
        .labeled()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::new(i as f64, count as f64)
                .name(label)
                .width(0.7)
                .fill(ACCENT)
        })
        .collect();

    Plot::new("confidence_histogram")
        .height(DOUGHNUT_SIZE)
        .allow_zoom(false)
        .allow_drag(false)
        .show_background(false)
        .include_y(0.0)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(BUCKET_SERIES_NAME).color(ACCENT));
        });

    ui.horizontal_wrapped(|ui| {
        for (label, count) in buckets.labeled() {
            ui.label(format!("{}: {}", label, count));
        }
    });
}
