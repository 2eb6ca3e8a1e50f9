// src/ui/widgets.rs
use eframe::egui;

use crate::state::{StatusKind, StatusMessage};

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x66, 0x7e, 0xea);

fn status_color(kind: StatusKind) -> egui::Color32 {
    match kind {
        StatusKind::Info | StatusKind::Loading => egui::Color32::from_rgb(0x17, 0xa2, 0xb8),
        StatusKind::Success => egui::Color32::from_rgb(0x28, 0xa7, 0x45),
        StatusKind::Error => egui::Color32::from_rgb(0xdc, 0x35, 0x45),
    }
}

pub fn status_line(ui: &mut egui::Ui, status: Option<&StatusMessage>) {
    let Some(status) = status else {
        return;
    };

    let color = status_color(status.kind);
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, color))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                if status.kind == StatusKind::Loading {
                    ui.spinner();
                }
                ui.colored_label(color, &status.text);
            });
        });
}

pub fn stat_card(ui: &mut egui::Ui, title: &str, value: usize, color: egui::Color32) {
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, color))
        .show(ui, |ui| {
            ui.set_min_width(120.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(value.to_string()).size(28.0).strong().color(color));
                ui.label(title);
            });
        });
}

/// Framed drop zone with a picker button. Returns true when the button was
/// clicked.
pub fn upload_area(ui: &mut egui::Ui, placeholder: &str, highlighted: bool) -> bool {
    let stroke_color = if highlighted {
        ACCENT
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };

    let mut clicked = false;
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(if highlighted { 2.0 } else { 1.0 }, stroke_color))
        .inner_margin(egui::Margin::same(16.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(placeholder).size(16.0));
                ui.add_space(4.0);
                ui.label(egui::RichText::new("Перетащите CSV сюда или").weak());
                clicked = ui.button("📂 Выбрать файл").clicked();
            });
        });
    clicked
}
