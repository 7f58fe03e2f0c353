use crate::PaintApp;
use crate::color::{self, COLOR_PALETTE};
use crate::command::Command;
use crate::components::ToolButton;
use crate::tools::{BRUSH_SIZES, ShapeMode, Tool};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active_tool = app.style().tool;
            ui.horizontal_wrapped(|ui| {
                for tool in Tool::ALL {
                    if ToolButton::new(tool, tool == active_tool).show(ui).clicked() {
                        app.set_tool(tool);
                    }
                }
            });
            ui.separator();

            ui.label("Color");
            ui.horizontal_wrapped(|ui| {
                for (name, hex) in COLOR_PALETTE {
                    let Ok(swatch) = color::parse_hex(hex) else {
                        continue;
                    };
                    let selected = app.style().color == swatch;
                    let button = egui::Button::new("")
                        .fill(swatch)
                        .min_size(egui::vec2(20.0, 20.0))
                        .selected(selected);
                    if ui.add(button).on_hover_text(name).clicked() {
                        app.style_mut().color = swatch;
                    }
                }
            });
            ui.horizontal(|ui| {
                ui.color_edit_button_srgba(&mut app.style_mut().color);
                ui.monospace(color::to_hex(app.style().color));
            });
            ui.separator();

            ui.label("Brush size");
            for (name, size) in BRUSH_SIZES {
                let selected = app.style().brush_size == size;
                if ui.selectable_label(selected, format!("{name} ({size}px)")).clicked() {
                    app.style_mut().brush_size = size;
                }
            }
            ui.separator();

            ui.horizontal(|ui| {
                let mode = &mut app.style_mut().shape_mode;
                ui.selectable_value(mode, ShapeMode::Outline, "Outline");
                ui.selectable_value(mode, ShapeMode::Fill, "Fill");
            });
            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.session().can_undo();
                let can_redo = app.session().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.execute(Command::Undo);
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.execute(Command::Redo);
                }
                if ui.button("Clear").clicked() {
                    app.execute(Command::Clear);
                }
            });
            if ui.button("Export SVG").clicked() {
                app.execute(Command::Export);
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label(format!("Undo stack size: {}", app.session().history_len()));
                ui.label(format!("Redo stack size: {}", app.session().redo_len()));
            });
            ui.label(format!("Actions: {}", app.action_log().len()));
            if let Some(status) = app.status() {
                ui.label(status);
            }
        });
}
