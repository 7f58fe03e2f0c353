use crate::PaintApp;
use crate::input::SurfaceMapping;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let canvas_rect = ui.available_rect_before_wrap();
            app.resize_surface(canvas_rect.width().floor() as u32, canvas_rect.height().floor() as u32);

            let surface = app.session().surface();
            let mapping = SurfaceMapping::new(canvas_rect, surface.width(), surface.height());
            app.handle_input(ctx, &mapping);

            let response = ui.allocate_rect(canvas_rect, egui::Sense::drag());
            if let Some(texture) = app.surface_texture(ctx) {
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                ui.painter().image(texture, canvas_rect, uv, egui::Color32::WHITE);
            }

            if app.session().is_drawing() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            } else if response.hovered() {
                ctx.set_cursor_icon(egui::CursorIcon::Default);
            }
        });
}
