use crate::command::Command;
use crate::config::PaintConfig;
use crate::event::ActionLog;
use crate::export;
use crate::input::{InputEvent, InputHandler, SurfaceMapping, route_event};
use crate::panels::{central_panel, tools_panel};
use crate::session::DrawingSession;
use crate::texture::SurfaceTexture;
use crate::tools::{Tool, ToolStyle};

const STYLE_KEY: &str = "pixel_paint_tool_style";

pub struct PaintApp {
    session: DrawingSession,
    style: ToolStyle,
    config: PaintConfig,
    input: InputHandler,
    texture: SurfaceTexture,
    action_log: ActionLog,
    /// Last export or error message shown in the tools panel
    status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: PaintConfig) -> Self {
        let style = cc
            .storage
            .and_then(|storage| eframe::get_value::<ToolStyle>(storage, STYLE_KEY))
            .unwrap_or_default();
        log::info!("Starting with {} tool, size {}", style.tool, style.brush_size);
        Self::with_style(config, style)
    }

    pub fn with_style(config: PaintConfig, style: ToolStyle) -> Self {
        let session = DrawingSession::new(&config);
        let action_log = ActionLog::new();
        session.subscribe(Box::new(action_log.clone()));

        Self {
            session,
            style,
            config,
            input: InputHandler::new(),
            texture: SurfaceTexture::new(),
            action_log,
            status: None,
        }
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn style(&self) -> &ToolStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut ToolStyle {
        &mut self.style
    }

    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.action_log
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn texture_mut(&mut self) -> &mut SurfaceTexture {
        &mut self.texture
    }

    /// Texture holding the current surface pixels, uploaded if stale
    pub fn surface_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureId> {
        self.texture.texture_id(ctx, self.session.surface())
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.style.tool != tool {
            log::info!("Tool selected: {}", tool);
            self.style.tool = tool;
        }
    }

    /// Feed this frame's pointer input into the session
    pub fn handle_input(&mut self, ctx: &egui::Context, mapping: &SurfaceMapping) {
        let events = self.input.process_input(ctx, mapping);
        self.apply_input(&events);
    }

    pub fn apply_input(&mut self, events: &[InputEvent]) {
        for event in events {
            route_event(event, &mut self.session, &self.style);
        }
        if !events.is_empty() {
            self.texture.mark_dirty();
        }
    }

    /// Run a host command, reporting failures through the status line
    pub fn execute(&mut self, command: Command) {
        match self.session.execute(command) {
            Ok(Some(svg)) => self.save_export(&svg),
            Ok(None) => {}
            Err(err) => {
                log::error!("{:?} failed: {}", command, err);
                self.status = Some(format!("{:?} failed: {}", command, err));
            }
        }
        if command.mutates_surface() {
            self.texture.mark_dirty();
        }
    }

    /// Container size changed; sizes are clamped to the configured minimum
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        let min = self.config.min_surface_size;
        let (width, height) = (width.max(min), height.max(min));
        let surface = self.session.surface();
        if surface.is_initialized() && (surface.width(), surface.height()) == (width, height) {
            return;
        }
        self.execute(Command::Resize { width, height });
    }

    fn save_export(&mut self, svg: &str) {
        match export::save_svg(&self.config.export_file_name, svg) {
            Ok(()) => self.status = Some(format!("Saved {}", self.config.export_file_name)),
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.status = Some(format!("Export failed: {}", err));
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let keys: Vec<(egui::Key, egui::Modifiers)> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        modifiers,
                        ..
                    } => Some((*key, *modifiers)),
                    _ => None,
                })
                .collect()
        });

        for (key, modifiers) in keys {
            if modifiers.command {
                match key {
                    egui::Key::Z if modifiers.shift => self.execute(Command::Redo),
                    egui::Key::Z => self.execute(Command::Undo),
                    egui::Key::Y => self.execute(Command::Redo),
                    _ => {}
                }
            } else if !modifiers.any() {
                let letter = key.name().chars().next().filter(|_| key.name().len() == 1);
                if let Some(tool) = letter.and_then(Tool::from_shortcut) {
                    self.set_tool(tool);
                }
            }
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, STYLE_KEY, &self.style);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
