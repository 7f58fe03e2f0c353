#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod command;
pub mod components;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod fill;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod session;
pub mod stroke;
pub mod surface;
pub mod texture;
pub mod tools;

pub use app::PaintApp;
pub use command::{Command, SnapshotHistory};
pub use config::PaintConfig;
pub use error::{ExportError, PaintError, PaintResult};
pub use event::{ActionLog, EditorEvent, EventBus, EventHandler};
pub use input::{InputEvent, SurfaceMapping};
pub use session::DrawingSession;
pub use stroke::{ActionBuilder, DrawAction};
pub use surface::{PixelSurface, Snapshot};
pub use tools::{ShapeMode, Tool, ToolStyle};
