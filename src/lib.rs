// Library surface for headless/integration tests and the binary.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod cues;
pub mod game;
pub mod logging;
pub mod motion;
pub mod runtime;
pub mod session;
pub mod text_fit;
pub mod tilt;
pub mod timer;
pub mod ui;
pub mod util;
pub mod words;

pub const APP_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));
