pub mod app;
pub mod cancel;
pub mod config;
pub mod format;
pub mod input;
pub mod logging;
pub mod shutdown;
pub mod system;
pub mod terminal;
pub mod ui;
