//! GUI module - egui-based summarizer window

pub mod app;
mod theme;

pub use app::{SummarizerApp, run};
