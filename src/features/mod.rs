pub mod export;
pub mod summarize;

pub use export::{export_docx, save_text};
pub use summarize::summarize_text;
