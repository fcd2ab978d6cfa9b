//! 展示层：命令行交互会话（app）与文本渲染/下载（render）

pub mod app;
pub mod render;

pub use app::{SessionApp, SessionCommand};
pub use render::{download_file_name, form_overview, save_plan, trip_summary};
