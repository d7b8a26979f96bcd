pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod view;
pub mod widget;

pub use client::{HttpSearchClient, SearchBackend};
pub use error::WidgetError;
pub use view::{MemoryView, WidgetView};
pub use widget::{ClickOutcome, SearchWidget};
