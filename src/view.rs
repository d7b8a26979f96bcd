use std::sync::Mutex;

use crate::render::ResultsContent;

/// The three elements a widget is bound to: the query input, the alert
/// channel and the results container. Implementations use interior
/// mutability since overlapping clicks share one view.
pub trait WidgetView {
    fn query_value(&self) -> String;

    fn alert(&self, message: &str);

    /// Replace the whole inner content of the results container.
    fn replace_results(&self, content: &ResultsContent);
}

/// A headless view that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryView {
    query: Mutex<String>,
    results_html: Mutex<String>,
    alerts: Mutex<Vec<String>>,
}

impl MemoryView {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Mutex::new(query.into()),
            ..Default::default()
        }
    }

    /// Start with some pre-existing container content.
    pub fn with_results_html(self, html: impl Into<String>) -> Self {
        *lock(&self.results_html) = html.into();
        self
    }

    pub fn set_query(&self, query: impl Into<String>) {
        *lock(&self.query) = query.into();
    }

    pub fn results_html(&self) -> String {
        lock(&self.results_html).clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        lock(&self.alerts).clone()
    }
}

impl WidgetView for MemoryView {
    fn query_value(&self) -> String {
        lock(&self.query).clone()
    }

    fn alert(&self, message: &str) {
        lock(&self.alerts).push(message.to_string());
    }

    fn replace_results(&self, content: &ResultsContent) {
        *lock(&self.results_html) = content.to_html();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    // A panic while holding the lock leaves plain data behind; keep going.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Html,
}

/// Drives the widget from a terminal: the query is set line by line,
/// alerts go to stderr and results to stdout.
#[derive(Debug)]
pub struct TerminalView {
    query: Mutex<String>,
    format: OutputFormat,
}

impl TerminalView {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            query: Mutex::new(String::new()),
            format,
        }
    }

    pub fn set_query(&self, query: impl Into<String>) {
        *lock(&self.query) = query.into();
    }
}

impl WidgetView for TerminalView {
    fn query_value(&self) -> String {
        lock(&self.query).clone()
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }

    fn replace_results(&self, content: &ResultsContent) {
        match self.format {
            OutputFormat::Text => println!("{}", content.to_text()),
            OutputFormat::Html => println!("{}", content.to_html()),
        }
    }
}
