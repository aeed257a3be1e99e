use std::sync::{Arc, Mutex};

use crate::error::{AppError, AppResult};

pub trait ClipboardSink {
    fn write(&mut self, text: &str) -> AppResult<()>;
}

/// The system clipboard via `cli-clipboard`.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write(&mut self, text: &str) -> AppResult<()> {
        cli_clipboard::set_contents(text.to_owned())
            .map_err(|err| AppError::Clipboard(err.to_string()))
    }
}

/// Keeps the last copied text in memory. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|contents| contents.clone())
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write(&mut self, text: &str) -> AppResult<()> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| AppError::Clipboard("clipboard state is poisoned".to_string()))?;
        *contents = Some(text.to_owned());
        Ok(())
    }
}
