//! Hands links to an external browser.

use std::io;

/// Something that can show a URL to the user.
pub trait LinkOpener {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Launches the system browser, or a configured program, detached from the
/// terminal so its output never lands on the UI.
#[derive(Debug, Clone, Default)]
pub struct BrowserOpener {
    command: Option<String>,
}

impl BrowserOpener {
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.filter(|c| !c.trim().is_empty()),
        }
    }
}

impl LinkOpener for BrowserOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        tracing::debug!("Opening {}", url);
        match &self.command {
            Some(app) => open::with_detached(url, app),
            None => open::that_detached(url),
        }
    }
}
