//! Print the URL for a wrapping process to pick up.

use std::io::{self, Write};
use std::sync::Mutex;

use url::Url;

use crate::error::NavigateError;
use crate::navigation::Navigator;

/// Writes each reachable URL as one line.
pub struct PrintNavigator {
    out: Mutex<Box<dyn Write + Send>>,
}

impl PrintNavigator {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }
}

impl Navigator for PrintNavigator {
    fn navigate(&self, url: &Url) -> Result<(), NavigateError> {
        // A poisoned lock only means another writer panicked mid-line.
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{}", url).map_err(NavigateError::Write)?;
        out.flush().map_err(NavigateError::Write)
    }
}
