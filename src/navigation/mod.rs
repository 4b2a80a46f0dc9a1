//! Redirect handoff.
//!
//! Once a target is reachable the gate hands its URL to a [`Navigator`]
//! exactly once. What "redirect" means depends on the host: a shell wrapper
//! reads the URL from stdout, a device image launches a browser on it.

pub mod print;
pub mod spawn;

use std::sync::Arc;

use url::Url;

use crate::config::{NavigationConfig, NavigationMode};
use crate::error::NavigateError;

pub use print::PrintNavigator;
pub use spawn::SpawnNavigator;

/// Transfers the host's execution context to a URL.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, url: &Url) -> Result<(), NavigateError>;
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn navigate(&self, url: &Url) -> Result<(), NavigateError> {
        (**self).navigate(url)
    }
}

impl<N: Navigator + ?Sized> Navigator for Box<N> {
    fn navigate(&self, url: &Url) -> Result<(), NavigateError> {
        (**self).navigate(url)
    }
}

/// Build the navigator selected by configuration.
pub fn from_config(config: &NavigationConfig) -> Arc<dyn Navigator> {
    match config.mode {
        NavigationMode::Print => Arc::new(PrintNavigator::stdout()),
        NavigationMode::Spawn => Arc::new(SpawnNavigator::new(
            config.command.clone(),
            config.args.clone(),
        )),
    }
}
