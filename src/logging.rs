//! Log output installation.
//!
//! The terminal interface owns stdout and stderr while it runs, so log events are only recorded
//! when a log file is configured.

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{eyre, Result, WrapErr as _};
use tracing::Level;

/// Installs a plain-text subscriber that writes every event at debug level or above to `path`.
///
/// The file is truncated first.
///
/// # Errors
///
/// This function returns an error if the file cannot be created or a global subscriber was
/// already installed.
pub fn init(path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_reports_unwritable_path() {
        let result = init(Path::new("/nonexistent-directory/quantum-maze.log"));

        let message = format!("{:?}", result.expect_err("log file should not be created"));
        assert!(message.contains("failed to create log file"));
    }
}
