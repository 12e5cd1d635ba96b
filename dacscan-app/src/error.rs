use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("unable to enumerate output devices: {0}")]
    Host(#[source] cpal::DevicesError),

    #[cfg(target_os = "linux")]
    #[error("unable to enumerate sound cards: {0}")]
    Cards(#[source] alsa::Error),
}

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("the standard sound device directory \"{0}\" was not found")]
    DirectoryMissing(PathBuf),

    #[error("the standard sound device directory \"{0}\" could not be accessed: {1}")]
    DirectoryUnreadable(PathBuf, #[source] std::io::Error),
}
