use thiserror::Error;

#[derive(Error, Debug)]
pub enum TtsError {
    #[error("TTS endpoint rejected request{}: {message}", status.map(|c| format!(" (HTTP {})", c)).unwrap_or_default())]
    Api { message: String, status: Option<u16> },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("All {attempts} attempts failed: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TtsError>;
