//! Shared TTS client library for the novel-cli workspace.
//!
//! Wraps a GPT-SoVITS-style HTTP synthesis endpoint behind a blocking
//! client with bounded retries. Chapters are synthesized one at a time;
//! there is no concurrency in this crate.

pub mod client;
pub mod error;

pub use client::{SynthesisRequest, TtsClient, MAX_RETRIES};
pub use error::{Result, TtsError};
