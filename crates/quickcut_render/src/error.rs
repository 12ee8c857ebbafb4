use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no clips to export")]
    NoClips,

    #[error("source not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("failed to execute ffprobe: {0}")]
    FfprobeExec(String),

    #[error("probe failed: {0}")]
    ProbeFailed(String),

    #[error("ffmpeg not found")]
    FfmpegNotFound,

    #[error("segment extraction failed: {0}")]
    ExtractFailed(String),

    #[error("concatenation failed: {0}")]
    ConcatFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
