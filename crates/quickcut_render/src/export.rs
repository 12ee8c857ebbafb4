use quickcut_core::types::Clip;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{RenderError, Result};
use crate::transcode::Transcoder;

/// Handle for a finished export. Content retrieval is the caller's concern;
/// the pipeline only hands back where the file ended up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOutput {
    pub export_id: Uuid,
    pub output_path: PathBuf,
}

/// Turns an ordered clip list plus a source file into one output file.
///
/// Each clip is extracted into a per-run temporary segment, then the segments
/// are joined losslessly (or copied directly for a single clip). Temporary
/// segments never outlive the export attempt, whether it succeeds or fails.
pub struct Exporter<T: Transcoder> {
    transcoder: T,
    temp_dir: PathBuf,
    exports_dir: PathBuf,
}

impl<T: Transcoder> Exporter<T> {
    pub fn new(
        transcoder: T,
        temp_dir: impl Into<PathBuf>,
        exports_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            transcoder,
            temp_dir: temp_dir.into(),
            exports_dir: exports_dir.into(),
        }
    }

    /// Materialize `clips` (in timeline order) from `source_path` into a
    /// single output file.
    ///
    /// Source times pass through to the transcoder unmodified; the edit
    /// engine already enforced every extent constraint that matters.
    pub fn export(&self, source_path: &Path, clips: &[Clip]) -> Result<ExportOutput> {
        if clips.is_empty() {
            return Err(RenderError::NoClips);
        }
        if !source_path.exists() {
            return Err(RenderError::SourceNotFound(source_path.to_path_buf()));
        }

        fs::create_dir_all(&self.temp_dir)?;
        fs::create_dir_all(&self.exports_dir)?;

        // Index plus fresh id keeps names collision-free across concurrent
        // exports sharing the temp namespace.
        let mut segments: Vec<PathBuf> = Vec::with_capacity(clips.len());
        for (i, clip) in clips.iter().enumerate() {
            let segment = self
                .temp_dir
                .join(format!("clip_{}_{}.mp4", i, Uuid::new_v4()));
            tracing::info!(
                index = i,
                source_start = clip.source_start,
                duration = clip.duration,
                "extracting segment"
            );
            // Registered before the attempt so a partial artifact from a
            // failed extraction is swept up too.
            segments.push(segment.clone());

            if let Err(e) = self.transcoder.extract(
                source_path,
                clip.source_start,
                clip.duration,
                &segment,
            ) {
                cleanup_segments(&segments);
                return Err(e);
            }
        }

        let export_id = Uuid::new_v4();
        let output_path = self.exports_dir.join(format!("export_{export_id}.mp4"));

        if segments.len() == 1 {
            // Single clip: the segment already is the output.
            if let Err(e) = fs::copy(&segments[0], &output_path) {
                cleanup_segments(&segments);
                return Err(e.into());
            }
        } else if let Err(e) = self.transcoder.concat(&segments, &output_path) {
            cleanup_segments(&segments);
            return Err(e);
        }

        cleanup_segments(&segments);
        tracing::info!(%export_id, path = %output_path.display(), "export finished");
        Ok(ExportOutput {
            export_id,
            output_path,
        })
    }
}

/// Best-effort removal of temporary segments. A segment that was never
/// written (failed extraction) is not an error; anything else that refuses
/// to go is logged and left behind.
fn cleanup_segments(segments: &[PathBuf]) {
    for path in segments {
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove temp segment");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
