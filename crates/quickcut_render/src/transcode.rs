use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use uuid::Uuid;

use crate::error::{RenderError, Result};

/// The process-invocation boundary to the external transcoder.
///
/// Both operations block until the tool finishes and report failure with the
/// captured diagnostic text. The exporter drives this trait; tests substitute
/// a scripted implementation.
pub trait Transcoder {
    /// Cut a frame-accurate segment `[start, start + duration)` (source
    /// seconds) out of `source` into `out`. Must re-encode: stream copy
    /// snaps to keyframes and the cut points here are arbitrary.
    fn extract(&self, source: &Path, start_secs: f64, duration_secs: f64, out: &Path)
        -> Result<()>;

    /// Join segments at the stream level, without re-encoding, into `out`.
    /// Valid only because every segment comes out of `extract` with the same
    /// encoding profile.
    fn concat(&self, segments: &[PathBuf], out: &Path) -> Result<()>;
}

/// Production transcoder backed by the `ffmpeg` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegTranscoder;

impl FfmpegTranscoder {
    fn run(&self, args: &[String]) -> Result<std::process::Output> {
        Command::new("ffmpeg").args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RenderError::FfmpegNotFound
            } else {
                RenderError::Io(e)
            }
        })
    }
}

impl Transcoder for FfmpegTranscoder {
    fn extract(
        &self,
        source: &Path,
        start_secs: f64,
        duration_secs: f64,
        out: &Path,
    ) -> Result<()> {
        // -ss after -i seeks on decoded frames; fast but frame-accurate.
        let args = vec![
            "-i".to_string(),
            source.to_string_lossy().into_owned(),
            "-ss".to_string(),
            start_secs.to_string(),
            "-t".to_string(),
            duration_secs.to_string(),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-preset".to_string(),
            "fast".to_string(),
            "-crf".to_string(),
            "18".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-b:a".to_string(),
            "192k".to_string(),
            "-y".to_string(),
            out.to_string_lossy().into_owned(),
        ];

        tracing::debug!(?source, start_secs, duration_secs, "ffmpeg extract");
        let output = self.run(&args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::ExtractFailed(stderr.into_owned()));
        }
        Ok(())
    }

    fn concat(&self, segments: &[PathBuf], out: &Path) -> Result<()> {
        debug_assert!(segments.len() >= 2);

        // The concat demuxer reads an ordered manifest, one segment per line.
        let manifest_dir = segments[0].parent().unwrap_or_else(|| Path::new("."));
        let manifest_path = manifest_dir.join(format!("concat_{}.txt", Uuid::new_v4()));
        fs::write(&manifest_path, build_concat_manifest(segments))?;

        let args = vec![
            "-f".to_string(),
            "concat".to_string(),
            "-safe".to_string(),
            "0".to_string(),
            "-i".to_string(),
            manifest_path.to_string_lossy().into_owned(),
            "-c".to_string(),
            "copy".to_string(),
            "-y".to_string(),
            out.to_string_lossy().into_owned(),
        ];

        tracing::debug!(segments = segments.len(), "ffmpeg concat");
        let result = self.run(&args);

        if let Err(e) = fs::remove_file(&manifest_path) {
            tracing::warn!(path = %manifest_path.display(), error = %e, "failed to remove concat manifest");
        }

        let output = result?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::ConcatFailed(stderr.into_owned()));
        }
        Ok(())
    }
}

/// One `file '...'` line per segment, in order. Single quotes inside a path
/// have to be closed, escaped, and reopened for the demuxer.
fn build_concat_manifest(segments: &[PathBuf]) -> String {
    segments
        .iter()
        .map(|p| format!("file '{}'", p.to_string_lossy().replace('\'', "'\\''")))
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_lists_segments_in_order() {
        let segments = vec![
            PathBuf::from("/tmp/clip_0_a.mp4"),
            PathBuf::from("/tmp/clip_1_b.mp4"),
            PathBuf::from("/tmp/clip_2_c.mp4"),
        ];
        let manifest = build_concat_manifest(&segments);
        assert_eq!(
            manifest,
            "file '/tmp/clip_0_a.mp4'\nfile '/tmp/clip_1_b.mp4'\nfile '/tmp/clip_2_c.mp4'"
        );
    }

    #[test]
    fn manifest_escapes_embedded_quotes() {
        let segments = vec![PathBuf::from("/tmp/it's here/clip.mp4")];
        let manifest = build_concat_manifest(&segments);
        assert_eq!(manifest, "file '/tmp/it'\\''s here/clip.mp4'");
    }
}
