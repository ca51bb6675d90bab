//! Final mixdown through ffmpeg.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Argument vector for the mixdown, kept separate so it can be inspected.
///
/// `amix` sums both inputs and the output lasts as long as the longer one.
pub fn ffmpeg_args(music: &Path, voice: &Path, out: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-y"),
        OsString::from("-i"),
        music.as_os_str().into(),
        OsString::from("-i"),
        voice.as_os_str().into(),
        OsString::from("-filter_complex"),
        OsString::from("amix=inputs=2:duration=longest"),
        out.as_os_str().into(),
    ]
}

/// Mix the music and voice stems into the final song file.
///
/// Requires `ffmpeg` on PATH; a missing binary or nonzero exit status is an
/// [`Error::ExternalTool`] carrying the captured stderr.
pub fn mix_to_song(music: &Path, voice: &Path, out: &Path) -> Result<()> {
    let args = ffmpeg_args(music, voice, out);
    debug!(?args, "invoking ffmpeg");

    let output = Command::new("ffmpeg")
        .args(&args)
        .output()
        .map_err(|e| Error::ExternalTool {
            tool: "ffmpeg".into(),
            detail: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::ExternalTool {
            tool: "ffmpeg".into(),
            detail: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    info!(out = %out.display(), "final song mixed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_ffmpeg_args_layout() {
        let music = PathBuf::from("music.wav");
        let voice = PathBuf::from("voice.wav");
        let out = PathBuf::from("song.wav");

        let args = ffmpeg_args(&music, &voice, &out);
        assert_eq!(args[0], "-y");
        assert_eq!(args[2], "music.wav");
        assert_eq!(args[4], "voice.wav");
        assert_eq!(args[6], "amix=inputs=2:duration=longest");
        assert_eq!(args[7], "song.wav");
    }

    #[test]
    fn test_mix_without_inputs_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.wav");
        let out = dir.path().join("song.wav");
        // Either ffmpeg is absent or it exits nonzero on missing inputs;
        // both must surface as an external-tool error.
        let result = mix_to_song(&missing, &missing, &out);
        assert!(matches!(result, Err(Error::ExternalTool { .. })));
    }
}
