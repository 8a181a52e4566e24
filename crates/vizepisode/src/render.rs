#![forbid(unsafe_code)]

//! Rendering through the external Graphviz `dot` program.
//!
//! The DOT text is piped to `dot -T<format>` and the image bytes are read back from stdout.

use crate::{Visualizer, VizResult, read_file, write_file};
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::str::FromStr;

/// Environment variable overriding the Graphviz binary.
pub const DOT_BIN_ENV: &str = "VIZEPISODE_DOT";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to run Graphviz `{}`: {source}", program.to_string_lossy())]
    Spawn {
        program: OsString,
        #[source]
        source: std::io::Error,
    },
    #[error("Graphviz exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
    Pdf,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
            ImageFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub format: ImageFormat,
    /// Graphviz binary; falls back to `$VIZEPISODE_DOT`, then `dot` on `PATH`.
    pub dot_bin: Option<PathBuf>,
}

impl RenderOptions {
    pub fn program(&self) -> OsString {
        match &self.dot_bin {
            Some(path) => path.clone().into_os_string(),
            None => std::env::var_os(DOT_BIN_ENV).unwrap_or_else(|| "dot".into()),
        }
    }
}

/// `season_1.yml` -> `season_1.dot.svg`.
pub fn image_out_path(input: &Path, format: ImageFormat) -> PathBuf {
    input.with_extension(format!("dot.{}", format.extension()))
}

/// Runs Graphviz on `dot_source` and returns the rendered image.
pub fn render_dot(dot_source: &str, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
    let program = options.program();
    let spawn_err = |source| RenderError::Spawn {
        program: program.clone(),
        source,
    };

    let mut child = Command::new(&program)
        .arg(format!("-T{}", options.format.extension()))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn_err)?;

    // Feed stdin from a thread: dot may fill the stdout pipe before it has read all input.
    let stdin = child.stdin.take();
    let source = dot_source.to_owned();
    let writer = std::thread::spawn(move || -> std::io::Result<()> {
        if let Some(mut stdin) = stdin {
            stdin.write_all(source.as_bytes())?;
        }
        Ok(())
    });

    let output = child.wait_with_output().map_err(spawn_err)?;
    // A write error here means dot exited early; its status and stderr say why.
    let _ = writer.join();

    if !output.status.success() {
        return Err(RenderError::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    tracing::debug!(
        program = %program.to_string_lossy(),
        bytes = output.stdout.len(),
        "graphviz rendered"
    );
    Ok(output.stdout)
}

impl Visualizer {
    /// Translates `input` and renders it with Graphviz instead of writing the DOT text.
    pub fn render_file(&self, input: &Path, options: &RenderOptions) -> VizResult<PathBuf> {
        let dot = self.translate_str(&read_file(input)?)?;
        let image = render_dot(&dot, options)?;
        let out = image_out_path(input, options.format);
        write_file(&out, image)?;
        tracing::info!(input = %input.display(), out = %out.display(), "rendered image");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VizError;

    #[test]
    fn parses_formats_case_insensitively() {
        assert_eq!("SVG".parse::<ImageFormat>().unwrap(), ImageFormat::Svg);
        assert_eq!(" png ".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        let err = "gif".parse::<ImageFormat>().unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(ref f) if f == "gif"));
    }

    #[test]
    fn image_path_keeps_dot_infix() {
        assert_eq!(
            image_out_path(Path::new("s1/ep1.yml"), ImageFormat::Svg),
            PathBuf::from("s1/ep1.dot.svg")
        );
        assert_eq!(
            image_out_path(Path::new("ep1.yml"), ImageFormat::Pdf),
            PathBuf::from("ep1.dot.pdf")
        );
    }

    #[test]
    fn explicit_binary_wins() {
        let options = RenderOptions {
            dot_bin: Some(PathBuf::from("/opt/graphviz/bin/dot")),
            ..RenderOptions::default()
        };
        assert_eq!(options.program(), OsString::from("/opt/graphviz/bin/dot"));
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        #[cfg(unix)]
        let _guard = lock_fake_dot();
        let options = RenderOptions {
            dot_bin: Some(PathBuf::from("/nonexistent/vizepisode-test-dot")),
            ..RenderOptions::default()
        };
        let err = render_dot("digraph {}\n", &options).unwrap_err();
        assert!(matches!(err, RenderError::Spawn { .. }), "{err}");
    }

    // Writing an executable while another test thread forks can fail the exec with ETXTBSY, so
    // tests that create and run fake binaries hold this lock.
    #[cfg(unix)]
    static FAKE_DOT: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[cfg(unix)]
    fn fake_dot(dir: &Path, script: &str) -> RenderOptions {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-dot");
        let body = format!("#!/bin/sh\n{script}\n");
        std::fs::write(&path, body).unwrap();
        let mode = std::fs::Permissions::from_mode(0o755);
        std::fs::set_permissions(&path, mode).unwrap();
        RenderOptions {
            format: ImageFormat::Svg,
            dot_bin: Some(path),
        }
    }

    #[cfg(unix)]
    fn lock_fake_dot() -> std::sync::MutexGuard<'static, ()> {
        FAKE_DOT.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[cfg(unix)]
    #[test]
    fn rendered_bytes_come_back_from_stdout() {
        let _guard = lock_fake_dot();
        let dir = tempfile::tempdir().unwrap();
        let options = fake_dot(dir.path(), r#"[ "$1" = "-Tsvg" ] || exit 9; exec cat"#);

        // Larger than a pipe buffer, so stdin has to be fed while stdout drains.
        let source = "a -> b\n".repeat(128 * 1024);
        let image = render_dot(&source, &options).unwrap();
        assert_eq!(image.len(), source.len());
        assert_eq!(image, source.as_bytes());
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_reported_with_stderr() {
        let _guard = lock_fake_dot();
        let dir = tempfile::tempdir().unwrap();
        let script = "cat >/dev/null; echo 'syntax error' >&2; exit 3";
        let options = fake_dot(dir.path(), script);

        match render_dot("digraph {\n", &options) {
            Err(RenderError::Failed { status, stderr }) => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "syntax error");
            }
            other => panic!("expected a Graphviz failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn render_file_writes_only_the_image() {
        let _guard = lock_fake_dot();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ep1.yml");
        std::fs::write(
            &input,
            "title: Pilot\nscenes:\n  - Dawn:\n      - {location: Pier, title: Fog}\n",
        )
        .unwrap();
        let options = fake_dot(dir.path(), "exec cat");

        let out = Visualizer::new().render_file(&input, &options).unwrap();
        assert_eq!(out, dir.path().join("ep1.dot.svg"));
        let image = std::fs::read_to_string(&out).unwrap();
        assert!(image.starts_with("// Pilot\ndigraph {\n"), "{image}");
        assert!(!dir.path().join("ep1.dot").exists());
    }

    #[cfg(unix)]
    #[test]
    fn failed_render_leaves_no_output() {
        let _guard = lock_fake_dot();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ep1.yml");
        std::fs::write(&input, "title: Pilot\n").unwrap();
        let options = fake_dot(dir.path(), "exit 1");

        let err = Visualizer::new().render_file(&input, &options).unwrap_err();
        assert!(
            matches!(err, VizError::Render(RenderError::Failed { .. })),
            "{err}"
        );
        assert!(!dir.path().join("ep1.dot.svg").exists());
    }
}
