//! Image rendering through an external Graphviz-compatible command.

use std::{
    io,
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info};

use super::Error;
use crate::config::{ImageFormat, RenderConfig};

/// Runs the renderer as `<command> -T<format> <dot file> -o <image file>`.
#[derive(Debug, Clone)]
pub struct Renderer {
    command: String,
    format: ImageFormat,
}

impl Renderer {
    pub fn new(command: impl Into<String>, format: ImageFormat) -> Self {
        Self {
            command: command.into(),
            format,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.command(), config.format())
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Path of the image rendered from `dot_path`: same directory and base
    /// name, with the format's extension.
    pub fn image_path(&self, dot_path: &Path) -> PathBuf {
        dot_path.with_extension(self.format.extension())
    }

    /// Render `dot_path` into `image_path`.
    ///
    /// The DOT file is only read; a failed render leaves it in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] if the command does not exist,
    /// [`Error::Spawn`] if it cannot be started, and [`Error::ToolFailed`]
    /// if it exits with a non-zero status.
    pub fn render(&self, dot_path: &Path, image_path: &Path) -> Result<(), Error> {
        debug!(
            command = self.command.as_str(),
            format = self.format.extension(),
            input:? = dot_path;
            "Running renderer"
        );

        let output = Command::new(&self.command)
            .arg(format!("-T{}", self.format))
            .arg(dot_path)
            .arg("-o")
            .arg(image_path)
            .output()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => Error::ToolNotFound {
                    program: self.command.clone(),
                },
                _ => Error::Spawn {
                    program: self.command.clone(),
                    source,
                },
            })?;

        if !output.status.success() {
            return Err(Error::ToolFailed {
                program: self.command.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!(path:? = image_path; "Image rendered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn dot_file(dir: &Path) -> PathBuf {
        let path = dir.join("Demo_Chain.dot");
        fs::write(&path, "strict digraph \"Demo_Chain\" {\n  \"A\" -> \"B\"\n}\n")
            .expect("write dot file");
        path
    }

    #[test]
    fn test_image_path() {
        let renderer = Renderer::new("dot", ImageFormat::Pdf);

        assert_eq!(
            renderer.image_path(Path::new("out/Demo_Chain.dot")),
            Path::new("out/Demo_Chain.pdf")
        );
    }

    #[test]
    fn test_from_config() {
        let renderer = Renderer::from_config(&RenderConfig::new(true, "neato", ImageFormat::Eps));

        assert_eq!(renderer.format(), ImageFormat::Eps);
        assert_eq!(
            renderer.image_path(Path::new("a.dot")),
            Path::new("a.eps")
        );
    }

    #[test]
    fn test_missing_tool() {
        let dir = tempfile::tempdir().expect("temp dir");
        let dot_path = dot_file(dir.path());
        let renderer = Renderer::new("chaingraph-no-such-renderer", ImageFormat::Svg);

        let err = renderer
            .render(&dot_path, &renderer.image_path(&dot_path))
            .expect_err("tool does not exist");

        assert!(
            matches!(&err, Error::ToolNotFound { program } if program == "chaingraph-no-such-renderer"),
            "unexpected error: {err}"
        );
        // The DOT file is left untouched
        assert!(dot_path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_tool() {
        let dir = tempfile::tempdir().expect("temp dir");
        let dot_path = dot_file(dir.path());
        let before = fs::read_to_string(&dot_path).expect("read dot file");
        let renderer = Renderer::new("false", ImageFormat::Svg);

        let err = renderer
            .render(&dot_path, &renderer.image_path(&dot_path))
            .expect_err("`false` always fails");

        assert!(matches!(err, Error::ToolFailed { .. }), "unexpected error: {err}");
        assert_eq!(fs::read_to_string(&dot_path).expect("read dot file"), before);
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_tool() {
        let dir = tempfile::tempdir().expect("temp dir");
        let dot_path = dot_file(dir.path());
        let renderer = Renderer::new("true", ImageFormat::Svg);

        renderer
            .render(&dot_path, &renderer.image_path(&dot_path))
            .expect("`true` always succeeds");
    }
}
