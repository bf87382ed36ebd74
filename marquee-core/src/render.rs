//! Poster rendering: download, rotate, write, hand to the framebuffer viewer.

use std::{
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use async_trait::async_trait;
use image::DynamicImage;
use marquee_config::{DisplayConfig, Rotation};
use marquee_model::PosterUrl;
use reqwest::Client;
use tokio::process::Command;
use tracing::debug;

use crate::{
    error::{ClientBuildError, RenderError},
    http::build_client,
};

/// Longest stderr excerpt carried in a viewer failure.
const STDERR_EXCERPT: usize = 512;

/// Pushes a poster to the display.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PosterRenderer: Send + Sync {
    async fn render(&self, poster: &PosterUrl) -> Result<(), RenderError>;
}

#[derive(Debug)]
pub struct FramebufferRenderer {
    client: Client,
    display: DisplayConfig,
}

impl FramebufferRenderer {
    pub fn new(
        display: DisplayConfig,
        request_timeout: Duration,
    ) -> Result<Self, ClientBuildError> {
        Ok(Self::with_client(display, build_client(request_timeout)?))
    }

    pub fn with_client(display: DisplayConfig, client: Client) -> Self {
        Self { client, display }
    }

    async fn download(&self, poster: &PosterUrl) -> Result<Vec<u8>, RenderError> {
        let response = self
            .client
            .get(poster.as_str())
            .send()
            .await
            .map_err(RenderError::Download)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::DownloadStatus(status));
        }

        let bytes = response.bytes().await.map_err(RenderError::Download)?;
        debug!(url = %poster, bytes = bytes.len(), "poster downloaded");
        Ok(bytes.to_vec())
    }

    /// Runs the viewer against the output file and waits for it to exit.
    pub async fn present(&self) -> Result<(), RenderError> {
        let Some((program, args)) = self.display.viewer_command.split_first()
        else {
            return Err(RenderError::Spawn {
                program: String::new(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "empty viewer command",
                ),
            });
        };

        let mut command = Command::new(program);
        command
            .args(args)
            .arg(&self.display.output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.display.viewer_timeout, command.output())
            .await
            .map_err(|_| RenderError::ViewerTimedOut(self.display.viewer_timeout))?
            .map_err(|source| RenderError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::ViewerFailed {
                status: output.status,
                stderr: excerpt(stderr.trim(), STDERR_EXCERPT),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PosterRenderer for FramebufferRenderer {
    async fn render(&self, poster: &PosterUrl) -> Result<(), RenderError> {
        let bytes = self.download(poster).await?;

        let rotation = self.display.rotation;
        let path = self.display.output_path.clone();
        let (width, height) = tokio::task::spawn_blocking(move || {
            prepare_frame(&bytes, rotation, &path)
        })
        .await??;

        self.present().await?;
        debug!(
            url = %poster,
            width,
            height,
            rotation = rotation.degrees(),
            "poster displayed"
        );
        Ok(())
    }
}

/// Decodes `bytes`, applies `rotation` and overwrites `path`. The output
/// format follows the file extension. Returns the written dimensions.
pub fn prepare_frame(
    bytes: &[u8],
    rotation: Rotation,
    path: &Path,
) -> Result<(u32, u32), RenderError> {
    let image = image::load_from_memory(bytes).map_err(RenderError::Decode)?;
    let image = rotate(image, rotation);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|source| RenderError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    image.save(path).map_err(|source| RenderError::Save {
        path: PathBuf::from(path),
        source,
    })?;
    Ok((image.width(), image.height()))
}

/// Counter-clockwise rotation; quarter turns swap width and height so the
/// whole poster stays in frame.
pub fn rotate(image: DynamicImage, rotation: Rotation) -> DynamicImage {
    match rotation {
        Rotation::None => image,
        Rotation::Ccw90 => image.rotate270(),
        Rotation::Half => image.rotate180(),
        Rotation::Ccw270 => image.rotate90(),
    }
}

fn excerpt(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let mut img = RgbaImage::new(width, height);
        // Mark the top-left corner so rotation direction is observable.
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    fn display(dir: &Path, viewer: &[&str]) -> DisplayConfig {
        DisplayConfig {
            output_path: dir.join("current_poster.png"),
            rotation: Rotation::Ccw90,
            viewer_command: viewer.iter().map(|s| s.to_string()).collect(),
            viewer_timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn quarter_turn_swaps_dimensions_and_writes_png() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("poster.png");

        let (w, h) = prepare_frame(&encoded_png(40, 60), Rotation::Ccw90, &path)
            .expect("prepare frame");
        assert_eq!((w, h), (60, 40));

        let written = image::open(&path).expect("reopen output");
        assert_eq!((written.width(), written.height()), (60, 40));
        assert_eq!(
            image::ImageFormat::from_path(&path).unwrap(),
            ImageFormat::Png
        );
    }

    #[test]
    fn counter_clockwise_moves_top_left_to_bottom_left() {
        let image = image::load_from_memory(&encoded_png(4, 6)).unwrap();
        let rotated = rotate(image, Rotation::Ccw90).to_rgba8();
        assert_eq!(rotated.dimensions(), (6, 4));
        assert_eq!(rotated.get_pixel(0, 3), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn half_turn_keeps_dimensions() {
        let image = image::load_from_memory(&encoded_png(4, 6)).unwrap();
        let rotated = rotate(image, Rotation::Half);
        assert_eq!((rotated.width(), rotated.height()), (4, 6));
    }

    #[test]
    fn undecodable_bytes_are_rejected() {
        let dir = tempdir().expect("tempdir");
        let err = prepare_frame(b"not an image", Rotation::None, &dir.path().join("p.png"))
            .unwrap_err();
        assert!(matches!(err, RenderError::Decode(_)));
    }

    #[test]
    fn excerpt_truncates_on_char_boundary() {
        assert_eq!(excerpt("short", 10), "short");
        assert_eq!(excerpt("ééé", 3), "é…");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn viewer_success_and_failure() {
        let dir = tempdir().expect("tempdir");

        let ok = FramebufferRenderer::new(display(dir.path(), &["true"]), Duration::from_secs(5))
            .unwrap();
        ok.present().await.expect("true exits zero");

        let failing =
            FramebufferRenderer::new(display(dir.path(), &["false"]), Duration::from_secs(5))
                .unwrap();
        assert!(matches!(
            failing.present().await,
            Err(RenderError::ViewerFailed { .. })
        ));

        let missing = FramebufferRenderer::new(
            display(dir.path(), &["/nonexistent/marquee-viewer"]),
            Duration::from_secs(5),
        )
        .unwrap();
        assert!(matches!(
            missing.present().await,
            Err(RenderError::Spawn { .. })
        ));
    }
}
