use std::fmt;
use std::path::Path;

use image::{imageops, Rgba, RgbaImage};
use thiserror::Error;

use crate::renderer::vertex::Color;
use crate::renderer::{Device, SCENE};

/// Per-channel tolerance when comparing against the expected colors.
const TOLERANCE: f32 = 0.05;

/// Color left by the clear: the renderer never sets a clear color.
const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot snapshot an empty {width}x{height} frame")]
    EmptyFrame { width: u32, height: u32 },
    #[error("framebuffer read returned {got} bytes, expected {expected}")]
    ShortRead { expected: usize, got: usize },
    #[error("failed to write snapshot: {0}")]
    Write(#[from] image::ImageError),
    #[error("{failed} of {total} probes did not match the expected colors")]
    Mismatch { failed: usize, total: usize },
}

/// A point in normalized device coordinates and the color expected there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub point: [f32; 2],
    pub expected: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mismatch {
    pub probe: Probe,
    pub actual: Color,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y] = self.probe.point;
        let e = self.probe.expected;
        let a = self.actual;
        write!(
            f,
            "at ({:.3}, {:.3}): expected ({:.2}, {:.2}, {:.2}), got ({:.2}, {:.2}, {:.2})",
            x, y, e[0], e[1], e[2], a[0], a[1], a[2]
        )
    }
}

/// What one frame should look like: each triangle's centroid and a point
/// near each of its corners, plus the four screen corners.
pub fn probes() -> Vec<Probe> {
    let mut probes = Vec::new();
    for (triangle, fragment) in SCENE.iter() {
        let mut points = vec![triangle.centroid()];
        points.extend((0..3).map(|corner| triangle.toward_centroid(corner, 0.15)));
        for point in points {
            if let Some(expected) = fragment.shade(triangle, point) {
                probes.push(Probe { point, expected });
            }
        }
    }
    for point in [[-0.9, -0.9], [0.9, -0.9], [0.9, 0.9], [-0.9, 0.9]] {
        probes.push(Probe {
            point,
            expected: BACKGROUND,
        });
    }
    probes
}

/// A frame read back from the framebuffer, stored top row first. Never
/// zero-sized.
pub struct Snapshot {
    image: RgbaImage,
}

impl Snapshot {
    pub fn capture<D: Device>(device: &D, width: u32, height: u32) -> Result<Self, SnapshotError> {
        check_size(width, height)?;
        Self::from_bottom_up(width, height, device.read_pixels(width, height))
    }

    /// Wraps RGBA8 rows as GL returns them, bottom row first.
    pub fn from_bottom_up(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, SnapshotError> {
        check_size(width, height)?;
        let expected = width as usize * height as usize * 4;
        let got = pixels.len();
        let image = RgbaImage::from_raw(width, height, pixels)
            .ok_or(SnapshotError::ShortRead { expected, got })?;
        Ok(Snapshot {
            image: imageops::flip_vertical(&image),
        })
    }

    /// Shades every pixel center with the scene's fragment shaders, later
    /// triangles drawn over earlier ones.
    pub fn reference(width: u32, height: u32) -> Result<Self, SnapshotError> {
        check_size(width, height)?;
        let image = RgbaImage::from_fn(width, height, |x, y| {
            let p = [
                (x as f32 + 0.5) / width as f32 * 2.0 - 1.0,
                1.0 - (y as f32 + 0.5) / height as f32 * 2.0,
            ];
            let color = SCENE
                .iter()
                .filter_map(|(triangle, fragment)| fragment.shade(triangle, p))
                .last()
                .unwrap_or(BACKGROUND);
            to_rgba8(color)
        });
        Ok(Snapshot { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Color of the pixel covering `p` in normalized device coordinates.
    pub fn sample(&self, p: [f32; 2]) -> Color {
        let (w, h) = self.image.dimensions();
        let x = ((p[0] + 1.0) / 2.0 * w as f32).clamp(0.0, (w - 1) as f32) as u32;
        let y = ((1.0 - p[1]) / 2.0 * h as f32).clamp(0.0, (h - 1) as f32) as u32;
        let Rgba(px) = *self.image.get_pixel(x, y);
        [
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
            px[3] as f32 / 255.0,
        ]
    }

    /// Compares RGB at every probe. Alpha is skipped: the surface may have
    /// no alpha channel.
    pub fn check(&self, probes: &[Probe]) -> Vec<Mismatch> {
        probes
            .iter()
            .filter_map(|probe| {
                let actual = self.sample(probe.point);
                let matches = actual
                    .iter()
                    .zip(probe.expected.iter())
                    .take(3)
                    .all(|(a, e)| (a - e).abs() <= TOLERANCE);
                if matches {
                    None
                } else {
                    Some(Mismatch {
                        probe: *probe,
                        actual,
                    })
                }
            })
            .collect()
    }

    /// Runs `check` with the scene's probes, logging each mismatch.
    pub fn verify(&self) -> Result<(), SnapshotError> {
        let probes = probes();
        let mismatches = self.check(&probes);
        for mismatch in &mismatches {
            log::warn!("{}", mismatch);
        }
        if mismatches.is_empty() {
            log::info!("all {} probes match", probes.len());
            Ok(())
        } else {
            Err(SnapshotError::Mismatch {
                failed: mismatches.len(),
                total: probes.len(),
            })
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        self.image.save(path.as_ref())?;
        log::info!("wrote snapshot to {}", path.as_ref().display());
        Ok(())
    }
}

fn check_size(width: u32, height: u32) -> Result<(), SnapshotError> {
    if width == 0 || height == 0 {
        Err(SnapshotError::EmptyFrame { width, height })
    } else {
        Ok(())
    }
}

fn to_rgba8(color: Color) -> Rgba<u8> {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        channel(color[3]),
    ])
}
