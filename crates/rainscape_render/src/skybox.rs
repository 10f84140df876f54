//! Day and night skybox sources
//!
//! A skybox is a six-face cubemap, either read from image files or generated
//! as a vertical gradient. Faces are ordered +X, -X, +Y, -Y, +Z, -Z and
//! stored as RGBA8 (sRGB) bytes ready for upload.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of cubemap faces
pub const FACE_COUNT: usize = 6;

const DEFAULT_GRADIENT_SIZE: u32 = 64;

fn default_gradient_size() -> u32 {
    DEFAULT_GRADIENT_SIZE
}

/// Where a skybox's faces come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkyboxSource {
    /// Colour blend from the horizon up to the zenith; below the horizon
    /// stays at the horizon colour
    Gradient {
        zenith: [f32; 3],
        horizon: [f32; 3],
        #[serde(default = "default_gradient_size")]
        size: u32,
    },
    /// Six image files in +X, -X, +Y, -Y, +Z, -Z order
    Faces { paths: [PathBuf; 6] },
}

impl SkyboxSource {
    /// Overcast daytime sky
    pub fn day() -> Self {
        SkyboxSource::Gradient {
            zenith: [0.42, 0.52, 0.66],
            horizon: [0.78, 0.80, 0.84],
            size: DEFAULT_GRADIENT_SIZE,
        }
    }

    /// Dark night sky
    pub fn night() -> Self {
        SkyboxSource::Gradient {
            zenith: [0.01, 0.01, 0.04],
            horizon: [0.07, 0.07, 0.12],
            size: DEFAULT_GRADIENT_SIZE,
        }
    }

    /// Produce the six faces
    pub fn load(&self) -> Result<CubeFaces, SkyboxError> {
        match self {
            SkyboxSource::Gradient { zenith, horizon, size } => {
                CubeFaces::gradient(*size, Vec3::from(*zenith), Vec3::from(*horizon))
            }
            SkyboxSource::Faces { paths } => CubeFaces::from_files(paths),
        }
    }
}

/// Errors building a cubemap
#[derive(Debug, Error)]
pub enum SkyboxError {
    #[error("failed to load skybox face {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("skybox face {index} is {width}x{height}, faces must be square")]
    NotSquare { index: usize, width: u32, height: u32 },
    #[error("skybox face {index} is {found}px, expected {expected}px like face 0")]
    SizeMismatch { index: usize, expected: u32, found: u32 },
    #[error("expected 6 skybox faces, got {0}")]
    FaceCount(usize),
    #[error("skybox faces must not be empty")]
    ZeroSize,
}

/// Six square RGBA8 faces of equal size
#[derive(Debug, Clone, PartialEq)]
pub struct CubeFaces {
    size: u32,
    faces: Vec<Vec<u8>>,
}

impl CubeFaces {
    /// Validate raw `(width, height, rgba)` faces
    pub fn from_rgba(faces: Vec<(u32, u32, Vec<u8>)>) -> Result<Self, SkyboxError> {
        if faces.len() != FACE_COUNT {
            return Err(SkyboxError::FaceCount(faces.len()));
        }
        let size = match faces.first() {
            Some(&(w, _, _)) if w > 0 => w,
            _ => return Err(SkyboxError::ZeroSize),
        };
        let mut data = Vec::with_capacity(FACE_COUNT);
        for (index, (width, height, rgba)) in faces.into_iter().enumerate() {
            if width != height {
                return Err(SkyboxError::NotSquare { index, width, height });
            }
            if width != size {
                return Err(SkyboxError::SizeMismatch {
                    index,
                    expected: size,
                    found: width,
                });
            }
            data.push(rgba);
        }
        Ok(Self { size, faces: data })
    }

    /// Decode six image files
    pub fn from_files<P: AsRef<Path>>(paths: &[P; 6]) -> Result<Self, SkyboxError> {
        let mut faces = Vec::with_capacity(FACE_COUNT);
        for path in paths {
            let path = path.as_ref();
            let image = image::open(path)
                .map_err(|source| SkyboxError::Image {
                    path: path.to_path_buf(),
                    source,
                })?
                .to_rgba8();
            let (width, height) = image.dimensions();
            faces.push((width, height, image.into_raw()));
        }
        let cube = Self::from_rgba(faces)?;
        log::info!("Loaded skybox faces ({0}x{0})", cube.size);
        Ok(cube)
    }

    /// Generate a vertical gradient cubemap
    pub fn gradient(size: u32, zenith: Vec3, horizon: Vec3) -> Result<Self, SkyboxError> {
        if size == 0 {
            return Err(SkyboxError::ZeroSize);
        }
        let faces = (0..FACE_COUNT)
            .map(|face| {
                let mut rgba = Vec::with_capacity((size * size * 4) as usize);
                for y in 0..size {
                    for x in 0..size {
                        let u = 2.0 * (x as f32 + 0.5) / size as f32 - 1.0;
                        let v = 2.0 * (y as f32 + 0.5) / size as f32 - 1.0;
                        let up = face_direction(face, u, v).normalize().y.max(0.0);
                        let color = horizon.lerp(zenith, up);
                        rgba.extend_from_slice(&to_rgba8(color));
                    }
                }
                (size, size, rgba)
            })
            .collect();
        Self::from_rgba(faces)
    }

    /// Edge length of every face in pixels
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn face(&self, index: usize) -> &[u8] {
        &self.faces[index]
    }

    /// Upload as a cube texture and return a cube view
    pub fn upload(&self, device: &wgpu::Device, queue: &wgpu::Queue, label: &str) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: self.size,
            height: self.size,
            depth_or_array_layers: FACE_COUNT as u32,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (layer, rgba) in self.faces.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: layer as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                rgba,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * self.size),
                    rows_per_image: Some(self.size),
                },
                wgpu::Extent3d {
                    width: self.size,
                    height: self.size,
                    depth_or_array_layers: 1,
                },
            );
        }

        texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(label),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        })
    }
}

/// Direction through texel (u, v) of a cube face, u right and v down in [-1, 1]
pub fn face_direction(face: usize, u: f32, v: f32) -> Vec3 {
    match face {
        0 => Vec3::new(1.0, -v, -u),
        1 => Vec3::new(-1.0, -v, u),
        2 => Vec3::new(u, 1.0, v),
        3 => Vec3::new(u, -1.0, -v),
        4 => Vec3::new(u, -v, 1.0),
        _ => Vec3::new(-u, -v, -1.0),
    }
}

fn to_rgba8(color: Vec3) -> [u8; 4] {
    let c = color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8, 255]
}
