//! Sprite sheet textures.
//!
//! Decoding goes through the `image` crate and always ends up as tightly packed
//! RGBA8, which is then uploaded into an `Rgba8UnormSrgb` texture. Decoding is kept
//! separate from the upload so it can be exercised without a GPU.

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to decode image '{label}': {source}")]
    Decode {
        label: String,
        #[source]
        source: image::ImageError,
    },
    #[error("image '{label}' is empty ({width}x{height})")]
    Empty {
        label: String,
        width: u32,
        height: u32,
    },
}

/// Decoded pixels ready for upload.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub fn decode_rgba8(bytes: &[u8], label: &str) -> Result<DecodedImage, TextureError> {
    let image = image::load_from_memory(bytes).map_err(|source| TextureError::Decode {
        label: label.to_string(),
        source,
    })?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::Empty {
            label: label.to_string(),
            width,
            height,
        });
    }
    Ok(DecodedImage {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub size: (u32, u32),
}

impl Texture {
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self, TextureError> {
        let decoded = decode_rgba8(bytes, label)?;
        log::info!(
            "Loaded texture '{}' ({}x{})",
            label,
            decoded.width,
            decoded.height
        );
        Ok(Self::from_rgba8(
            device,
            queue,
            &decoded.rgba,
            decoded.width,
            decoded.height,
            label,
        ))
    }

    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
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

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            size: (width, height),
        }
    }
}
