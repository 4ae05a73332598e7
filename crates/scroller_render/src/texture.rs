//! Texture wrapper: decode, color-key, upload, query size.
//!
//! Replaces a load/free texture class with RAII: the wgpu resources are
//! released when the `Texture` drops, on every exit path. Decode failures
//! are returned, not logged, so the caller decides whether a missing or
//! corrupt asset is fatal.

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    /// Pixel dimensions of the source image.
    pub size: (u32, u32),
}

impl Texture {
    /// Decode an encoded image (PNG here) and upload it. When `color_key`
    /// is given, pixels matching that exact RGB value become fully
    /// transparent — the sprite sheets carry no alpha channel of their own.
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        color_key: Option<[u8; 3]>,
        label: &str,
    ) -> Result<Self, String> {
        let (mut pixels, (width, height)) = decode_rgba(bytes, label)?;
        if let Some(key) = color_key {
            apply_color_key(&mut pixels, key);
        }
        Ok(Self::from_rgba8(device, queue, &pixels, width, height, label))
    }

    /// Upload raw RGBA8 pixels. Used for decoded assets and for tiny
    /// solid-color textures.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pixels: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent,
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
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Nearest filtering: scaled pixel art should stay crisp.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size: (width, height),
        }
    }
}

fn decode_rgba(bytes: &[u8], label: &str) -> Result<(Vec<u8>, (u32, u32)), String> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| format!("Failed to decode image '{label}': {e}"))?;
    let rgba = image.to_rgba8();
    let dimensions = rgba.dimensions();
    Ok((rgba.into_raw(), dimensions))
}

/// Set alpha to zero on every pixel whose RGB exactly matches `key`.
fn apply_color_key(rgba: &mut [u8], key: [u8; 3]) {
    for pixel in rgba.chunks_exact_mut(4) {
        if pixel[0] == key[0] && pixel[1] == key[1] && pixel[2] == key[2] {
            pixel[3] = 0;
        }
    }
}
