//! Diffuse texture loading
//!
//! Decodes PNG/JPEG from disk, flips vertically to match the scene's UV
//! origin, and uploads RGBA8. A failed load is not fatal: callers fall back
//! to `Texture::white` and keep running.

use std::path::Path;

use anyhow::Context as _;
use image::DynamicImage;

pub struct Texture {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// Decode an image file and upload it.
    pub fn from_file(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
        flip_vertical: bool,
    ) -> anyhow::Result<Self> {
        let mut img = image::open(path)
            .with_context(|| format!("failed to decode texture {}", path.display()))?;
        if flip_vertical {
            img = img.flipv();
        }
        Ok(Self::from_image(device, queue, &img, path.to_str()))
    }

    /// Upload a decoded image as an RGBA8 texture with repeat wrap and
    /// linear filtering.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &DynamicImage,
        label: Option<&str>,
    ) -> Self {
        let rgba = img.to_rgba8();
        let (width, height) = (img.width(), img.height());

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
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
            &rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self { view, sampler }
    }

    /// A 1x1 white texture, the stand-in for anything that failed to load.
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let pixel = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        Self::from_image(
            device,
            queue,
            &DynamicImage::ImageRgba8(pixel),
            Some("white"),
        )
    }

    /// Load a texture, substituting white (with a warning) when the file is
    /// missing or undecodable.
    pub fn load_or_white(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
        flip_vertical: bool,
    ) -> Self {
        match Self::from_file(device, queue, path, flip_vertical) {
            Ok(texture) => texture,
            Err(err) => {
                log::warn!("{err:#}; using plain white");
                Self::white(device, queue)
            }
        }
    }
}
