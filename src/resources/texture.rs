use std::path::Path;

use anyhow::{Context, anyhow};
use image::{ImageFormat, load_from_memory_with_format};

use crate::{data_structures::texture::Texture, resources::load_binary};

/// Decodes image file contents, guessing the format unless `format` names an extension.
pub fn decode_image(bytes: &[u8], format: Option<&str>) -> anyhow::Result<image::DynamicImage> {
    let img = match format {
        None => image::load_from_memory(bytes)?,
        Some(fmt) => {
            let format = ImageFormat::from_extension(fmt)
                .ok_or_else(|| anyhow!("unsupported image format '{fmt}'"))?;
            load_from_memory_with_format(bytes, format)?
        }
    };
    Ok(img)
}

pub async fn load_image(root: &Path, file_name: &str) -> anyhow::Result<image::DynamicImage> {
    let data = load_binary(root, file_name).await?;
    let extension = Path::new(file_name).extension().and_then(|e| e.to_str());
    decode_image(&data, extension).with_context(|| format!("failed to decode {file_name}"))
}

pub async fn load_texture(
    root: &Path,
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<Texture> {
    let img = load_image(root, file_name).await?;
    Texture::from_image(device, queue, &img, Some(file_name))
}
