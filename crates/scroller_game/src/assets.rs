//! Startup asset loading.
//!
//! Four fixed textures, loaded once before the main loop: the two walk
//! sheets, the standing sheet and the level background. Loading stops at
//! the first failure and the error names the asset, so startup either has
//! the complete set or a precise reason it cannot run. There is no retry
//! and no partial-success mode.

use scroller_render::{GpuContext, SpritePipeline, Texture};
use thiserror::Error;

pub const WALK_RIGHT_PATH: &str = "assets/textures/walk_right.png";
pub const WALK_LEFT_PATH: &str = "assets/textures/walk_left.png";
pub const STANDING_PATH: &str = "assets/textures/standing.png";
pub const BACKGROUND_PATH: &str = "assets/textures/background.png";

/// RGB value the sheets use as their transparency key; they carry no
/// alpha channel of their own.
pub const COLOR_KEY: [u8; 3] = [106, 147, 113];

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read texture '{path}': {source}")]
    Read {
        path: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode texture '{path}': {reason}")]
    Decode { path: &'static str, reason: String },
}

/// A texture plus the bind group that draws it.
pub struct GpuSpriteTexture {
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

pub struct SceneTextures {
    pub walk_right: GpuSpriteTexture,
    pub walk_left: GpuSpriteTexture,
    pub standing: GpuSpriteTexture,
    pub background: GpuSpriteTexture,
}

pub fn load_scene_textures(
    gpu: &GpuContext,
    pipeline: &SpritePipeline,
) -> Result<SceneTextures, AssetError> {
    Ok(SceneTextures {
        walk_right: load_texture(gpu, pipeline, WALK_RIGHT_PATH)?,
        walk_left: load_texture(gpu, pipeline, WALK_LEFT_PATH)?,
        standing: load_texture(gpu, pipeline, STANDING_PATH)?,
        background: load_texture(gpu, pipeline, BACKGROUND_PATH)?,
    })
}

fn load_texture(
    gpu: &GpuContext,
    pipeline: &SpritePipeline,
    path: &'static str,
) -> Result<GpuSpriteTexture, AssetError> {
    let bytes = read_asset_bytes(path)?;
    let texture = Texture::from_bytes(&gpu.device, &gpu.queue, &bytes, Some(COLOR_KEY), path)
        .map_err(|reason| AssetError::Decode { path, reason })?;
    let bind_group = pipeline.create_texture_bind_group(&gpu.device, &texture);
    log::info!(
        "Loaded texture '{}' ({}x{})",
        path,
        texture.size.0,
        texture.size.1
    );
    Ok(GpuSpriteTexture {
        texture,
        bind_group,
    })
}

fn read_asset_bytes(path: &'static str) -> Result<Vec<u8>, AssetError> {
    std::fs::read(path).map_err(|source| AssetError::Read { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_asset_error_names_the_path() {
        let err = read_asset_bytes("assets/textures/does_not_exist.png")
            .expect_err("missing file should fail");
        assert!(err.to_string().contains("does_not_exist.png"));
        assert!(matches!(err, AssetError::Read { .. }));
    }

    #[test]
    fn decode_error_carries_path_and_reason() {
        let err = AssetError::Decode {
            path: WALK_LEFT_PATH,
            reason: "not a png".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains(WALK_LEFT_PATH));
        assert!(message.contains("not a png"));
    }
}
