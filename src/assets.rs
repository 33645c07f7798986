//! Image collaborator boundary. A missing or unreadable asset never
//! fails the process: it degrades to `None`, gets logged, and the
//! affected panel renders without its visual.

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use image::imageops::FilterType;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    StPancrasPhoto,
    KingsCrossPhoto,
    CamdenTownPhoto,
    MarketPhoto,
    HubMap,
    ExchangePhoto,
    BinFindPhoto,
}

pub const ALL_ASSETS: [AssetId; 7] = [
    AssetId::StPancrasPhoto,
    AssetId::KingsCrossPhoto,
    AssetId::CamdenTownPhoto,
    AssetId::MarketPhoto,
    AssetId::HubMap,
    AssetId::ExchangePhoto,
    AssetId::BinFindPhoto,
];

impl AssetId {
    pub fn file_name(self) -> &'static str {
        match self {
            AssetId::StPancrasPhoto => "1.png",
            AssetId::KingsCrossPhoto => "2.png",
            AssetId::CamdenTownPhoto => "3.png",
            AssetId::MarketPhoto => "4.png",
            AssetId::HubMap => "5.png",
            AssetId::ExchangePhoto => "6.png",
            AssetId::BinFindPhoto => "7.png",
        }
    }

    /// Target size in pixels; assets are cropped to fill it so the
    /// side-by-side panels line up regardless of source aspect.
    fn target_size(self) -> (u32, u32) {
        match self {
            AssetId::HubMap => (900, 600),
            _ => (600, 400),
        }
    }
}

/// Load one image and crop/resize it to `size`, keeping aspect ratio
/// while filling the frame. Failures are warnings, not errors.
pub fn load_image(
    path: &Path,
    size: (u32, u32),
) -> Option<ColorImage> {
    let decoded = match image::open(path) {
        Ok(decoded) => decoded,
        Err(err) => {
            log::warn!(
                "image asset {} unavailable, omitting visual: {err}",
                path.display()
            );
            return None;
        }
    };

    let fitted = decoded
        .resize_to_fill(size.0, size.1, FilterType::Lanczos3)
        .to_rgba8();
    let dimensions =
        [fitted.width() as usize, fitted.height() as usize];
    Some(ColorImage::from_rgba_unmultiplied(
        dimensions,
        fitted.as_raw(),
    ))
}

/// GPU textures for every asset that could be loaded, uploaded once at
/// startup.
pub struct Assets {
    textures: HashMap<AssetId, TextureHandle>,
}

impl Assets {
    pub fn load(ctx: &egui::Context, dir: &Path) -> Self {
        let mut textures = HashMap::new();
        for id in ALL_ASSETS {
            let path = dir.join(id.file_name());
            if let Some(img) = load_image(&path, id.target_size()) {
                let handle = ctx.load_texture(
                    id.file_name(),
                    img,
                    TextureOptions::LINEAR,
                );
                textures.insert(id, handle);
            }
        }
        Self { textures }
    }

    pub fn texture(&self, id: AssetId) -> Option<&TextureHandle> {
        self.textures.get(&id)
    }
}
