//! The fixed set of image assets.
//!
//! All textures are decoded up front; any failure aborts startup.

use std::path::Path;

use log::info;

use crate::error::{GameError, Result};

/// Number of explosion animation frames shipped (`boom0` .. `boom2`).
pub const BOOM_FRAMES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureId {
    Backdrop,
    Title,
    Ship,
    Boom0,
    Boom1,
    Boom2,
    Enemy,
    RedShot,
    BlueShot,
}

impl TextureId {
    pub const ALL: [TextureId; 9] = [
        TextureId::Backdrop,
        TextureId::Title,
        TextureId::Ship,
        TextureId::Boom0,
        TextureId::Boom1,
        TextureId::Boom2,
        TextureId::Enemy,
        TextureId::RedShot,
        TextureId::BlueShot,
    ];

    /// File name relative to the asset directory.
    pub fn file_name(self) -> &'static str {
        match self {
            TextureId::Backdrop => "backdrop.png",
            TextureId::Title => "title.png",
            TextureId::Ship => "ship.png",
            TextureId::Boom0 => "boom0.png",
            TextureId::Boom1 => "boom1.png",
            TextureId::Boom2 => "boom2.png",
            TextureId::Enemy => "hateshroom.png",
            TextureId::RedShot => "redshot.png",
            TextureId::BlueShot => "blueshot.png",
        }
    }

    /// Explosion frame for animation stage `stage`, if the stage exists.
    pub fn boom(stage: u32) -> Option<TextureId> {
        match stage {
            0 => Some(TextureId::Boom0),
            1 => Some(TextureId::Boom1),
            2 => Some(TextureId::Boom2),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Decoded RGBA pixels, row-major, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl Texture {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self { width, height, pixels }
    }

    /// A single-colour texture, handy for tests.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::from_rgba(width, height, vec![rgba; (width * height) as usize])
    }

    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|source| GameError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(GameError::EmptyTexture(path.to_path_buf()));
        }
        let pixels = rgba.pixels().map(|p| p.0).collect();
        Ok(Self::from_rgba(width, height, pixels))
    }

    /// Nearest-neighbour lookup with wrap-around in both directions.
    /// `u` and `v` are in texture space, [0, 1) covering the image once.
    pub fn sample(&self, u: f32, v: f32) -> [u8; 4] {
        let x = (u.rem_euclid(1.0) * self.width as f32) as u32;
        let y = (v.rem_euclid(1.0) * self.height as f32) as u32;
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }
}

/// One texture per `TextureId`.
#[derive(Clone, Debug)]
pub struct TextureSet {
    textures: Vec<Texture>,
}

impl TextureSet {
    /// Load every asset from `dir`.  Stops at the first failure.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut textures = Vec::with_capacity(TextureId::ALL.len());
        for id in TextureId::ALL {
            let path = dir.join(id.file_name());
            let texture = Texture::load(&path)?;
            info!("loaded {} ({}x{})", path.display(), texture.width, texture.height);
            textures.push(texture);
        }
        Ok(Self { textures })
    }

    /// Build a set from already-decoded textures, in `TextureId::ALL` order.
    pub fn from_textures(textures: [Texture; 9]) -> Self {
        Self { textures: textures.into() }
    }

    pub fn get(&self, id: TextureId) -> &Texture {
        &self.textures[id.index()]
    }
}
