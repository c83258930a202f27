use std::path::Path;

use image::RgbaImage;

use crate::combat::Side;
use crate::error::BattleError;

/// A decoded battle portrait, ready for upload by the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Portrait {
    image: RgbaImage,
}

impl Portrait {
    /// Decode PNG bytes into RGBA8.
    pub fn from_png(png_bytes: &[u8]) -> Result<Self, BattleError> {
        let image = image::load_from_memory(png_bytes)?.to_rgba8();
        Ok(Self { image })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, BattleError> {
        let image = image::open(path)?.to_rgba8();
        Ok(Self { image })
    }

    /// Like [`from_png`](Self::from_png), but a broken portrait only logs a
    /// warning; the battle falls back to the actor's sprite.
    pub fn decode_or_warn(label: &str, png_bytes: &[u8]) -> Option<Self> {
        match Self::from_png(png_bytes) {
            Ok(p) => Some(p),
            Err(e) => {
                log::warn!("[portrait] {label}: {e}; using sprite fallback");
                None
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Packed RGBA8 rows, top to bottom.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }
}

/// Both sides' portraits. A missing one is drawn as the actor's sprite.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BattlePortraits {
    pub player: Option<Portrait>,
    pub enemy: Option<Portrait>,
}

impl BattlePortraits {
    /// Decode whichever portraits were supplied. Never fails.
    pub fn decode(player_png: Option<&[u8]>, enemy_png: Option<&[u8]>) -> Self {
        Self {
            player: player_png.and_then(|b| Portrait::decode_or_warn("player", b)),
            enemy: enemy_png.and_then(|b| Portrait::decode_or_warn("enemy", b)),
        }
    }

    pub fn get(&self, side: Side) -> Option<&Portrait> {
        match side {
            Side::Player => self.player.as_ref(),
            Side::Enemy => self.enemy.as_ref(),
        }
    }
}
