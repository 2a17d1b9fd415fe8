//! Collectable coins

use crate::assets::COIN_TEXTURE;
use acetylene::prelude::*;
use rand::Rng;

/// Arena cells per side; coins snap to a 16 px grid
const GRID_CELLS: u32 = 16;
const CELL_SIZE: f32 = 16.0;

/// A 16x16 coin the player picks up by touching it
#[derive(Debug, Clone)]
pub struct Coin {
    sprite: Sprite,
    collected: bool,
}

impl Coin {
    /// Coin with its bottom-left corner at `position`
    pub fn new(position: Vec3) -> Self {
        Self {
            sprite: Sprite::new(position, Vec2::new(CELL_SIZE, CELL_SIZE), COIN_TEXTURE),
            collected: false,
        }
    }

    /// Coin on a random cell of the 256x256 arena
    pub fn random(rng: &mut impl Rng) -> Self {
        let x = rng.gen_range(0..GRID_CELLS) as f32 * CELL_SIZE;
        let y = rng.gen_range(0..GRID_CELLS) as f32 * CELL_SIZE;
        Self::new(Vec3::new(x, y, 0.0))
    }

    /// Quad of the coin
    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Mutable quad, for submission
    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    /// Picked up by the player
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark as picked up
    pub fn set_collected(&mut self, collected: bool) {
        self.collected = collected;
    }
}
