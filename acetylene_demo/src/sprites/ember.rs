//! Drifting ember animations behind the menus

use crate::assets::EMBER_TEXTURE;
use acetylene::prelude::*;
use acetylene::render::Reflect;
use rand::Rng;

/// Update units an ember lives: 8 frames of 40 units
const LIFETIME: f32 = 40.0 * 8.0;
/// Update units between spawns
const SPAWN_INTERVAL: f32 = 7.0;

/// One ember rising from below the window while it burns out
#[derive(Debug, Clone)]
pub struct Ember {
    animation: Animation,
    alive: bool,
    timer: f32,
}

impl Ember {
    /// Ember at `position` with a random drift and orientation
    pub fn new(position: Vec3, rng: &mut impl Rng) -> Self {
        let mut animation = Animation::new(position, Vec2::new(8.0, 8.0), EMBER_TEXTURE, IVec2::new(8, 1), 40.0);
        animation.sprite.entity.velocity = Vec2::new(rng.gen::<f32>() * 0.5 + 0.5, rng.gen::<f32>() * 2.5 + 1.5);
        animation.sprite.reflect.set(Reflect::HORIZONTAL, rng.gen_bool(0.5));
        animation.sprite.reflect.set(Reflect::VERTICAL, rng.gen_bool(0.5));
        animation.play();
        Self {
            animation,
            alive: true,
            timer: 0.0,
        }
    }

    /// Advance the animation and occasionally flip the horizontal drift
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.alive {
            self.animation.update(dt);
        }
        if self.timer > LIFETIME {
            self.alive = false;
        }
        if self.timer as i32 % 10 == 0 && rng.gen_bool(0.5) {
            let velocity = &mut self.animation.sprite.entity.velocity;
            velocity.x = -velocity.x;
        }
        self.timer += dt;
    }

    /// Still playing its animation
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Quad to draw
    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.animation.sprite
    }
}

/// Embers spawned at random x positions along the bottom of the window
pub struct EmberField<R: Rng> {
    embers: Vec<Ember>,
    timer: f32,
    rng: R,
}

impl<R: Rng> EmberField<R> {
    /// Empty field drawing randomness from `rng`
    pub fn new(rng: R) -> Self {
        Self {
            embers: Vec::new(),
            timer: 0.0,
            rng,
        }
    }

    /// Live embers
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.embers.len()
    }

    /// No embers alive
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.embers.is_empty()
    }

    /// Advance every ember, drop burnt-out ones and spawn a new one every
    /// few units
    pub fn update(&mut self, dt: f32, window_width: f32) {
        for ember in &mut self.embers {
            ember.update(dt, &mut self.rng);
        }
        self.embers.retain(Ember::is_alive);
        if self.timer > SPAWN_INTERVAL {
            let x = self.rng.gen_range(0.0..window_width.max(1.0)).floor();
            self.embers.push(Ember::new(Vec3::new(x, -10.0, -0.1), &mut self.rng));
            self.timer = 0.0;
        }
        self.timer += dt;
    }

    /// Submit every ember through `shader`
    pub fn draw(&mut self, ctx: &mut Context, shader: ShaderId) {
        ctx.graphics.submit_all(self.embers.iter_mut().map(Ember::sprite_mut), shader);
    }

    /// Remove every ember
    pub fn clear(&mut self) {
        self.embers.clear();
        self.timer = 0.0;
    }
}
