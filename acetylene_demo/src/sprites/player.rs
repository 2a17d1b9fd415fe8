//! The walking player of the game scene

use crate::assets::{DING_SOUND, FONT, PLAYER_HORIZONTAL_TEXTURE, PLAYER_VERTICAL_TEXTURE};
use crate::sprites::coin::Coin;
use acetylene::prelude::*;
use acetylene::render::Reflect;

/// Pixels per update unit
const SPEED: f32 = 2.5;
/// Side of the square arena the player is kept in
const ARENA_SIZE: f32 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facing {
    Horizontal,
    Vertical,
}

/// Player driven by WASD, drawn with a side or front walk cycle depending
/// on the last direction pressed
#[derive(Debug, Clone)]
pub struct Player {
    horizontal: Animation,
    vertical: Animation,
    facing: Facing,
}

impl Player {
    /// Player standing at `position`
    pub fn new(position: Vec3) -> Self {
        let dimensions = Vec2::new(32.0, 64.0);
        Self {
            horizontal: Animation::new(position, dimensions, PLAYER_HORIZONTAL_TEXTURE, IVec2::new(4, 1), 10.0),
            vertical: Animation::new(position, dimensions, PLAYER_VERTICAL_TEXTURE, IVec2::new(4, 1), 10.0),
            facing: Facing::Horizontal,
        }
    }

    fn current(&self) -> &Animation {
        match self.facing {
            Facing::Horizontal => &self.horizontal,
            Facing::Vertical => &self.vertical,
        }
    }

    fn current_mut(&mut self) -> &mut Animation {
        match self.facing {
            Facing::Horizontal => &mut self.horizontal,
            Facing::Vertical => &mut self.vertical,
        }
    }

    /// Switch walk cycles, carrying the position over
    fn face(&mut self, facing: Facing) {
        if self.facing != facing {
            let position = self.current().sprite.position();
            self.facing = facing;
            self.current_mut().sprite.entity.position = position;
        }
        let animation = self.current_mut();
        if !animation.is_playing() {
            animation.play();
        }
    }

    fn set_velocity_x(&mut self, x: f32) {
        self.horizontal.sprite.entity.velocity.x = x;
        self.vertical.sprite.entity.velocity.x = x;
    }

    fn set_velocity_y(&mut self, y: f32) {
        self.horizontal.sprite.entity.velocity.y = y;
        self.vertical.sprite.entity.velocity.y = y;
    }

    /// Bottom-left corner
    pub fn position(&self) -> Vec3 {
        self.current().sprite.position()
    }

    /// Quad currently drawn
    #[cfg(test)]
    pub fn sprite(&self) -> &Sprite {
        &self.current().sprite
    }

    /// Submit the walk cycle and the name tag above it
    pub fn draw(&mut self, ctx: &mut Context, username: &str, shader: ShaderId) {
        let animation = self.current_mut();
        ctx.graphics.submit(&mut animation.sprite, shader);
        let p = animation.sprite.position();
        let top = p.y + animation.sprite.dimensions.y;
        ctx.graphics.submit_text(
            &TextSubmission {
                text: username,
                position: Vec3::new(p.x - 32.0, top, 0.01),
                bounds: Vec4::new(p.x - 32.0, top, 96.0, 32.0),
                scale: 0.15,
                color: Vec4::new(1.0, 1.0, 1.0, 1.0),
                font_file: FONT,
                h_align: Alignment::Center,
                v_align: Alignment::Center,
            },
            shader,
        );
    }

    /// Steer with A/D and W/S
    pub fn process_input(&mut self, input: &InputManager) {
        if input.is_key_down(KeyCode::A) || input.is_key_down(KeyCode::D) {
            let left = input.is_key_down(KeyCode::A);
            self.face(Facing::Horizontal);
            self.current_mut().sprite.reflect.set(Reflect::HORIZONTAL, left);
            self.set_velocity_x(if left { -SPEED } else { SPEED });
        } else {
            self.horizontal.stop();
            self.set_velocity_x(0.0);
        }

        if input.is_key_down(KeyCode::S) || input.is_key_down(KeyCode::W) {
            let down = input.is_key_down(KeyCode::S);
            self.face(Facing::Vertical);
            self.set_velocity_y(if down { -SPEED } else { SPEED });
        } else {
            self.vertical.stop();
            self.set_velocity_y(0.0);
        }
    }

    /// Move inside the arena and collect every coin touched
    pub fn update(&mut self, dt: f32, coins: &mut [Coin], audio: &mut AudioManager) {
        let animation = self.current_mut();
        let sprite = &animation.sprite;
        let next = sprite.position().xy() + sprite.entity.velocity;
        let d = sprite.dimensions;
        if next.x < 0.0 || next.x + d.x > ARENA_SIZE || next.y < 0.0 || next.y + d.y > ARENA_SIZE {
            animation.sprite.entity.velocity = Vec2::zeros();
        }
        animation.update(dt);

        let sprite = &self.current().sprite;
        for coin in coins.iter_mut().filter(|c| sprite.intersects(c.sprite())) {
            coin.set_collected(true);
            audio.play_effect(DING_SOUND);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn audio() -> AudioManager {
        AudioManager::new(Box::new(SilentBackend::new()), 1.0).unwrap()
    }

    fn frame(input: &mut InputManager, keys: &[KeyCode]) {
        for key in [KeyCode::W, KeyCode::A, KeyCode::S, KeyCode::D] {
            if keys.contains(&key) {
                input.press_key(key);
            } else {
                input.release_key(key);
            }
        }
    }

    #[test]
    fn test_walks_right_and_up() {
        let mut input = InputManager::new();
        let mut audio = audio();
        let mut player = Player::new(Vec3::new(100.0, 100.0, 0.01));

        frame(&mut input, &[KeyCode::D]);
        player.process_input(&input);
        player.update(1.0, &mut [], &mut audio);
        assert_relative_eq!(player.position().x, 102.5);
        assert!(!player.sprite().reflect.contains(Reflect::HORIZONTAL));

        frame(&mut input, &[KeyCode::W]);
        player.process_input(&input);
        player.update(1.0, &mut [], &mut audio);
        assert_relative_eq!(player.position(), Vec3::new(102.5, 102.5, 0.01));
    }

    #[test]
    fn test_walking_left_mirrors_the_sprite() {
        let mut input = InputManager::new();
        let mut player = Player::new(Vec3::new(100.0, 100.0, 0.0));
        frame(&mut input, &[KeyCode::A]);
        player.process_input(&input);
        assert!(player.sprite().reflect.contains(Reflect::HORIZONTAL));
        assert_relative_eq!(player.sprite().entity.velocity.x, -SPEED);
    }

    #[test]
    fn test_arena_edges_stop_the_player() {
        let mut input = InputManager::new();
        let mut audio = audio();
        let mut player = Player::new(Vec3::zeros());
        frame(&mut input, &[KeyCode::A, KeyCode::S]);
        player.process_input(&input);
        player.update(1.0, &mut [], &mut audio);
        assert_relative_eq!(player.position(), Vec3::zeros());

        let mut player = Player::new(Vec3::new(224.0, 0.0, 0.0));
        frame(&mut input, &[KeyCode::D]);
        player.process_input(&input);
        player.update(1.0, &mut [], &mut audio);
        assert_relative_eq!(player.position().x, 224.0);
    }

    #[test]
    fn test_touching_a_coin_collects_it() {
        let mut audio = audio();
        let mut player = Player::new(Vec3::zeros());
        let mut coins = [Coin::new(Vec3::new(16.0, 32.0, 0.0)), Coin::new(Vec3::new(128.0, 128.0, 0.0))];
        player.update(1.0, &mut coins, &mut audio);
        assert!(coins[0].is_collected());
        assert!(!coins[1].is_collected());
    }
}
