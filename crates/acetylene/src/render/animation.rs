//! Sprite-sheet animation

use crate::foundation::math::{IVec2, Vec2, Vec3, Vec4};
use crate::render::sprite::Sprite;

/// A sprite that steps through equally sized frames of a sheet.
///
/// Frames are numbered row-major from the top-left cell of the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// The quad being animated
    pub sprite: Sprite,
    frame_coords: Vec<Vec2>,
    frame_time: f32,
    playing: bool,
    timer: f32,
    frame: usize,
}

impl Animation {
    /// Animation over a sheet of `frames.x` columns and `frames.y` rows.
    /// Each frame shows for `frame_time` update units.
    pub fn new(
        position: Vec3,
        dimensions: Vec2,
        texture_file: impl Into<String>,
        frames: IVec2,
        frame_time: f32,
    ) -> Self {
        let cols = frames.x.max(1);
        let rows = frames.y.max(1);
        let mut sprite = Sprite::new(position, dimensions, texture_file);
        let cell = Vec2::new(1.0 / cols as f32, 1.0 / rows as f32);
        sprite.texture.coords = Vec4::new(0.0, 0.0, cell.x, cell.y);

        let mut frame_coords = Vec::with_capacity((cols * rows) as usize);
        for y in 0..rows {
            for x in 0..cols {
                frame_coords.push(Vec2::new(cell.x * x as f32, cell.y * y as f32));
            }
        }

        Self {
            sprite,
            frame_coords,
            frame_time,
            playing: false,
            timer: 0.0,
            frame: 0,
        }
    }

    /// Move the sprite and, while playing, advance the frame timer
    pub fn update(&mut self, dt: f32) {
        self.sprite.update(dt);
        if !self.playing {
            return;
        }
        if self.timer > self.frame_time {
            self.timer = 0.0;
            self.frame = (self.frame + 1) % self.frame_coords.len();
        }
        self.timer += dt;
        self.show_frame();
    }

    /// Resume frame stepping
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Hold the current frame
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Halt and rewind to the first frame
    pub fn stop(&mut self) {
        self.playing = false;
        self.timer = 0.0;
        self.frame = 0;
        self.show_frame();
    }

    /// Frames are advancing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Index of the frame on screen
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Jump to frame `frame`, wrapped into range
    pub fn set_frame(&mut self, frame: usize) {
        self.frame = frame % self.frame_coords.len();
        self.show_frame();
    }

    /// Number of frames on the sheet
    pub fn frame_count(&self) -> usize {
        self.frame_coords.len()
    }

    fn show_frame(&mut self) {
        let coords = self.frame_coords[self.frame];
        self.sprite.texture.coords.x = coords.x;
        self.sprite.texture.coords.y = coords.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sheet() -> Animation {
        Animation::new(
            Vec3::zeros(),
            Vec2::new(8.0, 8.0),
            "sheet.png",
            IVec2::new(4, 2),
            10.0,
        )
    }

    #[test]
    fn test_frame_layout() {
        let mut anim = sheet();
        assert_eq!(anim.frame_count(), 8);
        assert_relative_eq!(anim.sprite.texture.coords.z, 0.25);
        assert_relative_eq!(anim.sprite.texture.coords.w, 0.5);
        anim.set_frame(5);
        assert_relative_eq!(anim.sprite.texture.coords.x, 0.25);
        assert_relative_eq!(anim.sprite.texture.coords.y, 0.5);
    }

    #[test]
    fn test_advances_once_timer_exceeds_frame_time() {
        let mut anim = sheet();
        anim.play();
        for _ in 0..11 {
            anim.update(1.0);
        }
        assert_eq!(anim.frame(), 0);
        anim.update(1.0);
        assert_eq!(anim.frame(), 1);
        assert_relative_eq!(anim.sprite.texture.coords.x, 0.25);
    }

    #[test]
    fn test_paused_animation_holds_frame() {
        let mut anim = sheet();
        anim.set_frame(3);
        for _ in 0..50 {
            anim.update(1.0);
        }
        assert_eq!(anim.frame(), 3);
        assert!(!anim.is_playing());
    }

    #[test]
    fn test_stop_rewinds() {
        let mut anim = sheet();
        anim.play();
        anim.set_frame(6);
        anim.stop();
        assert_eq!(anim.frame(), 0);
        assert!(!anim.is_playing());
        assert_eq!(anim.sprite.texture.coords.x, 0.0);
        assert_eq!(anim.sprite.texture.coords.y, 0.0);
    }
}
