//! Static text with an optional background image

use crate::context::Context;
use crate::foundation::math::{Vec2, Vec3, Vec4};
use crate::input::InputListener;
use crate::render::{Alignment, Sprite, TextSubmission};
use crate::ui::{ComponentBase, UIComponent, UIListener, UIStyle};
use std::any::Any;

/// A background sprite plus a line of label text.
///
/// The label alignment places the text box relative to the background:
/// [`Alignment::Left`] puts it one background-width to the left,
/// [`Alignment::Top`] one background-height above, and so on; any other
/// value overlays the background. Inside that box the text is aligned by
/// the horizontal and vertical label alignments.
///
/// Every other widget embeds a `Label` for its background and caption.
#[derive(Debug, Clone, Default)]
pub struct Label {
    base: ComponentBase,
    background: Sprite,
    label_text: String,
    label_alignment: Alignment,
    horizontal_label_alignment: Alignment,
    vertical_label_alignment: Alignment,
}

impl Label {
    /// Label with no text. An empty texture file name leaves the background
    /// undrawn.
    pub fn new(position: Vec3, dimensions: Vec2, texture_file_name: &str, window_dims: Vec2) -> Self {
        let mut label = Self {
            background: Sprite::new(Vec3::zeros(), Vec2::zeros(), texture_file_name),
            ..Self::default()
        };
        label.set_position(position, window_dims);
        label.set_dimensions(dimensions, window_dims);
        label
    }

    /// Set the caption and where it sits relative to the background
    pub fn with_label(mut self, text: impl Into<String>, alignment: Alignment) -> Self {
        self.label_text = text.into();
        self.label_alignment = alignment;
        self
    }

    /// Set the caption's alignment inside its box
    pub fn with_text_alignment(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.horizontal_label_alignment = horizontal;
        self.vertical_label_alignment = vertical;
        self
    }

    /// Caption
    pub fn label_text(&self) -> &str {
        &self.label_text
    }

    /// Change the caption
    pub fn set_label_text(&mut self, text: impl Into<String>) {
        self.label_text = text.into();
    }

    /// Caption placement relative to the background
    pub fn label_alignment(&self) -> Alignment {
        self.label_alignment
    }

    /// Change the caption placement
    pub fn set_label_alignment(&mut self, alignment: Alignment) {
        self.label_alignment = alignment;
    }

    /// Horizontal caption alignment inside its box
    pub fn horizontal_label_alignment(&self) -> Alignment {
        self.horizontal_label_alignment
    }

    /// Change the horizontal caption alignment
    pub fn set_horizontal_label_alignment(&mut self, alignment: Alignment) {
        self.horizontal_label_alignment = alignment;
    }

    /// Vertical caption alignment inside its box
    pub fn vertical_label_alignment(&self) -> Alignment {
        self.vertical_label_alignment
    }

    /// Change the vertical caption alignment
    pub fn set_vertical_label_alignment(&mut self, alignment: Alignment) {
        self.vertical_label_alignment = alignment;
    }

    /// Background sprite, in pixels
    pub fn background(&self) -> &Sprite {
        &self.background
    }

    /// Mutable background sprite
    pub fn background_mut(&mut self) -> &mut Sprite {
        &mut self.background
    }

    /// Background rectangle `(x, y, w, h)` in pixels
    pub fn rect(&self) -> Vec4 {
        let p = self.background.position();
        let d = self.background.dimensions;
        Vec4::new(p.x, p.y, d.x, d.y)
    }

    /// Submit the background and the caption
    pub fn draw_label(&mut self, ctx: &mut Context, style: &UIStyle) {
        ctx.graphics.submit(&mut self.background, style.shader);
        if self.label_text.is_empty() {
            return;
        }
        let d = self.background.dimensions;
        let mut position = self.background.position();
        position.z += 0.1;
        match self.label_alignment {
            Alignment::Left => position.x -= d.x,
            Alignment::Right => position.x += d.x,
            Alignment::Bottom => position.y -= d.y,
            Alignment::Top => position.y += d.y,
            Alignment::Center | Alignment::None => {}
        }
        ctx.graphics.submit_text(
            &TextSubmission {
                text: &self.label_text,
                position,
                bounds: Vec4::new(position.x, position.y, d.x, d.y),
                scale: style.text_scale,
                color: style.text_color,
                font_file: &style.font_file_name,
                h_align: self.horizontal_label_alignment,
                v_align: self.vertical_label_alignment,
            },
            style.shader,
        );
    }

    /// Reset to a blank label, keeping the id
    pub fn clear(&mut self) {
        self.background = Sprite::default();
        self.label_text.clear();
        self.label_alignment = Alignment::None;
        self.horizontal_label_alignment = Alignment::None;
        self.vertical_label_alignment = Alignment::None;
    }
}

impl InputListener for Label {}

impl UIComponent for Label {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn position(&self, window_dims: Vec2) -> Vec3 {
        let p = self.background.position();
        Vec3::new(p.x / window_dims.x, p.y / window_dims.y, p.z)
    }

    fn set_position(&mut self, position: Vec3, window_dims: Vec2) {
        self.background.entity.position = Vec3::new(position.x * window_dims.x, position.y * window_dims.y, position.z);
    }

    fn dimensions(&self, window_dims: Vec2) -> Vec2 {
        self.background.dimensions.component_div(&window_dims)
    }

    fn set_dimensions(&mut self, dimensions: Vec2, window_dims: Vec2) {
        self.background.dimensions = dimensions.component_mul(&window_dims);
    }

    fn draw(&mut self, ctx: &mut Context, style: &UIStyle) {
        self.draw_label(ctx, style);
    }

    fn process_input(&mut self, _ctx: &mut Context, _parent: &mut dyn UIListener) {}

    fn update(&mut self, _dt: f32, _ctx: &mut Context, _style: &UIStyle) {}

    fn destroy(&mut self) {
        self.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::widgets::tests::setup;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalized_round_trip() {
        let dims = Vec2::new(800.0, 600.0);
        let label = Label::new(Vec3::new(0.25, 0.5, 0.3), Vec2::new(0.5, 0.1), "label.png", dims);
        assert_relative_eq!(label.rect(), Vec4::new(200.0, 300.0, 400.0, 60.0), epsilon = 1e-4);
        assert_relative_eq!(label.position(dims), Vec3::new(0.25, 0.5, 0.3), epsilon = 1e-6);
        assert_relative_eq!(label.dimensions(dims), Vec2::new(0.5, 0.1), epsilon = 1e-6);
    }

    #[test]
    fn test_draw_submits_background_and_text() {
        let (mut ctx, style) = setup();
        let dims = ctx.window_dims();
        let mut label = Label::new(Vec3::new(0.25, 0.5, 0.0), Vec2::new(0.5, 0.1), "label.png", dims)
            .with_label("HI", Alignment::None)
            .with_text_alignment(Alignment::Center, Alignment::Center);
        ctx.graphics.begin();
        label.draw(&mut ctx, &style);
        let stats = ctx.graphics.end();
        assert_eq!(stats.sprites, 3);
    }

    #[test]
    fn test_untextured_label_draws_only_text() {
        let (mut ctx, style) = setup();
        let dims = ctx.window_dims();
        let mut label = Label::new(Vec3::new(0.25, 0.5, 0.0), Vec2::new(0.5, 0.1), "", dims)
            .with_label("A", Alignment::Left)
            .with_text_alignment(Alignment::Right, Alignment::Center);
        ctx.graphics.begin();
        label.draw(&mut ctx, &style);
        assert_eq!(ctx.graphics.end().sprites, 1);
    }

    #[test]
    fn test_clear_blanks_the_label() {
        let dims = Vec2::new(800.0, 600.0);
        let mut label = Label::new(Vec3::new(0.1, 0.1, 0.0), Vec2::new(0.1, 0.1), "label.png", dims)
            .with_label("X", Alignment::Top);
        label.destroy();
        assert!(label.label_text().is_empty());
        assert_eq!(label.label_alignment(), Alignment::None);
        assert!(label.background().texture.file_name.is_empty());
    }
}
