//! Masked text entry

use super::text_box::TextBox;
use super::Label;
use crate::context::Context;
use crate::foundation::math::{Vec2, Vec3};
use crate::input::InputListener;
use crate::render::Alignment;
use crate::ui::{ComponentBase, UIComponent, UIListener, UIStyle};
use std::any::Any;

pub use super::text_box::{SELECTED_EVENT, TEXT_ENTERED_EVENT, UNSELECTED_EVENT};

/// Character drawn in place of every entered character
pub const MASK: char = '*';

/// A [`TextBox`] that draws `*` for every character, with no length limit
/// and no character filter. Destroying it overwrites the entered text
/// before dropping it.
#[derive(Debug, Clone, Default)]
pub struct PasswordBox {
    text_box: TextBox,
}

impl PasswordBox {
    /// Empty password box; cursor dimensions as for [`TextBox::new`]
    pub fn new(
        label: Label,
        cursor_dimensions: Vec2,
        cursor_texture_file_name: &str,
        cursor_alignment: Alignment,
        vertical_alignment: Alignment,
        window_dims: Vec2,
    ) -> Self {
        Self {
            text_box: TextBox::new(label, cursor_dimensions, cursor_texture_file_name, window_dims)
                .with_alignment(cursor_alignment, vertical_alignment)
                .with_mask(MASK),
        }
    }

    /// Entered password, unmasked
    pub fn password(&self) -> &str {
        self.text_box.text()
    }

    /// Replace the password
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.text_box.set_text(password);
    }

    /// Underlying text field
    pub fn text_box(&self) -> &TextBox {
        &self.text_box
    }

    /// Mutable underlying text field
    pub fn text_box_mut(&mut self) -> &mut TextBox {
        &mut self.text_box
    }
}

impl InputListener for PasswordBox {
    fn char_typed(&mut self, c: char) {
        self.text_box.char_typed(c);
    }
}

impl UIComponent for PasswordBox {
    fn base(&self) -> &ComponentBase {
        self.text_box.base()
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        self.text_box.base_mut()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.text_box.set_enabled(enabled);
    }

    fn position(&self, window_dims: Vec2) -> Vec3 {
        self.text_box.position(window_dims)
    }

    fn set_position(&mut self, position: Vec3, window_dims: Vec2) {
        self.text_box.set_position(position, window_dims);
    }

    fn dimensions(&self, window_dims: Vec2) -> Vec2 {
        self.text_box.dimensions(window_dims)
    }

    fn set_dimensions(&mut self, dimensions: Vec2, window_dims: Vec2) {
        self.text_box.set_dimensions(dimensions, window_dims);
    }

    fn draw(&mut self, ctx: &mut Context, style: &UIStyle) {
        self.text_box.draw(ctx, style);
    }

    fn process_input(&mut self, ctx: &mut Context, parent: &mut dyn UIListener) {
        self.text_box.process_input(ctx, parent);
    }

    fn update(&mut self, dt: f32, ctx: &mut Context, style: &UIStyle) {
        self.text_box.update(dt, ctx, style);
    }

    fn destroy(&mut self) {
        self.text_box.scrub();
        self.text_box.destroy();
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
    use crate::input::MouseButton;
    use crate::ui::widgets::tests::{frame, setup};
    use crate::ui::EventQueue;
    use approx::assert_relative_eq;

    #[test]
    fn test_masked_entry() {
        let (mut ctx, style) = setup();
        let dims = ctx.window_dims();
        let label = Label::new(Vec3::new(0.25, 0.5, 0.0), Vec2::new(0.5, 0.1), "box.png", dims);
        let mut password = PasswordBox::new(label, Vec2::new(2.0, 0.05), "cursor.png", Alignment::Center, Alignment::Center, dims);

        frame(&mut ctx, |input| {
            input.move_mouse(Vec2::new(300.0, 330.0));
            input.press_mouse_button(MouseButton::Left);
        });
        let mut queue = EventQueue::new(&style);
        password.process_input(&mut ctx, &mut queue);
        assert_eq!(queue.into_events(), vec![(password.id(), SELECTED_EVENT)]);

        for c in "hunter2!".chars() {
            password.char_typed(c);
        }
        assert_eq!(password.password(), "hunter2!");
        assert_eq!(password.text_box().max_characters(), None);

        password.update(1.0, &mut ctx, &style);
        assert_relative_eq!(password.text_box().cursor().position().x, 200.0 + 11.0 + 7.0 * 12.0);

        ctx.graphics.begin();
        password.draw(&mut ctx, &style);
        assert_eq!(ctx.graphics.end().sprites, 1 + 8 + 1);
    }

    #[test]
    fn test_destroy_clears_password() {
        let dims = Vec2::new(800.0, 600.0);
        let label = Label::new(Vec3::new(0.25, 0.5, 0.0), Vec2::new(0.5, 0.1), "box.png", dims);
        let mut password = PasswordBox::new(label, Vec2::new(2.0, 0.05), "cursor.png", Alignment::None, Alignment::None, dims);
        password.set_password("secret");
        password.destroy();
        assert!(password.password().is_empty());
    }
}
