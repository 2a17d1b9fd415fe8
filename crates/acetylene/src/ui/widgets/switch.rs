//! Two-state toggle

use super::{strip_coords, Label};
use crate::context::Context;
use crate::foundation::math::{Vec2, Vec3};
use crate::input::{InputListener, MouseButton};
use crate::ui::{mouse_over, ComponentBase, EventId, UIComponent, UIListener, UIStyle};
use std::any::Any;

/// The switch was turned off
pub const OFF_EVENT: EventId = 0;
/// The switch was turned on
pub const ON_EVENT: EventId = 1;

/// A label toggled by clicking it. The background texture holds the off
/// frame in its left half and the on frame in its right half.
#[derive(Debug, Clone, Default)]
pub struct Switch {
    label: Label,
    on: bool,
}

impl Switch {
    /// Switch drawn over `label`'s background, initially off
    pub fn new(label: Label) -> Self {
        let mut switch = Self { label, on: false };
        switch.set_on(false);
        switch
    }

    /// Background and caption
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Mutable background and caption
    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    /// Switch is on
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Turn on or off without raising an event
    pub fn set_on(&mut self, on: bool) {
        self.on = on;
        self.label.background_mut().texture.coords = strip_coords(u32::from(on), 2);
    }
}

impl InputListener for Switch {}

impl UIComponent for Switch {
    fn base(&self) -> &ComponentBase {
        self.label.base()
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        self.label.base_mut()
    }

    fn position(&self, window_dims: Vec2) -> Vec3 {
        self.label.position(window_dims)
    }

    fn set_position(&mut self, position: Vec3, window_dims: Vec2) {
        self.label.set_position(position, window_dims);
    }

    fn dimensions(&self, window_dims: Vec2) -> Vec2 {
        self.label.dimensions(window_dims)
    }

    fn set_dimensions(&mut self, dimensions: Vec2, window_dims: Vec2) {
        self.label.set_dimensions(dimensions, window_dims);
    }

    fn draw(&mut self, ctx: &mut Context, style: &UIStyle) {
        self.label.draw_label(ctx, style);
    }

    fn process_input(&mut self, ctx: &mut Context, parent: &mut dyn UIListener) {
        if !mouse_over(self, ctx, parent.style()) || !ctx.input.is_mouse_button_pressed(MouseButton::Left) {
            return;
        }
        let on = !self.on;
        self.set_on(on);
        parent.component_event(self.id(), if on { ON_EVENT } else { OFF_EVENT });
    }

    fn update(&mut self, _dt: f32, _ctx: &mut Context, _style: &UIStyle) {}

    fn destroy(&mut self) {
        self.label.clear();
        self.on = false;
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
    use crate::ui::widgets::tests::{frame, setup};
    use crate::ui::EventQueue;

    #[test]
    fn test_click_toggles() {
        let (mut ctx, style) = setup();
        let dims = ctx.window_dims();
        let mut switch = Switch::new(Label::new(Vec3::new(0.5, 0.5, 0.0), Vec2::new(0.1, 0.1), "switch.png", dims));
        assert_eq!(switch.label().background().texture.coords, strip_coords(0, 2));

        let toggle = |ctx: &mut Context, switch: &mut Switch| {
            frame(ctx, |input| {
                input.move_mouse(Vec2::new(420.0, 320.0));
                input.press_mouse_button(MouseButton::Left);
            });
            let mut queue = EventQueue::new(&style);
            switch.process_input(ctx, &mut queue);
            frame(ctx, |input| input.release_mouse_button(MouseButton::Left));
            switch.process_input(ctx, &mut queue);
            queue.into_events()
        };

        let events = toggle(&mut ctx, &mut switch);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].1, ON_EVENT);
        assert!(switch.is_on());
        assert_eq!(switch.label().background().texture.coords, strip_coords(1, 2));

        let events = toggle(&mut ctx, &mut switch);
        assert_eq!(events[0].1, OFF_EVENT);
        assert!(!switch.is_on());
    }

    #[test]
    fn test_press_elsewhere_is_ignored() {
        let (mut ctx, style) = setup();
        let dims = ctx.window_dims();
        let mut switch = Switch::new(Label::new(Vec3::new(0.5, 0.5, 0.0), Vec2::new(0.1, 0.1), "switch.png", dims));
        frame(&mut ctx, |input| {
            input.move_mouse(Vec2::new(10.0, 10.0));
            input.press_mouse_button(MouseButton::Left);
        });
        let mut queue = EventQueue::new(&style);
        switch.process_input(&mut ctx, &mut queue);
        assert!(queue.into_events().is_empty());
        assert!(!switch.is_on());
    }
}
