//! Push button

use super::{strip_coords, Label};
use crate::context::Context;
use crate::foundation::math::{Vec2, Vec3};
use crate::input::{InputListener, MouseButton};
use crate::ui::{mouse_over, ComponentBase, EventId, UIComponent, UIListener, UIStyle};
use std::any::Any;

/// The mouse left the button
pub const UNSELECTED_EVENT: EventId = 0;
/// The mouse entered the button
pub const SELECTED_EVENT: EventId = 1;
/// Left button pressed and released over the button
pub const CLICKED_EVENT: EventId = 2;

/// A label that reacts to hover and click.
///
/// The background texture is a strip of three frames: unselected, selected
/// (hovered) and clicked (held).
#[derive(Debug, Clone, Default)]
pub struct Button {
    label: Label,
    selected: bool,
    clicked: bool,
}

impl Button {
    /// Button drawn over `label`'s background
    pub fn new(label: Label) -> Self {
        let mut button = Self {
            label,
            selected: false,
            clicked: false,
        };
        button.set_selected(false);
        button
    }

    /// Background and caption
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Mutable background and caption
    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    /// Mouse is over the button
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Set the hover state and its frame
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.label.background_mut().texture.coords = strip_coords(u32::from(selected), 3);
    }

    /// Left button is held over the button
    pub fn is_clicked(&self) -> bool {
        self.clicked
    }

    /// Set the held state and its frame
    pub fn set_clicked(&mut self, clicked: bool) {
        self.clicked = clicked;
        let frame = if clicked {
            2
        } else {
            u32::from(self.selected)
        };
        self.label.background_mut().texture.coords = strip_coords(frame, 3);
    }
}

impl InputListener for Button {}

impl UIComponent for Button {
    fn base(&self) -> &ComponentBase {
        self.label.base()
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        self.label.base_mut()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.label.set_enabled(enabled);
        if !enabled {
            self.set_clicked(false);
            self.set_selected(false);
        }
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
        let id = self.id();
        if mouse_over(self, ctx, parent.style()) {
            if !self.selected {
                self.set_selected(true);
                parent.component_event(id, SELECTED_EVENT);
            }
        } else if self.selected {
            self.set_selected(false);
            parent.component_event(id, UNSELECTED_EVENT);
        }

        if self.selected {
            if self.clicked && ctx.input.is_mouse_button_released(MouseButton::Left) {
                parent.component_event(id, CLICKED_EVENT);
            }
            self.set_clicked(ctx.input.is_mouse_button_down(MouseButton::Left));
        } else {
            self.set_clicked(false);
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut Context, _style: &UIStyle) {}

    fn destroy(&mut self) {
        self.label.clear();
        self.selected = false;
        self.clicked = false;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
