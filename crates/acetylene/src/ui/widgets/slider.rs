//! Horizontal value slider

use super::{align_cursor, strip_coords, Label};
use crate::context::Context;
use crate::foundation::math::{Vec2, Vec3};
use crate::input::{InputListener, MouseButton};
use crate::render::{Alignment, Sprite};
use crate::ui::{mouse_over, ComponentBase, EventId, UIComponent, UIListener, UIStyle};
use std::any::Any;

/// The user let go of the cursor
pub const VALUE_SET_EVENT: EventId = 0;

/// A track with a draggable cursor holding a value in `[0, 1]`.
///
/// Pressing anywhere on the track grabs the cursor; the value follows the
/// mouse until the left button is released, which raises
/// [`VALUE_SET_EVENT`]. The track texture holds the idle frame in its left
/// half and the grabbed frame in its right half.
#[derive(Debug, Clone, Default)]
pub struct Slider {
    label: Label,
    cursor: Sprite,
    cursor_alignment: Alignment,
    value: f32,
    selected: bool,
}

impl Slider {
    /// Slider over `label`'s background.
    ///
    /// `cursor_dimensions.x` is a width in pixels and `cursor_dimensions.y` a
    /// fraction of the window height.
    pub fn new(
        label: Label,
        cursor_dimensions: Vec2,
        cursor_texture_file_name: &str,
        cursor_alignment: Alignment,
        window_dims: Vec2,
    ) -> Self {
        let cursor = Sprite::new(
            Vec3::zeros(),
            Vec2::new(cursor_dimensions.x, cursor_dimensions.y * window_dims.y),
            cursor_texture_file_name,
        );
        let mut slider = Self {
            label,
            cursor,
            cursor_alignment,
            value: 0.0,
            selected: false,
        };
        slider.set_selected(false);
        slider
    }

    /// Background and caption
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Mutable background and caption
    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    /// Cursor sprite, placed by [`update`](UIComponent::update)
    pub fn cursor(&self) -> &Sprite {
        &self.cursor
    }

    /// Vertical placement of the cursor on the track
    pub fn cursor_alignment(&self) -> Alignment {
        self.cursor_alignment
    }

    /// Change the cursor's vertical placement
    pub fn set_cursor_alignment(&mut self, alignment: Alignment) {
        self.cursor_alignment = alignment;
    }

    /// Current value
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the value without raising an event, clamped to `[0, 1]`
    pub fn set_value(&mut self, value: f32) {
        self.value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    }

    /// Cursor is being dragged
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Grab or release the cursor and switch frames
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.label.background_mut().texture.coords = strip_coords(u32::from(selected), 2);
    }
}

impl InputListener for Slider {}

impl UIComponent for Slider {
    fn base(&self) -> &ComponentBase {
        self.label.base()
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        self.label.base_mut()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.label.set_enabled(enabled);
        if !enabled {
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
        let old = self.label.dimensions(window_dims).y;
        if old > 0.0 {
            self.cursor.dimensions.y *= dimensions.y / old;
        }
        self.label.set_dimensions(dimensions, window_dims);
    }

    fn draw(&mut self, ctx: &mut Context, style: &UIStyle) {
        self.label.draw_label(ctx, style);
        ctx.graphics.submit(&mut self.cursor, style.shader);
    }

    fn process_input(&mut self, ctx: &mut Context, parent: &mut dyn UIListener) {
        let style = parent.style();
        if mouse_over(self, ctx, style) && ctx.input.is_mouse_button_pressed(MouseButton::Left) {
            self.set_selected(true);
        }
        if self.selected && !ctx.input.is_mouse_button_down(MouseButton::Left) {
            parent.component_event(self.id(), VALUE_SET_EVENT);
            self.set_selected(false);
        }
        if !self.selected {
            return;
        }
        let mp = ctx.mouse_position_in(parent.style().shader);
        let track = self.label.rect();
        let travel = track.z - self.cursor.dimensions.x;
        self.value = if mp.x >= track.x + travel {
            1.0
        } else if mp.x < track.x {
            0.0
        } else {
            (mp.x - track.x) / travel
        };
    }

    fn update(&mut self, _dt: f32, _ctx: &mut Context, _style: &UIStyle) {
        let track = self.label.rect();
        let z = self.label.background().position().z;
        let cursor = self.cursor.dimensions;
        self.cursor.entity.position = Vec3::new(
            track.x + (track.z - cursor.x) * self.value,
            align_cursor(self.cursor_alignment, track.y, track.w, cursor.y),
            z + 0.1,
        );
    }

    fn destroy(&mut self) {
        self.label.clear();
        self.cursor = Sprite::default();
        self.cursor_alignment = Alignment::None;
        self.value = 0.0;
        self.selected = false;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
