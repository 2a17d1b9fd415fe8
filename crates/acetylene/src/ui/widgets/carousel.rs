//! Cycle through a list of values with previous/next buttons

use super::button::{Button, CLICKED_EVENT};
use super::Label;
use crate::context::Context;
use crate::foundation::math::{Vec2, Vec3, Vec4};
use crate::input::InputListener;
use crate::render::{Alignment, Reflect, ShaderId, TextSubmission};
use crate::ui::{ComponentBase, ComponentId, EventId, EventQueue, UIComponent, UIListener, UIStyle};
use std::any::Any;

/// The shown value changed
pub const VALUE_SET_EVENT: EventId = 0;

const PREV_BUTTON: ComponentId = ComponentId(0);
const NEXT_BUTTON: ComponentId = ComponentId(1);

/// A label showing one of several string values, with a previous and a next
/// button that step through them cyclically.
///
/// The button alignment decides the layout. [`Alignment::Left`] stacks the
/// buttons at the left edge with next below previous, [`Alignment::Right`]
/// stacks them at the right edge, and [`Alignment::Center`] puts previous and
/// next on either side of the value. Both buttons share one texture; the
/// next button draws it mirrored.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    label: Label,
    values: Vec<String>,
    value_index: usize,
    horizontal_alignment: Alignment,
    vertical_alignment: Alignment,
    button_alignment: Alignment,
    prev_button: Button,
    next_button: Button,
    style: UIStyle,
    outgoing: Vec<EventId>,
}

impl Carousel {
    /// Carousel occupying `label`'s rectangle, showing `value` (or the first
    /// value if `value` is not among `values`).
    ///
    /// An alignment other than left, right or center falls back to center.
    pub fn new(
        label: Label,
        values: Vec<String>,
        value: &str,
        button_texture_file_name: &str,
        button_alignment: Alignment,
        window_dims: Vec2,
    ) -> Self {
        let position = label.position(window_dims);
        let dimensions = label.dimensions(window_dims);
        let button = || {
            Button::new(
                Label::new(Vec3::zeros(), Vec2::zeros(), button_texture_file_name, window_dims)
                    .with_text_alignment(Alignment::Center, Alignment::Center),
            )
        };
        let mut carousel = Self {
            label,
            value_index: values.iter().position(|v| v == value).unwrap_or(0),
            values,
            horizontal_alignment: Alignment::Center,
            vertical_alignment: Alignment::Center,
            button_alignment: Alignment::Center,
            prev_button: button(),
            next_button: button(),
            style: UIStyle::default(),
            outgoing: Vec::new(),
        };
        carousel.prev_button.set_id(PREV_BUTTON);
        carousel.next_button.set_id(NEXT_BUTTON);
        if !carousel.set_button_alignment(button_alignment, window_dims) {
            log::warn!("Unsupported carousel button alignment {:?}, using center", button_alignment);
            carousel.set_button_alignment(Alignment::Center, window_dims);
        }
        carousel.set_dimensions(dimensions, window_dims);
        carousel.set_position(position, window_dims);
        carousel
    }

    /// Set where the value sits inside the label
    pub fn with_value_alignment(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    /// Background and caption
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Mutable background and caption
    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    /// Steps back through the values
    pub fn prev_button(&self) -> &Button {
        &self.prev_button
    }

    /// Steps forward through the values
    pub fn next_button(&self) -> &Button {
        &self.next_button
    }

    /// Every value in order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Shown value, `None` when there are no values
    pub fn value(&self) -> Option<&str> {
        self.values.get(self.value_index).map(String::as_str)
    }

    /// Show `value`, appending it first if it is new
    pub fn set_value(&mut self, value: &str) {
        let index = match self.value_index_of(value) {
            Some(index) => index,
            None => {
                self.values.push(value.to_owned());
                self.values.len() - 1
            }
        };
        self.set_value_index(index);
    }

    /// Index of the shown value
    pub fn value_index(&self) -> usize {
        self.value_index
    }

    /// Index of `value`, if present
    pub fn value_index_of(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// Show the value at `index`; out of range shows the first
    pub fn set_value_index(&mut self, index: usize) {
        self.value_index = if index < self.values.len() { index } else { 0 };
    }

    /// Insert `value` at `index`, or append it for `None`. False if `index`
    /// is past the end.
    pub fn add_value(&mut self, value: impl Into<String>, index: Option<usize>) -> bool {
        match index {
            None => self.values.push(value.into()),
            Some(i) if i <= self.values.len() => self.values.insert(i, value.into()),
            Some(_) => return false,
        }
        true
    }

    /// Remove the first occurrence of `value`; false if absent
    pub fn remove_value(&mut self, value: &str) -> bool {
        match self.value_index_of(value) {
            Some(index) => self.remove_value_at(index),
            None => false,
        }
    }

    /// Remove the value at `index`; false if out of range
    pub fn remove_value_at(&mut self, index: usize) -> bool {
        if index >= self.values.len() {
            return false;
        }
        self.values.remove(index);
        self.set_value_index(self.value_index);
        true
    }

    /// Horizontal placement of the value inside the label
    pub fn horizontal_alignment(&self) -> Alignment {
        self.horizontal_alignment
    }

    /// Change the value's horizontal placement
    pub fn set_horizontal_alignment(&mut self, alignment: Alignment) {
        self.horizontal_alignment = alignment;
    }

    /// Vertical placement of the value inside the label
    pub fn vertical_alignment(&self) -> Alignment {
        self.vertical_alignment
    }

    /// Change the value's vertical placement
    pub fn set_vertical_alignment(&mut self, alignment: Alignment) {
        self.vertical_alignment = alignment;
    }

    /// Button layout
    pub fn button_alignment(&self) -> Alignment {
        self.button_alignment
    }

    /// Re-lay out the buttons keeping the overall rectangle. Only left, right
    /// and center are supported; anything else is refused.
    pub fn set_button_alignment(&mut self, alignment: Alignment, window_dims: Vec2) -> bool {
        let reflect = match alignment {
            Alignment::Left | Alignment::Right => Reflect::VERTICAL,
            Alignment::Center => Reflect::HORIZONTAL,
            _ => return false,
        };
        let dimensions = self.dimensions(window_dims);
        let position = self.position(window_dims);
        self.prev_button.label_mut().background_mut().reflect = Reflect::empty();
        self.next_button.label_mut().background_mut().reflect = reflect;
        self.button_alignment = alignment;
        self.set_dimensions(dimensions, window_dims);
        self.set_position(position, window_dims);
        true
    }

    fn step(&mut self, forward: bool) {
        let len = self.values.len();
        if len == 0 {
            return;
        }
        let index = if forward {
            (self.value_index + 1) % len
        } else {
            self.value_index.checked_sub(1).unwrap_or(len - 1)
        };
        self.set_value_index(index);
        self.outgoing.push(VALUE_SET_EVENT);
    }
}

impl UIListener for Carousel {
    fn component_event(&mut self, component: ComponentId, event: EventId) {
        if event != CLICKED_EVENT {
            return;
        }
        match component {
            PREV_BUTTON => self.step(false),
            NEXT_BUTTON => self.step(true),
            _ => {}
        }
    }

    fn style(&self) -> &UIStyle {
        &self.style
    }

    fn set_shader(&mut self, _shader: ShaderId) {
        log::debug!("Carousel buttons draw with the parent's shader");
    }

    fn set_font_file_name(&mut self, _font_file_name: &str) {
        log::debug!("Carousel buttons draw with the parent's font");
    }

    fn set_text_scale(&mut self, _text_scale: f32) {
        log::debug!("Carousel buttons draw with the parent's text scale");
    }

    fn set_text_color(&mut self, _text_color: Vec4) {
        log::debug!("Carousel buttons draw with the parent's text color");
    }
}

impl InputListener for Carousel {}

impl UIComponent for Carousel {
    fn base(&self) -> &ComponentBase {
        self.label.base()
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        self.label.base_mut()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.label.set_enabled(enabled);
        self.prev_button.set_enabled(enabled);
        self.next_button.set_enabled(enabled);
    }

    fn position(&self, window_dims: Vec2) -> Vec3 {
        match self.button_alignment {
            Alignment::Left => self.next_button.position(window_dims),
            Alignment::Center => self.prev_button.position(window_dims),
            _ => self.label.position(window_dims),
        }
    }

    fn set_position(&mut self, position: Vec3, window_dims: Vec2) {
        let label = self.label.dimensions(window_dims);
        let button = self.next_button.dimensions(window_dims);
        let (prev, label_at, next) = match self.button_alignment {
            Alignment::Left => (
                position + Vec3::new(0.0, button.y, 0.0),
                position + Vec3::new(button.x, 0.0, 0.0),
                position,
            ),
            Alignment::Right => (
                position + Vec3::new(label.x, button.y, 0.0),
                position,
                position + Vec3::new(label.x, 0.0, 0.0),
            ),
            _ => (
                position,
                position + Vec3::new(button.x, 0.0, 0.0),
                position + Vec3::new(button.x + label.x, 0.0, 0.0),
            ),
        };
        self.prev_button.set_position(prev, window_dims);
        self.label.set_position(label_at, window_dims);
        self.next_button.set_position(next, window_dims);
    }

    fn dimensions(&self, window_dims: Vec2) -> Vec2 {
        let label = self.label.dimensions(window_dims);
        let mut width = label.x + self.next_button.dimensions(window_dims).x;
        if self.button_alignment == Alignment::Center {
            width += self.prev_button.dimensions(window_dims).x;
        }
        Vec2::new(width, label.y)
    }

    fn set_dimensions(&mut self, dimensions: Vec2, window_dims: Vec2) {
        let (label, button) = match self.button_alignment {
            Alignment::Left | Alignment::Right => (
                Vec2::new(4.0 * dimensions.x / 5.0, dimensions.y),
                Vec2::new(dimensions.x / 5.0, dimensions.y / 2.0),
            ),
            _ => (
                Vec2::new(3.0 * dimensions.x / 5.0, dimensions.y),
                Vec2::new(dimensions.x / 5.0, dimensions.y),
            ),
        };
        self.label.set_dimensions(label, window_dims);
        self.prev_button.set_dimensions(button, window_dims);
        self.next_button.set_dimensions(button, window_dims);
    }

    fn draw(&mut self, ctx: &mut Context, style: &UIStyle) {
        self.label.draw_label(ctx, style);
        if let Some(value) = self.values.get(self.value_index) {
            let mut position = self.label.background().position();
            position.z += 0.1;
            ctx.graphics.submit_text(
                &TextSubmission {
                    text: value,
                    position,
                    bounds: self.label.rect(),
                    scale: style.text_scale,
                    color: style.text_color,
                    font_file: &style.font_file_name,
                    h_align: self.horizontal_alignment,
                    v_align: self.vertical_alignment,
                },
                style.shader,
            );
        }
        self.prev_button.draw(ctx, style);
        self.next_button.draw(ctx, style);
    }

    fn process_input(&mut self, ctx: &mut Context, parent: &mut dyn UIListener) {
        let style = parent.style().clone();
        let mut queue = EventQueue::new(&style);
        self.prev_button.process_input(ctx, &mut queue);
        self.next_button.process_input(ctx, &mut queue);
        for (component, event) in queue.into_events() {
            self.component_event(component, event);
        }
        let id = self.id();
        for event in self.outgoing.drain(..) {
            parent.component_event(id, event);
        }
        self.style = style;
    }

    fn update(&mut self, dt: f32, ctx: &mut Context, style: &UIStyle) {
        self.prev_button.update(dt, ctx, style);
        self.next_button.update(dt, ctx, style);
    }

    fn destroy(&mut self) {
        self.label.clear();
        self.values.clear();
        self.value_index = 0;
        self.prev_button.destroy();
        self.next_button.destroy();
        self.horizontal_alignment = Alignment::None;
        self.vertical_alignment = Alignment::None;
        self.outgoing.clear();
        self.style = UIStyle::default();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
