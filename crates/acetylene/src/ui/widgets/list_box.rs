//! Scrollable single-selection list

use super::switch::Switch;
use super::text_box::{KEY_REPEAT_DELAY, TIMER_WRAP};
use super::Label;
use crate::context::Context;
use crate::foundation::math::{Vec2, Vec3, Vec4};
use crate::input::InputListener;
use crate::render::{Alignment, ShaderId, Sprite};
use crate::ui::{mouse_over, ComponentBase, ComponentId, EventId, EventQueue, UIComponent, UIListener, UIStyle};
use std::any::Any;

/// A different value was picked
pub const VALUE_SET_EVENT: EventId = 0;

/// A column of switches, one per value, of which at most one is on.
///
/// `value_count` rows are visible at a time, starting at the top index; the
/// scroll wheel over the box moves the window. Clicking a row turns it on
/// and every other row off.
#[derive(Debug, Clone, Default)]
pub struct ListBox {
    label: Label,
    elements: Vec<Switch>,
    element_texture_file_name: String,
    next_id: u32,
    value_count: usize,
    top_index: usize,
    timer: f32,
    horizontal_alignment: Alignment,
    vertical_alignment: Alignment,
    style: UIStyle,
    outgoing: Vec<EventId>,
}

impl ListBox {
    /// List over `label`'s background showing `value_count` rows of `values`,
    /// none selected
    pub fn new(label: Label, values: Vec<String>, value_count: usize, element_texture_file_name: &str) -> Self {
        let mut list = Self {
            label,
            element_texture_file_name: element_texture_file_name.to_owned(),
            value_count: value_count.max(1),
            horizontal_alignment: Alignment::Center,
            vertical_alignment: Alignment::Center,
            ..Self::default()
        };
        for value in values {
            list.add_value(value, None);
        }
        list
    }

    /// Set where each value sits inside its row
    pub fn with_value_alignment(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.set_horizontal_alignment(horizontal);
        self.set_vertical_alignment(vertical);
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

    /// Row switches, top to bottom
    pub fn elements(&self) -> &[Switch] {
        &self.elements
    }

    /// Every value in order
    pub fn values(&self) -> Vec<&str> {
        self.elements.iter().map(|e| e.label().label_text()).collect()
    }

    /// Selected value, empty if none
    pub fn value(&self) -> &str {
        self.elements
            .iter()
            .find(|e| e.is_on())
            .map_or("", |e| e.label().label_text())
    }

    /// Select `value`, appending it first if it is new
    pub fn set_value(&mut self, value: &str) {
        let index = match self.value_index_of(value) {
            Some(index) => index,
            None => {
                self.add_value(value, None);
                self.elements.len() - 1
            }
        };
        self.set_value_index(index);
    }

    /// Index of the selected value
    pub fn value_index(&self) -> Option<usize> {
        self.elements.iter().position(Switch::is_on)
    }

    /// Index of `value`, if present
    pub fn value_index_of(&self, value: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.label().label_text() == value)
    }

    /// Select the value at `index`; false if out of range
    pub fn set_value_index(&mut self, index: usize) -> bool {
        if index >= self.elements.len() {
            return false;
        }
        for (i, element) in self.elements.iter_mut().enumerate() {
            element.set_on(i == index);
        }
        true
    }

    /// Insert a row for `value` at `index`, or append it for `None`. An index
    /// past the end appends.
    pub fn add_value(&mut self, value: impl Into<String>, index: Option<usize>) {
        let mut label = Label::default()
            .with_label(value, Alignment::Center)
            .with_text_alignment(self.horizontal_alignment, self.vertical_alignment);
        *label.background_mut() = Sprite::new(Vec3::zeros(), Vec2::zeros(), self.element_texture_file_name.as_str());
        let mut element = Switch::new(label);
        element.set_id(ComponentId(self.next_id));
        self.next_id += 1;
        match index {
            Some(i) if i <= self.elements.len() => self.elements.insert(i, element),
            _ => self.elements.push(element),
        }
        self.layout();
    }

    /// Remove the first row showing `value`; false if absent
    pub fn remove_value(&mut self, value: &str) -> bool {
        match self.value_index_of(value) {
            Some(index) => self.remove_value_at(index),
            None => false,
        }
    }

    /// Remove the row at `index`; false if out of range
    pub fn remove_value_at(&mut self, index: usize) -> bool {
        if index >= self.elements.len() {
            return false;
        }
        let mut element = self.elements.remove(index);
        element.destroy();
        self.layout();
        true
    }

    /// Visible rows
    pub fn value_count(&self) -> usize {
        self.value_count
    }

    /// First visible row
    pub fn top_index(&self) -> usize {
        self.top_index
    }

    /// Scroll so row `top_index` is first. Fails when that would leave fewer
    /// than `value_count` rows below it, except at row 0.
    pub fn set_top_index(&mut self, top_index: usize) -> bool {
        let len = self.elements.len();
        if len <= self.value_count {
            if top_index > 0 {
                return false;
            }
        } else if top_index > len - self.value_count {
            return false;
        }
        self.top_index = top_index;
        self.layout();
        true
    }

    /// Horizontal placement of values inside their rows
    pub fn horizontal_alignment(&self) -> Alignment {
        self.horizontal_alignment
    }

    /// Change every row's horizontal value placement
    pub fn set_horizontal_alignment(&mut self, alignment: Alignment) {
        self.horizontal_alignment = alignment;
        for element in &mut self.elements {
            element.label_mut().set_horizontal_label_alignment(alignment);
        }
    }

    /// Vertical placement of values inside their rows
    pub fn vertical_alignment(&self) -> Alignment {
        self.vertical_alignment
    }

    /// Change every row's vertical value placement
    pub fn set_vertical_alignment(&mut self, alignment: Alignment) {
        self.vertical_alignment = alignment;
        for element in &mut self.elements {
            element.label_mut().set_vertical_label_alignment(alignment);
        }
    }

    /// Stack the rows down from the top of the box, shifted up by the
    /// rows scrolled past
    fn layout(&mut self) {
        let rect = self.label.rect();
        let z = self.label.background().position().z + 0.1;
        let height = rect.w / self.value_count as f32;
        let mut y = rect.y + rect.w - height + height * self.top_index as f32;
        for element in &mut self.elements {
            let background = element.label_mut().background_mut();
            background.entity.position = Vec3::new(rect.x, y, z);
            background.dimensions = Vec2::new(rect.z, height);
            y -= height;
        }
    }

    fn visible(&self) -> std::ops::Range<usize> {
        let end = (self.top_index + self.value_count).min(self.elements.len());
        self.top_index.min(end)..end
    }
}

impl UIListener for ListBox {
    fn component_event(&mut self, component: ComponentId, _event: EventId) {
        for element in &mut self.elements {
            let on = element.id() == component;
            element.set_on(on);
        }
        self.outgoing.push(VALUE_SET_EVENT);
    }

    fn style(&self) -> &UIStyle {
        &self.style
    }

    fn set_shader(&mut self, _shader: ShaderId) {
        log::debug!("List box rows draw with the parent's shader");
    }

    fn set_font_file_name(&mut self, _font_file_name: &str) {
        log::debug!("List box rows draw with the parent's font");
    }

    fn set_text_scale(&mut self, _text_scale: f32) {
        log::debug!("List box rows draw with the parent's text scale");
    }

    fn set_text_color(&mut self, _text_color: Vec4) {
        log::debug!("List box rows draw with the parent's text color");
    }
}

impl InputListener for ListBox {}

impl UIComponent for ListBox {
    fn base(&self) -> &ComponentBase {
        self.label.base()
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        self.label.base_mut()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.label.set_enabled(enabled);
        for element in &mut self.elements {
            element.set_enabled(enabled);
        }
    }

    fn position(&self, window_dims: Vec2) -> Vec3 {
        self.label.position(window_dims)
    }

    fn set_position(&mut self, position: Vec3, window_dims: Vec2) {
        self.label.set_position(position, window_dims);
        self.layout();
    }

    fn dimensions(&self, window_dims: Vec2) -> Vec2 {
        self.label.dimensions(window_dims)
    }

    fn set_dimensions(&mut self, dimensions: Vec2, window_dims: Vec2) {
        self.label.set_dimensions(dimensions, window_dims);
        self.layout();
    }

    fn draw(&mut self, ctx: &mut Context, style: &UIStyle) {
        self.label.draw_label(ctx, style);
        let visible = self.visible();
        for element in &mut self.elements[visible] {
            element.draw(ctx, style);
        }
    }

    fn process_input(&mut self, ctx: &mut Context, parent: &mut dyn UIListener) {
        let style = parent.style().clone();
        let mut queue = EventQueue::new(&style);
        let visible = self.visible();
        for element in &mut self.elements[visible] {
            if element.is_enabled() {
                element.process_input(ctx, &mut queue);
            }
        }
        for (component, event) in queue.into_events() {
            self.component_event(component, event);
        }

        if mouse_over(self, ctx, &style) {
            let scroll = ctx.input.mouse_scroll().y;
            if scroll != 0.0 && self.timer > KEY_REPEAT_DELAY {
                if scroll < 0.0 {
                    self.set_top_index(self.top_index + 1);
                } else if self.top_index > 0 {
                    self.set_top_index(self.top_index - 1);
                }
                self.timer = 0.0;
            }
        }

        let id = self.id();
        for event in self.outgoing.drain(..) {
            parent.component_event(id, event);
        }
        self.style = style;
    }

    fn update(&mut self, dt: f32, _ctx: &mut Context, _style: &UIStyle) {
        self.timer += dt;
        if self.timer > TIMER_WRAP {
            self.timer = 0.0;
        }
    }

    fn destroy(&mut self) {
        self.label.clear();
        for element in &mut self.elements {
            element.destroy();
        }
        self.elements.clear();
        self.element_texture_file_name.clear();
        self.next_id = 0;
        self.value_count = 1;
        self.top_index = 0;
        self.timer = 0.0;
        self.horizontal_alignment = Alignment::None;
        self.vertical_alignment = Alignment::None;
        self.outgoing.clear();
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
    use crate::ui::widgets::switch::ON_EVENT;
    use crate::ui::widgets::tests::{frame, setup};
    use approx::assert_relative_eq;

    fn list(window_dims: Vec2) -> ListBox {
        let label = Label::new(Vec3::new(0.25, 0.5, 0.0), Vec2::new(0.5, 0.2), "list.png", window_dims);
        let values = ["A", "B", "C", "D"].iter().map(|v| (*v).to_owned()).collect();
        ListBox::new(label, values, 2, "row.png")
    }

    fn click(ctx: &mut Context, style: &UIStyle, list: &mut ListBox, at: Vec2) -> Vec<(ComponentId, EventId)> {
        frame(ctx, |input| {
            input.move_mouse(at);
            input.press_mouse_button(MouseButton::Left);
        });
        let mut queue = EventQueue::new(style);
        list.process_input(ctx, &mut queue);
        frame(ctx, |input| input.release_mouse_button(MouseButton::Left));
        list.process_input(ctx, &mut queue);
        queue.into_events()
    }

    #[test]
    fn test_rows_stack_from_the_top() {
        let list = list(Vec2::new(800.0, 600.0));
        let rows: Vec<f32> = list.elements().iter().map(|e| e.label().background().position().y).collect();
        assert_eq!(rows, vec![360.0, 300.0, 240.0, 180.0]);
        assert_relative_eq!(list.elements()[0].label().background().dimensions, Vec2::new(400.0, 60.0));
        assert_eq!(list.value(), "");
        assert_eq!(list.value_index(), None);
    }

    #[test]
    fn test_click_selects_single_row() {
        let (mut ctx, style) = setup();
        let mut list = list(ctx.window_dims());
        list.set_id(ComponentId(3));
        let events = click(&mut ctx, &style, &mut list, Vec2::new(300.0, 330.0));
        assert_eq!(events, vec![(ComponentId(3), VALUE_SET_EVENT)]);
        assert_eq!(list.value(), "B");

        list.component_event(ComponentId(2), ON_EVENT);
        assert_eq!(list.value_index(), Some(2));
        assert_eq!(list.elements().iter().filter(|e| e.is_on()).count(), 1);
    }

    #[test]
    fn test_hidden_rows_ignore_clicks() {
        let (mut ctx, style) = setup();
        let mut list = list(ctx.window_dims());
        let events = click(&mut ctx, &style, &mut list, Vec2::new(300.0, 250.0));
        assert!(events.is_empty());
        assert_eq!(list.value_index(), None);
    }

    #[test]
    fn test_scroll_wheel_moves_window() {
        let (mut ctx, style) = setup();
        let mut list = list(ctx.window_dims());
        list.update(11.0, &mut ctx, &style);
        frame(&mut ctx, |input| {
            input.move_mouse(Vec2::new(300.0, 330.0));
            input.scroll_mouse(Vec2::new(0.0, -1.0));
        });
        let mut queue = EventQueue::new(&style);
        list.process_input(&mut ctx, &mut queue);
        assert_eq!(list.top_index(), 1);

        click(&mut ctx, &style, &mut list, Vec2::new(300.0, 330.0));
        assert_eq!(list.value(), "C");
        assert!(!list.set_top_index(3));
    }

    #[test]
    fn test_value_editing() {
        let mut list = list(Vec2::new(800.0, 600.0));
        list.set_value("E");
        assert_eq!(list.values(), vec!["A", "B", "C", "D", "E"]);
        assert_eq!(list.value_index(), Some(4));
        assert!(!list.set_value_index(5));

        list.add_value("Z", Some(0));
        assert_eq!(list.values()[0], "Z");
        assert_eq!(list.value(), "E");
        assert!(list.remove_value("E"));
        assert_eq!(list.value(), "");
        assert!(!list.remove_value_at(5));
    }

    #[test]
    fn test_draws_visible_rows() {
        let (mut ctx, style) = setup();
        let mut list = list(ctx.window_dims());
        ctx.graphics.begin();
        list.draw(&mut ctx, &style);
        assert_eq!(ctx.graphics.end().sprites, 1 + 2 * 2);
    }
}
