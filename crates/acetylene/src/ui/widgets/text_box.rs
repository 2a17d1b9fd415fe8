//! Single-line text entry

use super::{advances, align_cursor, strip_coords, Label};
use crate::context::Context;
use crate::foundation::math::{Vec2, Vec3};
use crate::input::{InputListener, KeyCode, MouseButton};
use crate::render::{Alignment, Sprite, TextSubmission};
use crate::ui::{mouse_over, ComponentBase, EventId, UIComponent, UIListener, UIStyle};
use std::any::Any;
use std::borrow::Cow;

/// Clicked outside the box while it had focus
pub const UNSELECTED_EVENT: EventId = 0;
/// Clicked into the box
pub const SELECTED_EVENT: EventId = 1;
/// Enter pressed while focused
pub const TEXT_ENTERED_EVENT: EventId = 2;

/// Frames a held editing key waits before repeating
pub(crate) const KEY_REPEAT_DELAY: f32 = 10.0;
/// Repeat timer wraps here
pub(crate) const TIMER_WRAP: f32 = 60.0;

/// Byte offset of character `index` in `text`, or its length past the end
pub(crate) fn byte_index(text: &str, index: usize) -> usize {
    text.char_indices().nth(index).map_or(text.len(), |(i, _)| i)
}

/// A box that takes keyboard text while focused.
///
/// Clicking places a cursor between characters; left/right move it,
/// backspace/delete remove around it, and held keys repeat. Text wider than
/// the box scrolls horizontally to keep the cursor in view. The background
/// texture holds the unfocused frame in its left half and the focused frame
/// in its right half.
#[derive(Debug, Clone, Default)]
pub struct TextBox {
    pub(super) label: Label,
    selected: bool,
    pub(super) text: String,
    pub(super) text_x: f32,
    pub(super) cursor: Sprite,
    pub(super) cursor_alignment: Alignment,
    pub(super) cursor_position: usize,
    pub(super) timer: f32,
    max_characters: Option<usize>,
    allowed_characters: String,
    vertical_alignment: Alignment,
    mask: Option<char>,
}

impl TextBox {
    /// Empty, unlimited box over `label`'s background.
    ///
    /// `cursor_dimensions.x` is a width in pixels and `cursor_dimensions.y` a
    /// fraction of the window height.
    pub fn new(label: Label, cursor_dimensions: Vec2, cursor_texture_file_name: &str, window_dims: Vec2) -> Self {
        let text_x = label.rect().x;
        let mut text_box = Self {
            label,
            text_x,
            cursor: Sprite::new(
                Vec3::zeros(),
                Vec2::new(cursor_dimensions.x, cursor_dimensions.y * window_dims.y),
                cursor_texture_file_name,
            ),
            ..Self::default()
        };
        text_box.set_selected(false);
        text_box
    }

    /// Start with `text`
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Limit the length; `None` or `Some(0)` is unlimited
    pub fn with_max_characters(mut self, max_characters: Option<usize>) -> Self {
        self.set_max_characters(max_characters);
        self
    }

    /// Only accept these characters; empty accepts everything
    pub fn with_allowed_characters(mut self, allowed_characters: impl Into<String>) -> Self {
        self.allowed_characters = allowed_characters.into();
        self
    }

    /// Vertical placement of the cursor and of the text
    pub fn with_alignment(mut self, cursor: Alignment, text: Alignment) -> Self {
        self.cursor_alignment = cursor;
        self.vertical_alignment = text;
        self
    }

    /// Draw every character as `mask`
    pub(crate) fn with_mask(mut self, mask: char) -> Self {
        self.mask = Some(mask);
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

    /// Has keyboard focus
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Take or drop focus and switch frames
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.label.background_mut().texture.coords = strip_coords(u32::from(selected), 2);
    }

    /// Entered text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and put the cursor at the start. Text longer than the
    /// limit is ignored.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.max_characters.is_some_and(|max| text.chars().count() > max) {
            log::debug!("Rejecting text over the {:?} character limit", self.max_characters);
            return;
        }
        self.text_x = self.label.rect().x;
        self.cursor_position = 0;
        self.text = text;
    }

    /// Cursor sprite, placed by [`update`](UIComponent::update)
    pub fn cursor(&self) -> &Sprite {
        &self.cursor
    }

    /// Vertical placement of the cursor
    pub fn cursor_alignment(&self) -> Alignment {
        self.cursor_alignment
    }

    /// Change the cursor's vertical placement
    pub fn set_cursor_alignment(&mut self, alignment: Alignment) {
        self.cursor_alignment = alignment;
    }

    /// Characters before the cursor
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Move the cursor; false if past the end of the text
    pub fn set_cursor_position(&mut self, position: usize) -> bool {
        if position > self.text.chars().count() {
            return false;
        }
        self.cursor_position = position;
        true
    }

    /// Length limit, `None` if unlimited
    pub fn max_characters(&self) -> Option<usize> {
        self.max_characters
    }

    /// Change the length limit; a limit of zero means no limit
    pub fn set_max_characters(&mut self, max_characters: Option<usize>) {
        self.max_characters = max_characters.filter(|&max| max > 0);
    }

    /// Accepted characters; empty accepts everything
    pub fn allowed_characters(&self) -> &str {
        &self.allowed_characters
    }

    /// Change the accepted characters
    pub fn set_allowed_characters(&mut self, allowed_characters: impl Into<String>) {
        self.allowed_characters = allowed_characters.into();
    }

    /// Vertical placement of the text
    pub fn vertical_alignment(&self) -> Alignment {
        self.vertical_alignment
    }

    /// Change the text's vertical placement
    pub fn set_vertical_alignment(&mut self, alignment: Alignment) {
        self.vertical_alignment = alignment;
    }

    /// Left edge of the text in pixels; moves as the text scrolls
    pub fn text_position(&self) -> f32 {
        self.text_x
    }

    /// Overwrite the text's buffer before clearing it
    pub(crate) fn scrub(&mut self) {
        let len = self.text.len();
        self.text.clear();
        self.text.extend(std::iter::repeat('0').take(len));
        self.text.clear();
        self.cursor_position = 0;
    }

    fn displayed(&self) -> Cow<'_, str> {
        match self.mask {
            Some(mask) => Cow::Owned(std::iter::repeat(mask).take(self.text.chars().count()).collect()),
            None => Cow::Borrowed(&self.text),
        }
    }

    pub(super) fn repeats(&self, ctx: &Context, key: KeyCode) -> bool {
        ctx.input.is_key_pressed(key) || (ctx.input.is_key_down(key) && self.timer > KEY_REPEAT_DELAY)
    }

    fn place_cursor_at_mouse(&mut self, ctx: &mut Context, style: &UIStyle) {
        let mp = ctx.mouse_position_in(style.shader);
        let displayed = self.displayed().into_owned();
        let mut x = self.text_x;
        for (i, advance) in advances(ctx, style, &displayed).into_iter().enumerate() {
            if x + advance / 2.0 >= mp.x {
                self.cursor_position = i;
                return;
            }
            x += advance;
        }
        self.cursor_position = displayed.chars().count();
    }
}

impl InputListener for TextBox {
    fn char_typed(&mut self, c: char) {
        if !self.selected {
            return;
        }
        if let Some(max) = self.max_characters {
            if self.text.chars().count() >= max {
                self.text.truncate(byte_index(&self.text, max));
                return;
            }
        }
        if !self.allowed_characters.is_empty() && !self.allowed_characters.contains(c) {
            return;
        }
        self.text.insert(byte_index(&self.text, self.cursor_position), c);
        self.cursor_position += 1;
    }
}

impl UIComponent for TextBox {
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
        self.text_x = self.label.rect().x;
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
        let rect = self.label.rect();
        let z = self.label.background().position().z;
        {
            let displayed = self.displayed();
            ctx.graphics.submit_text(
                &TextSubmission {
                    text: &displayed,
                    position: Vec3::new(self.text_x, rect.y, z + 0.1),
                    bounds: rect,
                    scale: style.text_scale,
                    color: style.text_color,
                    font_file: &style.font_file_name,
                    h_align: Alignment::None,
                    v_align: self.vertical_alignment,
                },
                style.shader,
            );
        }
        if self.selected {
            ctx.graphics.submit(&mut self.cursor, style.shader);
        }
    }

    fn process_input(&mut self, ctx: &mut Context, parent: &mut dyn UIListener) {
        let id = self.id();
        if ctx.input.is_mouse_button_down(MouseButton::Left) {
            if mouse_over(self, ctx, parent.style()) {
                if !self.selected {
                    self.set_selected(true);
                    parent.component_event(id, SELECTED_EVENT);
                }
                self.place_cursor_at_mouse(ctx, parent.style());
            } else if self.selected && ctx.input.is_mouse_button_pressed(MouseButton::Left) {
                self.set_selected(false);
                parent.component_event(id, UNSELECTED_EVENT);
            }
        }
        if !self.selected {
            return;
        }
        if ctx.input.is_key_pressed(KeyCode::Enter) {
            parent.component_event(id, TEXT_ENTERED_EVENT);
        }
        let len = self.text.chars().count();
        if self.cursor_position > 0 && self.repeats(ctx, KeyCode::Left) {
            self.cursor_position -= 1;
            self.timer = 0.0;
        }
        if self.cursor_position < len && self.repeats(ctx, KeyCode::Right) {
            self.cursor_position += 1;
            self.timer = 0.0;
        }
        if self.cursor_position > 0 && self.repeats(ctx, KeyCode::Backspace) {
            self.cursor_position -= 1;
            self.text.remove(byte_index(&self.text, self.cursor_position));
            self.timer = 0.0;
        }
        if self.cursor_position < self.text.chars().count() && self.repeats(ctx, KeyCode::Delete) {
            self.text.remove(byte_index(&self.text, self.cursor_position));
            self.timer = 0.0;
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut Context, style: &UIStyle) {
        let rect = self.label.rect();
        let z = self.label.background().position().z;
        let displayed = self.displayed().into_owned();
        let offset: f32 = advances(ctx, style, &displayed)
            .into_iter()
            .take(self.cursor_position)
            .sum();
        let cursor = self.cursor.dimensions;
        let x = self.text_x + offset;
        self.cursor.entity.position = Vec3::new(
            x,
            align_cursor(self.cursor_alignment, rect.y, rect.w, cursor.y),
            z + 0.2,
        );

        if x < rect.x {
            self.text_x = (self.text_x + rect.z / 5.0).min(rect.x);
        } else if x + cursor.x > rect.x + rect.z {
            self.text_x -= rect.z / 5.0;
        }

        self.timer += dt;
        if self.timer > TIMER_WRAP {
            self.timer = 0.0;
        }
    }

    fn destroy(&mut self) {
        let mask = self.mask;
        self.label.clear();
        *self = Self {
            label: std::mem::take(&mut self.label),
            mask,
            ..Self::default()
        };
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
