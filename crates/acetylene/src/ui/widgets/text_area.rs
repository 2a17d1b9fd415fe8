//! Multi-line text entry

use super::text_box::{byte_index, TextBox, KEY_REPEAT_DELAY, TIMER_WRAP};
use super::{advances, Label};
use crate::context::Context;
use crate::foundation::math::{Vec2, Vec3, Vec4};
use crate::input::{InputListener, KeyCode, MouseButton};
use crate::render::{Alignment, TextSubmission};
use crate::ui::{mouse_over, ComponentBase, UIComponent, UIListener, UIStyle};
use std::any::Any;

pub use super::text_box::{SELECTED_EVENT, UNSELECTED_EVENT};

/// A text box showing `line_count` lines of newline-separated text.
///
/// Enter inserts a line break instead of raising an event. Up and down move
/// between lines, the scroll wheel scrolls, and ctrl+V pastes the window's
/// clipboard. Editing scrolls both ways to keep the cursor visible.
#[derive(Debug, Clone, Default)]
pub struct TextArea {
    text_box: TextBox,
    line_count: usize,
    top_line: usize,
    view_dirty: bool,
}

impl TextArea {
    /// Empty area over `label`'s background; cursor dimensions as for
    /// [`TextBox::new`]
    pub fn new(
        label: Label,
        line_count: usize,
        cursor_dimensions: Vec2,
        cursor_texture_file_name: &str,
        cursor_alignment: Alignment,
        window_dims: Vec2,
    ) -> Self {
        Self {
            text_box: TextBox::new(label, cursor_dimensions, cursor_texture_file_name, window_dims)
                .with_alignment(cursor_alignment, Alignment::Center),
            line_count: line_count.max(1),
            top_line: 0,
            view_dirty: false,
        }
    }

    /// Start with `text`
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Limit the length; `None` is unlimited
    pub fn with_max_characters(mut self, max_characters: Option<usize>) -> Self {
        self.text_box.set_max_characters(max_characters);
        self
    }

    /// Only accept these characters; empty accepts everything
    pub fn with_allowed_characters(mut self, allowed_characters: impl Into<String>) -> Self {
        self.text_box.set_allowed_characters(allowed_characters);
        self
    }

    /// Underlying text field
    pub fn text_box(&self) -> &TextBox {
        &self.text_box
    }

    /// Mutable underlying text field
    pub fn text_box_mut(&mut self) -> &mut TextBox {
        &mut self.text_box
    }

    /// Entered text
    pub fn text(&self) -> &str {
        self.text_box.text()
    }

    /// Replace the text and scroll back to the first line
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text_box.set_text(text);
        self.top_line = 0;
    }

    /// Visible lines
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// First visible content line
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Scroll so `top_line` is the first visible line. Fails when that would
    /// leave fewer than `line_count` lines below it, except at line 0.
    pub fn set_top_line(&mut self, top_line: usize) -> bool {
        let content = self.content_lines().len();
        if content <= self.line_count {
            if top_line > 0 {
                return false;
            }
        } else if top_line > content - self.line_count {
            return false;
        }
        self.top_line = top_line;
        true
    }

    /// Text split at line breaks; a trailing break adds no empty line
    pub fn content_lines(&self) -> Vec<&str> {
        let text = self.text_box.text();
        if text.is_empty() {
            return Vec::new();
        }
        let mut lines: Vec<&str> = text.split('\n').collect();
        if lines.last() == Some(&"") {
            lines.pop();
        }
        lines
    }

    fn line_height(&self) -> f32 {
        self.text_box.label.rect().w / self.line_count as f32
    }

    /// Cursor index at the start of content line `line`
    fn line_start(lines: &[String], line: usize) -> usize {
        lines.iter().take(line).map(|l| l.chars().count() + 1).sum()
    }

    /// Characters of `line` left of pixel `x`, splitting glyphs at half width
    fn column_at(&self, ctx: &mut Context, style: &UIStyle, line: &str, x: f32) -> usize {
        let mut pen = self.text_box.text_x;
        let mut column = 0;
        for advance in advances(ctx, style, line) {
            if pen + advance / 2.0 > x {
                break;
            }
            column += 1;
            pen += advance;
        }
        column
    }

    fn cursor_line(&self) -> usize {
        self.text_box
            .text
            .chars()
            .take(self.text_box.cursor_position)
            .filter(|&c| c == '\n')
            .count()
    }

    fn place_cursor(&mut self, ctx: &mut Context, style: &UIStyle) {
        let rect = self.text_box.label.rect();
        let z = self.text_box.label.background().position().z;
        let lh = self.line_height();
        let before: String = self
            .text_box
            .text
            .chars()
            .take(self.text_box.cursor_position)
            .collect();
        let breaks = before.matches('\n').count();
        let last = before.rsplit('\n').next().unwrap_or_default();
        let x = self.text_box.text_x + advances(ctx, style, last).into_iter().sum::<f32>();
        let mut y = rect.y + rect.w + (self.top_line as f32 - 1.0) * lh - breaks as f32 * lh;
        let height = self.text_box.cursor.dimensions.y;
        match self.text_box.cursor_alignment {
            Alignment::Center => y += (lh - height) / 2.0,
            Alignment::Top => y += lh - height,
            _ => {}
        }
        self.text_box.cursor.entity.position = Vec3::new(x, y, z + 0.2);
    }

    /// Scroll horizontally and vertically until the cursor is inside the box.
    /// Every nudge must shrink the cursor's distance outside the box; when
    /// none does, the cursor stays where it is.
    fn put_cursor_in_view(&mut self, ctx: &mut Context, style: &UIStyle) {
        self.view_dirty = false;
        self.place_cursor(ctx, style);
        let rect = self.text_box.label.rect();
        let cursor = self.text_box.cursor.dimensions;
        let (left, right) = (rect.x, rect.x + rect.z);
        let (bottom, top) = (rect.y, rect.y + rect.w);
        let outside_x = |x: f32| (left - x).max(0.0) + (x + cursor.x - right).max(0.0);
        let outside_y = |y: f32| (bottom - y).max(0.0) + (y + cursor.y - top).max(0.0);

        let step = rect.z / 5.0;
        let mut p = self.text_box.cursor.position();
        while step > 0.0 {
            let distance = outside_x(p.x);
            if distance <= 0.0 {
                break;
            }
            let shift = if p.x < left {
                step.min(left - p.x).min(rect.x - self.text_box.text_x)
            } else {
                -step.min(p.x + cursor.x - right)
            };
            if shift == 0.0 || outside_x(p.x + shift) >= distance {
                break;
            }
            self.text_box.text_x += shift;
            p.x += shift;
        }

        let lh = self.line_height();
        loop {
            let distance = outside_y(p.y);
            if distance <= 0.0 {
                break;
            }
            let (line, shift) = if p.y < bottom {
                (Some(self.top_line + 1), lh)
            } else {
                (self.top_line.checked_sub(1), -lh)
            };
            let Some(line) = line else {
                break;
            };
            if outside_y(p.y + shift) >= distance || !self.set_top_line(line) {
                break;
            }
            p.y += shift;
        }
        self.place_cursor(ctx, style);
    }

    fn click(&mut self, ctx: &mut Context, style: &UIStyle) {
        let mp = ctx.mouse_position_in(style.shader);
        let lines: Vec<String> = self.content_lines().into_iter().map(String::from).collect();
        self.text_box.cursor_position = 0;
        if lines.is_empty() {
            return;
        }
        let rect = self.text_box.label.rect();
        let lh = self.line_height();
        let scrolled = lh * self.top_line as f32;
        let mut y = rect.y + rect.w - lh;
        let mut line = lines.len() - 1;
        for l in 0..lines.len() {
            if y <= mp.y - scrolled {
                line = l;
                break;
            }
            y -= lh;
        }
        let column = self.column_at(ctx, style, &lines[line], mp.x);
        let len = self.text_box.text.chars().count();
        self.text_box.cursor_position = (Self::line_start(&lines, line) + column).min(len);
    }

    /// Move the cursor to the line above (`up`) or below, keeping its
    /// horizontal position as near as the line allows
    fn change_line(&mut self, ctx: &mut Context, style: &UIStyle, up: bool) {
        let lines: Vec<String> = self.content_lines().into_iter().map(String::from).collect();
        let current = self.cursor_line();
        let target = if up {
            current.checked_sub(1)
        } else {
            Some(current + 1).filter(|&l| l < lines.len())
        };
        let Some(target) = target else {
            return;
        };
        let x = self.text_box.cursor.position().x;
        let column = self.column_at(ctx, style, &lines[target], x);
        self.text_box.cursor_position = Self::line_start(&lines, target) + column;
    }
}

impl InputListener for TextArea {
    fn char_typed(&mut self, c: char) {
        self.text_box.char_typed(c);
        self.view_dirty = true;
    }
}

impl UIComponent for TextArea {
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
        self.top_line = 0;
    }

    fn dimensions(&self, window_dims: Vec2) -> Vec2 {
        self.text_box.dimensions(window_dims)
    }

    fn set_dimensions(&mut self, dimensions: Vec2, window_dims: Vec2) {
        self.text_box.set_dimensions(dimensions, window_dims);
    }

    fn draw(&mut self, ctx: &mut Context, style: &UIStyle) {
        self.text_box.label.draw_label(ctx, style);
        let rect = self.text_box.label.rect();
        let z = self.text_box.label.background().position().z;
        let lh = self.line_height();
        let text_x = self.text_box.text_x;
        for (i, line) in self
            .content_lines()
            .into_iter()
            .skip(self.top_line)
            .take(self.line_count)
            .enumerate()
        {
            let y = rect.y + rect.w - lh * (i + 1) as f32;
            ctx.graphics.submit_text(
                &TextSubmission {
                    text: line,
                    position: Vec3::new(text_x, y, z + 0.1),
                    bounds: Vec4::new(rect.x, y, rect.z, lh),
                    scale: style.text_scale,
                    color: style.text_color,
                    font_file: &style.font_file_name,
                    h_align: Alignment::None,
                    v_align: Alignment::Center,
                },
                style.shader,
            );
        }
        let tb = &mut self.text_box;
        if tb.is_selected() && tb.cursor.intersects(tb.label.background()) {
            ctx.graphics.submit(&mut tb.cursor, style.shader);
        }
    }

    fn process_input(&mut self, ctx: &mut Context, parent: &mut dyn UIListener) {
        let id = self.id();
        let style = parent.style().clone();
        if ctx.input.is_mouse_button_down(MouseButton::Left) {
            if mouse_over(self, ctx, &style) {
                if !self.text_box.is_selected() {
                    self.text_box.set_selected(true);
                    parent.component_event(id, SELECTED_EVENT);
                }
                self.click(ctx, &style);
                self.place_cursor(ctx, &style);
            } else if self.text_box.is_selected() && ctx.input.is_mouse_button_pressed(MouseButton::Left) {
                self.text_box.set_selected(false);
                parent.component_event(id, UNSELECTED_EVENT);
            }
        }

        if self.text_box.is_selected() {
            if ctx.input.is_key_pressed(KeyCode::Enter) {
                self.char_typed('\n');
            }
            let len = self.text_box.text.chars().count();
            if self.text_box.cursor_position > 0 && self.text_box.repeats(ctx, KeyCode::Left) {
                self.text_box.cursor_position -= 1;
                self.text_box.timer = 0.0;
                self.view_dirty = true;
            }
            if self.text_box.cursor_position < len && self.text_box.repeats(ctx, KeyCode::Right) {
                self.text_box.cursor_position += 1;
                self.text_box.timer = 0.0;
                self.view_dirty = true;
            }
            for (key, up) in [(KeyCode::Up, true), (KeyCode::Down, false)] {
                if self.text_box.repeats(ctx, key) {
                    self.place_cursor(ctx, &style);
                    self.change_line(ctx, &style, up);
                    self.text_box.timer = 0.0;
                    self.view_dirty = true;
                }
            }
            if self.text_box.cursor_position > 0 && self.text_box.repeats(ctx, KeyCode::Backspace) {
                self.text_box.cursor_position -= 1;
                let at = byte_index(&self.text_box.text, self.text_box.cursor_position);
                self.text_box.text.remove(at);
                self.text_box.timer = 0.0;
                self.view_dirty = true;
            }
            if self.text_box.cursor_position < self.text_box.text.chars().count()
                && self.text_box.repeats(ctx, KeyCode::Delete)
            {
                let at = byte_index(&self.text_box.text, self.text_box.cursor_position);
                self.text_box.text.remove(at);
                self.text_box.timer = 0.0;
                self.view_dirty = true;
            }
            if ctx.input.is_key_pressed(KeyCode::V) && ctx.input.is_key_down(KeyCode::LeftControl) {
                if let Some(paste) = ctx.window.clipboard() {
                    for c in paste.chars() {
                        self.char_typed(c);
                    }
                }
            }
        }

        if mouse_over(self, ctx, &style) {
            let scroll = ctx.input.mouse_scroll().y;
            if scroll != 0.0 && self.text_box.timer > KEY_REPEAT_DELAY {
                if scroll < 0.0 {
                    self.set_top_line(self.top_line + 1);
                } else if self.top_line > 0 {
                    self.set_top_line(self.top_line - 1);
                }
                self.text_box.timer = 0.0;
            }
        }

        if self.view_dirty {
            self.put_cursor_in_view(ctx, &style);
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut Context, style: &UIStyle) {
        if self.view_dirty {
            self.put_cursor_in_view(ctx, style);
        } else {
            self.place_cursor(ctx, style);
        }
        self.text_box.timer += dt;
        if self.text_box.timer > TIMER_WRAP {
            self.text_box.timer = 0.0;
        }
    }

    fn destroy(&mut self) {
        self.text_box.destroy();
        self.line_count = 1;
        self.top_line = 0;
        self.view_dirty = false;
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
    use crate::config::WindowConfig;
    use crate::context::tests::{context_with, pixel_shader};
    use crate::ui::widgets::tests::{frame, setup};
    use crate::ui::EventQueue;
    use crate::window::HeadlessWindow;
    use approx::assert_relative_eq;

    fn area(window_dims: Vec2) -> TextArea {
        let label = Label::new(Vec3::new(0.25, 0.5, 0.0), Vec2::new(0.5, 0.1), "area.png", window_dims);
        TextArea::new(label, 3, Vec2::new(2.0, 0.02), "cursor.png", Alignment::Bottom, window_dims)
    }

    fn select(ctx: &mut Context, style: &UIStyle, area: &mut TextArea) {
        frame(ctx, |input| {
            input.move_mouse(Vec2::new(599.0, 301.0));
            input.press_mouse_button(MouseButton::Left);
        });
        let mut queue = EventQueue::new(style);
        area.process_input(ctx, &mut queue);
        frame(ctx, |input| input.release_mouse_button(MouseButton::Left));
        area.process_input(ctx, &mut queue);
    }

    #[test]
    fn test_content_lines() {
        let dims = Vec2::new(800.0, 600.0);
        let mut area = area(dims);
        assert!(area.content_lines().is_empty());
        area.set_text("a\n\nb\n");
        assert_eq!(area.content_lines(), vec!["a", "", "b"]);
        area.set_text("\n");
        assert_eq!(area.content_lines(), vec![""]);
    }

    #[test]
    fn test_set_top_line_bounds() {
        let dims = Vec2::new(800.0, 600.0);
        let mut area = area(dims).with_text("1\n2\n3");
        assert!(!area.set_top_line(1));
        assert!(area.set_top_line(0));

        area.set_text("1\n2\n3\n4\n5");
        assert!(area.set_top_line(2));
        assert!(!area.set_top_line(3));
        assert_eq!(area.top_line(), 2);

        area.set_text("1\n2\n3\n4\n5");
        assert_eq!(area.top_line(), 0);
    }

    #[test]
    fn test_enter_breaks_lines() {
        let (mut ctx, style) = setup();
        let mut area = area(ctx.window_dims());
        select(&mut ctx, &style, &mut area);
        assert!(area.text_box().is_selected());

        area.char_typed('a');
        frame(&mut ctx, |input| input.press_key(KeyCode::Enter));
        let mut queue = EventQueue::new(&style);
        area.process_input(&mut ctx, &mut queue);
        assert!(queue.into_events().is_empty());
        area.char_typed('b');
        assert_eq!(area.text(), "a\nb");
        assert_eq!(area.text_box().cursor_position(), 3);
    }

    #[test]
    fn test_cursor_placement() {
        let (mut ctx, style) = setup();
        let mut area = area(ctx.window_dims()).with_text("ab\ncd");
        assert!(area.text_box_mut().set_cursor_position(5));
        area.update(1.0, &mut ctx, &style);
        assert_relative_eq!(area.text_box().cursor().position(), Vec3::new(223.0, 320.0, 0.2), epsilon = 1e-4);
    }

    #[test]
    fn test_click_picks_line_and_column() {
        let (mut ctx, style) = setup();
        let mut area = area(ctx.window_dims()).with_text("ab\ncd\nef");
        frame(&mut ctx, |input| {
            input.move_mouse(Vec2::new(215.0, 325.0));
            input.press_mouse_button(MouseButton::Left);
        });
        let mut queue = EventQueue::new(&style);
        area.process_input(&mut ctx, &mut queue);
        assert_eq!(area.text_box().cursor_position(), 4);
    }

    #[test]
    fn test_up_and_down_change_line() {
        let (mut ctx, style) = setup();
        let mut area = area(ctx.window_dims()).with_text("abc\nde\nfgh");
        select(&mut ctx, &style, &mut area);
        assert!(area.text_box_mut().set_cursor_position(2));

        let mut queue = EventQueue::new(&style);
        frame(&mut ctx, |input| input.press_key(KeyCode::Down));
        area.process_input(&mut ctx, &mut queue);
        assert_eq!(area.text_box().cursor_position(), 6);

        frame(&mut ctx, |input| {
            input.release_key(KeyCode::Down);
            input.press_key(KeyCode::Up);
        });
        area.process_input(&mut ctx, &mut queue);
        assert_eq!(area.text_box().cursor_position(), 2);
    }

    #[test]
    fn test_typing_past_the_bottom_scrolls() {
        let (mut ctx, style) = setup();
        let mut area = area(ctx.window_dims());
        select(&mut ctx, &style, &mut area);
        for c in "1\n2\n3\n4\n5".chars() {
            area.char_typed(c);
        }
        area.update(0.0, &mut ctx, &style);
        assert_eq!(area.top_line(), 2);
        let cursor = area.text_box().cursor().position();
        assert!(cursor.y >= 300.0 && cursor.y < 360.0);
    }

    #[test]
    fn test_typing_past_the_right_edge_scrolls() {
        let (mut ctx, style) = setup();
        let mut area = area(ctx.window_dims());
        select(&mut ctx, &style, &mut area);
        for _ in 0..40 {
            area.char_typed('a');
        }
        area.update(0.0, &mut ctx, &style);
        assert!(area.text_box().text_position() < 200.0);
        let cursor = area.text_box().cursor();
        assert!(cursor.position().x >= 200.0);
        assert!(cursor.position().x + cursor.dimensions.x <= 600.0);

        area.text_box_mut().set_cursor_position(0);
        area.view_dirty = true;
        area.update(0.0, &mut ctx, &style);
        assert_relative_eq!(area.text_box().text_position(), 200.0);
        assert_relative_eq!(area.text_box().cursor().position().x, 200.0);
    }

    #[test]
    fn test_cursor_wider_than_a_scroll_step_settles() {
        let (mut ctx, style) = setup();
        let label = Label::new(Vec3::new(0.25, 0.5, 0.0), Vec2::new(0.5, 0.1), "area.png", ctx.window_dims());
        let mut area = TextArea::new(
            label,
            3,
            Vec2::new(350.0, 0.02),
            "cursor.png",
            Alignment::Bottom,
            ctx.window_dims(),
        )
        .with_text("aaaaa");
        assert!(area.text_box_mut().set_cursor_position(5));
        area.view_dirty = true;
        area.update(0.0, &mut ctx, &style);
        assert_relative_eq!(area.text_box().text_position(), 191.0);
        assert_relative_eq!(area.text_box().cursor().position().x, 250.0);
    }

    #[test]
    fn test_cursor_taller_than_the_line_gap_settles() {
        let (mut ctx, style) = setup();
        let dims = ctx.window_dims();
        let label = Label::new(Vec3::new(0.25, 0.5, 0.0), Vec2::new(0.5, 0.1), "area.png", dims);
        let mut area = TextArea::new(label, 2, Vec2::new(2.0, 55.0 / dims.y), "cursor.png", Alignment::Center, dims)
            .with_text("1\n2\n3\n4\n5\n6");
        assert!(area.text_box_mut().set_cursor_position(7));
        area.view_dirty = true;
        area.update(0.0, &mut ctx, &style);
        // The cursor pokes 2.5 px over the top at line 3 and further out anywhere else
        assert_eq!(area.top_line(), 3);
        assert_relative_eq!(area.text_box().cursor().position().y, 307.5, epsilon = 1e-3);

        area.view_dirty = true;
        area.update(0.0, &mut ctx, &style);
        assert_eq!(area.top_line(), 3);
    }

    #[test]
    fn test_scroll_wheel() {
        let (mut ctx, style) = setup();
        let mut area = area(ctx.window_dims()).with_text("1\n2\n3\n4\n5");
        area.update(11.0, &mut ctx, &style);
        frame(&mut ctx, |input| {
            input.move_mouse(Vec2::new(300.0, 330.0));
            input.scroll_mouse(Vec2::new(0.0, -1.0));
        });
        let mut queue = EventQueue::new(&style);
        area.process_input(&mut ctx, &mut queue);
        assert_eq!(area.top_line(), 1);
    }

    #[test]
    fn test_ctrl_v_pastes_clipboard() {
        let mut window = HeadlessWindow::new(&WindowConfig::default());
        window.set_clipboard("xy");
        let mut ctx = context_with(window);
        let shader = pixel_shader(&mut ctx);
        let style = UIStyle::new(shader, "mono.ttf", 1.0, Vec4::new(1.0, 1.0, 1.0, 1.0));
        let mut area = area(ctx.window_dims());
        select(&mut ctx, &style, &mut area);

        frame(&mut ctx, |input| {
            input.press_key(KeyCode::LeftControl);
            input.press_key(KeyCode::V);
        });
        let mut queue = EventQueue::new(&style);
        area.process_input(&mut ctx, &mut queue);
        assert_eq!(area.text(), "xy");
    }
}
