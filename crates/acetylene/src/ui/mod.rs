//! UI component tree
//!
//! Components live in a [`UIGroup`] owned by a scene. Positions and sizes
//! are exposed in window-normalized space (`[0, 1]` on both axes) and kept in
//! pixels internally. Input flows from the group into each enabled
//! component; events bubble back up through a [`UIListener`]: a component
//! reports `(component, event)` to its parent listener, which is either the
//! group (tagging the event with its group id for the scene) or a composite
//! widget such as [`Carousel`](widgets::Carousel) that turns child events into
//! its own.

pub mod group;
pub mod widgets;

pub use group::UIGroup;

use crate::context::Context;
use crate::foundation::math::{Vec2, Vec3, Vec4};
use crate::input::InputListener;
use crate::render::ShaderId;
use std::any::Any;

/// Component handle, unique within its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ComponentId(pub u32);

/// Group handle, unique within its scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GroupId(pub u32);

/// Widget-specific event code (see the `*_EVENT` constants of each widget)
pub type EventId = u32;

/// A component event tagged with the group it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UIEvent {
    /// Group of the component
    pub group: GroupId,
    /// Component that raised the event
    pub component: ComponentId,
    /// Event code
    pub event: EventId,
}

/// Shared drawing style of the children of a listener
#[derive(Debug, Clone, PartialEq)]
pub struct UIStyle {
    /// Shader (and through it, camera) used for sprites, text and hit tests
    pub shader: ShaderId,
    /// Font for every label and text field
    pub font_file_name: String,
    /// Multiplier on the font's raster size
    pub text_scale: f32,
    /// RGBA text color
    pub text_color: Vec4,
}

impl Default for UIStyle {
    /// No shader, no font, unit scale, white text
    fn default() -> Self {
        Self::new(ShaderId::default(), "", 1.0, Vec4::new(1.0, 1.0, 1.0, 1.0))
    }
}

impl UIStyle {
    /// Create a style
    pub fn new(shader: ShaderId, font_file_name: impl Into<String>, text_scale: f32, text_color: Vec4) -> Self {
        Self {
            shader,
            font_file_name: font_file_name.into(),
            text_scale,
            text_color,
        }
    }
}

/// Parent of UI components: receives their events and provides their style
pub trait UIListener {
    /// A child raised `event`
    fn component_event(&mut self, component: ComponentId, event: EventId);

    /// Style children draw with
    fn style(&self) -> &UIStyle;

    /// Change the children's shader
    fn set_shader(&mut self, shader: ShaderId);

    /// Change the children's font
    fn set_font_file_name(&mut self, font_file_name: &str);

    /// Change the children's text scale
    fn set_text_scale(&mut self, text_scale: f32);

    /// Change the children's text color
    fn set_text_color(&mut self, text_color: Vec4);
}

/// Listener that records child events under a borrowed style.
///
/// Lets a container hand its children a parent while it is itself mutably
/// borrowed; the container replays the queued events afterwards.
#[derive(Debug)]
pub struct EventQueue<'a> {
    style: &'a UIStyle,
    events: Vec<(ComponentId, EventId)>,
}

impl<'a> EventQueue<'a> {
    /// Empty queue drawing with `style`
    pub fn new(style: &'a UIStyle) -> Self {
        Self {
            style,
            events: Vec::new(),
        }
    }

    /// Recorded events, oldest first
    pub fn into_events(self) -> Vec<(ComponentId, EventId)> {
        self.events
    }
}

impl UIListener for EventQueue<'_> {
    fn component_event(&mut self, component: ComponentId, event: EventId) {
        self.events.push((component, event));
    }

    fn style(&self) -> &UIStyle {
        self.style
    }

    fn set_shader(&mut self, _shader: ShaderId) {
        log::debug!("Ignoring shader change on an event queue");
    }

    fn set_font_file_name(&mut self, _font_file_name: &str) {
        log::debug!("Ignoring font change on an event queue");
    }

    fn set_text_scale(&mut self, _text_scale: f32) {
        log::debug!("Ignoring text scale change on an event queue");
    }

    fn set_text_color(&mut self, _text_color: Vec4) {
        log::debug!("Ignoring text color change on an event queue");
    }
}

/// Identity and state flags every component carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentBase {
    /// Assigned by the parent
    pub id: ComponentId,
    /// Receives input
    pub enabled: bool,
    /// Gets drawn
    pub visible: bool,
}

impl Default for ComponentBase {
    fn default() -> Self {
        Self {
            id: ComponentId(0),
            enabled: true,
            visible: true,
        }
    }
}

/// A widget in the UI tree.
///
/// `window_dims` arguments convert between the normalized coordinates of the
/// API and the pixel values components store.
pub trait UIComponent: InputListener + Any {
    /// Identity and flags
    fn base(&self) -> &ComponentBase;

    /// Mutable identity and flags
    fn base_mut(&mut self) -> &mut ComponentBase;

    /// Id assigned by the parent
    fn id(&self) -> ComponentId {
        self.base().id
    }

    /// Set by the parent when the component is added
    fn set_id(&mut self, id: ComponentId) {
        self.base_mut().id = id;
    }

    /// Receives input
    fn is_enabled(&self) -> bool {
        self.base().enabled
    }

    /// Start or stop receiving input
    fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().enabled = enabled;
    }

    /// Gets drawn
    fn is_visible(&self) -> bool {
        self.base().visible
    }

    /// Show or hide. Hiding also disables.
    fn set_visible(&mut self, visible: bool) {
        self.base_mut().visible = visible;
        if !visible {
            self.set_enabled(false);
        }
    }

    /// Bottom-left corner, normalized; `z` is the draw depth
    fn position(&self, window_dims: Vec2) -> Vec3;

    /// Move the bottom-left corner
    fn set_position(&mut self, position: Vec3, window_dims: Vec2);

    /// Size, normalized
    fn dimensions(&self, window_dims: Vec2) -> Vec2;

    /// Resize
    fn set_dimensions(&mut self, dimensions: Vec2, window_dims: Vec2);

    /// Submit sprites and text
    fn draw(&mut self, ctx: &mut Context, style: &UIStyle);

    /// React to this frame's input, reporting events to `parent`
    fn process_input(&mut self, ctx: &mut Context, parent: &mut dyn UIListener);

    /// Advance timers and place sub-sprites
    fn update(&mut self, dt: f32, ctx: &mut Context, style: &UIStyle);

    /// Release everything and return to a blank state
    fn destroy(&mut self);

    /// Upcast for typed access
    fn as_any(&self) -> &dyn Any;

    /// Upcast for typed mutable access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Whether the mouse, seen through the camera of `style`'s shader, is inside
/// `component`'s rectangle. Edges count as inside.
pub fn mouse_over<C: UIComponent + ?Sized>(component: &C, ctx: &Context, style: &UIStyle) -> bool {
    let wd = ctx.window_dims();
    let mp = ctx.mouse_position_in(style.shader);
    let position = component.position(wd);
    let dimensions = component.dimensions(wd);
    let (x, y) = (position.x * wd.x, position.y * wd.y);
    let (w, h) = (dimensions.x * wd.x, dimensions.y * wd.y);
    if mp.x < x || mp.x > x + w {
        return false;
    }
    if mp.y < y || mp.y > y + h {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::widgets::Label;
    use super::*;
    use crate::context::tests::{context, pixel_shader};

    #[test]
    fn test_mouse_over_edges_are_inside() {
        let mut ctx = context();
        let shader = pixel_shader(&mut ctx);
        let style = UIStyle::new(shader, "font.ttf", 1.0, Vec4::new(1.0, 1.0, 1.0, 1.0));
        let label = Label::new(
            Vec3::new(0.25, 0.5, 0.0),
            Vec2::new(0.25, 0.1),
            "label.png",
            ctx.window_dims(),
        );

        ctx.input.move_mouse(Vec2::new(399.0, 359.0));
        assert!(mouse_over(&label, &ctx, &style));
        ctx.input.move_mouse(Vec2::new(401.0, 359.0));
        assert!(!mouse_over(&label, &ctx, &style));
        ctx.input.move_mouse(Vec2::new(400.0, 360.0));
        assert!(mouse_over(&label, &ctx, &style));
        ctx.input.move_mouse(Vec2::new(200.0, 300.0));
        assert!(mouse_over(&label, &ctx, &style));
        ctx.input.move_mouse(Vec2::new(199.0, 300.0));
        assert!(!mouse_over(&label, &ctx, &style));
    }

    #[test]
    fn test_hiding_disables() {
        let mut label = Label::default();
        assert!(label.is_enabled());
        label.set_visible(false);
        assert!(!label.is_enabled());
        label.set_visible(true);
        assert!(!label.is_enabled());
    }

    #[test]
    fn test_event_queue_records_in_order() {
        let style = UIStyle::new(ShaderId::default(), "font.ttf", 1.0, Vec4::zeros());
        let mut queue = EventQueue::new(&style);
        queue.component_event(ComponentId(2), 1);
        queue.component_event(ComponentId(0), 2);
        queue.set_text_scale(4.0);
        assert_eq!(queue.style().text_scale, 1.0);
        assert_eq!(queue.into_events(), vec![(ComponentId(2), 1), (ComponentId(0), 2)]);
    }
}
