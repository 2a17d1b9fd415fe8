//! A scene's collection of UI components sharing one style

use super::{ComponentId, EventId, EventQueue, GroupId, UIComponent, UIEvent, UIListener, UIStyle};
use crate::context::Context;
use crate::foundation::math::{Vec2, Vec4};
use crate::render::ShaderId;

/// Owns components, hands them this frame's input and collects their events.
///
/// Components get ids `0, 1, 2, ...` in the order they are added. Disabling
/// the group stops all input handling; hiding it stops drawing. When the
/// window is resized every component keeps its pixel size relative to the
/// window, so the layout scales with it.
pub struct UIGroup {
    id: GroupId,
    style: UIStyle,
    components: Vec<Box<dyn UIComponent>>,
    next_id: u32,
    enabled: bool,
    visible: bool,
    prev_window_dims: Vec2,
    events: Vec<UIEvent>,
}

impl UIGroup {
    /// Empty group drawing with `style`
    pub fn new(id: GroupId, style: UIStyle, window_dims: Vec2) -> Self {
        log::info!("Initialized UI group {}", id.0);
        Self {
            id,
            style,
            components: Vec::new(),
            next_id: 0,
            enabled: true,
            visible: true,
            prev_window_dims: window_dims,
            events: Vec::new(),
        }
    }

    /// Group id, reported with every event
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Take ownership of `component` and assign its id
    pub fn add_component<C: UIComponent>(&mut self, mut component: C) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;
        component.set_id(id);
        self.components.push(Box::new(component));
        log::debug!("Added UI component {} to group {}", id.0, self.id.0);
        id
    }

    /// Detach a component, handing it back
    pub fn remove_component(&mut self, id: ComponentId) -> Option<Box<dyn UIComponent>> {
        let Some(index) = self.components.iter().position(|c| c.id() == id) else {
            log::warn!("UI component {} not present in group {}", id.0, self.id.0);
            return None;
        };
        log::debug!("Removed UI component {} from group {}", id.0, self.id.0);
        Some(self.components.remove(index))
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Group has no components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Component `id` as a `T`, if it exists and has that type
    pub fn component<T: UIComponent>(&self, id: ComponentId) -> Option<&T> {
        self.components
            .iter()
            .find(|c| c.id() == id)
            .and_then(|c| c.as_any().downcast_ref())
    }

    /// Mutable component `id` as a `T`
    pub fn component_mut<T: UIComponent>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find(|c| c.id() == id)
            .and_then(|c| c.as_any_mut().downcast_mut())
    }

    /// Handles input
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start or stop handling input
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Gets drawn
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Draw visible components
    pub fn draw(&mut self, ctx: &mut Context) {
        if !self.visible {
            return;
        }
        for component in self.components.iter_mut().filter(|c| c.is_visible()) {
            component.draw(ctx, &self.style);
        }
    }

    /// Deliver this frame's input events to every component, let enabled
    /// components react, and return the events they raised
    pub fn process_input(&mut self, ctx: &mut Context) -> Vec<UIEvent> {
        if self.enabled {
            let frame_events = ctx.frame_events().to_vec();
            for component in &mut self.components {
                for event in &frame_events {
                    component.on_input_event(event);
                }
            }
            let mut queue = EventQueue::new(&self.style);
            for component in self.components.iter_mut().filter(|c| c.is_enabled()) {
                component.process_input(ctx, &mut queue);
            }
            let group = self.id;
            self.events
                .extend(queue.into_events().into_iter().map(|(component, event)| UIEvent {
                    group,
                    component,
                    event,
                }));
        }
        std::mem::take(&mut self.events)
    }

    /// Update every component, then rescale them if the window was resized
    pub fn update(&mut self, dt: f32, ctx: &mut Context) {
        for component in &mut self.components {
            component.update(dt, ctx, &self.style);
        }
        let window_dims = ctx.window_dims();
        if window_dims == self.prev_window_dims {
            return;
        }
        let prev = self.prev_window_dims;
        log::debug!(
            "Rescaling UI group {} from {}x{} to {}x{}",
            self.id.0,
            prev.x,
            prev.y,
            window_dims.x,
            window_dims.y
        );
        for component in &mut self.components {
            let dimensions = component.dimensions(prev);
            component.set_dimensions(dimensions, window_dims);
            let position = component.position(prev);
            component.set_position(position, window_dims);
        }
        self.prev_window_dims = window_dims;
    }

    /// Destroy and drop every component
    pub fn destroy(&mut self) {
        log::info!("Destroying UI group {}", self.id.0);
        for component in &mut self.components {
            component.destroy();
        }
        self.components.clear();
        self.next_id = 0;
        self.events.clear();
        self.enabled = true;
        self.visible = true;
    }
}

impl UIListener for UIGroup {
    fn component_event(&mut self, component: ComponentId, event: EventId) {
        self.events.push(UIEvent {
            group: self.id,
            component,
            event,
        });
    }

    fn style(&self) -> &UIStyle {
        &self.style
    }

    fn set_shader(&mut self, shader: ShaderId) {
        self.style.shader = shader;
    }

    fn set_font_file_name(&mut self, font_file_name: &str) {
        self.style.font_file_name = font_file_name.to_owned();
    }

    fn set_text_scale(&mut self, text_scale: f32) {
        self.style.text_scale = text_scale;
    }

    fn set_text_color(&mut self, text_color: Vec4) {
        self.style.text_color = text_color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{IVec2, Vec3};
    use crate::input::MouseButton;
    use crate::ui::widgets::button::CLICKED_EVENT;
    use crate::ui::widgets::tests::{frame, setup};
    use crate::ui::widgets::{Button, Label, TextBox};
    use approx::assert_relative_eq;

    fn group(ctx: &Context, style: UIStyle) -> UIGroup {
        UIGroup::new(GroupId(5), style, ctx.window_dims())
    }

    fn button(window_dims: Vec2) -> Button {
        Button::new(Label::new(Vec3::new(0.25, 0.5, 0.0), Vec2::new(0.25, 0.1), "button.png", window_dims))
    }

    #[test]
    fn test_ids_and_typed_access() {
        let (ctx, style) = setup();
        let mut group = group(&ctx, style);
        let dims = ctx.window_dims();
        let first = group.add_component(Label::new(Vec3::zeros(), Vec2::new(0.1, 0.1), "", dims));
        let second = group.add_component(button(dims));
        assert_eq!((first, second), (ComponentId(0), ComponentId(1)));

        assert!(group.component::<Button>(second).is_some());
        assert!(group.component::<Button>(first).is_none());
        assert!(group.component::<Label>(ComponentId(9)).is_none());

        assert!(group.remove_component(first).is_some());
        assert!(group.remove_component(first).is_none());
        assert_eq!(group.len(), 1);
        assert_eq!(group.add_component(button(dims)), ComponentId(2));
    }

    #[test]
    fn test_events_are_tagged_with_the_group() {
        let (mut ctx, style) = setup();
        let mut group = group(&ctx, style);
        let id = group.add_component(button(ctx.window_dims()));

        frame(&mut ctx, |input| {
            input.move_mouse(Vec2::new(300.0, 330.0));
            input.press_mouse_button(MouseButton::Left);
        });
        group.process_input(&mut ctx);
        frame(&mut ctx, |input| input.release_mouse_button(MouseButton::Left));
        let events = group.process_input(&mut ctx);
        assert_eq!(
            events,
            vec![UIEvent {
                group: GroupId(5),
                component: id,
                event: CLICKED_EVENT,
            }]
        );
    }

    #[test]
    fn test_disabled_group_ignores_input() {
        let (mut ctx, style) = setup();
        let mut group = group(&ctx, style);
        let id = group.add_component(button(ctx.window_dims()));
        group.set_enabled(false);
        frame(&mut ctx, |input| input.move_mouse(Vec2::new(300.0, 330.0)));
        assert!(group.process_input(&mut ctx).is_empty());
        assert!(!group.component::<Button>(id).is_some_and(Button::is_selected));
    }

    #[test]
    fn test_hidden_components_are_not_drawn() {
        let (mut ctx, style) = setup();
        let mut group = group(&ctx, style);
        let dims = ctx.window_dims();
        group.add_component(Label::new(Vec3::zeros(), Vec2::new(0.1, 0.1), "a.png", dims));
        let hidden = group.add_component(Label::new(Vec3::zeros(), Vec2::new(0.1, 0.1), "b.png", dims));
        if let Some(label) = group.component_mut::<Label>(hidden) {
            label.set_visible(false);
        }
        ctx.graphics.begin();
        group.draw(&mut ctx);
        assert_eq!(ctx.graphics.end().sprites, 1);

        group.set_visible(false);
        ctx.graphics.begin();
        group.draw(&mut ctx);
        assert_eq!(ctx.graphics.end().sprites, 0);
    }

    #[test]
    fn test_typed_characters_reach_components() {
        let (mut ctx, style) = setup();
        let mut group = group(&ctx, style);
        let dims = ctx.window_dims();
        let label = Label::new(Vec3::new(0.25, 0.5, 0.0), Vec2::new(0.5, 0.1), "box.png", dims);
        let id = group.add_component(TextBox::new(label, Vec2::new(2.0, 0.05), "cursor.png", dims));
        if let Some(text_box) = group.component_mut::<TextBox>(id) {
            text_box.set_selected(true);
        }
        ctx.input.type_char('h');
        ctx.input.type_char('i');
        ctx.pump_input();
        group.process_input(&mut ctx);
        assert_eq!(group.component::<TextBox>(id).map(TextBox::text), Some("hi"));
    }

    #[test]
    fn test_resize_scales_components() {
        let (mut ctx, style) = setup();
        let mut group = group(&ctx, style);
        let id = group.add_component(Label::new(Vec3::new(0.25, 0.5, 0.0), Vec2::new(0.5, 0.1), "a.png", ctx.window_dims()));
        ctx.window.set_dimensions(IVec2::new(1600, 1200));
        group.update(1.0, &mut ctx);

        let label = group.component::<Label>(id).unwrap();
        assert_relative_eq!(label.rect(), Vec4::new(400.0, 600.0, 800.0, 120.0), epsilon = 1e-3);
    }

    #[test]
    fn test_style_setters() {
        let (ctx, style) = setup();
        let mut group = group(&ctx, style);
        group.set_text_scale(2.0);
        group.set_font_file_name("other.ttf");
        group.component_event(ComponentId(3), 1);
        assert_eq!(group.style().text_scale, 2.0);
        assert_eq!(group.style().font_file_name, "other.ttf");
        assert_eq!(group.events.len(), 1);
    }
}
