//! Scenes
//!
//! A scene is one screen of an app: it owns its UI groups and sprites, reads
//! input, reacts to UI events and advances its own state. The app drives
//! exactly one scene at a time and switches between them on request.
//!
//! ## Lifecycle
//!
//! ```text
//! init (once) -> enter(prev) -> { draw, process_input, update }* -> leave(next)
//!                   ^                                                  |
//!                   +------------------ enter again -------------------+
//! destroy (once, only after a successful init)
//! ```

use crate::context::Context;
use crate::input::InputListener;
use crate::ui::{ComponentId, EventId, GroupId, UIEvent};

/// Caller-chosen key of a scene registered with the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(pub u32);

/// One screen of an app.
///
/// Input events of the frame are delivered through the [`InputListener`]
/// callbacks before [`process_input`](Scene::process_input) runs.
pub trait Scene: InputListener {
    /// Allocate the scene's resources. Returning `false` keeps the scene
    /// inactive; the next activation tries again.
    fn init(&mut self, ctx: &mut Context) -> bool;

    /// Became the active scene; `prev` is the scene that was active before,
    /// or this scene itself on the first activation.
    fn enter(&mut self, _ctx: &mut Context, _prev: SceneId) {}

    /// Submit this frame's sprites and UI
    fn draw(&mut self, ctx: &mut Context);

    /// React to this frame's input. `false` ends the app loop.
    fn process_input(&mut self, ctx: &mut Context) -> bool;

    /// A component of one of the scene's groups raised an event
    fn component_event(&mut self, _ctx: &mut Context, _group: GroupId, _component: ComponentId, _event: EventId) {}

    /// Advance by `dt` update units
    fn update(&mut self, dt: f32, ctx: &mut Context);

    /// Stopped being the active scene in favour of `next`
    fn leave(&mut self, _ctx: &mut Context, _next: SceneId) {}

    /// Release everything `init` allocated
    fn destroy(&mut self, ctx: &mut Context);

    /// Feed UI events collected from a group back into
    /// [`component_event`](Scene::component_event)
    fn dispatch_ui_events(&mut self, ctx: &mut Context, events: Vec<UIEvent>) {
        for event in events {
            self.component_event(ctx, event.group, event.component, event.event);
        }
    }
}

/// A registered scene plus its initialization flag.
///
/// `init` runs until it first succeeds and never again; `destroy` only runs
/// for a scene that is initialized.
pub struct SceneSlot {
    scene: Box<dyn Scene>,
    initialized: bool,
}

impl SceneSlot {
    /// Wrap an uninitialized scene
    pub fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            initialized: false,
        }
    }

    /// Initialize the scene unless that already happened
    pub fn init_scene(&mut self, ctx: &mut Context) -> bool {
        if !self.initialized {
            self.initialized = self.scene.init(ctx);
        }
        self.initialized
    }

    /// Destroy the scene if it was initialized
    pub fn destroy_scene(&mut self, ctx: &mut Context) {
        if self.initialized {
            self.scene.destroy(ctx);
        }
        self.initialized = false;
    }

    /// `init` succeeded and `destroy` has not run since
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The wrapped scene
    pub fn scene(&self) -> &dyn Scene {
        self.scene.as_ref()
    }

    /// The wrapped scene, mutably
    pub fn scene_mut(&mut self) -> &mut dyn Scene {
        self.scene.as_mut()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::context::tests::context;
    use crate::input::KeyCode;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shared log of lifecycle calls
    pub(crate) type Calls = Rc<RefCell<Vec<String>>>;

    /// Scene that records every lifecycle call
    pub(crate) struct LoggedScene {
        pub(crate) name: &'static str,
        pub(crate) calls: Calls,
        pub(crate) init_result: bool,
        pub(crate) keep_running: bool,
        pub(crate) request_on_input: Option<SceneId>,
    }

    impl LoggedScene {
        pub(crate) fn new(name: &'static str, calls: &Calls) -> Self {
            Self {
                name,
                calls: Rc::clone(calls),
                init_result: true,
                keep_running: true,
                request_on_input: None,
            }
        }

        fn record(&self, call: impl AsRef<str>) {
            self.calls.borrow_mut().push(format!("{}.{}", self.name, call.as_ref()));
        }
    }

    impl InputListener for LoggedScene {
        fn key_pressed(&mut self, key: KeyCode) {
            self.record(format!("key {key:?}"));
        }
    }

    impl Scene for LoggedScene {
        fn init(&mut self, _ctx: &mut Context) -> bool {
            self.record("init");
            self.init_result
        }

        fn enter(&mut self, _ctx: &mut Context, prev: SceneId) {
            self.record(format!("enter {}", prev.0));
        }

        fn draw(&mut self, _ctx: &mut Context) {
            self.record("draw");
        }

        fn process_input(&mut self, ctx: &mut Context) -> bool {
            self.record("input");
            if let Some(next) = self.request_on_input.take() {
                ctx.request_scene(next);
            }
            self.keep_running
        }

        fn component_event(&mut self, _ctx: &mut Context, group: GroupId, component: ComponentId, event: EventId) {
            self.record(format!("event {} {} {}", group.0, component.0, event));
        }

        fn update(&mut self, dt: f32, _ctx: &mut Context) {
            self.record(format!("update {dt:.2}"));
        }

        fn leave(&mut self, _ctx: &mut Context, next: SceneId) {
            self.record(format!("leave {}", next.0));
        }

        fn destroy(&mut self, _ctx: &mut Context) {
            self.record("destroy");
        }
    }

    #[test]
    fn test_init_runs_once() {
        let mut ctx = context();
        let calls = Calls::default();
        let mut slot = SceneSlot::new(Box::new(LoggedScene::new("a", &calls)));
        assert!(slot.init_scene(&mut ctx));
        assert!(slot.init_scene(&mut ctx));
        assert!(slot.is_initialized());
        assert_eq!(*calls.borrow(), vec!["a.init"]);
    }

    #[test]
    fn test_failed_init_is_retried() {
        let mut ctx = context();
        let calls = Calls::default();
        let mut scene = LoggedScene::new("a", &calls);
        scene.init_result = false;
        let mut slot = SceneSlot::new(Box::new(scene));
        assert!(!slot.init_scene(&mut ctx));
        assert!(!slot.init_scene(&mut ctx));
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn test_destroy_only_after_init() {
        let mut ctx = context();
        let calls = Calls::default();
        let mut slot = SceneSlot::new(Box::new(LoggedScene::new("a", &calls)));
        slot.destroy_scene(&mut ctx);
        assert!(calls.borrow().is_empty());

        slot.init_scene(&mut ctx);
        slot.destroy_scene(&mut ctx);
        slot.destroy_scene(&mut ctx);
        assert_eq!(*calls.borrow(), vec!["a.init", "a.destroy"]);
        assert!(!slot.is_initialized());
    }

    #[test]
    fn test_ui_events_reach_component_event() {
        let mut ctx = context();
        let calls = Calls::default();
        let mut scene = LoggedScene::new("a", &calls);
        scene.dispatch_ui_events(
            &mut ctx,
            vec![UIEvent {
                group: GroupId(1),
                component: ComponentId(2),
                event: 3,
            }],
        );
        assert_eq!(*calls.borrow(), vec!["a.event 1 2 3"]);
    }
}
