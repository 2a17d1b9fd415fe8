//! Title screen: start, options and exit over drifting embers

use super::{button, UiView, GAME, OPTIONS};
use crate::assets::{CLICK_SOUND, MENU_MUSIC};
use crate::sprites::EmberField;
use acetylene::prelude::*;
use acetylene::ui::widgets::button::CLICKED_EVENT;
use rand::rngs::StdRng;

struct TitleUi {
    view: UiView,
    group: UIGroup,
    start: ComponentId,
    options: ComponentId,
    exit: ComponentId,
}

/// Opening scene of the demo
pub struct TitleScene {
    ui: Option<TitleUi>,
    embers: EmberField<StdRng>,
    running: bool,
}

impl TitleScene {
    /// Title scene spawning embers from `rng`
    pub fn new(rng: StdRng) -> Self {
        Self {
            ui: None,
            embers: EmberField::new(rng),
            running: true,
        }
    }
}

impl InputListener for TitleScene {}

impl Scene for TitleScene {
    fn init(&mut self, ctx: &mut Context) -> bool {
        let Some(view) = UiView::new(ctx) else {
            return false;
        };
        let wd = ctx.window_dims();
        let mut group = UIGroup::new(GroupId(0), view.style(), wd);
        let size = Vec2::new(0.5, 0.1);
        let start = group.add_component(button(Vec3::new(0.25, 0.5, 0.0), size, "START GAME", wd));
        let options = group.add_component(button(Vec3::new(0.25, 0.35, 0.0), size, "OPTIONS", wd));
        let exit = group.add_component(button(Vec3::new(0.25, 0.2, 0.0), size, "EXIT", wd));
        self.ui = Some(TitleUi {
            view,
            group,
            start,
            options,
            exit,
        });
        log::info!("Initialized title scene");
        true
    }

    fn enter(&mut self, ctx: &mut Context, prev: SceneId) {
        if let Some(ui) = &self.ui {
            ui.view.center(ctx);
        }
        ctx.audio.play_music(MENU_MUSIC);
        log::info!("Entered title scene from scene {}", prev.0);
    }

    fn draw(&mut self, ctx: &mut Context) {
        let Some(ui) = self.ui.as_mut() else {
            return;
        };
        ui.group.draw(ctx);
        self.embers.draw(ctx, ui.view.shader());
    }

    fn process_input(&mut self, ctx: &mut Context) -> bool {
        if let Some(ui) = self.ui.as_mut() {
            let events = ui.group.process_input(ctx);
            self.dispatch_ui_events(ctx, events);
        }
        self.running
    }

    fn component_event(&mut self, ctx: &mut Context, group: GroupId, component: ComponentId, event: EventId) {
        let Some(ui) = &self.ui else {
            return;
        };
        if group != ui.group.id() || event != CLICKED_EVENT {
            return;
        }
        if component == ui.start {
            log::info!("Start button clicked");
            ctx.audio.play_effect(CLICK_SOUND);
            ctx.request_scene(GAME);
        } else if component == ui.options {
            log::info!("Options button clicked");
            ctx.audio.play_effect(CLICK_SOUND);
            ctx.request_scene(OPTIONS);
        } else if component == ui.exit {
            log::info!("Exit button clicked");
            ctx.audio.play_effect(CLICK_SOUND);
            self.running = false;
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut Context) {
        if let Some(ui) = self.ui.as_mut() {
            ui.view.update(dt, ctx);
            ui.group.update(dt, ctx);
        }
        self.embers.update(dt, ctx.window_dims().x);
    }

    fn leave(&mut self, _ctx: &mut Context, next: SceneId) {
        self.embers.clear();
        log::info!("Left title scene for scene {}", next.0);
    }

    fn destroy(&mut self, ctx: &mut Context) {
        if let Some(mut ui) = self.ui.take() {
            ui.view.destroy(ctx);
            ui.group.destroy();
        }
        self.embers.clear();
        log::info!("Destroyed title scene");
    }
}
