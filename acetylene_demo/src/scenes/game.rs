//! Coin collecting game with a pause menu

use super::{button, UiView, OPTIONS, TITLE};
use crate::assets::{CLICK_SOUND, GAME_MUSIC, WALL_TEXTURE};
use crate::settings::SharedSettings;
use crate::sprites::{Coin, Player};
use acetylene::prelude::*;
use acetylene::ui::widgets::button::CLICKED_EVENT;
use rand::rngs::StdRng;

const COIN_COUNT: usize = 5;
const ZOOM_OUT_SPEED: f32 = -0.01;

struct GameWorld {
    view: UiView,
    pause: UIGroup,
    resume: ComponentId,
    options: ComponentId,
    quit: ComponentId,
    walls: Vec<Sprite>,
    coins: Vec<Coin>,
    player: Player,
}

impl GameWorld {
    fn set_paused(&mut self, paused: bool) {
        self.pause.set_enabled(paused);
        self.pause.set_visible(paused);
        log::debug!("Game paused: {paused}");
    }

    fn is_paused(&self) -> bool {
        self.pause.is_enabled()
    }
}

/// Walls around a 256x256 arena
fn walls() -> Vec<Sprite> {
    [
        (Vec3::new(-1536.0, -1536.0, 0.0), Vec2::new(1536.0, 3328.0)),
        (Vec3::new(0.0, -1536.0, 0.0), Vec2::new(256.0, 1536.0)),
        (Vec3::new(256.0, -1536.0, 0.0), Vec2::new(1536.0, 3328.0)),
        (Vec3::new(0.0, 256.0, 0.0), Vec2::new(256.0, 1536.0)),
    ]
    .into_iter()
    .map(|(position, dimensions)| Sprite::new(position, dimensions, WALL_TEXTURE))
    .collect()
}

/// The player walks the arena collecting coins; once all are taken the
/// camera slowly zooms out
pub struct GameScene {
    world: Option<GameWorld>,
    settings: SharedSettings,
    rng: StdRng,
}

impl GameScene {
    /// Game scene tagging the player with the username in `settings`
    pub fn new(settings: SharedSettings, rng: StdRng) -> Self {
        Self {
            world: None,
            settings,
            rng,
        }
    }
}

impl InputListener for GameScene {}

impl Scene for GameScene {
    fn init(&mut self, ctx: &mut Context) -> bool {
        let Some(view) = UiView::new(ctx) else {
            return false;
        };
        let wd = ctx.window_dims();
        let mut pause = UIGroup::new(GroupId(0), view.style(), wd);
        let size = Vec2::new(0.33, 0.08);
        let x = 0.5 - size.x / 2.0;
        let resume = pause.add_component(button(Vec3::new(x, 0.5, 0.1), size, "CONTINUE", wd));
        let options = pause.add_component(button(Vec3::new(x, 0.4, 0.1), size, "OPTIONS", wd));
        let quit = pause.add_component(button(Vec3::new(x, 0.3, 0.1), size, "QUIT", wd));

        let coins = (0..COIN_COUNT).map(|_| Coin::random(&mut self.rng)).collect();
        let mut world = GameWorld {
            view,
            pause,
            resume,
            options,
            quit,
            walls: walls(),
            coins,
            player: Player::new(Vec3::new(0.0, 0.0, 0.01)),
        };
        world.set_paused(false);
        self.world = Some(world);

        let camera = ctx.graphics.default_camera();
        if let Some(camera) = ctx.graphics.camera_mut(camera) {
            camera.scale.value = 2.0;
            camera.scale.velocity = 0.0;
        }
        log::info!("Initialized game scene");
        true
    }

    fn enter(&mut self, ctx: &mut Context, prev: SceneId) {
        if let Some(world) = &self.world {
            world.view.center(ctx);
        }
        ctx.audio.play_music(GAME_MUSIC);
        log::info!("Entered game scene from scene {}", prev.0);
    }

    fn draw(&mut self, ctx: &mut Context) {
        let Some(world) = self.world.as_mut() else {
            return;
        };
        world.pause.draw(ctx);
        let shader = ctx.graphics.default_shader();
        ctx.graphics.submit_all(world.walls.iter_mut(), shader);
        ctx.graphics.submit_all(world.coins.iter_mut().map(Coin::sprite_mut), shader);
        world.player.draw(ctx, &self.settings.borrow().options.username, shader);
    }

    fn process_input(&mut self, ctx: &mut Context) -> bool {
        let Some(world) = self.world.as_mut() else {
            return true;
        };
        let events = world.pause.process_input(ctx);
        if ctx.input.is_key_pressed(KeyCode::Escape) {
            let paused = world.is_paused();
            world.set_paused(!paused);
        }
        if !world.is_paused() {
            world.player.process_input(&ctx.input);
        }
        self.dispatch_ui_events(ctx, events);
        true
    }

    fn component_event(&mut self, ctx: &mut Context, group: GroupId, component: ComponentId, event: EventId) {
        let Some(world) = self.world.as_mut() else {
            return;
        };
        if group != world.pause.id() || event != CLICKED_EVENT {
            return;
        }
        if component == world.resume {
            ctx.audio.play_effect(CLICK_SOUND);
            world.set_paused(false);
        } else if component == world.options {
            ctx.audio.play_effect(CLICK_SOUND);
            ctx.request_scene(OPTIONS);
        } else if component == world.quit {
            ctx.audio.play_effect(CLICK_SOUND);
            ctx.request_scene(TITLE);
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut Context) {
        let Some(world) = self.world.as_mut() else {
            return;
        };
        world.pause.update(dt, ctx);
        world.view.update(dt, ctx);

        let camera = ctx.graphics.default_camera();
        if world.is_paused() {
            if let Some(camera) = ctx.graphics.camera_mut(camera) {
                camera.scale.velocity = 0.0;
            }
        } else if world.coins.is_empty() {
            if let Some(camera) = ctx.graphics.camera_mut(camera) {
                camera.scale.velocity = ZOOM_OUT_SPEED;
            }
        } else {
            world.player.update(dt, &mut world.coins, &mut ctx.audio);
            if let Some(camera) = ctx.graphics.camera_mut(camera) {
                camera.position = world.player.position();
            }
            world.coins.retain(|coin| !coin.is_collected());
        }
    }

    fn leave(&mut self, _ctx: &mut Context, next: SceneId) {
        log::info!("Left game scene for scene {}", next.0);
    }

    fn destroy(&mut self, ctx: &mut Context) {
        if let Some(mut world) = self.world.take() {
            world.pause.destroy();
            world.view.destroy(ctx);
        }
        log::info!("Destroyed game scene");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::tests::{click, context, release};
    use crate::settings::Settings;
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    fn scene(ctx: &mut Context) -> GameScene {
        let settings = Settings::in_memory(Options::default(), "unused_options.txt").shared();
        let mut scene = GameScene::new(settings, StdRng::seed_from_u64(3));
        assert!(scene.init(ctx));
        scene.enter(ctx, TITLE);
        scene
    }

    fn default_camera(ctx: &Context) -> &Camera {
        ctx.graphics.camera(ctx.graphics.default_camera()).unwrap()
    }

    fn tap(ctx: &mut Context, scene: &mut GameScene, key: KeyCode) {
        ctx.pump_input();
        ctx.input.press_key(key);
        scene.process_input(ctx);
        ctx.pump_input();
        ctx.input.release_key(key);
        scene.process_input(ctx);
    }

    fn is_paused(scene: &GameScene) -> bool {
        scene.world.as_ref().unwrap().is_paused()
    }

    #[test]
    fn test_init_builds_the_arena() {
        let mut ctx = context();
        let mut scene = scene(&mut ctx);
        let world = scene.world.as_ref().unwrap();
        assert_eq!(world.walls.len(), 4);
        assert_eq!(world.coins.len(), COIN_COUNT);
        assert!(!world.is_paused());
        assert!(!world.pause.is_visible());
        assert_relative_eq!(default_camera(&ctx).scale.value, 2.0);

        ctx.graphics.begin();
        scene.draw(&mut ctx);
        assert_eq!(ctx.graphics.end().sprites, 4 + COIN_COUNT + 1);
    }

    #[test]
    fn test_escape_toggles_the_pause_menu() {
        let mut ctx = context();
        let mut scene = scene(&mut ctx);
        tap(&mut ctx, &mut scene, KeyCode::Escape);
        assert!(is_paused(&scene));
        assert!(scene.world.as_ref().unwrap().pause.is_visible());
        tap(&mut ctx, &mut scene, KeyCode::Escape);
        assert!(!is_paused(&scene));
    }

    #[test]
    fn test_pause_buttons() {
        let mut ctx = context();
        let mut scene = scene(&mut ctx);
        tap(&mut ctx, &mut scene, KeyCode::Escape);

        click(&mut ctx, Vec2::new(400.0, 320.0));
        scene.process_input(&mut ctx);
        release(&mut ctx);
        scene.process_input(&mut ctx);
        assert!(!is_paused(&scene));

        tap(&mut ctx, &mut scene, KeyCode::Escape);
        click(&mut ctx, Vec2::new(400.0, 200.0));
        scene.process_input(&mut ctx);
        release(&mut ctx);
        scene.process_input(&mut ctx);
        assert_eq!(ctx.take_scene_request(), Some(TITLE));
    }

    #[test]
    fn test_camera_follows_the_player() {
        let mut ctx = context();
        let mut scene = scene(&mut ctx);
        ctx.pump_input();
        ctx.input.press_key(KeyCode::D);
        scene.process_input(&mut ctx);
        scene.update(1.0, &mut ctx);
        let player = scene.world.as_ref().unwrap().player.position();
        assert_relative_eq!(player.x, 2.5);
        assert_relative_eq!(default_camera(&ctx).position, player);
    }

    #[test]
    fn test_camera_zooms_out_once_every_coin_is_taken() {
        let mut ctx = context();
        let mut scene = scene(&mut ctx);
        scene.world.as_mut().unwrap().coins.clear();
        scene.update(1.0, &mut ctx);
        assert_relative_eq!(default_camera(&ctx).scale.velocity, ZOOM_OUT_SPEED);

        scene.world.as_mut().unwrap().set_paused(true);
        scene.update(1.0, &mut ctx);
        assert_relative_eq!(default_camera(&ctx).scale.velocity, 0.0);

        scene.destroy(&mut ctx);
        assert!(scene.world.is_none());
    }
}
