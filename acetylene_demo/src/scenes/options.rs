//! Options editor: resolution, fullscreen, volume and username

use super::{button, UiView, TITLE};
use crate::assets::{
    CAROUSEL_BUTTON_TEXTURE, CAROUSEL_TEXTURE, CLICK_SOUND, CURSOR_TEXTURE, MENU_MUSIC, SLIDER_TEXTURE, SWITCH_TEXTURE,
    TEXT_BOX_TEXTURE,
};
use crate::settings::SharedSettings;
use crate::sprites::EmberField;
use acetylene::config::options::parse_resolution;
use acetylene::prelude::*;
use acetylene::ui::widgets::button::CLICKED_EVENT;
use rand::rngs::StdRng;

const RESOLUTIONS: [&str; 3] = ["800x600", "1600x900", "1920x1080"];

struct OptionsUi {
    view: UiView,
    main: UIGroup,
    options: UIGroup,
    back: ComponentId,
    defaults: ComponentId,
    save: ComponentId,
    resolution: ComponentId,
    fullscreen: ComponentId,
    volume: ComponentId,
    username: ComponentId,
}

impl OptionsUi {
    /// Put `options` into the widgets
    fn show(&mut self, options: &Options) {
        if let Some(carousel) = self.options.component_mut::<Carousel>(self.resolution) {
            carousel.set_value(&options.resolution_text());
        }
        if let Some(switch) = self.options.component_mut::<Switch>(self.fullscreen) {
            switch.set_on(options.fullscreen);
        }
        if let Some(slider) = self.options.component_mut::<Slider>(self.volume) {
            slider.set_value(options.volume);
        }
        if let Some(text_box) = self.options.component_mut::<TextBox>(self.username) {
            text_box.set_text(options.username.as_str());
        }
    }

    /// Read the widgets back over `options`
    fn collect(&self, options: &mut Options) {
        if let Some(resolution) = self
            .options
            .component::<Carousel>(self.resolution)
            .and_then(Carousel::value)
            .and_then(parse_resolution)
        {
            options.resolution = resolution;
        }
        if let Some(switch) = self.options.component::<Switch>(self.fullscreen) {
            options.fullscreen = switch.is_on();
        }
        if let Some(slider) = self.options.component::<Slider>(self.volume) {
            options.volume = slider.value();
        }
        if let Some(text_box) = self.options.component::<TextBox>(self.username) {
            options.username = text_box.text().to_owned();
        }
    }

    fn refresh_captions(&mut self) {
        if let Some(switch) = self.options.component_mut::<Switch>(self.fullscreen) {
            let state = if switch.is_on() { "On" } else { "Off" };
            switch.label_mut().set_label_text(format!("Fullscreen: {state}"));
        }
        if let Some(slider) = self.options.component_mut::<Slider>(self.volume) {
            let percent = (slider.value() * 100.0).round() as i32;
            slider.label_mut().set_label_text(format!("Volume: {percent}%"));
        }
    }
}

/// Edits the shared settings and applies them on save
pub struct OptionsScene {
    ui: Option<OptionsUi>,
    settings: SharedSettings,
    prev: SceneId,
    embers: EmberField<StdRng>,
}

impl OptionsScene {
    /// Options scene editing `settings`
    pub fn new(settings: SharedSettings, rng: StdRng) -> Self {
        Self {
            ui: None,
            settings,
            prev: TITLE,
            embers: EmberField::new(rng),
        }
    }

    fn save(&mut self, ctx: &mut Context) {
        let Some(ui) = &self.ui else {
            return;
        };
        let mut settings = self.settings.borrow_mut();
        ui.collect(&mut settings.options);
        ctx.window.set_dimensions(settings.options.resolution);
        ctx.window.set_fullscreen(settings.options.fullscreen);
        ctx.audio.set_volume(settings.options.volume);
        if settings.save() {
            log::info!("Saved options");
        }
    }
}

impl InputListener for OptionsScene {}

impl Scene for OptionsScene {
    fn init(&mut self, ctx: &mut Context) -> bool {
        let Some(view) = UiView::new(ctx) else {
            return false;
        };
        let wd = ctx.window_dims();

        let mut main = UIGroup::new(GroupId(0), view.style(), wd);
        let size = Vec2::new(0.25, 0.1);
        let back = main.add_component(button(Vec3::new(0.0, 0.0, 0.0), size, "BACK", wd));
        let defaults = main.add_component(button(Vec3::new(0.375, 0.0, 0.0), size, "DEFAULTS", wd));
        let save = main.add_component(button(Vec3::new(0.75, 0.0, 0.0), size, "SAVE", wd));

        let mut options = UIGroup::new(GroupId(1), view.style(), wd);
        let size = Vec2::new(0.48, 0.1);
        let resolution = options.add_component(Carousel::new(
            Label::new(Vec3::new(0.01, 0.85, 0.0), size, CAROUSEL_TEXTURE, wd)
                .with_label("Resolution", Alignment::Top)
                .with_text_alignment(Alignment::Center, Alignment::Center),
            RESOLUTIONS.iter().map(|r| (*r).to_owned()).collect(),
            RESOLUTIONS[0],
            CAROUSEL_BUTTON_TEXTURE,
            Alignment::Center,
            wd,
        ));
        let fullscreen = options.add_component(Switch::new(
            Label::new(Vec3::new(0.01, 0.7, 0.0), size, SWITCH_TEXTURE, wd)
                .with_label("Fullscreen: Off", Alignment::Center)
                .with_text_alignment(Alignment::Center, Alignment::Center),
        ));
        let volume = options.add_component(Slider::new(
            Label::new(Vec3::new(0.01, 0.55, 0.0), size, SLIDER_TEXTURE, wd)
                .with_label("Volume", Alignment::Top)
                .with_text_alignment(Alignment::Center, Alignment::Center),
            Vec2::new(10.0, 0.08),
            CURSOR_TEXTURE,
            Alignment::Center,
            wd,
        ));
        let username = options.add_component(TextBox::new(
            Label::new(Vec3::new(0.51, 0.85, 0.0), size, TEXT_BOX_TEXTURE, wd)
                .with_label("Username", Alignment::Top)
                .with_text_alignment(Alignment::Center, Alignment::Center),
            Vec2::new(1.0, 0.08),
            CURSOR_TEXTURE,
            wd,
        ));

        self.ui = Some(OptionsUi {
            view,
            main,
            options,
            back,
            defaults,
            save,
            resolution,
            fullscreen,
            volume,
            username,
        });
        log::info!("Initialized options scene");
        true
    }

    fn enter(&mut self, ctx: &mut Context, prev: SceneId) {
        self.prev = prev;
        if let Some(ui) = self.ui.as_mut() {
            ui.view.center(ctx);
            ui.show(&self.settings.borrow().options);
        }
        ctx.audio.play_music(MENU_MUSIC);
        log::info!("Entered options scene from scene {}", prev.0);
    }

    fn draw(&mut self, ctx: &mut Context) {
        let Some(ui) = self.ui.as_mut() else {
            return;
        };
        ui.main.draw(ctx);
        ui.options.draw(ctx);
        self.embers.draw(ctx, ui.view.shader());
    }

    fn process_input(&mut self, ctx: &mut Context) -> bool {
        if let Some(ui) = self.ui.as_mut() {
            let mut events = ui.main.process_input(ctx);
            events.extend(ui.options.process_input(ctx));
            self.dispatch_ui_events(ctx, events);
        }
        true
    }

    fn component_event(&mut self, ctx: &mut Context, group: GroupId, component: ComponentId, event: EventId) {
        let Some(ui) = self.ui.as_mut() else {
            return;
        };
        if group != ui.main.id() || event != CLICKED_EVENT {
            return;
        }
        if component == ui.back {
            log::info!("Back button clicked");
            ctx.audio.play_effect(CLICK_SOUND);
            ctx.request_scene(self.prev);
        } else if component == ui.defaults {
            log::info!("Defaults button clicked");
            ctx.audio.play_effect(CLICK_SOUND);
            ui.show(&Options::default());
        } else if component == ui.save {
            log::info!("Save button clicked");
            ctx.audio.play_effect(CLICK_SOUND);
            self.save(ctx);
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut Context) {
        if let Some(ui) = self.ui.as_mut() {
            ui.view.update(dt, ctx);
            ui.main.update(dt, ctx);
            ui.options.update(dt, ctx);
            ui.refresh_captions();
        }
        self.embers.update(dt, ctx.window_dims().x);
    }

    fn leave(&mut self, _ctx: &mut Context, next: SceneId) {
        self.embers.clear();
        log::info!("Left options scene for scene {}", next.0);
    }

    fn destroy(&mut self, ctx: &mut Context) {
        if let Some(mut ui) = self.ui.take() {
            ui.view.destroy(ctx);
            ui.main.destroy();
            ui.options.destroy();
        }
        self.embers.clear();
        log::info!("Destroyed options scene");
    }
}
