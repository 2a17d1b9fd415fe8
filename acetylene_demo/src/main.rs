//! Acetylene demo
//!
//! A title screen, an options editor backed by `options.txt`, and a small
//! coin collecting game. Build with `--features glfw-window,audio` for a real
//! window and sound; without them the demo runs headless for a few seconds.

mod assets;
mod scenes;
mod settings;
mod sprites;

use acetylene::config::WindowConfig;
use acetylene::prelude::*;
use acetylene::window::WindowResult;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scenes::{GameScene, OptionsScene, TitleScene, GAME, OPTIONS, TITLE};
use settings::{Settings, OPTIONS_FILE};

#[cfg(not(feature = "glfw-window"))]
const HEADLESS_FRAMES: u64 = 600;

fn open_window(config: &WindowConfig) -> WindowResult<Box<dyn Window>> {
    #[cfg(feature = "glfw-window")]
    {
        let window = acetylene::window::GlfwWindow::new(config.dimensions, &config.title, config.fullscreen)?;
        Ok(Box::new(window))
    }
    #[cfg(not(feature = "glfw-window"))]
    {
        Ok(Box::new(HeadlessWindow::new(config).with_frame_budget(HEADLESS_FRAMES)))
    }
}

fn audio_backend() -> Box<dyn AudioBackend> {
    #[cfg(feature = "audio")]
    {
        Box::new(acetylene::audio::RodioBackend::new())
    }
    #[cfg(not(feature = "audio"))]
    {
        Box::new(SilentBackend::new())
    }
}

fn app_config(options: &Options) -> AppConfig {
    let mut config = AppConfig::default();
    config.window.title = "Acetylene Demo".to_string();
    config.window.dimensions = options.resolution;
    config.window.fullscreen = options.fullscreen;
    config.audio.volume = options.volume;
    config.log.file_names = vec!["acetylene_demo.log".to_string()];
    config
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load_or_create(OPTIONS_FILE)?;
    let config = app_config(&settings.options);
    let settings = settings.shared();

    let scenes: Vec<(SceneId, Box<dyn Scene>)> = vec![
        (TITLE, Box::new(TitleScene::new(StdRng::from_entropy()))),
        (OPTIONS, Box::new(OptionsScene::new(settings.clone(), StdRng::from_entropy()))),
        (GAME, Box::new(GameScene::new(settings, StdRng::from_entropy()))),
    ];
    let backends = Backends::new(Box::new(RecordingBackend::new()), audio_backend());

    let mut app = App::new(&config, open_window, backends, scenes)?;
    app.run();
    app.destroy();
    log::info!("Demo finished");
    Ok(())
}
