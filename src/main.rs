use anyhow::Result;
use log::{error, info};
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetLoader;
use engine::audio::Mixer;
use engine::game_loop::GameLoop;
use engine::input::InputState;
use engine::renderer::Renderer;
use game::level::{LEVEL_HEIGHT, LEVEL_WIDTH};
use game::scene::{PlayScene, SceneAssets};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Mossrun...");

    // Load everything up front; a missing file should fail here, loudly
    let loader = AssetLoader::new(".");
    let assets = SceneAssets::load(&loader)?;
    let mut scene = PlayScene::new(&assets.images, &assets.level)?;

    let mixer = Mixer::new();

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Mossrun")
            .with_inner_size(winit::dpi::LogicalSize::new(LEVEL_WIDTH, LEVEL_HEIGHT))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    let mut renderer = pollster::block_on(Renderer::new(
        window.clone(),
        LEVEL_WIDTH,
        LEVEL_HEIGHT,
    ))?;
    renderer.upload_images(&assets.images)?;

    let mut input = InputState::new();
    let mut game_loop = GameLoop::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| {
            match event {
                Event::WindowEvent {
                    event: WindowEvent::CloseRequested,
                    ..
                } => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                Event::WindowEvent {
                    event: WindowEvent::Resized(physical_size),
                    ..
                } => {
                    renderer.resize(physical_size);
                }
                Event::WindowEvent {
                    event: WindowEvent::KeyboardInput { event, .. },
                    ..
                } => {
                    input.process_key_event(&event);
                }
                Event::WindowEvent {
                    event: WindowEvent::RedrawRequested,
                    ..
                } => {
                    let updates = game_loop.begin_frame();
                    for _ in 0..updates {
                        scene.update(&input);
                        input.end_frame();
                    }

                    if game_loop.frame_count() % 600 == 0 {
                        info!("{:.0} FPS", game_loop.fps());
                    }

                    for sfx in scene.drain_sfx() {
                        match assets.sounds.get(sfx.name()) {
                            Ok(sound) => mixer.play(&sound),
                            Err(e) => error!("{}", e),
                        }
                    }

                    let sprites = scene.draw(&assets.images);
                    if let Err(e) = renderer.render(&sprites) {
                        error!("Render error: {}", e);
                    }
                }
                Event::AboutToWait => {
                    // Request redraw on next frame
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
