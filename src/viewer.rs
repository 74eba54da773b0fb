use log::{debug, error, info};
use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit_input_helper::WinitInputHelper;

use crate::automata::GridStore;
use crate::auxiliary::window::create_window;
use crate::clock::{SystemTime, Tick};
use crate::config::{Config, MAX_RESOLUTION, MAX_TRAILS, MIN_RESOLUTION, PRESETS};
use crate::render::FrameSurface;
use crate::simulator::Simulator;

const MAX_SPEED: f64 = 60.0;
const HUE_STEP: f32 = 10.0;
const TRAILS_STEP: f32 = 0.05;

const PRESET_KEYS: [VirtualKeyCode; 10] = [
    VirtualKeyCode::Key1,
    VirtualKeyCode::Key2,
    VirtualKeyCode::Key3,
    VirtualKeyCode::Key4,
    VirtualKeyCode::Key5,
    VirtualKeyCode::Key6,
    VirtualKeyCode::Key7,
    VirtualKeyCode::Key8,
    VirtualKeyCode::Key9,
    VirtualKeyCode::Key0,
];

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("could not open window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Pixels(#[from] pixels::Error),
}

/// Returns the configuration the keyboard asks for this frame, if any key
/// changed it. Values are kept inside the ranges the core expects.
fn adjusted_config(input: &WinitInputHelper, config: &Config) -> Option<Config> {
    let mut next = *config;
    if input.key_pressed(VirtualKeyCode::M) {
        next.color_mode = next.color_mode.next();
        info!("color mode {:?}", next.color_mode);
    }
    if input.key_pressed(VirtualKeyCode::Up) {
        next.speed = (next.speed + 1.0).min(MAX_SPEED);
    }
    if input.key_pressed(VirtualKeyCode::Down) {
        next.speed = (next.speed - 1.0).max(0.0);
    }
    if input.key_pressed(VirtualKeyCode::Right) {
        next.hue = (next.hue + HUE_STEP).rem_euclid(360.0);
    }
    if input.key_pressed(VirtualKeyCode::Left) {
        next.hue = (next.hue - HUE_STEP).rem_euclid(360.0);
    }
    if input.key_pressed(VirtualKeyCode::T) {
        next.trails = (next.trails + TRAILS_STEP).min(MAX_TRAILS);
    }
    if input.key_pressed(VirtualKeyCode::G) {
        next.trails = (next.trails - TRAILS_STEP).max(0.0);
    }
    if input.key_pressed(VirtualKeyCode::RBracket) {
        next.resolution = (next.resolution + 1).min(MAX_RESOLUTION);
    }
    if input.key_pressed(VirtualKeyCode::LBracket) {
        next.resolution = next.resolution.saturating_sub(1).max(MIN_RESOLUTION);
    }
    if input.key_pressed(VirtualKeyCode::Tab) {
        next.mode = next.mode.toggled();
        info!("switched to {:?}", next.mode);
    }
    (next != *config).then_some(next)
}

/// Opens the simulator window and runs it until it is closed.
pub fn run(config: Config) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();
    let (window, p_width, p_height, mut _hidpi_factor) =
        create_window("Pixel Automata", &event_loop)?;

    let surface_texture = SurfaceTexture::new(p_width, p_height, &window);
    let mut pixels = Pixels::new(p_width, p_height, surface_texture)?;

    let mut sim = Simulator::new(
        config,
        (p_width, p_height),
        GridStore::new(),
        SystemTime::new(),
    );
    let mut suspended = false;

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::RedrawRequested(_) => {
                let (width, height) = sim.viewport();
                let mut surface = FrameSurface::new(pixels.get_frame(), width, height);
                if sim.frame(&mut surface) == Tick::Cancelled {
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                if pixels
                    .render()
                    .map_err(|e| error!("pixels.render() failed: {}", e))
                    .is_err()
                {
                    sim.cancel();
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }
            // Stop stepping while the app is suspended, and pick up where we
            // left off when it comes back, unless the user had paused. winit
            // only sends these on Android and iOS; a minimized desktop window
            // keeps ticking.
            Event::Suspended => {
                if sim.clock().is_running() {
                    sim.clock_mut().pause();
                    suspended = true;
                }
            }
            Event::Resumed => {
                if suspended {
                    sim.clock_mut().resume();
                    suspended = false;
                }
            }
            Event::LoopDestroyed => {
                sim.cancel();
                return;
            }
            _ => {}
        }

        // For everything else, let winit_input_helper collect events to build its state.
        // It returns `true` when it is time to update our state and request a redraw.
        if input.update(&event) {
            if input.key_pressed(VirtualKeyCode::Escape) || input.quit() {
                sim.cancel();
                *control_flow = ControlFlow::Exit;
                return;
            }
            if input.key_pressed(VirtualKeyCode::P) {
                sim.toggle_pause();
                info!(
                    "generation {}, population {}",
                    sim.store().generation(),
                    sim.store().population()
                );
            }
            if input.key_pressed(VirtualKeyCode::Space) {
                debug!("frame advanced");
                sim.step_once();
            }
            if input.key_pressed(VirtualKeyCode::R) {
                info!("reset with random conditions");
                sim.reinitialize();
            }
            if input.key_pressed(VirtualKeyCode::C) {
                info!("cleared");
                sim.clear();
            }
            for (key, preset) in PRESET_KEYS.iter().zip(PRESETS) {
                if input.key_pressed(*key) {
                    info!("preset {}: {}", preset.name, preset.description);
                    sim.apply_preset(&preset.config);
                }
            }
            if let Some(next) = adjusted_config(&input, sim.config()) {
                sim.set_config(next);
            }

            let pointer = input.mouse().map(|(mx, my)| {
                let (x, y) = pixels
                    .window_pos_to_pixel((mx, my))
                    .unwrap_or_else(|pos| pixels.clamp_pixel_pos(pos));
                (x as isize, y as isize)
            });
            if let Some(position) = pointer {
                let active = input.mouse_pressed(0) || input.mouse_held(0);
                sim.handle_interaction(position, active);
            }

            // Adjust high DPI factor
            if let Some(factor) = input.scale_factor_changed() {
                _hidpi_factor = factor;
            }
            // Resize the window and the buffer behind it; the grid follows.
            if let Some(size) = input.window_resized() {
                if size.width > 0 && size.height > 0 {
                    pixels.resize_surface(size.width, size.height);
                    pixels.resize_buffer(size.width, size.height);
                    sim.resize(size.width, size.height);
                }
            }
            window.request_redraw();
        }
    });
}
