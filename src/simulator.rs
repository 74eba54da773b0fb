//! Host state: the live configuration plus the store and clock it drives.
//!
//! Everything the window layer does goes through here, so the rules about
//! when a grid must be rebuilt live in one place.

use log::{debug, info};

use crate::automata::GridStore;
use crate::clock::{SimulationClock, Tick, TimeSource};
use crate::config::{Config, Mode, PartialConfig};
use crate::render::PixelSurface;

/// A pointer drag in progress: where it was last seen and what it paints.
#[derive(Clone, Copy, Debug)]
struct Drag {
    last: (isize, isize),
    alive: bool,
}

pub struct Simulator<T: TimeSource> {
    config: Config,
    store: GridStore,
    clock: SimulationClock<T>,
    viewport: (u32, u32),
    drag: Option<Drag>,
    /// Set when the grid was rebuilt, so the next frame starts from black
    /// instead of fading the old grid's trails.
    needs_clear: bool,
}

impl<T: TimeSource> Simulator<T> {
    /// Builds the grid for `viewport` and starts the clock.
    pub fn new(config: Config, viewport: (u32, u32), store: GridStore, time: T) -> Self {
        let mut sim = Self {
            config,
            store,
            clock: SimulationClock::new(time),
            viewport,
            drag: None,
            needs_clear: true,
        };
        sim.reinitialize();
        sim.clock.start();
        sim
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &GridStore {
        &self.store
    }

    pub fn clock(&self) -> &SimulationClock<T> {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimulationClock<T> {
        &mut self.clock
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Replaces the configuration. The grid is only rebuilt when the mode or
    /// the cell size changed; everything else is read on the next tick.
    pub fn set_config(&mut self, config: Config) {
        let rebuild =
            config.mode != self.config.mode || config.resolution != self.config.resolution;
        debug!("config replaced: {:?}", config);
        self.config = config;
        if rebuild {
            self.reinitialize();
        }
    }

    /// Merges a preset into the live configuration and starts over.
    pub fn apply_preset(&mut self, preset: &PartialConfig) {
        self.config = self.config.merge(preset);
        match self.config.mode {
            Mode::OneD => info!("applying rule {}", self.config.rule),
            Mode::TwoD => info!("applying rule {}", self.config.life_rule()),
        }
        self.reinitialize();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.reinitialize();
    }

    pub fn reinitialize(&mut self) {
        self.drag = None;
        self.needs_clear = true;
        self.store
            .initialize(self.config.mode, self.config.resolution, self.viewport);
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Feeds one pointer sample. The first active sample toggles the cell
    /// under the pointer; later ones paint that same state along the path
    /// until the pointer is released.
    pub fn handle_interaction(&mut self, position: (isize, isize), active: bool) {
        if !active {
            if self.drag.take().is_some() {
                debug!("draw end");
            }
            return;
        }
        if self.config.mode == Mode::OneD {
            return;
        }

        let res = self.config.resolution;
        match self.drag {
            None => {
                debug!("pointer press at {:?}", position);
                if let Some(alive) = self.store.toggle_cell(self.config.mode, position, res) {
                    self.drag = Some(Drag {
                        last: position,
                        alive,
                    });
                }
            }
            Some(drag) => {
                debug!("draw {:?} => {:?}", drag.last, position);
                self.store.paint_line(drag.last, position, res, drag.alive);
                self.drag = Some(Drag {
                    last: position,
                    ..drag
                });
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        self.clock.toggle_pause();
    }

    /// Single-steps while paused.
    pub fn step_once(&mut self) {
        self.clock.pause();
        self.clock.step_once(&mut self.store, &self.config);
    }

    pub fn cancel(&mut self) {
        self.clock.cancel();
    }

    /// Runs one loop iteration against `surface`.
    pub fn frame<S: PixelSurface>(&mut self, surface: &mut S) -> Tick {
        if std::mem::take(&mut self.needs_clear) {
            debug!("clearing surface after rebuild");
            surface.clear();
        }
        self.clock.tick(&mut self.store, &self.config, surface)
    }
}
