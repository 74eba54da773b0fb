//! The tick loop that paces simulation steps against display refreshes.
//!
//! The host calls [`SimulationClock::tick`] once per refresh. Each tick may
//! advance the grid, depending on how long ago the last step was taken, and
//! always redraws. Configuration is passed into every tick, so changes made
//! between ticks are picked up without restarting anything.

use std::time::Instant;

use log::{debug, info, warn};

use crate::automata::GridStore;
use crate::config::Config;
use crate::render::{self, PixelSurface};

/// Where the clock reads the current time from.
pub trait TimeSource {
    /// Milliseconds since some fixed origin.
    fn now_ms(&self) -> f64;
}

/// Wall-clock time.
pub struct SystemTime {
    origin: Instant,
}

impl SystemTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTime {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Time that only moves when told to.
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualTime {
    now: f64,
}

#[cfg(test)]
impl ManualTime {
    pub fn set(&mut self, ms: f64) {
        self.now = ms;
    }

    pub fn advance(&mut self, ms: f64) {
        self.now += ms;
    }
}

#[cfg(test)]
impl TimeSource for ManualTime {
    fn now_ms(&self) -> f64 {
        self.now
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Running,
    Paused,
    Cancelled,
}

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Not started yet; nothing happened.
    Idle,
    /// Advanced one generation, then redrew.
    Stepped,
    /// Redrew without stepping.
    Drawn,
    /// The loop is over; nothing happened.
    Cancelled,
}

/// Milliseconds that must pass between steps at `speed` steps per second.
pub fn step_interval_ms(speed: f64) -> f64 {
    1000.0 / (speed + 1.0)
}

pub struct SimulationClock<T: TimeSource> {
    time: T,
    state: State,
    last_step: f64,
}

impl<T: TimeSource> SimulationClock<T> {
    pub fn new(time: T) -> Self {
        Self {
            time,
            state: State::Idle,
            last_step: 0.0,
        }
    }

    #[cfg(test)]
    pub fn time_mut(&mut self) -> &mut T {
        &mut self.time
    }

    pub fn start(&mut self) {
        if self.state == State::Cancelled {
            warn!("ignoring start on a cancelled clock");
            return;
        }
        self.last_step = self.time.now_ms();
        self.state = State::Running;
        info!("simulation started");
    }

    pub fn pause(&mut self) {
        if self.state == State::Running {
            self.state = State::Paused;
            info!("paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state == State::Paused {
            self.state = State::Running;
            info!("unpaused");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            State::Running => self.pause(),
            State::Paused => self.resume(),
            State::Idle | State::Cancelled => {}
        }
    }

    /// Stops the loop for good. Safe to call more than once.
    pub fn cancel(&mut self) {
        if self.state != State::Cancelled {
            debug!("clock cancelled");
            self.state = State::Cancelled;
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.state == State::Paused
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        self.state == State::Cancelled
    }

    /// One loop iteration: step if enough time has passed, then draw.
    pub fn tick<S: PixelSurface>(
        &mut self,
        store: &mut GridStore,
        config: &Config,
        surface: &mut S,
    ) -> Tick {
        match self.state {
            State::Cancelled => return Tick::Cancelled,
            State::Idle => return Tick::Idle,
            State::Running | State::Paused => {}
        }

        let mut outcome = Tick::Drawn;
        if self.state == State::Running {
            let now = self.time.now_ms();
            if now - self.last_step > step_interval_ms(config.speed) {
                store.step(config);
                self.last_step = now;
                outcome = Tick::Stepped;
            }
        }

        render::draw(surface, store, config);
        outcome
    }

    /// Advances exactly one generation regardless of timing, for frame-by-frame
    /// stepping while paused.
    pub fn step_once(&mut self, store: &mut GridStore, config: &Config) {
        if self.state == State::Cancelled {
            return;
        }
        store.step(config);
        self.last_step = self.time.now_ms();
    }
}
