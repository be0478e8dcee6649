use crate::{Grid, Random};
use log::{debug, info, trace};
use std::fmt;
use std::time::Duration;

/// Generations per second, always within `MIN..=MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Speed(u8);

impl Speed {
    pub const MIN: Speed = Speed(1);
    pub const MAX: Speed = Speed(10);

    /// Out-of-range values are clamped.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn faster(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    pub fn slower(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    pub fn tick_interval(self) -> Duration {
        Duration::from_secs(1) / u32::from(self.0)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The pacing clock fired.
    Tick,
    TogglePause,
    Restart,
    SlowDown,
    SpeedUp,
}

/// Everything the control loop knows about a running game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Simulation {
    grid: Grid,
    generation: u64,
    paused: bool,
    speed: Speed,
}

impl Simulation {
    pub fn new(rows: u32, cols: u32, speed: Speed, rand: &mut Random) -> Self {
        Self::with_grid(Grid::new_random(rows, cols, rand), speed)
    }

    pub fn with_grid(grid: Grid, speed: Speed) -> Self {
        Self {
            grid,
            generation: 0,
            paused: false,
            speed,
        }
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Returns the state that follows `event`. `self` is left as it was, so callers
    /// rebind: `sim = sim.apply(event, &mut rand)`.
    #[must_use]
    pub fn apply(&self, event: Event, rand: &mut Random) -> Simulation {
        match event {
            Event::Tick => self.tick(),
            Event::TogglePause => {
                debug!("{}", if self.paused { "resumed" } else { "paused" });
                Self {
                    paused: !self.paused,
                    ..self.clone()
                }
            }
            Event::Restart => {
                info!(
                    "restarting {}x{} grid after generation {}",
                    self.grid.rows(),
                    self.grid.cols(),
                    self.generation
                );
                Self {
                    grid: Grid::new_random(self.grid.rows(), self.grid.cols(), rand),
                    generation: 0,
                    ..self.clone()
                }
            }
            Event::SlowDown => self.with_speed(self.speed.slower()),
            Event::SpeedUp => self.with_speed(self.speed.faster()),
        }
    }

    fn tick(&self) -> Simulation {
        if self.paused {
            return self.clone();
        }
        let grid = self.grid.advance();
        let generation = self.generation + 1;
        trace!("generation {generation}: population {}", grid.population());
        Self {
            grid,
            generation,
            ..*self
        }
    }

    fn with_speed(&self, speed: Speed) -> Simulation {
        if speed != self.speed {
            debug!("speed {} -> {speed}", self.speed);
        }
        Self {
            speed,
            ..self.clone()
        }
    }
}
