//! World clock, configuration loading, and the simulation driver for the
//! colony simulation.
//!
//! This crate is the top of the dependency stack: it owns the pieces that
//! turn `colonysim-agents` systems and a `colonysim-world` grid into a
//! runnable simulation.
//!
//! # Modules
//!
//! - [`clock`] -- the [`clock::WorldClock`], deriving calendar time from
//!   accumulated real-time deltas rather than a tick counter.
//! - [`config`] -- loads the whole [`config::SimulationConfig`] document
//!   from one YAML file.
//! - [`driver`] -- the [`driver::SimulationDriver`], which owns every
//!   system's state and steps the fixed tick order.

pub mod clock;
pub mod config;
pub mod driver;

pub use clock::{ClockError, TimeConfig, WorldClock};
pub use config::{ConfigError, SimulationConfig};
pub use driver::{ControllerCommand, SimError, SimulationDriver, TickSummary};
