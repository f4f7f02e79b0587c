//! # Neuron Integrators
//!
//! `neuron_integrators` simulates single neurons with fixed timestep
//! integration loops and records their membrane potential over time.
//! Three independent models are implemented:
//!
//! - [`neuron::hodgkin_huxley`]: sodium, potassium and leak currents with three
//!   voltage dependent gates, advanced with explicit Euler steps
//! - [`neuron::izhikevich`]: voltage and recovery variable with a hard reset
//!   and the classic named firing patterns
//! - [`neuron::integrate_and_fire`]: a leaky integrate and fire neuron advanced
//!   with the exact exponential solution and a refractory period
//!
//! Every run takes a [`clock::SimulationClock`] and a [`stimulus::StimulusSeries`]
//! of the same length and returns a trace with one value per step plus a
//! [`neuron::SpikeLog`]. Runs are pure functions of their inputs.
//!
//! ## Example Code
//!
//! ### Izhikevich neuron with a step current
//!
//! ```rust
//! use neuron_integrators::{
//!     clock::SimulationClock,
//!     error::SimulationError,
//!     neuron::izhikevich::{IzhikevichPreset, run_izhikevich},
//!     stimulus::StimulusSeries,
//! };
//!
//! fn main() -> Result<(), SimulationError> {
//!     let clock = SimulationClock::new(0.25, 200.)?;
//!     let stimulus = StimulusSeries::zeros(clock.point_count()).with_value_from(21, 15.);
//!
//!     let preset = IzhikevichPreset::RegularSpiking;
//!     let trace = run_izhikevich(&preset.neuron(), &clock, &stimulus, preset.resting_voltage())?;
//!
//!     assert_eq!(trace.len(), clock.point_count());
//!     assert!(!trace.spikes.is_empty());
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Leaky integrate and fire time to threshold
//!
//! ```rust
//! use neuron_integrators::{
//!     clock::SimulationClock,
//!     error::SimulationError,
//!     neuron::integrate_and_fire::{LeakyIntegrateAndFireNeuron, run_leaky_integrate_and_fire},
//!     stimulus::StimulusSeries,
//! };
//!
//! fn main() -> Result<(), SimulationError> {
//!     let clock = SimulationClock::new(0.1, 10.)?;
//!     let neuron = LeakyIntegrateAndFireNeuron::default();
//!     let stimulus = StimulusSeries::constant(clock.point_count(), 200.);
//!
//!     let trace = run_leaky_integrate_and_fire(&neuron, &clock, &stimulus)?;
//!     let expected = neuron.time_to_threshold(200.).unwrap();
//!
//!     assert!((trace.spikes.first().unwrap() - expected).abs() <= clock.dt());
//!
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod config;
pub mod distribution;
pub mod error;
pub mod export;
pub mod neuron;
pub mod stimulus;
pub mod sweep;
