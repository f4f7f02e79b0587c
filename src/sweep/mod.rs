//! Independent parameter sweeps. Runs share no state, so each sweep is
//! evaluated in parallel; results always come back in input order.

use ndarray::Array1;
use rayon::prelude::*;
use crate::clock::SimulationClock;
use crate::error::SimulationError;
use crate::neuron::{
    integrate_and_fire::{LeakyIntegrateAndFireNeuron, run_leaky_integrate_and_fire},
    izhikevich::{IzhikevichPreset, IzhikevichTrace, run_izhikevich},
};
use crate::stimulus::StimulusSeries;


/// Runs every preset from its own resting voltage, using the preset's
/// stimulus override when it has one and `default_stimulus` otherwise
pub fn izhikevich_preset_sweep(
    presets: &[IzhikevichPreset],
    clock: &SimulationClock,
    default_stimulus: &StimulusSeries,
) -> Result<Vec<(IzhikevichPreset, IzhikevichTrace)>, SimulationError> {
    presets.par_iter()
        .map(|preset| -> Result<_, SimulationError> {
            let stimulus = preset.stimulus_or(default_stimulus);
            let trace = run_izhikevich(&preset.neuron(), clock, &stimulus, preset.resting_voltage())?;
            log::info!("{}: {} spikes", preset, trace.spikes.len());

            Ok((*preset, trace))
        })
        .collect()
}

/// Evenly spaced stimulus amplitudes, inclusive of both ends
pub fn current_axis(min: f64, max: f64, count: usize) -> Array1<f64> {
    Array1::linspace(min, max, count)
}

/// Firing rate against stimulus amplitude for one membrane time constant
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyCurve {
    /// Membrane time constant used for the whole curve (ms)
    pub tau_m: f64,
    /// Peak amplitude of each triangular stimulus (uA)
    pub currents: Vec<f64>,
    /// Spikes per second for each amplitude (Hz)
    pub rates: Vec<f64>,
}

/// Builds one I-f curve per time constant, driving the neuron with a
/// triangular stimulus of each amplitude
pub fn current_frequency_curve(
    neuron: &LeakyIntegrateAndFireNeuron,
    tau_ms: &[f64],
    currents: &Array1<f64>,
    clock: &SimulationClock,
) -> Result<Vec<FrequencyCurve>, SimulationError> {
    let runs: Vec<(f64, f64)> = tau_ms.iter()
        .flat_map(|tau_m| currents.iter().map(move |current| (*tau_m, *current)))
        .collect();

    let rates: Vec<f64> = runs.par_iter()
        .map(|(tau_m, current)| -> Result<f64, SimulationError> {
            let neuron = LeakyIntegrateAndFireNeuron { tau_m: *tau_m, ..*neuron };
            let stimulus = StimulusSeries::triangular(clock.point_count(), *current);
            let trace = run_leaky_integrate_and_fire(&neuron, clock, &stimulus)?;

            Ok(trace.spikes.firing_rate(clock.total_time()))
        })
        .collect::<Result<_, _>>()?;

    let count = currents.len();
    let curves = tau_ms.iter()
        .enumerate()
        .map(|(n, tau_m)| FrequencyCurve {
            tau_m: *tau_m,
            currents: currents.to_vec(),
            rates: rates[n * count..(n + 1) * count].to_vec(),
        })
        .collect();

    Ok(curves)
}

/// Analytic and simulated time from rest to the first spike
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdComparison {
    /// Stimulus amplitude (uA)
    pub current: f64,
    /// Closed form time to threshold (ms)
    pub closed_form: Option<f64>,
    /// First spike of a simulated run with constant stimulus (ms)
    pub simulated: Option<f64>,
}

impl ThresholdComparison {
    /// Absolute difference between the two times, `None` unless both exist
    pub fn error(&self) -> Option<f64> {
        match (self.closed_form, self.simulated) {
            (Some(closed_form), Some(simulated)) => Some((closed_form - simulated).abs()),
            _ => None,
        }
    }
}

/// Compares the closed form time to threshold with a simulated run under
/// each constant current
pub fn time_to_threshold_comparison(
    neuron: &LeakyIntegrateAndFireNeuron,
    currents: &[f64],
    clock: &SimulationClock,
) -> Result<Vec<ThresholdComparison>, SimulationError> {
    currents.par_iter()
        .map(|current| -> Result<_, SimulationError> {
            let stimulus = StimulusSeries::constant(clock.point_count(), *current);
            let trace = run_leaky_integrate_and_fire(neuron, clock, &stimulus)?;

            Ok(ThresholdComparison {
                current: *current,
                closed_form: neuron.time_to_threshold(*current),
                simulated: trace.spikes.first(),
            })
        })
        .collect()
}
