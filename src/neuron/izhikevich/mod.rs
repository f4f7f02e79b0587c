//! An Izhikevich neuron with a hard reset on spike and the named firing
//! patterns from Izhikevich (2003).

use std::{fmt::{self, Display, Formatter}, str::FromStr};
use crate::clock::SimulationClock;
use crate::error::{ConfigError, SimulationError};
use crate::stimulus::StimulusSeries;
use super::SpikeLog;


/// Voltage and recovery variable of an Izhikevich neuron
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IzhikevichState {
    /// Membrane potential (mV)
    pub current_voltage: f64,
    /// Recovery variable
    pub recovery: f64,
}

/// An Izhikevich neuron
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IzhikevichNeuron {
    /// Time scale of the recovery variable
    pub a: f64,
    /// Sensitivity of the recovery variable to voltage
    pub b: f64,
    /// After spike reset value for voltage (mV)
    pub c: f64,
    /// After spike increment of the recovery variable
    pub d: f64,
    /// Spike cutoff, also the voltage recorded on a spike (mV)
    pub v_spike: f64,
}

impl Default for IzhikevichNeuron {
    fn default() -> Self {
        IzhikevichPreset::RegularSpiking.neuron()
    }
}

impl IzhikevichNeuron {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        IzhikevichNeuron { a, b, c, d, v_spike: 30. }
    }

    /// Sets the voltage and starts the recovery variable at `b * v`
    pub fn initialize(&self, resting_voltage: f64) -> IzhikevichState {
        IzhikevichState {
            current_voltage: resting_voltage,
            recovery: self.b * resting_voltage,
        }
    }

    /// Calculates the change in voltage given an input current
    pub fn izhikevich_get_dv_change(&self, state: &IzhikevichState, i: f64, dt: f64) -> f64 {
        let v = state.current_voltage;

        dt * (0.04 * v.powi(2) + 5. * v + 140. - state.recovery + i)
    }

    /// Calculates how the recovery variable changes
    pub fn izhikevich_get_du_change(&self, state: &IzhikevichState, dt: f64) -> f64 {
        dt * self.a * (self.b * state.current_voltage - state.recovery)
    }

    /// Advances the neuron by one timestep and applies the reset if the
    /// tentative voltage went past the spike cutoff, returns whether it spiked
    pub fn step(&self, state: &IzhikevichState, input_current: f64, dt: f64) -> (IzhikevichState, bool) {
        let mut next = *state;

        next.current_voltage += self.izhikevich_get_dv_change(&next, input_current, dt);
        // recovery sees the voltage that was just updated
        next.recovery += self.izhikevich_get_du_change(&next, dt);

        if next.current_voltage > self.v_spike {
            next.current_voltage = self.c;
            next.recovery += self.d;

            return (next, true);
        }

        (next, false)
    }

    /// Voltage recorded for a step, the spike value if it spiked
    pub fn output_voltage(&self, state: &IzhikevichState, is_spiking: bool) -> f64 {
        if is_spiking {
            self.v_spike
        } else {
            state.current_voltage
        }
    }
}

/// Named Izhikevich firing patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IzhikevichPreset {
    RegularSpiking,
    Chattering,
    FastSpiking,
    IntrinsicallyBursting,
    LowThresholdSpiking,
    ThalamoCorticalTonic,
    ThalamoCorticalBurst,
    Resonator,
}

impl IzhikevichPreset {
    /// Every preset in plotting order
    pub const ALL: [IzhikevichPreset; 8] = [
        IzhikevichPreset::RegularSpiking,
        IzhikevichPreset::Chattering,
        IzhikevichPreset::FastSpiking,
        IzhikevichPreset::IntrinsicallyBursting,
        IzhikevichPreset::LowThresholdSpiking,
        IzhikevichPreset::ThalamoCorticalTonic,
        IzhikevichPreset::ThalamoCorticalBurst,
        IzhikevichPreset::Resonator,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IzhikevichPreset::RegularSpiking => "Regular Spiking",
            IzhikevichPreset::Chattering => "Chattering",
            IzhikevichPreset::FastSpiking => "Fast Spiking",
            IzhikevichPreset::IntrinsicallyBursting => "Intrinsically Bursting",
            IzhikevichPreset::LowThresholdSpiking => "Low-Threshold Spiking",
            IzhikevichPreset::ThalamoCorticalTonic => "Thalamo-Cortical Tonic",
            IzhikevichPreset::ThalamoCorticalBurst => "Thalamo-Cortical Burst",
            IzhikevichPreset::Resonator => "Resonator",
        }
    }

    /// `(a, b, c, d)`
    pub fn parameters(&self) -> (f64, f64, f64, f64) {
        match self {
            IzhikevichPreset::RegularSpiking => (0.02, 0.2, -65., 8.),
            IzhikevichPreset::Chattering => (0.02, 0.2, -50., 2.),
            IzhikevichPreset::FastSpiking => (0.1, 0.2, -65., 2.),
            IzhikevichPreset::IntrinsicallyBursting => (0.02, 0.2, -55., 4.),
            IzhikevichPreset::LowThresholdSpiking => (0.02, 0.25, -65., 2.),
            IzhikevichPreset::ThalamoCorticalTonic => (0.02, 0.25, -65., 0.05),
            IzhikevichPreset::ThalamoCorticalBurst => (0.02, 0.25, -65., 0.05),
            IzhikevichPreset::Resonator => (0.1, 0.26, -65., 2.),
        }
    }

    /// Initial membrane potential (mV)
    pub fn resting_voltage(&self) -> f64 {
        match self {
            IzhikevichPreset::ThalamoCorticalTonic => -63.,
            IzhikevichPreset::ThalamoCorticalBurst => -87.,
            IzhikevichPreset::Resonator => -60.,
            _ => -70.,
        }
    }

    pub fn neuron(&self) -> IzhikevichNeuron {
        let (a, b, c, d) = self.parameters();

        IzhikevichNeuron::new(a, b, c, d)
    }

    /// Stimulus this preset needs instead of the default one, `None` if the
    /// default stimulus applies
    pub fn stimulus_override(&self, len: usize) -> Option<StimulusSeries> {
        match self {
            IzhikevichPreset::ThalamoCorticalTonic => Some(
                StimulusSeries::zeros(len).with_value_from(60, 1.)
            ),
            IzhikevichPreset::ThalamoCorticalBurst => Some(
                StimulusSeries::constant(len, -1.).with_value_from(160, 0.5)
            ),
            IzhikevichPreset::Resonator => Some(
                StimulusSeries::constant(len, 0.25).with_window(400, 420, 3.)
            ),
            _ => None,
        }
    }

    /// Picks the override if there is one, otherwise the given default
    pub fn stimulus_or(&self, default: &StimulusSeries) -> StimulusSeries {
        self.stimulus_override(default.len())
            .unwrap_or_else(|| default.clone())
    }
}

impl Display for IzhikevichPreset {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for IzhikevichPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");

        IzhikevichPreset::ALL.iter()
            .find(|preset| preset.name().to_lowercase().replace('-', " ") == normalized)
            .copied()
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

/// Recorded output of an Izhikevich run, one value per stimulus step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IzhikevichTrace {
    /// Recorded voltage, the spike value on spiking steps (mV)
    pub voltage: Vec<f64>,
    /// Recovery variable after each step, after the reset increment on spikes
    pub recovery: Vec<f64>,
    /// Spike times (ms)
    pub spikes: SpikeLog,
}

impl IzhikevichTrace {
    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }
}

/// Initializes the neuron at `resting_voltage` and steps it once per stimulus value
pub fn run_izhikevich(
    neuron: &IzhikevichNeuron,
    clock: &SimulationClock,
    stimulus: &StimulusSeries,
    resting_voltage: f64,
) -> Result<IzhikevichTrace, SimulationError> {
    stimulus.check_length(clock.point_count())?;

    let mut trace = IzhikevichTrace {
        voltage: Vec::with_capacity(stimulus.len()),
        recovery: Vec::with_capacity(stimulus.len()),
        spikes: SpikeLog::new(),
    };
    let mut state = neuron.initialize(resting_voltage);

    for (i, input_current) in stimulus.iter().enumerate() {
        let (next, is_spiking) = neuron.step(&state, *input_current, clock.dt());
        state = next;

        if is_spiking {
            trace.spikes.push(clock.time_at(i));
        }

        trace.voltage.push(neuron.output_voltage(&state, is_spiking));
        trace.recovery.push(state.recovery);
    }

    log::debug!("Izhikevich run finished: {} steps, {} spikes", trace.len(), trace.spikes.len());

    Ok(trace)
}
