//! An implementation of the Hodgkin Huxley neuron integrated with explicit Euler steps.
//!
//! Voltages follow the classic Hodgkin Huxley convention where rest sits
//! near `0` mV (shift by `-70` mV for the modern convention).
//!
//! ```text
//! C_m * dV/dt = I - I_Na - I_K - I_leak
//! I_Na   = g_Na * m^3 * h * (V - E_Na)
//! I_K    = g_K * n^4 * (V - E_K)
//! I_leak = g_leak * (V - E_leak)
//! dx/dt  = alpha_x(V) * (1 - x) - beta_x(V) * x    for x in {m, h, n}
//! ```
//!
//! Rate constants are always computed from the voltage at the start of a step,
//! then the voltage and the three gates are advanced from that same state.

use crate::clock::SimulationClock;
use crate::error::SimulationError;
use crate::stimulus::StimulusSeries;
use super::SpikeLog;


/// A first order gating variable, the open probability of a channel subunit
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gate {
    /// Opening rate (ms^-1)
    pub alpha: f64,
    /// Closing rate (ms^-1)
    pub beta: f64,
    /// Open probability
    pub state: f64,
}

impl Gate {
    /// Builds a gate sitting at its steady state for the given rates
    pub fn new(alpha: f64, beta: f64) -> Self {
        let mut gate = Gate { alpha, beta, state: 0. };
        gate.init_state();

        gate
    }

    /// Sets the state to `alpha / (alpha + beta)`
    pub fn init_state(&mut self) {
        self.state = self.alpha / (self.alpha + self.beta);
    }

    /// Rate of change of the state under the current rates
    pub fn derivative(&self) -> f64 {
        self.alpha * (1. - self.state) - self.beta * self.state
    }

    /// Advances the state by one explicit Euler step
    pub fn update(&mut self, dt: f64) {
        self.state += dt * self.derivative();
    }
}

/// Evaluates `x / (exp(x / y) - 1)`, which has a removable singularity at
/// `x = 0` where its limit is `y`
fn vtrap(x: f64, y: f64) -> f64 {
    let ratio = x / y;
    if ratio.abs() < 1e-6 {
        y * (1. - ratio / 2.)
    } else {
        x / (ratio.exp() - 1.)
    }
}

/// Ionic currents computed during a single step (uA/cm^2)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IonicCurrents {
    /// Sodium current
    pub sodium: f64,
    /// Potassium current
    pub potassium: f64,
    /// Leak current
    pub leak: f64,
    /// Stimulus minus every ionic current
    pub net: f64,
}

/// Voltage and gating state of a Hodgkin Huxley neuron
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HodgkinHuxleyState {
    /// Membrane potential (mV)
    pub current_voltage: f64,
    /// Sodium activation gate
    pub m: Gate,
    /// Sodium inactivation gate
    pub h: Gate,
    /// Potassium activation gate
    pub n: Gate,
}

/// Parameters of a Hodgkin Huxley neuron
#[derive(Debug, Clone, PartialEq)]
pub struct HodgkinHuxleyNeuron {
    /// Membrane capacitance (uF/cm^2)
    pub c_m: f64,
    /// Sodium reversal potential (mV)
    pub e_na: f64,
    /// Potassium reversal potential (mV)
    pub e_k: f64,
    /// Leak reversal potential (mV)
    pub e_k_leak: f64,
    /// Maximum sodium conductance (mS/cm^2)
    pub g_na: f64,
    /// Maximum potassium conductance (mS/cm^2)
    pub g_k: f64,
    /// Leak conductance (mS/cm^2)
    pub g_k_leak: f64,
    /// Voltage threshold used when detecting spike peaks (mV)
    pub v_th: f64,
}

impl Default for HodgkinHuxleyNeuron {
    fn default() -> Self {
        HodgkinHuxleyNeuron {
            c_m: 1.,
            e_na: 115.,
            e_k: -12.,
            e_k_leak: 10.6,
            g_na: 120.,
            g_k: 36.,
            g_k_leak: 0.3,
            v_th: 60.,
        }
    }
}

// https://github.com/swharden/pyHH/blob/master/src/pyhh/models.py
impl HodgkinHuxleyNeuron {
    /// Recomputes every gate's rate constants at the given voltage
    pub fn update_gate_time_constants(state: &mut HodgkinHuxleyState, voltage: f64) {
        state.n.alpha = 0.01 * vtrap(10. - voltage, 10.);
        state.n.beta = 0.125 * (-voltage / 80.).exp();
        state.m.alpha = 0.1 * vtrap(25. - voltage, 10.);
        state.m.beta = 4. * (-voltage / 18.).exp();
        state.h.alpha = 0.07 * (-voltage / 20.).exp();
        state.h.beta = 1. / (((30. - voltage) / 10.).exp() + 1.);
    }

    /// Sets the voltage and places every gate at its steady state for that voltage
    pub fn initialize(&self, resting_voltage: f64) -> HodgkinHuxleyState {
        let mut rates = HodgkinHuxleyState {
            current_voltage: resting_voltage,
            m: Gate::default(),
            h: Gate::default(),
            n: Gate::default(),
        };
        HodgkinHuxleyNeuron::update_gate_time_constants(&mut rates, resting_voltage);

        HodgkinHuxleyState {
            current_voltage: resting_voltage,
            m: Gate::new(rates.m.alpha, rates.m.beta),
            h: Gate::new(rates.h.alpha, rates.h.beta),
            n: Gate::new(rates.n.alpha, rates.n.beta),
        }
    }

    /// Ionic currents of the given state under a stimulus
    pub fn ionic_currents(&self, state: &HodgkinHuxleyState, input_current: f64) -> IonicCurrents {
        let voltage = state.current_voltage;

        let sodium = state.m.state.powi(3) * self.g_na * state.h.state * (voltage - self.e_na);
        let potassium = state.n.state.powi(4) * self.g_k * (voltage - self.e_k);
        let leak = self.g_k_leak * (voltage - self.e_k_leak);
        let net = input_current - sodium - potassium - leak;

        IonicCurrents { sodium, potassium, leak, net }
    }

    /// Total ionic current with every gate at steady state for the voltage,
    /// resting potentials are the roots of this function
    pub fn steady_state_current(&self, voltage: f64) -> f64 {
        let currents = self.ionic_currents(&self.initialize(voltage), 0.);

        currents.sodium + currents.potassium + currents.leak
    }

    /// Advances the neuron by one timestep, returns the new state and the
    /// currents computed from the old state
    pub fn step(
        &self,
        state: &HodgkinHuxleyState,
        input_current: f64,
        dt: f64,
    ) -> (HodgkinHuxleyState, IonicCurrents) {
        let mut next = *state;

        HodgkinHuxleyNeuron::update_gate_time_constants(&mut next, state.current_voltage);

        let currents = self.ionic_currents(&next, input_current);
        next.current_voltage += dt * currents.net / self.c_m;

        next.m.update(dt);
        next.h.update(dt);
        next.n.update(dt);

        (next, currents)
    }
}

/// Recorded state variables and currents of a Hodgkin Huxley run, every
/// vector has one value per stimulus step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HodgkinHuxleyTrace {
    /// Membrane potential after each step (mV)
    pub voltage: Vec<f64>,
    /// Sodium activation after each step
    pub m: Vec<f64>,
    /// Sodium inactivation after each step
    pub h: Vec<f64>,
    /// Potassium activation after each step
    pub n: Vec<f64>,
    /// Sodium current of each step
    pub sodium: Vec<f64>,
    /// Potassium current of each step
    pub potassium: Vec<f64>,
    /// Leak current of each step
    pub leak: Vec<f64>,
    /// Net current of each step
    pub net: Vec<f64>,
    /// Times of voltage peaks above the threshold
    pub spikes: SpikeLog,
}

impl HodgkinHuxleyTrace {
    fn with_capacity(capacity: usize) -> Self {
        HodgkinHuxleyTrace {
            voltage: Vec::with_capacity(capacity),
            m: Vec::with_capacity(capacity),
            h: Vec::with_capacity(capacity),
            n: Vec::with_capacity(capacity),
            sodium: Vec::with_capacity(capacity),
            potassium: Vec::with_capacity(capacity),
            leak: Vec::with_capacity(capacity),
            net: Vec::with_capacity(capacity),
            spikes: SpikeLog::new(),
        }
    }

    fn record(&mut self, state: &HodgkinHuxleyState, currents: &IonicCurrents) {
        self.voltage.push(state.current_voltage);
        self.m.push(state.m.state);
        self.h.push(state.h.state);
        self.n.push(state.n.state);
        self.sodium.push(currents.sodium);
        self.potassium.push(currents.potassium);
        self.leak.push(currents.leak);
        self.net.push(currents.net);
    }

    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }
}

/// Initializes the neuron at `resting_voltage` and steps it once per stimulus
/// value, a spike is logged when the voltage is above `v_th` and has just
/// stopped increasing
pub fn run_hodgkin_huxley(
    neuron: &HodgkinHuxleyNeuron,
    clock: &SimulationClock,
    stimulus: &StimulusSeries,
    resting_voltage: f64,
) -> Result<HodgkinHuxleyTrace, SimulationError> {
    stimulus.check_length(clock.point_count())?;

    let mut trace = HodgkinHuxleyTrace::with_capacity(stimulus.len());
    let mut state = neuron.initialize(resting_voltage);
    let mut was_increasing = false;

    for (i, input_current) in stimulus.iter().enumerate() {
        let last_voltage = state.current_voltage;
        let (next, currents) = neuron.step(&state, *input_current, clock.dt());
        state = next;

        let increasing_right_now = last_voltage < state.current_voltage;
        let threshold_crossed = state.current_voltage > neuron.v_th;
        if threshold_crossed && was_increasing && !increasing_right_now {
            trace.spikes.push(clock.time_at(i));
        }
        was_increasing = increasing_right_now;

        trace.record(&state, &currents);
    }

    log::debug!(
        "Hodgkin Huxley run finished: {} steps, {} spikes",
        trace.len(),
        trace.spikes.len(),
    );

    Ok(trace)
}

#[cfg(test)]
mod test {
    use super::{Gate, vtrap};

    #[test]
    fn test_new_gate_is_at_steady_state() {
        let gate = Gate::new(0.3, 0.1);
        assert!((gate.state - 0.75).abs() < 1e-12);
        assert!(gate.derivative().abs() < 1e-12);
    }

    #[test]
    fn test_vtrap_limit() {
        assert_eq!(vtrap(0., 10.), 10.);
        assert!((vtrap(1e-9, 10.) - 10.).abs() < 1e-8);
        let expected = 1. / (0.1_f64.exp() - 1.);
        assert!((vtrap(1., 10.) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_vtrap_is_continuous_around_singularity() {
        let below = vtrap(-1e-5, 10.);
        let above = vtrap(1e-5, 10.);
        assert!((below - above).abs() < 1e-4);
        assert!(below.is_finite() && above.is_finite());
    }
}
