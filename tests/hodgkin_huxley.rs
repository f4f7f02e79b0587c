#[cfg(test)]
mod tests {
    use neuron_integrators::{
        clock::SimulationClock,
        error::{SimulationError, StimulusError},
        neuron::hodgkin_huxley::{HodgkinHuxleyNeuron, run_hodgkin_huxley},
        stimulus::StimulusSeries,
    };


    fn find_resting_voltage(neuron: &HodgkinHuxleyNeuron) -> f64 {
        let (mut low, mut high) = (-5., 5.);
        for _ in 0..200 {
            let mid = (low + high) / 2.;
            if neuron.steady_state_current(mid) < 0. {
                low = mid;
            } else {
                high = mid;
            }
        }

        (low + high) / 2.
    }

    #[test]
    pub fn test_gates_start_at_steady_state() -> Result<(), SimulationError> {
        let neuron = HodgkinHuxleyNeuron::default();

        for voltage in [-20., -5., 0., 10., 25., 40.] {
            let state = neuron.initialize(voltage);

            for gate in [state.m, state.h, state.n] {
                assert!(gate.derivative().abs() < 1e-12, "voltage: {}, gate: {:?}", voltage, gate);
                assert!(gate.state > 0. && gate.state < 1.);
            }
        }

        Ok(())
    }

    #[test]
    pub fn test_resting_voltage_is_stationary() -> Result<(), SimulationError> {
        let neuron = HodgkinHuxleyNeuron::default();
        let resting_voltage = find_resting_voltage(&neuron);
        assert!(neuron.steady_state_current(-5.) < 0.);
        assert!(neuron.steady_state_current(5.) > 0.);

        let mut state = neuron.initialize(resting_voltage);
        for _ in 0..10000 {
            state = neuron.step(&state, 0., 0.05).0;
        }

        assert!(
            (state.current_voltage - resting_voltage).abs() < 1e-6,
            "{} drifted from {}", state.current_voltage, resting_voltage,
        );

        Ok(())
    }

    #[test]
    pub fn test_step_uses_previous_voltage() -> Result<(), SimulationError> {
        let neuron = HodgkinHuxleyNeuron::default();
        let state = neuron.initialize(0.);
        let dt = 0.05;

        let (next, currents) = neuron.step(&state, 10., dt);

        let expected = neuron.ionic_currents(&state, 10.);
        assert_eq!(currents, expected);
        assert!((next.current_voltage - (state.current_voltage + dt * expected.net / neuron.c_m)).abs() < 1e-12);

        let expected_m = state.m.state + dt * state.m.derivative();
        assert!((next.m.state - expected_m).abs() < 1e-12);

        Ok(())
    }

    #[test]
    pub fn test_step_current_elicits_spikes() -> Result<(), SimulationError> {
        let neuron = HodgkinHuxleyNeuron::default();
        let clock = SimulationClock::from_point_count(0.05, 5000)?;
        let stimulus = StimulusSeries::step(clock.point_count(), 2000, 3000, 10.);

        let trace = run_hodgkin_huxley(&neuron, &clock, &stimulus, 0.)?;

        assert_eq!(trace.len(), 5000);
        assert_eq!(trace.m.len(), 5000);
        assert_eq!(trace.net.len(), 5000);
        assert!(trace.spikes.len() >= 2, "spikes: {:?}", trace.spikes.times());

        let first = trace.spikes.first().unwrap_or_default();
        assert!(first >= 100. && first < 150., "first spike: {}", first);

        for time in trace.spikes.iter() {
            let index = (time / clock.dt()).round() as usize;
            assert!(trace.voltage[index] > neuron.v_th);
        }

        assert!(trace.voltage.iter().all(|i| i.is_finite()));

        Ok(())
    }

    #[test]
    pub fn test_gate_states_stay_bounded() -> Result<(), SimulationError> {
        let neuron = HodgkinHuxleyNeuron::default();
        let clock = SimulationClock::from_point_count(0.05, 5000)?;
        let stimulus = StimulusSeries::step(clock.point_count(), 2000, 3000, 10.);

        let trace = run_hodgkin_huxley(&neuron, &clock, &stimulus, 0.)?;
        assert!(!trace.spikes.is_empty());

        for (name, states) in [("m", &trace.m), ("h", &trace.h), ("n", &trace.n)] {
            assert_eq!(states.len(), 5000);
            for (i, state) in states.iter().enumerate() {
                assert!((0.0..=1.0).contains(state), "{} at step {}: {}", name, i, state);
            }
        }

        Ok(())
    }

    #[test]
    pub fn test_rate_singularities_are_finite() -> Result<(), SimulationError> {
        let neuron = HodgkinHuxleyNeuron::default();

        for voltage in [10., 25.] {
            let state = neuron.initialize(voltage);
            for gate in [state.m, state.h, state.n] {
                assert!(gate.alpha.is_finite() && gate.beta.is_finite());
                assert!(gate.state.is_finite());
            }

            let (next, currents) = neuron.step(&state, 0., 0.05);
            assert!(next.current_voltage.is_finite());
            assert!(currents.net.is_finite());
        }

        let below = neuron.initialize(25. - 1e-9);
        let at = neuron.initialize(25.);
        assert!((below.m.alpha - at.m.alpha).abs() < 1e-6);

        Ok(())
    }

    #[test]
    pub fn test_stimulus_length_mismatch() -> Result<(), SimulationError> {
        let neuron = HodgkinHuxleyNeuron::default();
        let clock = SimulationClock::from_point_count(0.05, 100)?;
        let stimulus = StimulusSeries::zeros(99);

        match run_hodgkin_huxley(&neuron, &clock, &stimulus, 0.) {
            Err(SimulationError::StimulusRelatedError(StimulusError::LengthMismatch { expected, actual })) => {
                assert_eq!(expected, 100);
                assert_eq!(actual, 99);
            },
            other => panic!("unexpected result: {:?}", other),
        }

        Ok(())
    }

    #[test]
    pub fn test_runs_are_deterministic() -> Result<(), SimulationError> {
        let neuron = HodgkinHuxleyNeuron::default();
        let clock = SimulationClock::from_point_count(0.05, 3000)?;
        let stimulus = StimulusSeries::step(clock.point_count(), 500, 2500, 10.);

        let first = run_hodgkin_huxley(&neuron, &clock, &stimulus, 0.)?;
        let second = run_hodgkin_huxley(&neuron, &clock, &stimulus, 0.)?;

        assert_eq!(first, second);

        Ok(())
    }
}
