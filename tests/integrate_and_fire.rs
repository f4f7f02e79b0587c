#[cfg(test)]
mod tests {
    use neuron_integrators::{
        clock::SimulationClock,
        error::SimulationError,
        neuron::integrate_and_fire::{LeakyIntegrateAndFireNeuron, run_leaky_integrate_and_fire},
        stimulus::StimulusSeries,
    };


    #[test]
    pub fn test_first_spike_matches_closed_form() -> Result<(), SimulationError> {
        let neuron = LeakyIntegrateAndFireNeuron::default();
        let clock = SimulationClock::new(0.1, 10.)?;

        for current in [50., 100., 200., 500., 1000.] {
            let stimulus = StimulusSeries::constant(clock.point_count(), current);
            let trace = run_leaky_integrate_and_fire(&neuron, &clock, &stimulus)?;

            let expected = neuron.time_to_threshold(current).unwrap_or_default();
            let first = trace.spikes.first().unwrap_or_default();

            assert!(
                (first - expected).abs() <= clock.dt() + 1e-9,
                "current: {}, simulated: {}, closed form: {}", current, first, expected,
            );
        }

        Ok(())
    }

    #[test]
    pub fn test_spikes_respect_refractory_period() -> Result<(), SimulationError> {
        let neuron = LeakyIntegrateAndFireNeuron::default();
        let clock = SimulationClock::new(0.1, 50.)?;

        let triangular = StimulusSeries::triangular(clock.point_count(), 200.);
        let trace = run_leaky_integrate_and_fire(&neuron, &clock, &triangular)?;
        assert!(trace.spikes.len() > 1);
        assert!(trace.spikes.min_interval().unwrap_or_default() >= neuron.tau_ref - 1e-9);

        let constant = StimulusSeries::constant(clock.point_count(), 1000.);
        let trace = run_leaky_integrate_and_fire(&neuron, &clock, &constant)?;
        assert!(trace.spikes.len() > 1);
        assert!(trace.spikes.min_interval().unwrap_or_default() >= neuron.tau_ref - 1e-9);

        Ok(())
    }

    #[test]
    pub fn test_trace_marks_spikes_and_rests() -> Result<(), SimulationError> {
        let neuron = LeakyIntegrateAndFireNeuron::default();
        let clock = SimulationClock::new(0.1, 50.)?;
        let stimulus = StimulusSeries::constant(clock.point_count(), 500.);

        let trace = run_leaky_integrate_and_fire(&neuron, &clock, &stimulus)?;

        assert_eq!(trace.len(), clock.point_count());
        assert_eq!(trace.voltage[0], neuron.v_rest);
        assert!(!trace.spikes.is_empty());

        for time in trace.spikes.iter() {
            let index = (time / clock.dt()).round() as usize;
            assert_eq!(trace.voltage[index], neuron.v_spike);

            if index + 2 < trace.len() {
                assert_eq!(trace.voltage[index + 2], neuron.v_rest);
            }
        }

        let spiking_samples = trace.voltage.iter().filter(|i| **i == neuron.v_spike).count();
        assert_eq!(spiking_samples, trace.spikes.len());

        Ok(())
    }

    #[test]
    pub fn test_subthreshold_current_never_spikes() -> Result<(), SimulationError> {
        let neuron = LeakyIntegrateAndFireNeuron::default();
        let clock = SimulationClock::new(0.1, 50.)?;
        let stimulus = StimulusSeries::constant(clock.point_count(), 20.);

        let trace = run_leaky_integrate_and_fire(&neuron, &clock, &stimulus)?;

        assert!(trace.spikes.is_empty());
        assert_eq!(neuron.time_to_threshold(20.), None);

        let asymptote = neuron.asymptotic_voltage(20.);
        assert!(trace.voltage.iter().all(|i| *i >= neuron.v_rest && *i < asymptote));

        Ok(())
    }

    #[test]
    pub fn test_stimulus_length_mismatch() -> Result<(), SimulationError> {
        let neuron = LeakyIntegrateAndFireNeuron::default();
        let clock = SimulationClock::new(0.1, 10.)?;
        let stimulus = StimulusSeries::zeros(clock.point_count() + 1);

        assert!(run_leaky_integrate_and_fire(&neuron, &clock, &stimulus).is_err());

        Ok(())
    }

    #[test]
    pub fn test_runs_are_deterministic() -> Result<(), SimulationError> {
        let neuron = LeakyIntegrateAndFireNeuron { tau_m: 10., ..LeakyIntegrateAndFireNeuron::default() };
        let clock = SimulationClock::new(0.1, 50.)?;
        let stimulus = StimulusSeries::triangular(clock.point_count(), 300.);

        let first = run_leaky_integrate_and_fire(&neuron, &clock, &stimulus)?;
        let second = run_leaky_integrate_and_fire(&neuron, &clock, &stimulus)?;

        assert_eq!(first, second);

        Ok(())
    }
}
