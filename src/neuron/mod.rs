//! Single neuron integrators and the spike log they share.
//!
//! Each model lives in its own module and has its own state, parameters and
//! trace type. The models do not share a neuron trait, every integrator is a
//! plain value type with an `initialize` and a `step` function plus a `run_*`
//! function that drives it over a whole [`StimulusSeries`](crate::stimulus::StimulusSeries).

pub mod hodgkin_huxley;
pub mod izhikevich;
pub mod integrate_and_fire;

/// Ordered, append-only list of spike timestamps (ms)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpikeLog {
    times: Vec<f64>,
}

impl SpikeLog {
    pub fn new() -> Self {
        SpikeLog::default()
    }

    /// Appends a spike time, returns `false` and leaves the log untouched if the
    /// time is not strictly later than the last logged spike
    pub fn push(&mut self, time: f64) -> bool {
        if let Some(last) = self.times.last() {
            if time <= *last {
                log::warn!("Rejected spike at {} ms, last spike was at {} ms", time, last);
                return false;
            }
        }

        log::trace!("Spike at {} ms", time);
        self.times.push(time);

        true
    }

    /// First spike time, `None` if the neuron never spiked
    pub fn first(&self) -> Option<f64> {
        self.times.first().copied()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.times.iter()
    }

    /// Spikes per second given the simulated duration in ms
    pub fn firing_rate(&self, total_time: f64) -> f64 {
        if total_time <= 0. {
            return 0.;
        }

        self.times.len() as f64 / (total_time * 1e-3)
    }

    /// Smallest gap between two consecutive spikes, `None` with fewer than two
    pub fn min_interval(&self) -> Option<f64> {
        self.times.windows(2)
            .map(|pair| pair[1] - pair[0])
            .reduce(f64::min)
    }
}

#[cfg(test)]
mod test {
    use super::SpikeLog;

    #[test]
    fn test_spike_log_is_strictly_increasing() {
        let mut spikes = SpikeLog::new();
        assert!(spikes.push(1.));
        assert!(spikes.push(2.5));
        assert!(!spikes.push(2.5));
        assert!(!spikes.push(0.5));
        assert_eq!(spikes.times(), &[1., 2.5]);
        assert_eq!(spikes.min_interval(), Some(1.5));
    }

    #[test]
    fn test_empty_spike_log() {
        let spikes = SpikeLog::new();
        assert_eq!(spikes.first(), None);
        assert_eq!(spikes.min_interval(), None);
        assert_eq!(spikes.firing_rate(50.), 0.);
    }

    #[test]
    fn test_firing_rate() {
        let mut spikes = SpikeLog::new();
        (0..5).for_each(|i| { spikes.push(i as f64 * 10.); });
        assert_eq!(spikes.firing_rate(50.), 100.);
    }
}
