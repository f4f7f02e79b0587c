//! Fixed timestep clock shared by every integrator run.

use ndarray::Array1;
use crate::error::ClockError;


/// A fixed timestep simulation clock, immutable once built
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    /// Timestep (ms)
    dt: f64,
    /// Total simulated time (ms)
    total_time: f64,
    /// Number of sampled points, `total_time / dt + 1`
    point_count: usize,
}

impl SimulationClock {
    /// Builds a clock covering `0..=total_time` with step `dt`, so the
    /// point count is `round(total_time / dt) + 1`
    pub fn new(dt: f64, total_time: f64) -> Result<Self, ClockError> {
        if !dt.is_finite() || dt <= 0. {
            return Err(ClockError::InvalidTimestep(dt));
        }
        if !total_time.is_finite() || total_time < 0. {
            return Err(ClockError::InvalidTotalTime(total_time));
        }

        let point_count = (total_time / dt).round() as usize + 1;

        Ok(SimulationClock { dt, total_time, point_count })
    }

    /// Builds a clock with exactly `point_count` samples spaced by `dt`
    pub fn from_point_count(dt: f64, point_count: usize) -> Result<Self, ClockError> {
        if !dt.is_finite() || dt <= 0. {
            return Err(ClockError::InvalidTimestep(dt));
        }
        if point_count == 0 {
            return Err(ClockError::EmptyClock);
        }

        Ok(SimulationClock {
            dt,
            total_time: (point_count - 1) as f64 * dt,
            point_count,
        })
    }

    /// Timestep (ms)
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Total simulated time (ms)
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Number of samples in every trace produced with this clock
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Simulated time of the given step index (ms)
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.dt
    }

    /// Time axis of the run
    pub fn times(&self) -> Array1<f64> {
        (0..self.point_count).map(|i| self.time_at(i)).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_point_count_includes_both_ends() {
        let clock = SimulationClock::new(0.25, 200.).unwrap();
        assert_eq!(clock.point_count(), 801);
        assert_eq!(clock.times().len(), 801);
        assert_eq!(clock.time_at(800), 200.);
    }

    #[test]
    fn test_from_point_count() {
        let clock = SimulationClock::from_point_count(0.05, 5000).unwrap();
        assert_eq!(clock.point_count(), 5000);
        assert!((clock.total_time() - 249.95).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_clocks() {
        assert_eq!(SimulationClock::new(0., 10.), Err(ClockError::InvalidTimestep(0.)));
        assert_eq!(SimulationClock::new(0.1, -1.), Err(ClockError::InvalidTotalTime(-1.)));
        assert_eq!(SimulationClock::from_point_count(0.1, 0), Err(ClockError::EmptyClock));
        assert!(SimulationClock::new(f64::NAN, 10.).is_err());
    }
}
