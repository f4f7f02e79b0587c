//! Parsing of `.toml` run descriptions.
//!
//! Every table is optional and describes one run:
//!
//! ```toml
//! [hodgkin_huxley]
//! filename = "hodgkin_huxley.csv"
//! dt = 0.05
//! iterations = 5000
//! stimulus = { type = "step", amplitude = 10.0, start = 2000, end = 3000 }
//!
//! [izhikevich]
//! dt = 0.25
//! total_time = 200
//! presets = ["Regular Spiking", "Resonator"]
//!
//! [leaky_integrate_and_fire]
//! dt = 0.1
//! total_time = 50
//! stimulus = { type = "triangular", amplitude = 200.0 }
//! ```
//!
//! Time is always given by `dt` plus exactly one of `iterations` (number of
//! points) or `total_time` (ms).

use rand::Rng;
use toml::Value;
use crate::clock::SimulationClock;
use crate::distribution::GaussianParameters;
use crate::error::{ConfigError, SimulationError};
use crate::neuron::{
    hodgkin_huxley::HodgkinHuxleyNeuron,
    integrate_and_fire::LeakyIntegrateAndFireNeuron,
    izhikevich::IzhikevichPreset,
};
use crate::stimulus::StimulusSeries;


fn invalid_type(field_name: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidType { field: field_name.to_string(), expected }
}

pub fn parse_usize(value: &Value, field_name: &str) -> Result<usize, ConfigError> {
    value
        .as_integer()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| invalid_type(field_name, "unsigned integer"))
}

/// Parses floats, integers are accepted and widened
pub fn parse_f64(value: &Value, field_name: &str) -> Result<f64, ConfigError> {
    value
        .as_float()
        .or_else(|| value.as_integer().map(|v| v as f64))
        .ok_or_else(|| invalid_type(field_name, "float"))
}

pub fn parse_string(value: &Value, field_name: &str) -> Result<String, ConfigError> {
    value
        .as_str()
        .ok_or_else(|| invalid_type(field_name, "string"))
        .map(String::from)
}

pub fn parse_f64_array(value: &Value, field_name: &str) -> Result<Vec<f64>, ConfigError> {
    value
        .as_array()
        .ok_or_else(|| invalid_type(field_name, "array of floats"))?
        .iter()
        .map(|i| parse_f64(i, field_name))
        .collect()
}

pub fn parse_value_with_default<T>(
    table: &Value,
    key: &str,
    parser: impl Fn(&Value, &str) -> Result<T, ConfigError>,
    default: T,
) -> Result<T, ConfigError> {
    table
        .get(key)
        .map_or(Ok(default), |value| parser(value, key))
}

/// Reads `dt` and exactly one of `iterations` or `total_time`
pub fn get_clock(table: &Value, default_dt: f64) -> Result<SimulationClock, SimulationError> {
    let dt = parse_value_with_default(table, "dt", parse_f64, default_dt)?;
    log::info!("dt: {}", dt);

    let clock = match (table.get("iterations"), table.get("total_time")) {
        (Some(_), Some(_)) => return Err(ConfigError::ConflictingDuration.into()),
        (Some(value), None) => SimulationClock::from_point_count(dt, parse_usize(value, "iterations")?)?,
        (None, Some(value)) => SimulationClock::new(dt, parse_f64(value, "total_time")?)?,
        (None, None) => return Err(ConfigError::MissingDuration.into()),
    };
    log::info!("iterations: {}", clock.point_count());

    Ok(clock)
}

macro_rules! override_f64_fields {
    ($table:expr, $target:expr, $($field:ident),+ $(,)?) => {
        $(
            $target.$field = parse_value_with_default(
                $table, stringify!($field), parse_f64, $target.$field
            )?;
        )+
    };
}

/// How to build the stimulus series of a run
#[derive(Debug, Clone, PartialEq)]
pub enum StimulusShape {
    Zeros,
    Constant { amplitude: f64 },
    /// `amplitude` on `start..end`, `end` defaults to the end of the run
    Step { amplitude: f64, start: usize, end: Option<usize> },
    Triangular { amplitude: f64 },
}

/// Stimulus shape plus optional multiplicative noise
#[derive(Debug, Clone, PartialEq)]
pub struct StimulusConfig {
    pub shape: StimulusShape,
    pub noise: Option<GaussianParameters>,
}

impl StimulusConfig {
    pub fn new(shape: StimulusShape) -> Self {
        StimulusConfig { shape, noise: None }
    }

    /// Reads the optional `stimulus` inline table, falling back to `default`
    pub fn from_table(table: &Value, default: StimulusShape) -> Result<Self, ConfigError> {
        let stimulus_table = match table.get("stimulus") {
            Some(value) => value,
            None => return Ok(StimulusConfig::new(default)),
        };

        let kind = parse_value_with_default(stimulus_table, "type", parse_string, String::from("step"))?;
        let amplitude = parse_value_with_default(stimulus_table, "amplitude", parse_f64, 0.)?;

        let shape = match kind.to_lowercase().as_str() {
            "zeros" | "none" => StimulusShape::Zeros,
            "constant" => StimulusShape::Constant { amplitude },
            "step" => StimulusShape::Step {
                amplitude,
                start: parse_value_with_default(stimulus_table, "start", parse_usize, 0)?,
                end: match stimulus_table.get("end") {
                    Some(value) => Some(parse_usize(value, "end")?),
                    None => None,
                },
            },
            "triangular" => StimulusShape::Triangular { amplitude },
            _ => return Err(ConfigError::UnknownStimulus(kind)),
        };

        let noise = if stimulus_table.get("noise_std").is_some() {
            let mut params = GaussianParameters::default();
            params.mean = parse_value_with_default(stimulus_table, "noise_mean", parse_f64, params.mean)?;
            params.std = parse_value_with_default(stimulus_table, "noise_std", parse_f64, params.std)?;
            params.min = parse_value_with_default(stimulus_table, "noise_min", parse_f64, params.min)?;
            params.max = parse_value_with_default(stimulus_table, "noise_max", parse_f64, params.max)?;

            Some(params)
        } else {
            None
        };

        log::info!("stimulus: {:?}, noise: {:?}", shape, noise);

        Ok(StimulusConfig { shape, noise })
    }

    /// Generates a series of `len` values
    pub fn build<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> StimulusSeries {
        let series = match self.shape {
            StimulusShape::Zeros => StimulusSeries::zeros(len),
            StimulusShape::Constant { amplitude } => StimulusSeries::constant(len, amplitude),
            StimulusShape::Step { amplitude, start, end } => {
                StimulusSeries::step(len, start, end.unwrap_or(len), amplitude)
            },
            StimulusShape::Triangular { amplitude } => StimulusSeries::triangular(len, amplitude),
        };

        match &self.noise {
            Some(params) => series.with_gaussian_noise(params, rng),
            None => series,
        }
    }
}

/// A Hodgkin Huxley run
#[derive(Debug, Clone, PartialEq)]
pub struct HodgkinHuxleyConfig {
    pub filename: String,
    pub clock: SimulationClock,
    pub neuron: HodgkinHuxleyNeuron,
    pub v_init: f64,
    pub stimulus: StimulusConfig,
}

impl HodgkinHuxleyConfig {
    pub fn from_table(table: &Value) -> Result<Self, SimulationError> {
        let filename = parse_value_with_default(table, "filename", parse_string, String::from("hodgkin_huxley.csv"))?;
        log::info!("filename: {}", filename);

        let clock = get_clock(table, 0.05)?;

        let mut neuron = HodgkinHuxleyNeuron::default();
        override_f64_fields!(table, neuron, c_m, e_na, e_k, e_k_leak, g_na, g_k, g_k_leak, v_th);
        log::info!("{:?}", neuron);

        let v_init = parse_value_with_default(table, "v_init", parse_f64, 0.)?;
        log::info!("v_init: {}", v_init);

        let stimulus = StimulusConfig::from_table(
            table,
            StimulusShape::Step { amplitude: 10., start: 2000, end: Some(3000) },
        )?;

        Ok(HodgkinHuxleyConfig { filename, clock, neuron, v_init, stimulus })
    }
}

/// A sweep over Izhikevich presets sharing one default stimulus, each preset
/// is written to `<filename_prefix>_<preset>.csv`
#[derive(Debug, Clone, PartialEq)]
pub struct IzhikevichConfig {
    pub filename_prefix: String,
    pub clock: SimulationClock,
    pub presets: Vec<IzhikevichPreset>,
    pub stimulus: StimulusConfig,
}

impl IzhikevichConfig {
    pub fn from_table(table: &Value) -> Result<Self, SimulationError> {
        let filename_prefix = parse_value_with_default(table, "filename_prefix", parse_string, String::from("izhikevich"))?;
        log::info!("filename_prefix: {}", filename_prefix);

        let clock = get_clock(table, 0.25)?;

        let presets = match table.get("presets") {
            Some(value) => value
                .as_array()
                .ok_or_else(|| invalid_type("presets", "array of strings"))?
                .iter()
                .map(|i| parse_string(i, "presets")?.parse::<IzhikevichPreset>())
                .collect::<Result<Vec<_>, _>>()?,
            None => IzhikevichPreset::ALL.to_vec(),
        };
        log::info!("presets: {:?}", presets);

        let stimulus = StimulusConfig::from_table(
            table,
            StimulusShape::Step { amplitude: 15., start: 21, end: None },
        )?;

        Ok(IzhikevichConfig { filename_prefix, clock, presets, stimulus })
    }
}

fn get_leaky_integrate_and_fire_neuron(table: &Value) -> Result<LeakyIntegrateAndFireNeuron, ConfigError> {
    let mut neuron = LeakyIntegrateAndFireNeuron::default();
    override_f64_fields!(table, neuron, r_m, tau_m, v_rest, v_th, v_spike, tau_ref);
    log::info!("{:?}", neuron);

    Ok(neuron)
}

/// A leaky integrate and fire run
#[derive(Debug, Clone, PartialEq)]
pub struct LeakyIntegrateAndFireConfig {
    pub filename: String,
    pub clock: SimulationClock,
    pub neuron: LeakyIntegrateAndFireNeuron,
    pub stimulus: StimulusConfig,
}

impl LeakyIntegrateAndFireConfig {
    pub fn from_table(table: &Value) -> Result<Self, SimulationError> {
        let filename = parse_value_with_default(table, "filename", parse_string, String::from("leaky_integrate_and_fire.csv"))?;
        log::info!("filename: {}", filename);

        let clock = get_clock(table, 0.1)?;
        let neuron = get_leaky_integrate_and_fire_neuron(table)?;
        let stimulus = StimulusConfig::from_table(table, StimulusShape::Triangular { amplitude: 200. })?;

        Ok(LeakyIntegrateAndFireConfig { filename, clock, neuron, stimulus })
    }
}

/// Firing rate against triangular stimulus amplitude for several time constants
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyCurveConfig {
    pub filename: String,
    pub clock: SimulationClock,
    pub neuron: LeakyIntegrateAndFireNeuron,
    pub tau_ms: Vec<f64>,
    pub current_min: f64,
    pub current_max: f64,
    pub current_count: usize,
}

impl FrequencyCurveConfig {
    pub fn from_table(table: &Value) -> Result<Self, SimulationError> {
        let filename = parse_value_with_default(table, "filename", parse_string, String::from("current_frequency_curve.csv"))?;
        log::info!("filename: {}", filename);

        let clock = get_clock(table, 0.1)?;
        let neuron = get_leaky_integrate_and_fire_neuron(table)?;

        let tau_ms = parse_value_with_default(table, "tau_ms", parse_f64_array, vec![5., 10., 20.])?;
        log::info!("tau_ms: {:?}", tau_ms);

        let current_min = parse_value_with_default(table, "current_min", parse_f64, 100.)?;
        let current_max = parse_value_with_default(table, "current_max", parse_f64, 3000.)?;
        let current_count = parse_value_with_default(table, "current_count", parse_usize, 10)?;
        log::info!("currents: {} values from {} to {}", current_count, current_min, current_max);

        Ok(FrequencyCurveConfig {
            filename, clock, neuron, tau_ms, current_min, current_max, current_count,
        })
    }
}

/// Closed form against simulated time to first spike under constant currents
#[derive(Debug, Clone, PartialEq)]
pub struct TimeToThresholdConfig {
    pub filename: String,
    pub clock: SimulationClock,
    pub neuron: LeakyIntegrateAndFireNeuron,
    pub currents: Vec<f64>,
}

impl TimeToThresholdConfig {
    pub fn from_table(table: &Value) -> Result<Self, SimulationError> {
        let filename = parse_value_with_default(table, "filename", parse_string, String::from("time_to_threshold.csv"))?;
        log::info!("filename: {}", filename);

        let clock = get_clock(table, 0.1)?;
        let neuron = get_leaky_integrate_and_fire_neuron(table)?;

        let currents = parse_value_with_default(table, "currents", parse_f64_array, vec![200.])?;
        log::info!("currents: {:?}", currents);

        Ok(TimeToThresholdConfig { filename, clock, neuron, currents })
    }
}

/// Every run described by a config file, in the order they are executed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunConfig {
    /// Seed for stimulus noise, entropy seeded when absent
    pub seed: Option<u64>,
    pub hodgkin_huxley: Option<HodgkinHuxleyConfig>,
    pub izhikevich: Option<IzhikevichConfig>,
    pub leaky_integrate_and_fire: Option<LeakyIntegrateAndFireConfig>,
    pub current_frequency_curve: Option<FrequencyCurveConfig>,
    pub time_to_threshold: Option<TimeToThresholdConfig>,
}

impl RunConfig {
    pub fn parse(content: &str) -> Result<Self, SimulationError> {
        let config: Value = toml::from_str(content)
            .map_err(|e| ConfigError::Syntax(e.to_string()))?;

        let seed = match config.get("seed") {
            Some(value) => Some(parse_usize(value, "seed")? as u64),
            None => None,
        };

        let mut run_config = RunConfig { seed, ..RunConfig::default() };

        if let Some(table) = config.get("hodgkin_huxley") {
            run_config.hodgkin_huxley = Some(HodgkinHuxleyConfig::from_table(table)?);
        }
        if let Some(table) = config.get("izhikevich") {
            run_config.izhikevich = Some(IzhikevichConfig::from_table(table)?);
        }
        if let Some(table) = config.get("leaky_integrate_and_fire") {
            run_config.leaky_integrate_and_fire = Some(LeakyIntegrateAndFireConfig::from_table(table)?);
        }
        if let Some(table) = config.get("current_frequency_curve") {
            run_config.current_frequency_curve = Some(FrequencyCurveConfig::from_table(table)?);
        }
        if let Some(table) = config.get("time_to_threshold") {
            run_config.time_to_threshold = Some(TimeToThresholdConfig::from_table(table)?);
        }

        Ok(run_config)
    }

    /// Whether the file described no run at all
    pub fn is_empty(&self) -> bool {
        self.hodgkin_huxley.is_none() &&
        self.izhikevich.is_none() &&
        self.leaky_integrate_and_fire.is_none() &&
        self.current_frequency_curve.is_none() &&
        self.time_to_threshold.is_none()
    }
}
