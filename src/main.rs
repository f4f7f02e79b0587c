use std::{
    env,
    fs::{read_to_string, File},
    io::{BufWriter, Error, ErrorKind},
};
use rand::{rngs::StdRng, SeedableRng};
use neuron_integrators::{
    config::{
        FrequencyCurveConfig, HodgkinHuxleyConfig, IzhikevichConfig,
        LeakyIntegrateAndFireConfig, RunConfig, TimeToThresholdConfig,
    },
    error::SimulationError,
    export::{
        write_frequency_curves, write_hodgkin_huxley_trace, write_izhikevich_trace,
        write_leaky_integrate_and_fire_trace, write_spike_log, write_threshold_comparisons,
    },
    neuron::{
        SpikeLog,
        hodgkin_huxley::run_hodgkin_huxley,
        integrate_and_fire::run_leaky_integrate_and_fire,
    },
    sweep::{current_axis, current_frequency_curve, izhikevich_preset_sweep, time_to_threshold_comparison},
};


fn create_file(filename: &str) -> Result<BufWriter<File>, SimulationError> {
    Ok(BufWriter::new(File::create(filename)?))
}

/// `trace.csv` becomes `trace_spikes.csv`
fn spikes_filename(filename: &str) -> String {
    let stem = filename.strip_suffix(".csv").unwrap_or(filename);

    format!("{}_spikes.csv", stem)
}

fn write_spikes(filename: &str, spikes: &SpikeLog) -> Result<(), SimulationError> {
    let spikes_file = spikes_filename(filename);
    write_spike_log(create_file(&spikes_file)?, spikes)?;
    log::info!("Wrote {} spikes to {}", spikes.len(), spikes_file);

    Ok(())
}

fn run_hodgkin_huxley_config(config: &HodgkinHuxleyConfig, rng: &mut StdRng) -> Result<(), SimulationError> {
    let stimulus = config.stimulus.build(config.clock.point_count(), rng);
    let trace = run_hodgkin_huxley(&config.neuron, &config.clock, &stimulus, config.v_init)?;

    write_hodgkin_huxley_trace(create_file(&config.filename)?, &config.clock, &trace, &stimulus)?;
    write_spikes(&config.filename, &trace.spikes)?;

    log::info!("Finished Hodgkin Huxley simulation");

    Ok(())
}

fn run_izhikevich_config(config: &IzhikevichConfig, rng: &mut StdRng) -> Result<(), SimulationError> {
    let stimulus = config.stimulus.build(config.clock.point_count(), rng);
    let results = izhikevich_preset_sweep(&config.presets, &config.clock, &stimulus)?;

    for (preset, trace) in results.iter() {
        let name = preset.name().to_lowercase().replace([' ', '-'], "_");
        let filename = format!("{}_{}.csv", config.filename_prefix, name);
        let preset_stimulus = preset.stimulus_or(&stimulus);

        write_izhikevich_trace(create_file(&filename)?, &config.clock, trace, &preset_stimulus)?;
        write_spikes(&filename, &trace.spikes)?;
    }

    log::info!("Finished Izhikevich simulations");

    Ok(())
}

fn run_leaky_integrate_and_fire_config(
    config: &LeakyIntegrateAndFireConfig,
    rng: &mut StdRng,
) -> Result<(), SimulationError> {
    let stimulus = config.stimulus.build(config.clock.point_count(), rng);
    let trace = run_leaky_integrate_and_fire(&config.neuron, &config.clock, &stimulus)?;

    match trace.spikes.first() {
        Some(first) => log::info!("First spike at {} ms, {} spikes", first, trace.spikes.len()),
        None => log::info!("No spikes"),
    }

    write_leaky_integrate_and_fire_trace(create_file(&config.filename)?, &config.clock, &trace, &stimulus)?;
    write_spikes(&config.filename, &trace.spikes)?;

    log::info!("Finished leaky integrate and fire simulation");

    Ok(())
}

fn run_frequency_curve_config(config: &FrequencyCurveConfig) -> Result<(), SimulationError> {
    let currents = current_axis(config.current_min, config.current_max, config.current_count);
    let curves = current_frequency_curve(&config.neuron, &config.tau_ms, &currents, &config.clock)?;

    write_frequency_curves(create_file(&config.filename)?, &curves)?;

    log::info!("Finished current frequency curve");

    Ok(())
}

fn run_time_to_threshold_config(config: &TimeToThresholdConfig) -> Result<(), SimulationError> {
    let comparisons = time_to_threshold_comparison(&config.neuron, &config.currents, &config.clock)?;

    for comparison in comparisons.iter() {
        log::info!(
            "current: {}, closed form: {:?} ms, simulated: {:?} ms",
            comparison.current,
            comparison.closed_form,
            comparison.simulated,
        );
    }

    write_threshold_comparisons(create_file(&config.filename)?, &comparisons)?;

    log::info!("Finished time to threshold comparison");

    Ok(())
}

fn run(config: &RunConfig) -> Result<(), SimulationError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Some(hodgkin_huxley) = &config.hodgkin_huxley {
        run_hodgkin_huxley_config(hodgkin_huxley, &mut rng)?;
    }
    if let Some(izhikevich) = &config.izhikevich {
        run_izhikevich_config(izhikevich, &mut rng)?;
    }
    if let Some(leaky_integrate_and_fire) = &config.leaky_integrate_and_fire {
        run_leaky_integrate_and_fire_config(leaky_integrate_and_fire, &mut rng)?;
    }
    if let Some(current_frequency_curve) = &config.current_frequency_curve {
        run_frequency_curve_config(current_frequency_curve)?;
    }
    if let Some(time_to_threshold) = &config.time_to_threshold {
        run_time_to_threshold_config(time_to_threshold)?;
    }

    Ok(())
}

fn main() -> Result<(), SimulationError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        log::error!("Requires .toml argument file");
        return Err(Error::new(ErrorKind::InvalidInput, "Requires .toml argument file").into());
    }

    let toml_content = read_to_string(&args[1])?;
    let config = RunConfig::parse(&toml_content)?;

    if config.is_empty() {
        log::warn!("No simulation tables found in {}", args[1]);
    }

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        return Err(e);
    }

    Ok(())
}
