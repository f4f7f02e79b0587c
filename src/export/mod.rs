//! Writes traces and sweep results as `.csv` with a header row so they can be
//! plotted by an external tool.

use std::io::Write;
use csv::Writer;
use crate::clock::SimulationClock;
use crate::error::SimulationError;
use crate::neuron::{
    SpikeLog,
    hodgkin_huxley::HodgkinHuxleyTrace,
    integrate_and_fire::LeakyIntegrateAndFireTrace,
    izhikevich::IzhikevichTrace,
};
use crate::stimulus::StimulusSeries;
use crate::sweep::{FrequencyCurve, ThresholdComparison};


/// Writes equally long columns row by row, `time` is prepended from the clock
fn write_time_columns<W: Write>(
    writer: W,
    clock: &SimulationClock,
    headers: &[&str],
    columns: &[&[f64]],
) -> Result<(), SimulationError> {
    let mut wtr = Writer::from_writer(writer);

    let mut header_row = vec!["time"];
    header_row.extend_from_slice(headers);
    wtr.write_record(&header_row)?;

    let rows = columns.iter().map(|column| column.len()).min().unwrap_or(0);
    for i in 0..rows {
        let mut record = vec![clock.time_at(i).to_string()];
        record.extend(columns.iter().map(|column| column[i].to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;

    Ok(())
}

pub fn write_hodgkin_huxley_trace<W: Write>(
    writer: W,
    clock: &SimulationClock,
    trace: &HodgkinHuxleyTrace,
    stimulus: &StimulusSeries,
) -> Result<(), SimulationError> {
    write_time_columns(
        writer,
        clock,
        &["voltage", "m", "h", "n", "sodium", "potassium", "leak", "net", "stimulus"],
        &[
            trace.voltage.as_slice(), trace.m.as_slice(), trace.h.as_slice(), trace.n.as_slice(),
            trace.sodium.as_slice(), trace.potassium.as_slice(), trace.leak.as_slice(), trace.net.as_slice(),
            stimulus.values(),
        ],
    )
}

pub fn write_izhikevich_trace<W: Write>(
    writer: W,
    clock: &SimulationClock,
    trace: &IzhikevichTrace,
    stimulus: &StimulusSeries,
) -> Result<(), SimulationError> {
    write_time_columns(
        writer,
        clock,
        &["voltage", "recovery", "stimulus"],
        &[trace.voltage.as_slice(), trace.recovery.as_slice(), stimulus.values()],
    )
}

pub fn write_leaky_integrate_and_fire_trace<W: Write>(
    writer: W,
    clock: &SimulationClock,
    trace: &LeakyIntegrateAndFireTrace,
    stimulus: &StimulusSeries,
) -> Result<(), SimulationError> {
    write_time_columns(
        writer,
        clock,
        &["voltage", "stimulus"],
        &[trace.voltage.as_slice(), stimulus.values()],
    )
}

pub fn write_spike_log<W: Write>(writer: W, spikes: &SpikeLog) -> Result<(), SimulationError> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(["spike_time"])?;
    for time in spikes.iter() {
        wtr.write_record([time.to_string()])?;
    }

    wtr.flush()?;

    Ok(())
}

/// One row per `(tau_m, current)` pair
pub fn write_frequency_curves<W: Write>(writer: W, curves: &[FrequencyCurve]) -> Result<(), SimulationError> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(["tau_m", "current", "rate"])?;
    for curve in curves {
        for (current, rate) in curve.currents.iter().zip(curve.rates.iter()) {
            wtr.write_record([curve.tau_m.to_string(), current.to_string(), rate.to_string()])?;
        }
    }

    wtr.flush()?;

    Ok(())
}

/// Missing times are written as empty fields
pub fn write_threshold_comparisons<W: Write>(
    writer: W,
    comparisons: &[ThresholdComparison],
) -> Result<(), SimulationError> {
    let mut wtr = Writer::from_writer(writer);

    let optional = |value: Option<f64>| value.map(|i| i.to_string()).unwrap_or_default();

    wtr.write_record(["current", "closed_form", "simulated"])?;
    for comparison in comparisons {
        wtr.write_record([
            comparison.current.to_string(),
            optional(comparison.closed_form),
            optional(comparison.simulated),
        ])?;
    }

    wtr.flush()?;

    Ok(())
}
