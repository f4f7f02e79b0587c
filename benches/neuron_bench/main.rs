use criterion::{black_box, criterion_group, criterion_main, Criterion};
use neuron_integrators::{
    clock::SimulationClock,
    neuron::{
        hodgkin_huxley::{HodgkinHuxleyNeuron, run_hodgkin_huxley},
        integrate_and_fire::{LeakyIntegrateAndFireNeuron, run_leaky_integrate_and_fire},
        izhikevich::IzhikevichPreset,
    },
    stimulus::StimulusSeries,
    sweep::{current_axis, current_frequency_curve},
};


fn bench_izhikevich(c: &mut Criterion) {
    let neuron = IzhikevichPreset::RegularSpiking.neuron();
    let mut state = neuron.initialize(-70.);

    c.bench_function("izhikevich_step", |b| {
        b.iter(|| {
            let (next, is_spiking) = neuron.step(black_box(&state), black_box(15.), 0.25);
            state = next;

            is_spiking
        })
    });
}

fn bench_hodgkin_huxley(c: &mut Criterion) {
    let neuron = HodgkinHuxleyNeuron::default();
    let mut state = neuron.initialize(0.);

    c.bench_function("hodgkin_huxley_step", |b| {
        b.iter(|| {
            let (next, currents) = neuron.step(black_box(&state), black_box(10.), 0.05);
            state = next;

            currents
        })
    });

    let clock = match SimulationClock::from_point_count(0.05, 5000) {
        Ok(clock) => clock,
        Err(e) => panic!("{}", e),
    };
    let stimulus = StimulusSeries::step(clock.point_count(), 2000, 3000, 10.);

    c.bench_function("hodgkin_huxley_run", |b| {
        b.iter(|| run_hodgkin_huxley(&neuron, &clock, black_box(&stimulus), 0.))
    });
}

fn bench_leaky_integrate_and_fire(c: &mut Criterion) {
    let neuron = LeakyIntegrateAndFireNeuron::default();
    let clock = match SimulationClock::new(0.1, 50.) {
        Ok(clock) => clock,
        Err(e) => panic!("{}", e),
    };
    let stimulus = StimulusSeries::triangular(clock.point_count(), 200.);

    c.bench_function("leaky_integrate_and_fire_run", |b| {
        b.iter(|| run_leaky_integrate_and_fire(&neuron, &clock, black_box(&stimulus)))
    });

    let currents = current_axis(100., 3000., 10);
    c.bench_function("current_frequency_curve", |b| {
        b.iter(|| current_frequency_curve(&neuron, &[5., 10., 20.], black_box(&currents), &clock))
    });
}

criterion_group!(benches, bench_izhikevich, bench_hodgkin_huxley, bench_leaky_integrate_and_fire);
criterion_main!(benches);
