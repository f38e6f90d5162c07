use pipe_flow_lab::{
    flow::physics::{friction_factor, inlet_pressure_pa, GaugeLevel, LAMINAR_LIMIT},
    flow::{
        compute, ingest, sweep_flow_rates, ChartSeries, Fluid, HeadLossHistory, LoopState,
        PipeFlowSimulator, SimulationParameters, SimulatorOptions, TextInputs, HISTORY_CAPACITY,
    },
    render::{palette, DrawCommand, RecordingCanvas, Theme, Viewport},
};

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

fn inputs(length: &str, diameter: &str, flow: &str, fluid: &str) -> TextInputs {
    TextInputs {
        length: length.to_string(),
        diameter: diameter.to_string(),
        flow_rate: flow.to_string(),
        fluid: fluid.to_string(),
    }
}

fn simulator(source: TextInputs) -> PipeFlowSimulator<TextInputs, ChartSeries> {
    PipeFlowSimulator::new(
        source,
        ChartSeries::default(),
        SimulatorOptions {
            viewport: Viewport::from_container(800.0, 400.0),
            theme: Theme::Dark,
            pixels_per_m_s: 50.0,
            seed: Some(7),
        },
    )
}

#[test]
fn water_one_litre_per_second_is_turbulent() {
    let params = SimulationParameters {
        flow_rate_l_s: 1.0,
        ..SimulationParameters::default()
    };
    let r = compute(&params);
    assert!(close(r.velocity_m_s, 0.5093, 1e-4), "v={}", r.velocity_m_s);
    assert!(close(r.reynolds, 25414.0, 1.0), "Re={}", r.reynolds);
    assert!(close(r.friction_factor, 0.02503, 5e-5), "f={}", r.friction_factor);
    assert!(close(r.head_loss_m, 0.03309, 5e-5), "hf={}", r.head_loss_m);
    assert!(!r.is_laminar());
}

#[test]
fn compute_is_pure() {
    let params = SimulationParameters {
        length_m: 12.0,
        diameter_m: 0.02,
        flow_rate_l_s: 0.3,
        fluid: Fluid::Oil,
    };
    assert_eq!(compute(&params), compute(&params));
}

#[test]
fn zero_flow_gives_all_zero() {
    let r = compute(&SimulationParameters::default());
    assert_eq!(r.velocity_m_s, 0.0);
    assert_eq!(r.reynolds, 0.0);
    assert_eq!(r.friction_factor, 0.0);
    assert_eq!(r.head_loss_m, 0.0);
}

#[test]
fn glycerin_is_laminar_with_64_over_re() {
    let params = SimulationParameters {
        flow_rate_l_s: 1.0,
        fluid: Fluid::Glycerin,
        ..SimulationParameters::default()
    };
    let r = compute(&params);
    assert!(r.is_laminar());
    assert!(close(r.friction_factor, 64.0 / r.reynolds, 1e-12));
}

#[test]
fn regime_switches_at_2300() {
    assert!(close(friction_factor(2299.0), 64.0 / 2299.0, 1e-12));
    assert!(close(friction_factor(LAMINAR_LIMIT), 0.316 * 2300f64.powf(-0.25), 1e-12));
}

#[test]
fn invalid_text_falls_back_to_defaults() {
    let params = ingest(&inputs("abc", "-1", "", "mercury"));
    assert_eq!(params, SimulationParameters::default());

    let params = ingest(&inputs("10", "0.1", "-3", "oil"));
    assert_eq!(params.length_m, 10.0);
    assert_eq!(params.diameter_m, 0.1);
    assert_eq!(params.flow_rate_l_s, 0.0);
    assert_eq!(params.fluid, Fluid::Oil);
}

#[test]
fn pressure_gauge_levels_follow_head_loss() {
    let params = SimulationParameters {
        flow_rate_l_s: 1.0,
        ..SimulationParameters::default()
    };
    let r = compute(&params);
    let p1 = inlet_pressure_pa(&params, &r);
    assert!(close(p1, 998.0 * 9.81 * r.head_loss_m, 1e-9));
    assert_eq!(GaugeLevel::classify(p1), GaugeLevel::Success);
    assert_eq!(GaugeLevel::classify(750.0), GaugeLevel::Warning);
    assert_eq!(GaugeLevel::classify(1500.0), GaugeLevel::Danger);
}

#[test]
fn history_evicts_oldest_not_slowest() {
    let mut history = HeadLossHistory::new();
    // 유속이 줄어드는 순서로 60개: 먼저 들어온 10개가 가장 빠른 점이다.
    let recorded: Vec<f64> = (0..60).map(|i| 0.60 - i as f64 * 0.01).collect();
    for v in &recorded {
        assert!(history.record(*v, v * v));
    }
    assert_eq!(history.len(), HISTORY_CAPACITY);

    let sorted = history.sorted();
    assert!(sorted.windows(2).all(|w| w[0].velocity_m_s <= w[1].velocity_m_s));

    let mut expected: Vec<f64> = recorded[10..].to_vec();
    expected.sort_by(f64::total_cmp);
    let kept: Vec<f64> = sorted.iter().map(|s| s.velocity_m_s).collect();
    assert_eq!(kept, expected);
    assert!(kept.iter().all(|v| *v < 0.505), "fastest early samples must be gone: {kept:?}");
}

#[test]
fn history_ignores_zero_velocity() {
    let mut history = HeadLossHistory::new();
    assert!(!history.record(0.0, 0.0));
    assert!(!history.record(1.0, f64::NAN));
    assert!(history.is_empty());
}

#[test]
fn sweep_produces_monotonic_curve() {
    let history = sweep_flow_rates(&SimulationParameters::default(), 0.1, 2.0, 10);
    assert_eq!(history.len(), 10);
    let (_, values) = history.chart_series();
    assert!(values.windows(2).all(|w| w[0] <= w[1]), "{values:?}");
}

#[test]
fn initial_zero_flow_records_nothing() {
    let sim = simulator(inputs("5", "0.05", "0", "water"));
    assert_eq!(sim.state(), LoopState::Running);
    assert_eq!(sim.recomputations(), 1);
    assert!(!sim.is_dirty());
    assert!(sim.history().is_empty());
    assert_eq!(sim.chart().updates, 0);
}

#[test]
fn several_changes_between_frames_recompute_once() {
    let mut sim = simulator(inputs("5", "0.05", "0", "water"));
    sim.source_mut().flow_rate = "0.5".to_string();
    sim.mark_dirty();
    sim.source_mut().flow_rate = "1".to_string();
    sim.mark_dirty();
    sim.mark_dirty();
    assert!(sim.frame(0.0, None));
    assert_eq!(sim.recomputations(), 2);
    assert!(close(sim.result().velocity_m_s, 0.5093, 1e-4));
    assert_eq!(sim.history().len(), 1);
    assert_eq!(sim.chart().updates, 1);

    assert!(sim.frame(16.0, None));
    assert_eq!(sim.recomputations(), 2);
}

#[test]
fn particles_stay_still_until_first_input() {
    let mut sim = simulator(inputs("5", "0.05", "2", "water"));
    let before: Vec<f32> = sim.particles().particles().iter().map(|p| p.x).collect();
    for i in 0..10 {
        sim.frame(i as f64 * 16.0, None);
    }
    let after: Vec<f32> = sim.particles().particles().iter().map(|p| p.x).collect();
    assert_eq!(before, after);
}

#[test]
fn particles_wrap_and_stay_inside_pipe() {
    let mut sim = simulator(inputs("5", "0.05", "0", "water"));
    sim.source_mut().flow_rate = "5".to_string();
    sim.mark_dirty();
    let mut canvas = RecordingCanvas::new();
    let geom = sim.geometry();
    let (low, high) = geom.band();
    let mut wrapped = false;
    let mut last_x: Vec<f32> = sim.particles().particles().iter().map(|p| p.x).collect();
    for i in 0..600 {
        sim.frame(i as f64 * 16.0, Some(&mut canvas));
        for (p, prev) in sim.particles().particles().iter().zip(&last_x) {
            assert!(p.x >= geom.left_bound() && p.x <= geom.right_bound(), "x={}", p.x);
            assert!(p.y >= low && p.y <= high, "y={}", p.y);
            if p.x < *prev {
                wrapped = true;
            }
        }
        last_x = sim.particles().particles().iter().map(|p| p.x).collect();
    }
    assert!(wrapped);
    assert_eq!(sim.particles().len(), 200);
}

#[test]
fn shrinking_diameter_at_zero_flow_keeps_particles_in_band() {
    let mut sim = simulator(inputs("5", "0.1", "1", "water"));
    sim.mark_dirty();
    for i in 0..50 {
        sim.frame(i as f64 * 16.0, None);
    }

    sim.source_mut().flow_rate = "0".to_string();
    sim.source_mut().diameter = "0.05".to_string();
    sim.mark_dirty();
    let mut canvas = RecordingCanvas::new();
    for i in 50..60 {
        sim.frame(i as f64 * 16.0, Some(&mut canvas));
    }

    let (low, high) = sim.geometry().band();
    let outside = sim
        .particles()
        .particles()
        .iter()
        .filter(|p| p.y < low || p.y > high)
        .count();
    assert_eq!(outside, 0, "band=({low},{high})");
}

#[test]
fn shorter_viewport_keeps_particles_in_band() {
    let mut sim = simulator(inputs("5", "0.2", "0", "water"));
    let mut canvas = RecordingCanvas::new();
    sim.resize(800.0, 200.0, &mut canvas);
    let (low, high) = sim.geometry().band();
    assert!(sim
        .particles()
        .particles()
        .iter()
        .all(|p| p.y >= low && p.y <= high));
}

#[test]
fn reset_clock_avoids_jump_after_pause() {
    let mut paused = simulator(inputs("5", "0.05", "0", "water"));
    let mut steady = simulator(inputs("5", "0.05", "0", "water"));
    for sim in [&mut paused, &mut steady] {
        sim.source_mut().flow_rate = "1".to_string();
        sim.mark_dirty();
        sim.frame(0.0, None);
    }
    // 한 쪽은 60초 동안 프레임이 없다가 재개된다.
    paused.reset_clock();
    paused.frame(60_000.0, None);
    steady.frame(16.0, None);
    assert_eq!(paused.particles().particles(), steady.particles().particles());
}

#[test]
fn first_frame_uses_sixteen_ms() {
    let mut a = simulator(inputs("5", "0.05", "0", "water"));
    let mut b = simulator(inputs("5", "0.05", "0", "water"));
    for sim in [&mut a, &mut b] {
        sim.source_mut().flow_rate = "1".to_string();
        sim.mark_dirty();
    }
    // 첫 프레임은 시각과 무관하게 같은 거리만큼 움직인다.
    a.frame(1_000.0, None);
    b.frame(50_000.0, None);
    assert_eq!(a.particles().particles(), b.particles().particles());
}

#[test]
fn non_finite_result_keeps_previous_values() {
    let mut sim = simulator(inputs("5", "0.05", "1", "water"));
    sim.mark_dirty();
    sim.frame(0.0, None);
    let good = *sim.result();
    let history_len = sim.history().len();

    sim.source_mut().diameter = "1e-300".to_string();
    sim.mark_dirty();
    sim.frame(16.0, None);
    assert_eq!(*sim.result(), good);
    assert_eq!(sim.history().len(), history_len);
    assert_eq!(sim.parameters().diameter_m, 1e-300);
}

#[test]
fn stopped_loop_does_nothing() {
    let mut sim = simulator(inputs("5", "0.05", "1", "water"));
    sim.stop();
    sim.mark_dirty();
    assert!(!sim.frame(0.0, None));
    assert_eq!(sim.state(), LoopState::Idle);
    assert_eq!(sim.recomputations(), 1);
}

#[test]
fn theme_change_redraws_with_new_background() {
    let mut sim = simulator(inputs("5", "0.05", "0", "water"));
    let mut canvas = RecordingCanvas::new();
    sim.set_theme(Theme::Light, &mut canvas);
    assert_eq!(canvas.commands[0], DrawCommand::Clear(palette::LIGHT.background));
    assert_eq!(sim.theme(), Theme::Light);

    sim.set_theme(Theme::Dark, &mut canvas);
    assert_eq!(canvas.last_frame()[0], DrawCommand::Clear(palette::DARK.background));
}

#[test]
fn resize_redraws_immediately() {
    let mut sim = simulator(inputs("5", "0.05", "0", "water"));
    let mut canvas = RecordingCanvas::new();
    sim.resize(1000.0, 100.0, &mut canvas);
    assert_eq!(sim.viewport().width, 1000.0);
    assert_eq!(sim.viewport().height, 200.0);
    assert!(!canvas.commands.is_empty());
    assert_eq!(canvas.circles().count(), 2 * 2 + 200 * 2);
}

#[test]
fn particles_use_fluid_colour() {
    let mut sim = simulator(inputs("5", "0.05", "1", "oil"));
    let mut canvas = RecordingCanvas::new();
    sim.frame(0.0, Some(&mut canvas));
    let oil = Fluid::Oil.properties().particle_colour;
    assert_eq!(canvas.circles().filter(|c| c.3 == oil).count(), 200);
}
