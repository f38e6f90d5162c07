use pipe_flow_lab::pump::{
    compute_pump_performance, MotorThermalModel, PumpCalcError, PumpInput, TemperatureLevel,
};

fn bench_input() -> PumpInput {
    PumpInput {
        voltage_v: 220.0,
        current_a: 2.0,
        volume_l: 20.0,
        duration_s: 10.0,
        density_kg_m3: 1000.0,
        head_loss_m: 2.0,
    }
}

#[test]
fn pump_efficiency_from_bench_readings() {
    let r = compute_pump_performance(&bench_input()).expect("pump calc");
    assert!((r.discharge_l_s - 2.0).abs() < 1e-12);
    assert!((r.total_head_m - 12.0).abs() < 1e-12);
    assert!((r.input_power_w - 440.0).abs() < 1e-9);
    assert!((r.output_power_w - 235.44).abs() < 1e-6, "out={}", r.output_power_w);
    assert!((r.efficiency_pct - 53.509).abs() < 1e-2, "eff={}", r.efficiency_pct);
}

#[test]
fn zero_input_power_gives_zero_efficiency() {
    let r = compute_pump_performance(&PumpInput {
        voltage_v: 0.0,
        ..bench_input()
    })
    .expect("pump calc");
    assert_eq!(r.efficiency_pct, 0.0);
    assert!(r.output_power_w > 0.0);
}

#[test]
fn invalid_pump_inputs_are_rejected() {
    for input in [
        PumpInput {
            duration_s: 0.0,
            ..bench_input()
        },
        PumpInput {
            current_a: -1.0,
            ..bench_input()
        },
        PumpInput {
            density_kg_m3: 0.0,
            ..bench_input()
        },
        PumpInput {
            head_loss_m: f64::NAN,
            ..bench_input()
        },
    ] {
        assert!(matches!(
            compute_pump_performance(&input),
            Err(PumpCalcError::InvalidInput(_))
        ));
    }
}

#[test]
fn motor_heats_while_running_and_cools_when_stopped() {
    let r = compute_pump_performance(&bench_input()).expect("pump calc");
    let mut motor = MotorThermalModel::default();
    assert_eq!(motor.temperature_c(), 25.0);

    let after_one = motor.tick(true, r.input_power_w, r.efficiency_pct);
    assert!(after_one > 25.0);

    for _ in 0..2000 {
        motor.tick(true, r.input_power_w, r.efficiency_pct);
    }
    assert_eq!(motor.temperature_c(), 85.0);
    assert_eq!(motor.level(), TemperatureLevel::Hot);

    let cooled = motor.tick(false, 0.0, 0.0);
    assert!((cooled - 84.8).abs() < 1e-9);
    for _ in 0..1000 {
        motor.tick(false, 0.0, 0.0);
    }
    assert_eq!(motor.temperature_c(), 25.0);
    assert_eq!(motor.level(), TemperatureLevel::Normal);

    motor.tick(true, 440.0, 0.0);
    motor.reset();
    assert_eq!(motor.temperature_c(), 25.0);
}
