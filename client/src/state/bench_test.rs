use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn zero_headcount_is_zero_percent() {
    assert!(approx(bench_percentage(0, 0), 0.0));
    assert!(approx(bench_percentage(5, 0), 0.0));
}

#[test]
fn percentage_is_share_of_headcount() {
    assert!(approx(bench_percentage(3, 20), 15.0));
    assert!(approx(bench_percentage(20, 20), 100.0));
}

#[test]
fn band_edges_are_inclusive() {
    assert_eq!(BenchBand::for_percentage(0.0), BenchBand::Healthy);
    assert_eq!(BenchBand::for_percentage(15.0), BenchBand::Healthy);
    assert_eq!(BenchBand::for_percentage(15.01), BenchBand::Watch);
    assert_eq!(BenchBand::for_percentage(30.0), BenchBand::Watch);
    assert_eq!(BenchBand::for_percentage(30.01), BenchBand::Critical);
}

#[test]
fn gauge_from_kpi() {
    let kpi: KpiResponse = serde_json::from_value(serde_json::json!({
        "bench_burn": {"bench_count": 8, "total_monthly_cost": 41000.0, "currency": "EUR"},
        "utilization": {"total_employees": 25, "allocated": 17, "on_bench": 8, "utilization_rate": 68.0},
        "projects": {"active": 6}
    }))
    .unwrap();
    let gauge = BenchGauge::from_kpi(&kpi);
    assert!(approx(gauge.percentage, 32.0));
    assert_eq!(gauge.band, BenchBand::Critical);
    assert_eq!(gauge.currency, "EUR");
    assert_eq!(gauge.active_projects, 6);
}

#[test]
fn empty_kpi_renders_healthy_zero() {
    let gauge = BenchGauge::from_kpi(&KpiResponse::default());
    assert!(approx(gauge.percentage, 0.0));
    assert_eq!(gauge.band, BenchBand::Healthy);
    assert!(approx(gauge.needle_angle(), GAUGE_MIN_ANGLE_DEG));
}

#[test]
fn needle_sweeps_half_circle_and_clamps() {
    assert!(approx(needle_angle(50.0), 0.0));
    assert!(approx(needle_angle(100.0), 90.0));
    assert!(approx(needle_angle(250.0), 90.0));
    assert!(approx(needle_angle(f64::NAN), -90.0));
}

#[test]
fn polar_point_measures_from_twelve_o_clock() {
    let (x, y) = polar_point(100.0, 100.0, 50.0, 0.0);
    assert!(approx(x, 100.0) && approx(y, 50.0));
    let (x, y) = polar_point(100.0, 100.0, 50.0, 90.0);
    assert!((x - 150.0).abs() < 1e-9 && (y - 100.0).abs() < 1e-9);
}

#[test]
fn arc_path_starts_at_left_edge() {
    assert!(arc_path(100.0, 100.0, 80.0, 50.0).starts_with("M 20.00 100.00 A 80.00 80.00"));
}
