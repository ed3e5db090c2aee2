//! Bench gauge model derived from the KPI endpoint.

#[cfg(test)]
#[path = "bench_test.rs"]
mod bench_test;

use crate::net::types::KpiResponse;

/// Upper bound (inclusive) of the healthy band, in percent.
pub const HEALTHY_MAX_PCT: f64 = 15.0;
/// Upper bound (inclusive) of the watch band, in percent.
pub const WATCH_MAX_PCT: f64 = 30.0;

/// Gauge sweep: 0 % points left, 100 % points right.
pub const GAUGE_MIN_ANGLE_DEG: f64 = -90.0;
pub const GAUGE_MAX_ANGLE_DEG: f64 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BenchBand {
    Healthy,
    Watch,
    Critical,
}

impl BenchBand {
    #[must_use]
    pub fn for_percentage(pct: f64) -> Self {
        if pct <= HEALTHY_MAX_PCT {
            Self::Healthy
        } else if pct <= WATCH_MAX_PCT {
            Self::Watch
        } else {
            Self::Critical
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Watch => "Watch",
            Self::Critical => "Critical",
        }
    }

    /// CSS modifier used by the gauge and badge.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Healthy => "band-healthy",
            Self::Watch => "band-watch",
            Self::Critical => "band-critical",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BenchGauge {
    pub on_bench: u32,
    pub total: u32,
    pub percentage: f64,
    pub band: BenchBand,
    pub monthly_cost: f64,
    pub currency: String,
    pub active_projects: u32,
}

impl BenchGauge {
    #[must_use]
    pub fn from_kpi(kpi: &KpiResponse) -> Self {
        let on_bench = kpi.utilization.on_bench;
        let total = kpi.utilization.total_employees;
        let percentage = bench_percentage(on_bench, total);
        Self {
            on_bench,
            total,
            percentage,
            band: BenchBand::for_percentage(percentage),
            monthly_cost: kpi.bench_burn.total_monthly_cost,
            currency: kpi.bench_burn.currency.clone().unwrap_or_else(|| "USD".to_owned()),
            active_projects: kpi.projects.active,
        }
    }

    /// Needle rotation for the semicircular gauge.
    #[must_use]
    pub fn needle_angle(&self) -> f64 {
        needle_angle(self.percentage)
    }
}

/// On-bench share of headcount in percent; zero headcount is 0 %.
#[must_use]
pub fn bench_percentage(on_bench: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(on_bench) / f64::from(total) * 100.0
}

#[must_use]
pub fn needle_angle(pct: f64) -> f64 {
    let pct = if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 };
    GAUGE_MIN_ANGLE_DEG + (GAUGE_MAX_ANGLE_DEG - GAUGE_MIN_ANGLE_DEG) * pct / 100.0
}

/// Point on a circle of `radius` around (`cx`, `cy`) at `angle_deg` from 12 o'clock.
#[must_use]
pub fn polar_point(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (cx + radius * rad.sin(), cy - radius * rad.cos())
}

/// SVG path for the gauge arc from 0 % up to `pct`.
#[must_use]
pub fn arc_path(cx: f64, cy: f64, radius: f64, pct: f64) -> String {
    let (sx, sy) = polar_point(cx, cy, radius, GAUGE_MIN_ANGLE_DEG);
    let (ex, ey) = polar_point(cx, cy, radius, needle_angle(pct));
    format!("M {sx:.2} {sy:.2} A {radius:.2} {radius:.2} 0 0 1 {ex:.2} {ey:.2}")
}
