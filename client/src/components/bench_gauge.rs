//! Semicircular bench gauge.

use leptos::prelude::*;

use crate::state::bench::{BenchGauge as GaugeModel, arc_path, polar_point};
use crate::util::format::{money, percent};

const CX: f64 = 120.0;
const CY: f64 = 120.0;
const RADIUS: f64 = 96.0;
const NEEDLE: f64 = 84.0;

#[component]
pub fn BenchGauge(#[prop(into)] gauge: Signal<GaugeModel>) -> impl IntoView {
    let track = arc_path(CX, CY, RADIUS, 100.0);
    let fill = move || gauge.with(|g| arc_path(CX, CY, RADIUS, g.percentage));
    let needle = move || gauge.with(|g| polar_point(CX, CY, NEEDLE, g.needle_angle()));
    let band_class = move || format!("bench-gauge {}", gauge.with(|g| g.band.css_class()));

    view! {
        <figure class=band_class>
            <svg viewBox="0 0 240 140" role="img" aria-label="Bench percentage">
                <path class="bench-gauge__track" d=track fill="none" stroke-width="16"/>
                <path class="bench-gauge__fill" d=fill fill="none" stroke-width="16"/>
                <line
                    class="bench-gauge__needle"
                    x1=CX
                    y1=CY
                    x2=move || needle().0
                    y2=move || needle().1
                    stroke-width="3"
                />
                <circle class="bench-gauge__hub" cx=CX cy=CY r="6"/>
            </svg>
            <figcaption>
                <strong class="bench-gauge__value">{move || gauge.with(|g| percent(g.percentage))}</strong>
                <span class="bench-gauge__band">{move || gauge.with(|g| g.band.label())}</span>
                <span class="bench-gauge__detail">
                    {move || gauge.with(|g| format!("{} of {} on bench", g.on_bench, g.total))}
                </span>
                <span class="bench-gauge__detail">
                    {move || gauge.with(|g| format!("Burn {} / month", money(g.monthly_cost, &g.currency)))}
                </span>
            </figcaption>
        </figure>
    }
}
