//! Bench dashboard: gauge plus headline KPIs.
//!
//! SYSTEM CONTEXT
//! ==============
//! Landing route. Fetches `/kpi` once on mount and again on demand; the gauge
//! model is derived from whatever snapshot is current.

use leptos::prelude::*;

use crate::components::bench_gauge::BenchGauge;
use crate::net::api::fetch_kpi;
use crate::net::types::KpiResponse;
use crate::state::bench::BenchGauge as GaugeModel;
use crate::util::browser::spawn;
use crate::util::format::{money, percent};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let kpi = RwSignal::new(KpiResponse::default());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        loading.set(true);
        error.set(None);
        spawn(async move {
            match fetch_kpi().await {
                Ok(snapshot) => kpi.set(snapshot),
                Err(err) => {
                    leptos::logging::warn!("kpi fetch failed: {err}");
                    error.set(Some(err.user_message()));
                }
            }
            loading.set(false);
        });
    };
    load();

    let gauge = Signal::derive(move || kpi.with(GaugeModel::from_kpi));

    view! {
        <div class="dashboard-page">
            <header class="page-header toolbar">
                <h1 class="page-header__title">"Bench overview"</h1>
                <span class="toolbar__spacer"></span>
                <button class="btn" disabled=move || loading.get() on:click=move |_| load()>
                    {move || if loading.get() { "Refreshing…" } else { "Refresh" }}
                </button>
            </header>

            {move || error.get().map(|message| view! { <p class="page-error" role="alert">{message}</p> })}

            <div class="dashboard-page__grid">
                <section class="card">
                    <h2 class="card__title">"Bench"</h2>
                    <BenchGauge gauge=gauge/>
                </section>
                <section class="card">
                    <h2 class="card__title">"Headcount"</h2>
                    <dl class="kpi-list">
                        <dt>"Employees"</dt>
                        <dd>{move || kpi.with(|k| k.utilization.total_employees)}</dd>
                        <dt>"Allocated"</dt>
                        <dd>{move || kpi.with(|k| k.utilization.allocated)}</dd>
                        <dt>"On bench"</dt>
                        <dd>{move || kpi.with(|k| k.utilization.on_bench)}</dd>
                        <dt>"Utilization"</dt>
                        <dd>{move || kpi.with(|k| percent(k.utilization.utilization_rate))}</dd>
                    </dl>
                </section>
                <section class="card">
                    <h2 class="card__title">"Bench burn"</h2>
                    <p class="kpi-figure">{move || gauge.with(|g| money(g.monthly_cost, &g.currency))}</p>
                    <p class="kpi-caption">
                        {move || kpi.with(|k| format!("per month across {} benched employees", k.bench_burn.bench_count))}
                    </p>
                </section>
                <section class="card">
                    <h2 class="card__title">"Projects"</h2>
                    <p class="kpi-figure">{move || kpi.with(|k| k.projects.active)}</p>
                    <p class="kpi-caption">"active"</p>
                </section>
            </div>
        </div>
    }
}
