//! Browser task helpers.
//!
//! Pages start fetches and timers through these so the same view code builds
//! for SSR, where nothing is spawned and timers resolve immediately.

use std::future::Future;

/// Run `future` on the browser's local executor; dropped during SSR.
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(future);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        drop(future);
    }
}

/// Wait `ms` milliseconds in the browser.
pub async fn sleep_ms(ms: u32) {
    #[cfg(feature = "hydrate")]
    {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = ms;
    }
}
