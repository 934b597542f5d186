//! App: the loop that drives a [`Runtime`]'s flush cycle.
//!
//! The runtime itself never schedules anything; writes and deferred updates
//! just accumulate on their queues. `App` owns the cadence: once per frame it
//! delivers state notifications, then runs deferred node updates, in that
//! order, so a subscriber render in the tick phase can still get its dynamic
//! updates applied in the same frame.

use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use crate::runtime::Runtime;

/// Loop configuration.
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    /// Target flush rate in frames per second.
    pub fps: u32,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target frame rate (builder). Clamped to at least 1.
    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }

    /// The interval between flushes.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { fps: 60 }
    }
}

/// Drives a runtime's tick and frame flushes at a fixed cadence until
/// shutdown is requested.
pub struct App {
    runtime: Runtime,
    config: AppConfig,
}

impl App {
    pub fn new(runtime: Runtime) -> Self {
        Self {
            runtime,
            config: AppConfig::default(),
        }
    }

    pub fn with_config(runtime: Runtime, config: AppConfig) -> Self {
        Self { runtime, config }
    }

    /// The runtime being driven.
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    /// One full flush cycle: state notifications first, deferred node
    /// updates second.
    pub fn tick(&mut self) {
        self.runtime.flush();
    }

    /// Run the flush loop until [`Runtime::request_shutdown`] is called.
    /// Consumes the app and returns the runtime for post-run inspection.
    pub async fn run(mut self) -> Runtime {
        let mut timer = interval(self.config.frame_duration());
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            timer.tick().await;
            self.tick();
            if self.runtime.shutdown_requested() {
                debug!("shutdown requested, leaving flush loop");
                break;
            }
        }
        self.runtime
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::component::Props;
    use crate::vnode::{Element, VNode};

    #[test]
    fn config_clamps_zero_fps() {
        let config = AppConfig::new().fps(0);
        assert_eq!(config.fps, 1);
        assert_eq!(config.frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn tick_flushes_both_queues() {
        let mut rt = Runtime::new();
        let parent = rt.dom.create_element("root");
        rt.store.set_value("count", 0i64);
        rt.define_component("Counter", |scope, _| {
            let count = scope.get_cloned::<i64>("count").unwrap_or_default();
            Element::new("div").child(VNode::text(count.to_string())).into()
        });
        rt.bind_component("Counter", Props::new(), parent);

        let mut app = App::new(rt);
        app.runtime_mut().store.set_value("count", 3i64);
        app.tick();

        assert_eq!(app.runtime().dom.text_content(parent), "3");
    }

    #[test]
    fn run_stops_on_shutdown_request() {
        let mut rt = Runtime::new();
        let ticks = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&ticks);
        rt.store.subscribe(
            "pulse",
            Rc::new(move |rt, _| {
                let n = {
                    let mut n = seen.borrow_mut();
                    *n += 1;
                    *n
                };
                if n >= 3 {
                    rt.request_shutdown();
                } else {
                    rt.store.set_value("pulse", n);
                }
            }),
        );
        rt.store.set_value("pulse", 0i64);

        let app = App::with_config(rt, AppConfig::new().fps(1000));
        let rt = tokio_test::block_on(app.run());

        assert!(rt.shutdown_requested());
        assert_eq!(*ticks.borrow(), 3);
    }
}
