// SPDX-License-Identifier: MPL-2.0
//! Timed auto-advance.
//!
//! A running slideshow is one tokio task that sleeps for the delay, runs one
//! tick and loops while the tick asks to continue. Starting again aborts the
//! previous task first, and stopping aborts it outright, so no tick fires
//! once `stop` has returned.

use crate::domain::viewer::SlideshowDelay;
use std::future::Future;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct State {
    /// Bumped on every start and stop; a task only clears state it owns.
    generation: u64,
    delay: Option<SlideshowDelay>,
    task: Option<JoinHandle<()>>,
}

/// Handle to the recurring slideshow task.
#[derive(Debug, Default)]
pub struct Slideshow {
    state: Arc<Mutex<State>>,
}

impl Slideshow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        lock(&self.state)
    }

    /// Starts calling `tick` every `delay`, replacing any running slideshow.
    ///
    /// The loop ends when `tick` returns [`ControlFlow::Break`], which leaves
    /// the slideshow stopped.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start<F, Fut>(&self, delay: SlideshowDelay, mut tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ControlFlow<()>> + Send + 'static,
    {
        let mut state = self.state();
        if let Some(previous) = state.task.take() {
            previous.abort();
        }
        state.generation += 1;
        state.delay = Some(delay);

        let generation = state.generation;
        let shared = Arc::clone(&self.state);
        state.task = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(delay.as_duration()).await;
                if tick().await.is_break() {
                    break;
                }
            }

            let mut state = lock(&shared);
            if state.generation == generation {
                state.task = None;
                state.delay = None;
            }
        }));
        tracing::debug!(delay_ms = delay.millis(), "slideshow started");
    }

    /// Stops the slideshow. Returns `true` if it was running.
    pub fn stop(&self) -> bool {
        let mut state = self.state();
        state.generation += 1;
        state.delay = None;
        match state.task.take() {
            Some(task) => {
                task.abort();
                tracing::debug!("slideshow stopped");
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state().task.is_some()
    }

    /// Delay of the running slideshow.
    #[must_use]
    pub fn delay(&self) -> Option<SlideshowDelay> {
        self.state().delay
    }
}

impl Drop for Slideshow {
    fn drop(&mut self) {
        if let Some(task) = self.state().task.take() {
            task.abort();
        }
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
