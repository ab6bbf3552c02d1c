//! Recurring sync and task refresh, tied to the session lifecycle.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::orchestrator::RefreshOrchestrator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshIntervals {
    pub sync: Duration,
    pub tasks: Duration,
}

impl Default for RefreshIntervals {
    fn default() -> Self {
        Self {
            sync: Duration::from_secs(10 * 60),
            tasks: Duration::from_secs(60 * 60),
        }
    }
}

/// Two independent timers: mail sync and task refresh.
///
/// Dropping the schedule stops both timers. Requests a timer already
/// started are left to finish.
pub struct RefreshSchedule {
    timers: Vec<JoinHandle<()>>,
}

impl RefreshSchedule {
    /// Arm both timers. The first tick of each fires one full period from now.
    pub fn start(orchestrator: RefreshOrchestrator, intervals: RefreshIntervals) -> Self {
        let sync = orchestrator.clone();
        let tasks = orchestrator;

        tracing::info!(
            "Refresh schedule armed (sync every {:?}, tasks every {:?})",
            intervals.sync,
            intervals.tasks
        );

        Self {
            timers: vec![
                every(intervals.sync, move || {
                    let sync = sync.clone();
                    async move {
                        // Errors are already reflected in state; the next tick retries.
                        let _ = sync.sync_emails().await;
                    }
                }),
                every(intervals.tasks, move || {
                    let tasks = tasks.clone();
                    async move {
                        let _ = tasks.fetch_tasks().await;
                    }
                }),
            ],
        }
    }

    pub fn is_running(&self) -> bool {
        self.timers.iter().any(|timer| !timer.is_finished())
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for RefreshSchedule {
    fn drop(&mut self) {
        for timer in &self.timers {
            timer.abort();
        }
        tracing::debug!("Refresh schedule cancelled");
    }
}

/// Spawn `run` every `period`, each run on its own task so a slow request
/// never delays the next tick and survives cancellation of the timer.
fn every<F, Fut>(period: Duration, mut run: F) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            tokio::spawn(run());
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateHandle;
    use crate::testing::FakeMailApi;
    use shared::state::AppState;
    use std::sync::Arc;

    fn schedule(api: Arc<FakeMailApi>) -> RefreshSchedule {
        let state = StateHandle::new(AppState::restored(Some(FakeMailApi::TOKEN.to_string())));
        RefreshSchedule::start(
            RefreshOrchestrator::new(api, state),
            RefreshIntervals::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_fire_on_their_own_periods() {
        let api = Arc::new(FakeMailApi::default());
        let schedule = schedule(api.clone());
        assert!(schedule.is_running());

        time::sleep(Duration::from_secs(9 * 60)).await;
        assert_eq!(api.calls().syncs, 0);

        time::sleep(Duration::from_secs(60) + Duration::from_millis(1)).await;
        let calls = api.calls();
        assert_eq!(calls.syncs, 1);
        assert_eq!(calls.email_fetches, 1);
        assert_eq!(calls.task_fetches, 0);

        time::sleep(Duration::from_secs(50 * 60)).await;
        let calls = api.calls();
        assert_eq!(calls.syncs, 6);
        assert_eq!(calls.task_fetches, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_fires_after_cancel() {
        let api = Arc::new(FakeMailApi::default());
        let schedule = schedule(api.clone());

        time::sleep(Duration::from_secs(10 * 60) + Duration::from_millis(1)).await;
        assert_eq!(api.calls().syncs, 1);

        schedule.cancel();
        time::sleep(Duration::from_secs(2 * 60 * 60)).await;

        let calls = api.calls();
        assert_eq!(calls.syncs, 1);
        assert_eq!(calls.task_fetches, 0);
    }
}
