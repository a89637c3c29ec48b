//! Owned handle for a background timer task

use std::future::Future;
use tokio::task::JoinHandle;
use tracing::debug;

/// A spawned timer task that lives exactly as long as its handle.
///
/// Dropping the handle aborts the task; that is the only release path.
#[derive(Debug)]
pub struct ScopedTask {
    name: &'static str,
    run_id: u64,
    handle: JoinHandle<()>,
}

impl ScopedTask {
    pub fn spawn<F>(name: &'static str, run_id: u64, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        debug!("Acquiring {} timer for run {}", name, run_id);
        Self {
            name,
            run_id,
            handle: tokio::spawn(future),
        }
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScopedTask {
    fn drop(&mut self) {
        debug!("Releasing {} timer for run {}", self.name, self.run_id);
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::{
            atomic::{AtomicU32, Ordering},
            Arc,
        },
        time::Duration,
    };

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_the_task() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);
        let task = ScopedTask::spawn("test", 1, async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            loop {
                interval.tick().await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        assert_eq!(task.run_id(), 1);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        let before = ticks.load(Ordering::SeqCst);
        assert!(before >= 2);

        drop(task);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), before);
    }

    #[tokio::test]
    async fn finished_task_reports_finished() {
        let task = ScopedTask::spawn("test", 2, async {});
        tokio::task::yield_now().await;
        for _ in 0..100 {
            if task.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(task.is_finished());
    }
}
