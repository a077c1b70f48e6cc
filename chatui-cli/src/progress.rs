//! Concurrent activity indicator shown while a backend call is pending

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Poll interval for the cancellation flag
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// A cancellable spinner driven by a background task.
///
/// `stop` consumes the handle, so stopping twice or stopping without a
/// prior `start` cannot be expressed.
pub struct ProgressIndicator {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl ProgressIndicator {
    /// Spawn the spinner task
    pub fn start(message: impl Into<String>) -> Self {
        let token = CancellationToken::new();
        let watcher = token.clone();
        let message = message.into();

        let task = tokio::spawn(async move {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message(message);

            loop {
                tokio::select! {
                    _ = watcher.cancelled() => break,
                    _ = tokio::time::sleep(TICK_INTERVAL) => spinner.tick(),
                }
            }

            spinner.finish_and_clear();
        });

        Self { token, task }
    }

    /// Cancel the spinner and wait for its background task to finish.
    ///
    /// After this returns, no further spinner output is emitted and the
    /// spinner line has been cleared.
    pub async fn stop(self) {
        self.token.cancel();
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stop_joins_the_background_task() {
        let indicator = ProgressIndicator::start("working");
        tokio::time::sleep(Duration::from_millis(250)).await;
        indicator.stop().await;
    }

    #[tokio::test]
    async fn test_stop_before_first_tick() {
        let indicator = ProgressIndicator::start("working");
        indicator.stop().await;
    }
}
