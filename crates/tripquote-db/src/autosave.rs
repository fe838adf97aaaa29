//! # Auto-Save
//!
//! Debounced persistence for the pricing editor. Every edit schedules a
//! save; the save only happens once edits stop for the configured delay.
//!
//! ## Task Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Auto-Save Task                                   │
//! │                                                                         │
//! │  Editor                       AutoSaver (tokio task)                    │
//! │  ──────                       ──────────────────────                    │
//! │  handle.schedule(cfg) ──────► pending = cfg, deadline = now + delay    │
//! │  handle.schedule(cfg') ─────► pending = cfg', deadline restarts        │
//! │                                    │                                    │
//! │                               deadline reached                          │
//! │                                    ▼                                    │
//! │                               sink.persist(pending) ─► log outcome      │
//! │                                                                         │
//! │  handle.cancel() ───────────► pending dropped, nothing saved           │
//! │  handle.flush() ────────────► persist pending now, reply with report   │
//! │  handle.shutdown() ─────────► task exits (pending discarded)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The timer is owned by the task; there is no process-wide state. A save
//! failure is logged and the task keeps running.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info, warn};

use tripquote_core::{ConfigReport, PricingConfig};

use crate::error::{DbError, DbResult};
use crate::repository::pricing::PricingConfigRepository;

/// Default debounce delay between the last edit and the save.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(1000);

// =============================================================================
// Sink
// =============================================================================

/// Where the auto-saver writes configurations.
pub trait ConfigSink: Send + Sync + 'static {
    /// Persists a configuration.
    fn persist(&self, config: &PricingConfig) -> impl Future<Output = DbResult<ConfigReport>> + Send;
}

impl ConfigSink for PricingConfigRepository {
    fn persist(&self, config: &PricingConfig) -> impl Future<Output = DbResult<ConfigReport>> + Send {
        self.save(config)
    }
}

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug)]
enum Command {
    Schedule(Box<PricingConfig>),
    Cancel,
    Flush(oneshot::Sender<DbResult<Option<ConfigReport>>>),
    Shutdown,
}

/// Cloneable handle to a running [`AutoSaver`].
#[derive(Debug, Clone)]
pub struct AutoSaveHandle {
    commands: mpsc::Sender<Command>,
}

impl AutoSaveHandle {
    /// Schedules `config` to be saved after the debounce delay, replacing
    /// any configuration still pending.
    pub async fn schedule(&self, config: PricingConfig) -> DbResult<()> {
        self.send(Command::Schedule(Box::new(config))).await
    }

    /// Drops the pending configuration, if any, before it is saved.
    pub async fn cancel(&self) -> DbResult<()> {
        self.send(Command::Cancel).await
    }

    /// Saves the pending configuration immediately.
    ///
    /// ## Returns
    /// * `Ok(Some(report))` - a pending configuration was saved
    /// * `Ok(None)` - nothing was pending
    /// * `Err(_)` - the save failed or the task has stopped
    pub async fn flush(&self) -> DbResult<Option<ConfigReport>> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Flush(reply)).await?;
        response.await.map_err(|_| DbError::AutoSaveStopped)?
    }

    /// Stops the task. A configuration still pending is not saved; call
    /// [`AutoSaveHandle::flush`] first to keep it.
    pub async fn shutdown(&self) -> DbResult<()> {
        self.send(Command::Shutdown).await
    }

    /// Whether the task is still running.
    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    async fn send(&self, command: Command) -> DbResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| DbError::AutoSaveStopped)
    }
}

// =============================================================================
// Auto-Saver
// =============================================================================

/// The debounce task. Create it with [`AutoSaver::spawn`].
pub struct AutoSaver<S: ConfigSink> {
    sink: S,
    delay: Duration,
    commands: mpsc::Receiver<Command>,
    pending: Option<PricingConfig>,
    deadline: Option<Instant>,
}

impl<S: ConfigSink> AutoSaver<S> {
    /// Creates the task without starting it.
    pub fn new(sink: S, delay: Duration) -> (Self, AutoSaveHandle) {
        let (tx, rx) = mpsc::channel(32);
        let saver = AutoSaver {
            sink,
            delay,
            commands: rx,
            pending: None,
            deadline: None,
        };
        (saver, AutoSaveHandle { commands: tx })
    }

    /// Spawns the task on the current runtime and returns its handle.
    pub fn spawn(sink: S, delay: Duration) -> AutoSaveHandle {
        let (saver, handle) = Self::new(sink, delay);
        tokio::spawn(saver.run());
        handle
    }

    /// Runs the task until shutdown or until every handle is dropped.
    pub async fn run(mut self) {
        info!(delay_ms = self.delay.as_millis() as u64, "Auto-saver starting");

        loop {
            let deadline = self.deadline;
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Schedule(config)) => {
                        self.pending = Some(*config);
                        self.deadline = Some(Instant::now() + self.delay);
                        debug!("Auto-save scheduled");
                    }
                    Some(Command::Cancel) => {
                        if self.pending.take().is_some() {
                            debug!("Pending auto-save cancelled");
                        }
                        self.deadline = None;
                    }
                    Some(Command::Flush(reply)) => {
                        let outcome = self.save_pending().await;
                        let _ = reply.send(outcome);
                    }
                    Some(Command::Shutdown) | None => break,
                },

                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    // Failures are already logged; the editor keeps its copy.
                    let _ = self.save_pending().await;
                }
            }
        }

        if self.pending.is_some() {
            warn!("Auto-saver stopped with an unsaved pricing configuration");
        }
        info!("Auto-saver stopped");
    }

    async fn save_pending(&mut self) -> DbResult<Option<ConfigReport>> {
        self.deadline = None;
        let Some(config) = self.pending.take() else {
            return Ok(None);
        };

        match self.sink.persist(&config).await {
            Ok(report) => {
                debug!(advisories = report.advisory_count(), "Auto-save complete");
                Ok(Some(report))
            }
            Err(e) => {
                error!(error = %e, "Auto-save failed");
                Err(e)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::sleep;
    use tripquote_core::Money;

    use crate::pool::{Database, DbConfig};

    #[derive(Clone, Default)]
    struct RecordingSink {
        saved: Arc<Mutex<Vec<PricingConfig>>>,
    }

    impl RecordingSink {
        fn saved(&self) -> Vec<PricingConfig> {
            self.saved.lock().unwrap().clone()
        }
    }

    impl ConfigSink for RecordingSink {
        fn persist(&self, config: &PricingConfig) -> impl Future<Output = DbResult<ConfigReport>> + Send {
            let saved = Arc::clone(&self.saved);
            let config = config.clone();
            async move {
                saved.lock().unwrap().push(config);
                Ok(ConfigReport::default())
            }
        }
    }

    fn config_with_coverage(coverage: u32) -> PricingConfig {
        PricingConfig {
            coverage_max_people: coverage,
            ..PricingConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_saves_latest_once() {
        let sink = RecordingSink::default();
        let handle = AutoSaver::spawn(sink.clone(), DEFAULT_AUTOSAVE_DELAY);

        handle.schedule(config_with_coverage(11)).await.unwrap();
        sleep(Duration::from_millis(500)).await;
        handle.schedule(config_with_coverage(12)).await.unwrap();

        sleep(Duration::from_millis(999)).await;
        assert!(sink.saved().is_empty());

        sleep(Duration::from_millis(2)).await;
        let saved = sink.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].coverage_max_people, 12);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(sink.saved().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_preempts_pending_save() {
        let sink = RecordingSink::default();
        let handle = AutoSaver::spawn(sink.clone(), DEFAULT_AUTOSAVE_DELAY);

        handle.schedule(config_with_coverage(11)).await.unwrap();
        sleep(Duration::from_millis(300)).await;
        handle.cancel().await.unwrap();

        sleep(Duration::from_secs(3)).await;
        assert!(sink.saved().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_saves_immediately() {
        let sink = RecordingSink::default();
        let handle = AutoSaver::spawn(sink.clone(), DEFAULT_AUTOSAVE_DELAY);

        assert!(handle.flush().await.unwrap().is_none());

        handle.schedule(config_with_coverage(15)).await.unwrap();
        assert!(handle.flush().await.unwrap().is_some());
        assert_eq!(sink.saved().len(), 1);

        sleep(Duration::from_secs(3)).await;
        assert_eq!(sink.saved().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_task() {
        let sink = RecordingSink::default();
        let handle = AutoSaver::spawn(sink.clone(), DEFAULT_AUTOSAVE_DELAY);

        handle.schedule(config_with_coverage(11)).await.unwrap();
        handle.shutdown().await.unwrap();
        sleep(Duration::from_secs(3)).await;

        assert!(sink.saved().is_empty());
        assert!(!handle.is_running());
        assert!(matches!(handle.flush().await, Err(DbError::AutoSaveStopped)));
    }

    #[tokio::test]
    async fn test_flush_writes_to_repository() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let handle = AutoSaver::spawn(db.pricing(), Duration::from_secs(60));

        let mut config = PricingConfig::default();
        config.flight.tiers[0].price = Money::from_cents(70_000);
        handle.schedule(config.clone()).await.unwrap();
        handle.flush().await.unwrap();

        assert_eq!(db.pricing().load().await.unwrap(), config);
    }

    #[tokio::test]
    async fn test_rejected_config_is_reported_on_flush() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let handle = AutoSaver::spawn(db.pricing(), Duration::from_secs(60));

        handle.schedule(config_with_coverage(0)).await.unwrap();
        assert!(matches!(handle.flush().await, Err(DbError::InvalidConfig(_))));
        assert!(handle.is_running());
    }
}
