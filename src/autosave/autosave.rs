use super::*;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;
use tokio::sync::watch;

enum Command<T> {
    Stage(T),
    Flush(oneshot::Sender<anyhow::Result<()>>),
}

/// Handle to a background writer.
///
/// Snapshots are staged without waiting. The writer keeps only the newest
/// one and stores it once no newer snapshot has arrived for a full
/// debounce window, so a burst of edits costs one write. Dropping the
/// handle writes whatever is still pending and stops the task.
pub struct Autosave<T> {
    tx: UnboundedSender<Command<T>>,
    health: watch::Receiver<Health>,
}

impl<T> Autosave<T>
where
    T: Send + 'static,
{
    /// Spawn the writer on the current tokio runtime.
    pub fn spawn<S>(sink: S, window: Duration) -> Self
    where
        S: Sink<T>,
    {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let (report, health) = watch::channel(Health::Idle);
        let writer = Writer {
            sink,
            rx,
            report,
            timer: Debounce::new(window),
            pending: None,
        };
        tokio::spawn(writer.run());
        Self { tx, health }
    }

    /// Queue a snapshot. Returns immediately.
    pub fn stage(&self, snapshot: T) {
        if self.tx.send(Command::Stage(snapshot)).is_err() {
            log::warn!("[autosave] writer is gone, snapshot dropped");
        }
    }

    /// Write the pending snapshot now and wait for the outcome.
    pub async fn flush(&self) -> anyhow::Result<()> {
        let (reply, outcome) = oneshot::channel();
        self.tx
            .send(Command::Flush(reply))
            .map_err(|_| anyhow::anyhow!("autosave writer stopped"))?;
        outcome
            .await
            .map_err(|_| anyhow::anyhow!("autosave writer stopped"))?
    }

    /// Stage a snapshot and write it immediately.
    pub async fn save(&self, snapshot: T) -> anyhow::Result<()> {
        self.stage(snapshot);
        self.flush().await
    }

    pub fn health(&self) -> Health {
        self.health.borrow().clone()
    }

    /// Subscribe to outcome changes.
    pub fn status(&self) -> watch::Receiver<Health> {
        self.health.clone()
    }
}

struct Writer<S, T> {
    sink: S,
    rx: UnboundedReceiver<Command<T>>,
    report: watch::Sender<Health>,
    timer: Debounce,
    pending: Option<T>,
}

impl<S, T> Writer<S, T>
where
    S: Sink<T>,
    T: Send + 'static,
{
    async fn run(mut self) {
        loop {
            let deadline = self.timer.deadline();
            let quiet = async move {
                match deadline {
                    Some(deadline) => tokio::time::sleep_until(deadline).await,
                    None => std::future::pending().await,
                }
            };
            tokio::select! {
                command = self.rx.recv() => match command {
                    Some(Command::Stage(snapshot)) => {
                        self.pending = Some(snapshot);
                        self.timer.mark();
                        self.report.send_replace(Health::Pending);
                    }
                    Some(Command::Flush(reply)) => {
                        let _ = reply.send(self.write().await);
                    }
                    None => {
                        let _ = self.write().await;
                        break;
                    }
                },
                _ = quiet => {
                    let _ = self.write().await;
                }
            }
        }
        log::debug!("[autosave] writer stopped");
    }

    async fn write(&mut self) -> anyhow::Result<()> {
        self.timer.clear();
        let Some(snapshot) = self.pending.take() else {
            return Ok(());
        };
        match self.sink.store(snapshot).await {
            Ok(()) => {
                log::debug!("[autosave] snapshot stored");
                self.report.send_replace(Health::Saved);
                Ok(())
            }
            Err(e) => {
                log::warn!("[autosave] store failed, keeping local state: {}", e);
                self.report.send_replace(Health::Failed(e.to_string()));
                Err(e)
            }
        }
    }
}
