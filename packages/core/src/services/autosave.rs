//! Background Auto-Save
//!
//! Event-driven, debounced persistence of edited notes:
//! - Woken only by `schedule()` calls; zero work while idle
//! - Latest snapshot per note id wins; older pending snapshots are replaced
//! - Pending notes are saved once no new snapshot arrived for the debounce period
//! - Save failures are logged and dropped, never surfaced to the editor
//!
//! `flush()` saves pending notes immediately (e.g. before closing a note);
//! `shutdown()` flushes and stops the background task.

use crate::models::Note;
use crate::store::NoteStore;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;

enum Command {
    Schedule(Box<Note>),
    Flush(oneshot::Sender<usize>),
}

/// Cloneable handle for queueing saves
///
/// Cheap to clone and non-blocking, so it can be handed to every editor.
#[derive(Clone)]
pub struct AutoSaveHandle {
    command_tx: mpsc::UnboundedSender<Command>,
}

impl AutoSaveHandle {
    /// Queue a snapshot of `note` for saving
    pub fn schedule(&self, note: Note) {
        let id = note.id.clone();
        match self.command_tx.send(Command::Schedule(Box::new(note))) {
            Ok(()) => tracing::debug!("Auto-save scheduled for note {}", id),
            Err(_) => tracing::warn!("AutoSaver has shut down, save of note {} ignored", id),
        }
    }

    /// Save every pending note now; returns how many saves succeeded
    pub async fn flush(&self) -> usize {
        let (done_tx, done_rx) = oneshot::channel();
        if self.command_tx.send(Command::Flush(done_tx)).is_err() {
            tracing::warn!("AutoSaver has shut down, flush ignored");
            return 0;
        }
        done_rx.await.unwrap_or(0)
    }
}

/// Debounced background saver
pub struct AutoSaver {
    handle: AutoSaveHandle,
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl AutoSaver {
    /// Start the background task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(store: Arc<dyn NoteStore>, debounce: Duration) -> Self {
        tracing::info!("AutoSaver starting (debounce {:?})", debounce);

        let (command_tx, mut command_rx) = mpsc::unbounded_channel::<Command>();
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let task = tokio::spawn(async move {
            let mut pending: HashMap<String, Note> = HashMap::new();
            let timer = tokio::time::sleep(debounce);
            tokio::pin!(timer);
            let mut armed = false;

            loop {
                tokio::select! {
                    biased; // Check shutdown first

                    _ = shutdown_rx.recv() => {
                        // Keep snapshots that raced with the shutdown signal
                        while let Ok(command) = command_rx.try_recv() {
                            Self::apply(command, &mut pending, &store).await;
                        }
                        Self::save_pending(&store, &mut pending).await;
                        tracing::info!("AutoSaver shutting down");
                        break;
                    }

                    command = command_rx.recv() => match command {
                        Some(Command::Schedule(note)) => {
                            pending.insert(note.id.clone(), *note);
                            timer.as_mut().reset(Instant::now() + debounce);
                            armed = true;
                        }
                        Some(flush @ Command::Flush(_)) => {
                            Self::apply(flush, &mut pending, &store).await;
                            armed = false;
                        }
                        None => {
                            Self::save_pending(&store, &mut pending).await;
                            tracing::debug!("All AutoSave handles dropped, stopping");
                            break;
                        }
                    },

                    _ = &mut timer, if armed => {
                        armed = false;
                        Self::save_pending(&store, &mut pending).await;
                    }
                }
            }
        });

        Self {
            handle: AutoSaveHandle { command_tx },
            shutdown_tx,
            task,
        }
    }

    /// Get a cloneable handle
    pub fn handle(&self) -> AutoSaveHandle {
        self.handle.clone()
    }

    pub fn schedule(&self, note: Note) {
        self.handle.schedule(note);
    }

    pub async fn flush(&self) -> usize {
        self.handle.flush().await
    }

    /// Save pending notes and stop the background task
    pub async fn shutdown(self) {
        tracing::info!("Shutting down AutoSaver");
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            tracing::warn!("AutoSaver task ended abnormally: {}", e);
        }
    }

    async fn apply(
        command: Command,
        pending: &mut HashMap<String, Note>,
        store: &Arc<dyn NoteStore>,
    ) {
        match command {
            Command::Schedule(note) => {
                pending.insert(note.id.clone(), *note);
            }
            Command::Flush(done) => {
                let saved = Self::save_pending(store, pending).await;
                let _ = done.send(saved);
            }
        }
    }

    async fn save_pending(
        store: &Arc<dyn NoteStore>,
        pending: &mut HashMap<String, Note>,
    ) -> usize {
        let mut saved = 0;
        for (id, note) in pending.drain() {
            match store.save(&note).await {
                Ok(()) => saved += 1,
                Err(e) => tracing::warn!("Auto-save of note {} failed: {}", id, e),
            }
        }
        if saved > 0 {
            tracing::debug!("AutoSaver saved {} notes", saved);
        }
        saved
    }
}
