//! Live note store: serialized writes plus push-based query feeds.
//!
//! # Responsibility
//! - Own the SQLite connection on a dedicated worker thread (single
//!   logical writer).
//! - Accept asynchronous mutations over a command channel and report each
//!   outcome through a per-call result channel.
//! - Maintain live query subscriptions and republish a full snapshot to
//!   every subscriber after each successful mutation.
//!
//! # Invariants
//! - All reads and writes happen on the worker thread, in command order.
//! - A feed's first delivery is a snapshot reflecting every command queued
//!   before the subscription.
//! - Dropping the store closes the command channel and joins the worker;
//!   feeds end and pending tickets resolve to `StoreError::Closed`.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::note::{Note, NoteFilter, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError, SqliteNoteRepository};
use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error surface of asynchronous store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Persistence-layer failure, including `NotFound` on update.
    Repo(RepoError),
    /// The store worker has shut down; the operation was not performed.
    Closed,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Closed => write!(f, "note store is closed"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Closed => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Outcome ticket for one asynchronous mutation.
///
/// Holding the ticket is optional: dropping it makes the call
/// fire-and-forget, while [`wait`](Self::wait) turns it into a blocking
/// call that observes success or failure.
#[derive(Debug)]
pub struct PendingWrite<T> {
    outcome: Receiver<StoreResult<T>>,
}

impl<T> PendingWrite<T> {
    /// Blocks until the worker has performed the mutation.
    pub fn wait(self) -> StoreResult<T> {
        self.outcome.recv().unwrap_or(Err(StoreError::Closed))
    }

    /// Like [`wait`](Self::wait), but gives up after `timeout`.
    ///
    /// Returns `None` when the outcome did not arrive in time.
    pub fn wait_timeout(self, timeout: Duration) -> Option<StoreResult<T>> {
        match self.outcome.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Disconnected) => Some(Err(StoreError::Closed)),
            Err(RecvTimeoutError::Timeout) => None,
        }
    }
}

/// Receiving end of one live query.
///
/// Delivers the full current result list on subscription, then a fresh
/// full snapshot after every successful mutation. The feed ends when the
/// store shuts down.
#[derive(Debug)]
pub struct NoteFeed {
    snapshots: Receiver<Vec<Note>>,
}

impl NoteFeed {
    /// Blocks for the next snapshot. `None` means the store is gone.
    pub fn recv(&self) -> Option<Vec<Note>> {
        self.snapshots.recv().ok()
    }

    /// Blocks for the next snapshot up to `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Vec<Note>> {
        self.snapshots.recv_timeout(timeout).ok()
    }

    /// Returns a snapshot only if one is already queued.
    pub fn try_recv(&self) -> Option<Vec<Note>> {
        self.snapshots.try_recv().ok()
    }
}

enum Command {
    Insert {
        note: Note,
        done: Sender<StoreResult<NoteId>>,
    },
    Update {
        note: Note,
        done: Sender<StoreResult<()>>,
    },
    Delete {
        id: NoteId,
        done: Sender<StoreResult<()>>,
    },
    Watch {
        filter: NoteFilter,
        snapshots: Sender<Vec<Note>>,
    },
}

/// Handle to the live note store.
///
/// Constructed once at process start and passed down explicitly; there is
/// no process-wide singleton. Cloning is intentionally not offered: the
/// handle's lifetime scopes the worker and every feed derived from it.
pub struct NoteStore {
    command_tx: Option<Sender<Command>>,
    worker: Option<JoinHandle<()>>,
}

impl NoteStore {
    /// Opens (or creates) the database file and starts the worker thread.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = open_db(path)?;
        Ok(Self::start(conn))
    }

    /// Starts a store over an in-memory database. Used by tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self::start(conn))
    }

    fn start(conn: Connection) -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        let worker = thread::spawn(move || run_worker(conn, command_rx));
        Self {
            command_tx: Some(command_tx),
            worker: Some(worker),
        }
    }

    /// Queues an insert. The stored id is assigned by the worker and
    /// reported through the returned ticket.
    pub fn insert(&self, note: Note) -> PendingWrite<NoteId> {
        self.submit(|done| Command::Insert { note, done })
    }

    /// Queues a wholesale replacement of the record with `note.id`.
    pub fn update(&self, note: Note) -> PendingWrite<()> {
        self.submit(|done| Command::Update { note, done })
    }

    /// Queues a delete by id. Unknown ids resolve to `Ok(())`.
    pub fn delete(&self, id: NoteId) -> PendingWrite<()> {
        self.submit(|done| Command::Delete { id, done })
    }

    /// Subscribes to the full note list, most recently created first.
    pub fn watch_all(&self) -> NoteFeed {
        self.watch(NoteFilter::default())
    }

    /// Subscribes to the filtered note list for `filter`.
    pub fn watch(&self, filter: NoteFilter) -> NoteFeed {
        let (snapshot_tx, snapshot_rx) = mpsc::channel();
        self.send_command(Command::Watch {
            filter,
            snapshots: snapshot_tx,
        });
        NoteFeed {
            snapshots: snapshot_rx,
        }
    }

    fn submit<T>(&self, build: impl FnOnce(Sender<StoreResult<T>>) -> Command) -> PendingWrite<T> {
        let (done_tx, done_rx) = mpsc::channel();
        self.send_command(build(done_tx));
        PendingWrite { outcome: done_rx }
    }

    fn send_command(&self, command: Command) {
        let delivered = self
            .command_tx
            .as_ref()
            .is_some_and(|tx| tx.send(command).is_ok());
        if !delivered {
            // The command (and its result sender) is dropped here, so any
            // ticket resolves to StoreError::Closed and any feed ends.
            error!("event=store_command module=store status=error error_code=worker_unavailable");
        }
    }
}

impl Drop for NoteStore {
    fn drop(&mut self) {
        // Closing the command channel ends the worker loop.
        self.command_tx.take();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

struct Subscriber {
    filter: NoteFilter,
    snapshots: Sender<Vec<Note>>,
}

fn run_worker(conn: Connection, commands: Receiver<Command>) {
    info!("event=store_worker module=store status=start");
    let mut subscribers: Vec<Subscriber> = Vec::new();

    while let Ok(command) = commands.recv() {
        match command {
            Command::Insert { note, done } => {
                let outcome = SqliteNoteRepository::new(&conn).insert(&note);
                match &outcome {
                    Ok(id) => info!("event=note_insert module=store status=ok id={id}"),
                    Err(err) => {
                        error!("event=note_insert module=store status=error error={err}")
                    }
                }
                if outcome.is_ok() {
                    publish(&conn, &mut subscribers);
                }
                let _ = done.send(outcome.map_err(StoreError::from));
            }
            Command::Update { note, done } => {
                let outcome = SqliteNoteRepository::new(&conn).update(&note);
                match &outcome {
                    Ok(()) => info!("event=note_update module=store status=ok id={}", note.id),
                    Err(err) => error!(
                        "event=note_update module=store status=error id={} error={err}",
                        note.id
                    ),
                }
                if outcome.is_ok() {
                    publish(&conn, &mut subscribers);
                }
                let _ = done.send(outcome.map_err(StoreError::from));
            }
            Command::Delete { id, done } => {
                let outcome = SqliteNoteRepository::new(&conn).delete(id);
                match &outcome {
                    Ok(()) => info!("event=note_delete module=store status=ok id={id}"),
                    Err(err) => {
                        error!("event=note_delete module=store status=error id={id} error={err}")
                    }
                }
                if outcome.is_ok() {
                    publish(&conn, &mut subscribers);
                }
                let _ = done.send(outcome.map_err(StoreError::from));
            }
            Command::Watch { filter, snapshots } => {
                let subscriber = Subscriber { filter, snapshots };
                if deliver(&conn, &subscriber) {
                    subscribers.push(subscriber);
                }
            }
        }
    }

    info!("event=store_worker module=store status=stop");
}

/// Re-runs every subscription's query and sends the fresh snapshot.
/// Subscribers whose receiving end is gone are dropped.
fn publish(conn: &Connection, subscribers: &mut Vec<Subscriber>) {
    subscribers.retain(|subscriber| deliver(conn, subscriber));
}

/// Runs one subscriber's query and delivers the snapshot.
///
/// Returns `false` only when the receiver is disconnected. A failed read
/// is logged and the subscription kept; the next mutation retries it.
fn deliver(conn: &Connection, subscriber: &Subscriber) -> bool {
    let repo = SqliteNoteRepository::new(conn);
    let snapshot = if subscriber.filter.is_match_all() {
        repo.list_all()
    } else {
        repo.search(&subscriber.filter)
    };

    match snapshot {
        Ok(notes) => subscriber.snapshots.send(notes).is_ok(),
        Err(err) => {
            error!("event=live_query module=store status=error error={err}");
            true
        }
    }
}
