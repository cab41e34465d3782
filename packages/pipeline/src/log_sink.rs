// ABOUTME: Append-only execution log shown to the user
// ABOUTME: Shared ordered entry list with a broadcast feed so viewers can follow the tail

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use auditflow_core::{LogEntry, LogLevel};
use tokio::sync::broadcast;
use tracing::debug;

/// How many unread entries a slow subscriber may lag behind before it skips ahead
const LOG_FEED_CAPACITY: usize = 256;

/// Cloneable handle to the session's execution log.
///
/// Entries are never removed or edited; insertion order is display order.
#[derive(Debug, Clone)]
pub struct LogSink {
    entries: Arc<RwLock<Vec<LogEntry>>>,
    feed: broadcast::Sender<LogEntry>,
}

impl LogSink {
    pub fn new() -> Self {
        let (feed, _) = broadcast::channel(LOG_FEED_CAPACITY);
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            feed,
        }
    }

    /// Stamp a new entry and append it to the end of the log
    pub fn append(&self, level: LogLevel, message: impl Into<String>) -> LogEntry {
        let entry = LogEntry::new(level, message);
        debug!(level = %entry.level, "{}", entry.message);

        self.write().push(entry.clone());
        // Nobody listening is fine; the entry is already stored
        let _ = self.feed.send(entry.clone());
        entry
    }

    pub fn info(&self, message: impl Into<String>) -> LogEntry {
        self.append(LogLevel::Info, message)
    }

    pub fn success(&self, message: impl Into<String>) -> LogEntry {
        self.append(LogLevel::Success, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> LogEntry {
        self.append(LogLevel::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) -> LogEntry {
        self.append(LogLevel::Error, message)
    }

    /// Copy of all entries in append order
    pub fn entries(&self) -> Vec<LogEntry> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Receive every entry appended from now on
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.feed.subscribe()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<LogEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<LogEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}
