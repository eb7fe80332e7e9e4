use std::{
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use parking_lot::{Mutex, RwLock};

use super::event::AccessEvent;

/// Append-only log of access decisions.
///
/// Recording is fire-and-forget: a journal write failure degrades
/// observability, never the access decision. The in-memory mirror
/// serves front-end display; when a journal file is configured, the
/// file is the durable authority.
pub struct EventLog {
    entries: RwLock<Vec<AccessEvent>>,
    journal: Option<Mutex<BufWriter<File>>>,
}

impl EventLog {
    /// Log kept in memory only; entries die with the process.
    pub fn in_memory() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            journal: None,
        }
    }

    /// Opens (or creates) a JSONL journal file, one event per line,
    /// appended and flushed per record. Existing entries preload the
    /// in-memory mirror, so the mirror always reflects the authority.
    pub fn with_journal<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        let entries = Self::replay(path.as_ref())?;
        Ok(Self {
            entries: RwLock::new(entries),
            journal: Some(Mutex::new(BufWriter::new(file))),
        })
    }

    /// Appends an entry. Never blocks the decision path on journal
    /// failures; those are reported through tracing and dropped.
    pub fn record(&self, event: AccessEvent) {
        if let Some(journal) = &self.journal {
            if let Err(err) = Self::append_line(&mut journal.lock(), &event) {
                tracing::warn!(error = %err, "event journal write failed");
            }
        }
        self.entries.write().push(event);
    }

    fn append_line(writer: &mut BufWriter<File>, event: &AccessEvent) -> io::Result<()> {
        let line = serde_json::to_string(event)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }

    /// All entries in insertion (= chronological) order.
    pub fn list(&self) -> Vec<AccessEvent> {
        self.entries.read().clone()
    }

    /// The most recent `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> Vec<AccessEvent> {
        let entries = self.entries.read();
        let start = entries.len().saturating_sub(n);
        entries[start..].to_vec()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Reads a journal file back into memory. Malformed lines are
    /// skipped with a warning rather than failing the whole replay.
    pub fn replay<P: AsRef<Path>>(path: P) -> io::Result<Vec<AccessEvent>> {
        let reader = BufReader::new(File::open(path)?);
        let mut events = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<AccessEvent>(&line) {
                Ok(event) => events.push(event),
                Err(err) => tracing::warn!(error = %err, "skipping malformed journal line"),
            }
        }
        Ok(events)
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::in_memory()
    }
}
