// Append-only session log: one pretty-printed JSON record per response.
//
// Writes go through a single in-process mutex so concurrent requests never
// interleave partial records. There is no rotation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::interview::classifier::EntityBuckets;

/// One stakeholder response as stored. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub response: String,
    pub entities: EntityBuckets,
    pub follow_up_question: Option<String>,
    pub question_number: u32,
    pub recorded_at: DateTime<Utc>,
}

pub struct SessionLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SessionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, record: &InterviewRecord) -> std::io::Result<()> {
        let bytes = encode(record)?;

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        debug!(
            "Appended record for question {} to {}",
            record.question_number,
            self.path.display()
        );
        Ok(())
    }

    /// Parses every record in the file. A missing file holds zero records.
    pub async fn read_all(&self) -> std::io::Result<Vec<InterviewRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let records = serde_json::Deserializer::from_slice(&bytes)
            .into_iter::<InterviewRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    pub async fn count(&self) -> std::io::Result<usize> {
        Ok(self.read_all().await?.len())
    }
}

/// Pretty JSON with 4-space indent, newline-terminated.
fn encode(record: &InterviewRecord) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}
