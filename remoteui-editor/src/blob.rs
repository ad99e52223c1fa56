//! File fields: base64 payloads read on demand.
//!
//! A field whose server-side value already holds a file is sent as the
//! [`EXISTING_FILE_MARKER`] instead of its content. The editor echoes the
//! marker back unless the user picked a new file or cleared the field.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;

use crate::error::{EditorError, Result};

/// Stands in for a file the server already has.
pub const EXISTING_FILE_MARKER: &str = "<FILE>";

/// A user-selected file whose bytes are read when the data is collected.
#[async_trait]
pub trait BlobSource: Send + Sync + fmt::Debug {
    /// Display name, used in read errors.
    fn name(&self) -> &str;

    async fn read(&self) -> io::Result<Vec<u8>>;
}

/// Bytes already in memory.
#[derive(Debug, Clone)]
pub struct MemoryBlob {
    name: String,
    bytes: Vec<u8>,
}

impl MemoryBlob {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl BlobSource for MemoryBlob {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// A file on the local filesystem, read with `tokio::fs`.
#[derive(Debug, Clone)]
pub struct FileBlob {
    path: PathBuf,
    name: String,
}

impl FileBlob {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BlobSource for FileBlob {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

#[derive(Debug, Clone)]
pub struct BlobNode {
    nullable: bool,
    had_existing: bool,
    use_existing: bool,
    file: Option<Arc<dyn BlobSource>>,
}

impl BlobNode {
    pub fn new(nullable: bool, raw: &Value) -> Self {
        let had_existing = raw.as_str() == Some(EXISTING_FILE_MARKER);
        Self {
            nullable,
            had_existing,
            use_existing: had_existing,
            file: None,
        }
    }

    /// Whether the server reported a file for this field.
    pub fn had_existing(&self) -> bool {
        self.had_existing
    }

    /// Whether the existing file will be kept.
    pub fn uses_existing(&self) -> bool {
        self.use_existing
    }

    pub fn file(&self) -> Option<&dyn BlobSource> {
        self.file.as_deref()
    }

    pub fn set_new_file(&mut self, file: impl BlobSource + 'static) {
        self.file = Some(Arc::new(file));
        self.use_existing = false;
    }

    /// Drop the selected file. A non-nullable field falls back to the
    /// existing file, if there was one.
    pub fn delete(&mut self) {
        self.file = None;
        self.use_existing = !self.nullable && self.had_existing;
    }

    /// Go back to the existing file. No-op when there never was one.
    pub fn use_old(&mut self) {
        if self.had_existing {
            self.use_existing = true;
        }
    }

    pub async fn get_data(&self) -> Result<Value> {
        if self.use_existing {
            return Ok(Value::String(EXISTING_FILE_MARKER.to_string()));
        }
        let Some(file) = &self.file else {
            return Ok(Value::Null);
        };
        let bytes = file.read().await.map_err(|source| EditorError::BlobRead {
            name: file.name().to_string(),
            source,
        })?;
        Ok(Value::String(STANDARD.encode(bytes)))
    }
}
