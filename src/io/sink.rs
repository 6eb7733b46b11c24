use std::{collections::HashMap, fs, path::PathBuf, sync::Arc};

use tracing::info;

use crate::error::Result;

/// Write access to exported files by name, e.g. "results.kml".
/// Implemented by whatever hands files to the user.
pub trait ExportSink {
    fn put(&mut self, name: &str, bytes: &[u8]) -> Result<()>;
}

/// Hand a buffer to a sink, logging the delivery.
pub fn deliver(sink: &mut dyn ExportSink, name: &str, bytes: &[u8]) -> Result<()> {
    sink.put(name, bytes)?;
    info!(file = name, bytes = bytes.len(), "delivered export");
    Ok(())
}

/// Writes exports into a directory.
pub struct DiskSink {
    root: PathBuf,
}

impl DiskSink {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    fn full(&self, name: &str) -> PathBuf { self.root.join(name) }
}

impl ExportSink for DiskSink {
    fn put(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.full(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        Ok(())
    }
}

/// Keeps exports in memory, keyed by file name.
#[derive(Default, Clone)]
pub struct MemSink {
    pub(crate) files: HashMap<String, Arc<[u8]>>,
}

impl MemSink {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, name: &str) -> Option<&[u8]> { self.files.get(name).map(|bytes| &bytes[..]) }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.files.keys().map(String::as_str) }
}

impl ExportSink for MemSink {
    fn put(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.files.insert(name.to_string(), Arc::from(bytes));
        Ok(())
    }
}
