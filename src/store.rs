use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Somewhere to keep the best score between runs.
pub trait ScoreStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<u32>>;
    fn save(&mut self, score: u32) -> Result<()>;
}

/// On-disk layout: the `highscore` key plus whatever else shares the file.
#[derive(Serialize, Deserialize, Debug, Default)]
struct ScoreFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    highscore: Option<u32>,
    #[serde(flatten)]
    other: BTreeMap<String, serde_json::Value>,
}

/// A JSON object on disk; this store owns its `highscore` key.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<ScoreFile> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(ScoreFile::default()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ScoreFile::default()),
            Err(source) => Err(Error::Store { path: self.path.clone(), source }),
        }
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> Result<Option<u32>> {
        Ok(self.read_file()?.highscore)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        // Keep whatever else lives in the file, unless it cannot be read.
        let mut file = self.read_file().unwrap_or_else(|e| {
            warn!(error = %e, path = %self.path.display(), "replacing unreadable highscore file");
            ScoreFile::default()
        });
        file.highscore = Some(score);

        let text = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, text).map_err(|source| Error::Store { path: self.path.clone(), source })
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    score: Option<u32>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        MemoryStore { score: Some(score), writes: 0 }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>> {
        Ok(self.score)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.score = Some(score);
        self.writes += 1;
        Ok(())
    }
}
