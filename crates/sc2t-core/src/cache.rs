//! Local title snapshot: one title per line, UTF-8.
//!
//! The cache is an explicit value owned by the run that created it; nothing
//! touches the file except through a `TitleCache`.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TitleCache {
    path: PathBuf,
}

impl TitleCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file if present and recreate it empty.
    pub fn reset(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("remove cache {}", self.path.display()))?;
        }
        self.write(&[])
    }

    /// Titles in file order. A missing file reads as empty; blank lines are skipped.
    pub fn read(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("read cache {}", self.path.display()))?;
        Ok(data
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Overwrite the file with `titles`, one per line.
    ///
    /// Line breaks inside a title are written as spaces so the file stays one
    /// title per line.
    pub fn write(&self, titles: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = fs::File::create(&self.path)
            .with_context(|| format!("create cache {}", self.path.display()))?;
        for title in titles {
            let line = title.replace(['\r', '\n'], " ");
            writeln!(file, "{}", line)?;
        }
        file.flush()?;
        tracing::debug!(path = %self.path.display(), count = titles.len(), "wrote title cache");
        Ok(())
    }
}
