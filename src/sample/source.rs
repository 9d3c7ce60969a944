use crate::Result;

use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Supplies the ordered raw samples of a logical corpus.
///
/// An unknown corpus is not an error: it simply has no samples.
pub trait SampleSource {
    fn read_samples(&self, corpus_id: &str) -> Result<Vec<String>>;
}

/// Split a log file into samples: one per line, blank lines dropped.
pub fn split_samples(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}

/// Reads `<root>/<corpus_id>/*.log`, files in name order, lines in file order.
#[derive(Debug, Clone)]
pub struct LogDirSource {
    root: PathBuf,
}

impl LogDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn corpus_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in
            fs::read_dir(dir).with_context(|| format!("read sample dir {}", dir.display()))?
        {
            let path = entry
                .with_context(|| format!("list sample dir {}", dir.display()))?
                .path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "log") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl SampleSource for LogDirSource {
    fn read_samples(&self, corpus_id: &str) -> Result<Vec<String>> {
        let dir = self.root.join(corpus_id);
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "corpus dir missing, no samples");
            return Ok(Vec::new());
        }

        let mut samples = Vec::new();
        for path in self.corpus_files(&dir)? {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("read sample file {}", path.display()))?;
            samples.extend(split_samples(&text).map(str::to_string));
        }

        tracing::info!(corpus = corpus_id, samples = samples.len(), "read samples");
        Ok(samples)
    }
}

/// In-memory corpora keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    corpora: BTreeMap<String, Vec<String>>,
}

impl MemorySource {
    pub fn with_corpus(mut self, corpus_id: impl Into<String>, samples: Vec<String>) -> Self {
        self.corpora.insert(corpus_id.into(), samples);
        self
    }
}

impl SampleSource for MemorySource {
    fn read_samples(&self, corpus_id: &str) -> Result<Vec<String>> {
        Ok(self.corpora.get(corpus_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_drops_blank_lines() {
        let text = "first\r\n\r\n  \nsecond\nthird\n";
        let got: Vec<&str> = split_samples(text).collect();
        assert_eq!(got, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_log_dir_reads_files_in_name_order() {
        let root = tempfile::tempdir().unwrap();
        let corpus = root.path().join("gateway");
        fs::create_dir(&corpus).unwrap();
        fs::write(corpus.join("b.log"), "b1\n\nb2\n").unwrap();
        fs::write(corpus.join("a.log"), "a1\r\na2").unwrap();
        fs::write(corpus.join("notes.txt"), "ignored").unwrap();

        let source = LogDirSource::new(root.path());
        let samples = source.read_samples("gateway").unwrap();
        assert_eq!(samples, vec!["a1", "a2", "b1", "b2"]);
    }

    #[test]
    fn test_missing_corpus_is_empty() {
        let root = tempfile::tempdir().unwrap();
        let source = LogDirSource::new(root.path());
        assert!(source.read_samples("nope").unwrap().is_empty());
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::default().with_corpus("gw", vec!["x".to_string()]);
        assert_eq!(source.read_samples("gw").unwrap(), vec!["x"]);
        assert!(source.read_samples("other").unwrap().is_empty());
    }
}
