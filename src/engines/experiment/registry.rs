use crate::engines::metrics::ExperimentRecord;
use crate::error::Result;
use std::fs;
use std::path::PathBuf;

const ARTIFACT_EXTENSION: &str = "json";

/// Completion state of a sweep, kept as one artifact per finished configuration.
///
/// The results directory is the only source of truth: a configuration is done
/// exactly when `<results_dir>/<name>.json` exists.
#[derive(Debug, Clone)]
pub struct RunRegistry {
    results_dir: PathBuf,
}

impl RunRegistry {
    pub fn new<P: Into<PathBuf>>(results_dir: P) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.results_dir
            .join(format!("{}.{}", name, ARTIFACT_EXTENSION))
    }

    pub fn is_completed(&self, name: &str) -> bool {
        self.artifact_path(name).is_file()
    }

    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.results_dir)?;
        Ok(())
    }

    /// Names of every completed configuration, sorted
    pub fn completed(&self) -> Result<Vec<String>> {
        if !self.results_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.results_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ARTIFACT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Persist the consolidated artifact, marking the configuration complete
    pub fn record(&self, record: &ExperimentRecord) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.artifact_path(&record.name);
        record.save(&path)?;
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<ExperimentRecord> {
        ExperimentRecord::load(&self.artifact_path(name))
    }
}
