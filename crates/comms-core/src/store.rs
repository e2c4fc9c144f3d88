use crate::error::{CommsError, Result};
use crate::project::{Project, ProjectFile};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// JSON-file-backed project store.
///
/// Every mutation is a full read-modify-write of the file. Clones share a
/// mutex so mutations from one process are serialized; nothing guards
/// against other processes writing the same file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl Store {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // -----------------------------------------------------------------------
    // Raw file access
    // -----------------------------------------------------------------------

    /// Read the whole file. A missing file is an empty project list.
    pub fn load(&self) -> Result<ProjectFile> {
        if !self.path.exists() {
            return Ok(ProjectFile::default());
        }
        let data = std::fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(ProjectFile::default());
        }
        Ok(serde_json::from_str(&data)?)
    }

    /// Write the whole file as pretty JSON.
    pub fn save(&self, file: &ProjectFile) -> Result<()> {
        let data = serde_json::to_string_pretty(file)?;
        crate::io::atomic_write(&self.path, data.as_bytes())?;
        debug!(path = %self.path.display(), projects = file.projects.len(), "saved project store");
        Ok(())
    }

    /// Create an empty data file if none exists. Returns true if created.
    pub fn init(&self) -> Result<bool> {
        let data = serde_json::to_string_pretty(&ProjectFile::default())?;
        crate::io::write_if_missing(&self.path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Project operations
    // -----------------------------------------------------------------------

    pub fn list(&self) -> Result<Vec<Project>> {
        Ok(self.load()?.projects)
    }

    pub fn get(&self, id: &str) -> Result<Project> {
        self.load()?
            .projects
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CommsError::ProjectNotFound(id.to_string()))
    }

    pub fn insert(&self, project: Project) -> Result<Project> {
        let _guard = self.lock();
        let mut file = self.load()?;
        file.projects.push(project.clone());
        self.save(&file)?;
        Ok(project)
    }

    /// Load, apply `f` to the project with `id`, and save.
    ///
    /// Nothing is written when the project does not exist or `f` fails.
    pub fn update<T, F>(&self, id: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Project) -> Result<T>,
    {
        let _guard = self.lock();
        let mut file = self.load()?;
        let project = file
            .find_mut(id)
            .ok_or_else(|| CommsError::ProjectNotFound(id.to_string()))?;
        let out = f(project)?;
        self.save(&file)?;
        Ok(out)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        // A poisoned lock only means another writer panicked; the file is
        // still consistent thanks to the atomic rename.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
