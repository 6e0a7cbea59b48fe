//! Project persistence.
//!
//! [`ProjectStore`] is the one contract every backend satisfies; callers pick
//! a backend at startup and never mix them at runtime. Two backends ship
//! here: [`MemoryStore`] (plain in-process map) and [`JsonFileStore`] (the
//! same map persisted to a JSON state file after every mutation). Id
//! assignment and record mutation happen under a single mutex, so a created
//! id never collides and an update or delete never observes a half-written
//! record.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::project::{Project, ProjectDraft, ProjectPatch};
use crate::{Error, Result};

/// Storage contract for projects.
pub trait ProjectStore: Send + Sync {
    /// Every stored project, ordered by id.
    fn all(&self) -> Result<Vec<Project>>;

    /// Look up one project by id.
    fn get(&self, id: i64) -> Result<Option<Project>>;

    /// Projects associated with a user.
    fn for_user(&self, user_id: i64) -> Result<Vec<Project>>;

    /// Insert a new project; assigns the id and both timestamps.
    fn create(&self, draft: ProjectDraft) -> Result<Project>;

    /// Merge the supplied fields over an existing record and refresh
    /// `updated_at`. Returns `None` when the id is unknown.
    fn update(&self, id: i64, patch: ProjectPatch) -> Result<Option<Project>>;

    /// Remove a project; true iff a record existed and was removed.
    fn delete(&self, id: i64) -> Result<bool>;

    /// Fetch a project, mapping absence to [`Error::ProjectNotFound`].
    fn get_required(&self, id: i64) -> Result<Project> {
        self.get(id)?.ok_or(Error::ProjectNotFound(id))
    }
}

// Map plus id counter; both backends share this shape and mutate it under
// one lock.
#[derive(Debug)]
struct Inner {
    next_id: i64,
    projects: HashMap<i64, Project>,
}

impl Default for Inner {
    fn default() -> Self {
        Inner {
            next_id: 1,
            projects: HashMap::new(),
        }
    }
}

impl Inner {
    fn all(&self) -> Vec<Project> {
        let mut projects: Vec<Project> = self.projects.values().cloned().collect();
        projects.sort_by_key(|p| p.id);
        projects
    }

    fn create(&mut self, draft: ProjectDraft) -> Project {
        let id = self.next_id;
        self.next_id += 1;
        let now = Utc::now();
        let project = Project {
            id,
            name: draft.name,
            description: draft.description,
            user_id: draft.user_id,
            blocks: draft.blocks,
            created_at: now,
            updated_at: now,
        };
        self.projects.insert(id, project.clone());
        project
    }

    fn update(&mut self, id: i64, patch: ProjectPatch) -> Option<Project> {
        let project = self.projects.get_mut(&id)?;
        patch.apply(project);
        project.updated_at = Utc::now();
        Some(project.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| Error::Storage("store mutex poisoned".to_string()))
}

/// In-memory backend. State lives for the lifetime of the instance.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl ProjectStore for MemoryStore {
    fn all(&self) -> Result<Vec<Project>> {
        Ok(lock(&self.inner)?.all())
    }

    fn get(&self, id: i64) -> Result<Option<Project>> {
        Ok(lock(&self.inner)?.projects.get(&id).cloned())
    }

    fn for_user(&self, user_id: i64) -> Result<Vec<Project>> {
        let mut projects: Vec<Project> = lock(&self.inner)?
            .projects
            .values()
            .filter(|p| p.user_id == Some(user_id))
            .cloned()
            .collect();
        projects.sort_by_key(|p| p.id);
        Ok(projects)
    }

    fn create(&self, draft: ProjectDraft) -> Result<Project> {
        Ok(lock(&self.inner)?.create(draft))
    }

    fn update(&self, id: i64, patch: ProjectPatch) -> Result<Option<Project>> {
        Ok(lock(&self.inner)?.update(id, patch))
    }

    fn delete(&self, id: i64) -> Result<bool> {
        Ok(lock(&self.inner)?.projects.remove(&id).is_some())
    }
}

// On-disk shape of a file store: the counter is persisted so ids stay
// monotonic across reopen.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    next_id: i64,
    projects: Vec<Project>,
}

/// File-backed backend: the whole store state is rewritten to one JSON file
/// after every mutation, via a temp file and rename so readers never see a
/// partial write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading any existing state. A missing file
    /// starts an empty store; an unparseable file is logged and discarded
    /// rather than blocking startup.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let inner = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<PersistedState>(&raw) {
                Ok(state) => {
                    let highest = state.projects.iter().map(|p| p.id).max().unwrap_or(0);
                    Inner {
                        next_id: state.next_id.max(highest + 1).max(1),
                        projects: state.projects.into_iter().map(|p| (p.id, p)).collect(),
                    }
                }
                Err(err) => {
                    log::warn!("Failed to parse store file {}: {err}", path.display());
                    Inner::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Inner::default(),
            Err(err) => return Err(Error::Io(err)),
        };
        Ok(JsonFileStore {
            path,
            inner: Mutex::new(inner),
        })
    }

    fn persist(&self, inner: &Inner) -> Result<()> {
        let state = PersistedState {
            next_id: inner.next_id,
            projects: inner.all(),
        };
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&state)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ProjectStore for JsonFileStore {
    fn all(&self) -> Result<Vec<Project>> {
        Ok(lock(&self.inner)?.all())
    }

    fn get(&self, id: i64) -> Result<Option<Project>> {
        Ok(lock(&self.inner)?.projects.get(&id).cloned())
    }

    fn for_user(&self, user_id: i64) -> Result<Vec<Project>> {
        let mut projects: Vec<Project> = lock(&self.inner)?
            .projects
            .values()
            .filter(|p| p.user_id == Some(user_id))
            .cloned()
            .collect();
        projects.sort_by_key(|p| p.id);
        Ok(projects)
    }

    fn create(&self, draft: ProjectDraft) -> Result<Project> {
        let mut inner = lock(&self.inner)?;
        let project = inner.create(draft);
        self.persist(&inner)?;
        Ok(project)
    }

    fn update(&self, id: i64, patch: ProjectPatch) -> Result<Option<Project>> {
        let mut inner = lock(&self.inner)?;
        let updated = inner.update(id, patch);
        if updated.is_some() {
            self.persist(&inner)?;
        }
        Ok(updated)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let mut inner = lock(&self.inner)?;
        let removed = inner.projects.remove(&id).is_some();
        if removed {
            self.persist(&inner)?;
        }
        Ok(removed)
    }
}
