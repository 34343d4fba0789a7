use crate::Id;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<Id, Arc<Mutex<()>>>;

/// Per-project critical sections guarding AI question synthesis and lazy
/// report generation.
///
/// One `ProjectLocks` is shared by every request in the process; cloning it
/// shares the same map. A project's entry only lives while someone holds or
/// waits for its lock.
#[derive(Clone, Default)]
pub struct ProjectLocks {
    locks: Arc<LockMap>,
}

/// Holds one project's lock until dropped.
pub struct ProjectGuard {
    guard: Option<OwnedMutexGuard<()>>,
    project_id: Id,
    locks: Arc<LockMap>,
}

impl Drop for ProjectGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // The map's own reference is the last one: no holder, no waiter.
        self.locks
            .remove_if(&self.project_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

impl ProjectLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn mutex_for(&self, project_id: Id) -> Arc<Mutex<()>> {
        self.locks
            .entry(project_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn guard(&self, project_id: Id, guard: OwnedMutexGuard<()>) -> ProjectGuard {
        ProjectGuard {
            guard: Some(guard),
            project_id,
            locks: Arc::clone(&self.locks),
        }
    }

    /// Takes the project's lock if nobody else holds it.
    pub fn try_lock(&self, project_id: Id) -> Option<ProjectGuard> {
        let guard = self.mutex_for(project_id).try_lock_owned().ok()?;
        Some(self.guard(project_id, guard))
    }

    /// Waits for the project's lock.
    pub async fn lock(&self, project_id: Id) -> ProjectGuard {
        let guard = self.mutex_for(project_id).lock_owned().await;
        self.guard(project_id, guard)
    }

    fn len(&self) -> usize {
        self.locks.len()
    }
}
