use log::debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Tracks partially written files that must be removed on interruption
#[derive(Default)]
pub struct CleanupContext {
    #[cfg(test)]
    pub paths: Vec<PathBuf>,
    #[cfg(not(test))]
    paths: Vec<PathBuf>,
}

impl CleanupContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path to be cleaned up on interruption
    pub fn add(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// Remove a path from cleanup list (e.g., when the file was committed)
    pub fn remove(&mut self, path: &Path) {
        self.paths.retain(|p| p != path);
    }

    /// Remove all registered files that still exist
    pub fn cleanup(&self) {
        for path in &self.paths {
            if path.exists() {
                debug!("Cleaning up: {:?}", path);
                if let Err(e) = std::fs::remove_file(path) {
                    debug!("Failed to clean up {:?}: {}", path, e);
                }
            }
        }
    }
}

/// Type alias for shared cleanup context
pub type SharedCleanupContext = Arc<Mutex<CleanupContext>>;

/// Create a new shared cleanup context
pub fn new_shared() -> SharedCleanupContext {
    Arc::new(Mutex::new(CleanupContext::new()))
}

/// Registers a path for cleanup until the operation producing it succeeds
pub struct CleanupGuard {
    ctx: SharedCleanupContext,
    path: PathBuf,
}

impl CleanupGuard {
    pub fn new(ctx: SharedCleanupContext, path: PathBuf) -> Self {
        if let Ok(mut guard) = ctx.lock() {
            guard.add(path.clone());
        }
        Self { ctx, path }
    }

    /// Mark the operation as successful, removing the path from cleanup
    pub fn success(self) {
        if let Ok(mut guard) = self.ctx.lock() {
            guard.remove(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_cleanup_context_add_remove() {
        let mut ctx = CleanupContext::new();
        let path = PathBuf::from("/tmp/phantom.partial");

        ctx.add(path.clone());
        assert_eq!(ctx.paths.len(), 1);

        ctx.remove(&path);
        assert_eq!(ctx.paths.len(), 0);
    }

    #[test]
    fn test_cleanup_context_removes_files() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("phantom.partial");
        fs::write(&file_path, "partial").unwrap();

        let mut ctx = CleanupContext::new();
        ctx.add(file_path.clone());
        // Never created; must not stop the cleanup of the others
        ctx.add(dir.path().join("missing.partial"));

        assert!(file_path.exists());
        ctx.cleanup();
        assert!(!file_path.exists());
    }

    #[test]
    fn test_cleanup_guard_success() {
        let ctx = new_shared();
        let path = PathBuf::from("/tmp/phantom.partial");

        let guard = CleanupGuard::new(Arc::clone(&ctx), path.clone());
        assert_eq!(ctx.lock().unwrap().paths.len(), 1);
        guard.success();

        assert_eq!(ctx.lock().unwrap().paths.len(), 0);
    }

    #[test]
    fn test_cleanup_guard_drop_without_success() {
        let ctx = new_shared();
        let path = PathBuf::from("/tmp/phantom.partial");

        {
            let _guard = CleanupGuard::new(Arc::clone(&ctx), path.clone());
        }

        // Path should remain in cleanup context
        assert_eq!(ctx.lock().unwrap().paths, vec![path]);
    }
}
