//! File system operations (create, rename, remove, permissions).

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).context("Failed to create directory")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_file_impl(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        let file = fs::File::create(path).context("Failed to create file")?;
        Ok(Box::new(file))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn rename_impl(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).context("Failed to rename file")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn remove_file_impl(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).context("Failed to remove file")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_file_impl(&self, path: &Path) -> bool {
        path.is_file()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn set_permissions_impl(&self, path: &Path, mode: u32) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(mode);
            fs::set_permissions(path, permissions).context("Failed to set permissions")?;
        }
        #[cfg(not(unix))]
        {
            let _ = (path, mode); // Suppress unused warnings on non-Unix
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_file_ops() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bin/phantom.partial");

        runtime
            .create_dir_all(file_path.parent().unwrap())
            .unwrap();
        // Idempotent
        runtime
            .create_dir_all(file_path.parent().unwrap())
            .unwrap();

        {
            let mut writer = runtime.create_file(&file_path).unwrap();
            writer.write_all(b"binary").unwrap();
        }
        assert!(runtime.exists(&file_path));
        assert!(runtime.is_file(&file_path));
        assert!(!runtime.is_file(dir.path()));

        let final_path = dir.path().join("bin/phantom");
        runtime.rename(&file_path, &final_path).unwrap();
        assert!(!runtime.exists(&file_path));
        assert_eq!(std::fs::read(&final_path).unwrap(), b"binary");

        runtime.remove_file(&final_path).unwrap();
        assert!(!runtime.exists(&final_path));
    }

    #[test]
    fn test_rename_overwrites_existing_file() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let from = dir.path().join("new");
        let to = dir.path().join("old");
        std::fs::write(&from, "new").unwrap();
        std::fs::write(&to, "old").unwrap();

        runtime.rename(&from, &to).unwrap();

        assert_eq!(std::fs::read_to_string(&to).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_real_runtime_set_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("phantom");
        std::fs::write(&file_path, "binary").unwrap();

        runtime.set_permissions(&file_path, 0o755).unwrap();

        let mode = std::fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_real_runtime_errors() {
        let runtime = RealRuntime;
        let missing = std::path::Path::new("/nonexistent/path/file.txt");

        assert!(runtime.remove_file(missing).is_err());
        assert!(runtime.create_file(missing).is_err());
        assert!(!runtime.exists(missing));
    }
}
