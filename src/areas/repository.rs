use crate::areas::database::Database;
use crate::areas::layout::{Config, RepositoryLayout};
use crate::areas::refs::Refs;
use crate::areas::staging::Staging;
use crate::areas::workspace::Workspace;
use crate::artifacts::errors::{IoContext, Result, WitError};
use file_guard::{FileGuard, Lock};
use std::cell::{RefCell, RefMut};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct Repository {
    /// Working tree root, the directory holding the metadata directory
    path: Box<Path>,
    writer: RefCell<Box<dyn Write>>,
    layout: RepositoryLayout,
    config: Config,
    refs: Refs,
    database: Database,
    staging: Staging,
    workspace: Workspace,
}

/// Held for the duration of a mutating command
///
/// Another process trying to lock the same repository meanwhile gets
/// [`WitError::RepositoryLocked`].
pub struct RepositoryLock {
    _guard: FileGuard<Box<File>>,
}

impl Repository {
    /// Open the repository rooted at `path` without discovery (used by `init`)
    pub fn new(path: &Path, writer: Box<dyn Write>) -> Result<Self> {
        Self::with_settings(path, writer, RepositoryLayout::default(), Config::from_env())
    }

    pub fn with_settings(
        path: &Path,
        writer: Box<dyn Write>,
        layout: RepositoryLayout,
        config: Config,
    ) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path).at(path)?;
        }
        let path = path.canonicalize().at(path)?;
        let metadata = layout.metadata_path(&path);

        let refs = Refs::new(
            metadata.join(&layout.references_file).into_boxed_path(),
            metadata.join(&layout.active_branch_file).into_boxed_path(),
        );
        let database = Database::new(metadata.join(&layout.images_dir).into_boxed_path());
        let staging = Staging::new(metadata.join(&layout.staging_dir).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            layout,
            config,
            refs,
            database,
            staging,
            workspace,
        })
    }

    /// Find the nearest repository containing `start`
    pub fn discover(start: &Path, writer: Box<dyn Write>) -> Result<Self> {
        Self::discover_with(start, writer, RepositoryLayout::default(), Config::from_env())
    }

    pub fn discover_with(
        start: &Path,
        writer: Box<dyn Write>,
        layout: RepositoryLayout,
        config: Config,
    ) -> Result<Self> {
        let root = layout
            .discover(start)
            .ok_or_else(|| WitError::NotARepository(start.to_path_buf()))?;

        tracing::debug!(root = %root.display(), "discovered repository");
        Self::with_settings(&root, writer, layout, config)
    }

    /// Guard run first by every command that needs an existing repository
    pub fn require_repository(&self) -> Result<()> {
        if self.metadata_path().is_dir() {
            Ok(())
        } else {
            Err(WitError::NotARepository(self.path.to_path_buf()))
        }
    }

    /// Take the advisory single-writer lock
    pub fn lock(&self) -> Result<RepositoryLock> {
        let path = self.metadata_path().join(&self.layout.lock_file);
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .at(&path)?;

        match file_guard::try_lock(Box::new(file), Lock::Exclusive, 0, 1) {
            Ok(guard) => Ok(RepositoryLock { _guard: guard }),
            // fcntl reports contention as EAGAIN or EACCES
            Err(err)
                if matches!(
                    err.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::PermissionDenied
                ) =>
            {
                Err(WitError::RepositoryLocked(path))
            }
            Err(source) => Err(WitError::Io { path, source }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.layout.metadata_path(&self.path)
    }

    pub fn layout(&self) -> &RepositoryLayout {
        &self.layout
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Names the comparator and copies never look at
    pub fn ignored(&self) -> [&str; 1] {
        [self.layout.metadata_dir.as_str()]
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    /// Write one line of user-facing output
    pub fn emit(&self, line: impl std::fmt::Display) -> Result<()> {
        writeln!(self.writer(), "{}", line).map_err(|source| WitError::Io {
            path: PathBuf::from("<output>"),
            source,
        })
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn staging(&self) -> &Staging {
        &self.staging
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }
}
