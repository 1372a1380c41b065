//! Class-resolution scopes and their optional augmentation capability.
//!
//! A scope maps library names to loadable files through an ordered search path. Some scopes
//! accept new directories at runtime ([`AugmentableScope`]); others are fixed when the
//! process starts. [`extend`] asks for the capability through
//! [`ClassScope::as_augmentable`] and never fails when it is absent.

use std::{
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use tracing::{debug, trace};

pub trait ClassScope: Send + Sync {
    fn name(&self) -> &str;

    /// Snapshot of the search path, in lookup order.
    fn search_path(&self) -> Vec<PathBuf>;

    /// Returns the augmentation capability, if this scope has it.
    fn as_augmentable(&self) -> Option<&dyn AugmentableScope> {
        None
    }
}

pub trait AugmentableScope: ClassScope {
    /// Append `dir` to the search path. Returns `false` if it was already there.
    fn add_dir(&self, dir: &Path) -> bool;
}

/// What [`extend`] did to the scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtendOutcome {
    Added,
    AlreadyPresent,
    /// The scope is fixed; nothing changed.
    NotAugmentable,
}

/// Make `dir` visible through `scope` if the scope can be augmented.
pub fn extend(scope: &dyn ClassScope, dir: &Path) -> ExtendOutcome {
    let Some(aug) = scope.as_augmentable() else {
        debug!(scope = scope.name(), dir = %dir.display(), "scope is fixed; not extending");
        return ExtendOutcome::NotAugmentable;
    };

    if aug.add_dir(dir) {
        debug!(scope = scope.name(), dir = %dir.display(), "scope extended");
        ExtendOutcome::Added
    } else {
        trace!(scope = scope.name(), dir = %dir.display(), "dir already on search path");
        ExtendOutcome::AlreadyPresent
    }
}

/// Scope whose search path can grow at runtime.
#[derive(Debug)]
pub struct DirScope {
    name: String,
    dirs: RwLock<Vec<PathBuf>>,
}

impl DirScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dirs: RwLock::new(Vec::new()),
        }
    }

    pub fn with_dirs<I, P>(name: impl Into<String>, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let scope = Self::new(name);
        for dir in dirs {
            let dir: PathBuf = dir.into();
            scope.add_dir(&dir);
        }
        scope
    }

    /// First file named `file` found along the search path.
    pub fn locate(&self, file: &str) -> Option<PathBuf> {
        let dirs = self.dirs.read().unwrap_or_else(PoisonError::into_inner);
        dirs.iter().map(|d| d.join(file)).find(|p| p.is_file())
    }
}

impl ClassScope for DirScope {
    fn name(&self) -> &str {
        &self.name
    }

    fn search_path(&self) -> Vec<PathBuf> {
        self.dirs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn as_augmentable(&self) -> Option<&dyn AugmentableScope> {
        Some(self)
    }
}

impl AugmentableScope for DirScope {
    fn add_dir(&self, dir: &Path) -> bool {
        let mut dirs = self.dirs.write().unwrap_or_else(PoisonError::into_inner);
        if dirs.iter().any(|d| d == dir) {
            return false;
        }
        dirs.push(dir.to_path_buf());
        true
    }
}

/// Scope whose search path was settled at process start.
#[derive(Clone, Debug)]
pub struct FixedScope {
    name: String,
    dirs: Vec<PathBuf>,
}

impl FixedScope {
    pub fn new<I, P>(name: impl Into<String>, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            name: name.into(),
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }
}

impl ClassScope for FixedScope {
    fn name(&self) -> &str {
        &self.name
    }

    fn search_path(&self) -> Vec<PathBuf> {
        self.dirs.clone()
    }
}
