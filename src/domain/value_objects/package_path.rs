//! Package path resolution
//!
//! - `Pipeline` mode: package checkouts live inside the pipeline workspace
//! - `Local` mode: package checkouts are siblings of this project

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where container build contexts are looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackagePathMode {
    /// Developer machine with sibling source checkouts
    Local,
    /// Pipeline workspace with additional inputs checked out in place
    #[default]
    Pipeline,
}

impl PackagePathMode {
    pub fn is_local(&self) -> bool {
        matches!(self, PackagePathMode::Local)
    }
}

impl std::fmt::Display for PackagePathMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackagePathMode::Local => write!(f, "local"),
            PackagePathMode::Pipeline => write!(f, "pipeline"),
        }
    }
}

/// Package path resolution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packaging {
    #[serde(default)]
    pub mode: PackagePathMode,

    /// Root prepended to package paths in local mode
    #[serde(default = "default_local_root")]
    pub local_root: PathBuf,
}

impl Default for Packaging {
    fn default() -> Self {
        Self {
            mode: PackagePathMode::default(),
            local_root: default_local_root(),
        }
    }
}

fn default_local_root() -> PathBuf {
    PathBuf::from("..")
}

impl Packaging {
    pub fn new(mode: PackagePathMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_local_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.local_root = root.into();
        self
    }

    /// Resolve a package path to the build context directory.
    pub fn resolve(&self, package_path: &str) -> PathBuf {
        match self.mode {
            PackagePathMode::Local => self.local_root.join(package_path),
            PackagePathMode::Pipeline => Path::new(package_path).to_path_buf(),
        }
    }
}
