use std::path::{Path, PathBuf};

/// Environment variable naming the build workspace root.
pub const WORKSPACE_DIR_ENV: &str = "TANZU_BUILD_WORKSPACE_DIR";

const OUTPUT_DIR: &str = "output";
const MANIFEST_FILE: &str = "containerapp.yml";

/// Directory layout of a build workspace.
///
/// The build places its generated ContainerApp manifest at
/// `<root>/output/containerapp.yml`. An empty root resolves against the
/// current directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    #[inline]
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir().join(MANIFEST_FILE)
    }
}
