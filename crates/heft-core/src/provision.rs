use std::path::{Path, PathBuf};

use thiserror::Error;

/// Handle to a provisioned, disposable installation environment.
///
/// The environment's on-disk lifetime is owned by the caller (a temp
/// directory guard); this handle only locates it.
#[derive(Debug, Clone)]
pub struct Environment {
    root: PathBuf,
}

impl Environment {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of the isolated installation (the virtualenv itself
    /// for the pip implementation).
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Fatal failure while building the isolated environment.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("failed to launch '{interpreter}': {source}")]
    Spawn {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create virtualenv at '{path}': {stderr}")]
    VenvFailed { path: PathBuf, stderr: String },
    #[error("failed to install '{package}' from source: {stderr}")]
    InstallFailed { package: String, stderr: String },
}

/// Failure while querying an environment's contents.
///
/// `NotInstalled` for a single package is recoverable; failures from the
/// environment-wide queries (`install_root`, `list_packages`) are treated
/// as fatal by the pipeline.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("package '{0}' is not installed")]
    NotInstalled(String),
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} failed: {stderr}")]
    CommandFailed { tool: String, stderr: String },
    #[error("could not parse {tool} output: {detail}")]
    Parse { tool: String, detail: String },
}

/// Builds an isolated installation of a package and its full transitive
/// dependency closure, from source.
pub trait Provisioner {
    /// Provision `package` under `scratch`, returning a handle to the
    /// resulting environment. Everything created lives inside `scratch`, so
    /// removing `scratch` disposes of the environment.
    fn provision(&self, package: &str, scratch: &Path) -> Result<Environment, ProvisionError>;
}

/// Read-only view of what a provisioned environment contains.
pub trait Inspector {
    /// Absolute directory under which package files are installed.
    fn install_root(&self, env: &Environment) -> Result<PathBuf, InspectError>;

    /// Names of every installed package.
    fn list_packages(&self, env: &Environment) -> Result<Vec<String>, InspectError>;

    /// Install-root-relative paths of the files owned by one package, in
    /// the inspector's discovery order.
    fn files_owned_by(&self, env: &Environment, package: &str)
        -> Result<Vec<PathBuf>, InspectError>;
}
