use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use heft_core::provision::{
    Environment, InspectError, Inspector, ProvisionError, Provisioner,
};

/// Provisions disposable virtualenvs and inspects them through pip.
///
/// Installation always passes `--no-binary :all:` so every dependency is
/// built from its source distribution; the only binaries left in the
/// environment are build outputs of the packages themselves.
pub struct PipProvisioner {
    python: String,
}

impl PipProvisioner {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// Interpreter inside a provisioned virtualenv.
    fn venv_python(env: &Environment) -> PathBuf {
        if cfg!(windows) {
            env.root().join("Scripts").join("python.exe")
        } else {
            env.root().join("bin").join("python")
        }
    }

    fn pip(env: &Environment, args: &[&str]) -> Command {
        let mut cmd = Command::new(Self::venv_python(env));
        cmd.arg("-m").arg("pip").args(args);
        cmd
    }

    fn run_pip(env: &Environment, args: &[&str], tool: &str) -> Result<Output, InspectError> {
        let output = Self::pip(env, args).output().map_err(|e| InspectError::Spawn {
            tool: tool.to_string(),
            source: e,
        })?;
        if !output.status.success() {
            return Err(InspectError::CommandFailed {
                tool: tool.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl Provisioner for PipProvisioner {
    fn provision(&self, package: &str, scratch: &Path) -> Result<Environment, ProvisionError> {
        let venv_path = scratch.join("venv");

        let output = Command::new(&self.python)
            .args(["-m", "venv"])
            .arg(&venv_path)
            .output()
            .map_err(|e| ProvisionError::Spawn {
                interpreter: self.python.clone(),
                source: e,
            })?;
        if !output.status.success() {
            return Err(ProvisionError::VenvFailed {
                path: venv_path,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let env = Environment::new(venv_path);

        let output = Self::pip(&env, &["install", "--no-binary", ":all:", package])
            .output()
            .map_err(|e| ProvisionError::Spawn {
                interpreter: Self::venv_python(&env).display().to_string(),
                source: e,
            })?;
        if !output.status.success() {
            return Err(ProvisionError::InstallFailed {
                package: package.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(env)
    }
}

impl Inspector for PipProvisioner {
    fn install_root(&self, env: &Environment) -> Result<PathBuf, InspectError> {
        let output = Command::new(Self::venv_python(env))
            .args(["-c", "import site; print(site.getsitepackages()[0])"])
            .output()
            .map_err(|e| InspectError::Spawn {
                tool: "python".to_string(),
                source: e,
            })?;
        if !output.status.success() {
            return Err(InspectError::CommandFailed {
                tool: "python".to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if root.is_empty() {
            return Err(InspectError::Parse {
                tool: "python".to_string(),
                detail: "empty site-packages path".to_string(),
            });
        }
        Ok(PathBuf::from(root))
    }

    fn list_packages(&self, env: &Environment) -> Result<Vec<String>, InspectError> {
        let output = Self::run_pip(env, &["freeze"], "pip freeze")?;
        Ok(parse_freeze(&String::from_utf8_lossy(&output.stdout)))
    }

    fn files_owned_by(
        &self,
        env: &Environment,
        package: &str,
    ) -> Result<Vec<PathBuf>, InspectError> {
        let output = Self::pip(env, &["show", "-f", package])
            .output()
            .map_err(|e| InspectError::Spawn {
                tool: "pip show".to_string(),
                source: e,
            })?;
        if !output.status.success() {
            return Err(InspectError::NotInstalled(package.to_string()));
        }
        Ok(parse_show_files(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Extract package names from `pip freeze` output.
///
/// Handles `name==version` pins, `name @ url` direct references, and skips
/// comments and editable (`-e`) lines.
fn parse_freeze(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .map(|line| {
            let name = line
                .split_once("==")
                .map(|(name, _)| name)
                .or_else(|| line.split_once(" @ ").map(|(name, _)| name))
                .unwrap_or(line);
            name.trim().to_string()
        })
        .collect()
}

/// Extract the owned-file list from `pip show -f` output: the indented lines
/// following the `Files:` header.
fn parse_show_files(output: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut in_files = false;
    for line in output.lines() {
        if in_files {
            if let Some(entry) = line.strip_prefix("  ") {
                files.push(PathBuf::from(entry.trim()));
            } else {
                break;
            }
        } else if line.starts_with("Files:") {
            in_files = true;
        }
    }
    files
}
