//! Runtime detection for Node.js and the chosen package manager

use super::version::{check_minimum, MIN_NODE_VERSION};
use crate::choice::PackageManager;
use crate::structure::NamePatch;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    pub fn missing(name: &'static str) -> Self {
        Self {
            name,
            version: None,
            available: false,
        }
    }

    pub fn found(name: &'static str, version: &str) -> Self {
        Self {
            name,
            version: Some(version.to_string()),
            available: true,
        }
    }
}

/// Run `<program> --version` and capture the trimmed output
fn probe(program: &str, name: &'static str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo::found(name, &version)
        }
        _ => RuntimeInfo::missing(name),
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("node", "Node.js")
}

/// Check if the package manager binary is available
pub fn check_package_manager(pm: PackageManager) -> RuntimeInfo {
    probe(pm.key(), pm.display_name())
}

/// Everything the run needs from the host, probed once before installing
#[derive(Debug, Clone)]
pub struct RuntimeReport {
    pub node: RuntimeInfo,
    pub package_manager: RuntimeInfo,
    /// Whether `npm` itself is on the PATH, for the manifest name patch
    pub npm_available: bool,
}

impl RuntimeReport {
    pub fn probe(pm: PackageManager) -> Self {
        let package_manager = check_package_manager(pm);
        let npm_available = if pm == PackageManager::Npm {
            package_manager.available
        } else {
            check_package_manager(PackageManager::Npm).available
        };

        Self {
            node: check_node(),
            package_manager,
            npm_available,
        }
    }

    /// Advisory problems; none of them stop the run
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        match &self.node.version {
            Some(version) if self.node.available => {
                if let Some(w) = check_minimum(self.node.name, version, MIN_NODE_VERSION) {
                    warnings.push(w);
                }
            }
            _ => warnings.push(format!(
                "{} was not found (install from https://nodejs.org)",
                self.node.name
            )),
        }

        if !self.package_manager.available {
            warnings.push(format!(
                "{} was not found; installing dependencies will fail",
                self.package_manager.name
            ));
        }

        if !self.npm_available {
            warnings.push("npm was not found; package.json will be renamed in place".to_string());
        }

        warnings
    }

    /// `npm pkg set` when npm exists, otherwise edit package.json directly
    pub fn name_patch(&self) -> NamePatch {
        if self.npm_available {
            NamePatch::Npm
        } else {
            NamePatch::InPlace
        }
    }
}
