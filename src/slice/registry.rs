//! On-disk package registry: installed packages and the slice providers
//! they declare.
//!
//! A package is a directory under the configured packages directory with a
//! `package.toml` manifest. Each manifest declares the content-provider
//! authorities the package serves and where their slice documents live.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::uri::SliceUri;

/// Manifest file name inside each package directory.
const MANIFEST_NAME: &str = "package.toml";

/// Raw `package.toml` structure.
#[derive(Debug, Deserialize)]
struct ManifestRaw {
    name: String,
    #[serde(default, rename = "provider")]
    providers: Vec<ProviderRaw>,
}

#[derive(Debug, Deserialize)]
struct ProviderRaw {
    authority: String,
    /// Providers are private unless the manifest says otherwise.
    #[serde(default)]
    exported: bool,
    /// Directory slice paths resolve under, relative to the package dir.
    #[serde(default = "default_root")]
    root: String,
}

fn default_root() -> String {
    "slices".to_string()
}

/// A provider declared by an installed package.
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    pub authority: String,
    pub exported: bool,
    root: String,
    package_dir: PathBuf,
}

impl ProviderInfo {
    /// Filesystem location this provider serves the identifier's content
    /// from, or `None` when the identifier has no path segments and so
    /// addresses nothing.
    pub fn content_path(&self, uri: &SliceUri) -> Option<PathBuf> {
        let mut segments = uri.segments().peekable();
        segments.peek()?;

        let mut path = self.package_dir.join(&self.root);
        for segment in segments {
            path.push(segment);
        }
        path.set_extension("json");
        Some(path)
    }
}

/// An installed package and the providers its manifest declares.
#[derive(Debug, Clone)]
pub struct PackageInfo {
    pub name: String,
    pub providers: Vec<ProviderInfo>,
}

/// Registry over the packages directory. Every query re-scans the
/// directory, so installs and removals show up without restarting.
#[derive(Debug, Clone)]
pub struct PackageRegistry {
    packages_dir: PathBuf,
}

impl PackageRegistry {
    pub fn new(packages_dir: PathBuf) -> Self {
        Self { packages_dir }
    }

    /// Enumerate installed packages, ordered by directory name. Packages
    /// whose manifest is missing or unreadable are skipped.
    pub fn installed_packages(&self) -> Result<Vec<PackageInfo>> {
        let entries = fs::read_dir(&self.packages_dir).with_context(|| {
            format!(
                "Failed to read packages directory: {}",
                self.packages_dir.display()
            )
        })?;

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        let mut packages = Vec::new();
        for dir in dirs {
            match load_manifest(&dir) {
                Ok(Some(package)) => packages.push(package),
                Ok(None) => {}
                Err(e) => {
                    log::debug!("skipping package at {}: {e:#}", dir.display());
                }
            }
        }
        Ok(packages)
    }

    /// Flat concatenation of every declared authority across all installed
    /// packages, in package order. Duplicates are not removed.
    pub fn authorities(&self) -> Result<Vec<String>> {
        Ok(self
            .installed_packages()?
            .into_iter()
            .flat_map(|package| package.providers)
            .map(|provider| provider.authority)
            .collect())
    }

    /// Resolve the provider serving `authority`, if any package declares it.
    pub fn resolve(&self, authority: &str) -> Option<ProviderInfo> {
        self.installed_packages()
            .ok()?
            .into_iter()
            .flat_map(|package| package.providers)
            .find(|provider| provider.authority == authority)
    }

    /// Permission probe: acquire a short-lived unstable handle on the
    /// provider behind `uri`, solely to test access.
    ///
    /// Only a provider that exists and is not exported denies. An authority
    /// nothing serves acquires vacuously; binding then proceeds and the
    /// stream simply never produces content.
    pub fn can_acquire(&self, uri: &SliceUri) -> bool {
        match self.resolve(&uri.authority) {
            Some(provider) => provider.exported,
            None => true,
        }
    }
}

fn load_manifest(package_dir: &Path) -> Result<Option<PackageInfo>> {
    let manifest_path = package_dir.join(MANIFEST_NAME);
    if !manifest_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read manifest: {}", manifest_path.display()))?;
    let raw: ManifestRaw = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse manifest: {}", manifest_path.display()))?;

    Ok(Some(PackageInfo {
        name: raw.name,
        providers: raw
            .providers
            .into_iter()
            .map(|p| ProviderInfo {
                authority: p.authority,
                exported: p.exported,
                root: p.root,
                package_dir: package_dir.to_path_buf(),
            })
            .collect(),
    }))
}
