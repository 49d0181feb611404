//! Manifest discovery over directory trees.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::BundleError;

/// Manifest file extension recognized during discovery.
const MANIFEST_EXTENSION: &str = "bundle";

/// Identity and capability metadata advertised by one bundle manifest.
#[derive(Debug, Clone)]
pub struct BundleInfo {
    name: String,
    title: Option<String>,
    version: Option<String>,
    description: Option<String>,
    origin: PathBuf,
    capabilities: BTreeMap<String, String>,
}

impl BundleInfo {
    /// The unique bundle name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable title, if the manifest carries one.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Advertised version string.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Path of the manifest file this info was read from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Free-form capability attributes.
    pub fn capabilities(&self) -> &BTreeMap<String, String> {
        &self.capabilities
    }

    /// Convenience lookup in the capability table.
    pub fn capability(&self, key: &str) -> Option<&str> {
        self.capabilities.get(key).map(String::as_str)
    }
}

#[derive(Deserialize)]
struct ManifestHeader {
    name: String,
    title: Option<String>,
    version: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct ManifestFile {
    bundle: ManifestHeader,
    #[serde(default)]
    capabilities: BTreeMap<String, String>,
}

/// Collection of bundle metadata discovered from the filesystem.
#[derive(Debug)]
pub struct BundleLibrary {
    bundles: Vec<BundleInfo>,
}

impl BundleLibrary {
    /// Discovers bundle manifests under the given paths.
    ///
    /// Missing directories are created (so a host can point at its plugin
    /// directory before anything is installed). With `recursive` set,
    /// subdirectories are walked too; symlink cycles are guarded by tracking
    /// canonicalized paths. A duplicate bundle name keeps the first manifest
    /// found and logs a warning.
    pub fn discover<P: AsRef<Path>>(paths: &[P], recursive: bool) -> Result<Self, BundleError> {
        let mut bundles = Vec::new();
        let mut seen_names = HashSet::new();
        let mut visited_dirs = HashSet::new();

        for path in paths {
            let path = path.as_ref();
            if !path.is_dir() {
                fs::create_dir_all(path).map_err(|source| BundleError::Scan {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
            scan_dir(path, recursive, &mut bundles, &mut seen_names, &mut visited_dirs)?;
        }

        debug!(count = bundles.len(), "bundle discovery finished");
        Ok(Self { bundles })
    }

    /// Library over already-known metadata (no filesystem access).
    pub fn from_bundles(bundles: Vec<BundleInfo>) -> Self {
        Self { bundles }
    }

    /// Looks up a bundle by name.
    pub fn get(&self, name: &str) -> Option<&BundleInfo> {
        self.bundles.iter().find(|bundle| bundle.name == name)
    }

    /// Iterates over all discovered bundles, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &BundleInfo> {
        self.bundles.iter()
    }

    /// Number of discovered bundles.
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// True if nothing was discovered.
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

fn scan_dir(
    dir: &Path,
    recursive: bool,
    bundles: &mut Vec<BundleInfo>,
    seen_names: &mut HashSet<String>,
    visited_dirs: &mut HashSet<PathBuf>,
) -> Result<(), BundleError> {
    let canonical = fs::canonicalize(dir).map_err(|source| BundleError::Scan {
        path: dir.to_path_buf(),
        source,
    })?;
    if !visited_dirs.insert(canonical) {
        return Ok(());
    }

    let entries = fs::read_dir(dir).map_err(|source| BundleError::Scan {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| BundleError::Scan {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_dir() {
            subdirs.push(path);
        } else if path.extension().and_then(|ext| ext.to_str()) == Some(MANIFEST_EXTENSION) {
            let info = parse_manifest(&path)?;
            if seen_names.insert(info.name.clone()) {
                bundles.push(info);
            } else {
                warn!(name = %info.name, manifest = %path.display(), "duplicate bundle name, keeping first");
            }
        }
    }

    if recursive {
        for subdir in subdirs {
            scan_dir(&subdir, true, bundles, seen_names, visited_dirs)?;
        }
    }
    Ok(())
}

fn parse_manifest(path: &Path) -> Result<BundleInfo, BundleError> {
    let text = fs::read_to_string(path).map_err(|source| BundleError::Manifest {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    let manifest: ManifestFile = toml::from_str(&text).map_err(|source| BundleError::Manifest {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    Ok(BundleInfo {
        name: manifest.bundle.name,
        title: manifest.bundle.title,
        version: manifest.bundle.version,
        description: manifest.bundle.description,
        origin: path.to_path_buf(),
        capabilities: manifest.capabilities,
    })
}
