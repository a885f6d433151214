//! Unified package catalog
//!
//! Both registry schemas are normalized into [`UnifiedPackage`] records and
//! merged into a single [`PackageCatalog`] sorted by display name.

pub mod aggregator;

use std::fmt;

use crate::registry::{UnityPackageRecord, VerdaccioPackageRecord};

pub use aggregator::{Aggregator, FetchReport};

/// Registry a package was listed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageSource {
    Unity,
    Verdaccio,
}

impl PackageSource {
    pub fn label(self) -> &'static str {
        match self {
            PackageSource::Unity => "UnityPackage",
            PackageSource::Verdaccio => "Verdaccio",
        }
    }
}

impl fmt::Display for PackageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A package normalized from either registry schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnifiedPackage {
    display_name: String,
    name: String,
    version: String,
    description: String,
    source: PackageSource,
}

impl UnifiedPackage {
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn source(&self) -> PackageSource {
        self.source
    }
}

impl From<UnityPackageRecord> for UnifiedPackage {
    fn from(record: UnityPackageRecord) -> Self {
        let version = record.latest_version().unwrap_or_default().to_string();
        Self {
            display_name: display_name_or(record.display_name, &record.name),
            name: record.name,
            version,
            description: record.description.unwrap_or_default(),
            source: PackageSource::Unity,
        }
    }
}

impl From<VerdaccioPackageRecord> for UnifiedPackage {
    fn from(record: VerdaccioPackageRecord) -> Self {
        Self {
            display_name: display_name_or(record.display_name, &record.name),
            name: record.name,
            version: record.version.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            source: PackageSource::Verdaccio,
        }
    }
}

// Verdaccio's search endpoint has no displayName; rows fall back to the id.
fn display_name_or(display_name: Option<String>, name: &str) -> String {
    display_name
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| name.to_string())
}

/// All packages from one aggregation cycle, sorted by display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageCatalog {
    packages: Vec<UnifiedPackage>,
}

impl PackageCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize both registries and merge them.
    ///
    /// Unity records come first, then Verdaccio records; the stable sort keeps
    /// that fetch order among equal display names.
    pub fn from_records(
        unity: impl IntoIterator<Item = UnityPackageRecord>,
        verdaccio: impl IntoIterator<Item = VerdaccioPackageRecord>,
    ) -> Self {
        let packages = unity
            .into_iter()
            .map(UnifiedPackage::from)
            .chain(verdaccio.into_iter().map(UnifiedPackage::from))
            .collect();
        Self::from_packages(packages)
    }

    fn from_packages(mut packages: Vec<UnifiedPackage>) -> Self {
        // Ordinal comparison: String's Ord is bytewise.
        packages.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Self { packages }
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&UnifiedPackage> {
        self.packages.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UnifiedPackage> {
        self.packages.iter()
    }

    pub fn packages(&self) -> &[UnifiedPackage] {
        &self.packages
    }

    pub fn count_from(&self, source: PackageSource) -> usize {
        self.packages.iter().filter(|p| p.source == source).count()
    }
}

impl<'a> IntoIterator for &'a PackageCatalog {
    type Item = &'a UnifiedPackage;
    type IntoIter = std::slice::Iter<'a, UnifiedPackage>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}
