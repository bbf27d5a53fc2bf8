//! File-backed loaders for isochrone and point-of-interest collections.
//!
//! Every call reads the file from disk; nothing is cached between renders.

use std::path::{Path, PathBuf};

use crate::error::LoadError;
use crate::isochrone::IsochroneSet;
use crate::poi::PoiSet;

pub fn read_isochrones(path: &Path) -> Result<IsochroneSet, LoadError> {
    let payload = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    IsochroneSet::from_geojson_str(&payload).map_err(|e| LoadError::data(path, e))
}

pub fn read_pois(path: &Path) -> Result<PoiSet, LoadError> {
    let payload = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    PoiSet::from_geojson_str(&payload).map_err(|e| LoadError::data(path, e))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterEntry {
    pub name: String,
    pub path: PathBuf,
}

/// Named centers and the isochrone file registered for each, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsochroneCatalog {
    entries: Vec<CenterEntry>,
}

impl IsochroneCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a center. Re-registering a name replaces its path in place.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        let name = name.into();
        let path = path.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.path = path,
            None => self.entries.push(CenterEntry { name, path }),
        }
    }

    /// Catalog with every relative path resolved against `root`.
    pub fn with_root<N, P>(root: &Path, centers: impl IntoIterator<Item = (N, P)>) -> Self
    where
        N: Into<String>,
        P: AsRef<Path>,
    {
        let mut catalog = Self::new();
        for (name, path) in centers {
            catalog.insert(name, root.join(path.as_ref()));
        }
        catalog
    }

    pub fn entries(&self) -> &[CenterEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn first_name(&self) -> Option<&str> {
        self.entries.first().map(|e| e.name.as_str())
    }

    pub fn path(&self, name: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the isochrones of `name`, or `None` for an unknown center.
    pub fn load(&self, name: &str) -> Option<Result<IsochroneSet, LoadError>> {
        self.path(name).map(read_isochrones)
    }
}
