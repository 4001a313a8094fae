use std::{
    fs,
    path::{Path, PathBuf},
};

use medieval_rpg_core::MapDescriptor;
use medieval_rpg_system_simulation::{MapLoadError, MapProvider};
use tracing::debug;

const MAP_EXTENSION: &str = "toml";

/// Map provider reading TOML map documents from disk.
///
/// References handed to the simulation are file paths. Destinations are
/// looked up next to the current map first and under the maps root second.
#[derive(Clone, Debug)]
pub(crate) struct TomlMaps {
    root: PathBuf,
}

impl TomlMaps {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Reference of the start map named on the command line.
    pub(crate) fn locate(&self, start: &str) -> String {
        let given = Path::new(start);
        if given.is_file() {
            return start.to_owned();
        }
        reference(&self.root.join(map_file(start)))
    }

    fn candidates(&self, current: &str, destination: &Path) -> Vec<PathBuf> {
        if destination.is_absolute() {
            return vec![destination.to_path_buf()];
        }
        let mut candidates = Vec::with_capacity(2);
        if let Some(directory) = Path::new(current).parent() {
            candidates.push(directory.join(destination));
        }
        candidates.push(self.root.join(destination));
        candidates
    }
}

/// Destination file name with the map extension substituted.
fn map_file(destination: &str) -> PathBuf {
    Path::new(destination).with_extension(MAP_EXTENSION)
}

fn reference(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl MapProvider for TomlMaps {
    fn resolve(&self, current: &str, destination: &str) -> Result<Option<String>, MapLoadError> {
        let file = map_file(destination);
        let found = self
            .candidates(current, &file)
            .into_iter()
            .find(|candidate| candidate.is_file());
        debug!(destination, found = ?found, "resolved teleport destination");
        Ok(found.as_deref().map(reference))
    }

    fn load(&self, map: &str) -> Result<MapDescriptor, MapLoadError> {
        let path = Path::new(map);
        let contents = fs::read_to_string(path).map_err(|source| MapLoadError::Io {
            map: map.to_owned(),
            source,
        })?;
        let mut descriptor: MapDescriptor =
            toml::from_str(&contents).map_err(|error| MapLoadError::Malformed {
                map: map.to_owned(),
                reason: error.to_string(),
            })?;
        if descriptor.name.is_empty() {
            descriptor.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(descriptor)
    }
}
