use medieval_rpg_core::MapDescriptor;
use thiserror::Error;

/// Failure to turn a map reference into a [`MapDescriptor`].
#[derive(Debug, Error)]
pub enum MapLoadError {
    /// The map file could not be read.
    #[error("failed to read map `{map}`")]
    Io {
        /// Reference of the map being read.
        map: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The map file was read but does not describe a valid map.
    #[error("map `{map}` is malformed: {reason}")]
    Malformed {
        /// Reference of the malformed map.
        map: String,
        /// Parser diagnostic.
        reason: String,
    },
}

impl MapLoadError {
    /// Reference of the map that failed to load.
    #[must_use]
    pub fn map(&self) -> &str {
        match self {
            Self::Io { map, .. } | Self::Malformed { map, .. } => map,
        }
    }
}

/// Source of map data consumed by the simulation.
///
/// References are opaque to the simulation: a provider hands one out from
/// [`MapProvider::resolve`] and receives it back in [`MapProvider::load`].
pub trait MapProvider {
    /// Resolves a teleport destination relative to the map currently loaded.
    ///
    /// Returns `Ok(None)` when no map matches the destination.
    fn resolve(&self, current: &str, destination: &str) -> Result<Option<String>, MapLoadError>;

    /// Loads the structure of a previously resolved map.
    fn load(&self, map: &str) -> Result<MapDescriptor, MapLoadError>;
}
