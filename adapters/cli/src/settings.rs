use std::{
    fs, io,
    path::{Path, PathBuf},
};

use medieval_rpg_system_enemy_ai as enemy_ai;
use medieval_rpg_system_simulation::Config;
use medieval_rpg_system_spawning as spawning;
use medieval_rpg_world::WorldConfig;
use serde::Deserialize;
use thiserror::Error;

/// Failure to read or parse the settings file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings file {}", path.display())]
    Read {
        /// Location of the settings file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The settings file is not valid settings TOML.
    #[error("invalid settings file {}", path.display())]
    Parse {
        /// Location of the settings file.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: toml::de::Error,
    },
}

/// Tunables of the world section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WorldSettings {
    pub(crate) hub_map: String,
    pub(crate) main_map: String,
    pub(crate) teleport_heal: u32,
    pub(crate) teleport_cooldown: u32,
    pub(crate) marker_duration: u32,
    pub(crate) spawn_tile: [u32; 2],
}

impl Default for WorldSettings {
    fn default() -> Self {
        let defaults = WorldConfig::default();
        Self {
            hub_map: defaults.hub_map,
            main_map: defaults.main_map,
            teleport_heal: defaults.teleport_heal,
            teleport_cooldown: defaults.teleport_cooldown,
            marker_duration: defaults.marker_duration,
            spawn_tile: defaults.spawn_tile,
        }
    }
}

/// Tunables of the spawning section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SpawnSettings {
    pub(crate) slime_count: usize,
    pub(crate) placement_attempts: u32,
    pub(crate) tile_margin: u32,
    pub(crate) safe_maps: Vec<String>,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            slime_count: 8,
            placement_attempts: 50,
            tile_margin: 5,
            safe_maps: vec!["home_inn_1".to_owned()],
        }
    }
}

/// Session settings read from an optional TOML file and overridden by flags.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    pub(crate) maps: PathBuf,
    pub(crate) start: String,
    pub(crate) ticks: u64,
    pub(crate) seed: u64,
    pub(crate) log_level: String,
    pub(crate) viewport: [f32; 2],
    pub(crate) world: WorldSettings,
    pub(crate) spawning: SpawnSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            maps: PathBuf::from("maps"),
            start: "home_inn_1".to_owned(),
            ticks: 600,
            seed: 0x5eed,
            log_level: "info".to_owned(),
            viewport: [800.0, 600.0],
            world: WorldSettings::default(),
            spawning: SpawnSettings::default(),
        }
    }
}

impl Settings {
    /// Reads settings from `path`, or returns the defaults when no file is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Builds the simulation configuration with every generator derived from the seed.
    pub(crate) fn simulation_config(&self) -> Config {
        let world = WorldConfig {
            hub_map: self.world.hub_map.clone(),
            main_map: self.world.main_map.clone(),
            teleport_heal: self.world.teleport_heal,
            teleport_cooldown: self.world.teleport_cooldown,
            marker_duration: self.world.marker_duration,
            spawn_tile: self.world.spawn_tile,
            rng_seed: self.seed,
        };
        let spawning = spawning::Config::new(
            self.spawning.slime_count,
            self.spawning.safe_maps.clone(),
            self.seed.wrapping_add(1),
        )
        .with_placement(self.spawning.placement_attempts, self.spawning.tile_margin);

        Config {
            world,
            spawning,
            enemy_ai: enemy_ai::Config::new(self.seed.wrapping_add(2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(Settings::parse("").expect("empty toml"), Settings::default());
    }

    #[test]
    fn sections_override_selected_fields() {
        let settings = Settings::parse(
            r#"
            start = "forest"
            ticks = 42

            [world]
            teleport_heal = 35

            [spawning]
            slime_count = 3
            safe_maps = ["home_inn_1", "chapel"]
            "#,
        )
        .expect("valid settings");

        assert_eq!(settings.start, "forest");
        assert_eq!(settings.ticks, 42);
        assert_eq!(settings.world.teleport_heal, 35);
        assert_eq!(settings.world.teleport_cooldown, 30);
        assert_eq!(settings.spawning.slime_count, 3);
        assert_eq!(settings.spawning.safe_maps.len(), 2);
        assert_eq!(settings.maps, PathBuf::from("maps"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Settings::parse("tick = 5").is_err());
    }

    #[test]
    fn missing_file_reports_its_path() {
        let error = Settings::load(Some(Path::new("/nonexistent/medieval-rpg.toml")))
            .expect_err("file does not exist");
        assert!(matches!(error, ConfigError::Read { .. }));
        assert!(error.to_string().contains("/nonexistent/medieval-rpg.toml"));
    }

    #[test]
    fn seed_feeds_every_generator() {
        let settings = Settings {
            seed: 9,
            ..Settings::default()
        };
        let config = settings.simulation_config();
        assert_eq!(config.world.rng_seed, 9);
        assert_eq!(config.world.spawn_tile, [166, 57]);
    }
}
