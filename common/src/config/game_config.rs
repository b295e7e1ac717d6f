use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::games::snake::{BoundaryPolicy, FLOOR_INTERVAL_MS, FoodMotion, FoodPlacement, Point};
use super::Validate;

/// The two speed-up rates the variants use.
const DECAY_FACTORS: [f64; 2] = [0.90, 0.95];

/// Everything that distinguishes one snake variant from another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    pub grid_size: u32,
    pub boundary_policy: BoundaryPolicy,
    pub food_placement: FoodPlacement,
    pub food_motion: FoodMotion,
    pub initial_tick_interval_ms: u32,
    /// One of `DECAY_FACTORS`.
    pub decay_factor: f64,
    /// Grid centre when absent.
    #[serde(default)]
    pub initial_position: Option<Point>,
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if !(2..=100).contains(&self.grid_size) {
            return Err(format!(
                "grid_size must be between 2 and 100, got {}",
                self.grid_size
            ));
        }
        let floor = FLOOR_INTERVAL_MS as u32;
        if !(floor..=5000).contains(&self.initial_tick_interval_ms) {
            return Err(format!(
                "initial_tick_interval_ms must be between {} and 5000, got {}",
                floor, self.initial_tick_interval_ms
            ));
        }
        if !DECAY_FACTORS
            .iter()
            .any(|factor| (factor - self.decay_factor).abs() < 1e-9)
        {
            return Err(format!(
                "decay_factor must be one of {:?}, got {}",
                DECAY_FACTORS, self.decay_factor
            ));
        }
        if let Some(pos) = self.initial_position {
            let size = self.grid_size as i32;
            if !(0..size).contains(&pos.x) || !(0..size).contains(&pos.y) {
                return Err(format!(
                    "initial_position ({}, {}) is outside the {}x{} grid",
                    pos.x, pos.y, size, size
                ));
            }
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GamePreset::Classic.config()
    }
}

/// Named variants of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePreset {
    Classic,
    Walled,
    Pocket,
    Wander,
    Chaos,
}

impl GamePreset {
    pub const ALL: [GamePreset; 5] = [
        GamePreset::Classic,
        GamePreset::Walled,
        GamePreset::Pocket,
        GamePreset::Wander,
        GamePreset::Chaos,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GamePreset::Classic => "classic",
            GamePreset::Walled => "walled",
            GamePreset::Pocket => "pocket",
            GamePreset::Wander => "wander",
            GamePreset::Chaos => "chaos",
        }
    }

    pub fn config(self) -> GameConfig {
        let classic = GameConfig {
            grid_size: 20,
            boundary_policy: BoundaryPolicy::Wrap,
            food_placement: FoodPlacement::AvoidSnake,
            food_motion: FoodMotion::Static,
            initial_tick_interval_ms: 200,
            decay_factor: 0.95,
            initial_position: None,
        };

        match self {
            GamePreset::Classic => classic,
            GamePreset::Walled => GameConfig {
                boundary_policy: BoundaryPolicy::Lethal,
                ..classic
            },
            GamePreset::Pocket => GameConfig {
                grid_size: 10,
                initial_tick_interval_ms: 300,
                decay_factor: 0.90,
                ..classic
            },
            GamePreset::Wander => GameConfig {
                food_motion: FoodMotion::RandomWalk,
                ..classic
            },
            GamePreset::Chaos => GameConfig {
                grid_size: 10,
                boundary_policy: BoundaryPolicy::Lethal,
                food_placement: FoodPlacement::NoAvoid,
                food_motion: FoodMotion::RandomWalk,
                initial_tick_interval_ms: 300,
                decay_factor: 0.90,
                ..classic
            },
        }
    }
}

impl fmt::Display for GamePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GamePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GamePreset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = GamePreset::ALL.iter().map(|p| p.name()).collect();
                format!("Unknown preset '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigManager, ConfigSerializer, InMemoryContentProvider, YamlConfigSerializer};

    #[test]
    fn test_all_presets_are_valid() {
        for preset in GamePreset::ALL {
            assert!(preset.config().validate().is_ok(), "{} is invalid", preset);
        }
    }

    #[test]
    fn test_preset_parsing_is_case_insensitive() {
        assert_eq!("Walled".parse::<GamePreset>(), Ok(GamePreset::Walled));
        assert!("spiral".parse::<GamePreset>().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.decay_factor = 1.5;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.grid_size = 1;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.initial_position = Some(Point::new(20, 0));
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.initial_tick_interval_ms = 40;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_only_known_decay_factors_are_accepted() {
        let mut config = GameConfig::default();
        for factor in DECAY_FACTORS {
            config.decay_factor = factor;
            assert!(config.validate().is_ok(), "{} should be accepted", factor);
        }
        for factor in [0.5, 0.85, 0.99, 1.0] {
            config.decay_factor = factor;
            assert!(config.validate().is_err(), "{} should be rejected", factor);
        }
    }

    #[test]
    fn test_removed_timing_fields_are_rejected_in_yaml() {
        let yaml = "grid_size: 20\nboundary_policy: wrap\nfood_placement: avoid_snake\n\
                    food_motion: static\ninitial_tick_interval_ms: 60\ndecay_factor: 0.9\n\
                    floor_interval_ms: 10\n";
        let manager: ConfigManager<InMemoryContentProvider, GameConfig> = ConfigManager::new(
            InMemoryContentProvider::new(Some(yaml.to_string())),
            YamlConfigSerializer::new(),
        );
        let err = manager.get_config().expect_err("floor is not configurable");
        assert!(err.contains("floor_interval_ms"));
    }

    #[test]
    fn test_yaml_uses_snake_case_policies() {
        let serializer = YamlConfigSerializer::new();
        let yaml = serializer
            .serialize(&GamePreset::Chaos.config())
            .expect("serializes");
        assert!(yaml.contains("boundary_policy: lethal"));
        assert!(yaml.contains("food_placement: no_avoid"));
        assert!(yaml.contains("food_motion: random_walk"));
    }

    #[test]
    fn test_manager_round_trips_through_storage() {
        let manager: ConfigManager<InMemoryContentProvider, GameConfig> =
            ConfigManager::new(InMemoryContentProvider::default(), YamlConfigSerializer::new());

        assert_eq!(manager.get_config(), Ok(GameConfig::default()));

        let walled = GamePreset::Walled.config();
        manager.set_config(&walled).expect("valid config is stored");
        manager.invalidate().expect("cache reset");
        assert_eq!(manager.get_config(), Ok(walled));
    }

    #[test]
    fn test_manager_rejects_invalid_stored_config() {
        let yaml = "grid_size: 1\nboundary_policy: wrap\nfood_placement: avoid_snake\n\
                    food_motion: static\ninitial_tick_interval_ms: 200\ndecay_factor: 0.95\n";
        let manager: ConfigManager<InMemoryContentProvider, GameConfig> = ConfigManager::new(
            InMemoryContentProvider::new(Some(yaml.to_string())),
            YamlConfigSerializer::new(),
        );
        let err = manager.get_config().expect_err("grid too small");
        assert!(err.contains("grid_size"));
    }
}
