//! Helper configuration
//!
//! Host загружает значения (Godot: ProjectSettings `physics_helper/*`),
//! core хранит только plain data + defaults.

use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::cast::CastOptions;
use crate::layers::LayerMask;
use crate::logger::LogLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    /// Минимальный уровень логов
    pub log_level: LogLevel,
    /// Mask по умолчанию для casts без явной маски
    pub default_layer_mask: u32,
    pub collide_with_areas: bool,
    /// Печатать install/uninstall сообщения editor plugin'а
    pub announce_plugin: bool,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            default_layer_mask: LayerMask::ALL.bits(),
            collide_with_areas: false,
            announce_plugin: cfg!(debug_assertions),
        }
    }
}

impl HelperConfig {
    pub fn cast_options(&self) -> CastOptions {
        CastOptions::default()
            .with_mask(self.default_layer_mask)
            .with_areas(self.collide_with_areas)
    }

    /// Применить глобальные настройки (log level).
    pub fn apply(&self) {
        crate::logger::set_log_level(self.log_level);
    }
}

// Активный config процесса (host ставит его один раз при init)
static ACTIVE: Lazy<RwLock<HelperConfig>> = Lazy::new(|| RwLock::new(HelperConfig::default()));

/// Делает `config` активным и применяет глобальные настройки.
pub fn install(config: HelperConfig) {
    config.apply();
    *ACTIVE.write().unwrap_or_else(PoisonError::into_inner) = config;
}

pub fn active() -> HelperConfig {
    ACTIVE.read().unwrap_or_else(PoisonError::into_inner).clone()
}
