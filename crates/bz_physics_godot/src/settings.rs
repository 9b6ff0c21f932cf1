//! HelperConfig из Godot ProjectSettings
//!
//! Ключи (Project → Project Settings → physics_helper/*):
//! - `physics_helper/log_level` (String: debug/info/warning/error)
//! - `physics_helper/default_layer_mask` (int)
//! - `physics_helper/collide_with_areas` (bool)
//! - `physics_helper/announce_plugin` (bool)
//!
//! Отсутствующий или некорректный ключ → default значение.

use bz_physics::{logger, HelperConfig, LogLevel};
use godot::classes::ProjectSettings;
use godot::prelude::*;

const LOG_LEVEL: &str = "physics_helper/log_level";
const DEFAULT_LAYER_MASK: &str = "physics_helper/default_layer_mask";
const COLLIDE_WITH_AREAS: &str = "physics_helper/collide_with_areas";
const ANNOUNCE_PLUGIN: &str = "physics_helper/announce_plugin";

pub fn load_from_project_settings() -> HelperConfig {
    let settings = ProjectSettings::singleton();
    let mut config = HelperConfig::default();

    if let Some(value) = read(&settings, LOG_LEVEL) {
        match value.try_to::<GString>().ok().and_then(|s| LogLevel::parse(&s.to_string())) {
            Some(level) => config.log_level = level,
            None => logger::log_warning(&format!("{}: unknown log level {}, using default", LOG_LEVEL, value)),
        }
    }

    if let Some(mask) = read(&settings, DEFAULT_LAYER_MASK).and_then(|v| v.try_to::<i64>().ok()) {
        // Godot хранит mask как int64, используем нижние 32 бита
        config.default_layer_mask = mask as u32;
    }

    if let Some(areas) = read(&settings, COLLIDE_WITH_AREAS).and_then(|v| v.try_to::<bool>().ok()) {
        config.collide_with_areas = areas;
    }

    if let Some(announce) = read(&settings, ANNOUNCE_PLUGIN).and_then(|v| v.try_to::<bool>().ok()) {
        config.announce_plugin = announce;
    }

    config
}

fn read(settings: &Gd<ProjectSettings>, key: &str) -> Option<Variant> {
    if !settings.has_setting(key) {
        return None;
    }
    Some(settings.get_setting(key))
}
