//! GodotLogger implementation
//!
//! Bridges bz_physics logging to Godot's godot_print!/godot_warn!/godot_error!.

use bz_physics::{LogLevel, LogPrinter};
use godot::prelude::{godot_error, godot_print, godot_warn};

pub struct GodotLogger;

impl LogPrinter for GodotLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => godot_error!("[BZPhysics][{}] {}", level.as_str(), message),
            LogLevel::Warning => godot_warn!("[BZPhysics][{}] {}", level.as_str(), message),
            LogLevel::Debug | LogLevel::Info => {
                godot_print!("[BZPhysics][{}] {}", level.as_str(), message)
            }
        }
    }
}
