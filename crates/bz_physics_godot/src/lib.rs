//! BZ Physics — Godot GDExtension
//!
//! Связывает engine-agnostic `bz_physics` с Godot 4 physics:
//! - `GodotSpace` — `RaySpace` поверх `PhysicsDirectSpaceState3D`
//! - `PhysicsHelper` / `CastHit3D` — API для GDScript
//! - `PhysicsHelperPlugin` — editor plugin stub

use godot::init::InitLevel;
use godot::prelude::*;

pub mod helper;
mod logger;
mod plugin;
mod settings;
pub mod space;

pub use helper::{CastHit3D, Node3DCast, PhysicsHelper};
pub use space::{GodotCollider, GodotSpace};

/// GDExtension entry point
struct BzPhysicsExtension;

#[gdextension]
unsafe impl ExtensionLibrary for BzPhysicsExtension {
    fn on_level_init(level: InitLevel) {
        if level != InitLevel::Scene {
            return;
        }

        bz_physics::set_logger_if_needed(Box::new(logger::GodotLogger));
        let config = settings::load_from_project_settings();
        bz_physics::config::install(config);
        bz_physics::log("BZ Physics extension initialized");
    }

    fn on_level_deinit(level: InitLevel) {
        if level == InitLevel::Scene {
            bz_physics::logger::clear_logger();
        }
    }
}
