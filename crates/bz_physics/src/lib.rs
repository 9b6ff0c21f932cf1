//! BZ Physics — core
//!
//! Convenience layer над 3D raycast API game engine'а:
//! - `CastHit` — структурированный результат ray query (hit / no hit)
//! - `cast_line` / `cast_ray` — façade поверх host physics (`RaySpace`)
//! - `collision_mask` — bitmask из 1-based номеров collision layers
//!
//! Engine-agnostic: raycast, broadphase и collision detection целиком
//! делает host (Godot — см. bz_physics_godot).

pub mod cast;
pub mod config;
pub mod hit;
pub mod layers;
pub mod logger;
pub mod query;

pub use cast::{cast_line, cast_query, cast_ray, ray_end, CastOptions, PhysicsCast};
pub use config::HelperConfig;
pub use hit::{CastHit, ColliderHandle, HitData, HitSnapshot, RayIntersection, Rid};
pub use layers::{collision_mask, LayerError, LayerMask, MAX_LAYER, MIN_LAYER};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use query::{RayQuery, RaySpace};
