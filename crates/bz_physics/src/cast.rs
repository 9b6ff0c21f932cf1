//! Ray query façade — cast_line / cast_ray
//!
//! Caller → façade → `RaySpace::intersect_ray` → `RayIntersection` → `CastHit`.
//! Host state не мутируется (raycast read-only).

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::hit::CastHit;
use crate::layers::LayerMask;
use crate::logger::{self, LogLevel};
use crate::query::{RayQuery, RaySpace};

/// Опции, общие для cast_line/cast_ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastOptions {
    pub layer_mask: LayerMask,
    pub collide_with_areas: bool,
}

impl Default for CastOptions {
    fn default() -> Self {
        Self {
            layer_mask: LayerMask::ALL,
            collide_with_areas: false,
        }
    }
}

impl CastOptions {
    pub fn with_mask(mut self, mask: impl Into<LayerMask>) -> Self {
        self.layer_mask = mask.into();
        self
    }

    pub fn with_areas(mut self, collide_with_areas: bool) -> Self {
        self.collide_with_areas = collide_with_areas;
        self
    }

    fn query(&self, from: Vec3, to: Vec3) -> RayQuery {
        RayQuery::new(from, to)
            .with_mask(self.layer_mask)
            .with_areas(self.collide_with_areas)
    }
}

/// Конечная точка луча: `from + normalize(direction) * distance`.
///
/// `None` для нулевого/NaN direction — нормализация вырождена.
pub fn ray_end(from: Vec3, direction: Vec3, distance: f32) -> Option<Vec3> {
    direction
        .try_normalize()
        .map(|direction| from + direction * distance)
}

/// Line cast между двумя точками в global space.
pub fn cast_line<S: RaySpace>(
    space: &mut S,
    from: Vec3,
    to: Vec3,
    options: CastOptions,
) -> CastHit<S::Collider> {
    cast_query(space, &options.query(from, to))
}

/// Raycast из `from` в направлении `direction` на `distance`.
///
/// Нулевой direction → warning + `Empty`, host не вызывается.
pub fn cast_ray<S: RaySpace>(
    space: &mut S,
    from: Vec3,
    direction: Vec3,
    distance: f32,
    options: CastOptions,
) -> CastHit<S::Collider> {
    let Some(to) = ray_end(from, direction, distance) else {
        logger::log_warning(&format!(
            "cast_ray: degenerate direction {:?}, returning empty hit",
            direction
        ));
        return CastHit::Empty;
    };

    cast_line(space, from, to, options)
}

/// Полный контроль над параметрами (exclude, hit_from_inside, ...).
pub fn cast_query<S: RaySpace>(space: &mut S, query: &RayQuery) -> CastHit<S::Collider> {
    let hit = CastHit::from_intersection(space.intersect_ray(query));

    // format! только если debug реально пишется
    if let Some(data) = hit.hit().filter(|_| logger::enabled(LogLevel::Debug)) {
        logger::log(&format!(
            "raycast {:?} → {:?}: hit '{}' at {:?}",
            query.from, query.to, data.collider_name, data.position
        ));
    }

    hit
}

/// Extension-style API: `space.cast_line(..)` для любого `RaySpace`.
pub trait PhysicsCast: RaySpace {
    fn cast_line(&mut self, from: Vec3, to: Vec3, options: CastOptions) -> CastHit<Self::Collider>;

    fn cast_ray(
        &mut self,
        from: Vec3,
        direction: Vec3,
        distance: f32,
        options: CastOptions,
    ) -> CastHit<Self::Collider>;
}

impl<S: RaySpace> PhysicsCast for S {
    fn cast_line(&mut self, from: Vec3, to: Vec3, options: CastOptions) -> CastHit<Self::Collider> {
        cast_line(self, from, to, options)
    }

    fn cast_ray(
        &mut self,
        from: Vec3,
        direction: Vec3,
        distance: f32,
        options: CastOptions,
    ) -> CastHit<Self::Collider> {
        cast_ray(self, from, direction, distance, options)
    }
}
