//! Ray query parameters + host boundary
//!
//! `RayQuery` повторяет поля Godot `PhysicsRayQueryParameters3D`
//! (defaults те же), `RaySpace` — единственная точка контакта с physics engine.

use bevy::math::Vec3;

use crate::hit::{ColliderHandle, RayIntersection, Rid};
use crate::layers::LayerMask;

/// Эфемерное описание одной ray query. Не хранится после вызова.
#[derive(Debug, Clone, PartialEq)]
pub struct RayQuery {
    pub from: Vec3,
    pub to: Vec3,
    pub collision_mask: LayerMask,
    /// Area3D (trigger volumes) тоже участвуют
    pub collide_with_areas: bool,
    pub collide_with_bodies: bool,
    pub hit_from_inside: bool,
    pub hit_back_faces: bool,
    pub exclude: Vec<Rid>,
}

impl RayQuery {
    pub fn new(from: Vec3, to: Vec3) -> Self {
        Self {
            from,
            to,
            collision_mask: LayerMask::ALL,
            collide_with_areas: false,
            collide_with_bodies: true,
            hit_from_inside: false,
            hit_back_faces: true,
            exclude: Vec::new(),
        }
    }

    pub fn with_mask(mut self, mask: impl Into<LayerMask>) -> Self {
        self.collision_mask = mask.into();
        self
    }

    pub fn with_areas(mut self, collide_with_areas: bool) -> Self {
        self.collide_with_areas = collide_with_areas;
        self
    }

    pub fn with_bodies(mut self, collide_with_bodies: bool) -> Self {
        self.collide_with_bodies = collide_with_bodies;
        self
    }

    pub fn with_hit_from_inside(mut self, hit_from_inside: bool) -> Self {
        self.hit_from_inside = hit_from_inside;
        self
    }

    pub fn with_hit_back_faces(mut self, hit_back_faces: bool) -> Self {
        self.hit_back_faces = hit_back_faces;
        self
    }

    pub fn excluding(mut self, rid: Rid) -> Self {
        if !self.exclude.contains(&rid) {
            self.exclude.push(rid);
        }
        self
    }

    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }
}

/// Host physics world, способный выполнить read-only ray query.
///
/// Один синхронный вызов на query, без retries. `None` — промах
/// (или query, которую host молча отклонил).
pub trait RaySpace {
    type Collider: ColliderHandle;

    fn intersect_ray(&mut self, query: &RayQuery) -> Option<RayIntersection<Self::Collider>>;
}

impl<S: RaySpace + ?Sized> RaySpace for &mut S {
    type Collider = S::Collider;

    fn intersect_ray(&mut self, query: &RayQuery) -> Option<RayIntersection<Self::Collider>> {
        (**self).intersect_ray(query)
    }
}
