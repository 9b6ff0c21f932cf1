//! GodotSpace — `RaySpace` поверх `PhysicsDirectSpaceState3D::intersect_ray()`
//!
//! Godot возвращает результат как Dictionary с ключами:
//! "position", "normal", "face_index", "collider_id", "collider", "shape", "rid".
//! Пустой Dictionary → промах. Неизвестные ключи игнорируются.

use bevy::prelude::Vec3;
use godot::classes::{Node3D, PhysicsDirectSpaceState3D, PhysicsRayQueryParameters3D};
use godot::prelude::*;

use bz_physics::{logger, ColliderHandle, RayIntersection, RayQuery, RaySpace};

/// Godot collider handle. Scene graph владеет node'ом, мы только держим `Gd`.
///
/// `Gd<Node>`, не `CollisionObject3D`: GridMap и SoftBody3D тоже бывают collider'ами.
#[derive(Debug, Clone, PartialEq)]
pub struct GodotCollider(pub Gd<Node>);

impl GodotCollider {
    pub fn from_node<T: Inherits<Node>>(node: Gd<T>) -> Self {
        Self(node.upcast())
    }
}

impl ColliderHandle for GodotCollider {
    fn name(&self) -> String {
        if !self.0.is_instance_valid() {
            return String::new();
        }
        self.0.get_name().to_string()
    }
}

pub struct GodotSpace {
    state: Gd<PhysicsDirectSpaceState3D>,
}

impl GodotSpace {
    pub fn new(state: Gd<PhysicsDirectSpaceState3D>) -> Self {
        Self { state }
    }

    /// Physics space мира, в котором находится `node`.
    ///
    /// `None` — node вне scene tree / нет World3D (fatal precondition для cast'а).
    pub fn for_node(node: &Gd<Node3D>) -> Option<Self> {
        let Some(mut world) = node.get_world_3d() else {
            logger::log_error(&format!(
                "GodotSpace: World3D не найден для '{}'",
                node.get_name()
            ));
            return None;
        };

        let Some(state) = world.get_direct_space_state() else {
            logger::log_error("GodotSpace: PhysicsDirectSpaceState3D не найден");
            return None;
        };

        Some(Self::new(state))
    }
}

impl RaySpace for GodotSpace {
    type Collider = GodotCollider;

    fn intersect_ray(&mut self, query: &RayQuery) -> Option<RayIntersection<GodotCollider>> {
        let params = build_params(query)?;
        let result = self.state.intersect_ray(&params);

        if result.is_empty() {
            return None;
        }

        // Ключи, без которых hit бессмысленен
        let position = result.get("position").and_then(|v| v.try_to::<Vector3>().ok());
        let normal = result.get("normal").and_then(|v| v.try_to::<Vector3>().ok());
        let collider = result
            .get("collider")
            .and_then(|v| v.try_to::<Gd<Node>>().ok());

        let (Some(position), Some(normal), Some(collider)) = (position, normal, collider) else {
            logger::log_error("GodotSpace: intersect_ray result без position/normal/collider");
            return None;
        };

        // Опциональные ключи: neutral значения если отсутствуют
        let face_index = result
            .get("face_index")
            .and_then(|v| v.try_to::<i64>().ok())
            .unwrap_or(-1);
        let collider_id = result
            .get("collider_id")
            .and_then(|v| v.try_to::<i64>().ok())
            .unwrap_or(0);
        let shape = result
            .get("shape")
            .and_then(|v| v.try_to::<i64>().ok())
            .unwrap_or(0);
        let rid = result
            .get("rid")
            .and_then(|v| v.try_to::<Rid>().ok())
            .map_or(0, |rid| rid.to_u64());

        Some(RayIntersection {
            position: to_vec3(position),
            normal: to_vec3(normal),
            face_index: face_index as i32,
            collider: GodotCollider(collider),
            collider_id: collider_id as u64,
            shape: shape as i32,
            rid: bz_physics::Rid(rid),
        })
    }
}

fn build_params(query: &RayQuery) -> Option<Gd<PhysicsRayQueryParameters3D>> {
    let Some(mut params) = PhysicsRayQueryParameters3D::create(to_vector3(query.from), to_vector3(query.to)) else {
        logger::log_error("GodotSpace: PhysicsRayQueryParameters3D::create failed");
        return None;
    };

    params.set_collision_mask(query.collision_mask.bits());
    params.set_collide_with_areas(query.collide_with_areas);
    params.set_collide_with_bodies(query.collide_with_bodies);
    params.set_hit_from_inside(query.hit_from_inside);
    params.set_hit_back_faces(query.hit_back_faces);

    let mut exclude: Array<Rid> = Array::new();
    for rid in &query.exclude {
        exclude.push(Rid::new(rid.0));
    }
    params.set_exclude(&exclude);

    Some(params)
}

// Godot Vector3 ↔ Bevy Vec3

pub fn to_vec3(v: Vector3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn to_vector3(v: Vec3) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}
