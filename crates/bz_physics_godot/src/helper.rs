//! PhysicsHelper — raycast API для Rust и GDScript
//!
//! Rust: `Node3DCast` extension trait на `Gd<Node3D>`:
//! ```ignore
//! let hit = node.cast_ray_3d(origin, -Vector3::UP, 10.0, CastOptions::default());
//! if hit.is_hit() { ... }
//! ```
//!
//! GDScript: static funcs класса `PhysicsHelper`, результат — `CastHit3D`:
//! ```gdscript
//! var hit := PhysicsHelper.cast_ray_3d(self, global_position, Vector3.DOWN, 10.0)
//! if hit.is_hit():
//!     print(hit.get_collider_name())
//! ```

use bz_physics::{cast_line, cast_ray, collision_mask, config, CastHit, CastOptions};
use godot::classes::Node3D;
use godot::prelude::*;

use crate::space::{to_vec3, to_vector3, GodotCollider, GodotSpace};

pub trait Node3DCast {
    /// Line cast между двумя точками в global space, в мире этого node'а.
    fn cast_line_3d(&self, from: Vector3, to: Vector3, options: CastOptions) -> CastHit<GodotCollider>;

    /// Raycast из `from` в направлении `direction` на `distance`.
    fn cast_ray_3d(
        &self,
        from: Vector3,
        direction: Vector3,
        distance: f32,
        options: CastOptions,
    ) -> CastHit<GodotCollider>;
}

impl Node3DCast for Gd<Node3D> {
    fn cast_line_3d(&self, from: Vector3, to: Vector3, options: CastOptions) -> CastHit<GodotCollider> {
        // Нет World3D → cast невозможен (ошибка уже залогирована)
        let Some(mut space) = GodotSpace::for_node(self) else {
            return CastHit::Empty;
        };
        cast_line(&mut space, to_vec3(from), to_vec3(to), options)
    }

    fn cast_ray_3d(
        &self,
        from: Vector3,
        direction: Vector3,
        distance: f32,
        options: CastOptions,
    ) -> CastHit<GodotCollider> {
        let Some(mut space) = GodotSpace::for_node(self) else {
            return CastHit::Empty;
        };
        cast_ray(&mut space, to_vec3(from), to_vec3(direction), distance, options)
    }
}

/// Результат raycast'а для GDScript (immutable, read-only getters).
#[derive(GodotClass)]
#[class(init, base=RefCounted)]
pub struct CastHit3D {
    base: Base<RefCounted>,
    hit: CastHit<GodotCollider>,
}

impl CastHit3D {
    pub fn from_hit(hit: CastHit<GodotCollider>) -> Gd<Self> {
        Gd::from_init_fn(|base| Self { base, hit })
    }

    pub fn hit(&self) -> &CastHit<GodotCollider> {
        &self.hit
    }
}

#[godot_api]
impl CastHit3D {
    #[func]
    fn is_hit(&self) -> bool {
        self.hit.is_hit()
    }

    #[func]
    fn get_position(&self) -> Vector3 {
        to_vector3(self.hit.position())
    }

    #[func]
    fn get_normal(&self) -> Vector3 {
        to_vector3(self.hit.normal())
    }

    #[func]
    fn get_face_index(&self) -> i32 {
        self.hit.face_index()
    }

    /// `null` при промахе или если collider уже удалён.
    #[func]
    fn get_collider(&self) -> Option<Gd<Node>> {
        self.hit
            .collider()
            .filter(|collider| collider.0.is_instance_valid())
            .map(|collider| collider.0.clone())
    }

    #[func]
    fn get_collider_id(&self) -> i64 {
        self.hit.collider_id() as i64
    }

    #[func]
    fn get_shape(&self) -> i32 {
        self.hit.shape()
    }

    #[func]
    fn get_rid(&self) -> Rid {
        Rid::new(self.hit.rid().0)
    }

    /// Имя скопировано в момент raycast'а.
    #[func]
    fn get_collider_name(&self) -> GString {
        GString::from(self.hit.collider_name())
    }
}

/// Static raycast helpers для GDScript.
#[derive(GodotClass)]
#[class(init, base=Object)]
pub struct PhysicsHelper {
    base: Base<Object>,
}

#[godot_api]
impl PhysicsHelper {
    /// Line cast с mask/areas из ProjectSettings (default: все слои, без Area3D).
    #[func]
    fn cast_line_3d(sender: Gd<Node3D>, from: Vector3, to: Vector3) -> Gd<CastHit3D> {
        let options = config::active().cast_options();
        CastHit3D::from_hit(sender.cast_line_3d(from, to, options))
    }

    #[func]
    fn cast_line_3d_masked(
        sender: Gd<Node3D>,
        from: Vector3,
        to: Vector3,
        layer_mask: u32,
        collide_with_areas: bool,
    ) -> Gd<CastHit3D> {
        let options = CastOptions::default()
            .with_mask(layer_mask)
            .with_areas(collide_with_areas);
        CastHit3D::from_hit(sender.cast_line_3d(from, to, options))
    }

    #[func]
    fn cast_ray_3d(sender: Gd<Node3D>, from: Vector3, direction: Vector3, distance: f32) -> Gd<CastHit3D> {
        let options = config::active().cast_options();
        CastHit3D::from_hit(sender.cast_ray_3d(from, direction, distance, options))
    }

    #[func]
    fn cast_ray_3d_masked(
        sender: Gd<Node3D>,
        from: Vector3,
        direction: Vector3,
        distance: f32,
        layer_mask: u32,
        collide_with_areas: bool,
    ) -> Gd<CastHit3D> {
        let options = CastOptions::default()
            .with_mask(layer_mask)
            .with_areas(collide_with_areas);
        CastHit3D::from_hit(sender.cast_ray_3d(from, direction, distance, options))
    }

    /// Collision mask из 1-based номеров слоёв: `[1, 3]` → 5.
    #[func]
    fn get_collision_mask(layers: PackedInt32Array) -> u32 {
        collision_mask(&layer_numbers(layers.as_slice()))
    }
}

/// GDScript int → номер слоя. Отрицательные → 0, collision_mask пропустит их с warning'ом.
fn layer_numbers(layers: &[i32]) -> Vec<u32> {
    layers
        .iter()
        .map(|&layer| u32::try_from(layer).unwrap_or(0))
        .collect()
}
