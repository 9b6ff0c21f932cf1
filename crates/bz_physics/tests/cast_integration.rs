//! Cast integration tests
//!
//! In-memory `RaySpace` из axis-aligned плоскостей: каждая плоскость —
//! collider на своём collision layer, опционально Area (trigger volume).
//!
//! Проверяем:
//! - miss → Empty с нулевым payload
//! - hit → position/normal без изменений + имя collider'а
//! - mask/areas фильтруют colliders
//! - cast_ray ≡ cast_line(from, from + normalize(dir) * distance)

use bevy::math::Vec3;
use bz_physics::*;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, PartialEq)]
struct Collider {
    name: String,
    id: u64,
}

impl ColliderHandle for Collider {
    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Плоскость `dot(normal, p) == offset`
struct Plane {
    normal: Vec3,
    offset: f32,
    layer: u32,
    is_area: bool,
    collider: Collider,
}

#[derive(Default)]
struct PlaneWorld {
    planes: Vec<Plane>,
    queries: usize,
}

impl PlaneWorld {
    fn add(&mut self, name: &str, normal: Vec3, offset: f32, layer: u32, is_area: bool) {
        let id = self.planes.len() as u64 + 100;
        self.planes.push(Plane {
            normal,
            offset,
            layer,
            is_area,
            collider: Collider {
                name: name.to_string(),
                id,
            },
        });
    }

    /// Пол y=0 (layer 1), стена z=-10 (layer 3), trigger x=5 (layer 2, area)
    fn arena() -> Self {
        let mut world = PlaneWorld::default();
        world.add("Floor", Vec3::Y, 0.0, 1, false);
        world.add("Wall", Vec3::Z, -10.0, 3, false);
        world.add("Trigger", Vec3::NEG_X, -5.0, 2, true);
        world
    }
}

impl RaySpace for PlaneWorld {
    type Collider = Collider;

    fn intersect_ray(&mut self, query: &RayQuery) -> Option<RayIntersection<Collider>> {
        self.queries += 1;
        let segment = query.to - query.from;

        self.planes
            .iter()
            .enumerate()
            .filter(|(_, plane)| query.collision_mask.contains(plane.layer))
            .filter(|(_, plane)| {
                if plane.is_area {
                    query.collide_with_areas
                } else {
                    query.collide_with_bodies
                }
            })
            .filter_map(|(index, plane)| {
                let denom = plane.normal.dot(segment);
                if denom.abs() < 1e-6 {
                    return None;
                }
                let t = (plane.offset - plane.normal.dot(query.from)) / denom;
                (0.0..=1.0).contains(&t).then_some((t, index, plane))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(t, index, plane)| RayIntersection {
                position: query.from + segment * t,
                normal: plane.normal,
                face_index: -1,
                collider: plane.collider.clone(),
                collider_id: plane.collider.id,
                shape: 0,
                rid: Rid(index as u64 + 1),
            })
    }
}

#[test]
fn test_miss_returns_empty_payload() {
    let mut world = PlaneWorld::arena();
    // Вверх от пола — ничего
    let hit = cast_line(
        &mut world,
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 50.0, 0.0),
        CastOptions::default(),
    );

    assert!(hit.is_empty());
    assert_eq!(hit.position(), Vec3::ZERO);
    assert_eq!(hit.normal(), Vec3::ZERO);
    assert_eq!(hit.collider(), None);
    assert_eq!(hit.collider_id(), 0);
    assert_eq!(hit.rid(), Rid::INVALID);
    assert_eq!(hit.collider_name(), "");
    assert_eq!(world.queries, 1);
}

#[test]
fn test_line_hits_floor() {
    let mut world = PlaneWorld::arena();
    let hit = world.cast_line(
        Vec3::new(1.0, 5.0, 1.0),
        Vec3::new(1.0, -5.0, 1.0),
        CastOptions::default(),
    );

    assert!(hit.is_hit());
    assert_eq!(hit.position(), Vec3::new(1.0, 0.0, 1.0));
    assert_eq!(hit.normal(), Vec3::Y);
    assert_eq!(hit.collider_name(), "Floor");
    assert_eq!(hit.collider_id(), 100);
}

#[test]
fn test_mask_filters_layers() {
    let mut world = PlaneWorld::arena();
    let from = Vec3::new(0.0, 1.0, 0.0);
    let to = Vec3::new(0.0, -1.0, -12.0);

    // Все слои: пол ближе стены
    let hit = cast_line(&mut world, from, to, CastOptions::default());
    assert_eq!(hit.collider_name(), "Floor");

    // Только layer 3 (стена)
    let options = CastOptions::default().with_mask(collision_mask(&[3]));
    let hit = cast_line(&mut world, from, to, options);
    assert_eq!(hit.collider_name(), "Wall");
    assert_eq!(hit.normal(), Vec3::Z);

    // Пустая маска — ничего
    let options = CastOptions::default().with_mask(LayerMask::NONE);
    assert!(cast_line(&mut world, from, to, options).is_empty());
}

#[test]
fn test_areas_only_when_requested() {
    let mut world = PlaneWorld::arena();
    let from = Vec3::new(0.0, 1.0, 0.0);
    let direction = Vec3::X;

    let hit = cast_ray(&mut world, from, direction, 20.0, CastOptions::default());
    assert!(hit.is_empty(), "Area3D не должен детектиться по умолчанию");

    let options = CastOptions::default().with_areas(true);
    let hit = cast_ray(&mut world, from, direction, 20.0, options);
    assert_eq!(hit.collider_name(), "Trigger");
    assert_eq!(hit.position(), Vec3::new(5.0, 1.0, 0.0));
}

#[test]
fn test_ray_shorter_than_obstacle_misses() {
    let mut world = PlaneWorld::arena();
    let hit = cast_ray(
        &mut world,
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::NEG_Z,
        5.0,
        CastOptions::default(),
    );
    assert!(hit.is_empty());
}

#[test]
fn test_ray_equals_line_deterministic_samples() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut world = PlaneWorld::arena();

    for _ in 0..500 {
        let from = Vec3::new(
            rng.gen_range(-8.0..8.0),
            rng.gen_range(0.5..8.0),
            rng.gen_range(-8.0..8.0),
        );
        let direction = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if direction.length_squared() < 1e-4 {
            continue;
        }
        let distance = rng.gen_range(0.1..30.0);
        let options = CastOptions::default().with_areas(rng.gen_bool(0.5));

        let ray = cast_ray(&mut world, from, direction, distance, options);
        let line = cast_line(&mut world, from, from + direction.normalize() * distance, options);
        assert_eq!(ray, line);
    }
}

proptest! {
    #[test]
    fn prop_one_bit_per_distinct_layer(
        layers in proptest::collection::btree_set(1u32..=32, 1..=16)
    ) {
        let layers: Vec<u32> = layers.into_iter().collect();
        let mask = collision_mask(&layers);

        prop_assert_eq!(mask.count_ones() as usize, layers.len());
        for layer in 1..=32u32 {
            prop_assert_eq!(mask & (1 << (layer - 1)) != 0, layers.contains(&layer));
        }
        prop_assert_eq!(LayerMask::from_layers(&layers), Ok(LayerMask(mask)));
    }

    #[test]
    fn prop_mask_order_independent(
        layers in proptest::collection::vec(1u32..=32, 0..16)
    ) {
        let mut reversed = layers.clone();
        reversed.reverse();
        let mut sorted = layers.clone();
        sorted.sort_unstable();

        let mask = collision_mask(&layers);
        prop_assert_eq!(mask, collision_mask(&reversed));
        prop_assert_eq!(mask, collision_mask(&sorted));
    }

    #[test]
    fn prop_ray_equals_normalized_line(
        from in (-8.0f32..8.0, 0.5f32..8.0, -8.0f32..8.0),
        direction in (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0),
        distance in 0.1f32..40.0,
        mask in any::<u32>(),
    ) {
        let from = Vec3::new(from.0, from.1, from.2);
        let direction = Vec3::new(direction.0, direction.1, direction.2);
        prop_assume!(direction.length_squared() > 1e-4);

        let mut world = PlaneWorld::arena();
        let options = CastOptions::default().with_mask(mask);
        let ray = cast_ray(&mut world, from, direction, distance, options);
        let line = cast_line(&mut world, from, from + direction.normalize() * distance, options);
        prop_assert_eq!(ray, line);
    }

    #[test]
    fn prop_hit_position_and_normal_unchanged(
        x in -8.0f32..8.0,
        z in -8.0f32..8.0,
        height in 0.5f32..20.0,
    ) {
        let mut world = PlaneWorld::arena();
        let from = Vec3::new(x, height, z);
        let hit = cast_ray(&mut world, from, Vec3::NEG_Y, height + 1.0, CastOptions::default());

        prop_assert!(hit.is_hit());
        prop_assert_eq!(hit.normal(), Vec3::Y);
        prop_assert!((hit.position() - Vec3::new(x, 0.0, z)).length() < 1e-4);
        prop_assert_eq!(hit.collider_name(), "Floor");
    }
}
