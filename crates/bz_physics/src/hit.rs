//! CastHit — структурированный результат raycast'а
//!
//! Host (Godot) отдаёт результат `intersect_ray()` как нетипизированный Dictionary.
//! Adapter один раз переводит его в [`RayIntersection`], а façade строит из него
//! immutable [`CastHit`]. Имя collider'а копируется в момент постройки:
//! hit остаётся валидным даже если node уже удалён из scene tree.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

/// Low-level resource id физического объекта (Godot `RID`, u64).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rid(pub u64);

impl Rid {
    pub const INVALID: Rid = Rid(0);

    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

/// Opaque handle на collider, принадлежащий host'у.
///
/// Core никогда не downcast'ит и не владеет объектом — только читает имя.
pub trait ColliderHandle {
    fn name(&self) -> String;
}

/// Строго типизированный ответ host'а на одну ray query.
#[derive(Debug, Clone, PartialEq)]
pub struct RayIntersection<C> {
    pub position: Vec3,
    pub normal: Vec3,
    /// Индекс грани (только ConcavePolygonShape3D), иначе -1
    pub face_index: i32,
    pub collider: C,
    pub collider_id: u64,
    pub shape: i32,
    pub rid: Rid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitData<C> {
    pub position: Vec3,
    pub normal: Vec3,
    pub face_index: i32,
    pub collider: C,
    pub collider_id: u64,
    pub shape: i32,
    pub rid: Rid,
    pub collider_name: String,
}

impl<C: ColliderHandle> From<RayIntersection<C>> for HitData<C> {
    fn from(raw: RayIntersection<C>) -> Self {
        let collider_name = raw.collider.name();
        Self {
            position: raw.position,
            normal: raw.normal,
            face_index: raw.face_index,
            collider: raw.collider,
            collider_id: raw.collider_id,
            shape: raw.shape,
            rid: raw.rid,
            collider_name,
        }
    }
}

impl<C> HitData<C> {
    pub fn snapshot(&self) -> HitSnapshot {
        HitSnapshot {
            position: self.position.to_array(),
            normal: self.normal.to_array(),
            face_index: self.face_index,
            collider_id: self.collider_id,
            shape: self.shape,
            rid: self.rid,
            collider_name: self.collider_name.clone(),
        }
    }
}

/// Результат одного raycast'а: либо промах, либо точка пересечения.
#[derive(Debug, Clone, PartialEq)]
pub enum CastHit<C> {
    Empty,
    Hit(HitData<C>),
}

// Ручной impl: derive потребовал бы `C: Default`
impl<C> Default for CastHit<C> {
    fn default() -> Self {
        CastHit::Empty
    }
}

impl<C: ColliderHandle> CastHit<C> {
    /// `None` от host'а → `Empty`.
    pub fn from_intersection(raw: Option<RayIntersection<C>>) -> Self {
        match raw {
            Some(raw) => CastHit::Hit(raw.into()),
            None => CastHit::Empty,
        }
    }
}

impl<C> CastHit<C> {
    pub fn is_hit(&self) -> bool {
        matches!(self, CastHit::Hit(_))
    }

    pub fn is_empty(&self) -> bool {
        !self.is_hit()
    }

    pub fn hit(&self) -> Option<&HitData<C>> {
        match self {
            CastHit::Hit(data) => Some(data),
            CastHit::Empty => None,
        }
    }

    pub fn into_hit(self) -> Option<HitData<C>> {
        match self {
            CastHit::Hit(data) => Some(data),
            CastHit::Empty => None,
        }
    }

    // Neutral accessors: Empty → нулевые значения, как у "пустого" hit'а

    pub fn position(&self) -> Vec3 {
        self.hit().map_or(Vec3::ZERO, |hit| hit.position)
    }

    pub fn normal(&self) -> Vec3 {
        self.hit().map_or(Vec3::ZERO, |hit| hit.normal)
    }

    pub fn face_index(&self) -> i32 {
        self.hit().map_or(0, |hit| hit.face_index)
    }

    pub fn collider(&self) -> Option<&C> {
        self.hit().map(|hit| &hit.collider)
    }

    pub fn collider_id(&self) -> u64 {
        self.hit().map_or(0, |hit| hit.collider_id)
    }

    pub fn shape(&self) -> i32 {
        self.hit().map_or(0, |hit| hit.shape)
    }

    pub fn rid(&self) -> Rid {
        self.hit().map_or(Rid::INVALID, |hit| hit.rid)
    }

    pub fn collider_name(&self) -> &str {
        self.hit().map_or("", |hit| hit.collider_name.as_str())
    }

    /// Distance от `origin` до точки попадания (None при промахе).
    pub fn distance_from(&self, origin: Vec3) -> Option<f32> {
        self.hit().map(|hit| hit.position.distance(origin))
    }

    pub fn map_collider<D>(self, f: impl FnOnce(C) -> D) -> CastHit<D> {
        match self {
            CastHit::Empty => CastHit::Empty,
            CastHit::Hit(hit) => CastHit::Hit(HitData {
                position: hit.position,
                normal: hit.normal,
                face_index: hit.face_index,
                collider: f(hit.collider),
                collider_id: hit.collider_id,
                shape: hit.shape,
                rid: hit.rid,
                collider_name: hit.collider_name,
            }),
        }
    }

    /// Serializable payload без collider handle (debug dumps).
    pub fn snapshot(&self) -> Option<HitSnapshot> {
        self.hit().map(HitData::snapshot)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitSnapshot {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub face_index: i32,
    pub collider_id: u64,
    pub shape: i32,
    pub rid: Rid,
    pub collider_name: String,
}
