//! Collision layer mask builder
//!
//! Godot Physics Layers нумеруются с 1 (Layer 1..=32 в инспекторе),
//! бит маски — с 0. Layer `n` → бит `n - 1`:
//! - Layer 1 → 0b1 = 1
//! - Layer 3 → 0b100 = 4
//! - Layers {1, 3} → 0b101 = 5
//!
//! ## Использование:
//! ```rust
//! use bz_physics::{collision_mask, LayerMask};
//!
//! assert_eq!(collision_mask(&[1, 3]), 0b101);
//!
//! let mask = LayerMask::from_layers(&[2, 3]).unwrap();
//! assert!(mask.contains(2));
//! assert_eq!(mask.bits(), 0b110);
//! ```

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logger;

/// Первый валидный номер слоя
pub const MIN_LAYER: u32 = 1;

/// Последний валидный номер слоя (ширина маски)
pub const MAX_LAYER: u32 = u32::BITS;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerError {
    /// Layer number outside 1..=32.
    #[error("collision layer {layer} is out of range ({}..={})", MIN_LAYER, MAX_LAYER)]
    OutOfRange { layer: u32 },
}

/// 32-битная collision mask. Бит `i` установлен ⇔ слой `i + 1` включён.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Все 32 слоя (default для raycast)
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub const NONE: LayerMask = LayerMask(0);

    /// Strict builder: любой слой вне 1..=32 → `LayerError::OutOfRange`.
    pub fn from_layers(layers: &[u32]) -> Result<Self, LayerError> {
        layers
            .iter()
            .try_fold(Self::NONE, |mask, &layer| mask.try_with_layer(layer))
    }

    pub fn try_with_layer(self, layer: u32) -> Result<Self, LayerError> {
        Ok(LayerMask(self.0 | layer_bit(layer)?))
    }

    /// Как `try_with_layer`, но невалидный слой просто игнорируется.
    pub fn with_layer(self, layer: u32) -> Self {
        self.try_with_layer(layer).unwrap_or(self)
    }

    pub fn contains(&self, layer: u32) -> bool {
        layer_bit(layer).is_ok_and(|bit| self.0 & bit != 0)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Номера включённых слоёв по возрастанию (1-based).
    pub fn layers(&self) -> impl Iterator<Item = u32> + '_ {
        (MIN_LAYER..=MAX_LAYER).filter(move |&layer| self.contains(layer))
    }
}

fn layer_bit(layer: u32) -> Result<u32, LayerError> {
    if !(MIN_LAYER..=MAX_LAYER).contains(&layer) {
        return Err(LayerError::OutOfRange { layer });
    }
    Ok(1u32 << (layer - 1))
}

impl From<u32> for LayerMask {
    fn from(bits: u32) -> Self {
        LayerMask(bits)
    }
}

impl From<LayerMask> for u32 {
    fn from(mask: LayerMask) -> Self {
        mask.0
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        LayerMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for LayerMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for LayerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#034b}", self.0)
    }
}

/// Собирает collision mask из 1-based номеров слоёв (OR всех битов).
///
/// Пустой список → 0. Слои вне 1..=32 пропускаются с warning'ом
/// (никаких shift'ов за ширину маски). Strict вариант — [`LayerMask::from_layers`].
pub fn collision_mask(layers: &[u32]) -> u32 {
    let mut mask = LayerMask::NONE;
    for &layer in layers {
        match mask.try_with_layer(layer) {
            Ok(next) => mask = next,
            Err(err) => logger::log_warning(&format!("collision_mask: {err}, skipped")),
        }
    }
    mask.bits()
}
