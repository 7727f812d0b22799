//! Labeled landmark points with shared-handle aliasing.

use crate::error::KinemarkError;
use glam::{DMat4, DVec3};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Checks every coordinate of a candidate position, reporting the first
/// non-finite axis. Shared by marker and rigid-body validation.
pub(crate) fn finite_coords(x: f64, y: f64, z: f64) -> Result<DVec3, KinemarkError> {
    for (axis, value) in [('x', x), ('y', y), ('z', z)] {
        if !value.is_finite() {
            return Err(KinemarkError::NonFiniteCoordinate { axis, value });
        }
    }
    Ok(DVec3::new(x, y, z))
}

struct MarkerShared {
    position: Cell<DVec3>,
    label: Option<String>,
}

/// A labeled point in 3D space.
///
/// `Marker` is a cheap cloneable *handle*: cloning it aliases the same
/// underlying point, so a joint marker shared by two links is one point and
/// moving it moves both segments. Identity is handle identity
/// ([`Marker::ptr_eq`]), never coordinate equality; two markers at the same
/// position are still distinct.
///
/// Invariant: all three coordinates are finite at all times. Mutators
/// validate the candidate position and fail before committing anything.
#[derive(Clone)]
pub struct Marker {
    shared: Rc<MarkerShared>,
}

impl Marker {
    /// Creates an unlabeled marker at `(x, y, z)`.
    ///
    /// Fails with [`KinemarkError::NonFiniteCoordinate`] if any coordinate is
    /// NaN or infinite.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, KinemarkError> {
        Self::build(x, y, z, None)
    }

    /// Creates a labeled marker at `(x, y, z)`.
    pub fn labeled(
        x: f64,
        y: f64,
        z: f64,
        label: impl Into<String>,
    ) -> Result<Self, KinemarkError> {
        Self::build(x, y, z, Some(label.into()))
    }

    fn build(x: f64, y: f64, z: f64, label: Option<String>) -> Result<Self, KinemarkError> {
        let position = finite_coords(x, y, z)?;
        Ok(Self {
            shared: Rc::new(MarkerShared {
                position: Cell::new(position),
                label,
            }),
        })
    }

    /// Returns the marker's current position.
    pub fn position(&self) -> DVec3 {
        self.shared.position.get()
    }

    /// Replaces the marker's position, validating finiteness first.
    pub fn set_position(&self, x: f64, y: f64, z: f64) -> Result<(), KinemarkError> {
        let position = finite_coords(x, y, z)?;
        self.shared.position.set(position);
        Ok(())
    }

    /// Translates the marker by `(dx, dy, dz)`.
    ///
    /// The *resulting* position is validated, so an overflow to infinity is
    /// rejected before anything moves.
    pub fn move_by(&self, dx: f64, dy: f64, dz: f64) -> Result<(), KinemarkError> {
        let p = self.position();
        let moved = finite_coords(p.x + dx, p.y + dy, p.z + dz)?;
        self.shared.position.set(moved);
        Ok(())
    }

    /// Euclidean distance to another marker.
    pub fn distance_to(&self, other: &Marker) -> f64 {
        self.position().distance(other.position())
    }

    /// Applies a 4x4 homogeneous transform to the position in place.
    ///
    /// The position is lifted to `(x, y, z, 1)`, multiplied, and the
    /// homogeneous component discarded. The transformed position is validated
    /// before committing; on failure the marker is unchanged.
    pub fn apply_transform(&self, matrix: &DMat4) -> Result<(), KinemarkError> {
        let transformed = (*matrix * self.position().extend(1.0)).truncate();
        let committed = finite_coords(transformed.x, transformed.y, transformed.z)?;
        self.shared.position.set(committed);
        Ok(())
    }

    /// Returns the marker's label, if any.
    pub fn label(&self) -> Option<&str> {
        self.shared.label.as_deref()
    }

    /// True if both handles alias the same underlying marker.
    ///
    /// This is the identity test used for link endpoints and chain
    /// connectivity. It is `false` for distinct markers even when their
    /// positions and labels are equal.
    pub fn ptr_eq(&self, other: &Marker) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl fmt::Debug for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.position();
        match self.label() {
            Some(label) => write!(f, "Marker({label:?}, [{}, {}, {}])", p.x, p.y, p.z),
            None => write!(f, "Marker([{}, {}, {}])", p.x, p.y, p.z),
        }
    }
}
