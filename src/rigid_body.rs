//! Root pose representation and homogeneous transform algebra.

use crate::error::KinemarkError;
use crate::marker::{Marker, finite_coords};
use glam::{DMat4, DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// An orientation supplied to a [`RigidBody`], either as a quaternion
/// (normalized on intake) or as intrinsic XYZ Euler angles in radians.
///
/// Both forms are views of the same rotation; the body stores only the
/// canonical unit quaternion.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Orientation {
    Quaternion(DQuat),
    EulerXyz(DVec3),
}

impl Orientation {
    /// Validates every component and produces the canonical unit quaternion.
    fn to_unit_quat(self) -> Result<DQuat, KinemarkError> {
        match self {
            Orientation::Quaternion(q) => {
                for value in [q.x, q.y, q.z, q.w] {
                    if !value.is_finite() {
                        return Err(KinemarkError::NonFiniteOrientation { value });
                    }
                }
                if q.length_squared() <= f64::EPSILON {
                    return Err(KinemarkError::ZeroLengthQuaternion);
                }
                Ok(q.normalize())
            }
            Orientation::EulerXyz(angles) => {
                for value in [angles.x, angles.y, angles.z] {
                    if !value.is_finite() {
                        return Err(KinemarkError::NonFiniteOrientation { value });
                    }
                }
                Ok(DQuat::from_euler(
                    EulerRot::XYZ,
                    angles.x,
                    angles.y,
                    angles.z,
                ))
            }
        }
    }
}

/// A pose: position plus orientation, independent of markers and links.
///
/// The orientation is canonically a unit quaternion; Euler angles are only an
/// input/output view recomputed on demand, never stored alongside it.
///
/// Invariant: the position is finite and the rotation is a valid normalized
/// unit quaternion. Both update operations validate before committing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RigidBody {
    position: DVec3,
    rotation: DQuat,
    label: Option<String>,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            label: None,
        }
    }
}

impl RigidBody {
    /// Creates a body at `(x, y, z)` with identity rotation.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, KinemarkError> {
        let position = finite_coords(x, y, z)?;
        Ok(Self {
            position,
            rotation: DQuat::IDENTITY,
            label: None,
        })
    }

    /// Creates a body at `(x, y, z)` with the given orientation.
    pub fn with_orientation(
        x: f64,
        y: f64,
        z: f64,
        orientation: Orientation,
    ) -> Result<Self, KinemarkError> {
        let position = finite_coords(x, y, z)?;
        let rotation = orientation.to_unit_quat()?;
        Ok(Self {
            position,
            rotation,
            label: None,
        })
    }

    /// Attaches a label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the body's label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The body's position.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Replaces the position, validating finiteness first.
    pub fn update_position(&mut self, x: f64, y: f64, z: f64) -> Result<(), KinemarkError> {
        self.position = finite_coords(x, y, z)?;
        Ok(())
    }

    /// Replaces the orientation, validating and normalizing first.
    pub fn update_orientation(&mut self, orientation: Orientation) -> Result<(), KinemarkError> {
        self.rotation = orientation.to_unit_quat()?;
        Ok(())
    }

    /// The orientation as a unit quaternion.
    pub fn as_quaternion(&self) -> DQuat {
        self.rotation
    }

    /// The orientation as intrinsic XYZ Euler angles, in radians or degrees.
    ///
    /// Recomputed from the canonical quaternion on every call.
    pub fn as_euler(&self, degrees: bool) -> DVec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        if degrees {
            DVec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
        } else {
            DVec3::new(x, y, z)
        }
    }

    /// The 4x4 homogeneous transform `[R | T; 0 0 0 1]` for the current pose.
    pub fn transformation_matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.rotation, self.position)
    }

    /// The algebraic inverse transform `[Rᵀ | −Rᵀ·T; 0 0 0 1]`.
    ///
    /// Built from the conjugate rotation, not by numerically inverting
    /// [`Self::transformation_matrix`].
    pub fn inverse_transformation_matrix(&self) -> DMat4 {
        let inverse_rotation = self.rotation.inverse();
        DMat4::from_rotation_translation(inverse_rotation, inverse_rotation * -self.position)
    }

    /// Composes two poses: apply `self`'s pose, then `other`'s within it.
    ///
    /// The combined rotation is `self.rotation * other.rotation` and the
    /// combined position is `self.position + self.rotation · other.position`.
    /// Rotation composition is non-commutative, so this order is part of the
    /// contract. Also available as `&a * &b`.
    pub fn compose(&self, other: &RigidBody) -> RigidBody {
        RigidBody {
            position: self.position + self.rotation * other.position,
            rotation: self.rotation * other.rotation,
            label: None,
        }
    }

    /// Returns a new marker at the body-pose-transformed position of
    /// `marker`, carrying over its label.
    ///
    /// The result is a fresh marker instance; the input is not mutated and
    /// the output does not alias it.
    pub fn transform_marker(&self, marker: &Marker) -> Result<Marker, KinemarkError> {
        let p = self.position + self.rotation * marker.position();
        match marker.label() {
            Some(label) => Marker::labeled(p.x, p.y, p.z, label),
            None => Marker::new(p.x, p.y, p.z),
        }
    }

    /// The body's local X axis in world space.
    pub fn x_axis(&self) -> DVec3 {
        self.rotation * DVec3::X
    }

    /// The body's local Y axis in world space.
    pub fn y_axis(&self) -> DVec3 {
        self.rotation * DVec3::Y
    }

    /// The body's local Z axis in world space.
    ///
    /// Together with [`Self::x_axis`] and [`Self::y_axis`] this gives the
    /// orthonormal frame a rendering sink draws as orientation arrows.
    pub fn z_axis(&self) -> DVec3 {
        self.rotation * DVec3::Z
    }
}

impl Mul for &RigidBody {
    type Output = RigidBody;

    /// Pose composition; see [`RigidBody::compose`] for the order contract.
    fn mul(self, other: &RigidBody) -> RigidBody {
        self.compose(other)
    }
}
