//! Oriented segments between two distinct markers.

use crate::error::KinemarkError;
use crate::marker::Marker;
use glam::DVec3;
use std::fmt;

/// Default tolerance for [`Link::is_collinear_with`].
pub const COLLINEAR_TOLERANCE: f64 = 1e-6;

/// An oriented segment from `marker1` to `marker2`.
///
/// A link holds handle clones of its two markers, never copies of them:
/// several links may reference the same marker (a shared joint), and moving
/// that marker is visible through every referencing link. The two endpoints
/// must be distinct *instances*; two markers with identical coordinates are a
/// valid link.
#[derive(Clone)]
pub struct Link {
    marker1: Marker,
    marker2: Marker,
    label: Option<String>,
}

impl Link {
    /// Creates an unlabeled link from `marker1` to `marker2`.
    ///
    /// Fails with [`KinemarkError::DegenerateLink`] if both arguments alias
    /// the same marker instance.
    pub fn new(marker1: Marker, marker2: Marker) -> Result<Self, KinemarkError> {
        Self::build(marker1, marker2, None)
    }

    /// Creates a labeled link from `marker1` to `marker2`.
    pub fn labeled(
        marker1: Marker,
        marker2: Marker,
        label: impl Into<String>,
    ) -> Result<Self, KinemarkError> {
        Self::build(marker1, marker2, Some(label.into()))
    }

    fn build(
        marker1: Marker,
        marker2: Marker,
        label: Option<String>,
    ) -> Result<Self, KinemarkError> {
        if marker1.ptr_eq(&marker2) {
            return Err(KinemarkError::DegenerateLink);
        }
        Ok(Self {
            marker1,
            marker2,
            label,
        })
    }

    /// The first endpoint (segment origin).
    pub fn marker1(&self) -> &Marker {
        &self.marker1
    }

    /// The second endpoint (segment tip).
    pub fn marker2(&self) -> &Marker {
        &self.marker2
    }

    /// Returns the link's label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Segment length: the distance between the two endpoints.
    pub fn length(&self) -> f64 {
        self.marker1.distance_to(&self.marker2)
    }

    /// The point halfway between the two endpoints.
    pub fn midpoint(&self) -> DVec3 {
        (self.marker1.position() + self.marker2.position()) / 2.0
    }

    /// Direction vector from `marker1` to `marker2`.
    pub fn vector(&self) -> DVec3 {
        self.marker2.position() - self.marker1.position()
    }

    /// True if the two links' direction vectors are collinear within
    /// [`COLLINEAR_TOLERANCE`].
    pub fn is_collinear_with(&self, other: &Link) -> bool {
        self.is_collinear_with_tolerance(other, COLLINEAR_TOLERANCE)
    }

    /// Collinearity test with a caller-supplied tolerance on the cross
    /// product norm.
    pub fn is_collinear_with_tolerance(&self, other: &Link, tolerance: f64) -> bool {
        self.vector().cross(other.vector()).length() < tolerance
    }

    /// Angle in radians between this link's direction and `other`'s.
    ///
    /// The cosine is clamped to `[-1, 1]` before `acos`: floating-point
    /// rounding can push the ratio slightly out of the domain for parallel or
    /// anti-parallel links.
    pub fn angle_with(&self, other: &Link) -> f64 {
        let v1 = self.vector();
        let v2 = other.vector();
        let cos_theta = v1.dot(v2) / (v1.length() * v2.length());
        cos_theta.clamp(-1.0, 1.0).acos()
    }

    /// Swaps the two endpoints in place. Used by the skeleton's insertion
    /// algorithm to keep the chain orientation consistent; the same two
    /// marker identities remain referenced.
    pub(crate) fn swap_markers(&mut self) {
        std::mem::swap(&mut self.marker1, &mut self.marker2);
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "Link({label:?}, length: {:.2})", self.length()),
            None => write!(f, "Link(length: {:.2})", self.length()),
        }
    }
}
