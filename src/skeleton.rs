//! Chain assembly and aggregate queries over a sequence of links.

use crate::error::KinemarkError;
use crate::link::Link;
use crate::marker::Marker;
use crate::rigid_body::RigidBody;
use std::fmt;

/// An ordered chain of links anchored to one root rigid body.
///
/// Links are appended via [`Skeleton::add_link`], which attaches each new
/// link to the existing chain by matching shared marker endpoints (identity,
/// not coordinates). The sequence is append-only and ordered by insertion,
/// which is not necessarily topological order; [`Skeleton::is_continuous`]
/// checks the chain property after the fact.
#[derive(Default)]
pub struct Skeleton {
    links: Vec<Link>,
    rigid_body: RigidBody,
    label: Option<String>,
}

impl Skeleton {
    /// Creates an empty skeleton rooted at the origin with identity rotation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the root rigid body (builder style).
    pub fn with_rigid_body(mut self, rigid_body: RigidBody) -> Self {
        self.rigid_body = rigid_body;
        self
    }

    /// Attaches a label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Appends a link, connecting it to the existing chain by endpoint
    /// identity.
    ///
    /// The first link is appended unconditionally and defines the chain
    /// orientation. Otherwise the tail link is inspected first: if its second
    /// marker is `link`'s first marker the link is appended as-is; if it is
    /// `link`'s *second* marker the link's endpoints are swapped to keep the
    /// "second marker of i = first marker of i+1" orientation, then appended.
    /// Failing both, the whole list is scanned in order and the first
    /// existing link whose second marker matches either endpoint wins, with
    /// the same swap rule.
    ///
    /// Two insertion orders of the same links can therefore produce different
    /// sequences; the first-match-by-list-order rule keeps each order
    /// deterministic. A link sharing no endpoint with any existing link fails
    /// with [`KinemarkError::DisconnectedLink`] and leaves the skeleton
    /// unchanged.
    pub fn add_link(&mut self, mut link: Link) -> Result<(), KinemarkError> {
        if self.links.is_empty() {
            self.links.push(link);
            return Ok(());
        }

        let tail = &self.links[self.links.len() - 1];
        if tail.marker2().ptr_eq(link.marker1()) {
            self.links.push(link);
            return Ok(());
        }
        if tail.marker2().ptr_eq(link.marker2()) {
            link.swap_markers();
            self.links.push(link);
            return Ok(());
        }

        // Fallback scan: first existing link (in list order) whose second
        // endpoint matches either of the new link's endpoints. marker1 is
        // checked before marker2 for each candidate.
        let mut needs_swap = None;
        for existing in &self.links {
            if existing.marker2().ptr_eq(link.marker1()) {
                needs_swap = Some(false);
                break;
            }
            if existing.marker2().ptr_eq(link.marker2()) {
                needs_swap = Some(true);
                break;
            }
        }
        match needs_swap {
            Some(true) => {
                link.swap_markers();
                self.links.push(link);
                Ok(())
            }
            Some(false) => {
                self.links.push(link);
                Ok(())
            }
            None => Err(KinemarkError::DisconnectedLink),
        }
    }

    /// True if every adjacent pair satisfies `link[i].marker2 is
    /// link[i+1].marker1` (identity). Trivially true for 0 or 1 links.
    pub fn is_continuous(&self) -> bool {
        self.links
            .windows(2)
            .all(|pair| pair[0].marker2().ptr_eq(pair[1].marker1()))
    }

    /// Applies the root body's transform to every marker referenced by every
    /// link, in sequence.
    ///
    /// The matrix is computed once; each link's `marker1` then `marker2` is
    /// transformed. A marker shared by several links is transformed once
    /// *per referencing occurrence*, so this is not idempotent over aliased
    /// markers and calling it twice compounds the transform. A mid-sequence
    /// failure leaves the already-visited markers transformed.
    pub fn apply_rigid_body_transform(&self) -> Result<(), KinemarkError> {
        let matrix = self.rigid_body.transformation_matrix();
        for link in &self.links {
            link.marker1().apply_transform(&matrix)?;
            link.marker2().apply_transform(&matrix)?;
        }
        Ok(())
    }

    /// Sum of all link lengths.
    pub fn total_length(&self) -> f64 {
        self.links.iter().map(Link::length).sum()
    }

    /// Every marker referenced by any link, deduplicated by identity.
    ///
    /// The order is unspecified; a marker shared by several links appears
    /// exactly once.
    pub fn all_markers(&self) -> Vec<Marker> {
        let mut markers: Vec<Marker> = Vec::new();
        for link in &self.links {
            for endpoint in [link.marker1(), link.marker2()] {
                if !markers.iter().any(|m| m.ptr_eq(endpoint)) {
                    markers.push(endpoint.clone());
                }
            }
        }
        markers
    }

    /// Angles between each adjacent pair of links, in list order.
    ///
    /// Empty for 0 or 1 links; otherwise `links().len() - 1` entries.
    pub fn link_angles(&self) -> Vec<f64> {
        self.links
            .windows(2)
            .map(|pair| pair[0].angle_with(&pair[1]))
            .collect()
    }

    /// The links in sequence (insertion order).
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// The root rigid body.
    pub fn rigid_body(&self) -> &RigidBody {
        &self.rigid_body
    }

    /// Mutable access to the root rigid body, for pose updates.
    pub fn rigid_body_mut(&mut self) -> &mut RigidBody {
        &mut self.rigid_body
    }

    /// Returns the skeleton's label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl fmt::Debug for Skeleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(
                f,
                "Skeleton({label:?}, total length: {:.2}, links: {})",
                self.total_length(),
                self.links.len()
            ),
            None => write!(
                f,
                "Skeleton(total length: {:.2}, links: {})",
                self.total_length(),
                self.links.len()
            ),
        }
    }
}
