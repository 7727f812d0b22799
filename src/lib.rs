//! # kinemark
//!
//! Marker-based kinematic rig primitives for motion-capture and biomechanics
//! tooling: labeled 3D landmark points ([`Marker`]), oriented segments
//! connecting them ([`Link`]), a root pose ([`RigidBody`]), and an ordered
//! chain of links anchored to that pose ([`Skeleton`]).
//!
//! Markers are cheap cloneable handles with shared interior state, so a joint
//! marker referenced by two adjacent links is *one* point: moving it moves
//! both segments. All identity comparisons (link endpoints, chain
//! connectivity, marker deduplication) are by handle identity, never by
//! coordinate equality.
//!
//! The crate is purely in-memory and single-threaded. Rendering, solving and
//! capture-file I/O are left to downstream consumers; the geometry queries
//! here (lengths, midpoints, angles, pose axes) are what such consumers read.

pub mod error;
pub mod link;
pub mod marker;
pub mod rigid_body;
pub mod skeleton;

pub use error::*;
pub use link::*;
pub use marker::*;
pub use rigid_body::*;
pub use skeleton::*;
