// tests/chain_topology.rs
use glam::DVec3;
use kinemark::{KinemarkError, Link, Marker, Orientation, RigidBody, Skeleton};
use std::f64::consts::FRAC_PI_2;

const EPS: f64 = 1e-9;

fn marker(x: f64, y: f64, z: f64, label: &str) -> Marker {
    Marker::labeled(x, y, z, label).unwrap()
}

fn link(m1: &Marker, m2: &Marker) -> Link {
    Link::new(m1.clone(), m2.clone()).unwrap()
}

#[test]
fn right_angle_chain() {
    let a = marker(0.0, 0.0, 0.0, "A");
    let b = marker(1.0, 0.0, 0.0, "B");
    let c = marker(1.0, 1.0, 0.0, "C");

    let mut skeleton = Skeleton::new();
    skeleton.add_link(link(&a, &b)).unwrap();
    skeleton.add_link(link(&b, &c)).unwrap();

    assert!(skeleton.is_continuous());
    assert!((skeleton.total_length() - 2.0).abs() < EPS);

    let angles = skeleton.link_angles();
    assert_eq!(angles.len(), 1);
    assert!((angles[0] - FRAC_PI_2).abs() < EPS);
}

#[test]
fn tail_match_on_second_marker_swaps_endpoints() {
    let a = marker(0.0, 0.0, 0.0, "A");
    let b = marker(1.0, 0.0, 0.0, "B");
    let c = marker(1.0, 1.0, 0.0, "C");

    let mut skeleton = Skeleton::new();
    skeleton.add_link(link(&a, &b)).unwrap();
    // Constructed C -> B; the tail's second marker matches the *second*
    // endpoint, so the link is flipped to B -> C before appending.
    skeleton.add_link(link(&c, &b)).unwrap();

    assert!(skeleton.is_continuous());
    assert!(skeleton.links()[1].marker1().ptr_eq(&b));
    assert!(skeleton.links()[1].marker2().ptr_eq(&c));
}

#[test]
fn fallback_scan_attaches_branches() {
    let a = marker(0.0, 0.0, 0.0, "A");
    let b = marker(1.0, 0.0, 0.0, "B");
    let c = marker(1.0, 1.0, 0.0, "C");
    let d = marker(1.0, 0.0, 1.0, "D");

    let mut skeleton = Skeleton::new();
    skeleton.add_link(link(&a, &b)).unwrap();
    skeleton.add_link(link(&b, &c)).unwrap();
    // B -> D does not touch the tail (B-C ends at C), but the full-list scan
    // finds A-B's second endpoint matching its first marker.
    skeleton.add_link(link(&b, &d)).unwrap();

    assert_eq!(skeleton.links().len(), 3);
    assert!(skeleton.links()[2].marker1().ptr_eq(&b));
    // The sequence is insertion order, not topological order, so the branch
    // breaks the adjacent-pair chain property.
    assert!(!skeleton.is_continuous());
}

#[test]
fn out_of_order_insertion_follows_first_match_rule() {
    let a = marker(0.0, 0.0, 0.0, "A");
    let b = marker(1.0, 0.0, 0.0, "B");
    let c = marker(2.0, 0.0, 0.0, "C");
    let d = marker(3.0, 0.0, 0.0, "D");

    let mut skeleton = Skeleton::new();
    skeleton.add_link(link(&a, &b)).unwrap();

    // C-D shares no endpoint with A-B yet: the insertion is rejected and the
    // skeleton is left exactly as it was.
    let err = skeleton.add_link(link(&c, &d)).unwrap_err();
    assert_eq!(err, KinemarkError::DisconnectedLink);
    assert_eq!(skeleton.links().len(), 1);

    // B-C attaches at the tail; only now can C-D follow.
    skeleton.add_link(link(&b, &c)).unwrap();
    skeleton.add_link(link(&c, &d)).unwrap();

    assert_eq!(skeleton.links().len(), 3);
    assert!(skeleton.is_continuous());
    assert!(skeleton.links()[2].marker1().ptr_eq(&c));
    assert!(skeleton.links()[2].marker2().ptr_eq(&d));
}

#[test]
fn all_markers_deduplicates_by_identity() {
    let a = marker(0.0, 0.0, 0.0, "A");
    let b = marker(1.0, 0.0, 0.0, "B");
    let c = marker(1.0, 1.0, 0.0, "C");

    let mut skeleton = Skeleton::new();
    skeleton.add_link(link(&a, &b)).unwrap();
    skeleton.add_link(link(&b, &c)).unwrap();

    // B is referenced by both links but reported once.
    let markers = skeleton.all_markers();
    assert_eq!(markers.len(), 3);
    for m in [&a, &b, &c] {
        assert_eq!(markers.iter().filter(|x| x.ptr_eq(m)).count(), 1);
    }
}

#[test]
fn shared_joint_marker_moves_both_segments() {
    let a = marker(0.0, 0.0, 0.0, "A");
    let b = marker(1.0, 0.0, 0.0, "B");
    let c = marker(2.0, 0.0, 0.0, "C");

    let mut skeleton = Skeleton::new();
    skeleton.add_link(link(&a, &b)).unwrap();
    skeleton.add_link(link(&b, &c)).unwrap();

    // The joint marker is one shared point; moving it reshapes both links.
    b.set_position(1.0, 1.0, 0.0).unwrap();
    let expected = 2.0f64.sqrt();
    assert!((skeleton.links()[0].length() - expected).abs() < EPS);
    assert!((skeleton.links()[1].length() - expected).abs() < EPS);
}

#[test]
fn rigid_body_transform_hits_shared_markers_once_per_occurrence() {
    let a = marker(0.0, 0.0, 0.0, "A");
    let b = marker(1.0, 0.0, 0.0, "B");
    let c = marker(2.0, 0.0, 0.0, "C");

    let body = RigidBody::new(0.0, 0.0, 1.0).unwrap();
    let mut skeleton = Skeleton::new().with_rigid_body(body);
    skeleton.add_link(link(&a, &b)).unwrap();
    skeleton.add_link(link(&b, &c)).unwrap();

    skeleton.apply_rigid_body_transform().unwrap();

    // A and C are referenced by one link each and rise by one unit. B is
    // referenced by both links and is transformed once per occurrence.
    assert!((a.position().z - 1.0).abs() < EPS);
    assert!((b.position().z - 2.0).abs() < EPS);
    assert!((c.position().z - 1.0).abs() < EPS);

    // The operation is not idempotent: a second pass compounds the pose.
    skeleton.apply_rigid_body_transform().unwrap();
    assert!((a.position().z - 2.0).abs() < EPS);
    assert!((b.position().z - 4.0).abs() < EPS);
}

#[test]
fn empty_and_single_link_skeletons_are_continuous() {
    let mut skeleton = Skeleton::new().with_label("Stub");
    assert!(skeleton.is_continuous());
    assert!(skeleton.link_angles().is_empty());
    assert_eq!(skeleton.total_length(), 0.0);

    let a = marker(0.0, 0.0, 0.0, "A");
    let b = marker(0.0, 0.0, 1.0, "B");
    skeleton.add_link(link(&a, &b)).unwrap();
    assert!(skeleton.is_continuous());
    assert!(skeleton.link_angles().is_empty());
    assert_eq!(skeleton.label(), Some("Stub"));
}

#[test]
fn human_rig_assembles_out_of_traversal_order() {
    // A simplified full-body rig: head to feet, both arms and legs branching
    // off the neck and torso. Insertion follows anatomical listing order, so
    // most limb links attach via the fallback scan rather than at the tail.
    let head = marker(0.0, 0.0, 1.8, "Head");
    let neck = marker(0.0, 0.0, 1.6, "Neck");
    let l_shoulder = marker(-0.5, 0.0, 1.5, "Left Shoulder");
    let r_shoulder = marker(0.5, 0.0, 1.5, "Right Shoulder");
    let l_elbow = marker(-0.8, 0.0, 1.2, "Left Elbow");
    let r_elbow = marker(0.8, 0.0, 1.2, "Right Elbow");
    let l_hand = marker(-1.0, 0.0, 1.0, "Left Hand");
    let r_hand = marker(1.0, 0.0, 1.0, "Right Hand");
    let torso = marker(0.0, 0.0, 1.0, "Torso");
    let l_hip = marker(-0.5, 0.0, 0.8, "Left Hip");
    let r_hip = marker(0.5, 0.0, 0.8, "Right Hip");
    let l_knee = marker(-0.5, 0.0, 0.5, "Left Knee");
    let r_knee = marker(0.5, 0.0, 0.5, "Right Knee");
    let l_foot = marker(-0.5, 0.0, 0.0, "Left Foot");
    let r_foot = marker(0.5, 0.0, 0.0, "Right Foot");

    let root = RigidBody::with_orientation(
        0.0,
        0.0,
        1.0,
        Orientation::EulerXyz(DVec3::ZERO),
    )
    .unwrap()
    .with_label("Pelvis");

    let mut skeleton = Skeleton::new()
        .with_label("Human Skeleton")
        .with_rigid_body(root);

    let chain = [
        (&head, &neck),
        (&neck, &l_shoulder),
        (&neck, &r_shoulder),
        (&l_shoulder, &l_elbow),
        (&r_shoulder, &r_elbow),
        (&l_elbow, &l_hand),
        (&r_elbow, &r_hand),
        (&neck, &torso),
        (&torso, &l_hip),
        (&torso, &r_hip),
        (&l_hip, &l_knee),
        (&r_hip, &r_knee),
        (&l_knee, &l_foot),
        (&r_knee, &r_foot),
    ];
    for (m1, m2) in chain {
        skeleton.add_link(link(m1, m2)).unwrap();
    }

    assert_eq!(skeleton.links().len(), 14);
    assert_eq!(skeleton.all_markers().len(), 15);
    // Branches at the neck and torso break strict adjacency.
    assert!(!skeleton.is_continuous());
    assert_eq!(skeleton.link_angles().len(), 13);

    // Neck -> Right Shoulder attached via the scan, keeping its endpoints.
    assert!(skeleton.links()[2].marker1().ptr_eq(&neck));
    assert!(skeleton.links()[2].marker2().ptr_eq(&r_shoulder));

    // The root pose lifts the whole rig; the head is referenced by one link.
    skeleton.apply_rigid_body_transform().unwrap();
    assert!((head.position().z - 2.8).abs() < EPS);
    // The neck is shared by four links and rises once per occurrence.
    assert!((neck.position().z - (1.6 + 4.0)).abs() < EPS);
}
