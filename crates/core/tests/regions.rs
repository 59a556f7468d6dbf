//! Property-style checks over the region catalog: containment must agree
//! with enumeration everywhere, the closed-form point counts must hold,
//! and combinators must behave like their boolean definitions.

use hexgrid::{
    BfsRegion, Direction, HexPoint, HexagonRegion, PointRegion, RayRegion,
    RectRegion, Region, RegionExt, RingRegion, SetRegion, StarRegion,
    WedgeRegion,
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// A deterministic stream of points scattered around the origin
fn sample_points(rng: &mut Pcg64, count: usize) -> Vec<HexPoint> {
    (0..count)
        .map(|_| {
            HexPoint::new(
                rng.gen_range(-6..=6),
                rng.gen_range(-6..=6),
                rng.gen_range(-6..=6),
            )
        })
        .collect()
}

#[test]
fn enumeration_matches_containment_for_every_shape() {
    let origin = HexPoint::new(1, -1, 0);
    let ring = RingRegion::new(2, origin).unwrap();
    let disk = HexagonRegion::new(3, origin).unwrap();
    let ray = RayRegion::new(4, Direction::Forward, origin).unwrap();
    let star = StarRegion::new(3, origin).unwrap();
    let wedge =
        WedgeRegion::new(Direction::Up, Direction::Down, 3, origin).unwrap();
    let rect = RectRegion::new(
        origin,
        Direction::Right,
        Direction::Forward,
        4,
        3,
    )
    .unwrap();
    let point = PointRegion::new(origin);

    let shapes: Vec<&dyn Region> =
        vec![&ring, &disk, &ray, &star, &wedge, &rect, &point];

    let mut rng = Pcg64::seed_from_u64(42);
    let probes = sample_points(&mut rng, 200);
    for region in shapes {
        let materialized: SetRegion = region.points().collect();
        // Every enumerated point is contained
        for p in region.points() {
            assert!(region.contains(p).unwrap(), "missing {}", p);
        }
        // Random probes agree with the materialized set
        for &p in &probes {
            assert_eq!(
                region.contains(p).unwrap(),
                materialized.contains(p).unwrap(),
                "mismatch at {}",
                p
            );
        }
        // And the advertised count matches reality
        assert_eq!(region.count().unwrap(), materialized.len());
    }
}

#[test]
fn disk_and_ring_counts() {
    for r in 1..=5i32 {
        let disk = HexagonRegion::new(r, HexPoint::ORIGIN).unwrap();
        let expected = (1 + 3 * r * (r + 1)) as usize;
        assert_eq!(disk.count().unwrap(), expected);
        assert_eq!(disk.points().count(), expected);

        let ring = RingRegion::new(r, HexPoint::ORIGIN).unwrap();
        assert_eq!(ring.count().unwrap(), (6 * r) as usize);
        assert_eq!(ring.points().count(), (6 * r) as usize);
        for p in ring.points() {
            assert_eq!(p.min_manhattan(), r);
        }
    }
}

#[test]
fn minimize_properties() {
    let mut rng = Pcg64::seed_from_u64(7);
    for p in sample_points(&mut rng, 200) {
        let m = p.minimized();
        // Idempotent, class-preserving, and class-minimal
        assert_eq!(m.minimized(), m);
        assert_eq!(m, p);
        let brute = (-20..=20)
            .map(|c| HexPoint::new(p.x + c, p.y + c, p.z - c).manhattan())
            .min()
            .unwrap();
        assert_eq!(m.manhattan(), brute);
    }
    // The documented worked example
    let m = HexPoint::new(2, -1, 3).minimized();
    assert_eq!((m.x, m.y, m.z), (3, 0, 2));
}

#[test]
fn combinators_match_boolean_logic() {
    let a = HexagonRegion::new(3, HexPoint::ORIGIN).unwrap();
    let b = HexagonRegion::new(3, HexPoint::new(2, 0, 0)).unwrap();
    let union = a.union(&b);
    let intersection = a.intersect(&b);
    let difference = a.subtract(&b);

    let mut rng = Pcg64::seed_from_u64(99);
    for p in sample_points(&mut rng, 100) {
        let in_a = a.contains(p).unwrap();
        let in_b = b.contains(p).unwrap();
        assert_eq!(union.contains(p).unwrap(), in_a || in_b);
        assert_eq!(intersection.contains(p).unwrap(), in_a && in_b);
        assert_eq!(difference.contains(p).unwrap(), in_a && !in_b);
    }

    // Enumerations agree with the pointwise definitions too
    for region in [&union as &dyn Region, &intersection, &difference] {
        let materialized = region.materialize();
        for p in region.points() {
            assert!(region.contains(p).unwrap());
            assert!(materialized.contains(p).unwrap());
        }
        assert_eq!(region.count().unwrap(), materialized.len());
    }
}

#[test]
fn offset_region_shifts_everything() {
    let disk = HexagonRegion::new(2, HexPoint::ORIGIN).unwrap();
    let offset = HexPoint::new(0, 3, 0);
    let shifted = disk.offset(offset);

    assert_eq!(shifted.count().unwrap(), disk.count().unwrap());
    for p in disk.points() {
        assert!(shifted.contains(p + offset).unwrap());
    }
    for p in shifted.points() {
        assert!(disk.contains(p - offset).unwrap());
    }
}

#[test]
fn wedge_boundaries_are_inclusive() {
    let wedge = WedgeRegion::new(
        Direction::Right,
        Direction::Up,
        4,
        HexPoint::ORIGIN,
    )
    .unwrap();
    for i in 1..=4 {
        assert!(wedge
            .contains(Direction::Right.to_point() * i)
            .unwrap());
        assert!(wedge.contains(Direction::Up.to_point() * i).unwrap());
        // One sector past the end is out
        assert!(!wedge.contains(Direction::Left.to_point() * i).unwrap());
    }
    assert!(wedge.contains(HexPoint::ORIGIN).unwrap());
}

#[test]
fn bfs_region_is_a_disk_when_unobstructed() {
    let space = HexagonRegion::new(4, HexPoint::ORIGIN).unwrap();
    // 19 points is exactly a radius-2 disk
    let flood = BfsRegion::new(HexPoint::ORIGIN, &space, 19)
        .unwrap()
        .materialize();
    let disk = HexagonRegion::new(2, HexPoint::ORIGIN).unwrap();
    assert_eq!(flood.len(), 19);
    for p in disk.points() {
        assert!(flood.contains(p).unwrap());
    }
}

#[test]
fn materialized_snapshot_is_independent() {
    let mut base: SetRegion = [HexPoint::ORIGIN].into_iter().collect();
    let probe = HexPoint::new(1, 0, 0);

    let snapshot = {
        let shifted = base.offset(HexPoint::new(1, 0, 0));
        shifted.materialize()
    };
    base.insert(HexPoint::new(5, 5, 5));
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.contains(probe).unwrap());
}
