//! End-to-end checks of the pathfinder: optimal lengths on open grids,
//! detours around obstacles, partial-path fallback, and reachability.

use hexgrid::{
    Direction, HexPoint, HexagonRegion, PathQuery, ReachableRegion, Region,
    RingRegion, SetRegion,
};

#[test]
fn open_grid_path_is_exactly_the_hex_distance() {
    let cases = [
        HexPoint::new(5, 0, 0),
        HexPoint::new(0, 3, 0),
        HexPoint::new(3, 0, 2),
        HexPoint::new(-2, -4, 0),
    ];
    for destination in cases {
        let expected = HexPoint::ORIGIN.distance_to(destination);
        let path = PathQuery::new(20)
            .find_point(HexPoint::ORIGIN, destination)
            .unwrap()
            .unwrap();
        assert_eq!(
            path.total_distance(),
            expected,
            "suboptimal path to {}",
            destination
        );
        assert_eq!(path.destination(), destination);
    }
}

#[test]
fn straight_line_collapses_to_one_stretch() {
    let path = PathQuery::new(10)
        .find_point(HexPoint::ORIGIN, HexPoint::new(5, 0, 0))
        .unwrap()
        .unwrap();
    assert_eq!(path.total_distance(), 5);
    assert_eq!(path.stretches().len(), 1);
    assert_eq!(path.stretches()[0].direction, Direction::Right);
}

#[test]
fn obstacle_forces_a_detour() {
    // A radius-1 disk of wall sits squarely on the straight line from the
    // origin to (6, 0, 0). The best way around costs exactly two extra
    // steps: one sidestep out, around, and back in.
    let wall = HexagonRegion::new(1, HexPoint::new(3, 0, 0)).unwrap();
    let destination = HexPoint::new(6, 0, 0);

    let path = PathQuery::new(20)
        .disallowed(&wall)
        .check_end()
        .find_point(HexPoint::ORIGIN, destination)
        .unwrap()
        .unwrap();

    assert_eq!(path.destination(), destination);
    assert!(path.total_distance() > 6, "must detour");
    assert_eq!(path.total_distance(), 8, "detour should be minimal");
    // The path never touches the wall
    for point in path.points() {
        assert!(!wall.contains(point).unwrap());
    }
}

#[test]
fn partial_fallback_prefers_progress_then_heuristic() {
    // The walkable world is a short two-armed corridor; the goal is off in
    // unreachable space. One arm heads toward the goal, the other away.
    // Both tips sit at distance 2, so the fallback has to tie-break on the
    // heuristic and pick the goal-ward tip.
    let corridor: SetRegion = [
        HexPoint::ORIGIN,
        HexPoint::new(1, 0, 0),
        HexPoint::new(2, 0, 0),
        HexPoint::new(-1, 0, 0),
        HexPoint::new(-2, 0, 0),
    ]
    .into_iter()
    .collect();
    let goal = HexPoint::new(6, 0, 0);

    // Without partial acceptance: no path at all
    let none = PathQuery::new(10)
        .allowed(&corridor)
        .check_end()
        .find_point(HexPoint::ORIGIN, goal)
        .unwrap();
    assert!(none.is_none());

    // With it: the path to the goal-ward corridor tip
    let partial = PathQuery::new(10)
        .allowed(&corridor)
        .check_end()
        .accept_partial()
        .find_point(HexPoint::ORIGIN, goal)
        .unwrap()
        .unwrap();
    assert_eq!(partial.destination(), HexPoint::new(2, 0, 0));
    assert_eq!(partial.total_distance(), 2);
}

#[test]
fn partial_fallback_takes_highest_distance_first() {
    // A single dead-end corridor: the fallback must run it to the very
    // end, not stop at some node that merely looks close
    let corridor: SetRegion = [
        HexPoint::ORIGIN,
        HexPoint::new(0, 1, 0),
        HexPoint::new(0, 2, 0),
        HexPoint::new(0, 3, 0),
    ]
    .into_iter()
    .collect();
    let partial = PathQuery::new(10)
        .allowed(&corridor)
        .check_end()
        .accept_partial()
        .find_point(HexPoint::ORIGIN, HexPoint::new(5, 0, 0))
        .unwrap()
        .unwrap();
    assert_eq!(partial.destination(), HexPoint::new(0, 3, 0));
    assert_eq!(partial.total_distance(), 3);
}

#[test]
fn reachability_equals_disk_on_open_grid() {
    let reachable = ReachableRegion::new(HexPoint::ORIGIN, 2, None, None)
        .unwrap()
        .materialize();
    let disk = HexagonRegion::new(2, HexPoint::ORIGIN).unwrap();

    assert_eq!(reachable.len(), disk.count().unwrap());
    for p in disk.points() {
        assert!(reachable.contains(p).unwrap(), "{} unreachable", p);
    }
    for p in reachable.iter() {
        assert!(disk.contains(p).unwrap(), "{} outside the disk", p);
    }
}

#[test]
fn reachability_flows_around_walls() {
    // A wall ring around the origin with a single gap on the side facing
    // away from the start: the center can only be reached the long way
    // around, so it takes a budget sized for the detour, not for the
    // straight-line distance
    let mut wall = RingRegion::new(2, HexPoint::ORIGIN)
        .unwrap()
        .materialize();
    wall.remove(HexPoint::new(-2, 0, 0));

    let start = HexPoint::new(4, 0, 0);

    // The origin is 4 steps away as the crow flies, but a budget of 6
    // can't get there: the gap is on the far side
    let near = ReachableRegion::new(start, 6, None, Some(&wall))
        .unwrap()
        .materialize();
    assert!(!near.contains(HexPoint::ORIGIN).unwrap());

    // A budget sized for the trip around the ring can
    let far = ReachableRegion::new(start, 16, None, Some(&wall))
        .unwrap()
        .materialize();
    assert!(far.contains(HexPoint::ORIGIN).unwrap());
    // And nothing in either result ever sits on the wall
    for p in far.iter() {
        assert!(!wall.contains(p).unwrap());
    }
}

#[test]
fn route_visits_waypoints_in_order() {
    let waypoints = [
        HexPoint::ORIGIN,
        HexPoint::new(3, 0, 0),
        HexPoint::new(3, 2, 0),
        HexPoint::ORIGIN,
    ];
    let route = PathQuery::new(10).route(&waypoints).unwrap().unwrap();
    assert_eq!(route.origin(), HexPoint::ORIGIN);
    assert_eq!(route.destination(), HexPoint::ORIGIN);

    // Each waypoint shows up along the walk, in order
    let points: Vec<_> = route.points().collect();
    let mut cursor = 0;
    for waypoint in waypoints {
        let found = points[cursor..]
            .iter()
            .position(|p| *p == waypoint)
            .expect("waypoint missing from route");
        cursor += found;
    }
}
