use itertools::Itertools;
use pcm_core::nalgebra::{Point2, Point3};
use pcm_core::{PointId, SamplePoint, Triangle};
use pcm_geom::DelaunayTriangulator;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_pcg::Pcg64;

const SAMPLE_POINTS: usize = 68;
const ROUNDS: usize = 25;
const SCREEN_WIDTH: f64 = 1170.0;
const SCREEN_HEIGHT: f64 = 2532.0;
const COCIRCULAR_TOLERANCE: f64 = 1e-10;

#[test]
fn no_point_inside_any_circumcircle() {
    let mut rng = Pcg64::seed_from_u64(0);
    let triangulator = DelaunayTriangulator::new();
    for _ in 0..ROUNDS {
        let points = random_points(&mut rng, SAMPLE_POINTS);
        let triangles = triangulator.triangulate(&points);
        assert!(!triangles.is_empty());
        for triangle in &triangles {
            let ids = triangle.ids();
            for point in points.iter().filter(|p| !ids.contains(&p.id())) {
                assert!(
                    !triangle
                        .circumcircle()
                        .contains(point.screen(), COCIRCULAR_TOLERANCE),
                    "point {} lies inside the circumcircle of {:?}",
                    point.id(),
                    ids
                );
            }
        }
    }
}

#[test]
fn insertion_order_does_not_matter() {
    let mut rng = Pcg64::seed_from_u64(1);
    let triangulator = DelaunayTriangulator::new();
    for _ in 0..ROUNDS {
        let mut points = random_points(&mut rng, SAMPLE_POINTS);
        let expected = canonical(&triangulator.triangulate(&points));
        points.shuffle(&mut rng);
        assert_eq!(canonical(&triangulator.triangulate(&points)), expected);
        points.reverse();
        assert_eq!(canonical(&triangulator.triangulate(&points)), expected);
    }
}

#[test]
fn triangles_share_one_winding() {
    let mut rng = Pcg64::seed_from_u64(2);
    let points = random_points(&mut rng, SAMPLE_POINTS);
    for triangle in DelaunayTriangulator::new().triangulate(&points) {
        assert!(triangle.doubled_signed_area() > 0.0);
    }
}

#[test]
fn unit_square_splits_along_a_diagonal() {
    let points = grid_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let triangles = DelaunayTriangulator::new().triangulate(&points);
    assert_eq!(triangles.len(), 2);

    let shared = shared_edges(&triangles[0], &triangles[1]);
    assert_eq!(shared.len(), 1);
    // The shared edge joins opposite corners of the square.
    let [a, b] = shared[0];
    assert_eq!((a.0 as i64 - b.0 as i64).abs(), 2);

    let used = triangles.iter().flat_map(|t| t.ids()).unique().count();
    assert_eq!(used, 4);
}

#[test]
fn unit_square_diagonal_does_not_depend_on_order() {
    let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
    let points = grid_points(&corners);
    let triangulator = DelaunayTriangulator::new();
    let expected = canonical(&triangulator.triangulate(&points));
    assert_eq!(expected.len(), 2);
    for shift in 1..4 {
        let mut rotated = points.clone();
        rotated.rotate_left(shift);
        assert_eq!(canonical(&triangulator.triangulate(&rotated)), expected);
        rotated.reverse();
        assert_eq!(canonical(&triangulator.triangulate(&rotated)), expected);
    }
}

#[test]
fn cocircular_lattice_does_not_depend_on_order() {
    let mut rng = Pcg64::seed_from_u64(4);
    let lattice: Vec<(f64, f64)> = (0..7)
        .cartesian_product(0..7)
        .map(|(row, column)| (10.0 * column as f64, 10.0 * row as f64))
        .collect();
    let mut points = grid_points(&lattice);
    let triangulator = DelaunayTriangulator::new();
    let expected = canonical(&triangulator.triangulate(&points));
    assert!(!expected.is_empty());
    for _ in 0..20 {
        points.shuffle(&mut rng);
        assert_eq!(canonical(&triangulator.triangulate(&points)), expected);
    }
}

#[test]
fn rhombus_splits_along_the_shorter_diagonal() {
    let points = grid_points(&[(-2.0, 0.0), (0.0, -1.0), (2.0, 0.0), (0.0, 1.0)]);
    let triangles = DelaunayTriangulator::new().triangulate(&points);
    assert_eq!(triangles.len(), 2);
    assert_eq!(
        shared_edges(&triangles[0], &triangles[1]),
        vec![[PointId(1), PointId(3)]]
    );
}

#[test]
fn too_few_points_produce_nothing() {
    let triangulator = DelaunayTriangulator::new();
    assert!(triangulator.triangulate(&[]).is_empty());
    assert!(triangulator
        .triangulate(&grid_points(&[(0.0, 0.0)]))
        .is_empty());
    assert!(triangulator
        .triangulate(&grid_points(&[(0.0, 0.0), (1.0, 1.0)]))
        .is_empty());
}

#[test]
fn collinear_points_produce_nothing() {
    let points = grid_points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
    assert!(DelaunayTriangulator::new().triangulate(&points).is_empty());
}

#[test]
fn coincident_points_produce_nothing() {
    let points = grid_points(&[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);
    assert!(DelaunayTriangulator::new().triangulate(&points).is_empty());
}

#[test]
fn duplicate_position_is_dropped() {
    let points = grid_points(&[(0.0, 0.0), (4.0, 0.0), (1.0, 3.0), (4.0, 0.0)]);
    let triangles = DelaunayTriangulator::new().triangulate(&points);
    assert_eq!(triangles.len(), 1);
    assert_eq!(canonical(&triangles), vec![[PointId(0), PointId(1), PointId(2)]]);
}

#[test]
fn input_is_left_untouched() {
    let mut rng = Pcg64::seed_from_u64(3);
    let points = random_points(&mut rng, 10);
    let copy = points.clone();
    DelaunayTriangulator::new().triangulate(&points);
    assert_eq!(points, copy);
}

fn random_points(rng: &mut impl Rng, count: usize) -> Vec<SamplePoint> {
    (0..count as u64)
        .map(|id| {
            let screen = Point2::new(
                rng.gen_range(0.0..SCREEN_WIDTH),
                rng.gen_range(0.0..SCREEN_HEIGHT),
            );
            let world = Point3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            SamplePoint::new(id, screen, world)
        })
        .collect()
}

fn grid_points(coordinates: &[(f64, f64)]) -> Vec<SamplePoint> {
    coordinates
        .iter()
        .enumerate()
        .map(|(id, &(x, y))| SamplePoint::new(id as u64, Point2::new(x, y), Point3::new(x, y, 0.0)))
        .collect()
}

/// Sorted triples of sorted ids, which identify a triangulation regardless of order.
fn canonical(triangles: &[Triangle]) -> Vec<[PointId; 3]> {
    triangles
        .iter()
        .map(|t| {
            let mut ids = t.ids();
            ids.sort();
            ids
        })
        .sorted()
        .collect()
}

fn shared_edges(a: &Triangle, b: &Triangle) -> Vec<[PointId; 2]> {
    let b_ids = b.ids();
    a.ids()
        .iter()
        .copied()
        .tuple_combinations()
        .filter(|(x, y)| b_ids.contains(x) && b_ids.contains(y))
        .map(|(x, y)| if x < y { [x, y] } else { [y, x] })
        .collect()
}
