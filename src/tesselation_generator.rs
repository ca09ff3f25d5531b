use crate::constants::{NEAREST_NEIGHBOR_CANDIDATES, PLANE_DEGENERACY_EPSILON};
use crate::point::Point;
use crate::tesselation::{SamplePoint, Tensor, Tesselation};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TesselationError {
    #[error("planes do not intersect at a unique point (parallel or coincident)")]
    DegenerateGeometry,
    #[error("polygon walk around seed point {seed} could not close over its neighbor candidates")]
    UnresolvedWalk { seed: usize },
}

/// Builds the dual graph over a relaxed point set.
///
/// Every seed point contributes the polygon of circumcenter-like
/// intersection vertices that surrounds it; polygons sharing a vertex
/// (the same sorted seed triple) share one derived sample point. Edges are
/// the polygon rim segments plus a spoke from each derived vertex to its
/// three generating seeds.
pub fn build_tesselation(points: &[Point]) -> Result<Tesselation, TesselationError> {
    let seed_count = points.len();
    if seed_count == 0 {
        return Ok(Tesselation {
            points: Vec::new(),
            tensors: Vec::new(),
            seed_count: 0,
        });
    }

    // The walks are independent per seed; only the merge below is ordered.
    let polygons: Vec<Vec<[usize; 3]>> = (0..seed_count)
        .into_par_iter()
        .map(|seed| {
            let closest = closest_point_indices(points, seed);
            find_intersection_triples(points, &closest, seed)
        })
        .collect::<Result<_, _>>()?;

    let mut sample_points: Vec<SamplePoint> = points
        .iter()
        .enumerate()
        .map(|(id, p)| SamplePoint::new(id, p.clone()))
        .collect();

    let mut triple_ids: HashMap<[usize; 3], usize> = HashMap::new();
    let mut triples_in_order: Vec<[usize; 3]> = Vec::new();
    let mut tensors: Vec<Tensor> = Vec::new();
    let mut seen: HashSet<Tensor> = HashSet::new();

    let mut connect = |sample_points: &mut Vec<SamplePoint>, a: usize, b: usize| {
        if a == b {
            return;
        }
        let tensor = Tensor::new(a, b);
        if seen.insert(tensor) {
            tensors.push(tensor);
            sample_points[a].add_neighbor(b);
            sample_points[b].add_neighbor(a);
        }
    };

    for polygon in &polygons {
        let mut rim_ids = Vec::with_capacity(polygon.len());
        for triple in polygon {
            let id = match triple_ids.get(triple) {
                Some(&id) => id,
                None => {
                    let position = intersection_vertex(points, triple)?;
                    let id = sample_points.len();
                    sample_points.push(SamplePoint::new(id, position));
                    triple_ids.insert(*triple, id);
                    triples_in_order.push(*triple);
                    id
                }
            };
            rim_ids.push(id);
        }

        for (k, &id) in rim_ids.iter().enumerate() {
            let next = rim_ids[(k + 1) % rim_ids.len()];
            connect(&mut sample_points, id, next);
        }
    }

    // Spokes from each derived vertex to its three generating seeds.
    for (index, triple) in triples_in_order.iter().enumerate() {
        let vertex_id = seed_count + index;
        for &seed in triple {
            connect(&mut sample_points, vertex_id, seed);
        }
    }

    Ok(Tesselation {
        points: sample_points,
        tensors,
        seed_count,
    })
}

/// The candidate neighborhood: indices of the nearest points to `i` by
/// squared distance, `i` itself first. Ties keep index order (stable sort).
pub fn closest_point_indices(points: &[Point], i: usize) -> Vec<usize> {
    let selected = &points[i];
    let mut indices: Vec<usize> = (0..points.len()).collect();
    indices.sort_by(|&a, &b| {
        Point::fast_distance(&points[a], selected)
            .partial_cmp(&Point::fast_distance(&points[b], selected))
            .expect("point distances are never NaN")
    });
    indices.truncate(NEAREST_NEIGHBOR_CANDIDATES);
    indices
}

/// Walks the fan of neighbors around `closest[0]` and returns the polygon
/// of sorted seed triples, in rim order.
///
/// Starting on the edge toward the nearest neighbor, each step picks the
/// candidate whose tangent-plane intersection lies on the forward side of
/// the current edge (dot test against the edge cross product) and closest
/// to the previous intersection, until the walk returns to the starting
/// neighbor.
fn find_intersection_triples(
    points: &[Point],
    closest: &[usize],
    seed: usize,
) -> Result<Vec<[usize; 3]>, TesselationError> {
    if closest.len() < 3 {
        return Err(TesselationError::UnresolvedWalk { seed });
    }

    let p1 = &points[closest[0]];
    let mut p2 = points[closest[1]].clone();
    let mut cross = Point::cross(p1, &p2);
    let mut v1 = plane_plane_plane_intersection(p1, 1.0, &p2, 1.0, &cross, 0.0)?;

    let mut triples = Vec::new();
    let mut last_connection: Option<usize> = None;
    let mut current_connection = 1usize;

    for _ in 0..closest.len() {
        let mut min_dist = f64::MAX;
        let mut found: Option<usize> = None;
        let mut next_point = Point::zero();
        let mut next_vertex = Point::zero();

        for j in 1..closest.len() {
            if j == current_connection || Some(j) == last_connection {
                continue;
            }
            let candidate = &points[closest[j]];
            let intersect =
                match plane_plane_plane_intersection(p1, 1.0, &p2, 1.0, candidate, 1.0) {
                    Ok(p) => p,
                    // A candidate coplanar with the current edge cannot
                    // define a circumcenter; it is simply not a candidate.
                    Err(TesselationError::DegenerateGeometry) => continue,
                    Err(e) => return Err(e),
                };

            if Point::dot(&(&intersect - &v1), &cross) < 0.0 {
                continue;
            }
            let dist = Point::fast_distance(&v1, &intersect);
            if dist < min_dist {
                min_dist = dist;
                found = Some(j);
                next_vertex = intersect;
                next_point = candidate.clone();
            }
        }

        let Some(min_index) = found else {
            return Err(TesselationError::UnresolvedWalk { seed });
        };

        v1 = next_vertex;
        p2 = next_point;
        cross = Point::cross(p1, &p2);
        triples.push(sort_triple([
            closest[0],
            closest[current_connection],
            closest[min_index],
        ]));
        last_connection = Some(current_connection);
        current_connection = min_index;

        if min_index == 1 {
            // Closed back onto the starting neighbor.
            return Ok(triples);
        }
    }

    Err(TesselationError::UnresolvedWalk { seed })
}

fn intersection_vertex(points: &[Point], triple: &[usize; 3]) -> Result<Point, TesselationError> {
    plane_plane_plane_intersection(
        &points[triple[0]],
        1.0,
        &points[triple[1]],
        1.0,
        &points[triple[2]],
        1.0,
    )
}

/// Intersection of three planes `n·x = d`, solved by Cramer's rule.
pub fn plane_plane_plane_intersection(
    normal1: &Point,
    d1: f64,
    normal2: &Point,
    d2: f64,
    normal3: &Point,
    d3: f64,
) -> Result<Point, TesselationError> {
    let a = [
        [normal1.x(), normal1.y(), normal1.z()],
        [normal2.x(), normal2.y(), normal2.z()],
        [normal3.x(), normal3.y(), normal3.z()],
    ];

    let det_a = determinant3x3(&a);
    if det_a.abs() < PLANE_DEGENERACY_EPSILON {
        return Err(TesselationError::DegenerateGeometry);
    }

    let a1 = [
        [d1, normal1.y(), normal1.z()],
        [d2, normal2.y(), normal2.z()],
        [d3, normal3.y(), normal3.z()],
    ];
    let a2 = [
        [normal1.x(), d1, normal1.z()],
        [normal2.x(), d2, normal2.z()],
        [normal3.x(), d3, normal3.z()],
    ];
    let a3 = [
        [normal1.x(), normal1.y(), d1],
        [normal2.x(), normal2.y(), d2],
        [normal3.x(), normal3.y(), d3],
    ];

    Ok(Point::new3(
        determinant3x3(&a1) / det_a,
        determinant3x3(&a2) / det_a,
        determinant3x3(&a3) / det_a,
    ))
}

fn determinant3x3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

fn sort_triple(mut triple: [usize; 3]) -> [usize; 3] {
    triple.sort_unstable();
    triple
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_adjuster::relax;
    use crate::point_generator::generate_points;

    #[test]
    fn test_axis_planes_intersect_at_unit_corner() {
        let x = Point::new3(1.0, 0.0, 0.0);
        let y = Point::new3(0.0, 1.0, 0.0);
        let z = Point::new3(0.0, 0.0, 1.0);

        let p = plane_plane_plane_intersection(&x, 1.0, &y, 1.0, &z, 1.0)
            .expect("axis planes intersect");
        assert_eq!(p, Point::new3(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_identical_planes_are_degenerate() {
        let n = Point::new3(0.0, 0.0, 1.0);
        let result = plane_plane_plane_intersection(&n, 1.0, &n, 1.0, &n, 1.0);
        assert_eq!(result, Err(TesselationError::DegenerateGeometry));
    }

    #[test]
    fn test_closest_point_indices_self_first() {
        let points = generate_points(30, 3);
        let closest = closest_point_indices(&points, 12);

        assert_eq!(closest.len(), NEAREST_NEIGHBOR_CANDIDATES);
        assert_eq!(closest[0], 12, "a point is always its own nearest");

        let distances: Vec<f64> = closest
            .iter()
            .map(|&j| Point::fast_distance(&points[j], &points[12]))
            .collect();
        assert!(
            distances.windows(2).all(|w| w[0] <= w[1]),
            "candidates must come out sorted by distance"
        );
    }

    #[test]
    fn test_build_tesselation_structure() {
        let points = relax(generate_points(24, 42), 40, 0.1);
        let tesselation = build_tesselation(&points).expect("tesselation failed");

        assert_eq!(tesselation.seed_count, 24);
        assert!(
            tesselation.point_count() > 24,
            "derived intersection vertices expected"
        );

        let mut seen = HashSet::new();
        for tensor in &tesselation.tensors {
            assert!(tensor.a < tesselation.point_count());
            assert!(tensor.b < tesselation.point_count());
            assert_ne!(tensor.a, tensor.b, "no self edges");
            assert!(seen.insert(*tensor), "duplicate undirected edge {:?}", tensor);
        }
    }

    #[test]
    fn test_derived_vertices_spoke_to_three_seeds() {
        let points = relax(generate_points(24, 42), 40, 0.1);
        let tesselation = build_tesselation(&points).expect("tesselation failed");

        for vertex in tesselation.derived_points() {
            let seed_neighbors = vertex
                .neighbors
                .iter()
                .filter(|&&n| n < tesselation.seed_count)
                .count();
            assert_eq!(
                seed_neighbors, 3,
                "vertex {} should connect to its three generating seeds",
                vertex.id
            );
        }
    }

    #[test]
    fn test_neighbor_lists_mirror_tensors() {
        let points = relax(generate_points(20, 11), 40, 0.1);
        let tesselation = build_tesselation(&points).expect("tesselation failed");

        for tensor in &tesselation.tensors {
            assert!(tesselation.points[tensor.a].neighbors.contains(&tensor.b));
            assert!(tesselation.points[tensor.b].neighbors.contains(&tensor.a));
        }
    }

    #[test]
    fn test_too_few_points_is_unresolved() {
        let points = generate_points(2, 1);
        match build_tesselation(&points) {
            Err(TesselationError::UnresolvedWalk { .. }) => {}
            other => panic!("expected UnresolvedWalk, got {:?}", other),
        }
    }
}
