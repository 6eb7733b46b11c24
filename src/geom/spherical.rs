use super::Coordinate;

/// Mean earth radius used for every measure in the crate.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Area of a ring on a spherical earth, in square meters.
///
/// Uses the spherical-excess running sum
/// `Σ (λ[i+1] − λ[i]) · (2 + sin φ[i] + sin φ[i+1])` scaled by `R² / 2`.
/// The ring is closed implicitly (last vertex connects back to the first) and
/// rings with fewer than 3 vertices have zero area.
///
/// Self-intersecting or antipodal-spanning rings still produce a number, but it
/// is not a meaningful area. No check is made.
pub fn spherical_area(ring: &[Coordinate]) -> f64 {
    if ring.len() < 3 { return 0.0 }

    let sum: f64 = ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| (b.lambda() - a.lambda()) * (2.0 + a.phi().sin() + b.phi().sin()))
        .sum();

    (sum * EARTH_RADIUS_METERS * EARTH_RADIUS_METERS / 2.0).abs()
}

/// Great-circle distance between two coordinates in meters (haversine formula).
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let d_phi = b.phi() - a.phi();
    let d_lambda = b.lambda() - a.lambda();

    let h = (d_phi / 2.0).sin().powi(2)
        + a.phi().cos() * b.phi().cos() * (d_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)]) -> Vec<Coordinate> {
        points.iter().copied().map(Coordinate::from).collect()
    }

    fn assert_close(a: f64, b: f64, rel: f64) {
        let scale = a.abs().max(b.abs()).max(1.0);
        assert!((a - b).abs() <= rel * scale, "{a} != {b} (rel {rel})");
    }

    #[test]
    fn small_square_near_equator() {
        let square = ring(&[(0.0, 0.0), (0.0, 0.001), (0.001, 0.001), (0.001, 0.0)]);
        let area = spherical_area(&square);
        assert!((area - 1.23e4).abs() < 1.23e4 * 0.05, "area = {area}");
    }

    #[test]
    fn fewer_than_three_points_has_no_area() {
        assert_eq!(spherical_area(&[]), 0.0);
        assert_eq!(spherical_area(&ring(&[(1.0, 1.0)])), 0.0);
        assert_eq!(spherical_area(&ring(&[(1.0, 1.0), (2.0, 2.0)])), 0.0);
    }

    #[test]
    fn area_is_invariant_under_rotation_and_reversal() {
        let base = ring(&[(51.50, -0.12), (51.51, -0.10), (51.49, -0.08), (51.48, -0.11), (51.49, -0.13)]);
        let expected = spherical_area(&base);
        assert!(expected > 0.0);

        for k in 0..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(k);
            assert_close(spherical_area(&rotated), expected, 1e-9);

            rotated.reverse();
            assert_close(spherical_area(&rotated), expected, 1e-9);
        }
    }

    #[test]
    fn area_is_non_negative_for_self_intersecting_ring() {
        let bowtie = ring(&[(0.0, 0.0), (1.0, 1.0), (0.0, 1.0), (1.0, 0.0)]);
        assert!(spherical_area(&bowtie) >= 0.0);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((d - 111_195.0).abs() < 50.0, "distance = {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            ((12.5, 77.1), (12.7, 77.9)),
            ((-33.9, 151.2), (51.5, -0.1)),
            ((89.9, 10.0), (-89.9, -170.0)),
        ];
        for (a, b) in pairs {
            let (a, b) = (Coordinate::from(a), Coordinate::from(b));
            assert_eq!(haversine_distance(a, b), haversine_distance(b, a));
        }
    }

    #[test]
    fn distance_is_zero_only_for_coincident_points() {
        let a = Coordinate::new(40.7128, -74.0060);
        assert_eq!(haversine_distance(a, a), 0.0);
        assert!(haversine_distance(a, Coordinate::new(40.7128, -74.0061)) > 0.0);
    }
}
