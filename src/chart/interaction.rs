//! Interaction index — nearest sample for a pointer position.
//!
//! Compared series are resampled to equal length, so the index returned for
//! one series addresses "the same moment" in the other. Index alignment is the
//! correlation key here, not timestamp equality.

use super::MappedPoint;

/// Index of the point whose pixel X is closest to `query_x`.
///
/// Linear scan; on ties the lowest index wins. `None` for an empty slice or a
/// non-finite query.
pub fn nearest_index(points: &[MappedPoint], query_x: f64) -> Option<usize> {
    if !query_x.is_finite() {
        return None;
    }
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        let dist = (p.x - query_x).abs();
        match best {
            Some((_, d)) if dist >= d => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(xs: &[f64]) -> Vec<MappedPoint> {
        xs.iter()
            .enumerate()
            .map(|(i, x)| MappedPoint {
                x: *x,
                y: 0.0,
                value: i as f64,
                time: i as i64,
            })
            .collect()
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(nearest_index(&[], 10.0), None);
    }

    #[test]
    fn test_picks_closest() {
        let pts = at(&[0.0, 10.0, 20.0, 30.0]);
        assert_eq!(nearest_index(&pts, 12.0), Some(1));
        assert_eq!(nearest_index(&pts, 27.0), Some(3));
        assert_eq!(nearest_index(&pts, -50.0), Some(0));
        assert_eq!(nearest_index(&pts, 500.0), Some(3));
    }

    #[test]
    fn test_tie_resolves_to_lowest_index() {
        let pts = at(&[0.0, 10.0, 20.0]);
        assert_eq!(nearest_index(&pts, 5.0), Some(0));
        assert_eq!(nearest_index(&pts, 15.0), Some(1));
    }

    #[test]
    fn test_non_finite_query_is_none() {
        let pts = at(&[0.0, 10.0]);
        assert_eq!(nearest_index(&pts, f64::NAN), None);
    }

    #[test]
    fn test_repeated_queries_agree() {
        let pts = at(&[1.0, 4.0, 9.0, 16.0]);
        let first = nearest_index(&pts, 6.5);
        assert!((0..10).all(|_| nearest_index(&pts, 6.5) == first));
    }
}
