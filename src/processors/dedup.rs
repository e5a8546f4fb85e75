//! Sequential duplicate point removal.
//!
//! Walks a path in order, keeping a point only when it lies farther than the
//! tolerance from the most recently kept point (the anchor). Runs of
//! suppressed points are reported against the kept point that ends them.

use thiserror::Error;

use crate::core::loaders::PathPoint;

/// Errors that can occur during duplicate removal.
#[derive(Debug, Error, PartialEq)]
pub enum DedupError {
    #[error("Tolerance must be non-negative, got {0}")]
    NegativeTolerance(f64),

    #[error("Tolerance must be a number, got {0}")]
    InvalidTolerance(f64),
}

/// Result type for duplicate removal.
pub type Result<T> = std::result::Result<T, DedupError>;

/// A kept point that was immediately preceded by suppressed duplicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuplicateEvent {
    /// The kept point that ended the streak.
    pub point: PathPoint,
    /// Number of points suppressed since the previous kept point.
    pub suppressed: usize,
}

/// Outcome of one duplicate removal pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterResult {
    /// Kept points, in input order.
    pub kept: Vec<PathPoint>,
    /// One entry per kept point preceded by at least one suppressed point.
    pub events: Vec<DuplicateEvent>,
    /// Longest streak of suppressed points seen anywhere in the input.
    pub max_streak: usize,
    /// Points suppressed after the last kept point (no event records them).
    pub trailing_suppressed: usize,
    /// Number of input points.
    pub input_len: usize,
}

impl FilterResult {
    /// Total number of suppressed points, including a trailing streak.
    pub fn removed(&self) -> usize {
        self.input_len - self.kept.len()
    }

    /// Sum of the streak lengths recorded in `events`.
    pub fn suppressed_in_events(&self) -> usize {
        self.events.iter().map(|e| e.suppressed).sum()
    }

    /// Returns true if no point was suppressed.
    pub fn is_clean(&self) -> bool {
        self.kept.len() == self.input_len
    }
}

/// Remove sequential duplicate points within `tolerance`.
///
/// The first point is always kept and becomes the anchor. Every later point
/// is kept only if its distance to the anchor is strictly greater than
/// `tolerance`, in which case it becomes the new anchor. A distance exactly
/// equal to `tolerance` counts as a duplicate.
///
/// # Errors
///
/// Returns an error if `tolerance` is negative or NaN.
///
/// # Example
///
/// ```
/// use path_checker::core::loaders::{PathPoint, Point3};
/// use path_checker::processors::dedup::remove_sequential_duplicates;
///
/// let points = vec![
///     PathPoint::new(0, Point3::new(0.0, 0.0, 0.0), 0.0),
///     PathPoint::new(1, Point3::new(0.0, 0.0, 0.5), 0.0),
///     PathPoint::new(2, Point3::new(10.0, 0.0, 0.0), 0.0),
/// ];
/// let result = remove_sequential_duplicates(&points, 1.0).unwrap();
/// assert_eq!(result.kept.len(), 2);
/// assert_eq!(result.events[0].suppressed, 1);
/// ```
pub fn remove_sequential_duplicates(points: &[PathPoint], tolerance: f64) -> Result<FilterResult> {
    if tolerance.is_nan() {
        return Err(DedupError::InvalidTolerance(tolerance));
    }
    if tolerance < 0.0 {
        return Err(DedupError::NegativeTolerance(tolerance));
    }

    let Some((first, rest)) = points.split_first() else {
        return Ok(FilterResult::default());
    };

    let mut kept = Vec::with_capacity(points.len());
    let mut events = Vec::new();
    let mut max_streak = 0;
    let mut streak = 0;

    kept.push(*first);
    let mut anchor = first;

    for point in rest {
        if point.distance(anchor) > tolerance {
            kept.push(*point);
            anchor = point;
            if streak > 0 {
                events.push(DuplicateEvent {
                    point: *point,
                    suppressed: streak,
                });
            }
            max_streak = max_streak.max(streak);
            streak = 0;
        } else {
            streak += 1;
        }
    }

    Ok(FilterResult {
        kept,
        events,
        max_streak: max_streak.max(streak),
        trailing_suppressed: streak,
        input_len: points.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loaders::Point3;

    fn pt(index: i64, x: f64, y: f64, z: f64) -> PathPoint {
        PathPoint::new(index, Point3::new(x, y, z), index as f64 * 0.1)
    }

    fn indices(points: &[PathPoint]) -> Vec<i64> {
        points.iter().map(|p| p.index).collect()
    }

    /// A path with stalls at the start, in the middle and at the end.
    fn stalled_path() -> Vec<PathPoint> {
        vec![
            pt(0, 0.0, 0.0, 0.0),
            pt(1, 0.0, 0.0, 0.0),
            pt(2, 0.0, 0.0, 0.0),
            pt(3, 5.0, 0.0, 0.0),
            pt(4, 10.0, 0.0, 0.0),
            pt(5, 10.2, 0.0, 0.0),
            pt(6, 10.4, 0.0, 0.0),
            pt(7, 10.6, 0.0, 0.0),
            pt(8, 10.8, 0.0, 0.0),
            pt(9, 11.1, 0.0, 0.0),
            pt(10, 11.2, 0.0, 0.0),
            pt(11, 20.0, 0.0, 0.0),
            pt(12, 20.0, 0.5, 0.0),
            pt(13, 20.0, 0.0, 0.5),
        ]
    }

    #[test]
    fn test_reference_example() {
        let points = vec![
            pt(0, 0.0, 0.0, 0.0),
            pt(1, 0.0, 0.0, 0.5),
            pt(2, 0.0, 0.0, 0.6),
            pt(3, 10.0, 0.0, 0.0),
        ];

        let result = remove_sequential_duplicates(&points, 1.0).unwrap();

        assert_eq!(indices(&result.kept), vec![0, 3]);
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].point.index, 3);
        assert_eq!(result.events[0].suppressed, 2);
        assert_eq!(result.max_streak, 2);
        assert_eq!(result.trailing_suppressed, 0);
        assert_eq!(result.suppressed_in_events() + result.kept.len(), points.len());
    }

    #[test]
    fn test_empty_input() {
        let result = remove_sequential_duplicates(&[], 1.0).unwrap();
        assert!(result.kept.is_empty());
        assert!(result.events.is_empty());
        assert_eq!(result.max_streak, 0);
        assert_eq!(result.removed(), 0);
    }

    #[test]
    fn test_single_point() {
        let points = vec![pt(0, 1.0, 2.0, 3.0)];
        let result = remove_sequential_duplicates(&points, 1.0).unwrap();
        assert_eq!(result.kept, points);
        assert!(result.events.is_empty());
        assert!(result.is_clean());
    }

    #[test]
    fn test_zero_tolerance_keeps_distinct_points() {
        let points: Vec<PathPoint> = (0..10).map(|i| pt(i, i as f64 * 1e-6, 0.0, 0.0)).collect();
        let result = remove_sequential_duplicates(&points, 0.0).unwrap();
        assert_eq!(result.kept, points);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_zero_tolerance_collapses_coincident_points() {
        let points = vec![pt(0, 1.0, 1.0, 1.0), pt(1, 1.0, 1.0, 1.0), pt(2, 2.0, 1.0, 1.0)];
        let result = remove_sequential_duplicates(&points, 0.0).unwrap();
        assert_eq!(indices(&result.kept), vec![0, 2]);
        assert_eq!(result.events[0].suppressed, 1);
    }

    #[test]
    fn test_distance_equal_to_tolerance_is_duplicate() {
        let points = vec![pt(0, 0.0, 0.0, 0.0), pt(1, 1.0, 0.0, 0.0), pt(2, 2.5, 0.0, 0.0)];
        let result = remove_sequential_duplicates(&points, 1.0).unwrap();
        assert_eq!(indices(&result.kept), vec![0, 2]);
        assert_eq!(result.events[0].point.index, 2);
        assert_eq!(result.events[0].suppressed, 1);
    }

    #[test]
    fn test_distance_measured_from_anchor_not_previous_point() {
        // Each step is 0.6 but the drift from the anchor passes 1.0 at index 2.
        let points = vec![
            pt(0, 0.0, 0.0, 0.0),
            pt(1, 0.6, 0.0, 0.0),
            pt(2, 1.2, 0.0, 0.0),
            pt(3, 1.8, 0.0, 0.0),
            pt(4, 2.4, 0.0, 0.0),
        ];
        let result = remove_sequential_duplicates(&points, 1.0).unwrap();
        assert_eq!(indices(&result.kept), vec![0, 2, 4]);
        assert_eq!(
            result.events.iter().map(|e| (e.point.index, e.suppressed)).collect::<Vec<_>>(),
            vec![(2, 1), (4, 1)]
        );
    }

    #[test]
    fn test_first_point_never_reported() {
        let points = vec![pt(0, 0.0, 0.0, 0.0), pt(1, 5.0, 0.0, 0.0), pt(2, 5.0, 0.0, 0.0)];
        let result = remove_sequential_duplicates(&points, 1.0).unwrap();
        assert_eq!(indices(&result.kept), vec![0, 1]);
        assert!(result.events.iter().all(|e| e.point.index != 0));
    }

    #[test]
    fn test_stalled_path_events_and_trailing_streak() {
        let points = stalled_path();
        let result = remove_sequential_duplicates(&points, 1.0).unwrap();

        assert_eq!(indices(&result.kept), vec![0, 3, 4, 9, 11]);
        assert_eq!(
            result.events.iter().map(|e| (e.point.index, e.suppressed)).collect::<Vec<_>>(),
            vec![(3, 2), (9, 4), (11, 1)]
        );
        assert_eq!(result.trailing_suppressed, 2);
        assert_eq!(result.max_streak, 4);
        assert_eq!(result.removed(), 9);
        assert_eq!(
            result.suppressed_in_events() + result.trailing_suppressed + result.kept.len(),
            points.len()
        );
    }

    #[test]
    fn test_trailing_streak_counts_toward_max() {
        let mut points = vec![pt(0, 0.0, 0.0, 0.0), pt(1, 0.1, 0.0, 0.0), pt(2, 5.0, 0.0, 0.0)];
        points.extend((3..8).map(|i| pt(i, 5.0, 0.0, 0.0)));
        let result = remove_sequential_duplicates(&points, 1.0).unwrap();
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.trailing_suppressed, 5);
        assert_eq!(result.max_streak, 5);
    }

    #[test]
    fn test_kept_points_properties() {
        let points = stalled_path();
        for &tolerance in &[0.0, 0.1, 0.5, 1.0, 3.0, 50.0] {
            let result = remove_sequential_duplicates(&points, tolerance).unwrap();

            assert_eq!(result.kept[0], points[0]);

            for pair in result.kept.windows(2) {
                assert!(pair[0].distance(&pair[1]) > tolerance);
            }

            // Subsequence in input order
            let mut cursor = points.iter();
            for kept in &result.kept {
                assert!(cursor.any(|p| p == kept));
            }

            // Events follow the order of kept points
            let mut kept_iter = result.kept.iter();
            for event in &result.events {
                assert!(event.suppressed > 0);
                assert!(kept_iter.any(|p| *p == event.point));
            }

            assert_eq!(
                result.suppressed_in_events() + result.trailing_suppressed + result.kept.len(),
                points.len()
            );
        }
    }

    #[test]
    fn test_idempotent() {
        let points = stalled_path();
        let first = remove_sequential_duplicates(&points, 1.0).unwrap();
        let second = remove_sequential_duplicates(&first.kept, 1.0).unwrap();
        assert_eq!(second.kept, first.kept);
        assert!(second.events.is_empty());
        assert!(second.is_clean());
    }

    #[test]
    fn test_t_is_carried_through() {
        let points = vec![
            PathPoint::new(0, Point3::new(0.0, 0.0, 0.0), 123.5),
            PathPoint::new(1, Point3::new(9.0, 0.0, 0.0), -7.25),
        ];
        let result = remove_sequential_duplicates(&points, 1.0).unwrap();
        assert_eq!(result.kept[0].t, 123.5);
        assert_eq!(result.kept[1].t, -7.25);
    }

    #[test]
    fn test_invalid_tolerance() {
        let points = vec![pt(0, 0.0, 0.0, 0.0)];
        assert_eq!(
            remove_sequential_duplicates(&points, -0.5),
            Err(DedupError::NegativeTolerance(-0.5))
        );
        assert!(matches!(
            remove_sequential_duplicates(&points, f64::NAN),
            Err(DedupError::InvalidTolerance(_))
        ));
        assert_eq!(
            remove_sequential_duplicates(&[], -1.0),
            Err(DedupError::NegativeTolerance(-1.0))
        );
    }
}
