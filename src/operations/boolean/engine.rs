use clipper2::{difference, intersect, union, xor, FillRule, Paths, PointScaler};
use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{Polygon, PolygonSet};
use crate::math::{Point, TOLERANCE};

use super::select::BooleanOp;

/// Fixed-point scale handed to the clipper: coordinates are resolved to 1e-6
/// of the current length unit, matching the default emission grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Micro;

impl PointScaler for Micro {
    const MULTIPLIER: f64 = 1e6;
}

/// Boolean combination of two polygon sets under the non-zero fill rule.
///
/// Degenerate members (fewer than three vertices or zero area) are dropped
/// before clipping. Empty operands are not an error.
#[derive(Debug, Clone)]
pub struct Boolean {
    op: BooleanOp,
    subject: PolygonSet,
    clip: PolygonSet,
}

impl Boolean {
    /// Creates a new `Boolean` operation.
    #[must_use]
    pub fn new(op: BooleanOp, subject: PolygonSet, clip: PolygonSet) -> Self {
        Self { op, subject, clip }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Failed`] if the clipper rejects its input.
    pub fn execute(&self) -> Result<PolygonSet> {
        let subject = to_paths(&self.subject);
        let clip = to_paths(&self.clip);

        if clip.is_empty() || subject.is_empty() {
            let kept = match (subject.is_empty(), clip.is_empty()) {
                (false, true) if self.op.keeps_subject_without_clip() => subject,
                (true, false) if self.op.keeps_clip_without_subject() => clip,
                _ => Vec::new(),
            };
            debug!(op = %self.op, polygons = kept.len(), "boolean with empty operand");
            // Still routed through the clipper so the non-zero rule is applied.
            return if kept.is_empty() {
                Ok(PolygonSet::default())
            } else {
                run(BooleanOp::Union, kept, Vec::new())
            };
        }

        debug!(
            op = %self.op,
            subject = subject.len(),
            clip = clip.len(),
            "boolean"
        );
        run(self.op, subject, clip)
    }
}

fn run(op: BooleanOp, subject: Vec<Vec<(f64, f64)>>, clip: Vec<Vec<(f64, f64)>>) -> Result<PolygonSet> {
    let subject = Paths::<Micro>::from(subject);
    let clip = Paths::<Micro>::from(clip);
    let result = match op {
        BooleanOp::Intersection => intersect(subject, clip, FillRule::NonZero),
        BooleanOp::Union => union(subject, clip, FillRule::NonZero),
        BooleanOp::Difference => difference(subject, clip, FillRule::NonZero),
        BooleanOp::Xor => xor(subject, clip, FillRule::NonZero),
    }
    .map_err(|e| OperationError::Failed(format!("{op}: {e:?}")))?;

    let paths: Vec<Vec<(f64, f64)>> = result.into();
    let set: PolygonSet = paths
        .into_iter()
        .filter(|path| path.len() >= 3)
        .map(|path| Polygon::new(path.into_iter().map(Point::from).collect()))
        .collect();
    debug!(%op, polygons = set.len(), "boolean result");
    Ok(set)
}

fn to_paths(set: &PolygonSet) -> Vec<Vec<(f64, f64)>> {
    set.iter()
        .filter(|poly| poly.len() >= 3 && poly.area() > TOLERANCE)
        .map(|poly| poly.points().iter().map(|&p| (p.x, p.y)).collect())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn square_at(x: f64, y: f64) -> Polygon {
        Polygon::rectangle(p(x, y), p(x + 1.0, y + 1.0))
    }

    fn area(set: &PolygonSet) -> f64 {
        set.area().abs()
    }

    fn assert_same_vertices(a: &PolygonSet, b: &PolygonSet) {
        let a = a.iter().map(|poly| poly.simplify(1e-9)).collect::<PolygonSet>().canonical();
        let b = b.iter().map(|poly| poly.simplify(1e-9)).collect::<PolygonSet>().canonical();
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert_eq!(pa.len(), pb.len());
            for (&va, &vb) in pa.points().iter().zip(pb.points()) {
                assert_abs_diff_eq!(va.x, vb.x, epsilon = 1e-9);
                assert_abs_diff_eq!(va.y, vb.y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn idempotence() {
        let a = Polygon::new(vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 3.0), p(1.0, 5.0)]);
        assert_abs_diff_eq!(area(&a.union(&a).unwrap()), a.area(), epsilon = 1e-9);
        assert_abs_diff_eq!(area(&a.intersection(&a).unwrap()), a.area(), epsilon = 1e-9);
        assert!(a.difference(&a).unwrap().is_empty());
        assert!(a.xor(&a).unwrap().is_empty());
    }

    #[test]
    fn union_decomposes() {
        let a = square_at(0.0, 0.0);
        let b = Polygon::rectangle(p(0.25, 0.5), p(2.0, 0.75));
        let whole = a.union(&b).unwrap();
        let parts = a
            .difference(&b)
            .unwrap()
            .union(&b.difference(&a).unwrap())
            .unwrap()
            .union(&a.intersection(&b).unwrap())
            .unwrap();
        assert_abs_diff_eq!(area(&whole), area(&parts), epsilon = 1e-9);
        assert!(whole.xor(&parts).unwrap().area().abs() < 1e-9);
    }

    #[test]
    fn inversion_round_trip() {
        let a = square_at(0.0, 0.0);
        let b = square_at(0.5, 0.0);
        let lhs = a
            .union(&b)
            .unwrap()
            .difference(&a.intersection(&b).unwrap())
            .unwrap();
        let rhs = a.xor(&b).unwrap();
        assert_eq!(lhs.len(), 2);
        assert_same_vertices(&lhs, &rhs);
        assert_abs_diff_eq!(area(&rhs), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_operands() {
        let a = square_at(0.0, 0.0).to_set();
        let empty = PolygonSet::default();
        let run = |op| Boolean::new(op, a.clone(), empty.clone()).execute().unwrap();
        assert_abs_diff_eq!(area(&run(BooleanOp::Union)), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(area(&run(BooleanOp::Difference)), 1.0, epsilon = 1e-9);
        assert!(run(BooleanOp::Intersection).is_empty());
        let rev = Boolean::new(BooleanOp::Difference, empty, a).execute().unwrap();
        assert!(rev.is_empty());
    }

    #[test]
    fn degenerate_members_are_ignored() {
        let sliver = Polygon::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]);
        let a = square_at(3.0, 0.0);
        let out = a.union(&sliver).unwrap();
        assert_eq!(out.len(), 1);
        assert_abs_diff_eq!(area(&out), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn disjoint_union_keeps_both() {
        let out = square_at(0.0, 0.0).union(&square_at(5.0, 5.0)).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.contains_point(p(5.5, 5.5)));
        assert!(!out.contains_point(p(3.0, 3.0)));
    }

    fn rectangle() -> impl Strategy<Value = Polygon> {
        (-500..500i32, -500..500i32, 1..400i32, 1..400i32).prop_map(|(x, y, w, h)| {
            let a = p(f64::from(x) / 100.0, f64::from(y) / 100.0);
            Polygon::rectangle(a, a + p(f64::from(w) / 100.0, f64::from(h) / 100.0))
        })
    }

    fn convex() -> impl Strategy<Value = Polygon> {
        (-5.0..5.0f64, -5.0..5.0f64, 0.5..4.0f64, 3..24usize)
            .prop_map(|(x, y, r, n)| Polygon::circle(p(x, y), r, n).unwrap())
    }

    proptest! {
        #[test]
        fn random_rectangles_are_idempotent(a in rectangle()) {
            assert_abs_diff_eq!(area(&a.union(&a).unwrap()), a.area(), epsilon = 1e-9);
            assert_abs_diff_eq!(area(&a.intersection(&a).unwrap()), a.area(), epsilon = 1e-9);
            prop_assert!(a.difference(&a).unwrap().is_empty());
            prop_assert!(a.xor(&a).unwrap().is_empty());
        }

        #[test]
        fn random_convex_polygons_are_idempotent(a in convex()) {
            assert_abs_diff_eq!(area(&a.union(&a).unwrap()), a.area(), epsilon = 1e-3);
            assert_abs_diff_eq!(area(&a.intersection(&a).unwrap()), a.area(), epsilon = 1e-3);
            prop_assert!(a.difference(&a).unwrap().is_empty());
            prop_assert!(a.xor(&a).unwrap().is_empty());
        }

        #[test]
        fn union_area_splits_into_parts(a in rectangle(), b in convex()) {
            let whole = area(&a.union(&b).unwrap());
            let parts = area(&a.difference(&b).unwrap())
                + area(&b.difference(&a).unwrap())
                + area(&a.intersection(&b).unwrap());
            assert_abs_diff_eq!(whole, parts, epsilon = 1e-3);
        }
    }
}
