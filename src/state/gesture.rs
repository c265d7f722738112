// Pinch-zoom tracking over the set of pressed pointers
use std::collections::BTreeMap;

use crate::model::{Point, ScaleLimits, ViewportState};

/// Pressed pointers keyed by pointer id. Ordered so the zoom pair is always
/// the two lowest ids, whatever order they went down in.
#[derive(Default, Debug, Clone)]
pub struct PointerSet {
    points: BTreeMap<i32, Point>,
}

impl PointerSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn insert(&mut self, id: i32, at: Point) {
        self.points.insert(id, at);
    }

    /// Returns false when `id` is not pressed.
    pub fn update(&mut self, id: i32, at: Point) -> bool {
        match self.points.get_mut(&id) {
            Some(p) => {
                *p = at;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: i32) {
        self.points.remove(&id);
    }

    pub fn pair(&self) -> Option<(Point, Point)> {
        let mut it = self.points.values().copied();
        Some((it.next()?, it.next()?))
    }

    pub fn pair_distance(&self) -> Option<f64> {
        self.pair().map(|(a, b)| a.distance(b))
    }
}

/// Reference captured when exactly two pointers go down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub initial_distance: f64,
    pub scale_at_start: f64,
}

#[derive(Default, Debug, Clone)]
pub struct GestureTracker {
    pointers: PointerSet,
    baseline: Option<Baseline>,
}

impl GestureTracker {
    pub fn pointers(&self) -> &PointerSet {
        &self.pointers
    }

    pub fn baseline(&self) -> Option<Baseline> {
        self.baseline
    }

    pub fn is_engaged(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn pointer_down(&mut self, id: i32, at: Point, viewport: &ViewportState) {
        self.pointers.insert(id, at);
        self.sync_engagement(viewport);
    }

    pub fn pointer_move(
        &mut self,
        id: i32,
        at: Point,
        viewport: &mut ViewportState,
        limits: ScaleLimits,
    ) {
        if !self.pointers.update(id, at) {
            return;
        }
        let Some(base) = self.baseline else {
            return;
        };
        // Two pointers on the same spot: nothing to scale against.
        if base.initial_distance <= 0.0 {
            return;
        }
        if let Some(current) = self.pointers.pair_distance() {
            let factor = current / base.initial_distance;
            viewport.scale = limits.clamp(base.scale_at_start * factor);
        }
    }

    pub fn pointer_up(&mut self, id: i32, viewport: &ViewportState) {
        self.pointers.remove(id);
        self.sync_engagement(viewport);
    }

    pub fn pointer_cancel(&mut self, id: i32, viewport: &ViewportState) {
        self.pointer_up(id, viewport);
    }

    /// Restarts the current engagement from `scale` without dropping it.
    pub fn rebase_scale(&mut self, scale: f64) {
        if let Some(base) = self.baseline.as_mut() {
            base.scale_at_start = scale;
        }
    }

    // Baseline lives only while exactly two pointers are down; it is taken
    // once on entry and never refreshed mid-engagement.
    fn sync_engagement(&mut self, viewport: &ViewportState) {
        if self.pointers.len() != 2 {
            self.baseline = None;
            return;
        }
        if self.baseline.is_none() {
            if let Some(initial_distance) = self.pointers.pair_distance() {
                self.baseline = Some(Baseline {
                    initial_distance,
                    scale_at_start: viewport.scale,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engage(tracker: &mut GestureTracker, vp: &mut ViewportState, d0: f64) {
        tracker.pointer_down(1, Point::new(0.0, 0.0), vp);
        tracker.pointer_down(2, Point::new(d0, 0.0), vp);
    }

    #[test]
    fn single_pointer_never_engages() {
        let mut t = GestureTracker::default();
        let mut vp = ViewportState::default();
        t.pointer_down(7, Point::new(10.0, 10.0), &vp);
        t.pointer_move(7, Point::new(300.0, 300.0), &mut vp, ScaleLimits::default());
        assert!(!t.is_engaged());
        assert_eq!(vp.scale, 1.0);
    }

    #[test]
    fn pinch_scales_relative_to_baseline() {
        let mut t = GestureTracker::default();
        let mut vp = ViewportState {
            scale: 1.5,
            ..Default::default()
        };
        engage(&mut t, &mut vp, 100.0);
        assert_eq!(
            t.baseline(),
            Some(Baseline {
                initial_distance: 100.0,
                scale_at_start: 1.5
            })
        );
        t.pointer_move(2, Point::new(200.0, 0.0), &mut vp, ScaleLimits::default());
        assert_eq!(vp.scale, 3.0);
        // baseline is not refreshed by moves
        t.pointer_move(2, Point::new(150.0, 0.0), &mut vp, ScaleLimits::default());
        assert_eq!(vp.scale, 2.25);
    }

    #[test]
    fn pinch_is_clamped_both_ways() {
        let limits = ScaleLimits::default();
        let mut t = GestureTracker::default();
        let mut vp = ViewportState {
            scale: 2.0,
            ..Default::default()
        };
        engage(&mut t, &mut vp, 100.0);
        t.pointer_move(2, Point::new(1000.0, 0.0), &mut vp, limits);
        assert_eq!(vp.scale, 4.0);
        t.pointer_move(2, Point::new(10.0, 0.0), &mut vp, limits);
        assert_eq!(vp.scale, 1.0);
    }

    #[test]
    fn scale_stays_in_bounds_over_many_moves() {
        let limits = ScaleLimits::default();
        let mut t = GestureTracker::default();
        let mut vp = ViewportState::default();
        engage(&mut t, &mut vp, 50.0);
        for step in 0..200 {
            let x = 1.0 + (step as f64 * 37.0) % 900.0;
            t.pointer_move(1, Point::new(0.0, x / 3.0), &mut vp, limits);
            t.pointer_move(2, Point::new(x, 0.0), &mut vp, limits);
            assert!((1.0..=4.0).contains(&vp.scale));
        }
    }

    #[test]
    fn releasing_one_pointer_clears_baseline() {
        let limits = ScaleLimits::default();
        let mut t = GestureTracker::default();
        let mut vp = ViewportState::default();
        engage(&mut t, &mut vp, 100.0);
        t.pointer_move(2, Point::new(200.0, 0.0), &mut vp, limits);
        assert_eq!(vp.scale, 2.0);
        t.pointer_up(1, &vp);
        assert!(!t.is_engaged());
        t.pointer_move(2, Point::new(400.0, 0.0), &mut vp, limits);
        assert_eq!(vp.scale, 2.0);
    }

    #[test]
    fn cancel_behaves_like_release() {
        let mut t = GestureTracker::default();
        let mut vp = ViewportState::default();
        engage(&mut t, &mut vp, 100.0);
        t.pointer_cancel(2, &vp);
        assert!(!t.is_engaged());
        assert_eq!(t.pointers().len(), 1);
    }

    #[test]
    fn repeated_release_is_harmless() {
        let limits = ScaleLimits::default();
        let mut t = GestureTracker::default();
        let mut vp = ViewportState::default();
        engage(&mut t, &mut vp, 100.0);
        t.pointer_up(2, &vp);
        t.pointer_up(2, &vp);
        t.pointer_up(42, &vp);
        assert_eq!(t.pointers().len(), 1);
        assert!(!t.is_engaged());
        // a fresh second pointer engages from the current scale again
        t.pointer_down(3, Point::new(0.0, 50.0), &vp);
        t.pointer_move(3, Point::new(0.0, 100.0), &mut vp, limits);
        assert_eq!(vp.scale, 2.0);
    }

    #[test]
    fn unknown_pointer_moves_are_ignored() {
        let mut t = GestureTracker::default();
        let mut vp = ViewportState::default();
        engage(&mut t, &mut vp, 100.0);
        t.pointer_move(99, Point::new(500.0, 0.0), &mut vp, ScaleLimits::default());
        assert_eq!(vp.scale, 1.0);
        assert_eq!(t.pointers().len(), 2);
    }

    #[test]
    fn third_pointer_suspends_and_reentry_recaptures() {
        let limits = ScaleLimits::default();
        let mut t = GestureTracker::default();
        let mut vp = ViewportState::default();
        engage(&mut t, &mut vp, 100.0);
        t.pointer_move(2, Point::new(200.0, 0.0), &mut vp, limits);
        t.pointer_down(3, Point::new(50.0, 50.0), &vp);
        assert!(!t.is_engaged());
        t.pointer_move(2, Point::new(400.0, 0.0), &mut vp, limits);
        assert_eq!(vp.scale, 2.0);
        t.pointer_up(3, &vp);
        assert_eq!(
            t.baseline(),
            Some(Baseline {
                initial_distance: 400.0,
                scale_at_start: 2.0
            })
        );
    }

    #[test]
    fn pair_uses_lowest_ids() {
        let mut set = PointerSet::default();
        set.insert(9, Point::new(90.0, 0.0));
        set.insert(4, Point::new(40.0, 0.0));
        set.insert(2, Point::new(20.0, 0.0));
        let (a, b) = set.pair().unwrap();
        assert_eq!(a, Point::new(20.0, 0.0));
        assert_eq!(b, Point::new(40.0, 0.0));
    }

    #[test]
    fn coincident_pointers_do_not_divide_by_zero() {
        let limits = ScaleLimits::default();
        let mut t = GestureTracker::default();
        let mut vp = ViewportState::default();
        t.pointer_down(1, Point::new(5.0, 5.0), &vp);
        t.pointer_down(2, Point::new(5.0, 5.0), &vp);
        t.pointer_move(2, Point::new(100.0, 5.0), &mut vp, limits);
        assert_eq!(vp.scale, 1.0);
        assert!(vp.scale.is_finite());
    }
}
