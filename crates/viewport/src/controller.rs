//! Viewport retention across renders.
//!
//! Changing a filter rebuilds the map. Without intervention the rebuilt map
//! would snap back to the default view of the selected center; instead the
//! last viewport the page reported is frozen as the stored view at the moment
//! the filters change. Renders with unchanged filters leave the stored view
//! alone and the page keeps whatever pan/zoom it currently shows.

use crate::protocol::{FilterSnapshot, Viewport};

/// Stored state going into one render.
#[derive(Debug, Clone, Copy)]
pub struct ViewInputs<'a> {
    pub current: &'a FilterSnapshot,
    pub stored_snapshot: Option<&'a FilterSnapshot>,
    pub stored_viewport: Option<Viewport>,
    /// Last viewport the page reported, if it has reported one.
    pub observed: Option<Viewport>,
    /// Start point of the current data at the default zoom.
    pub default: Viewport,
}

/// Outcome of one render's viewport decision.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDecision {
    /// Snapshot to store for the next comparison.
    pub snapshot: FilterSnapshot,
    /// Viewport to store; also the viewport to render with.
    pub viewport: Viewport,
    pub filters_changed: bool,
}

/// Decide the viewport for a render. Total: every branch has a result.
pub fn decide(inputs: ViewInputs<'_>) -> ViewDecision {
    let filters_changed = inputs.stored_snapshot != Some(inputs.current);

    let viewport = match (inputs.stored_viewport, inputs.observed) {
        (None, _) => inputs.default,
        (Some(_), Some(observed)) if filters_changed => observed,
        (Some(stored), _) => stored,
    };

    ViewDecision {
        snapshot: inputs.current.clone(),
        viewport,
        filters_changed,
    }
}

/// Viewport state of one session, threaded through successive renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionView {
    snapshot: Option<FilterSnapshot>,
    stored: Option<Viewport>,
    observed: Option<Viewport>,
}

impl SessionView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the decision for `current` and persist its outcome.
    pub fn advance(&mut self, current: &FilterSnapshot, default: Viewport) -> ViewDecision {
        let decision = decide(ViewInputs {
            current,
            stored_snapshot: self.snapshot.as_ref(),
            stored_viewport: self.stored,
            observed: self.observed,
            default,
        });
        self.snapshot = Some(decision.snapshot.clone());
        self.stored = Some(decision.viewport);
        decision
    }

    /// Record the viewport the page reported after user interaction.
    pub fn observe(&mut self, viewport: Viewport) {
        self.observed = Some(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionView, ViewInputs, decide};
    use crate::protocol::{FilterSnapshot, LatLng, Viewport};
    use pretty_assertions::assert_eq;

    fn filters(center: &str, minutes: u32, schools: bool, hospitals: bool) -> FilterSnapshot {
        FilterSnapshot {
            center: center.to_string(),
            minutes,
            show_schools: schools,
            show_hospitals: hospitals,
        }
    }

    fn view(lat: f64, lng: f64, zoom: f64) -> Viewport {
        Viewport::new(LatLng::new(lat, lng), zoom)
    }

    #[test]
    fn first_render_uses_default() {
        let current = filters("Center 1", 30, false, false);
        let default = view(45.46, 9.19, 12.0);
        let d = decide(ViewInputs {
            current: &current,
            stored_snapshot: None,
            stored_viewport: None,
            observed: Some(view(1.0, 1.0, 3.0)),
            default,
        });
        assert_eq!(d.viewport, default);
        assert!(d.filters_changed);
        assert_eq!(d.snapshot, current);
    }

    #[test]
    fn unchanged_filters_keep_stored_viewport() {
        let current = filters("Center 1", 30, false, false);
        let stored = view(45.0, 9.0, 13.0);
        let d = decide(ViewInputs {
            current: &current,
            stored_snapshot: Some(&current.clone()),
            stored_viewport: Some(stored),
            observed: Some(view(45.5, 9.5, 15.0)),
            default: view(0.0, 0.0, 12.0),
        });
        assert_eq!(d.viewport, stored);
        assert!(!d.filters_changed);
    }

    #[test]
    fn changed_filters_freeze_observed_viewport() {
        let old = filters("Center 1", 30, false, false);
        let current = filters("Center 1", 20, false, false);
        let observed = view(45.5, 9.5, 15.0);
        let d = decide(ViewInputs {
            current: &current,
            stored_snapshot: Some(&old),
            stored_viewport: Some(view(45.0, 9.0, 12.0)),
            observed: Some(observed),
            default: view(0.0, 0.0, 12.0),
        });
        assert_eq!(d.viewport, observed);
        assert!(d.filters_changed);
    }

    #[test]
    fn changed_filters_without_report_keep_stored() {
        let old = filters("Center 1", 30, false, false);
        let current = filters("Center 2", 30, false, false);
        let stored = view(45.0, 9.0, 12.0);
        let d = decide(ViewInputs {
            current: &current,
            stored_snapshot: Some(&old),
            stored_viewport: Some(stored),
            observed: None,
            default: view(0.0, 0.0, 12.0),
        });
        assert_eq!(d.viewport, stored);
        assert!(d.filters_changed);
    }

    #[test]
    fn school_toggle_counts_as_change() {
        let mut session = SessionView::new();
        let default = view(45.46, 9.19, 12.0);
        let first = filters("Center 1", 30, false, false);
        assert_eq!(session.advance(&first, default).viewport, default);

        let panned = view(45.52, 9.31, 14.0);
        session.observe(panned);

        let toggled = filters("Center 1", 30, true, false);
        let d = session.advance(&toggled, default);
        assert!(d.filters_changed);
        assert_eq!(d.viewport, panned);
        assert_eq!(d.snapshot, toggled);

        // The frozen view is now the stored one.
        let again = session.advance(&toggled, default);
        assert!(!again.filters_changed);
        assert_eq!(again.viewport, panned);
    }

    #[test]
    fn plain_interaction_does_not_reset_view() {
        let mut session = SessionView::new();
        let default = view(45.46, 9.19, 12.0);
        let f = filters("Center 1", 30, false, false);
        session.advance(&f, default);

        session.observe(view(45.6, 9.4, 16.0));
        let d = session.advance(&f, default);
        assert!(!d.filters_changed);
        // Stored view untouched; the page keeps its live position.
        assert_eq!(d.viewport, default);

        // The report is still held for the next filter change.
        let changed = session.advance(&filters("Center 1", 20, false, false), default);
        assert_eq!(changed.viewport, view(45.6, 9.4, 16.0));
    }

    #[test]
    fn repeated_decision_is_idempotent() {
        let mut session = SessionView::new();
        let default = view(45.46, 9.19, 12.0);
        session.advance(&filters("Center 1", 30, false, false), default);
        session.observe(view(45.5, 9.2, 13.0));

        let changed = filters("Center 1", 10, false, true);
        let once = session.advance(&changed, default);
        let after_once = session.clone();
        let twice = session.advance(&changed, default);
        assert_eq!(once.viewport, twice.viewport);
        assert!(!twice.filters_changed);
        assert_eq!(session, after_once);
    }
}
