//! Split pane controller
//!
//! Tracks the editor/preview ratio from a continuous drag gesture. Tracking
//! is an explicit resource: it starts on press over the divider, follows the
//! pointer anywhere over the tracking region, and ends on release. The scoped
//! `DragGesture` releases tracking when dropped.

use tracing::{debug, warn};

use crate::error::SplitError;

/// Default share of the width given to the editor
pub const DEFAULT_RATIO: f64 = 50.0;

/// Default lower bound for the ratio
pub const DEFAULT_MIN_RATIO: f64 = 10.0;

/// Default upper bound for the ratio
pub const DEFAULT_MAX_RATIO: f64 = 90.0;

/// Inclusive bounds for the split ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitBounds {
    min: f64,
    max: f64,
}

impl Default for SplitBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_RATIO,
            max: DEFAULT_MAX_RATIO,
        }
    }
}

impl SplitBounds {
    /// Validate `0 <= min < max <= 100`
    pub fn new(min: f64, max: f64) -> Result<Self, SplitError> {
        let valid = min.is_finite() && max.is_finite() && 0.0 <= min && min < max && max <= 100.0;
        if !valid {
            return Err(SplitError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamp a ratio into the bounds
    pub fn clamp(&self, ratio: f64) -> f64 {
        ratio.clamp(self.min, self.max)
    }
}

/// Horizontal span the pointer position is measured against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackRegion {
    /// Left edge
    pub origin: f64,
    /// Width, strictly positive
    pub width: f64,
}

impl TrackRegion {
    /// Create a region, rejecting empty or non-finite widths
    pub fn new(origin: f64, width: f64) -> Result<Self, SplitError> {
        if !origin.is_finite() || !width.is_finite() || width <= 0.0 {
            return Err(SplitError::InvalidRegion(width));
        }
        Ok(Self { origin, width })
    }

    /// The whole viewport, starting at x = 0
    pub fn viewport(width: f64) -> Result<Self, SplitError> {
        Self::new(0.0, width)
    }

    /// Unclamped ratio for a pointer position
    pub fn ratio_at(&self, x: f64) -> f64 {
        (x - self.origin) * 100.0 / self.width
    }
}

/// Owner of the editor/preview split ratio
#[derive(Debug, Clone)]
pub struct SplitPaneController {
    ratio: f64,
    default_ratio: f64,
    bounds: SplitBounds,
    tracking: Option<TrackRegion>,
}

impl Default for SplitPaneController {
    fn default() -> Self {
        Self::new(DEFAULT_RATIO, SplitBounds::default())
    }
}

impl SplitPaneController {
    /// Create a controller; the default ratio is clamped into the bounds
    pub fn new(default_ratio: f64, bounds: SplitBounds) -> Self {
        let default_ratio = if default_ratio.is_finite() {
            bounds.clamp(default_ratio)
        } else {
            bounds.clamp(DEFAULT_RATIO)
        };

        Self {
            ratio: default_ratio,
            default_ratio,
            bounds,
            tracking: None,
        }
    }

    /// Current percentage of the width given to the editor
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn bounds(&self) -> SplitBounds {
        self.bounds
    }

    /// Whether a drag gesture is in progress
    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Start tracking a drag
    ///
    /// Returns `false` and leaves the active gesture untouched when a drag is
    /// already in progress.
    pub fn press(&mut self, region: TrackRegion) -> bool {
        if self.tracking.is_some() {
            warn!("Ignoring drag start while another drag is active");
            return false;
        }

        debug!("Drag started over region {:?}", region);
        self.tracking = Some(region);
        true
    }

    /// Follow a pointer sample; returns the new ratio while tracking
    pub fn pointer_moved(&mut self, x: f64) -> Option<f64> {
        let region = self.tracking?;
        if !x.is_finite() {
            return None;
        }

        self.ratio = self.bounds.clamp(region.ratio_at(x));
        Some(self.ratio)
    }

    /// Stop tracking on pointer release
    pub fn release(&mut self) {
        if self.tracking.take().is_some() {
            debug!("Drag released at ratio {:.1}", self.ratio);
        }
    }

    /// Stop tracking on component teardown
    pub fn cancel_tracking(&mut self) {
        if self.tracking.take().is_some() {
            debug!("Drag tracking cancelled");
        }
    }

    /// Restore the default ratio
    pub fn reset(&mut self) {
        self.ratio = self.default_ratio;
    }

    /// Start a scoped drag gesture
    pub fn begin_drag(&mut self, region: TrackRegion) -> Option<DragGesture<'_>> {
        if self.press(region) {
            Some(DragGesture { controller: self })
        } else {
            None
        }
    }
}

/// A drag in progress; tracking ends when this is released or dropped
pub struct DragGesture<'a> {
    controller: &'a mut SplitPaneController,
}

impl DragGesture<'_> {
    /// Follow a pointer sample
    pub fn update(&mut self, x: f64) -> f64 {
        self.controller.pointer_moved(x);
        self.controller.ratio
    }

    /// End the gesture, returning the final ratio
    pub fn release(self) -> f64 {
        self.controller.ratio
    }
}

impl Drop for DragGesture<'_> {
    fn drop(&mut self) {
        self.controller.release();
    }
}
