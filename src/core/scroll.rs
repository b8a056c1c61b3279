use super::easing::Easing;
use smallvec::SmallVec;

/// Scroll distance over which the bio animation completes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Threshold {
    Pixels(f64),
    ViewportFraction(f64),
}

impl Threshold {
    #[inline]
    pub fn resolve(self, viewport_height: f64) -> f64 {
        let px = match self {
            Threshold::Pixels(px) => px,
            Threshold::ViewportFraction(fraction) => fraction * viewport_height,
        };
        px.max(0.0)
    }
}

/// Snapshot of the scroll position for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub raw_offset: f64,
    pub progress: f64,
    pub viewport_height: f64,
}

impl ScrollState {
    pub fn sample(raw_offset: f64, viewport_height: f64, threshold: Threshold) -> Self {
        let limit = threshold.resolve(viewport_height);
        Self {
            raw_offset,
            progress: progress(raw_offset, limit),
            viewport_height,
        }
    }
}

/// Normalized progress in `[0, 1]`. A non-positive threshold counts as
/// already complete.
#[inline]
pub fn progress(offset: f64, threshold: f64) -> f64 {
    if !(threshold > 0.0) {
        return 1.0;
    }
    if offset.is_nan() {
        return 0.0;
    }
    (offset / threshold).clamp(0.0, 1.0)
}

/// Bio text transform derived from a scroll snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextVisual {
    pub scale: f64,
    pub translate_y: f64,
    pub opacity: f64,
}

impl TextVisual {
    /// Motion follows the eased progress; opacity follows the raw one so the
    /// text fades out exactly at the threshold whatever the curve.
    pub fn from_state(state: &ScrollState, easing: Easing, shrink: f64) -> Self {
        let eased = easing.apply(state.progress);
        Self {
            scale: 1.0 - eased * shrink,
            translate_y: 0.0 - eased * state.viewport_height,
            opacity: 1.0 - state.progress,
        }
    }

    pub fn transform_css(&self) -> String {
        format!(
            "translate(-50%, calc(-50% + {:.2}px)) scale({:.4})",
            self.translate_y, self.scale
        )
    }

    pub fn opacity_css(&self) -> String {
        format!("{:.4}", self.opacity)
    }
}

/// Where the embed sits relative to the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EmbedPlacement {
    /// Fixed to the top of the viewport.
    Pinned,
    /// Scrolls with the page, anchored at `top` px from the document top.
    Released { top: f64 },
}

/// The embed stays pinned until the offset reaches `pin_distance`, then
/// hands off to normal flow at that same position so there is no jump.
pub fn embed_placement(offset: f64, pin_distance: Option<f64>) -> EmbedPlacement {
    match pin_distance {
        Some(distance) if offset >= distance => EmbedPlacement::Released { top: distance },
        _ => EmbedPlacement::Pinned,
    }
}

#[inline]
pub fn distance_from_bottom(scroll_height: f64, viewport_height: f64, offset: f64) -> f64 {
    let max_scroll = (scroll_height - viewport_height).max(0.0);
    (max_scroll - offset).max(0.0)
}

/// Linear ramp from distance-from-bottom to panel reveal progress:
/// `1` at or below `start`, `0` at or beyond `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealRamp {
    pub start: f64,
    pub end: f64,
}

impl RevealRamp {
    pub fn progress(&self, distance_from_bottom: f64) -> f64 {
        if distance_from_bottom.is_nan() {
            return 0.0;
        }
        if distance_from_bottom <= self.start {
            return 1.0;
        }
        if distance_from_bottom >= self.end {
            return 0.0;
        }
        (self.end - distance_from_bottom) / (self.end - self.start)
    }
}

/// Per-panel progress, each panel delayed by `delay` and rescaled so the last
/// one still completes when `progress` reaches 1.
pub fn staggered(progress: f64, count: usize, delay: f64) -> SmallVec<[f64; 4]> {
    let span = 1.0 - delay * count.saturating_sub(1) as f64;
    if !(span > 0.0) || delay < 0.0 {
        return (0..count).map(|_| progress.clamp(0.0, 1.0)).collect();
    }
    (0..count)
        .map(|i| ((progress - delay * i as f64) / span).clamp(0.0, 1.0))
        .collect()
}
