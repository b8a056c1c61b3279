// Press/release machine for the glass panels. The scroll pass and the
// interaction handler both drive a panel's `transform`; `is_animating` tells
// the scroll pass to keep its hands off while a press or release is running.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransformOrigin {
    Center,
    #[default]
    Bottom,
}

impl TransformOrigin {
    #[inline]
    pub fn as_css(self) -> &'static str {
        match self {
            TransformOrigin::Center => "center center",
            TransformOrigin::Bottom => "center bottom",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelPhase {
    #[default]
    Resting,
    Pressed,
    /// `token` identifies the release timer that may settle this phase.
    Releasing { token: u32 },
}

/// Visual properties for one panel in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelVisual {
    pub opacity: f64,
    pub scale: f64,
    pub transform_origin: TransformOrigin,
    pub pressed: bool,
    pub animating: bool,
}

impl PanelVisual {
    /// `None` while an interaction transition owns the transform.
    pub fn transform_css(&self) -> Option<String> {
        (!self.animating).then(|| scale_css(self.scale))
    }

    pub fn opacity_css(&self) -> String {
        format!("{:.4}", self.opacity)
    }
}

/// Transition started by a release.
#[derive(Clone, Debug, PartialEq)]
pub struct Release {
    pub token: u32,
    pub transform: String,
    /// `transition-duration`, matching the settle timer.
    pub duration_css: String,
    pub duration_ms: u32,
}

#[derive(Clone, Debug)]
pub struct PanelState {
    phase: PanelPhase,
    origin: TransformOrigin,
    pressed_scale: f64,
    reveal_scale: f64,
    release_ms: u32,
    next_token: u32,
}

impl PanelState {
    pub fn new(pressed_scale: f64, origin: TransformOrigin) -> Self {
        Self {
            phase: PanelPhase::Resting,
            origin,
            pressed_scale,
            reveal_scale: 1.0,
            release_ms: super::constants::PANEL_RELEASE_MS,
            next_token: 0,
        }
    }

    pub fn with_release_ms(mut self, release_ms: u32) -> Self {
        self.release_ms = release_ms;
        self
    }

    #[inline]
    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.phase == PanelPhase::Pressed
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.phase != PanelPhase::Resting
    }

    /// Derive this frame's visual from the staggered reveal progress.
    /// The reveal scale is tracked even while animating so a release
    /// settles onto the current scroll position.
    pub fn visual(&mut self, reveal: f64, min_scale: f64) -> PanelVisual {
        let reveal = if reveal.is_nan() { 0.0 } else { reveal.clamp(0.0, 1.0) };
        self.reveal_scale = min_scale + (1.0 - min_scale) * reveal;
        PanelVisual {
            opacity: reveal,
            scale: self.reveal_scale,
            transform_origin: self.origin,
            pressed: self.is_pressed(),
            animating: self.is_animating(),
        }
    }

    /// Resting or Releasing -> Pressed. Returns the transform to apply.
    pub fn press(&mut self) -> Option<String> {
        if self.is_pressed() {
            return None;
        }
        self.phase = PanelPhase::Pressed;
        Some(scale_css(self.reveal_scale * self.pressed_scale))
    }

    /// Pressed -> Resting without a transition.
    pub fn leave(&mut self) -> Option<String> {
        if !self.is_pressed() {
            return None;
        }
        self.phase = PanelPhase::Resting;
        Some(scale_css(self.reveal_scale))
    }

    /// Pressed -> Releasing. The caller arms a timer that later calls
    /// [`PanelState::settle`] with the returned token.
    pub fn release(&mut self) -> Option<Release> {
        if !self.is_pressed() {
            return None;
        }
        let token = self.next_token;
        self.next_token = self.next_token.wrapping_add(1);
        self.phase = PanelPhase::Releasing { token };
        Some(Release {
            token,
            transform: scale_css(self.reveal_scale),
            duration_css: format!("{}ms", self.release_ms),
            duration_ms: self.release_ms,
        })
    }

    /// Releasing -> Resting, only for the timer that started this release.
    pub fn settle(&mut self, token: u32) -> bool {
        if self.phase == (PanelPhase::Releasing { token }) {
            self.phase = PanelPhase::Resting;
            true
        } else {
            false
        }
    }
}

#[inline]
fn scale_css(scale: f64) -> String {
    format!("scale({:.4})", scale)
}
