// Mobile browsers resize the visible viewport as the address bar collapses,
// often without a reliable `resize` event. The corrector tracks the visible
// height and publishes a `1vh` equivalent whenever it actually changes.

use super::constants::VIEWPORT_EPSILON_PX;

const ZOOM_EPSILON: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMetrics {
    pub inner_height: f64,
    /// `visualViewport.height`, where the browser has one.
    pub visual_height: Option<f64>,
    /// `visualViewport.scale`; anything but 1 means the user pinch-zoomed.
    pub visual_scale: Option<f64>,
}

impl ViewportMetrics {
    /// The visual viewport also shrinks under pinch-zoom, so it only counts
    /// at unit scale.
    #[inline]
    pub fn visible_height(&self) -> f64 {
        let unzoomed = self
            .visual_scale
            .map_or(true, |scale| (scale - 1.0).abs() < ZOOM_EPSILON);
        self.visual_height
            .filter(|h| unzoomed && h.is_finite() && *h > 0.0)
            .unwrap_or(self.inner_height)
            .max(0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VhUpdate {
    /// One percent of the visible height.
    pub unit_px: f64,
    pub height_px: f64,
}

impl VhUpdate {
    pub fn unit_css(&self) -> String {
        format!("{:.3}px", self.unit_px)
    }

    pub fn height_css(&self) -> String {
        format!("{:.1}px", self.height_px)
    }
}

#[derive(Debug)]
pub struct ViewportCorrector {
    last_height: Option<f64>,
    epsilon: f64,
    poll_ms: Option<u32>,
}

impl ViewportCorrector {
    pub fn new(poll_ms: Option<u32>) -> Self {
        Self {
            last_height: None,
            epsilon: VIEWPORT_EPSILON_PX,
            poll_ms,
        }
    }

    #[inline]
    pub fn last_height(&self) -> Option<f64> {
        self.last_height
    }

    /// `Some` when the visible height moved enough to be worth publishing.
    pub fn refresh(&mut self, metrics: ViewportMetrics) -> Option<VhUpdate> {
        let height = metrics.visible_height();
        if !(height > 0.0) {
            return None;
        }
        if let Some(prev) = self.last_height {
            if (prev - height).abs() < self.epsilon {
                return None;
            }
        }
        self.last_height = Some(height);
        Some(VhUpdate {
            unit_px: height * 0.01,
            height_px: height,
        })
    }

    /// Starts the fallback poll on `ticker` if polling is enabled.
    pub fn start_polling<T: Ticker + ?Sized>(&self, ticker: &mut T, tick: Box<dyn FnMut()>) -> bool {
        match self.poll_ms {
            Some(ms) if ms > 0 => {
                ticker.start(ms, tick);
                true
            }
            _ => false,
        }
    }
}

/// Low-frequency timer behind which the viewport poll runs.
pub trait Ticker {
    fn start(&mut self, period_ms: u32, tick: Box<dyn FnMut()>);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Ticker that never fires.
#[derive(Debug, Default)]
pub struct DisabledTicker;

impl Ticker for DisabledTicker {
    fn start(&mut self, _period_ms: u32, _tick: Box<dyn FnMut()>) {}

    fn stop(&mut self) {}

    fn is_running(&self) -> bool {
        false
    }
}
