// Animation-frame coalescing: however many scroll, wheel or touch events fire,
// at most one frame callback is pending.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FramePhase {
    #[default]
    Idle,
    Scheduled,
}

#[derive(Debug, Default)]
pub struct FrameGate {
    phase: FramePhase,
    coalesced: u64,
}

impl FrameGate {
    /// Returns `true` when the caller should request a frame.
    pub fn request(&mut self) -> bool {
        match self.phase {
            FramePhase::Idle => {
                self.phase = FramePhase::Scheduled;
                true
            }
            FramePhase::Scheduled => {
                self.coalesced += 1;
                false
            }
        }
    }

    /// Called at the top of the frame callback.
    #[inline]
    pub fn begin_frame(&mut self) {
        self.phase = FramePhase::Idle;
    }

    /// Called when a requested frame is cancelled or could not be requested.
    #[inline]
    pub fn cancel(&mut self) {
        self.phase = FramePhase::Idle;
    }

    #[inline]
    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.phase == FramePhase::Scheduled
    }

    /// Number of requests absorbed by an already pending frame.
    #[inline]
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}
