use super::constants::{
    ENGINE_RETRY_INTERVAL_MS, ENGINE_SCRIPT_SETTLE_MS, EXISTING_SCRIPT_POLL_LIMIT,
    LOADED_SCRIPT_POLL_LIMIT,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoaderError {
    #[error("engine script failed to load: {0}")]
    ScriptLoad(String),
    #[error("could not inject engine script: {0}")]
    Inject(String),
    #[error("engine global has no init entry point")]
    EngineMissing,
    #[error("engine init threw: {0}")]
    InitFailed(String),
}

/// Environment the loader drives: the engine global, its script tag and the
/// container element the engine renders into.
pub trait EngineHost {
    /// The engine global exists and exposes `init`.
    fn engine_ready(&self) -> bool;
    /// The container element is attached to the document.
    fn container_attached(&self) -> bool;
    /// A script tag for the engine is already in the document.
    fn script_present(&self) -> bool;
    /// Insert the script tag. Load completion is reported back through
    /// [`EmbedLoader::script_loaded`] / [`EmbedLoader::script_failed`].
    fn inject_script(&mut self) -> Result<(), LoaderError>;
    fn call_init(&mut self) -> Result<(), LoaderError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoaderPhase {
    #[default]
    Idle,
    AwaitingScript,
    Polling {
        attempts: u32,
        limit: u32,
    },
    Initialized,
    /// `init` threw; it is never called again.
    Faulted,
    /// Poll budget exhausted; a later mount may try again.
    GaveUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStep {
    /// `init` was called and returned.
    Ready,
    AlreadyInitialized,
    /// A load or poll sequence is already in flight.
    Busy,
    /// Wait for the script's load or error event.
    AwaitScript,
    /// Call [`EmbedLoader::poll`] after this many milliseconds.
    RetryAfter(u32),
    GaveUp,
    Faulted,
    /// Script injection failed; the loader is back to idle.
    Failed,
    /// The view that scheduled this poll has been torn down.
    Stale,
}

impl LoadStep {
    /// The engine came up on this step, so the page should nudge it with a
    /// `scroll` event. The host does this once the loader is released.
    #[inline]
    pub fn announces_engine(self) -> bool {
        self == LoadStep::Ready
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval_ms: u32,
    pub settle_ms: u32,
    pub existing_script_limit: u32,
    pub loaded_script_limit: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval_ms: ENGINE_RETRY_INTERVAL_MS,
            settle_ms: ENGINE_SCRIPT_SETTLE_MS,
            existing_script_limit: EXISTING_SCRIPT_POLL_LIMIT,
            loaded_script_limit: LOADED_SCRIPT_POLL_LIMIT,
        }
    }
}

/// Owns the "engine initialized" state and guarantees `init` runs at most
/// once per page, however many times the view mounts.
#[derive(Debug, Default)]
pub struct EmbedLoader {
    phase: LoaderPhase,
    policy: RetryPolicy,
    epoch: u32,
    init_calls: u32,
}

impl EmbedLoader {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    #[inline]
    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.phase == LoaderPhase::Initialized
    }

    /// Changes whenever a view is torn down; polls carry the epoch they
    /// were scheduled under.
    #[inline]
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    #[inline]
    pub fn init_calls(&self) -> u32 {
        self.init_calls
    }

    pub fn mount<H: EngineHost + ?Sized>(&mut self, host: &mut H) -> LoadStep {
        match self.phase {
            LoaderPhase::Initialized => return LoadStep::AlreadyInitialized,
            LoaderPhase::Faulted => return LoadStep::Faulted,
            LoaderPhase::AwaitingScript | LoaderPhase::Polling { .. } => return LoadStep::Busy,
            LoaderPhase::Idle | LoaderPhase::GaveUp => {}
        }

        if let Some(step) = self.try_init(host) {
            return step;
        }

        if host.script_present() {
            log::info!("[embed] engine script already present, waiting for it");
            self.phase = LoaderPhase::Polling {
                attempts: 0,
                limit: self.policy.existing_script_limit,
            };
            return LoadStep::RetryAfter(self.policy.interval_ms);
        }

        match host.inject_script() {
            Ok(()) => {
                log::info!("[embed] engine script injected");
                self.phase = LoaderPhase::AwaitingScript;
                LoadStep::AwaitScript
            }
            Err(e) => {
                self.script_failed(e);
                LoadStep::Failed
            }
        }
    }

    /// [`mount`](Self::mount), plus the epoch that any polls it schedules
    /// must carry. Both are read together so a teardown between scheduling
    /// and mounting cannot orphan the sequence.
    pub fn mount_sequence<H: EngineHost + ?Sized>(&mut self, host: &mut H) -> (LoadStep, u32) {
        let step = self.mount(host);
        (step, self.epoch)
    }

    /// The injected script fired its load event.
    pub fn script_loaded(&mut self) -> LoadStep {
        match self.phase {
            LoaderPhase::AwaitingScript => {
                self.phase = LoaderPhase::Polling {
                    attempts: 0,
                    limit: self.policy.loaded_script_limit,
                };
                LoadStep::RetryAfter(self.policy.settle_ms)
            }
            LoaderPhase::Initialized => LoadStep::AlreadyInitialized,
            _ => LoadStep::Stale,
        }
    }

    /// The script failed to load. Resets to idle so a later mount retries.
    pub fn script_failed(&mut self, err: LoaderError) {
        log::error!("[embed] {}", err);
        if !matches!(self.phase, LoaderPhase::Initialized | LoaderPhase::Faulted) {
            self.phase = LoaderPhase::Idle;
        }
    }

    /// One bounded retry.
    pub fn poll<H: EngineHost + ?Sized>(&mut self, host: &mut H, epoch: u32) -> LoadStep {
        if epoch != self.epoch {
            return LoadStep::Stale;
        }
        let LoaderPhase::Polling { attempts, limit } = self.phase else {
            return match self.phase {
                LoaderPhase::Initialized => LoadStep::AlreadyInitialized,
                _ => LoadStep::Stale,
            };
        };

        if let Some(step) = self.try_init(host) {
            return step;
        }

        let attempts = attempts + 1;
        if attempts >= limit {
            log::error!("[embed] engine initialization timed out after {} polls", attempts);
            self.phase = LoaderPhase::GaveUp;
            return LoadStep::GaveUp;
        }
        self.phase = LoaderPhase::Polling { attempts, limit };
        LoadStep::RetryAfter(self.policy.interval_ms)
    }

    /// The view went away: pending polls become stale. A pending script load
    /// is left alone since the tag keeps loading regardless.
    pub fn suspend(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if matches!(self.phase, LoaderPhase::Polling { .. }) {
            self.phase = LoaderPhase::Idle;
        }
    }

    fn try_init<H: EngineHost + ?Sized>(&mut self, host: &mut H) -> Option<LoadStep> {
        if !(host.engine_ready() && host.container_attached()) {
            return None;
        }
        self.init_calls += 1;
        match host.call_init() {
            Ok(()) => {
                self.phase = LoaderPhase::Initialized;
                Some(LoadStep::Ready)
            }
            Err(e) => {
                log::error!("[embed] {}", e);
                self.phase = LoaderPhase::Faulted;
                Some(LoadStep::Faulted)
            }
        }
    }
}
