//! Flow-level configuration: wait budgets and interaction pacing.

use crate::interact::JitterPolicy;
use crate::locator::WaitBudget;
use std::time::Duration;

/// Configuration shared by every page object in a flow.
///
/// Correctness waiting (the budgets) and anti-detection pacing (the
/// jitter) are deliberately separate knobs: jitter can be disabled for
/// fast test environments without touching the budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowConfig {
    /// Budget for resolutions whose absence is a failure
    pub required: WaitBudget,
    /// Budget for probes and collection lookups that may come up empty
    pub probe: WaitBudget,
    /// Randomized pause applied after clicks and scrolls
    pub jitter: JitterPolicy,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            required: WaitBudget::required(),
            probe: WaitBudget::probe(),
            jitter: JitterPolicy::humanized(),
        }
    }
}

impl FlowConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the required budget
    #[must_use]
    pub const fn with_required(mut self, budget: WaitBudget) -> Self {
        self.required = budget;
        self
    }

    /// Override the probe budget
    #[must_use]
    pub const fn with_probe(mut self, budget: WaitBudget) -> Self {
        self.probe = budget;
        self
    }

    /// Override the jitter policy
    #[must_use]
    pub const fn with_jitter(mut self, jitter: JitterPolicy) -> Self {
        self.jitter = jitter;
        self
    }

    /// Preset for fast test environments: tight budgets, no pacing
    #[must_use]
    pub const fn fast() -> Self {
        Self {
            required: WaitBudget::new(Duration::from_millis(250))
                .with_poll_interval(Duration::from_millis(10)),
            probe: WaitBudget::new(Duration::from_millis(100))
                .with_poll_interval(Duration::from_millis(10)),
            jitter: JitterPolicy::disabled(),
        }
    }
}
