//! Deterministic reply fault injection.
//!
//! Simulates the ways a completion provider lets the pipeline down:
//! - Transport/API errors
//! - Answers without content
//! - Prose instead of JSON
//! - JSON cut off mid-document

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// A single injected fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFault {
    /// The call fails outright
    Error,
    /// The call succeeds without content
    Empty,
    /// The reply is replaced by non-JSON prose
    Garbage,
    /// The reply is cut in half
    Truncate,
}

/// Configuration for reply fault injection.
#[derive(Debug, Clone)]
pub struct ReplyFaultConfig {
    /// Probability of a provider error (0.0 to 1.0)
    pub error_probability: f64,
    /// Probability of an empty reply
    pub empty_probability: f64,
    /// Probability of a non-JSON reply
    pub garbage_probability: f64,
    /// Probability of a truncated reply
    pub truncate_probability: f64,
    /// Whether fault injection is enabled
    pub enabled: bool,
}

impl Default for ReplyFaultConfig {
    fn default() -> Self {
        Self {
            error_probability: 0.02,
            empty_probability: 0.02,
            garbage_probability: 0.05,
            truncate_probability: 0.02,
            enabled: true,
        }
    }
}

impl ReplyFaultConfig {
    /// No faults - every reply passes through untouched.
    #[must_use]
    pub fn none() -> Self {
        Self {
            error_probability: 0.0,
            empty_probability: 0.0,
            garbage_probability: 0.0,
            truncate_probability: 0.0,
            enabled: false,
        }
    }

    /// Aggressive faults for stress testing.
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            error_probability: 0.15,
            empty_probability: 0.15,
            garbage_probability: 0.15,
            truncate_probability: 0.15,
            enabled: true,
        }
    }
}

/// Deterministic reply fault injector.
///
/// The same seed produces the same fault sequence.
pub struct ReplyFaultInjector {
    rng: Xoshiro256StarStar,
    config: ReplyFaultConfig,
    stats: ReplyFaultStats,
}

impl ReplyFaultInjector {
    /// Create a new injector with the given seed and config.
    pub fn new(seed: u64, config: ReplyFaultConfig) -> Self {
        for p in [
            config.error_probability,
            config.empty_probability,
            config.garbage_probability,
            config.truncate_probability,
        ] {
            debug_assert!((0.0..=1.0).contains(&p), "Probability must be in [0.0, 1.0]");
        }

        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            config,
            stats: ReplyFaultStats::default(),
        }
    }

    /// Decide the fault (if any) for the next provider call.
    ///
    /// Faults are checked in a fixed order so a seed always maps to the
    /// same decision sequence.
    pub fn next_fault(&mut self) -> Option<ReplyFault> {
        self.stats.calls_count += 1;
        if !self.config.enabled {
            return None;
        }

        let fault = if self.rng.gen_bool(self.config.error_probability) {
            Some(ReplyFault::Error)
        } else if self.rng.gen_bool(self.config.empty_probability) {
            Some(ReplyFault::Empty)
        } else if self.rng.gen_bool(self.config.garbage_probability) {
            Some(ReplyFault::Garbage)
        } else if self.rng.gen_bool(self.config.truncate_probability) {
            Some(ReplyFault::Truncate)
        } else {
            None
        };

        match fault {
            Some(ReplyFault::Error) => self.stats.errors_count += 1,
            Some(ReplyFault::Empty) => self.stats.empties_count += 1,
            Some(ReplyFault::Garbage) => self.stats.garbage_count += 1,
            Some(ReplyFault::Truncate) => self.stats.truncations_count += 1,
            None => {}
        }
        fault
    }

    /// Get statistics about injected faults.
    #[must_use]
    pub fn stats(&self) -> ReplyFaultStats {
        self.stats
    }
}

/// Statistics about injected faults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplyFaultStats {
    /// Number of decisions taken (one per provider call)
    pub calls_count: u64,
    pub errors_count: u64,
    pub empties_count: u64,
    pub garbage_count: u64,
    pub truncations_count: u64,
}

impl ReplyFaultStats {
    /// Total number of faults injected.
    #[must_use]
    pub fn faults_count(&self) -> u64 {
        self.errors_count + self.empties_count + self.garbage_count + self.truncations_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_faults_when_disabled() {
        let mut injector = ReplyFaultInjector::new(12345, ReplyFaultConfig::none());

        for _ in 0..1000 {
            assert!(injector.next_fault().is_none());
        }
        assert_eq!(injector.stats().calls_count, 1000);
        assert_eq!(injector.stats().faults_count(), 0);
    }

    #[test]
    fn test_deterministic_faults() {
        let mut inj1 = ReplyFaultInjector::new(42, ReplyFaultConfig::aggressive());
        let mut inj2 = ReplyFaultInjector::new(42, ReplyFaultConfig::aggressive());

        for _ in 0..200 {
            assert_eq!(inj1.next_fault(), inj2.next_fault());
        }
        assert_eq!(inj1.stats(), inj2.stats());
    }

    #[test]
    fn test_always_error() {
        let config = ReplyFaultConfig {
            error_probability: 1.0,
            ..ReplyFaultConfig::default()
        };
        let mut injector = ReplyFaultInjector::new(7, config);

        for _ in 0..10 {
            assert_eq!(injector.next_fault(), Some(ReplyFault::Error));
        }
        assert_eq!(injector.stats().errors_count, 10);
    }

    #[test]
    fn test_aggressive_hits_every_fault() {
        let mut injector = ReplyFaultInjector::new(12345, ReplyFaultConfig::aggressive());
        for _ in 0..2000 {
            injector.next_fault();
        }

        let stats = injector.stats();
        assert!(stats.errors_count > 0);
        assert!(stats.empties_count > 0);
        assert!(stats.garbage_count > 0);
        assert!(stats.truncations_count > 0);
        assert!(stats.faults_count() < stats.calls_count);
    }
}
