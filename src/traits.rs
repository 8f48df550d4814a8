//! Observer traits for structured progress reporting

use crate::types::ReconciliationSummary;

/// Pipeline phase a progress event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchPhase {
    /// Identifier-equality matching
    Exact,
    /// Tolerance filtering plus similarity scoring
    Fuzzy,
}

impl std::fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchPhase::Exact => write!(f, "exact"),
            MatchPhase::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// Discrete progress event emitted while a reconciliation run executes.
///
/// Events are emitted in a deterministic sequence even when candidate
/// scanning runs in parallel: the engine collects per-record outcomes and
/// narrates them at the sequential join point.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    /// A pipeline phase began
    PhaseStarted { phase: MatchPhase },
    /// Tolerance filtering finished for one bank record; `count` is the
    /// number of surviving candidates (0 when the record has a null date
    /// or amount and cannot be compared)
    CandidatesFiltered { bank_index: usize, count: usize },
    /// A candidate pair cleared acceptance; exact matches report 1.0
    MatchAccepted { phase: MatchPhase, score: f64 },
    /// A pipeline phase finished with `matched` accepted pairs
    PhaseCompleted { phase: MatchPhase, matched: usize },
    /// The whole run finished; carries the final summary counts
    RunCompleted { summary: ReconciliationSummary },
}

/// Sink for reconciliation progress events.
///
/// Implementations must not assume anything about event timing relative to
/// the underlying scan; they only see the deterministic narrated sequence.
pub trait MatchObserver {
    /// Receive one progress event
    fn on_event(&mut self, event: MatchEvent);
}

/// Observer that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl MatchObserver for NullObserver {
    fn on_event(&mut self, _event: MatchEvent) {}
}

/// Collecting observer for tests and diagnostics
impl MatchObserver for Vec<MatchEvent> {
    fn on_event(&mut self, event: MatchEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_observer_collects_events() {
        let mut events: Vec<MatchEvent> = Vec::new();
        events.on_event(MatchEvent::PhaseStarted {
            phase: MatchPhase::Exact,
        });
        events.on_event(MatchEvent::MatchAccepted {
            phase: MatchPhase::Exact,
            score: 1.0,
        });

        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            MatchEvent::PhaseStarted {
                phase: MatchPhase::Exact
            }
        );
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(MatchPhase::Exact.to_string(), "exact");
        assert_eq!(MatchPhase::Fuzzy.to_string(), "fuzzy");
    }
}
