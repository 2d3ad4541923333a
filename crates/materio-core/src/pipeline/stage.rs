//! Pipeline stage state machine.
//!
//! Enforces the valid transition graph:
//!
//! ```text
//! idle        -> summarizing
//! summarizing -> fetching
//! summarizing -> failed
//! fetching    -> parsing
//! fetching    -> failed
//! parsing     -> enriching
//! enriching   -> done
//! ```
//!
//! Parsing and enriching never fail the request: a malformed paragraph or a
//! missing image is a local degradation, so `failed` is reachable only from
//! the two gateway-backed stages.

/// A stage of the suggestion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Summarizing,
    Fetching,
    Parsing,
    Enriching,
    Done,
    Failed,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Idle => "idle",
            Stage::Summarizing => "summarizing",
            Stage::Fetching => "fetching",
            Stage::Parsing => "parsing",
            Stage::Enriching => "enriching",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(s)
    }
}

impl Stage {
    /// Check whether a transition from `from` to `to` is a valid edge in
    /// the stage graph.
    pub fn is_valid_transition(from: Stage, to: Stage) -> bool {
        matches!(
            (from, to),
            (Stage::Idle, Stage::Summarizing)
                | (Stage::Summarizing, Stage::Fetching)
                | (Stage::Summarizing, Stage::Failed)
                | (Stage::Fetching, Stage::Parsing)
                | (Stage::Fetching, Stage::Failed)
                | (Stage::Parsing, Stage::Enriching)
                | (Stage::Enriching, Stage::Done)
        )
    }

    /// Whether this stage is terminal.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

/// Tracks the current stage of one pipeline run and logs each transition.
#[derive(Debug)]
pub(crate) struct StageTracker {
    current: Stage,
}

impl StageTracker {
    pub(crate) fn new() -> Self {
        Self {
            current: Stage::Idle,
        }
    }

    pub(crate) fn current(&self) -> Stage {
        self.current
    }

    /// Move to `to`. The orchestrator only drives edges in the graph, so an
    /// invalid transition is a bug in the caller, not a runtime condition.
    pub(crate) fn advance(&mut self, to: Stage) {
        debug_assert!(
            Stage::is_valid_transition(self.current, to),
            "invalid stage transition: {} -> {}",
            self.current,
            to
        );
        tracing::debug!(from = %self.current, to = %to, "pipeline stage transition");
        self.current = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_edges_are_valid() {
        let path = [
            Stage::Idle,
            Stage::Summarizing,
            Stage::Fetching,
            Stage::Parsing,
            Stage::Enriching,
            Stage::Done,
        ];
        for pair in path.windows(2) {
            assert!(
                Stage::is_valid_transition(pair[0], pair[1]),
                "{} -> {} should be valid",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn failed_reachable_only_from_gateway_stages() {
        assert!(Stage::is_valid_transition(Stage::Summarizing, Stage::Failed));
        assert!(Stage::is_valid_transition(Stage::Fetching, Stage::Failed));

        for from in [
            Stage::Idle,
            Stage::Parsing,
            Stage::Enriching,
            Stage::Done,
            Stage::Failed,
        ] {
            assert!(
                !Stage::is_valid_transition(from, Stage::Failed),
                "{from} -> failed should be invalid"
            );
        }
    }

    #[test]
    fn no_transitions_out_of_terminal_stages() {
        for terminal in [Stage::Done, Stage::Failed] {
            assert!(terminal.is_terminal());
            for to in [
                Stage::Idle,
                Stage::Summarizing,
                Stage::Fetching,
                Stage::Parsing,
                Stage::Enriching,
                Stage::Done,
            ] {
                assert!(
                    !Stage::is_valid_transition(terminal, to),
                    "{terminal} -> {to} should be invalid"
                );
            }
        }
    }

    #[test]
    fn stages_cannot_be_reordered_or_skipped() {
        assert!(!Stage::is_valid_transition(Stage::Idle, Stage::Fetching));
        assert!(!Stage::is_valid_transition(Stage::Summarizing, Stage::Parsing));
        assert!(!Stage::is_valid_transition(Stage::Fetching, Stage::Enriching));
        assert!(!Stage::is_valid_transition(Stage::Parsing, Stage::Done));
        assert!(!Stage::is_valid_transition(Stage::Fetching, Stage::Summarizing));
    }

    #[test]
    fn tracker_follows_advances() {
        let mut tracker = StageTracker::new();
        assert_eq!(tracker.current(), Stage::Idle);
        tracker.advance(Stage::Summarizing);
        tracker.advance(Stage::Fetching);
        assert_eq!(tracker.current(), Stage::Fetching);
        tracker.advance(Stage::Failed);
        assert!(tracker.current().is_terminal());
    }
}
