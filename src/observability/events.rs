//! Observable events for a validation run
//!
//! Events are explicit and typed. Call sites attach them to `tracing`
//! records as the `event` field.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration resolved
    ConfigLoaded,
    /// Validation run begins
    RunStart,
    /// All phases passed
    RunComplete,
    /// Run halted on a fatal violation
    RunFailed,

    // Phases
    /// Phase begins
    PhaseStart,
    /// Phase finished with every definition valid
    PhaseComplete,
    /// One definition passed every check
    DefinitionValid,
    /// One definition failed a check
    DefinitionRejected,

    // Query engine
    /// Query engine not yet reachable
    EngineWait,
    /// Query engine reachable
    EngineReady,
    /// Query text submitted for introspection
    QueryIntrospected,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::RunStart => "RUN_START",
            Event::RunComplete => "RUN_COMPLETE",
            Event::RunFailed => "RUN_FAILED",
            Event::PhaseStart => "PHASE_START",
            Event::PhaseComplete => "PHASE_COMPLETE",
            Event::DefinitionValid => "DEFINITION_VALID",
            Event::DefinitionRejected => "DEFINITION_REJECTED",
            Event::EngineWait => "ENGINE_WAIT",
            Event::EngineReady => "ENGINE_READY",
            Event::QueryIntrospected => "QUERY_INTROSPECTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
