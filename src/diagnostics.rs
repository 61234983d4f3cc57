//! Optional diagnostics.
//!
//! Displacement itself performs no I/O. Callers who want to observe it attach
//! a [`DiagnosticHook`]; [`LogHook`] forwards events to the `log` facade.

use std::fmt;

/// Something worth reporting from a displacement run.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    /// A group was laid out on a ring.
    GroupPlaced { members: usize, ring_radius: f64 },
    /// A refresh published a new snapshot.
    Refreshed {
        groups: usize,
        displaced: usize,
        singles: usize,
        resolution: f64,
    },
    /// Published output was discarded.
    Cleared,
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticEvent::GroupPlaced { members, ring_radius } => {
                write!(f, "placed {members} members on ring of radius {ring_radius:.2}px")
            }
            DiagnosticEvent::Refreshed { groups, displaced, singles, resolution } => write!(
                f,
                "refreshed: {groups} groups, {displaced} displaced, {singles} single (resolution {resolution})"
            ),
            DiagnosticEvent::Cleared => f.write_str("cleared"),
        }
    }
}

/// Receiver for [`DiagnosticEvent`]s.
pub trait DiagnosticHook {
    fn on_event(&self, event: &DiagnosticEvent);
}

impl<F: Fn(&DiagnosticEvent)> DiagnosticHook for F {
    fn on_event(&self, event: &DiagnosticEvent) {
        self(event)
    }
}

/// Forwards events to the `log` crate under the `displace` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHook;

impl DiagnosticHook for LogHook {
    fn on_event(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::GroupPlaced { .. } => log::trace!(target: "displace", "{event}"),
            _ => log::debug!(target: "displace", "{event}"),
        }
    }
}
