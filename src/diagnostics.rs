// filepath: src/diagnostics.rs
//! Diagnostic reporting
//!
//! Out-of-bounds accesses, rejected paths and lifecycle events are reported as
//! structured values. Reporting is observational only; nothing branches on it.

use std::cell::RefCell;
use std::fmt;

use log::{error, info};

/// Which pixel operation hit the surface edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelOp {
    SetPixel,
    GetPixel,
}

impl fmt::Display for PixelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelOp::SetPixel => write!(f, "setPixel"),
            PixelOp::GetPixel => write!(f, "getPixel"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    OutOfBounds { op: PixelOp, x: i32, y: i32 },
    MalformedPath { len: usize },
    Reset,
    Run { routine: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::OutOfBounds { op, x, y } => {
                write!(f, "ERROR: {} out of bounds {{ x: {}, y: {} }}", op, x, y)
            }
            Diagnostic::MalformedPath { len } => {
                write!(f, "ERROR: addPoly malformed path ({} values)", len)
            }
            Diagnostic::Reset => write!(f, "RESET"),
            Diagnostic::Run { routine } => write!(f, "RUN {}", routine),
        }
    }
}

/// Receiver for diagnostics.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::OutOfBounds { .. } | Diagnostic::MalformedPath { .. } => {
                error!("{}", diagnostic)
            }
            Diagnostic::Reset | Diagnostic::Run { .. } => info!("{}", diagnostic),
        }
    }
}

/// Keeps every diagnostic in memory, for hosts that display them and for tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        log::debug!("collected diagnostic: {}", diagnostic);
        self.entries.borrow_mut().push(diagnostic);
    }
}
