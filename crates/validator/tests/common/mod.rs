//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use fieldcheck_validator::foundation::{Validate, ValidationError};
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly subscriber once; later calls are no-ops.
///
/// `RUST_LOG` overrides the default `fieldcheck_validator=debug` filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fieldcheck_validator=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// A rule that records how often it ran.
#[derive(Debug, Clone)]
pub struct Spy {
    code: &'static str,
    passes: bool,
    calls: Arc<AtomicUsize>,
}

impl Spy {
    pub fn passing(code: &'static str) -> Self {
        Self {
            code,
            passes: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(code: &'static str) -> Self {
        Self {
            passes: false,
            ..Self::passing(code)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Validate for Spy {
    type Input = str;

    fn validate(&self, _input: &str) -> Result<(), ValidationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.passes {
            Ok(())
        } else {
            Err(ValidationError::new(self.code, format!("{} failed", self.code)))
        }
    }
}
