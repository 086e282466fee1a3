use std::time::{Duration, Instant};

use crate::error::{EngineError, Result};

/// Overall processing deadline supplied by the caller
///
/// Frame and sample loops poll this cooperatively and abort with a fatal
/// `Timeout` rather than hanging past the caller's budget.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// A deadline `budget` from now
    pub fn from_now(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    /// Has the deadline passed?
    pub fn expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Error out of the current phase if the deadline has passed
    pub fn check(&self, phase: &'static str) -> Result<()> {
        if self.expired() {
            Err(EngineError::Timeout { phase })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_deadline_passes() {
        let deadline = Deadline::from_now(Duration::from_secs(60));
        assert!(!deadline.expired());
        assert!(deadline.check("test").is_ok());
    }

    #[test]
    fn test_elapsed_deadline_errors_with_phase() {
        let deadline = Deadline::from_now(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));
        assert!(deadline.expired());

        match deadline.check("motion extraction") {
            Err(EngineError::Timeout { phase }) => assert_eq!(phase, "motion extraction"),
            other => panic!("expected timeout, got {:?}", other.map(|_| ())),
        }
    }
}
