use std::fmt;
use std::time::Duration;

/// Detailed evaluation report returned by
/// [`CompiledExpr::evaluate_detailed()`](super::expr::CompiledExpr::evaluate_detailed)
/// and [`Predicate::test_detailed()`](super::predicate::Predicate::test_detailed).
///
/// Contains the boolean result, the comparisons that ran (in order), the ones
/// that held, and the wall-clock duration of the evaluation.
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    result: bool,
    evaluated: Vec<String>,
    satisfied: Vec<String>,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(
        result: bool,
        evaluated: Vec<String>,
        satisfied: Vec<String>,
        duration: Duration,
    ) -> Self {
        Self {
            result,
            evaluated,
            satisfied,
            duration,
        }
    }

    /// Whether the record matched.
    #[must_use]
    pub fn result(&self) -> bool {
        self.result
    }

    /// Comparisons that were evaluated, in evaluation order.
    /// Comparisons skipped by short-circuiting are absent.
    #[must_use]
    pub fn evaluated(&self) -> &[String] {
        &self.evaluated
    }

    /// Comparisons that evaluated to `true`, in evaluation order.
    #[must_use]
    pub fn satisfied(&self) -> &[String] {
        &self.satisfied
    }

    /// Wall-clock duration of the evaluation.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "result: {}", self.result)?;
        write!(f, ", satisfied: [{}]", self.satisfied.join(", "))?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
