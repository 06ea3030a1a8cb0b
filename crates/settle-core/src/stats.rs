//! Numeric and status reductions.
//!
//! Only finite real numbers are summable. `NaN`, infinities, numeric-looking
//! strings and every other non-number are skipped, never coerced. No reduction
//! here divides by zero: an average over nothing is `None`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sum the finite values, skipping `NaN` and `±∞`. Empty input sums to `0.0`.
pub fn finite_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().filter(|v| v.is_finite()).sum()
}

/// Sum the finite JSON numbers in `values`. Strings, booleans, nulls, arrays
/// and objects contribute nothing.
pub fn finite_sum_json<'a>(values: impl IntoIterator<Item = &'a Value>) -> f64 {
    finite_sum(values.into_iter().filter_map(Value::as_f64))
}

/// Mean of the finite values, or `None` when there are none.
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.into_iter().fold((0.0, 0), accumulate);
    (count > 0).then(|| sum / count as f64)
}

/// Running `(sum, count)` over finite values.
fn accumulate((sum, count): (f64, u64), value: f64) -> (f64, u64) {
    if value.is_finite() {
        (sum + value, count + 1)
    } else {
        (sum, count)
    }
}

// ---------------------------------------------------------------------------
// Status summary
// ---------------------------------------------------------------------------

/// Outcome status of one test run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
    /// Any other status string. Counted toward `total` only.
    #[serde(untagged)]
    Other(String),
}

/// One test result as reported by a test runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TestResult {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    pub status: TestStatus,
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Reduction of a set of [`TestResult`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatusSummary {
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub total: u64,
    /// Mean duration of passed tests; `None` when nothing passed.
    pub avg_passed_duration: Option<f64>,
    pub failed_ids: Vec<i64>,
}

/// Count statuses in a single pass and derive the passed-duration average.
#[must_use]
pub fn summarize(results: &[TestResult]) -> StatusSummary {
    let mut summary = StatusSummary::default();
    let mut passed_durations = Vec::new();

    for result in results {
        summary.total += 1;
        match result.status {
            TestStatus::Passed => {
                summary.passed += 1;
                passed_durations.extend(result.duration);
            }
            TestStatus::Failed => {
                summary.failed += 1;
                summary.failed_ids.extend(result.id);
            }
            TestStatus::Skipped => summary.skipped += 1,
            TestStatus::Other(_) => {}
        }
    }

    summary.avg_passed_duration = mean(passed_durations);
    summary
}
