//! All-settle collection of concurrent fetches.

use serde_json::Value;
use settle_core::{FailureReason, Outcome, Reporter, Warning};

use crate::Fetch;

fn cancelled() -> Outcome<Value> {
    Outcome::failure(FailureReason::Network(
        "fetch task was cancelled before settling".to_string(),
    ))
}

/// Fetch every endpoint concurrently and wait for all of them to settle.
///
/// Returns exactly one [`Outcome`] per endpoint, in input order regardless of
/// completion order. Each failure is reported to `reporter` as a
/// [`Warning::FetchFailed`], also in input order. A panic inside a fetch task
/// is resumed on the caller.
pub async fn collect<F, R>(
    fetcher: &F,
    endpoints: &[String],
    reporter: &mut R,
) -> Vec<Outcome<Value>>
where
    F: Fetch,
    R: Reporter + ?Sized,
{
    let mut set = tokio::task::JoinSet::new();

    for (idx, endpoint) in endpoints.iter().enumerate() {
        let fetcher = fetcher.clone();
        let endpoint = endpoint.clone();
        set.spawn(async move {
            let outcome = fetcher.get(&endpoint).await;
            (idx, outcome)
        });
    }

    let mut slots: Vec<Option<Outcome<Value>>> = endpoints.iter().map(|_| None).collect();
    while let Some(res) = set.join_next().await {
        match res {
            Ok((idx, outcome)) => {
                tracing::debug!(
                    endpoint = %endpoints[idx],
                    success = outcome.is_success(),
                    records = outcome.len(),
                    "fetch settled"
                );
                slots[idx] = Some(outcome);
            }
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => tracing::warn!(%e, "fetch task did not complete"),
        }
    }

    let outcomes: Vec<Outcome<Value>> = slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(cancelled))
        .collect();

    for (endpoint, outcome) in endpoints.iter().zip(&outcomes) {
        if let Some(reason) = outcome.reason() {
            reporter.warn(&Warning::FetchFailed {
                endpoint: endpoint.clone(),
                reason: reason.clone(),
            });
        }
    }

    outcomes
}

/// [`collect`] over a fixed number of endpoints, returned as an array.
pub async fn collect_array<F, R, const N: usize>(
    fetcher: &F,
    endpoints: &[String; N],
    reporter: &mut R,
) -> [Outcome<Value>; N]
where
    F: Fetch,
    R: Reporter + ?Sized,
{
    let mut outcomes = collect(fetcher, endpoints, reporter).await.into_iter();
    std::array::from_fn(|_| outcomes.next().unwrap_or_else(cancelled))
}
