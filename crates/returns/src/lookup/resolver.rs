//! Order resolution: drive the query variants until one verified match.

use std::future::Future;

use tracing::debug;

use crate::shopify::AdminError;
use crate::shopify::types::OrderCandidate;

use super::{LookupRequest, NormalizedLookupKey, SearchQuery, generate_queries};

/// Maximum candidates considered per query. The upstream request already
/// asks for at most this many; the cap here guards against a collaborator
/// returning more for a loose query.
pub const CANDIDATE_LIMIT: usize = 5;

/// The order-search collaborator.
///
/// Implemented by the Admin API client in production and by stubs in tests.
/// A call either yields candidates (possibly none) or fails with an error
/// kind; the resolver never inspects failure text.
pub trait OrderSearch {
    /// Execute one search query.
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<OrderCandidate>, AdminError>> + Send;
}

/// The outcome of a lookup.
#[derive(Debug)]
pub enum LookupOutcome {
    /// Exactly one order passed local email verification.
    Resolved(OrderCandidate),
    /// The upstream was reachable but no candidate satisfied the
    /// number + email combination.
    NotFoundOrMismatch,
    /// The request was unusable after normalization; no search was made.
    InvalidInput,
    /// Every query variant failed at the transport/parse/application level.
    /// Carries the last failure kind.
    UpstreamFailure(AdminError),
}

/// Resolve a raw lookup request to a single verified order.
///
/// Queries run strictly sequentially, most specific first, and the loop
/// stops at the first candidate whose order-level or customer email equals
/// the normalized lookup email. The local check runs even when the query
/// already filtered by email - upstream matching is not an authorization
/// boundary, so another customer's order can never be returned.
///
/// A failed search call is recorded and the next, looser variant is tried;
/// the same query is never retried. `UpstreamFailure` is returned only when
/// no query executed cleanly.
pub async fn resolve<S: OrderSearch>(request: &LookupRequest, search: &S) -> LookupOutcome {
    let Ok(key) = NormalizedLookupKey::from_request(request) else {
        return LookupOutcome::InvalidInput;
    };

    resolve_key(&key, search).await
}

async fn resolve_key<S: OrderSearch>(key: &NormalizedLookupKey, search: &S) -> LookupOutcome {
    let mut any_clean_query = false;
    let mut last_failure = None;

    for query in generate_queries(key) {
        match search.search(&query).await {
            Ok(candidates) => {
                any_clean_query = true;

                // First verified candidate wins, preserving upstream order.
                let verified = candidates
                    .into_iter()
                    .take(CANDIDATE_LIMIT)
                    .find(|candidate| candidate.belongs_to(key.email()));

                if let Some(order) = verified {
                    return LookupOutcome::Resolved(order);
                }
            }
            Err(err) => {
                debug!(query = %query, error = %err, "search query failed, trying next variant");
                last_failure = Some(err);
            }
        }
    }

    match (any_clean_query, last_failure) {
        (false, Some(err)) => LookupOutcome::UpstreamFailure(err),
        _ => LookupOutcome::NotFoundOrMismatch,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Deterministic collaborator: pops one scripted response per call,
    /// yielding empty result sets once the script runs out.
    struct StubSearch {
        responses: Mutex<VecDeque<Result<Vec<OrderCandidate>, AdminError>>>,
        calls: AtomicUsize,
    }

    impl StubSearch {
        fn new(responses: Vec<Result<Vec<OrderCandidate>, AdminError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl OrderSearch for StubSearch {
        async fn search(
            &self,
            _query: &SearchQuery,
        ) -> Result<Vec<OrderCandidate>, AdminError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(vec![]))
        }
    }

    fn candidate(id: &str, email: &str) -> OrderCandidate {
        OrderCandidate {
            id: id.to_string(),
            name: "#7518".to_string(),
            email: Some(email.to_string()),
            customer_email: None,
            currency_code: "EUR".to_string(),
            line_items: vec![],
        }
    }

    fn request(email: &str, order_number: &str) -> LookupRequest {
        LookupRequest {
            email: email.to_string(),
            order_number: order_number.to_string(),
        }
    }

    #[tokio::test]
    async fn test_resolves_on_first_query_despite_input_formatting() {
        let search = StubSearch::new(vec![Ok(vec![candidate(
            "order-1",
            "jane@example.com",
        )])]);

        let outcome = resolve(&request("Jane@Example.com ", "#7518"), &search).await;

        match outcome {
            LookupOutcome::Resolved(order) => assert_eq!(order.id, "order-1"),
            other => panic!("expected Resolved, got {other:?}"),
        }
        assert_eq!(search.calls(), 1, "must stop after the first verified match");
    }

    #[tokio::test]
    async fn test_customer_email_match_counts() {
        let order = OrderCandidate {
            email: None,
            customer_email: Some("JANE@EXAMPLE.COM".to_string()),
            ..candidate("order-1", "ignored")
        };
        let search = StubSearch::new(vec![Ok(vec![order])]);

        let outcome = resolve(&request("jane@example.com", "7518"), &search).await;
        assert!(matches!(outcome, LookupOutcome::Resolved(_)));
    }

    #[tokio::test]
    async fn test_email_mismatch_is_never_resolved() {
        // Every query returns the same candidate belonging to someone else
        let search = StubSearch::new(vec![
            Ok(vec![candidate("order-1", "john@example.com")]),
            Ok(vec![candidate("order-1", "john@example.com")]),
            Ok(vec![candidate("order-1", "john@example.com")]),
            Ok(vec![candidate("order-1", "john@example.com")]),
        ]);

        let outcome = resolve(&request("jane@example.com", "7518"), &search).await;

        assert!(matches!(outcome, LookupOutcome::NotFoundOrMismatch));
        assert_eq!(search.calls(), 4, "all variants probed before giving up");
    }

    #[tokio::test]
    async fn test_invalid_input_skips_search_entirely() {
        for (email, number) in [("", "7518"), ("jane@example.com", ""), ("   ", "#"), ("no-at", "7518")] {
            let search = StubSearch::new(vec![]);
            let outcome = resolve(&request(email, number), &search).await;
            assert!(matches!(outcome, LookupOutcome::InvalidInput));
            assert_eq!(search.calls(), 0, "no upstream call for {email:?}/{number:?}");
        }
    }

    #[tokio::test]
    async fn test_falls_back_to_looser_query_after_failure() {
        let search = StubSearch::new(vec![
            Err(AdminError::Status(500)),
            Ok(vec![candidate("order-1", "jane@example.com")]),
        ]);

        let outcome = resolve(&request("jane@example.com", "7518"), &search).await;

        match outcome {
            LookupOutcome::Resolved(order) => assert_eq!(order.id, "order-1"),
            other => panic!("expected Resolved, got {other:?}"),
        }
        assert_eq!(search.calls(), 2);
    }

    #[tokio::test]
    async fn test_all_failures_surface_as_upstream_failure() {
        let search = StubSearch::new(vec![
            Err(AdminError::Status(500)),
            Err(AdminError::Status(502)),
            Err(AdminError::MissingData),
            Err(AdminError::Status(503)),
        ]);

        let outcome = resolve(&request("jane@example.com", "7518"), &search).await;

        // Carries the *last* recorded failure kind
        assert!(matches!(
            outcome,
            LookupOutcome::UpstreamFailure(AdminError::Status(503))
        ));
        assert_eq!(search.calls(), 4);
    }

    #[tokio::test]
    async fn test_mixed_failure_and_clean_empty_is_not_found() {
        let search = StubSearch::new(vec![
            Err(AdminError::Status(500)),
            Ok(vec![]),
            Ok(vec![]),
            Ok(vec![]),
        ]);

        let outcome = resolve(&request("jane@example.com", "7518"), &search).await;
        assert!(matches!(outcome, LookupOutcome::NotFoundOrMismatch));
    }

    #[tokio::test]
    async fn test_first_matching_candidate_wins() {
        let search = StubSearch::new(vec![Ok(vec![
            candidate("order-other", "john@example.com"),
            candidate("order-first-match", "jane@example.com"),
            candidate("order-second-match", "jane@example.com"),
        ])]);

        let outcome = resolve(&request("jane@example.com", "7518"), &search).await;

        match outcome {
            LookupOutcome::Resolved(order) => assert_eq!(order.id, "order-first-match"),
            other => panic!("expected Resolved, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_candidate_limit_applied_locally() {
        // Six candidates, only the sixth matches: the cap must stop the
        // scan before it
        let mut candidates: Vec<OrderCandidate> = (0..5)
            .map(|i| candidate(&format!("order-{i}"), "john@example.com"))
            .collect();
        candidates.push(candidate("order-match", "jane@example.com"));

        let search = StubSearch::new(vec![Ok(candidates), Ok(vec![]), Ok(vec![]), Ok(vec![])]);

        let outcome = resolve(&request("jane@example.com", "7518"), &search).await;
        assert!(matches!(outcome, LookupOutcome::NotFoundOrMismatch));
    }

    #[tokio::test]
    async fn test_idempotent_with_deterministic_stub() {
        let script = || {
            StubSearch::new(vec![
                Err(AdminError::Status(500)),
                Ok(vec![candidate("order-1", "jane@example.com")]),
            ])
        };

        let first = resolve(&request("jane@example.com", "7518"), &script()).await;
        let second = resolve(&request("jane@example.com", "7518"), &script()).await;

        match (first, second) {
            (LookupOutcome::Resolved(a), LookupOutcome::Resolved(b)) => assert_eq!(a, b),
            other => panic!("expected two Resolved outcomes, got {other:?}"),
        }
    }
}
