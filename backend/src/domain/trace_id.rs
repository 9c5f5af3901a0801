//! Correlation id shared by a request's log line, its error payload and the
//! `trace-id` response header.
//!
//! The id sits in a task-local slot while the request is served. Work moved
//! onto another task does not see it unless wrapped in [`TraceId::in_scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

/// Response header naming the request's [`TraceId`].
pub const TRACE_ID_HEADER: &str = "trace-id";

tokio::task_local! {
    static ACTIVE: TraceId;
}

/// Identifier of the request currently being served.
///
/// # Examples
/// ```
/// use gadget_registry::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "6f1c2a4e-8d3b-4a57-9c0e-2b7d5e9f1a3c".parse().expect("uuid");
/// let seen = id.in_scope(async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// assert_eq!(TraceId::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    /// The id of the enclosing request, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        ACTIVE.try_with(|id| *id).ok()
    }

    /// Run `work` with `self` as the current id.
    pub async fn in_scope<F: Future>(self, work: F) -> F::Output {
        ACTIVE.scope(self, work).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::Error;

    #[tokio::test]
    async fn gadget_errors_raised_in_a_request_carry_its_id() {
        let id = TraceId::fresh();

        let error = id
            .in_scope(async { Error::not_found("gadget not found") })
            .await;

        assert_eq!(error.trace_id(), Some(id.to_string().as_str()));
    }

    #[tokio::test]
    async fn inner_scope_shadows_outer_until_it_ends() {
        let outer = TraceId::fresh();
        let inner = TraceId::fresh();

        let (seen_inner, seen_after) = outer
            .in_scope(async move {
                let seen_inner = inner.in_scope(async { TraceId::current() }).await;
                (seen_inner, TraceId::current())
            })
            .await;

        assert_eq!(seen_inner, Some(inner));
        assert_eq!(seen_after, Some(outer));
    }

    #[tokio::test]
    async fn spawned_tasks_do_not_inherit_the_id() {
        let id = TraceId::fresh();

        let seen = id
            .in_scope(async { tokio::spawn(async { TraceId::current() }).await })
            .await
            .expect("task joins");

        assert_eq!(seen, None);
    }

    #[rstest]
    fn header_text_parses_back_to_the_same_id() {
        let id = TraceId::fresh();
        let text = id.to_string();

        assert_eq!(text.len(), 36);
        assert_eq!(text.parse::<TraceId>().expect("uuid"), id);
    }

    #[rstest]
    #[case("")]
    #[case("gadget-42")]
    fn non_uuid_header_text_is_rejected(#[case] text: &str) {
        assert!(text.parse::<TraceId>().is_err());
    }
}
