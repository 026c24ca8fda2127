use chrono::prelude::*;

use crate::api::FetchError;

/// One request/answer exchange with the solver service. At most one request
/// is in flight per page; submit controls disable while `Pending`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SolveSession<T> {
    Idle,
    Pending {
        requested_at: DateTime<Utc>,
    },
    Done {
        requested_at: DateTime<Utc>,
        answered_at: DateTime<Utc>,
        result: Result<T, FetchError>,
    },
}

impl<T> SolveSession<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Marks the session pending. Refused while a request is already in
    /// flight; the caller skips the submit in that case.
    pub fn begin(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = Self::Pending { requested_at: now };
        true
    }

    pub fn finish(&mut self, now: DateTime<Utc>, result: Result<T, FetchError>) {
        let Self::Pending { requested_at } = *self else {
            log::warn!("solver reply arrived with no request pending, dropping");
            return;
        };
        *self = Self::Done {
            requested_at,
            answered_at: now,
            result,
        };
    }

    pub fn result(&self) -> Option<&Result<T, FetchError>> {
        match self {
            Self::Done { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn answer(&self) -> Option<&T> {
        self.result().and_then(|result| result.as_ref().ok())
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.result().and_then(|result| result.as_ref().err())
    }

    pub fn latency_ms(&self) -> Option<i64> {
        match self {
            Self::Done {
                requested_at,
                answered_at,
                ..
            } => Some((*answered_at - *requested_at).num_milliseconds().max(0)),
            _ => None,
        }
    }
}

impl<T> Default for SolveSession<T> {
    fn default() -> Self {
        Self::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(millis: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(millis).unwrap()
    }

    #[test]
    fn begin_refuses_while_pending() {
        let mut session = SolveSession::<u32>::default();

        assert!(session.begin(t(0)));
        assert!(!session.begin(t(10)));
        assert!(session.is_pending());
    }

    #[test]
    fn finish_records_the_answer_and_latency() {
        let mut session = SolveSession::default();
        session.begin(t(0));
        session.finish(t(340), Ok(7u32));

        assert_eq!(session.answer(), Some(&7));
        assert_eq!(session.error(), None);
        assert_eq!(session.latency_ms(), Some(340));
    }

    #[test]
    fn finish_records_failures() {
        let mut session = SolveSession::<u32>::default();
        session.begin(t(0));
        session.finish(t(20), Err(FetchError::Status(500)));

        assert_eq!(session.answer(), None);
        assert_eq!(session.error(), Some(&FetchError::Status(500)));
    }

    #[test]
    fn stray_finish_is_dropped() {
        let mut session = SolveSession::<u32>::default();
        session.finish(t(5), Ok(1));

        assert_eq!(session, SolveSession::Idle);
    }

    #[test]
    fn latency_never_goes_negative() {
        let mut session = SolveSession::default();
        session.begin(t(100));
        session.finish(t(40), Ok(1u32));

        assert_eq!(session.latency_ms(), Some(0));
    }

    #[test]
    fn begin_after_done_starts_a_fresh_exchange() {
        let mut session = SolveSession::default();
        session.begin(t(0));
        session.finish(t(10), Ok(1u32));

        assert!(session.begin(t(20)));
        assert_eq!(session.result(), None);
    }
}
