use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::{ArenaError, BoxError, CancelReason, Result};

/// Effective cancellation signal for one attempt.
///
/// Merges the caller's token with the configured timeout into a fresh token
/// owned by the attempt. The caller's token is only watched while
/// [`AttemptSignal::guard`] runs, so nothing links the two once the attempt
/// ends, whichever way it ends. The timer only lives inside `guard` as well.
#[derive(Debug)]
pub(crate) struct AttemptSignal {
    token: CancellationToken,
    external: Option<CancellationToken>,
    timeout: Option<Duration>,
}

impl AttemptSignal {
    /// Returns `None` when there is neither an external token nor a timeout.
    pub(crate) fn compose(
        external: Option<&CancellationToken>,
        timeout: Option<Duration>,
    ) -> Option<Self> {
        if external.is_none() && timeout.is_none() {
            return None;
        }

        let token = CancellationToken::new();
        if external.is_some_and(CancellationToken::is_cancelled) {
            token.cancel();
        }
        Some(Self {
            token,
            external: external.cloned(),
            timeout,
        })
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Runs one transport exchange under this signal.
    ///
    /// A transport error observed after the signal fired is reported as a
    /// cancellation.
    pub(crate) async fn guard<F, T>(&self, exchange: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, BoxError>>,
    {
        let external = async {
            match &self.external {
                Some(external) => external.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };
        let timer = async {
            match self.timeout {
                Some(timeout) => tokio::time::sleep(timeout).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(ArenaError::Cancelled(CancelReason::Caller)),
            () = external => {
                self.token.cancel();
                Err(ArenaError::Cancelled(CancelReason::Caller))
            }
            () = timer => {
                self.token.cancel();
                Err(ArenaError::Cancelled(CancelReason::Timeout))
            }
            result = exchange => result.map_err(|err| {
                if self.token.is_cancelled() {
                    ArenaError::Cancelled(CancelReason::Caller)
                } else {
                    ArenaError::Transport(err)
                }
            }),
        }
    }
}
