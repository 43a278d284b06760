//! Request-scoped load boundary
//!
//! Each page load (one HTTP request) owns a [`LoadBoundary`]. Every
//! collaborator call made for that page runs inside it, and tearing the
//! boundary down cancels whatever is still in flight so late results are
//! never written anywhere.

use std::future::Future;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    #[error("Load cancelled")]
    Cancelled,
}

/// Owner of the cancellation scope for one page load
#[derive(Debug, Default)]
pub struct LoadBoundary {
    cancel: CancellationToken,
}

impl LoadBoundary {
    pub fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
        }
    }

    /// A handle observing this boundary. Cancelling it cancels the boundary.
    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` until it completes or the boundary is torn down
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, LoadError>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!("Load abandoned by boundary teardown");
                Err(LoadError::Cancelled)
            }
            out = fut => Ok(out),
        }
    }

    /// Run the session check and the page's data fetch concurrently.
    ///
    /// The two results land in separate slots; neither observes the other.
    pub async fn load_page<S, D>(
        &self,
        session: S,
        data: D,
    ) -> Result<(S::Output, D::Output), LoadError>
    where
        S: Future,
        D: Future,
    {
        self.run(async { tokio::join!(session, data) }).await
    }
}

impl Drop for LoadBoundary {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
