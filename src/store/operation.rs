//! # Operation Handles
//!
//! Fire-and-forget callers (a button, a keyboard shortcut) still want feedback for
//! *their* call, independent of the shared `loading` flag. An [`OperationHandle`] wraps
//! a spawned store operation and exposes its own tagged status.

use super::error::CartError;
use std::future::Future;
use tokio::sync::watch;

/// Status of one operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OpStatus<T> {
    Pending,
    Ok(T),
    Err(CartError),
}

impl<T> OpStatus<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, OpStatus::Pending)
    }
}

impl<T> From<Result<T, CartError>> for OpStatus<T> {
    fn from(result: Result<T, CartError>) -> Self {
        match result {
            Ok(value) => OpStatus::Ok(value),
            Err(e) => OpStatus::Err(e),
        }
    }
}

/// Handle to an operation running in its own task.
pub struct OperationHandle<T> {
    status: watch::Receiver<OpStatus<T>>,
}

impl<T> OperationHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawns `operation` onto the Tokio runtime.
    pub fn spawn<F>(operation: F) -> Self
    where
        F: Future<Output = Result<T, CartError>> + Send + 'static,
    {
        let (sender, status) = watch::channel(OpStatus::Pending);
        tokio::spawn(async move {
            let _ = sender.send(operation.await.into());
        });
        Self { status }
    }

    /// Current status without waiting.
    pub fn status(&self) -> OpStatus<T> {
        self.status.borrow().clone()
    }

    /// Waits for the operation to settle.
    pub async fn settled(mut self) -> Result<T, CartError> {
        let settled = self.status.wait_for(|status| !status.is_pending()).await;
        let result = match settled.as_deref() {
            Ok(OpStatus::Ok(value)) => Ok(value.clone()),
            Ok(OpStatus::Err(e)) => Err(e.clone()),
            // The task went away before settling.
            Ok(OpStatus::Pending) | Err(_) => Err(CartError::RemoteOperationFailed(
                "operation aborted before settling".to_string(),
            )),
        };
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_handle_reports_pending_then_ok() {
        let (release, gate) = oneshot::channel::<()>();
        let handle = OperationHandle::spawn(async move {
            let _ = gate.await;
            Ok::<_, CartError>(5u32)
        });

        assert_eq!(handle.status(), OpStatus::Pending);
        release.send(()).unwrap();
        assert_eq!(handle.settled().await, Ok(5));
    }

    #[tokio::test]
    async fn test_handle_reports_error() {
        let handle = OperationHandle::<()>::spawn(async {
            Err(CartError::RemoteOperationFailed("nope".into()))
        });

        assert_eq!(
            handle.settled().await,
            Err(CartError::RemoteOperationFailed("nope".into()))
        );
    }
}
