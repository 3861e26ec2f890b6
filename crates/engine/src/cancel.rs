// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative cancellation around suspension points

use crate::EngineError;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Run `fut` unless `token` is cancelled before or while it is pending.
///
/// On cancellation the future is dropped without being polled further.
pub async fn guarded<F, T>(token: &CancellationToken, fut: F) -> Result<T, EngineError>
where
    F: Future<Output = T>,
{
    if token.is_cancelled() {
        return Err(EngineError::Cancelled);
    }
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(EngineError::Cancelled),
        value = fut => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn completes_when_not_cancelled() {
        let token = CancellationToken::new();
        let value = guarded(&token, async { 7 }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn refuses_to_start_after_cancel() {
        let token = CancellationToken::new();
        token.cancel();
        let polled = std::sync::atomic::AtomicBool::new(false);
        let result = guarded(&token, async {
            polled.store(true, std::sync::atomic::Ordering::SeqCst);
        })
        .await;
        assert!(matches!(result, Err(EngineError::Cancelled)));
        assert!(!polled.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn abandons_pending_future_on_cancel() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            canceller.cancel();
        });

        let result = guarded(&token, std::future::pending::<()>()).await;
        assert!(matches!(result, Err(EngineError::Cancelled)));
    }
}
