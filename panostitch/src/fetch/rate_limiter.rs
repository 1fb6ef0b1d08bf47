//! Token-bucket request rate limiter.
//!
//! Admits at most `burst` requests immediately and then one request per
//! `interval`. The limiter is an explicit capability: callers share a single
//! `Arc<RateLimiter>` across every fetch path so the global rate holds no
//! matter how many workers are issuing requests.
//!
//! The bucket is tracked as a theoretical arrival time (GCRA). Each admission
//! reserves the next slot under a short lock and then sleeps outside the
//! lock until that slot opens. A cancelled wait hands its slot back when no
//! later reservation has been stacked on top of it.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use panostitch::fetch::RateLimiter;
//! use tokio_util::sync::CancellationToken;
//!
//! let limiter = Arc::new(RateLimiter::new(Duration::from_millis(200), 1));
//! let cancel = CancellationToken::new();
//!
//! limiter.acquire(&cancel).await?;
//! // HTTP request happens here...
//! ```

use super::FetchError;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Longest spacing the limiter accepts between admissions.
pub const MAX_INTERVAL: Duration = Duration::from_secs(3600);

/// Largest burst the limiter accepts.
pub const MAX_BURST: u32 = 1000;

/// Shared limiter admitting one request per interval with a bounded burst.
#[derive(Debug)]
pub struct RateLimiter {
    /// Minimum spacing between admissions once the burst is spent
    interval: Duration,

    /// Number of requests that may be admitted back to back
    burst: u32,

    /// Theoretical arrival time of the next admission
    next_slot: Mutex<Option<Instant>>,

    /// Total admissions granted (for logging)
    admitted: AtomicU64,
}

impl RateLimiter {
    /// Creates a new limiter.
    ///
    /// # Arguments
    ///
    /// * `interval` - Minimum spacing between requests
    /// * `burst` - Requests admitted without waiting when the bucket is full
    ///
    /// `interval` is capped at [`MAX_INTERVAL`] and `burst` is clamped to
    /// `1..=MAX_BURST`, which keeps every slot computation inside the range
    /// of [`Instant`].
    pub fn new(interval: Duration, burst: u32) -> Self {
        Self {
            interval: interval.min(MAX_INTERVAL),
            burst: burst.clamp(1, MAX_BURST),
            next_slot: Mutex::new(None),
            admitted: AtomicU64::new(0),
        }
    }

    /// Waits until the limiter admits one request.
    ///
    /// The wait is cooperative and ends early with [`FetchError::Cancelled`]
    /// if `cancel` fires first.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), FetchError> {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        let (admit_at, reserved) = self.reserve(Instant::now());
        let now = Instant::now();

        if admit_at > now {
            trace!(
                wait_ms = (admit_at - now).as_millis() as u64,
                "Waiting for rate limiter admission"
            );

            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    self.release(reserved);
                    return Err(FetchError::Cancelled);
                }

                _ = tokio::time::sleep_until(admit_at) => {}
            }
        }

        self.admitted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Returns the configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the configured burst size.
    pub fn burst(&self) -> u32 {
        self.burst
    }

    /// Returns how many requests have been admitted so far.
    pub fn admitted(&self) -> u64 {
        self.admitted.load(Ordering::Relaxed)
    }

    /// Reserves the next slot and returns (admission instant, reserved tat).
    fn reserve(&self, now: Instant) -> (Instant, Instant) {
        let mut next_slot = self.next_slot.lock();

        let tat = next_slot.map_or(now, |t| t.max(now));
        let admit_at = self.earliest_admission(tat, now);
        let reserved = tat + self.interval;
        *next_slot = Some(reserved);

        (admit_at, reserved)
    }

    /// Returns a cancelled reservation to the bucket if it is still the latest.
    fn release(&self, reserved: Instant) {
        let mut next_slot = self.next_slot.lock();
        if *next_slot == Some(reserved) {
            *next_slot = reserved.checked_sub(self.interval);
        }
    }

    fn earliest_admission(&self, tat: Instant, now: Instant) -> Instant {
        let window = self.interval * (self.burst - 1);
        tat.checked_sub(window).unwrap_or(now).max(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_limiter() {
        let limiter = RateLimiter::new(Duration::from_millis(200), 1);
        assert_eq!(limiter.interval(), Duration::from_millis(200));
        assert_eq!(limiter.burst(), 1);
        assert_eq!(limiter.admitted(), 0);
    }

    #[test]
    fn test_out_of_range_settings_are_clamped() {
        let limiter = RateLimiter::new(Duration::from_millis(u64::MAX), 0);
        assert_eq!(limiter.interval(), MAX_INTERVAL);
        assert_eq!(limiter.burst(), 1);

        let limiter = RateLimiter::new(Duration::from_millis(200), u32::MAX);
        assert_eq!(limiter.burst(), MAX_BURST);
    }

    #[tokio::test]
    async fn test_huge_interval_admits_first_request() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_millis(u64::MAX), u32::MAX));
        let cancel = CancellationToken::new();

        limiter.acquire(&cancel).await.unwrap();
        assert_eq!(limiter.admitted(), 1);

        // A later caller waits on a capped slot and can still be cancelled
        let waiter = {
            let limiter = Arc::clone(&limiter);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                for _ in 0..MAX_BURST {
                    limiter.acquire(&cancel).await?;
                }
                Ok::<(), FetchError>(())
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .expect("cancelled wait should return promptly")
            .unwrap();
        assert!(matches!(result, Err(FetchError::Cancelled)));
    }

    #[tokio::test]
    async fn test_first_request_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(10), 1);
        let cancel = CancellationToken::new();

        let start = std::time::Instant::now();
        limiter.acquire(&cancel).await.unwrap();
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(limiter.admitted(), 1);
    }

    #[tokio::test]
    async fn test_sequential_admissions_are_spaced() {
        let interval = Duration::from_millis(40);
        let limiter = RateLimiter::new(interval, 1);
        let cancel = CancellationToken::new();
        let n = 5;

        let start = std::time::Instant::now();
        for _ in 0..n {
            limiter.acquire(&cancel).await.unwrap();
        }

        assert!(start.elapsed() >= interval * (n - 1));
        assert_eq!(limiter.admitted(), n as u64);
    }

    #[tokio::test]
    async fn test_burst_admits_back_to_back() {
        let limiter = RateLimiter::new(Duration::from_secs(10), 3);
        let cancel = CancellationToken::new();

        let start = std::time::Instant::now();
        for _ in 0..3 {
            limiter.acquire(&cancel).await.unwrap();
        }
        assert!(start.elapsed() < Duration::from_secs(1));

        // The fourth request would have to wait for the next interval
        let (admit_at, _) = limiter.reserve(Instant::now());
        assert!(admit_at > Instant::now() + Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_cancelled_before_wait() {
        let limiter = RateLimiter::new(Duration::from_millis(10), 1);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = limiter.acquire(&cancel).await;
        assert!(matches!(result, Err(FetchError::Cancelled)));
        assert_eq!(limiter.admitted(), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_wait() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(30), 1));
        let cancel = CancellationToken::new();

        limiter.acquire(&cancel).await.unwrap();

        let waiter = {
            let limiter = Arc::clone(&limiter);
            let cancel = cancel.clone();
            tokio::spawn(async move { limiter.acquire(&cancel).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .expect("cancelled wait should return promptly")
            .unwrap();
        assert!(matches!(result, Err(FetchError::Cancelled)));
        assert_eq!(limiter.admitted(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_slot_is_returned() {
        let limiter = RateLimiter::new(Duration::from_millis(50), 1);
        let cancel = CancellationToken::new();
        limiter.acquire(&cancel).await.unwrap();

        let (_, reserved) = limiter.reserve(Instant::now());
        limiter.release(reserved);

        // Only the first admission's slot remains reserved
        assert_eq!(
            *limiter.next_slot.lock(),
            reserved.checked_sub(limiter.interval())
        );
    }

    #[tokio::test]
    async fn test_shared_limiter_spaces_concurrent_callers() {
        let interval = Duration::from_millis(30);
        let limiter = Arc::new(RateLimiter::new(interval, 1));
        let cancel = CancellationToken::new();
        let mut handles = Vec::new();

        let start = std::time::Instant::now();
        for _ in 0..4 {
            let limiter = Arc::clone(&limiter);
            let cancel = cancel.clone();
            handles.push(tokio::spawn(
                async move { limiter.acquire(&cancel).await },
            ));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert!(start.elapsed() >= interval * 3);
        assert_eq!(limiter.admitted(), 4);
    }
}
