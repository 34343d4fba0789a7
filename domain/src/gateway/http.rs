//! Retrying HTTP client shared by outbound gateways.

use std::time::Duration;

use async_trait::async_trait;
use http::Extensions;
use log::*;
use reqwest::header::RETRY_AFTER;
use reqwest::{Request, Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, Next};
use reqwest_retry::{default_on_request_failure, default_on_request_success, Retryable};

/// How long to wait between attempts at a model call.
///
/// The delay doubles per retry from `base_delay`. A 429's `retry-after` wins
/// when it asks for longer. Every delay is capped at `max_delay`.
#[derive(Debug, Clone, Copy)]
pub struct RetryAfterPolicy {
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl RetryAfterPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }

    /// Delay before the retry following `n_past_retries` earlier retries.
    pub fn delay(&self, n_past_retries: u32, retry_after: Option<Duration>) -> Duration {
        let backoff = self
            .base_delay
            .saturating_mul(2_u32.saturating_pow(n_past_retries));
        backoff
            .max(retry_after.unwrap_or_default())
            .min(self.max_delay)
    }

    /// Upper bound on the time spent sleeping across all retries of one call.
    pub fn max_total_delay(&self) -> Duration {
        self.max_delay.saturating_mul(self.max_retries)
    }
}

/// Retries transient failures (connection errors, timeouts, 408, 429 and 5xx)
/// as classified by `reqwest_retry`, sleeping per `RetryAfterPolicy`.
pub struct RetryAfterMiddleware {
    policy: RetryAfterPolicy,
}

impl RetryAfterMiddleware {
    pub fn new(policy: RetryAfterPolicy) -> Self {
        Self { policy }
    }
}

// Only the delta-seconds form; HTTP dates fall back to the backoff.
fn retry_after(response: &Response) -> Option<Duration> {
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return None;
    }
    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[async_trait]
impl Middleware for RetryAfterMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let mut n_past_retries = 0;
        loop {
            // Streaming bodies can't be replayed
            let Some(attempt) = req.try_clone() else {
                return next.run(req, extensions).await;
            };

            let result = next.clone().run(attempt, extensions).await;
            let retryable = match &result {
                Ok(response) => default_on_request_success(response),
                Err(err) => default_on_request_failure(err),
            };

            if !matches!(retryable, Some(Retryable::Transient))
                || n_past_retries >= self.policy.max_retries
            {
                return result;
            }

            let delay = self
                .policy
                .delay(n_past_retries, result.as_ref().ok().and_then(retry_after));
            warn!(
                "Transient failure calling {}, retry {} of {} in {}s",
                req.url().path(),
                n_past_retries + 1,
                self.policy.max_retries,
                delay.as_secs_f64()
            );
            tokio::time::sleep(delay).await;
            n_past_retries += 1;
        }
    }
}

/// Builds a rustls `reqwest` client with a per-request `timeout`, wrapped in
/// retry middleware that gives up after `max_retries` retries.
pub fn build_retrying_client(
    timeout: Duration,
    max_retries: u32,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let client = reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(timeout)
        .user_agent(format!("intake-platform/{}", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(ClientBuilder::new(client)
        .with(RetryAfterMiddleware::new(RetryAfterPolicy::new(
            max_retries,
        )))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn backoff_doubles_per_retry() {
        let policy = RetryAfterPolicy::new(3);

        assert_eq!(policy.delay(0, None), Duration::from_secs(1));
        assert_eq!(policy.delay(1, None), Duration::from_secs(2));
        assert_eq!(policy.delay(2, None), Duration::from_secs(4));
    }

    #[test]
    fn longer_retry_after_wins_over_backoff() {
        let policy = RetryAfterPolicy::new(3);

        assert_eq!(
            policy.delay(0, Some(Duration::from_secs(30))),
            Duration::from_secs(30)
        );
        assert_eq!(
            policy.delay(2, Some(Duration::from_secs(1))),
            Duration::from_secs(4)
        );
    }

    #[test]
    fn delays_are_capped() {
        let policy = RetryAfterPolicy::new(10);

        assert_eq!(policy.delay(10, None), Duration::from_secs(60));
        assert_eq!(
            policy.delay(0, Some(Duration::from_secs(3600))),
            Duration::from_secs(60)
        );
        assert_eq!(policy.delay(u32::MAX, None), Duration::from_secs(60));
    }

    #[test]
    fn total_delay_covers_every_capped_retry() {
        assert_eq!(
            RetryAfterPolicy::new(3).max_total_delay(),
            Duration::from_secs(180)
        );
        assert_eq!(RetryAfterPolicy::new(0).max_total_delay(), Duration::ZERO);
    }

    #[tokio::test]
    async fn rate_limited_retry_waits_for_retry_after() {
        let mut server = mockito::Server::new_async().await;
        let limited = server
            .mock("GET", "/limited")
            .with_status(429)
            .with_header("retry-after", "2")
            .expect(2)
            .create_async()
            .await;

        let client = build_retrying_client(Duration::from_secs(5), 1).unwrap();
        let started = Instant::now();
        let response = client
            .get(format!("{}/limited", server.url()))
            .send()
            .await
            .unwrap();

        // Backoff alone would have retried after one second.
        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        limited.assert_async().await;
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let rejected = server
            .mock("GET", "/rejected")
            .with_status(400)
            .expect(1)
            .create_async()
            .await;

        let client = build_retrying_client(Duration::from_secs(5), 3).unwrap();
        let response = client
            .get(format!("{}/rejected", server.url()))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        rejected.assert_async().await;
    }
}
