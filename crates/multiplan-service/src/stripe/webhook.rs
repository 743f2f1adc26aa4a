//! Stripe webhook signature verification.
//!
//! Stripe signs every delivery with the endpoint secret. The `Stripe-Signature`
//! header has the form `t=<unix>,v1=<hex>[,v1=<hex>...]`, and each `v1` value is
//! `hex(HMAC-SHA256(secret, "<t>." + raw_body))`. Verification runs over the raw
//! body bytes before any JSON parsing; re-serialising a parsed body would not
//! reproduce the signed bytes.

use std::fmt;
use std::time::Duration;

use multiplan_core::WebhookEvent;

use crate::crypto::{hmac_sha256_hex, verify_hmac_sha256_hex};

/// Name of the signature header.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Signature scheme this service accepts.
const SIGNATURE_SCHEME: &str = "v1";

/// Default replay window.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

/// Errors from webhook authentication and parsing.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The signature header is missing, malformed, stale, or does not match.
    #[error("invalid webhook signature: {reason}")]
    InvalidSignature {
        /// Why verification failed.
        reason: &'static str,
    },

    /// The body is not a valid event.
    #[error("malformed webhook payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

impl WebhookError {
    const fn invalid(reason: &'static str) -> Self {
        Self::InvalidSignature { reason }
    }
}

/// Parse an event body without authenticating it.
///
/// Only for deployments with no signing secret configured: anyone who can
/// reach the endpoint can forge events.
pub fn parse_event(payload: &[u8]) -> Result<WebhookEvent, WebhookError> {
    Ok(serde_json::from_slice(payload)?)
}

/// Verifies webhook deliveries against the endpoint signing secret.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
    tolerance: Duration,
}

impl fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"[redacted]")
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

impl WebhookVerifier {
    /// Create a verifier for `secret` (`whsec_...`) with the default tolerance.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Set the maximum accepted age of a signature timestamp.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Verify the signature header and parse the event.
    pub fn construct_event(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
    ) -> Result<WebhookEvent, WebhookError> {
        self.construct_event_at(payload, signature_header, chrono::Utc::now().timestamp())
    }

    /// [`construct_event`](Self::construct_event) with an explicit clock.
    pub fn construct_event_at(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
        now: i64,
    ) -> Result<WebhookEvent, WebhookError> {
        let header =
            signature_header.ok_or(WebhookError::invalid("missing signature header"))?;
        self.verify_at(payload, header, now)?;
        parse_event(payload)
    }

    /// Check a signature header against the raw payload.
    pub fn verify_at(&self, payload: &[u8], header: &str, now: i64) -> Result<(), WebhookError> {
        let parsed = SignatureHeader::parse(header)?;

        let timestamp = parsed.timestamp.to_string();
        let signed = [timestamp.as_bytes(), b".".as_slice(), payload];
        if !parsed
            .signatures
            .iter()
            .any(|candidate| verify_hmac_sha256_hex(self.secret.as_bytes(), &signed, candidate))
        {
            return Err(WebhookError::invalid("no signature matches the payload"));
        }

        let tolerance = i64::try_from(self.tolerance.as_secs()).unwrap_or(i64::MAX);
        if now.saturating_sub(parsed.timestamp) > tolerance {
            return Err(WebhookError::invalid("timestamp outside the tolerance zone"));
        }

        Ok(())
    }

    /// Build a signature header for `payload` at `timestamp`.
    ///
    /// Used by tests and local tooling to produce deliveries this verifier accepts.
    #[must_use]
    pub fn sign(&self, payload: &[u8], timestamp: i64) -> String {
        format!(
            "t={timestamp},{SIGNATURE_SCHEME}={}",
            self.signature(timestamp, payload)
        )
    }

    fn signature(&self, timestamp: i64, payload: &[u8]) -> String {
        let timestamp = timestamp.to_string();
        hmac_sha256_hex(
            self.secret.as_bytes(),
            &[timestamp.as_bytes(), b".".as_slice(), payload],
        )
    }
}

/// A parsed `Stripe-Signature` header.
struct SignatureHeader<'a> {
    timestamp: i64,
    signatures: Vec<&'a str>,
}

impl<'a> SignatureHeader<'a> {
    fn parse(header: &'a str) -> Result<Self, WebhookError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for part in header.split(',') {
            let Some((key, value)) = part.trim().split_once('=') else {
                continue;
            };
            match key {
                "t" => timestamp = value.parse::<i64>().ok(),
                SIGNATURE_SCHEME => signatures.push(value),
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or(WebhookError::invalid("unable to extract timestamp from header"))?;

        if signatures.is_empty() {
            return Err(WebhookError::invalid(
                "no signatures found with expected scheme",
            ));
        }

        Ok(Self {
            timestamp,
            signatures,
        })
    }
}
