//! Service configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use multiplan_core::PlanAllowList;

use crate::stripe::DEFAULT_TOLERANCE;

/// Service configuration loaded once at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:4242").
    pub listen_addr: String,

    /// Directory holding `index.html` and the client assets.
    pub static_dir: PathBuf,

    /// Stripe secret API key.
    pub stripe_secret_key: Option<String>,

    /// Stripe publishable key handed to the browser.
    pub stripe_publishable_key: Option<String>,

    /// Stripe webhook signing secret. `None` disables signature verification.
    pub stripe_webhook_secret: Option<String>,

    /// Maximum age of a webhook signature timestamp.
    pub webhook_tolerance: Duration,

    /// Coupon applied to multi-plan subscriptions.
    pub coupon_id: Option<String>,

    /// Plans customers may subscribe to.
    pub plans: PlanAllowList,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Stripe secrets file structure.
#[derive(Debug, Deserialize)]
struct StripeSecrets {
    secret_key: String,
    #[serde(default)]
    publishable_key: Option<String>,
    #[serde(default)]
    webhook_secret: Option<String>,
}

/// Stripe keys resolved from a secrets file or the environment.
#[derive(Debug, Default)]
struct StripeKeys {
    secret_key: Option<String>,
    publishable_key: Option<String>,
    webhook_secret: Option<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let stripe = load_stripe_secrets();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            static_dir: env_non_empty("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            stripe_secret_key: stripe.secret_key,
            stripe_publishable_key: stripe.publishable_key,
            stripe_webhook_secret: stripe.webhook_secret,
            webhook_tolerance: std::env::var("WEBHOOK_TOLERANCE_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map_or(defaults.webhook_tolerance, Duration::from_secs),
            coupon_id: env_non_empty("COUPON_ID"),
            plans: std::env::var("VALID_PLAN_IDS")
                .map(|s| PlanAllowList::from_csv(&s))
                .unwrap_or_default(),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }
}

/// Read an environment variable, treating an empty value as unset.
fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load Stripe keys from file or environment.
fn load_stripe_secrets() -> StripeKeys {
    let secret_paths = [".secrets/stripe.json", "../.secrets/stripe.json"];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<StripeSecrets>(path) {
            tracing::info!(path = %path, "Loaded Stripe secrets from file");
            return StripeKeys {
                secret_key: Some(secrets.secret_key).filter(|s| !s.is_empty()),
                publishable_key: secrets.publishable_key.filter(|s| !s.is_empty()),
                webhook_secret: secrets.webhook_secret.filter(|s| !s.is_empty()),
            };
        }
    }

    // Fall back to environment variables. Older deployments name the secret
    // key STRIPE_API_KEY.
    tracing::debug!("Stripe secrets file not found, using environment variables");
    StripeKeys {
        secret_key: env_non_empty("STRIPE_SECRET_KEY").or_else(|| env_non_empty("STRIPE_API_KEY")),
        publishable_key: env_non_empty("STRIPE_PUBLISHABLE_KEY"),
        webhook_secret: env_non_empty("STRIPE_WEBHOOK_SECRET"),
    }
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:4242".into(),
            static_dir: PathBuf::from("client"),
            stripe_secret_key: None,
            stripe_publishable_key: None,
            stripe_webhook_secret: None,
            webhook_tolerance: DEFAULT_TOLERANCE,
            coupon_id: None,
            plans: PlanAllowList::default(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
