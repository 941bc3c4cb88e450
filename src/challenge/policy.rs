//! Challenge policy: attempt cap, code shape, expiry, and delivery bounds.
//!
//! Every knob is an explicit parameter passed to the define and issue steps;
//! nothing here is a hidden global. `normalize()` clamps nonsensical values
//! instead of erroring so a misconfigured deployment degrades to safe
//! defaults.

use std::time::Duration;

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_CODE_LENGTH: usize = 6;
pub(crate) const DEFAULT_CODE_CHARSET: &str = "0123456789";
const DEFAULT_CODE_TTL_SECONDS: i64 = 300;
const DEFAULT_DELIVERY_TIMEOUT_SECONDS: u64 = 10;
const MIN_CODE_LENGTH: usize = 4;

#[derive(Clone, Debug)]
pub struct ChallengePolicy {
    sender_email: String,
    max_attempts: u32,
    code_length: usize,
    code_charset: String,
    code_ttl_seconds: i64,
    delivery_timeout: Duration,
}

impl ChallengePolicy {
    /// Default policy: 3 attempts, 6-digit codes, 5 minute expiry,
    /// 10 second delivery timeout.
    #[must_use]
    pub fn new(sender_email: String) -> Self {
        Self {
            sender_email,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            code_length: DEFAULT_CODE_LENGTH,
            code_charset: DEFAULT_CODE_CHARSET.to_string(),
            code_ttl_seconds: DEFAULT_CODE_TTL_SECONDS,
            delivery_timeout: Duration::from_secs(DEFAULT_DELIVERY_TIMEOUT_SECONDS),
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }

    #[must_use]
    pub fn with_code_charset(mut self, code_charset: String) -> Self {
        self.code_charset = code_charset;
        self
    }

    #[must_use]
    pub fn with_code_ttl_seconds(mut self, seconds: i64) -> Self {
        self.code_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_delivery_timeout_seconds(mut self, seconds: u64) -> Self {
        self.delivery_timeout = Duration::from_secs(seconds);
        self
    }

    /// Clamp the policy into a usable range.
    #[must_use]
    pub fn normalize(self) -> Self {
        let max_attempts = self.max_attempts.max(1);
        let code_length = self.code_length.max(MIN_CODE_LENGTH);
        let code_charset = if self.code_charset.is_empty() {
            DEFAULT_CODE_CHARSET.to_string()
        } else {
            self.code_charset
        };
        let code_ttl_seconds = if self.code_ttl_seconds < 1 {
            DEFAULT_CODE_TTL_SECONDS
        } else {
            self.code_ttl_seconds
        };
        let delivery_timeout = if self.delivery_timeout.is_zero() {
            Duration::from_secs(1)
        } else {
            self.delivery_timeout
        };
        Self {
            sender_email: self.sender_email,
            max_attempts,
            code_length,
            code_charset,
            code_ttl_seconds,
            delivery_timeout,
        }
    }

    #[must_use]
    pub fn sender_email(&self) -> &str {
        &self.sender_email
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn code_length(&self) -> usize {
        self.code_length
    }

    #[must_use]
    pub fn code_charset(&self) -> &str {
        &self.code_charset
    }

    #[must_use]
    pub fn code_ttl_seconds(&self) -> i64 {
        self.code_ttl_seconds
    }

    #[must_use]
    pub fn delivery_timeout(&self) -> Duration {
        self.delivery_timeout
    }
}
