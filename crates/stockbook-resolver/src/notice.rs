//! User-visible messages

use std::fmt;
use std::time::{Duration, Instant};

/// Message tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Progress or neutral information
    Info,
    /// Completed action
    Success,
    /// Failed action
    Error,
}

/// A message shown next to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Tone
    pub kind: NoticeKind,
    /// Text
    pub text: String,
    expires_at: Option<Instant>,
}

impl Notice {
    /// Informational notice
    #[inline]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, text)
    }

    /// Success notice
    #[inline]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, text)
    }

    /// Error notice
    #[inline]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, text)
    }

    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            expires_at: None,
        }
    }

    /// Expire `ttl` after `now`
    #[inline]
    #[must_use]
    pub fn expiring(mut self, now: Instant, ttl: Duration) -> Self {
        self.expires_at = Some(now + ttl);
        self
    }

    /// Whether the notice should no longer be shown
    #[inline]
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_notices_never_expire() {
        let notice = Notice::info("hello");
        assert!(!notice.is_expired(Instant::now() + Duration::from_secs(3600)));
    }

    #[test]
    fn expiring_notice() {
        let now = Instant::now();
        let notice = Notice::success("done").expiring(now, Duration::from_secs(10));
        assert!(!notice.is_expired(now + Duration::from_secs(9)));
        assert!(notice.is_expired(now + Duration::from_secs(10)));
    }
}
