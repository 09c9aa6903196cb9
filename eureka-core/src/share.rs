//! Sharing a fact through an ordered chain of fallbacks.
//!
//! 1. A native share target (title, text, link). Any error falls through:
//!    "unsupported" and "the user cancelled" are treated the same.
//! 2. The clipboard, with the text and link combined.
//! 3. A pre-filled mail compose URL.
//!
//! Failures are logged and never escalate beyond [`ShareOutcome::Exhausted`].

use crate::fact::Fact;
use async_trait::async_trait;
use thiserror::Error;

/// First line of every shared block.
pub const SHARE_HEADER: &str = "💡 Fun fact!";

/// Promotional line appended to every shared block.
pub const SHARE_FOOTER: &str = "🔗 Discover more facts in Eureka!";

/// Errors reported by a share target.
#[derive(Debug, Clone, Error)]
pub enum ShareError {
    #[error("Share target not supported on this platform")]
    Unsupported,

    #[error("Share cancelled")]
    Cancelled,

    #[error("Share failed: {0}")]
    Failed(String),
}

/// What gets shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub link: String,
}

impl ShareRequest {
    /// Build the share block for a fact.
    pub fn for_fact(fact: &Fact, link: impl Into<String>) -> Self {
        Self {
            title: format!("💡 {}", fact.title),
            text: format!(
                "{SHARE_HEADER}\n\n{}\n\n{}\n\n{SHARE_FOOTER}",
                fact.title, fact.description
            ),
            link: link.into(),
        }
    }

    /// Text and link combined, for targets that only take one string.
    pub fn clipboard_text(&self) -> String {
        format!("{}\n\n{}", self.text, self.link)
    }

    /// A `mailto:` URL with the title as subject and text plus link as body.
    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:?subject={}&body={}",
            encode_uri_component(&self.title),
            encode_uri_component(&self.clipboard_text())
        )
    }
}

/// Where a share request can be sent.
#[async_trait]
pub trait ShareTarget: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    async fn share(&self, request: &ShareRequest) -> Result<(), ShareError>;
}

/// How a share attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The native target accepted it.
    Shared,
    /// Copied to the clipboard.
    Copied,
    /// A mail compose window was opened.
    MailComposeOpened,
    /// Every target failed or none was configured.
    Exhausted,
    /// There was no fact to share.
    NothingToShare,
}

/// Ordered fallback chain of share targets.
#[derive(Default)]
pub struct ShareChain {
    native: Option<Box<dyn ShareTarget>>,
    clipboard: Option<Box<dyn ShareTarget>>,
    mail: Option<Box<dyn ShareTarget>>,
}

impl ShareChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_native(mut self, target: impl ShareTarget + 'static) -> Self {
        self.native = Some(Box::new(target));
        self
    }

    pub fn with_clipboard(mut self, target: impl ShareTarget + 'static) -> Self {
        self.clipboard = Some(Box::new(target));
        self
    }

    pub fn with_mail(mut self, target: impl ShareTarget + 'static) -> Self {
        self.mail = Some(Box::new(target));
        self
    }

    /// Try each configured target in order until one succeeds.
    pub async fn share(&self, request: &ShareRequest) -> ShareOutcome {
        let steps = [
            (&self.native, ShareOutcome::Shared),
            (&self.clipboard, ShareOutcome::Copied),
            (&self.mail, ShareOutcome::MailComposeOpened),
        ];

        for (target, outcome) in steps {
            let Some(target) = target else {
                continue;
            };
            match target.share(request).await {
                Ok(()) => {
                    tracing::debug!(target = target.name(), "shared");
                    return outcome;
                }
                Err(e) => {
                    tracing::debug!(target = target.name(), error = %e, "share target failed, falling back");
                }
            }
        }

        tracing::warn!(title = %request.title, "every share target failed");
        ShareOutcome::Exhausted
    }
}

impl std::fmt::Debug for ShareChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = |t: &Option<Box<dyn ShareTarget>>| t.as_ref().map(|t| t.name().to_string());
        f.debug_struct("ShareChain")
            .field("native", &name(&self.native))
            .field("clipboard", &name(&self.clipboard))
            .field("mail", &name(&self.mail))
            .finish()
    }
}

/// Percent-encode like JavaScript's `encodeURIComponent`.
///
/// ASCII letters, digits and `-_.!~*'()` pass through; every other byte of
/// the UTF-8 encoding becomes `%XX`.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
