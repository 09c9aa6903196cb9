//! Share targets reachable from a terminal.
//!
//! There is no native share sheet here, so the chain starts at the system
//! clipboard and falls back to opening a pre-filled mail in the desktop's
//! mail handler.

use std::io::{self, ErrorKind};

use async_trait::async_trait;
use copypasta::{ClipboardContext, ClipboardProvider};
use eureka_core::{ShareChain, ShareError, ShareRequest, ShareTarget};

type CopyFn = Box<dyn Fn(&str) -> Result<(), ShareError> + Send + Sync>;
type OpenFn = Box<dyn Fn(&str) -> io::Result<()> + Send + Sync>;

/// The share chain used by the TUI
pub fn terminal_chain() -> ShareChain {
    ShareChain::new()
        .with_clipboard(ClipboardTarget::system())
        .with_mail(MailOpener::system())
}

/// Copies the share text to the clipboard
pub struct ClipboardTarget {
    copy: CopyFn,
}

impl ClipboardTarget {
    pub fn system() -> Self {
        Self::with_copy(system_copy)
    }

    pub fn with_copy(copy: impl Fn(&str) -> Result<(), ShareError> + Send + Sync + 'static) -> Self {
        Self {
            copy: Box::new(copy),
        }
    }
}

/// No clipboard (headless session, no display server) is `Unsupported`
fn system_copy(text: &str) -> Result<(), ShareError> {
    let mut clipboard = ClipboardContext::new().map_err(|err| {
        tracing::debug!(error = %err, "no clipboard available");
        ShareError::Unsupported
    })?;
    clipboard
        .set_contents(text.to_owned())
        .map_err(|err| ShareError::Failed(format!("copy to clipboard: {err}")))
}

#[async_trait]
impl ShareTarget for ClipboardTarget {
    fn name(&self) -> &str {
        "clipboard"
    }

    async fn share(&self, request: &ShareRequest) -> Result<(), ShareError> {
        (self.copy)(&request.clipboard_text())
    }
}

/// Opens the `mailto:` URL with the desktop's URL handler
pub struct MailOpener {
    open: OpenFn,
}

impl MailOpener {
    pub fn system() -> Self {
        Self::with_opener(|url| open::that(url))
    }

    pub fn with_opener(open: impl Fn(&str) -> io::Result<()> + Send + Sync + 'static) -> Self {
        Self {
            open: Box::new(open),
        }
    }
}

#[async_trait]
impl ShareTarget for MailOpener {
    fn name(&self) -> &str {
        "mail"
    }

    async fn share(&self, request: &ShareRequest) -> Result<(), ShareError> {
        (self.open)(&request.mailto_url()).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ShareError::Unsupported,
            _ => ShareError::Failed(format!("open mail client: {err}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eureka_core::{Fact, ShareOutcome};
    use std::sync::{Arc, Mutex};

    fn request() -> ShareRequest {
        let fact = Fact::new("space", "Footprints", "They last.", "👣");
        ShareRequest::for_fact(&fact, "https://example.org")
    }

    #[tokio::test]
    async fn test_clipboard_receives_text_and_link() {
        let copied = Arc::new(Mutex::new(Vec::new()));
        let log = copied.clone();
        let clipboard = ClipboardTarget::with_copy(move |text| {
            log.lock().unwrap().push(text.to_string());
            Ok(())
        });

        clipboard.share(&request()).await.unwrap();
        let copied = copied.lock().unwrap();
        assert_eq!(copied.len(), 1);
        assert!(copied[0].starts_with("💡 Fun fact!"));
        assert!(copied[0].ends_with("\n\nhttps://example.org"));
    }

    #[tokio::test]
    async fn test_mail_opens_mailto_url() {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let log = opened.clone();
        let mail = MailOpener::with_opener(move |url| {
            log.lock().unwrap().push(url.to_string());
            Ok(())
        });

        mail.share(&request()).await.unwrap();
        let opened = opened.lock().unwrap();
        assert!(opened[0].starts_with("mailto:?subject=%F0%9F%92%A1%20Footprints&body="));
    }

    #[tokio::test]
    async fn test_missing_mail_handler_is_unsupported() {
        let mail = MailOpener::with_opener(|_| Err(io::Error::from(ErrorKind::NotFound)));
        assert!(matches!(
            mail.share(&request()).await,
            Err(ShareError::Unsupported)
        ));

        let mail = MailOpener::with_opener(|_| Err(io::Error::other("exit status 3")));
        assert!(matches!(
            mail.share(&request()).await,
            Err(ShareError::Failed(_))
        ));
    }

    #[tokio::test]
    async fn test_no_clipboard_falls_back_to_mail() {
        let chain = ShareChain::new()
            .with_clipboard(ClipboardTarget::with_copy(|_| Err(ShareError::Unsupported)))
            .with_mail(MailOpener::with_opener(|_| Ok(())));
        assert_eq!(chain.share(&request()).await, ShareOutcome::MailComposeOpened);
    }
}
