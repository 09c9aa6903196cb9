//! Headless mode for the Eureka deck.
//!
//! A line-oriented protocol over [`HeadlessDeck`] for scripted runs and
//! agents. Every input line is a `#` command; output lines start with a
//! bracketed tag (`[RENDER]`, `[STATUS]`, `[ERROR]`, ...). Time only moves
//! when a command asks for it (`#wait`, `#settle`).

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use eureka_core::navigation::{DropReason, Effect, Outcome};
use eureka_core::{
    EurekaConfig, HeadlessDeck, SessionError, ShareChain, ShareError, ShareOutcome, ShareRequest,
    ShareTarget,
};

const HELP: &[(&str, &str)] = &[
    ("#next", "Advance to the next fact"),
    ("#settle", "Let the running transition finish"),
    ("#wait <ms>", "Advance the clock"),
    ("#category <key>", "Switch category (\"all\" for every fact)"),
    ("#categories", "List categories"),
    ("#favorite", "Toggle favorite on the fact on screen"),
    ("#share", "Share the fact on screen"),
    ("#swipe <dx> [dy]", "Touch swipe from the center"),
    ("#drag <dx>", "Mouse drag from the center"),
    ("#status", "Show deck status"),
    ("#help", "Show this help"),
    ("#quit", "Exit"),
];

/// Native share target that hands requests back to the runner, which prints
/// them as `[SHARED]` lines
#[derive(Debug, Clone, Default)]
pub struct CapturedShares {
    requests: Arc<Mutex<Vec<ShareRequest>>>,
}

impl CapturedShares {
    fn take(&self) -> Vec<ShareRequest> {
        match self.requests.lock() {
            Ok(mut requests) => std::mem::take(&mut *requests),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

#[async_trait]
impl ShareTarget for CapturedShares {
    fn name(&self) -> &str {
        "headless"
    }

    async fn share(&self, request: &ShareRequest) -> Result<(), ShareError> {
        self.requests
            .lock()
            .map_err(|_| ShareError::Failed("share log poisoned".to_string()))?
            .push(request.clone());
        Ok(())
    }
}

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run the deck in headless mode until `#quit` or end of input.
pub async fn run_headless(config: EurekaConfig) -> Result<(), SessionError> {
    let shares = CapturedShares::default();
    let deck = HeadlessDeck::open(&config, ShareChain::new().with_native(shares.clone())).await?;
    let mut runner = HeadlessRunner::new(deck, shares);

    let mut stdout = io::stdout();
    println!("=== Eureka Headless Mode ===");
    runner.print_pending(&mut stdout).ok();
    println!("Type #help for commands.");
    println!();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        match runner.execute(&line, &mut stdout).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                eprintln!("Error writing output: {e}");
                break;
            }
        }
        stdout.flush().ok();
    }

    Ok(())
}

/// Interprets protocol lines against a deck
pub struct HeadlessRunner {
    deck: HeadlessDeck,
    shares: CapturedShares,
}

impl HeadlessRunner {
    /// `shares` should be the native target of the deck's share chain
    pub fn new(deck: HeadlessDeck, shares: CapturedShares) -> Self {
        Self { deck, shares }
    }

    /// Execute one line and write its output
    pub async fn execute(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let Some(command) = line.strip_prefix('#') else {
            writeln!(out, "[ERROR] Commands start with '#'. Type #help for help.")?;
            return Ok(Flow::Continue);
        };

        let parts: Vec<&str> = command.split_whitespace().collect();
        match parts.as_slice() {
            ["quit"] | ["exit"] => {
                writeln!(out, "Goodbye!")?;
                return Ok(Flow::Quit);
            }
            ["next"] => {
                let outcome = self.deck.next();
                self.report(outcome, out)?;
            }
            ["settle"] => {
                self.deck.settle();
                self.print_pending(out)?;
            }
            ["wait", ms] => match ms.parse::<u64>() {
                Ok(ms) => {
                    self.deck.advance_clock(Duration::from_millis(ms));
                    self.print_pending(out)?;
                }
                Err(_) => writeln!(out, "[ERROR] Usage: #wait <ms>")?,
            },
            ["category", key] => {
                let outcome = self.deck.category(*key);
                self.report(outcome, out)?;
            }
            ["categories"] => self.print_categories(out)?,
            ["favorite"] => {
                if self.deck.favorite().await.is_none() {
                    writeln!(out, "[IGNORED] no fact on screen")?;
                }
                self.print_pending(out)?;
                self.print_notification(out)?;
            }
            ["share"] => {
                let outcome = self.deck.share().await;
                for request in self.shares.take() {
                    for line in request.clipboard_text().lines() {
                        writeln!(out, "[SHARED] {line}")?;
                    }
                }
                writeln!(out, "[SHARE] {}", share_label(outcome))?;
                self.print_notification(out)?;
            }
            ["swipe", rest @ ..] if matches!(rest.len(), 1 | 2) => {
                let dx = rest[0].parse::<f32>();
                let dy = rest.get(1).map_or(Ok(0.0), |v| v.parse::<f32>());
                match (dx, dy) {
                    (Ok(dx), Ok(dy)) => match self.deck.swipe(dx, dy) {
                        Some(outcome) => self.report(outcome, out)?,
                        None => writeln!(out, "[IGNORED] not a swipe")?,
                    },
                    _ => writeln!(out, "[ERROR] Usage: #swipe <dx> [dy]")?,
                }
            }
            ["drag", dx] => match dx.parse::<f32>() {
                Ok(dx) => match self.deck.drag(dx) {
                    Some(outcome) => self.report(outcome, out)?,
                    None => writeln!(out, "[IGNORED] not a swipe")?,
                },
                Err(_) => writeln!(out, "[ERROR] Usage: #drag <dx>")?,
            },
            ["status"] => writeln!(out, "[STATUS] {}", self.deck.status())?,
            ["help"] => {
                writeln!(out, "[HELP]")?;
                for (usage, what) in HELP {
                    writeln!(out, "  {usage:<18} - {what}")?;
                }
            }
            _ => writeln!(out, "[ERROR] Unknown command. Type #help for help.")?,
        }

        Ok(Flow::Continue)
    }

    fn report(&mut self, outcome: Outcome, out: &mut impl Write) -> io::Result<()> {
        match outcome {
            Outcome::Accepted(_) => self.print_pending(out),
            Outcome::Dropped(DropReason::Transitioning) => {
                self.deck.drain_effects();
                writeln!(out, "[DROPPED] transition in progress")
            }
            Outcome::Dropped(DropReason::EmptyDeck) => {
                self.deck.drain_effects();
                writeln!(out, "[DROPPED] deck is empty")
            }
        }
    }

    /// Print every effect emitted since the last call
    pub fn print_pending(&mut self, out: &mut impl Write) -> io::Result<()> {
        for effect in self.deck.drain_effects() {
            writeln!(out, "{}", describe(&effect))?;
        }
        Ok(())
    }

    fn print_notification(&self, out: &mut impl Write) -> io::Result<()> {
        if let Some(note) = self.deck.session().notifications().latest() {
            writeln!(out, "[NOTIFY] {}", note.message)?;
        }
        Ok(())
    }

    fn print_categories(&self, out: &mut impl Write) -> io::Result<()> {
        let catalog = self.deck.session().catalog();
        writeln!(out, "[CATEGORIES]")?;
        writeln!(out, "  all ({})", catalog.len())?;
        for info in catalog.categories() {
            writeln!(
                out,
                "  {} {} {} ({})",
                info.key,
                info.emoji,
                info.label,
                catalog.count_in(&info.key)
            )?;
        }
        Ok(())
    }
}

fn describe(effect: &Effect) -> String {
    match effect {
        Effect::OutgoingCue => "[OUTGOING]".to_string(),
        Effect::Rendered {
            fact,
            position,
            deck_len,
        } => format!(
            "[RENDER] {}/{} {} {}",
            position + 1,
            deck_len,
            fact.emoji,
            fact.title
        ),
        Effect::IncomingCue => "[INCOMING]".to_string(),
        Effect::EmptyState { category } => format!("[EMPTY] no facts in {category}"),
        Effect::FavoriteIndicator { favorited, .. } => {
            format!("[FAVORITE] {}", if *favorited { "on" } else { "off" })
        }
        Effect::CategoryChanged { category, deck_len } => {
            format!("[CATEGORY] {category} ({deck_len} facts)")
        }
        Effect::TransitionSettled => "[SETTLED]".to_string(),
    }
}

fn share_label(outcome: ShareOutcome) -> &'static str {
    match outcome {
        ShareOutcome::Shared => "shared",
        ShareOutcome::Copied => "copied",
        ShareOutcome::MailComposeOpened => "mail",
        ShareOutcome::Exhausted => "failed",
        ShareOutcome::NothingToShare => "nothing to share",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eureka_core::testing::{sample_catalog, ScriptedShareTarget};
    use eureka_core::{DeckSelector, EurekaSession, MemoryStore};

    async fn runner_with(shares: CapturedShares, chain: ShareChain) -> HeadlessRunner {
        let deck = DeckSelector::with_seed(Arc::new(sample_catalog()), 3);
        let session =
            EurekaSession::with_deck(&EurekaConfig::default(), deck, Arc::new(MemoryStore::new()), chain)
                .await;
        let mut runner = HeadlessRunner::new(HeadlessDeck::from_session(session), shares);
        runner.deck.drain_effects();
        runner
    }

    async fn runner() -> HeadlessRunner {
        let shares = CapturedShares::default();
        let chain = ShareChain::new().with_native(shares.clone());
        runner_with(shares, chain).await
    }

    async fn run(runner: &mut HeadlessRunner, line: &str) -> String {
        let mut out = Vec::new();
        runner.execute(line, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_next_then_settle() {
        let mut runner = runner().await;
        let out = run(&mut runner, "#next").await;
        assert_eq!(out, "[OUTGOING]\n");

        let out = run(&mut runner, "#settle").await;
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("[RENDER] 2/5"));
        assert_eq!(lines[1], "[FAVORITE] off");
        assert_eq!(lines[2], "[INCOMING]");
        assert_eq!(lines[3], "[SETTLED]");
    }

    #[tokio::test]
    async fn test_second_next_is_dropped() {
        let mut runner = runner().await;
        run(&mut runner, "#next").await;
        let out = run(&mut runner, "#next").await;
        assert_eq!(out, "[DROPPED] transition in progress\n");
    }

    #[tokio::test]
    async fn test_empty_category() {
        let mut runner = runner().await;
        let out = run(&mut runner, "#category art").await;
        assert!(out.contains("[CATEGORY] art (0 facts)"));
        assert!(out.contains("[EMPTY] no facts in art"));

        let out = run(&mut runner, "#next").await;
        assert_eq!(out, "[DROPPED] deck is empty\n");
    }

    #[tokio::test]
    async fn test_favorite_and_share() {
        let mut runner = runner().await;
        let out = run(&mut runner, "#favorite").await;
        assert!(out.contains("[FAVORITE] on"));
        assert!(out.contains("[NOTIFY] ❤️ Saved to favorites!"));

        let out = run(&mut runner, "#share").await;
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "[SHARED] 💡 Fun fact!");
        assert!(lines.iter().any(|l| l.starts_with("[SHARED] 🔗 Discover more facts")));
        assert!(lines.contains(&"[SHARE] shared"));
    }

    #[tokio::test]
    async fn test_share_falls_back_to_clipboard() {
        let chain = ShareChain::new()
            .with_native(ScriptedShareTarget::failing("native", ShareError::Unsupported))
            .with_clipboard(ScriptedShareTarget::succeeding("clipboard"));
        let mut runner = runner_with(CapturedShares::default(), chain).await;

        let out = run(&mut runner, "#share").await;
        assert!(!out.contains("[SHARED]"));
        assert!(out.starts_with("[SHARE] copied"));
        assert!(out.contains("[NOTIFY] 📋 Copied to clipboard!"));
    }

    #[tokio::test]
    async fn test_short_swipe_is_ignored() {
        let mut runner = runner().await;
        let out = run(&mut runner, "#swipe -20").await;
        assert_eq!(out, "[IGNORED] not a swipe\n");

        let out = run(&mut runner, "#swipe -80").await;
        assert_eq!(out, "[OUTGOING]\n");
    }

    #[tokio::test]
    async fn test_wait_fires_timers() {
        let mut runner = runner().await;
        run(&mut runner, "#next").await;
        let out = run(&mut runner, "#wait 299").await;
        assert!(out.is_empty());
        let out = run(&mut runner, "#wait 1").await;
        assert!(out.starts_with("[RENDER]"));
        assert!(runner.deck.status().locked);
    }

    #[tokio::test]
    async fn test_bad_input() {
        let mut runner = runner().await;
        assert!(run(&mut runner, "next").await.starts_with("[ERROR]"));
        assert!(run(&mut runner, "#wait soon").await.starts_with("[ERROR]"));
        assert!(run(&mut runner, "#bogus").await.starts_with("[ERROR]"));
        assert_eq!(run(&mut runner, "   ").await, "");
    }

    #[tokio::test]
    async fn test_quit() {
        let mut runner = runner().await;
        let mut out = Vec::new();
        let flow = runner.execute("#quit", &mut out).await.unwrap();
        assert_eq!(flow, Flow::Quit);
    }
}
