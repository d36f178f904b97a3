//! Confirmation gate
//!
//! Decides whether a mutation may go ahead. Dry runs are checked first and
//! win over `--force`; only when neither applies is the operator asked.

use std::io::{self, IsTerminal};
use tracing::warn;

/// Outcome of the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Skip,
    Abort,
}

/// Confirmation callback for user interaction
///
/// Implement this trait to answer confirmation prompts.
pub trait ConfirmCallback: Send {
    /// Ask the user to confirm an action
    ///
    /// # Returns
    /// `true` if the user confirmed, `false` otherwise
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Interactive terminal prompt
///
/// Without a terminal on stdin there is nobody to ask, so the answer is no.
pub struct TerminalConfirm;

impl ConfirmCallback for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        if !io::stdin().is_terminal() {
            warn!("stdin is not a terminal, treating confirmation as declined (use --force)");
            return Ok(false);
        }

        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

/// Auto-confirm callback (always returns true)
pub struct AutoConfirm;

impl ConfirmCallback for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> io::Result<bool> {
        Ok(true)
    }
}

/// Auto-decline callback (always returns false)
pub struct AutoDecline;

impl ConfirmCallback for AutoDecline {
    fn confirm(&mut self, _prompt: &str) -> io::Result<bool> {
        Ok(false)
    }
}

/// Evaluate the gate
///
/// `confirm` is consulted at most once, and only when neither `dry_run` nor
/// `force` is set.
pub fn decide(
    dry_run: bool,
    force: bool,
    confirm: &mut dyn ConfirmCallback,
    prompt: &str,
) -> io::Result<GateDecision> {
    if dry_run {
        return Ok(GateDecision::Skip);
    }

    if force {
        return Ok(GateDecision::Proceed);
    }

    if confirm.confirm(prompt)? {
        Ok(GateDecision::Proceed)
    } else {
        Ok(GateDecision::Abort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records how often it was asked
    struct CountingConfirm {
        answer: bool,
        asked: usize,
    }

    impl ConfirmCallback for CountingConfirm {
        fn confirm(&mut self, _prompt: &str) -> io::Result<bool> {
            self.asked += 1;
            Ok(self.answer)
        }
    }

    #[test]
    fn test_dry_run_wins_over_force() {
        for force in [false, true] {
            let mut confirm = CountingConfirm {
                answer: true,
                asked: 0,
            };
            let decision = decide(true, force, &mut confirm, "continue?").unwrap();
            assert_eq!(decision, GateDecision::Skip);
            assert_eq!(confirm.asked, 0);
        }
    }

    #[test]
    fn test_force_skips_prompt() {
        let mut confirm = CountingConfirm {
            answer: false,
            asked: 0,
        };
        let decision = decide(false, true, &mut confirm, "continue?").unwrap();
        assert_eq!(decision, GateDecision::Proceed);
        assert_eq!(confirm.asked, 0);
    }

    #[test]
    fn test_prompt_answer_decides() {
        assert_eq!(
            decide(false, false, &mut AutoConfirm, "continue?").unwrap(),
            GateDecision::Proceed
        );
        assert_eq!(
            decide(false, false, &mut AutoDecline, "continue?").unwrap(),
            GateDecision::Abort
        );
    }

    #[test]
    fn test_prompt_failure_propagates() {
        struct Broken;
        impl ConfirmCallback for Broken {
            fn confirm(&mut self, _prompt: &str) -> io::Result<bool> {
                Err(io::Error::other("tty closed"))
            }
        }

        assert!(decide(false, false, &mut Broken, "continue?").is_err());
    }
}
