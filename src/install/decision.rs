//! Operator decision after a failed install.
//!
//! The answer comes from the [`UserInterface`], so tests can script it.

use crate::error::{ProvisionError, Result};
use crate::ui::{Prompt, PromptType, UserInterface};

/// Prompt key used for the continue question.
pub const CONTINUE_PROMPT_KEY: &str = "continue";

/// What the operator chose after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Carry on with the next item.
    Continue,
    /// Stop the run.
    Abort,
}

/// Interpret one answer. `None` means the answer is not valid.
pub fn parse_answer(answer: &str) -> Option<Decision> {
    match answer.trim() {
        "y" | "Y" => Some(Decision::Continue),
        "n" | "N" => Some(Decision::Abort),
        _ => None,
    }
}

/// Ask "Continue? (y/n)" until the operator answers y or n.
///
/// Any other answer re-prompts without side effects. A non-interactive UI
/// cannot re-prompt, so an invalid answer there is an error.
pub fn ask_to_continue(ui: &mut dyn UserInterface) -> Result<Decision> {
    let prompt = Prompt {
        key: CONTINUE_PROMPT_KEY.to_string(),
        question: "Continue? (y/n)".to_string(),
        prompt_type: PromptType::Input,
        default: None,
    };

    loop {
        let answer = ui.prompt(&prompt)?.as_string();
        if let Some(decision) = parse_answer(&answer) {
            tracing::debug!(?decision, "Operator answered continue prompt");
            return Ok(decision);
        }

        if !ui.is_interactive() {
            return Err(ProvisionError::PromptUnanswered {
                key: prompt.key.clone(),
                message: format!("invalid answer '{}'", answer.trim()),
            });
        }
    }
}
