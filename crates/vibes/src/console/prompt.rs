//! Interactive prompts.

use async_trait::async_trait;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::error::SessionError;

/// Source of operator answers.
#[async_trait]
pub trait Prompter: Send {
    /// Picks one of `items`, returning its index.
    async fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<usize, SessionError>;

    /// Reads a line of text. An empty answer yields `default` when given.
    async fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String, SessionError>;

    /// Asks a yes/no question.
    async fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, SessionError>;
}

/// Terminal prompts backed by `dialoguer`.
///
/// dialoguer blocks on terminal reads, so each prompt runs on the blocking
/// pool and the runtime stays free to observe shutdown signals.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

async fn blocking<T, F>(prompt: F) -> Result<T, SessionError>
where
    T: Send + 'static,
    F: FnOnce() -> dialoguer::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(prompt)
        .await
        .map_err(|e| SessionError::Prompt(e.to_string()))?
        .map_err(SessionError::from)
}

#[async_trait]
impl Prompter for DialoguerPrompter {
    async fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<usize, SessionError> {
        let prompt = prompt.to_string();
        let items = items.to_vec();
        blocking(move || {
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .items(&items)
                .default(default)
                .interact()
        })
        .await
    }

    async fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String, SessionError> {
        let prompt = prompt.to_string();
        let default = default.map(str::to_string);
        blocking(move || {
            let theme = ColorfulTheme::default();
            let mut input = Input::<String>::with_theme(&theme)
                .with_prompt(prompt)
                .allow_empty(true);
            if let Some(default) = default {
                input = input.default(default);
            }
            input.interact_text()
        })
        .await
    }

    async fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, SessionError> {
        let prompt = prompt.to_string();
        blocking(move || {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(default)
                .interact()
        })
        .await
    }
}

/// A scripted answer for [`ScriptedPrompter`].
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Index picked from a select prompt.
    Select(usize),
    /// Accept whatever default the prompt offers.
    Default,
    Text(String),
    Confirm(bool),
    /// Simulates Ctrl+C at the prompt.
    Interrupt,
}

/// Replays a fixed list of answers and records the prompts it was shown.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<Answer>,
    pub prompts: Vec<String>,
    /// Items offered by each select prompt, in order.
    pub offered: Vec<Vec<String>>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<Answer, SessionError> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(Answer::Interrupt) => Err(SessionError::Interrupted),
            Some(answer) => Ok(answer),
            None => Err(SessionError::Prompt(format!("no scripted answer for {prompt:?}"))),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<usize, SessionError> {
        self.offered.push(items.to_vec());
        match self.next(prompt)? {
            Answer::Select(index) if index < items.len() => Ok(index),
            Answer::Default => Ok(default),
            other => Err(SessionError::Prompt(format!("unexpected answer {other:?}"))),
        }
    }

    async fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String, SessionError> {
        match self.next(prompt)? {
            Answer::Text(text) => Ok(text),
            Answer::Default => Ok(default.unwrap_or_default().to_string()),
            other => Err(SessionError::Prompt(format!("unexpected answer {other:?}"))),
        }
    }

    async fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, SessionError> {
        match self.next(prompt)? {
            Answer::Confirm(yes) => Ok(yes),
            Answer::Default => Ok(default),
            other => Err(SessionError::Prompt(format!("unexpected answer {other:?}"))),
        }
    }
}
