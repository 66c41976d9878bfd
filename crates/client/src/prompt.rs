//! Stdin prompts: pairing selection and the post-battle decision.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use arena_core::{BattleResult, CharacterId, Roster};
use arena_runtime::{Decision, DecisionProvider, RuntimeError, RuntimeHandle};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::presenter::{render_result, render_roster};

/// Line-oriented access to stdin, shared by every prompt.
pub struct Console {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl Console {
    pub fn stdin() -> Arc<Self> {
        Arc::new(Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        })
    }

    /// Prints `prompt` and reads one line. `None` on end of input.
    pub async fn ask(&self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        let line = self.lines.lock().await.next_line().await?;
        Ok(line.map(|line| line.trim().to_owned()))
    }
}

/// A parsed roster prompt answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionInput {
    Pick(CharacterId),
    Quit,
    Unknown(String),
}

/// Accepts a roster index or a (case-insensitive) name; `q` quits.
pub fn parse_selection(input: &str, roster: &Roster) -> SelectionInput {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return SelectionInput::Quit;
    }
    if let Ok(index) = input.parse::<u32>() {
        return SelectionInput::Pick(CharacterId(index));
    }
    match roster.find_by_name(input) {
        Some(character) => SelectionInput::Pick(character.id),
        None => SelectionInput::Unknown(input.to_owned()),
    }
}

/// Maps a decision prompt answer. Unrecognized input yields `None`.
pub fn parse_decision(input: &str) -> Option<Decision> {
    match input.trim().to_ascii_lowercase().as_str() {
        "r" | "rematch" => Some(Decision::Rematch),
        "n" | "new" | "reset" | "q" | "quit" => Some(Decision::Reset),
        _ => None,
    }
}

/// Prompts until both slots are filled.
///
/// Returns `false` when the player quits or input ends.
pub async fn select_pair(handle: &RuntimeHandle, console: &Console) -> Result<bool> {
    let roster = handle.roster().await?;
    println!("\n{}", render_roster(&roster));
    println!("Pick two fighters by number or name (picking one again removes it, q quits).");

    loop {
        if handle.current_state().await?.ready_to_fight {
            return Ok(true);
        }

        let Some(line) = console.ask("> ").await? else {
            return Ok(false);
        };
        match parse_selection(&line, &roster) {
            SelectionInput::Quit => return Ok(false),
            SelectionInput::Pick(id) => {
                if handle.select(id).await?.is_none() {
                    println!("No fighter {id} in the roster.");
                }
            }
            SelectionInput::Unknown(text) if text.is_empty() => {}
            SelectionInput::Unknown(text) => println!("Unknown fighter '{text}'."),
        }
    }
}

/// Asks the player whether to rematch once a battle has ended.
pub struct PromptDecisionProvider {
    console: Arc<Console>,
}

impl PromptDecisionProvider {
    pub fn new(console: Arc<Console>) -> Self {
        Self { console }
    }
}

#[async_trait]
impl DecisionProvider for PromptDecisionProvider {
    async fn decide(&self, result: &BattleResult) -> arena_runtime::Result<Decision> {
        println!("{}", render_result(result));

        loop {
            let answer = self
                .console
                .ask("[r]ematch or [n]ew pairing? ")
                .await
                .map_err(|e| RuntimeError::Decision(e.to_string()))?;

            let Some(answer) = answer else {
                return Ok(Decision::Reset);
            };
            if let Some(decision) = parse_decision(&answer) {
                return Ok(decision);
            }
        }
    }
}
