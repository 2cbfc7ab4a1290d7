//! Example: Hard Budget Enforcement
//!
//! This example simulates a generation loop in which the model opens a
//! reasoning span and then rambles indefinitely. The budget stage lets it
//! run for four tokens, then forces the close tag onto the output.
//!
//! # Running
//!
//! ```bash
//! cargo run --example budget_enforcement
//! ```

use anyhow::Result;
use ponder::prelude::*;

const VOCAB_SIZE: usize = 16;
const OPEN: u32 = 5;
const CLOSE: u32 = 9;
const RAMBLE: u32 = 3;

/// A scripted "model": wants to open a reasoning span, then keeps picking
/// the same filler token forever.
fn scripted_logits(step: usize) -> Vec<f32> {
    let mut logits = vec![0.0; VOCAB_SIZE];
    if step == 0 {
        logits[OPEN as usize] = 10.0;
    } else {
        logits[RAMBLE as usize] = 10.0;
    }
    logits
}

/// The downstream selection stage: honor a forced selection if one was
/// made, otherwise pick greedily.
fn pick(candidates: &CandidateList) -> u32 {
    if let Some(token) = candidates.selected_token() {
        return token;
    }
    candidates
        .entries()
        .iter()
        .max_by(|a, b| a.logit.total_cmp(&b.logit))
        .map(|c| c.id)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    let config = BudgetConfig {
        budget: 4,
        hard: true,
        ..Default::default()
    };
    let mut stage = ReasoningBudget::from_sequences(vec![OPEN], vec![CLOSE], config);

    println!("budget = {}, open = {OPEN}, close = {CLOSE}\n", stage.budget());

    for step in 0..10 {
        let mut candidates = CandidateList::from_logits(&scripted_logits(step));
        stage.apply(&mut candidates);
        let token = pick(&candidates);
        stage.accept(token);

        let forced = if candidates.selected_token().is_some() {
            " (forced)"
        } else {
            ""
        };
        println!(
            "step {step:2}: token {token:2}{forced}  inside={} used={}",
            stage.is_inside(),
            stage.used()
        );
    }

    Ok(())
}
