//! Battle Log Example
//!
//! Connects to a battle server, prints narration as it arrives, and always
//! picks the default attack when asked for a decision.
//!
//! ```text
//! RUST_LOG=rotom_client=debug cargo run --example battle_log -- ws://localhost:5080/battle
//! ```

use anyhow::Result;
use async_trait::async_trait;
use rotom_battle::{BattleSession, HealthBand, Type};
use rotom_client::{
    BattleClient, BattleOutcome, ChoiceAvailability, ChoiceRejected, ClientConfig, Emphasis,
    Handler, Narration, Sender, Side, StaticDex,
};
use tracing_subscriber::EnvFilter;

struct BattleLog {
    sender: Sender,
}

fn render(line: &Narration) -> String {
    line.spans
        .iter()
        .map(|span| {
            let text = match span.emphasis {
                Emphasis::Type(t) => format!("{}[{}]", span.text, t),
                Emphasis::Danger => format!("!{}!", span.text),
                Emphasis::Chat { own: true } => format!("> {}", span.text),
                _ => span.text.clone(),
            };
            if span.strong { text.to_uppercase() } else { text }
        })
        .collect()
}

#[async_trait]
impl Handler for BattleLog {
    async fn on_narration(&mut self, line: &Narration) {
        println!("{}", render(line));
    }

    async fn on_life_changed(&mut self, side: Side, session: &BattleSession) {
        if let (Some(percent), Some(band)) = (session.life_percent(side), session.health_band(side)) {
            let marker = match band {
                HealthBand::Healthy => "",
                HealthBand::Wounded => " (wounded)",
                HealthBand::Critical => " (critical)",
            };
            println!("  {}: {}%{}", session.nick(side), percent, marker);
        }
    }

    async fn on_choices_changed(&mut self, availability: ChoiceAvailability) {
        if availability.attack {
            self.sender.default_attack().await.ok();
        } else if availability.switch {
            if let Some(target) = availability.switch_targets.iter().position(|&ok| ok) {
                self.sender.switch(target as u8).await.ok();
            }
        }
    }

    async fn on_choice_rejected(&mut self, rejection: ChoiceRejected) {
        eprintln!("choice rejected: {rejection}");
    }

    async fn on_battle_end(&mut self, outcome: BattleOutcome) {
        match outcome.winner() {
            Some(Side::Me) => println!("=== You won ==="),
            Some(Side::Opponent) => println!("=== You lost ==="),
            None => println!("=== Tie ==="),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| rotom_client::DEFAULT_URL.to_string());

    let dex = StaticDex::new()
        .with_pokemon(25, "Pikachu")
        .with_move(33, "Tackle", Type::Normal)
        .with_move(85, "Thunderbolt", Type::Electric)
        .with_move(73, "Leech Seed", Type::Grass)
        .with_move_message(73, 0, "%s planted a seed on %f!");

    let client = BattleClient::connect(ClientConfig::new(url), dex).await?;
    let mut handler = BattleLog {
        sender: client.sender(),
    };

    let session = client.run(&mut handler).await?;
    println!("Battle finished after {} turns", session.turn());

    Ok(())
}
