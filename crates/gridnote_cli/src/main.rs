//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `gridnote_core` linkage outside any embedding host.
//! - Run one ensure pass over a built-in note and print deterministic output.

use gridnote_core::{Block, EngineConfig, LayoutDefinition, LayoutSyncService};
use std::process::ExitCode;

const SAMPLE_NOTE: &str = "---\nlayout: daily\n---\n## Notes\nmet with the team\n";

fn main() -> ExitCode {
    println!("gridnote_core ping={}", gridnote_core::ping());
    println!("gridnote_core version={}", gridnote_core::core_version());

    let config = EngineConfig {
        layouts: vec![LayoutDefinition {
            name: "daily".to_string(),
            blocks: vec![
                Block::new("Todo", 0, 0, 12, 20),
                Block::new("Notes", 12, 0, 12, 20),
            ],
        }],
        ..EngineConfig::default()
    };

    let outcome = LayoutSyncService::from_config(&config)
        .map_err(|err| err.to_string())
        .and_then(|service| {
            service
                .ensure_sections("daily", SAMPLE_NOTE)
                .map_err(|err| err.to_string())
        });

    match outcome {
        Ok(outcome) => {
            println!("gridnote_core added={}", outcome.added_titles.join(","));
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("gridnote_core smoke failed: {message}");
            ExitCode::FAILURE
        }
    }
}
