use billio_settle::config::CONFIG;
use billio_settle::error::SettleError;
use billio_settle::models::{Diagnostic, Expense, Participant, ParticipantSummary, Settlement};
use billio_settle::{SettlementOptions, SettlementService};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

// Request payload read from file or stdin
#[derive(Deserialize)]
struct SettleRequest {
    participants: Vec<Participant>,
    expenses: Vec<Expense>,
}

#[derive(Serialize)]
struct SettleReport {
    generated_at: DateTime<Utc>,
    balances: billio_settle::models::Balances,
    summaries: Vec<ParticipantSummary>,
    settlements: Vec<Settlement>,
    diagnostics: Vec<Diagnostic>,
}

fn read_request(path: Option<PathBuf>) -> Result<SettleRequest, SettleError> {
    let raw = match path {
        Some(path) => {
            info!("Reading expenses from {}", path.display());
            std::fs::read_to_string(path)?
        }
        None => {
            info!("Reading expenses from stdin");
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let mut request: SettleRequest = serde_json::from_str(&raw)?;
    for expense in request.expenses.iter_mut().filter(|e| e.id.trim().is_empty()) {
        expense.id = Uuid::new_v4().to_string();
    }
    Ok(request)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CONFIG.as_ref().map_err(|err| err.to_string())?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.as_str())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args().nth(1).map(PathBuf::from).or_else(|| config.input_path.clone());
    let request = read_request(path)?;

    let service = SettlementService::new(SettlementOptions {
        rounding: config.rounding,
    });
    let outcome = if config.strict {
        service.settle_strict(&request.participants, &request.expenses)?
    } else {
        service.settle(&request.participants, &request.expenses)
    };
    for diagnostic in &outcome.diagnostics {
        warn!("{}", diagnostic);
    }

    let report = SettleReport {
        generated_at: Utc::now(),
        balances: outcome.balances,
        summaries: outcome.summaries,
        settlements: outcome.settlements,
        diagnostics: outcome.diagnostics,
    };
    let json = if config.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}
