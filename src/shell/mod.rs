//! Text rendering of the layout frame and its views.

use std::fmt::Write as _;
use std::path::Path;

use serde_json::Value;

use crate::auth::MockUser;
use crate::backend::Bank;
use crate::error::{AppError, AppResult};

const HEADER: &str = "Incident Wizard";
const FOOTER: &str = "© 2025 Incident Wizard";

/// Wrap a view body in the header and footer.
pub fn frame(body: &str) -> String {
    let rule = "-".repeat(40);
    format!("{rule}\n{HEADER}\n{rule}\n{}\n{rule}\n{FOOTER}\n", body.trim_end())
}

/// Account summary for the logged-in user
pub fn render_home(user: &MockUser) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome, {}", user.name);
    let _ = writeln!(out, "Account: {}", user.account);
    let _ = writeln!(out, "Balance: ${}", user.balance);
    let _ = writeln!(out, "\nRecent Transactions");
    for tx in user.transactions {
        let _ = writeln!(out, "  {} - {} - ${}", tx.date, tx.description, tx.amount);
    }
    out
}

/// Sign-in prompt
pub fn render_login() -> String {
    "Sign In\nUse `login <username> <password>` to continue.\n".to_string()
}

/// Pretty-print the app metadata, or a placeholder before it has loaded
pub fn render_metadata(metadata: Option<&Value>) -> String {
    match metadata.map(serde_json::to_string_pretty) {
        Some(Ok(json)) => format!("App Metadata\n{}\n", json),
        Some(Err(e)) => format!("Error: {}\n", e),
        None => "Loading metadata…\n".to_string(),
    }
}

/// Banking table for the test view
pub fn render_test(banks: Result<&[Bank], &str>) -> String {
    let banks = match banks {
        Ok(banks) => banks,
        Err(e) => return format!("Error: {}\n", e),
    };

    let mut out = String::from("Test Banking Data\n");
    if banks.is_empty() {
        out.push_str("No bank data found.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<24} {:<16} {:<12} {:<28} {}",
        "Bank Name", "Account Number", "Routing", "IBAN", "SWIFT/BIC"
    );
    for bank in banks {
        let _ = writeln!(
            out,
            "{:<24} {:<16} {:<12} {:<28} {}",
            bank.bank_name, bank.account_number, bank.routing_number, bank.iban, bank.swift_bic
        );
    }
    out
}

/// Fallback for unknown paths
pub fn render_not_found(path: &str) -> String {
    format!("No page at {}\n", path)
}

/// Read the JSON document shown on the metadata view
pub fn load_metadata(path: &Path) -> AppResult<Value> {
    let raw = std::fs::read_to_string(path).map_err(|e| AppError::Metadata {
        message: format!("cannot read {}: {}", path.display(), e),
    })?;
    serde_json::from_str(&raw).map_err(|e| AppError::Metadata {
        message: format!("{} is not valid JSON: {}", path.display(), e),
    })
}
