//! The incident wizard chat widget.
//!
//! A conversation collects ticket fields from the model's replies. Once a
//! reply carries a JSON object with a description, the widget scans recent
//! incidents for a duplicate and either links the report to it or opens a
//! new incident.

mod parser;
mod similarity;
mod widget;

pub use parser::{extract_json_object, parse_ticket_draft, TicketDraft, NOT_AVAILABLE};
pub use similarity::{best_match, jaccard, BestMatch};
pub use widget::{append_related_issue, merge_entry, ChatWidget, TicketOutcome};
