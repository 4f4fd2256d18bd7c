use tracing::{debug, info, warn};
use uuid::Uuid;

use super::parser::{parse_ticket_draft, TicketDraft};
use super::similarity::{best_match, BestMatch};
use crate::backend::{
    ChatRequest, CreateOutcome, IncidentBackend, Message, MessageRole, UpdateIncidentRequest,
};
use crate::config::WizardConfig;
use crate::error::BackendResult;
use crate::prompts::INCIDENT_WIZARD_PROMPT;
use crate::session::{detect_platform, ClickstreamEvent, MetadataUpdate, SessionStore};

/// How a conversation ended up on the backend
#[derive(Debug, Clone, PartialEq)]
pub enum TicketOutcome {
    /// A new incident was opened
    Created {
        /// Incident number assigned by the backend
        number: String,
        /// Backend record id
        sys_id: String,
    },
    /// The report was linked to an existing incident
    Merged {
        /// The incident the report was linked to
        number: String,
        /// Similarity that triggered the merge
        score: f64,
    },
}

/// The chat widget: transcript, visibility, and the ticket flow behind `send`.
pub struct ChatWidget<B> {
    backend: B,
    config: WizardConfig,
    session: SessionStore,
    transcript: Vec<Message>,
    open: bool,
    loading: bool,
    outcome: Option<TicketOutcome>,
}

impl<B: IncidentBackend> ChatWidget<B> {
    /// Create a closed widget with a fresh transcript
    pub fn new(backend: B, config: WizardConfig, session: SessionStore) -> Self {
        Self {
            backend,
            config,
            session,
            transcript: vec![Message::system(INCIDENT_WIZARD_PROMPT)],
            open: false,
            loading: false,
            outcome: None,
        }
    }

    /// Fill in session details the first time the widget is shown on a page.
    pub fn mount(&mut self, user_agent: &str, page_html: &str) {
        if self.session.correlation_id().is_empty() {
            let id = Uuid::new_v4().to_string();
            self.session.set_correlation_id(id.clone());
            self.session
                .record(ClickstreamEvent::new("correlation_id_set").with_detail("id", id));
        }

        self.session
            .merge_metadata(MetadataUpdate::platform(detect_platform(user_agent)));

        if self.session.metadata().html_of_page.is_empty() && !page_html.is_empty() {
            self.session
                .merge_metadata(MetadataUpdate::html_of_page(page_html));
        }

        let page = self.session.metadata().page.clone();
        self.session
            .record(ClickstreamEvent::new("chatbot_mounted").with_detail("page", page));

        info!(
            correlation_id = %self.session.correlation_id(),
            "Chat widget mounted"
        );
    }

    /// Open or close the chat panel, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.session
            .log_event(if self.open { "chat_opened" } else { "chat_closed" });
        self.open
    }

    /// Whether the chat panel is showing
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True between `submit` and the end of the matching `respond`
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Full transcript including the system prompt
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Messages a user would see
    pub fn visible_messages(&self) -> impl Iterator<Item = &Message> {
        self.transcript
            .iter()
            .filter(|m| m.role != MessageRole::System)
    }

    /// The ticket this conversation produced, if any
    pub fn outcome(&self) -> Option<&TicketOutcome> {
        self.outcome.as_ref()
    }

    /// Session store shared across conversations
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The backend this widget talks to
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Start a new conversation in the same session
    pub fn reset(&mut self) {
        self.transcript = vec![Message::system(INCIDENT_WIZARD_PROMPT)];
        self.outcome = None;
        self.loading = false;
        self.session.log_event("conversation_reset");
    }

    /// Submit user input and return the assistant message it produced.
    ///
    /// Blank input is ignored. Every failure is turned into an assistant
    /// message, so the transcript stays usable afterwards.
    pub async fn send(&mut self, input: &str) -> Option<&Message> {
        if !self.submit(input) {
            return None;
        }
        self.respond().await
    }

    /// First half of `send`: record the user message and mark the widget
    /// loading. Returns false for blank input or while a reply is pending.
    pub fn submit(&mut self, input: &str) -> bool {
        if self.loading || input.trim().is_empty() {
            return false;
        }

        self.session.record(
            ClickstreamEvent::new("user_message_sent").with_detail("textLen", input.chars().count()),
        );
        self.transcript.push(Message::user(input));
        self.loading = true;
        true
    }

    /// Second half of `send`: fetch the reply for the submitted message and
    /// clear the loading flag. Does nothing unless a message is pending.
    pub async fn respond(&mut self) -> Option<&Message> {
        if !self.loading {
            return None;
        }

        let reply = match self.converse().await {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Chat turn failed");
                Message::assistant(format!("Error: {}", e))
            }
        };

        self.loading = false;
        self.transcript.push(reply);
        self.transcript.last()
    }

    /// One round trip to the model plus any ticket work its reply triggers
    async fn converse(&mut self) -> BackendResult<Message> {
        let reply = self
            .backend
            .chat(ChatRequest::new(self.transcript.clone()))
            .await?;

        self.session.record(
            ClickstreamEvent::new("assistant_reply_received")
                .with_detail("textLen", reply.chars().count()),
        );

        if self.outcome.is_some() {
            return Ok(Message::assistant(reply));
        }

        let Some(draft) = parse_ticket_draft(&reply) else {
            return Ok(Message::assistant(reply));
        };

        self.session.log_event("incident_fields_collected");
        debug!(category = ?draft.category, "Ticket fields collected");

        Ok(self.file_ticket(draft).await)
    }

    /// Merge into a duplicate or open a new incident
    async fn file_ticket(&mut self, draft: TicketDraft) -> Message {
        let description = draft.description().unwrap_or_default().to_string();

        let duplicate = match self.find_duplicate(&description).await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "Duplicate check failed");
                return Message::assistant(format!(
                    "Error: could not check for duplicate incidents: {}",
                    e
                ));
            }
        };

        match duplicate {
            Some(best) => self.merge_into(best, &description).await,
            None => self.create(draft).await,
        }
    }

    /// The best match, if it clears the duplicate threshold
    async fn find_duplicate(&self, description: &str) -> BackendResult<Option<BestMatch>> {
        let incidents = self
            .backend
            .recent_incidents(self.config.recent_incident_limit)
            .await?;
        let scanned = incidents.len();

        let best = best_match(
            &self.backend,
            self.config.similarity,
            description,
            incidents,
        )
        .await?;

        debug!(
            scanned,
            best_score = best.as_ref().map_or(0.0, |b| b.score),
            threshold = self.config.duplicate_threshold,
            "Duplicate scan finished"
        );

        Ok(best.filter(|b| b.score >= self.config.duplicate_threshold))
    }

    async fn merge_into(&mut self, best: BestMatch, description: &str) -> Message {
        let number = best.incident.number.clone();
        let entry = merge_entry(description, self.session.correlation_id());
        let related = append_related_issue(&best.incident.u_related_issues, &entry);

        info!(number = %number, score = best.score, "Linking report to existing incident");

        let request = UpdateIncidentRequest {
            u_related_issues: related,
        };
        match self.backend.update_incident(number.clone(), request).await {
            Ok(()) => {
                self.session.record(
                    ClickstreamEvent::new("incident_merged").with_detail("number", number.clone()),
                );
                self.outcome = Some(TicketOutcome::Merged {
                    number: number.clone(),
                    score: best.score,
                });
                Message::assistant(format!(
                    "This looks very similar to existing incident {}. It may be a duplicate, \
                     so your report has been added to its related issues instead of opening a new incident.",
                    number
                ))
            }
            Err(e) => {
                warn!(number = %number, error = %e, "Incident merge failed");
                Message::assistant(format!(
                    "Error: linking to existing incident {} failed: {}",
                    number, e
                ))
            }
        }
    }

    async fn create(&mut self, draft: TicketDraft) -> Message {
        let payload = draft.into_payload(&self.session);

        match self.backend.create_incident(payload).await {
            Ok(CreateOutcome::Created(created)) => {
                self.session.record(
                    ClickstreamEvent::new("incident_created")
                        .with_detail("number", created.number.clone()),
                );
                let message = format!(
                    "Incident created successfully.\nNumber: {}\nSys_ID: {}",
                    created.number, created.sys_id
                );
                self.outcome = Some(TicketOutcome::Created {
                    number: created.number,
                    sys_id: created.sys_id,
                });
                Message::assistant(message)
            }
            Ok(CreateOutcome::Rejected { status, details }) => Message::assistant(format!(
                "Incident creation failed ({}).\nDetails: {}",
                status, details
            )),
            Err(e) => {
                warn!(error = %e, "Incident create request failed");
                Message::assistant(format!(
                    "Incident creation failed: network error while creating incident: {}",
                    e
                ))
            }
        }
    }
}

/// The line added to a duplicate's related issues: description plus correlation id.
pub fn merge_entry(description: &str, correlation_id: &str) -> String {
    let one_line = description.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{} (correlation_id: {})", one_line, correlation_id)
}

/// Append `entry` on its own line unless it is already present.
pub fn append_related_issue(existing: &str, entry: &str) -> String {
    if existing.trim().is_empty() {
        entry.to_string()
    } else if existing.lines().any(|line| line == entry) {
        existing.to_string()
    } else {
        format!("{}\n{}", existing, entry)
    }
}
