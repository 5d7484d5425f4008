//! Handshake (intent selection)
//!
//! Driven by the `session-start` hook, and safe to re-run idempotently by
//! any hook that discovers an otherwise-initialized session with no bound
//! intent. Loads the intent definitions file and selects (at most) one
//! intent to bind to the session.

use crate::error::Result;
use crate::types::Session;

use super::intent_file;
use super::types::Intent;

/// XML handshake payload handed back to the agent after a successful bind.
/// `<owned_scope>`/`<constraints>`/`<acceptance_criteria>` are empty tags
/// when the intent carries no entries for that field.
pub fn render_payload(intent: &Intent) -> String {
    let mut out = String::new();
    out.push_str("<intent_context>\n");
    out.push_str(&format!("  <id>{}</id>\n", xml_escape(&intent.id)));
    out.push_str("  <owned_scope>\n");
    for glob in &intent.owned_scope {
        out.push_str(&format!("    <glob>{}</glob>\n", xml_escape(glob)));
    }
    out.push_str("  </owned_scope>\n");
    out.push_str("  <constraints>\n");
    for item in &intent.constraints {
        out.push_str(&format!("    <item>{}</item>\n", xml_escape(item)));
    }
    out.push_str("  </constraints>\n");
    out.push_str("  <acceptance_criteria>\n");
    for item in &intent.acceptance_criteria {
        out.push_str(&format!("    <item>{}</item>\n", xml_escape(item)));
    }
    out.push_str("  </acceptance_criteria>\n");
    out.push_str("</intent_context>");
    out
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Select which intent (if any) to bind, per §4.6:
/// - a `requested_intent_id` naming a loaded intent wins;
/// - else, if exactly one intent is declared, bind it;
/// - else bind none.
pub fn select(requested_intent_id: Option<&str>, intents: &[Intent]) -> Option<&Intent> {
    if let Some(requested) = requested_intent_id {
        if let Some(found) = intents.iter().find(|i| i.id == requested) {
            return Some(found);
        }
    }
    match intents {
        [only] => Some(only),
        _ => None,
    }
}

/// Run the handshake against `session`'s working directory, binding the
/// selected intent onto the session and returning the XML payload to show
/// the agent. Returns `None` (session left unbound) when no intent could be
/// selected.
pub fn run(session: &mut Session, requested_intent_id: Option<&str>) -> Result<Option<String>> {
    let intents = intent_file::load_intents(&session.working_directory)?;
    let Some(selected) = select(requested_intent_id, &intents) else {
        session.active_intent_id = None;
        return Ok(None);
    };
    session.active_intent_id = Some(selected.id.clone());
    Ok(Some(render_payload(selected)))
}
