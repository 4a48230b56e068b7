//! lineup-render: project a `Snapshot` into a chat message payload.
//!
//! Pure projection: content text, one embed per slot, and the button row.
//! The transport that ships the payload to a chat platform stays outside
//! this repo.

use serde::Serialize;

use lineup_core::Snapshot;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Primary,
    Danger,
}

/// What an activation of the button should dispatch back into the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ButtonAction {
    Reroll { slot: usize },
    Lock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    pub style: ButtonStyle,
    pub disabled: bool,
    pub action: ButtonAction,
}

/// Everything the transport needs to build or edit the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagePayload {
    pub content: String,
    pub embeds: Vec<Embed>,
    pub buttons: Vec<Button>,
}

/// Render the message for a snapshot.
///
/// Buttons are omitted entirely for selections that never offered rerolls
/// and disabled (but kept, so the final hand stays visible as-is) once the
/// selection locks.
pub fn render(snap: &Snapshot) -> MessagePayload {
    MessagePayload {
        content: content_text(snap),
        embeds: embeds(snap),
        buttons: buttons(snap),
    }
}

fn content_text(snap: &Snapshot) -> String {
    let mut output = format!("**Character Rolls for {}:**\n", mention(snap.owner));
    output.push_str(&format!(
        "Select a character below to reroll them in your lineup. Remaining rolls: ***{}***",
        snap.rerolls_left
    ));
    output
}

fn embeds(snap: &Snapshot) -> Vec<Embed> {
    snap.chosen
        .iter()
        .enumerate()
        .map(|(i, c)| Embed {
            title: format!("**{}:** {}", i + 1, c.text),
            image_url: c.image.clone(),
        })
        .collect()
}

fn buttons(snap: &Snapshot) -> Vec<Button> {
    if !snap.rerolls_offered {
        return Vec::new();
    }
    let mut out: Vec<Button> = snap
        .chosen
        .iter()
        .enumerate()
        .map(|(slot, c)| Button {
            label: c.text.clone(),
            style: ButtonStyle::Primary,
            disabled: snap.locked,
            action: ButtonAction::Reroll { slot },
        })
        .collect();
    out.push(Button {
        label: "Lock".to_string(),
        style: ButtonStyle::Danger,
        disabled: snap.locked,
        action: ButtonAction::Lock,
    });
    out
}

/// Platform mention markup for a user id.
fn mention(owner: u64) -> String {
    format!("<@{}>", owner)
}
