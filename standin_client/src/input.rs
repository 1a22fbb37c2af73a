//! Console input.
//!
//! Parses the client's console lines into commands. `kill` and `collect`
//! stand in for the gameplay events that would normally arrive from the
//! network and deactivate an entity.

use standin_shared::entity::{MoverId, PickupId};

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Status,
    /// Deactivate a mover so the next poll reaps it.
    Kill(MoverId),
    /// Deactivate a pickup so the next poll reaps it.
    Collect(PickupId),
    Help,
}

/// Parses a console line. Empty input yields `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ClientCommand>, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = tokens.split_first() else {
        return Ok(None);
    };

    let id_arg = |usage: &str| -> Result<u64, String> {
        rest.first()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| format!("Usage: {usage}"))
    };

    let cmd = match head {
        "status" => ClientCommand::Status,
        "kill" => ClientCommand::Kill(MoverId(id_arg("kill <mover-id>")?)),
        "collect" => ClientCommand::Collect(PickupId(id_arg("collect <pickup-id>")?)),
        "help" => ClientCommand::Help,
        other => return Err(format!("Unknown command: {other}")),
    };
    Ok(Some(cmd))
}
