//! Edit commands triggered from shortcuts and the toolbar

mod shortcuts;

pub use shortcuts::handle_keyboard_shortcuts;

use bevy::prelude::*;
use rts_map_core::HistoryOutcome;

use crate::project::EditorSession;
use crate::ui::PendingAction;
use crate::EditorState;

/// System to process history-related pending actions
pub fn process_edit_actions(
    mut editor_state: ResMut<EditorState>,
    mut session: ResMut<EditorSession>,
) {
    let Some(action) = editor_state.pending_action.take() else {
        return;
    };

    let result = match action {
        PendingAction::Undo => session.undo().map(|outcome| describe("Undo", outcome)),
        PendingAction::Redo => session.redo().map(|outcome| describe("Redo", outcome)),
        PendingAction::Commit => session
            .commit()
            .map(|_| Some("Committed edits to level".to_string())),
        // File operations are handled in dialogs.rs
        _ => {
            editor_state.pending_action = Some(action);
            return;
        }
    };

    match result {
        Ok(Some(status)) => editor_state.status = Some(status),
        Ok(None) => {}
        Err(e) => {
            error!("{:?} failed: {}", action, e);
            editor_state.error_message = Some(format!("{:?} failed: {}", action, e));
        }
    }
}

fn describe(what: &str, outcome: HistoryOutcome) -> Option<String> {
    match outcome {
        HistoryOutcome::Applied(tool) => Some(format!("{} ({})", what, tool)),
        HistoryOutcome::Empty => Some(format!("Nothing to {}", what.to_lowercase())),
        HistoryOutcome::Unclaimed(kind) => {
            warn!("{} dropped a {:?} record no tool understands", what, kind);
            Some(format!("{} skipped an unsupported edit", what))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rts_map_core::{ToolKind, OperationKind};

    #[test]
    fn test_describe_outcomes() {
        assert_eq!(
            describe("Undo", HistoryOutcome::Applied(ToolKind::Paint)),
            Some("Undo (TILE_PAINT)".to_string())
        );
        assert_eq!(
            describe("Redo", HistoryOutcome::Empty),
            Some("Nothing to redo".to_string())
        );
        assert!(describe("Undo", HistoryOutcome::Unclaimed(OperationKind::ObjectPlacement))
            .is_some());
    }
}
