// Sharing notes goes through the user's own git checkout; nothing here runs git.

use crate::notes::NOTES_FILE_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Push,
    Fetch,
}

impl SyncAction {
    pub fn label(&self) -> &'static str {
        match self {
            SyncAction::Push => "Push changes",
            SyncAction::Fetch => "Fetch changes",
        }
    }
}

/// Shell commands the user should run by hand for `action`.
pub fn commands(action: SyncAction) -> Vec<String> {
    match action {
        SyncAction::Push => vec![
            format!("git add {}", NOTES_FILE_NAME),
            "git commit -m \"Update notes\"".to_string(),
            "git push".to_string(),
        ],
        SyncAction::Fetch => vec!["git pull".to_string()],
    }
}

/// Single-line form used by the TUI notice bar.
pub fn instructions(action: SyncAction) -> String {
    format!(
        "{}: run `{}` in your notes repository",
        action.label(),
        commands(action).join(" && ")
    )
}
