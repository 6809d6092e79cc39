use thiserror::Error;

/// User-input errors raised by table actions.
///
/// These are shown to the user as a modal alert: `title()` is the alert title
/// and the `Display` output is the alert message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The submitted name was blank. `renaming` tells a rename from an add.
    #[error("{}", empty_name_message(.renaming))]
    EmptyName { renaming: bool },

    /// The text prompt handed back no value where one was required.
    #[error("An error occurred while trying to handle the name.")]
    PromptFailure,

    /// A row position that is not in the current view.
    #[error("Row {0} is not in the table")]
    NoSuchRow(usize),
}

fn empty_name_message(renaming: &bool) -> &'static str {
    if *renaming {
        "The name must not be empty"
    } else {
        "The name was empty"
    }
}

impl TableError {
    /// Alert title for this error.
    pub fn title(&self) -> &'static str {
        match self {
            TableError::EmptyName { .. } => "Empty Name",
            TableError::PromptFailure | TableError::NoSuchRow(_) => "Error",
        }
    }
}
