use std::fmt::Write;

use crate::client::{EditMode, NoteClient};
use crate::models::NoteId;
use crate::notify::Notifier;
use crate::store::NoteStore;

pub const EMPTY_MESSAGE: &str = "No notes yet.";

pub const HELP: &str = "\
Commands:
  type <text>      set the input text
  add [text]       add a note from the input text
  edit <id>        load a note into the input for editing
  save [text]      save the note being edited
  cancel           stop editing
  delete <id>      delete a note
  clear            delete all listed notes
  search [query]   filter notes (empty query shows all)
  list             show the notes again
  reload           fetch the notes from the store
  help             show this help
  quit             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type(String),
    Add(Option<String>),
    Edit(NoteId),
    Save(Option<String>),
    Cancel,
    Delete(NoteId),
    Clear,
    Search(String),
    List,
    Reload,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let optional = |rest: &str| (!rest.is_empty()).then(|| rest.to_string());
        let id = |rest: &str| {
            rest.parse::<NoteId>()
                .map_err(|_| format!("'{}' is not a note id", rest))
        };

        match word.to_lowercase().as_str() {
            "type" => Ok(Command::Type(rest.to_string())),
            "add" => Ok(Command::Add(optional(rest))),
            "edit" => id(rest).map(Command::Edit),
            "save" => Ok(Command::Save(optional(rest))),
            "cancel" => Ok(Command::Cancel),
            "delete" | "del" => id(rest).map(Command::Delete),
            "clear" => Ok(Command::Clear),
            "search" => Ok(Command::Search(rest.to_string())),
            "list" | "ls" => Ok(Command::List),
            "reload" => Ok(Command::Reload),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Ok(Command::List),
            other => Err(format!("unknown command '{}', try 'help'", other)),
        }
    }
}

/// Text rendering of the client's current state.
pub fn render<S: NoteStore, N: Notifier>(client: &NoteClient<S, N>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "You're typing: {}", client.draft());
    match client.mode() {
        EditMode::Idle => {
            let _ = writeln!(out, "[add] to create a note");
        }
        EditMode::Editing(id) => {
            let _ = writeln!(out, "[save] to update note {} ([cancel] to stop)", id);
        }
    }
    if !client.search().is_empty() {
        let _ = writeln!(out, "Search: {}", client.search());
    }

    let visible = client.visible_notes();
    if visible.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_MESSAGE);
    } else {
        for note in visible {
            let _ = writeln!(out, "[{}] {}  ({})", note.id, note.text, note.local_date());
        }
        let _ = writeln!(out, "[clear] to delete all");
    }

    out
}
