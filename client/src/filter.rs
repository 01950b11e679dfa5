use crate::models::Note;

/// Notes whose text contains `search`, ignoring case. An empty search matches everything.
pub fn filter_notes<'a>(notes: &'a [Note], search: &str) -> Vec<&'a Note> {
    let needle = search.to_lowercase();
    notes
        .iter()
        .filter(|note| note.text.to_lowercase().contains(&needle))
        .collect()
}
