/// Rules a note's text must satisfy before the store accepts it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRules {
    /// Accept text that is empty or whitespace only.
    pub allow_empty: bool,
    /// Upper bound in characters, if any.
    pub max_length: Option<usize>,
}

impl TextRules {
    pub fn check(&self, text: &str) -> Result<(), String> {
        if !self.allow_empty && text.trim().is_empty() {
            return Err("Text must not be empty".to_string());
        }
        validate_input_string(text, self.max_length)
    }
}

// Rejects null bytes and control characters other than line breaks and tabs
fn validate_input_string(input: &str, max_length: Option<usize>) -> Result<(), String> {
    if input.contains('\0') {
        return Err("Text contains null bytes".to_string());
    }

    for ch in input.chars() {
        if ch.is_control() && ch != '\n' && ch != '\r' && ch != '\t' {
            return Err("Text contains invalid control characters".to_string());
        }
    }

    if let Some(max_len) = max_length {
        if input.chars().count() > max_len {
            return Err(format!("Text exceeds maximum length of {} characters", max_len));
        }
    }

    Ok(())
}
