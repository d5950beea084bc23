//! Note validation.
//!
//! Notes are free-form: both title and content may be empty. Only the
//! title carries a length bound.

/// Maximum length of a note title in characters.
pub const MAX_NOTE_TITLE_LENGTH: usize = 255;

/// Validate a note title: empty is allowed, overlong is not.
pub fn validate_note_title(title: &str) -> Result<(), String> {
    if title.chars().count() > MAX_NOTE_TITLE_LENGTH {
        return Err(format!(
            "Note title exceeds maximum length of {MAX_NOTE_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}
