//! Category constants and validation.
//!
//! Categories are per-user labels for notes. Names are unique within a
//! user's account and colors are 6-hex-digit codes. The default set below
//! is seeded on demand by the seeding endpoint.

use std::sync::OnceLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a category name in characters.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// Color assigned to a category when the client does not supply one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#F5C4A1";

/// A starter category created by the seeding operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultCategory {
    pub name: &'static str,
    pub color: &'static str,
}

/// The fixed starter set, in seeding order.
///
/// Seeding is idempotent: entries that already exist for the user are left
/// untouched and are not reported as created.
pub const DEFAULT_CATEGORIES: &[DefaultCategory] = &[
    DefaultCategory {
        name: "Random Thoughts",
        color: "#F5C4A1",
    },
    DefaultCategory {
        name: "School",
        color: "#F5E6A3",
    },
    DefaultCategory {
        name: "Personal",
        color: "#A8D5D8",
    },
];

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a category name: non-empty and within the length limit.
pub fn validate_category_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Category name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(format!(
            "Category name exceeds maximum length of {MAX_CATEGORY_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate a color code: `#` followed by exactly six hex digits.
pub fn validate_color(color: &str) -> Result<(), String> {
    static COLOR_RE: OnceLock<Regex> = OnceLock::new();
    let re = COLOR_RE.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap());

    if re.is_match(color) {
        Ok(())
    } else {
        Err(format!(
            "Invalid color '{color}'. Expected a 6-hex-digit code like #F5C4A1"
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
