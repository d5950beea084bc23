//! Domain logic for the quillpad note-taking service.
//!
//! Pure validation rules, constants, and shared types. No I/O lives here;
//! persistence is in `quillpad-db` and the HTTP surface in `quillpad-api`.

pub mod categories;
pub mod error;
pub mod notes;
pub mod types;
pub mod users;
