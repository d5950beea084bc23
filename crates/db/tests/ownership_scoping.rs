//! Integration tests for the authorization/scoping core.
//!
//! Exercises the repository layer against a real database:
//! - Per-user isolation of categories and notes
//! - Foreign ids behaving exactly like missing ids
//! - The category filter on note listings
//! - Cascade behaviour (user delete, category delete)

use sqlx::PgPool;

use quillpad_db::models::category::CreateCategory;
use quillpad_db::models::note::CreateNote;
use quillpad_db::models::user::CreateUser;
use quillpad_db::repositories::{CategoryRepo, NoteRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, email: &str) -> i64 {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: "$argon2id$fake-hash-for-tests".to_string(),
        first_name: String::new(),
        last_name: String::new(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

async fn create_category(pool: &PgPool, user_id: i64, name: &str) -> i64 {
    let input = CreateCategory {
        name: name.to_string(),
        color: Some("#112233".to_string()),
    };
    CategoryRepo::create(pool, user_id, &input)
        .await
        .expect("category creation should succeed")
        .id
}

async fn create_note(pool: &PgPool, user_id: i64, title: &str, category_id: Option<i64>) -> i64 {
    let input = CreateNote {
        title: Some(title.to_string()),
        content: Some("content".to_string()),
        category_id,
    };
    NoteRepo::create(pool, user_id, &input)
        .await
        .expect("note creation should succeed")
        .id
}

// ---------------------------------------------------------------------------
// Category scoping
// ---------------------------------------------------------------------------

/// Categories created by one user never appear in another user's listing.
#[sqlx::test(migrations = "./migrations")]
async fn test_category_listing_is_user_scoped(pool: PgPool) {
    let alice = create_user(&pool, "alice@example.com").await;
    let bob = create_user(&pool, "bob@example.com").await;

    create_category(&pool, alice, "Work").await;
    create_category(&pool, bob, "Bob Stuff").await;

    let alice_cats = CategoryRepo::list_for_user(&pool, alice).await.unwrap();
    assert_eq!(alice_cats.len(), 1);
    assert_eq!(alice_cats[0].name, "Work");

    let bob_cats = CategoryRepo::list_for_user(&pool, bob).await.unwrap();
    assert_eq!(bob_cats.len(), 1);
    assert_eq!(bob_cats[0].name, "Bob Stuff");
}

/// Another user's category id resolves the same as a missing one.
#[sqlx::test(migrations = "./migrations")]
async fn test_foreign_category_indistinguishable_from_missing(pool: PgPool) {
    let alice = create_user(&pool, "alice@example.com").await;
    let bob = create_user(&pool, "bob@example.com").await;
    let bob_cat = create_category(&pool, bob, "Bob Stuff").await;

    let found = CategoryRepo::find_for_user(&pool, alice, bob_cat).await.unwrap();
    let missing = CategoryRepo::find_for_user(&pool, alice, 999_999).await.unwrap();
    assert!(found.is_none());
    assert!(missing.is_none());

    assert!(!CategoryRepo::delete_for_user(&pool, alice, bob_cat).await.unwrap());
    // Bob's category is untouched.
    assert!(CategoryRepo::find_for_user(&pool, bob, bob_cat).await.unwrap().is_some());
}

/// Listing is ordered by name and carries live note counts.
#[sqlx::test(migrations = "./migrations")]
async fn test_category_listing_order_and_counts(pool: PgPool) {
    let alice = create_user(&pool, "alice@example.com").await;
    let zebra = create_category(&pool, alice, "Zebra").await;
    let apple = create_category(&pool, alice, "Apple").await;

    create_note(&pool, alice, "one", Some(zebra)).await;
    create_note(&pool, alice, "two", Some(zebra)).await;
    create_note(&pool, alice, "three", Some(apple)).await;
    create_note(&pool, alice, "loose", None).await;

    let cats = CategoryRepo::list_for_user(&pool, alice).await.unwrap();
    assert_eq!(cats.len(), 2);
    assert_eq!(cats[0].name, "Apple");
    assert_eq!(cats[0].notes_count, 1);
    assert_eq!(cats[1].name, "Zebra");
    assert_eq!(cats[1].notes_count, 2);
}

/// Two users may use the same category name; one user may not.
#[sqlx::test(migrations = "./migrations")]
async fn test_category_name_unique_per_user(pool: PgPool) {
    let alice = create_user(&pool, "alice@example.com").await;
    let bob = create_user(&pool, "bob@example.com").await;

    create_category(&pool, alice, "Work").await;
    // Same name, different user: fine.
    create_category(&pool, bob, "Work").await;

    // Same name, same user: storage-level unique violation.
    let input = CreateCategory {
        name: "Work".to_string(),
        color: None,
    };
    let err = CategoryRepo::create(&pool, alice, &input)
        .await
        .expect_err("duplicate name must be rejected");
    assert!(
        quillpad_db::is_unique_violation(&err, "uq_categories_user_name"),
        "expected uq_categories_user_name violation, got {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Note scoping
// ---------------------------------------------------------------------------

/// Notes created by one user never appear in another user's listing.
#[sqlx::test(migrations = "./migrations")]
async fn test_note_listing_is_user_scoped(pool: PgPool) {
    let alice = create_user(&pool, "alice@example.com").await;
    let bob = create_user(&pool, "bob@example.com").await;

    create_note(&pool, alice, "Alice note", None).await;
    create_note(&pool, bob, "Bob note", None).await;

    let alice_notes = NoteRepo::list_for_user(&pool, alice, None, None, None)
        .await
        .unwrap();
    assert_eq!(alice_notes.len(), 1);
    assert_eq!(alice_notes[0].title, "Alice note");

    assert_eq!(NoteRepo::count_for_user(&pool, alice, None).await.unwrap(), 1);
    assert_eq!(NoteRepo::count_for_user(&pool, bob, None).await.unwrap(), 1);
}

/// Filtering by a category restricts the listing; filtering by someone
/// else's category yields an empty result, not an error.
#[sqlx::test(migrations = "./migrations")]
async fn test_note_listing_category_filter(pool: PgPool) {
    let alice = create_user(&pool, "alice@example.com").await;
    let bob = create_user(&pool, "bob@example.com").await;

    let work = create_category(&pool, alice, "Work").await;
    let home = create_category(&pool, alice, "Home").await;
    let bob_cat = create_category(&pool, bob, "Bob Stuff").await;

    create_note(&pool, alice, "Note 1", Some(work)).await;
    create_note(&pool, alice, "Note 2", Some(home)).await;
    create_note(&pool, bob, "Bob note", Some(bob_cat)).await;

    let filtered = NoteRepo::list_for_user(&pool, alice, Some(work), None, None)
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].title, "Note 1");

    let foreign = NoteRepo::list_for_user(&pool, alice, Some(bob_cat), None, None)
        .await
        .unwrap();
    assert!(foreign.is_empty());
}

/// Another user's note id resolves the same as a missing one, for read,
/// update, and delete alike.
#[sqlx::test(migrations = "./migrations")]
async fn test_foreign_note_indistinguishable_from_missing(pool: PgPool) {
    let alice = create_user(&pool, "alice@example.com").await;
    let bob = create_user(&pool, "bob@example.com").await;
    let bob_note = create_note(&pool, bob, "Bob note", None).await;

    assert!(NoteRepo::find_for_user(&pool, alice, bob_note).await.unwrap().is_none());
    assert!(NoteRepo::find_for_user(&pool, alice, 999_999).await.unwrap().is_none());

    let update = quillpad_db::models::note::UpdateNote {
        title: Some("hijacked".to_string()),
        ..Default::default()
    };
    assert!(NoteRepo::update_for_user(&pool, alice, bob_note, &update)
        .await
        .unwrap()
        .is_none());
    assert!(!NoteRepo::delete_for_user(&pool, alice, bob_note).await.unwrap());

    // Bob's note is untouched.
    let note = NoteRepo::find_for_user(&pool, bob, bob_note).await.unwrap().unwrap();
    assert_eq!(note.title, "Bob note");
}

/// Notes list most-recently-updated first.
#[sqlx::test(migrations = "./migrations")]
async fn test_note_listing_ordered_by_updated_at(pool: PgPool) {
    let alice = create_user(&pool, "alice@example.com").await;
    let first = create_note(&pool, alice, "first", None).await;
    let _second = create_note(&pool, alice, "second", None).await;

    // Touch the older note; it must rise to the top.
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let update = quillpad_db::models::note::UpdateNote {
        content: Some("touched".to_string()),
        ..Default::default()
    };
    NoteRepo::update_for_user(&pool, alice, first, &update)
        .await
        .unwrap()
        .unwrap();

    let notes = NoteRepo::list_for_user(&pool, alice, None, None, None)
        .await
        .unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].title, "first");
    assert_eq!(notes[1].title, "second");
}

// ---------------------------------------------------------------------------
// Cascade behaviour
// ---------------------------------------------------------------------------

/// Deleting a category clears the reference on its notes; the notes
/// themselves survive.
#[sqlx::test(migrations = "./migrations")]
async fn test_category_delete_clears_note_references(pool: PgPool) {
    let alice = create_user(&pool, "alice@example.com").await;
    let work = create_category(&pool, alice, "Work").await;

    let note_a = create_note(&pool, alice, "A", Some(work)).await;
    let note_b = create_note(&pool, alice, "B", Some(work)).await;

    assert!(CategoryRepo::delete_for_user(&pool, alice, work).await.unwrap());

    let notes = NoteRepo::list_for_user(&pool, alice, None, None, None)
        .await
        .unwrap();
    assert_eq!(notes.len(), 2, "note count unchanged");

    for id in [note_a, note_b] {
        let note = NoteRepo::find_for_user(&pool, alice, id).await.unwrap().unwrap();
        assert_eq!(note.category_id, None);
        assert_eq!(note.category_name, None);
        assert_eq!(note.category_color, None);
    }
}

/// Deleting a user removes their categories and notes outright.
#[sqlx::test(migrations = "./migrations")]
async fn test_user_delete_cascades(pool: PgPool) {
    let alice = create_user(&pool, "alice@example.com").await;
    let work = create_category(&pool, alice, "Work").await;
    create_note(&pool, alice, "A", Some(work)).await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(alice)
        .execute(&pool)
        .await
        .unwrap();

    let (categories,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(&pool)
        .await
        .unwrap();
    let (notes,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(categories, 0);
    assert_eq!(notes, 0);
}
