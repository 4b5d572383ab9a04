mod helpers;

use menuplan_db::DocumentKey;
use serde::{Deserialize, Serialize};
use temp_dir::TempDir;

#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
struct Note {
    title: String,
    tags: Vec<String>,
}

#[tokio::test]
async fn missing_document_loads_default() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let storage = helpers::setup_test_storage(dir.child("db.sqlite3")).await?;

    let note: Note = storage.load(DocumentKey::MealPlan).await?;
    assert_eq!(note, Note::default());
    assert!(storage.get_raw(DocumentKey::MealPlan).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn save_overwrites_whole_document() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let storage = helpers::setup_test_storage(dir.child("db.sqlite3")).await?;

    let first = Note {
        title: "first".to_owned(),
        tags: vec!["a".to_owned(), "b".to_owned()],
    };
    storage.save(DocumentKey::Templates, &first).await?;

    let second = Note {
        title: "second".to_owned(),
        tags: vec![],
    };
    storage.save(DocumentKey::Templates, &second).await?;

    let loaded: Note = storage.load(DocumentKey::Templates).await?;
    assert_eq!(loaded, second);

    Ok(())
}

#[tokio::test]
async fn malformed_document_resets_to_default() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let storage = helpers::setup_test_storage(dir.child("db.sqlite3")).await?;

    storage.put_raw(DocumentKey::ShoppingList, "{not json").await?;

    let loaded: Vec<Note> = storage.load(DocumentKey::ShoppingList).await?;
    assert!(loaded.is_empty());

    Ok(())
}

#[tokio::test]
async fn remove_deletes_document() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let storage = helpers::setup_test_storage(dir.child("db.sqlite3")).await?;

    storage.put_raw(DocumentKey::Theme, "\"ocean\"").await?;
    assert_eq!(
        storage.get_raw(DocumentKey::Theme).await?.as_deref(),
        Some("\"ocean\"")
    );

    storage.remove(DocumentKey::Theme).await?;
    assert!(storage.get_raw(DocumentKey::Theme).await?.is_none());

    Ok(())
}

#[test]
fn document_keys_match_storage_names() {
    assert_eq!(DocumentKey::MealPlan.as_ref(), "mealPlan");
    assert_eq!(DocumentKey::ShoppingList.as_ref(), "shoppingList");
    assert_eq!(DocumentKey::CustomSlots.as_ref(), "customSlots");
    assert_eq!(DocumentKey::Templates.as_ref(), "mealTemplates");
    assert_eq!(DocumentKey::Theme.as_ref(), "theme");
}
