//! PostgreSQL catalog store tests
//!
//! These need a reachable database:
//! `DATABASE_URL=postgres://... cargo test --test store_tests -- --ignored`

use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use catalog_server::{
    models::{Author, AuthorData, BookData, BookInstance, BookInstanceData, BookInstanceStatus},
    repository::{CatalogStore, Repository},
};

async fn repository() -> Repository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Repository::new(pool)
}

fn author_data(first: &str, family: &str) -> AuthorData {
    AuthorData {
        first_name: first.to_string(),
        family_name: family.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1920, 1, 2),
        date_of_death: None,
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_author_round_trip() {
    let repo = repository().await;
    repo.ping().await.expect("ping");

    let created = repo.insert_author(&author_data("Isaac", "Asimov")).await.unwrap();
    assert_eq!(created.first_name, "Isaac");
    assert_eq!(created.date_of_birth, NaiveDate::from_ymd_opt(1920, 1, 2));

    let found = repo.find_author(created.id).await.unwrap();
    assert_eq!(found.as_ref(), Some(&created));
    assert!(repo.list_authors().await.unwrap().iter().any(|a| a.id == created.id));

    let renamed = Author {
        family_name: "Azimov".to_string(),
        ..created.clone()
    };
    let replaced = repo.replace_author(&renamed).await.unwrap();
    assert_eq!(replaced, Some(renamed.clone()));
    // replacing again leaves the record unchanged
    assert_eq!(repo.replace_author(&renamed).await.unwrap(), Some(renamed));

    assert!(repo.remove_author(created.id).await.unwrap());
    assert!(!repo.remove_author(created.id).await.unwrap());
    assert_eq!(repo.find_author(created.id).await.unwrap(), None);

    let missing = Author {
        id: Uuid::new_v4(),
        ..created
    };
    assert_eq!(repo.replace_author(&missing).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_books_by_author() {
    let repo = repository().await;
    let author = repo.insert_author(&author_data("Ursula", "LeGuin")).await.unwrap();

    let book = repo
        .insert_book(&BookData {
            title: "The Dispossessed".to_string(),
            summary: "Anarres".to_string(),
            author: author.id,
        })
        .await
        .unwrap();
    assert_eq!(book.author, author.id);

    let books = repo.books_by_author(author.id).await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "The Dispossessed");
    assert_eq!(books[0].url, format!("/catalog/book/{}", book.id));
    assert!(repo.list_books().await.unwrap().iter().any(|b| b.id == book.id));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_book_instance_resolves_book() {
    let repo = repository().await;
    let book = repo
        .insert_book(&BookData {
            title: "Foundation".to_string(),
            summary: "Psychohistory".to_string(),
            author: Uuid::new_v4(),
        })
        .await
        .unwrap();
    let due_back = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

    let instance = repo
        .insert_book_instance(&BookInstanceData {
            book: book.id,
            imprint: "Gnome Press".to_string(),
            status: BookInstanceStatus::Loaned,
            due_back,
        })
        .await
        .unwrap();
    assert_eq!(instance.status, BookInstanceStatus::Loaned);

    let record = repo.find_book_instance(instance.id).await.unwrap().unwrap();
    assert_eq!(record.instance, instance);
    assert_eq!(record.book.as_ref().map(|b| b.title.as_str()), Some("Foundation"));

    let returned = BookInstance {
        status: BookInstanceStatus::Available,
        ..instance.clone()
    };
    assert_eq!(
        repo.replace_book_instance(&returned).await.unwrap(),
        Some(returned.clone())
    );

    assert!(repo.remove_book_instance(instance.id).await.unwrap());
    assert!(repo.find_book_instance(instance.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_dangling_book_reference_lists_without_book() {
    let repo = repository().await;
    let instance = repo
        .insert_book_instance(&BookInstanceData {
            book: Uuid::new_v4(),
            imprint: "Orphan Press".to_string(),
            status: BookInstanceStatus::default(),
            due_back: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        })
        .await
        .unwrap();

    let listed = repo.list_book_instances().await.unwrap();
    let record = listed
        .iter()
        .find(|r| r.instance.id == instance.id)
        .expect("instance listed");
    assert!(record.book.is_none());

    repo.remove_book_instance(instance.id).await.unwrap();
}
