//! `PgTodoStore` against a real PostgreSQL database.
//!
//! Runs only when `TEST_DATABASE_URL` points at a disposable database; the
//! test creates and drops its own table.

use todo_server::{PgTodoStore, Status, Todo, TodoFilter, TodoStore};
use uuid::Uuid;

async fn store() -> Option<PgTodoStore> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let store = PgTodoStore::connect_lazy(&url, 2).unwrap();
    sqlx::query("DROP TABLE IF EXISTS todo")
        .execute(store.pool())
        .await
        .unwrap();
    sqlx::query("CREATE TABLE todo (todo_id UUID PRIMARY KEY, text TEXT, status CHAR(1))")
        .execute(store.pool())
        .await
        .unwrap();
    Some(store)
}

fn todo(text: &str, status: Status) -> Todo {
    Todo {
        id: Uuid::new_v4(),
        text: text.to_string(),
        status,
    }
}

#[tokio::test]
async fn postgres_store_crud() {
    let Some(store) = store().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let a = todo("buy milk", Status::NotDone);
    let b = todo("100% juice", Status::Done);
    let c = todo("1000 juice", Status::Done);
    for t in [&a, &b, &c] {
        store.create(t).await.unwrap();
    }

    // primary key violation surfaces as an error
    assert!(store.create(&a).await.is_err());

    assert_eq!(store.get(a.id).await.unwrap(), Some(a.clone()));
    assert_eq!(store.get(Uuid::new_v4()).await.unwrap(), None);

    let all = store.list(&TodoFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    // '%' is matched literally
    let pct = store
        .list(&TodoFilter::new(Some("0%".to_string()), None))
        .await
        .unwrap();
    assert_eq!(pct, vec![b.clone()]);

    let done_juice = store
        .list(&TodoFilter::new(Some("juice".to_string()), Some(Status::Done)))
        .await
        .unwrap();
    assert_eq!(done_juice.len(), 2);

    let changed = Todo {
        id: a.id,
        text: "buy oat milk".to_string(),
        status: Status::Done,
    };
    assert_eq!(store.update(&changed).await.unwrap(), Some(changed.clone()));
    assert_eq!(store.update(&todo("ghost", Status::NotDone)).await.unwrap(), None);

    assert!(store.delete(a.id).await.unwrap());
    assert!(!store.delete(a.id).await.unwrap());
    assert_eq!(store.get(a.id).await.unwrap(), None);
}
