use board_core::db::open_db_in_memory;
use board_core::{
    AlertDispatcher, CreatePost, KeywordAlert, MemorySink, PostQuery, PostService,
    SqlitePostRepository,
};
use rusqlite::Connection;
use std::sync::Arc;

type Service<'c> = PostService<SqlitePostRepository<'c>, Vec<KeywordAlert>>;

fn service(conn: &Connection) -> Service<'_> {
    PostService::new(
        SqlitePostRepository::try_new(conn).unwrap(),
        AlertDispatcher::new(Vec::new(), Arc::new(MemorySink::new())),
    )
}

fn publish(service: &Service<'_>, title: &str, author: &str) -> i64 {
    service
        .create(CreatePost {
            title: title.to_string(),
            content: "body".to_string(),
            author: author.to_string(),
            password: "pw".to_string(),
        })
        .unwrap()
        .id
}

fn titled(title: &str) -> PostQuery {
    PostQuery {
        page: 1,
        limit: 10,
        title: Some(title.to_string()),
        ..PostQuery::default()
    }
}

fn matched_ids(service: &Service<'_>, query: PostQuery) -> Vec<i64> {
    let mut ids = service
        .read(query)
        .unwrap()
        .items
        .into_iter()
        .map(|post| post.id)
        .collect::<Vec<_>>();
    ids.sort_unstable();
    ids
}

#[test]
fn title_filter_matches_words_and_prefixes() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let borrow = publish(&service, "Understanding the borrow checker", "Ann");
    let borrowing = publish(&service, "Borrowing in practice", "Ann");
    publish(&service, "Async runtimes", "Ann");

    assert_eq!(matched_ids(&service, titled("borrow")), vec![borrow, borrowing]);
    assert_eq!(matched_ids(&service, titled("checker")), vec![borrow]);
}

#[test]
fn title_filter_requires_every_term() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let both = publish(&service, "rust borrow rules", "Ann");
    publish(&service, "rust async", "Ann");

    let page = service.read(titled("rust borrow")).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, both);
}

#[test]
fn title_filter_follows_updates_and_deletes() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let id = publish(&service, "alpha title", "Ann");

    service.update(id, "beta title", "body", "pw").unwrap();
    assert!(matched_ids(&service, titled("alpha")).is_empty());
    assert_eq!(matched_ids(&service, titled("beta")), vec![id]);

    service.delete(id, "pw").unwrap();
    assert!(matched_ids(&service, titled("beta")).is_empty());
}

#[test]
fn blank_title_filter_is_treated_as_absent() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    publish(&service, "one", "Ann");
    publish(&service, "two", "Ann");

    assert_eq!(service.read(titled("   ")).unwrap().total, 2);
}

#[test]
fn unmatchable_title_filter_returns_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    publish(&service, "one", "Ann");

    let page = service.read(titled("?!")).unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[test]
fn title_and_author_filters_combine() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let mine = publish(&service, "weekly notes", "Ann");
    publish(&service, "weekly notes", "Ben");

    let page = service
        .read(PostQuery {
            author: Some("Ann".to_string()),
            ..titled("weekly")
        })
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, mine);
}
