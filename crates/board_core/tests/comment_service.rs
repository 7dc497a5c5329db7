use board_core::db::open_db_in_memory;
use board_core::{
    AlertDispatcher, CommentService, CommentServiceError, CommentState, CreateComment,
    CreatePost, ErrorKind, KeywordAlert, MemorySink, PostService, SqliteCommentRepository,
    SqliteKeywordRegistry, SqlitePostRepository, DELETED_COMMENT_PLACEHOLDER,
};
use rusqlite::{params, Connection};
use std::sync::Arc;

type SqliteCommentService<'c> =
    CommentService<SqliteCommentRepository<'c>, SqliteKeywordRegistry<'c>>;

fn comment_service(conn: &Connection, sink: Arc<MemorySink>) -> SqliteCommentService<'_> {
    CommentService::new(
        SqliteCommentRepository::try_new(conn).unwrap(),
        AlertDispatcher::new(SqliteKeywordRegistry::try_new(conn).unwrap(), sink),
    )
}

fn seed_post(conn: &Connection) -> i64 {
    let posts = PostService::new(
        SqlitePostRepository::try_new(conn).unwrap(),
        AlertDispatcher::new(Vec::<KeywordAlert>::new(), Arc::new(MemorySink::new())),
    );
    posts
        .create(CreatePost {
            title: "thread".to_string(),
            content: "opening".to_string(),
            author: "Op".to_string(),
            password: "pw".to_string(),
        })
        .unwrap()
        .id
}

fn reply(content: &str, author: &str, parent: Option<i64>) -> CreateComment {
    CreateComment {
        content: content.to_string(),
        author: author.to_string(),
        parent_comment_id: parent,
    }
}

fn deleted_at(conn: &Connection, comment_id: i64) -> Option<i64> {
    conn.query_row(
        "SELECT deleted_at FROM comments WHERE id = ?1;",
        [comment_id],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn create_on_missing_post_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = comment_service(&conn, Arc::new(MemorySink::new()));

    let err = service.create(999, reply("hi", "Amy", None)).unwrap_err();
    assert!(matches!(err, CommentServiceError::PostNotFound(999)));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn create_top_level_and_reply() {
    let conn = open_db_in_memory().unwrap();
    let post_id = seed_post(&conn);
    let service = comment_service(&conn, Arc::new(MemorySink::new()));

    let root = service.create(post_id, reply("first", "Amy", None)).unwrap();
    let child = service
        .create(post_id, reply("second", "Ann", Some(root.id)))
        .unwrap();

    assert_eq!(root.post_id, post_id);
    assert_eq!(root.parent_comment_id, None);
    assert_eq!(root.state, CommentState::Active);
    assert_eq!(child.parent_comment_id, Some(root.id));
}

#[test]
fn parent_must_exist_and_share_the_post() {
    let conn = open_db_in_memory().unwrap();
    let post_a = seed_post(&conn);
    let post_b = seed_post(&conn);
    let service = comment_service(&conn, Arc::new(MemorySink::new()));
    let in_b = service.create(post_b, reply("b", "Amy", None)).unwrap();

    let missing = service
        .create(post_a, reply("x", "Amy", Some(12345)))
        .unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::BadRequest);

    let foreign = service
        .create(post_a, reply("x", "Amy", Some(in_b.id)))
        .unwrap_err();
    assert!(matches!(
        foreign,
        CommentServiceError::InvalidParent { parent_comment_id, post_id }
            if parent_comment_id == in_b.id && post_id == post_a
    ));
    assert_eq!(foreign.kind(), ErrorKind::BadRequest);

    let page = service.read_by_post(post_a, 1, 10).unwrap();
    assert_eq!(page.total, 0);
}

#[test]
fn soft_deleted_parent_still_accepts_replies() {
    let conn = open_db_in_memory().unwrap();
    let post_id = seed_post(&conn);
    let service = comment_service(&conn, Arc::new(MemorySink::new()));
    let root = service.create(post_id, reply("gone", "Amy", None)).unwrap();
    service.delete(post_id, root.id).unwrap();

    let child = service
        .create(post_id, reply("late reply", "Ann", Some(root.id)))
        .unwrap();
    assert_eq!(child.parent_comment_id, Some(root.id));
}

#[test]
fn create_alerts_other_keyword_owners() {
    let conn = open_db_in_memory().unwrap();
    let post_id = seed_post(&conn);
    let registry = SqliteKeywordRegistry::try_new(&conn).unwrap();
    registry.register_alert("Alice", "dog").unwrap();
    registry.register_alert("Bob", "dog").unwrap();
    let sink = Arc::new(MemorySink::new());
    let service = comment_service(&conn, sink.clone());

    service
        .create(post_id, reply("my dog is great", "Bob", None))
        .unwrap();

    let owners = sink
        .notifications()
        .into_iter()
        .map(|notification| notification.owner)
        .collect::<Vec<_>>();
    assert_eq!(owners, vec!["Alice".to_string()]);
}

#[test]
fn read_by_post_pages_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let post_id = seed_post(&conn);
    let service = comment_service(&conn, Arc::new(MemorySink::new()));
    let mut ids = Vec::new();
    for idx in 0..25 {
        let comment = service
            .create(post_id, reply(&format!("comment {idx}"), "Amy", None))
            .unwrap();
        conn.execute(
            "UPDATE comments SET created_at = ?2 WHERE id = ?1;",
            params![comment.id, 10_000 + idx as i64],
        )
        .unwrap();
        ids.push(comment.id);
    }

    let first = service.read_by_post(post_id, 1, 10).unwrap();
    assert_eq!(first.total, 25);
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0].id, ids[24]);

    let last = service.read_by_post(post_id, 3, 10).unwrap();
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.items[4].id, ids[0]);

    let beyond = service.read_by_post(post_id, 4, 10).unwrap();
    assert_eq!(beyond.total, 25);
    assert!(beyond.items.is_empty());
}

#[test]
fn read_by_post_includes_deleted_rows() {
    let conn = open_db_in_memory().unwrap();
    let post_id = seed_post(&conn);
    let service = comment_service(&conn, Arc::new(MemorySink::new()));
    let kept = service.create(post_id, reply("kept", "Amy", None)).unwrap();
    let removed = service.create(post_id, reply("removed", "Amy", None)).unwrap();
    service.delete(post_id, removed.id).unwrap();

    let page = service.read_by_post(post_id, 1, 10).unwrap();
    assert_eq!(page.total, 2);
    let deleted = page.items.iter().find(|c| c.id == removed.id).unwrap();
    assert!(deleted.state.is_deleted());
    assert_eq!(deleted.visible_content(), DELETED_COMMENT_PLACEHOLDER);
    let active = page.items.iter().find(|c| c.id == kept.id).unwrap();
    assert_eq!(active.visible_content(), "kept");
}

#[test]
fn read_by_post_for_unknown_post_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let service = comment_service(&conn, Arc::new(MemorySink::new()));

    let page = service.read_by_post(777, 1, 10).unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[test]
fn read_by_post_rejects_invalid_paging() {
    let conn = open_db_in_memory().unwrap();
    let service = comment_service(&conn, Arc::new(MemorySink::new()));

    let err = service.read_by_post(1, 0, 10).unwrap_err();
    assert!(matches!(err, CommentServiceError::InvalidPage(_)));
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert_eq!(
        service.read_by_post(1, 1, 101).unwrap_err().kind(),
        ErrorKind::BadRequest
    );
}

#[test]
fn deleting_a_parent_keeps_children_and_masks_it_in_the_tree() {
    let conn = open_db_in_memory().unwrap();
    let post_id = seed_post(&conn);
    let service = comment_service(&conn, Arc::new(MemorySink::new()));
    let root = service.create(post_id, reply("secret", "Amy", None)).unwrap();
    let child = service
        .create(post_id, reply("answer", "Ann", Some(root.id)))
        .unwrap();

    service.delete(post_id, root.id).unwrap();

    let tree = service.read_tree_by_post(post_id, 1, 10).unwrap();
    assert_eq!(tree.total, 2);
    assert_eq!(tree.items.len(), 1);
    assert_eq!(tree.items[0].id, root.id);
    assert_eq!(tree.items[0].content, DELETED_COMMENT_PLACEHOLDER);
    assert_eq!(tree.items[0].children.len(), 1);
    assert_eq!(tree.items[0].children[0].id, child.id);
    assert_eq!(tree.items[0].children[0].content, "answer");
}

#[test]
fn delete_through_wrong_post_or_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let post_a = seed_post(&conn);
    let post_b = seed_post(&conn);
    let service = comment_service(&conn, Arc::new(MemorySink::new()));
    let comment = service.create(post_a, reply("mine", "Amy", None)).unwrap();

    let wrong_post = service.delete(post_b, comment.id).unwrap_err();
    assert_eq!(wrong_post.kind(), ErrorKind::NotFound);
    assert_eq!(deleted_at(&conn, comment.id), None);

    let unknown = service.delete(post_a, 4242).unwrap_err();
    assert!(matches!(
        unknown,
        CommentServiceError::CommentNotFound { comment_id: 4242, .. }
    ));
}

#[test]
fn deleting_twice_keeps_the_first_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let post_id = seed_post(&conn);
    let service = comment_service(&conn, Arc::new(MemorySink::new()));
    let comment = service.create(post_id, reply("bye", "Amy", None)).unwrap();

    service.delete(post_id, comment.id).unwrap();
    conn.execute(
        "UPDATE comments SET deleted_at = 42 WHERE id = ?1;",
        [comment.id],
    )
    .unwrap();
    service.delete(post_id, comment.id).unwrap();

    assert_eq!(deleted_at(&conn, comment.id), Some(42));
}
