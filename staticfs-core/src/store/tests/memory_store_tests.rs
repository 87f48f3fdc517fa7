use pretty_assertions::assert_eq;

use crate::store::{MemoryStore, Metadata, Store, StoreError, base_name};

async fn read_all(store: &MemoryStore, key: &str) -> Vec<u8> {
    let mut file = store.open(key).await.unwrap();
    let mut out = Vec::new();
    while let Some(chunk) = file.read_chunk(3).await.unwrap() {
        assert!(chunk.len() <= 3);
        out.extend_from_slice(&chunk);
    }
    out
}

#[test]
fn base_name_of_keys() {
    assert_eq!(base_name("/"), "/");
    assert_eq!(base_name(""), "/");
    assert_eq!(base_name("/a.txt"), "a.txt");
    assert_eq!(base_name("/img/logo.png"), "logo.png");
    assert_eq!(base_name("/img/"), "img");
}

#[tokio::test]
async fn file_reads_back_in_chunks() {
    // Arrange
    let store = MemoryStore::new().with_file("/a/b.txt", "hello world");

    // Act
    let data = read_all(&store, "/a/b.txt").await;

    // Assert
    assert_eq!(data, b"hello world");
}

#[tokio::test]
async fn file_metadata_is_reported() {
    let store = MemoryStore::new().with_file("/a/b.txt", "hello");

    let meta = store.open("/a/b.txt").await.unwrap().metadata().await.unwrap();

    assert_eq!(meta, Metadata::file("b.txt", 5, None));
}

#[tokio::test]
async fn parent_directories_are_implied() {
    let store = MemoryStore::new().with_file("/a/b/c.txt", "c");

    for key in ["/", "/a", "/a/b", "/a/b/"] {
        let meta = store.open(key).await.unwrap().metadata().await.unwrap();
        assert!(meta.is_dir, "{key} should be a directory");
    }
}

#[tokio::test]
async fn missing_key_is_not_found() {
    let store = MemoryStore::new().with_file("/a.txt", "a");

    let err = store.open("/b.txt").await.err().unwrap();

    assert!(err.is_not_found());
    assert!(matches!(err, StoreError::NotFound { ref key } if key == "/b.txt"));
}

#[tokio::test]
async fn read_dir_lists_direct_children_only() {
    let store = MemoryStore::new()
        .with_file("/img/a.png", "a")
        .with_file("/img/deep/b.png", "b")
        .with_dir("/img/empty")
        .with_file("/other.txt", "o");

    let mut dir = store.open("/img").await.unwrap();
    let mut names: Vec<(String, bool)> = dir
        .read_dir()
        .await
        .unwrap()
        .into_iter()
        .map(|m| (m.name, m.is_dir))
        .collect();
    names.sort();

    assert_eq!(
        names,
        vec![
            ("a.png".to_string(), false),
            ("deep".to_string(), true),
            ("empty".to_string(), true),
        ]
    );
}

#[tokio::test]
async fn read_dir_on_file_fails() {
    let store = MemoryStore::new().with_file("/a.txt", "a");

    let mut file = store.open("/a.txt").await.unwrap();

    assert!(matches!(
        file.read_dir().await,
        Err(StoreError::NotADirectory { .. })
    ));
}

#[tokio::test]
async fn closed_file_reads_nothing() {
    let store = MemoryStore::new().with_file("/a.txt", "abc");

    let mut file = store.open("/a.txt").await.unwrap();
    file.close().await.unwrap();

    assert!(file.read_chunk(16).await.unwrap().is_none());
}

#[tokio::test]
async fn clones_share_contents() {
    let store = MemoryStore::new().with_file("/a.txt", "abc");
    let clone = store.clone();

    assert_eq!(read_all(&clone, "/a.txt").await, b"abc");
    assert_eq!(read_all(&store, "/a.txt").await, b"abc");
}
