use pretty_assertions::assert_eq;
use rust_embed::RustEmbed;

use crate::store::{EmbeddedStore, Store, StoreError};

#[derive(RustEmbed)]
#[folder = "tests/fixtures/embedded/"]
struct Assets;

#[tokio::test]
async fn opens_embedded_file() {
    // Arrange
    let store = EmbeddedStore::<Assets>::new();

    // Act
    let mut file = store.open("/index.html").await.unwrap();
    let meta = file.metadata().await.unwrap();
    let chunk = file.read_chunk(1024).await.unwrap().unwrap();

    // Assert
    assert_eq!(meta.name, "index.html");
    assert_eq!(meta.size, 17);
    assert_eq!(chunk.as_ref(), b"<h1>embedded</h1>");
    assert!(file.read_chunk(1024).await.unwrap().is_none());
}

#[tokio::test]
async fn directories_are_derived_from_asset_paths() {
    let store = EmbeddedStore::<Assets>::new();

    let mut root = store.open("/").await.unwrap();
    let mut names: Vec<(String, bool)> = root
        .read_dir()
        .await
        .unwrap()
        .into_iter()
        .map(|m| (m.name, m.is_dir))
        .collect();
    names.sort();

    assert!(root.metadata().await.unwrap().is_dir);
    assert_eq!(
        names,
        vec![("img".to_string(), true), ("index.html".to_string(), false)]
    );

    let mut img = store.open("/img/").await.unwrap();
    assert_eq!(img.read_dir().await.unwrap()[0].name, "logo.gif");
}

#[tokio::test]
async fn missing_asset_is_not_found() {
    let store = EmbeddedStore::<Assets>::new();

    let err = store.open("/nope.txt").await.err().unwrap();

    assert!(matches!(err, StoreError::NotFound { .. }));
}
