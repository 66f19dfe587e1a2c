use super::*;

/// Tests opening a store on a directory that does not exist yet.
///
/// Verifies that the data directory and any missing parents are created on first use.
///
/// Expected: Ok with the directory present on disk
#[tokio::test]
async fn creates_missing_directory() -> Result<(), StoreError> {
    let test = TestBuilder::new().build().await.unwrap();
    let dir = test.data_dir().join("nested").join("data");

    let store = JsonStore::open(&dir).await?;

    assert!(dir.is_dir());
    assert_eq!(store.dir(), dir.as_path());

    Ok(())
}
