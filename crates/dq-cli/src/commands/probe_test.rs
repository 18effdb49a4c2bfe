use super::*;
use tempfile::TempDir;

#[test]
fn listing_returns_sorted_names() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.txt"), "").unwrap();
    fs::write(dir.path().join("a.txt"), "").unwrap();
    fs::create_dir(dir.path().join("models")).unwrap();

    let entries = directory_listing(dir.path()).unwrap();
    assert_eq!(entries, vec!["a.txt", "b.txt", "models"]);
}

#[test]
fn listing_of_a_missing_directory_degrades_to_none() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("gone");
    assert_eq!(directory_listing(&gone), None);
}
