//! Command-line tests
//!
//! Run the `seeder` binary against temporary catalogs and check exit codes
//! and what ends up on disk.

use card_seeder::store::JsonFileStore;
use similar_asserts::assert_eq;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("card-seeder-cli-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        TempDir(dir)
    }

    fn join(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn seeder(store: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seeder"))
        .arg("--store")
        .arg(store)
        .arg("--verbosity=minimal")
        .args(args)
        .output()
        .expect("Failed to run seeder binary")
}

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn test_seed_starter_twice() {
    let dir = TempDir::new();
    let store = dir.join("catalog.json");

    let first = seeder(&store, &["seed-starter"]);
    assert!(first.status.success());
    let cards = JsonFileStore::open(&store).unwrap().tables().cards().len();
    assert!(cards > 0);

    let second = seeder(&store, &["seed-starter"]);
    assert!(second.status.success());
    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(
        stdout.contains(&format!("{cards} duplicates skipped")),
        "{stdout}"
    );
    assert_eq!(
        JsonFileStore::open(&store).unwrap().tables().cards().len(),
        cards
    );
}

#[test]
fn test_sync_sheet_and_deck() {
    let dir = TempDir::new();
    let store = dir.join("catalog.json");

    let sync = seeder(&store, &["sync-sheet", &fixture("sheets/dusane.csv")]);
    assert!(sync.status.success());

    let deck = seeder(
        &store,
        &["deck", "--hero", "hero-1", "--deck-size", "3", "--seed", "42"],
    );
    assert!(
        deck.status.success(),
        "{}",
        String::from_utf8_lossy(&deck.stderr)
    );

    let reopened = JsonFileStore::open(&store).unwrap();
    let tables = reopened.tables();
    assert_eq!(tables.decks().len(), 1);
    assert_eq!(tables.owned_cards().len(), 4);
    assert_eq!(tables.deck_cards().len(), 3);
}

#[test]
fn test_missing_sheet_exits_with_failure() {
    let dir = TempDir::new();
    let store = dir.join("catalog.json");

    let output = seeder(
        &store,
        &["sync-sheet", &dir.join("missing.csv").display().to_string()],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("reading sheet"), "{stderr}");
    assert!(!store.exists());
}

#[test]
fn test_upload_writes_named_items() {
    let dir = TempDir::new();
    let store = dir.join("catalog.json");
    let blobs = dir.join("blobs");

    let output = seeder(
        &store,
        &[
            "upload",
            &fixture("manifests/items.json"),
            "--root",
            &blobs.display().to_string(),
            "--public-url",
            "https://pub.example/",
        ],
    );

    assert!(output.status.success());
    assert!(blobs.join("Fireball").exists());
    assert!(blobs.join("Strike").exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("2 uploaded, 1 skipped, 0 failed"),
        "{stdout}"
    );
}
