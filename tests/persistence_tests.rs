//! Save and load behaviour for the file and memory stores

use std::fs;
use std::path::PathBuf;

use grid_builder::simulation::{
    ActionOutcome, BalancePolicy, BuildAction, BuildController, CellCoord, CellEntry,
    FileStore, FrameInput, GameConfig, MemoryStore, ModelDesc, ObjectStore, Orientation,
    PlacementGrid, SaveDocument, SaveEntry, StructureCatalog, StructureDef, DEFAULT_LOCATOR,
    SAVE_FORMAT, SAVE_VERSION,
};

const DELTA: f32 = 0.016;

fn model() -> ModelDesc {
    ModelDesc {
        size: [1.0, 1.0, 1.0],
        color: [0.5, 0.5, 0.5],
    }
}

fn catalog(ids: &[&str]) -> StructureCatalog {
    StructureCatalog::new(
        ids.iter()
            .map(|id| StructureDef::new(id, id, 100, '#', model()))
            .collect(),
    )
    .expect("test catalog is valid")
}

/// Fresh, empty directory under the system temp dir
fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "grid_builder_{}_{}",
        name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn config_with(catalog: StructureCatalog) -> GameConfig {
    GameConfig {
        starting_balance: 10_000,
        balance_policy: BalancePolicy::AllowDebt,
        catalog,
        ..GameConfig::default()
    }
}

fn build_at(builder: &mut BuildController, store: &mut dyn ObjectStore, x: f32, z: f32) {
    builder.tick(&FrameInput::at(x, z, vec![BuildAction::Build]), DELTA, store);
}

#[test]
fn test_round_trip_through_file_store() {
    let dir = temp_dir("round_trip");
    let mut store = FileStore::new(&dir);
    assert_eq!(store.dir(), dir.as_path());
    let mut builder = BuildController::new(&config_with(catalog(&["a", "b", "c"])));

    build_at(&mut builder, &mut store, 0.0, 0.0);
    builder.cycle(1);
    builder.rotate();
    build_at(&mut builder, &mut store, -3.0, 2.0);
    builder.cycle(1);
    build_at(&mut builder, &mut store, 5.0, 5.0);

    let saved_cells = builder.grid().sorted();
    let saved_balance = builder.balance();
    assert_eq!(builder.save(&mut store), ActionOutcome::Saved { entries: 3 });
    assert!(store.path_for(DEFAULT_LOCATOR).exists());
    assert!(!dir.join("map.json.tmp").exists());

    // Change everything, then load
    builder.demolish(CellCoord::new(0, 0));
    build_at(&mut builder, &mut store, 9.0, 9.0);

    let outcome = builder.load(&mut store);
    assert_eq!(
        outcome,
        ActionOutcome::Loaded {
            entries: 3,
            recovered_default: false
        }
    );
    assert_eq!(builder.grid().sorted(), saved_cells);
    assert_eq!(builder.balance(), saved_balance);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_file_loads_fresh_default() {
    let dir = temp_dir("missing");
    let mut store = FileStore::new(&dir);
    let mut builder = BuildController::new(&config_with(catalog(&["a"])));

    build_at(&mut builder, &mut store, 1.0, 1.0);
    let outcome = builder.load(&mut store);

    assert_eq!(
        outcome,
        ActionOutcome::Loaded {
            entries: 0,
            recovered_default: true
        }
    );
    assert!(builder.grid().is_empty());
    assert_eq!(builder.balance(), 10_000);
}

#[test]
fn test_corrupt_document_loads_fresh_default() {
    let mut store = MemoryStore::new();
    store.insert_raw(DEFAULT_LOCATOR, "{ this is not json");
    let mut builder = BuildController::new(&config_with(catalog(&["a"])));

    build_at(&mut builder, &mut store, 1.0, 1.0);
    let outcome = builder.load(&mut store);

    assert!(matches!(
        outcome,
        ActionOutcome::Loaded {
            recovered_default: true,
            ..
        }
    ));
    assert!(builder.grid().is_empty());
    assert_eq!(builder.balance(), 10_000);
}

#[test]
fn test_corrupt_file_on_disk_loads_fresh_default() {
    let dir = temp_dir("corrupt_file");
    fs::create_dir_all(&dir).expect("create temp dir");
    fs::write(dir.join("map.json"), b"\x00\x01garbage").expect("write corrupt save");

    let mut store = FileStore::new(&dir);
    let mut builder = BuildController::new(&config_with(catalog(&["a"])));
    let outcome = builder.load(&mut store);

    assert!(matches!(
        outcome,
        ActionOutcome::Loaded {
            recovered_default: true,
            ..
        }
    ));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_failed_save_is_reported_not_raised() {
    let dir = temp_dir("failed_save");
    fs::create_dir_all(&dir).expect("create temp dir");
    let blocker = dir.join("not_a_dir");
    fs::write(&blocker, b"file").expect("write blocker");

    let mut store = FileStore::new(blocker.join("saves"));
    let mut builder = BuildController::new(&config_with(catalog(&["a"])));
    build_at(&mut builder, &mut store, 0.0, 0.0);

    let outcome = builder.save(&mut store);
    assert!(matches!(outcome, ActionOutcome::SaveFailed(_)));
    assert_eq!(builder.grid().len(), 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_document_has_format_version_and_sorted_entries() {
    let structures = catalog(&["a", "b"]);
    let mut grid = PlacementGrid::new();
    grid.place(CellCoord::new(4, 0), 1, Orientation::WEST);
    grid.place(CellCoord::new(-2, 3), 0, Orientation::NORTH);

    let document = SaveDocument::capture(&grid, 1234, &structures);

    assert_eq!(document.format, SAVE_FORMAT);
    assert_eq!(document.version, SAVE_VERSION);
    assert_eq!(document.balance, 1234);
    assert_eq!(
        document.entries,
        vec![
            SaveEntry {
                cell: CellCoord::new(-2, 3),
                orientation: 0,
                structure: 0,
                structure_id: Some("a".to_string()),
            },
            SaveEntry {
                cell: CellCoord::new(4, 0),
                orientation: 3,
                structure: 1,
                structure_id: Some("b".to_string()),
            },
        ]
    );
}

#[test]
fn test_wrong_format_or_newer_version_is_rejected() {
    let mut store = MemoryStore::new();

    let mut foreign = SaveDocument::fresh(5);
    foreign.format = "something/else".to_string();
    store.save("foreign", &foreign).expect("memory save");
    assert!(store.load("foreign").is_err());

    let mut newer = SaveDocument::fresh(5);
    newer.version = SAVE_VERSION + 1;
    store.save("newer", &newer).expect("memory save");
    assert!(store.load("newer").is_err());

    store
        .save("current", &SaveDocument::fresh(5))
        .expect("memory save");
    assert_eq!(store.load("current").expect("valid").balance, 5);
}

#[test]
fn test_entries_resolve_by_stable_id_before_index() {
    // Saved with catalog [a, b, c]; loaded into a reordered catalog without "b"
    let document = SaveDocument {
        entries: vec![
            SaveEntry {
                cell: CellCoord::new(0, 0),
                orientation: 1,
                structure: 0,
                structure_id: Some("a".to_string()),
            },
            SaveEntry {
                cell: CellCoord::new(1, 0),
                orientation: 0,
                structure: 1,
                structure_id: Some("b".to_string()),
            },
            SaveEntry {
                cell: CellCoord::new(2, 0),
                orientation: 6,
                structure: 1,
                structure_id: None,
            },
            SaveEntry {
                cell: CellCoord::new(3, 0),
                orientation: 0,
                structure: 9,
                structure_id: None,
            },
        ],
        ..SaveDocument::fresh(0)
    };

    let reordered = catalog(&["c", "a"]);
    let mut grid = PlacementGrid::new();
    let placed = document.restore_into(&mut grid, &reordered);

    assert_eq!(placed, 2);
    assert_eq!(
        grid.get(CellCoord::new(0, 0)),
        Some(CellEntry::new(1, Orientation::EAST))
    );
    assert_eq!(grid.get(CellCoord::new(1, 0)), None);
    assert_eq!(
        grid.get(CellCoord::new(2, 0)),
        Some(CellEntry::new(1, Orientation::SOUTH))
    );
    assert_eq!(grid.get(CellCoord::new(3, 0)), None);
}

#[test]
fn test_saved_file_is_readable_json() {
    let dir = temp_dir("readable");
    let mut store = FileStore::new(&dir);
    let mut builder = BuildController::new(&config_with(catalog(&["a"])));
    build_at(&mut builder, &mut store, 2.0, 0.0);
    builder.save(&mut store);

    let text = fs::read_to_string(store.path_for(DEFAULT_LOCATOR)).expect("save exists");
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["format"], SAVE_FORMAT);
    assert_eq!(value["balance"], 9_900);
    assert_eq!(value["entries"][0]["cell"]["x"], 2);
    assert_eq!(value["entries"][0]["structure_id"], "a");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_memory_store_keeps_encoded_document() {
    let mut store = MemoryStore::new();
    assert!(store.raw(DEFAULT_LOCATOR).is_none());

    let mut builder = BuildController::new(&config_with(catalog(&["a"])));
    build_at(&mut builder, &mut store, 2.0, -1.0);
    builder.save(&mut store);

    let raw = store.raw(DEFAULT_LOCATOR).expect("save stored a document");
    let value: serde_json::Value = serde_json::from_str(raw).expect("stored text is JSON");
    assert_eq!(value["format"], SAVE_FORMAT);
    assert_eq!(value["entries"][0]["cell"]["z"], -1);
    assert_eq!(value["entries"][0]["structure_id"], "a");
}
