//! Frame script parsing and headless runs

use grid_builder::simulation::{
    parse_script, run_script, ActionOutcome, BuildAction, BuildController, CellCoord,
    GameConfig, MemoryStore, Orientation, DEFAULT_SCRIPT, MAX_WAIT_FRAMES,
};

#[test]
fn test_default_script_builds_a_street() {
    let frames = parse_script(DEFAULT_SCRIPT).expect("default script parses");
    assert_eq!(frames.len(), 12);

    let mut builder = BuildController::new(&GameConfig::default());
    let mut store = MemoryStore::new();
    let reports = run_script(&mut builder, &frames, 0.016, &mut store);

    assert_eq!(reports.len(), 12);
    assert_eq!(builder.balance(), 8_925);
    assert_eq!(builder.grid().len(), 5);
    assert!(builder.grid().is_occupied(CellCoord::new(2, 0)));
    assert_eq!(
        builder.grid().get(CellCoord::new(1, 1)).map(|e| e.orientation),
        Some(Orientation::EAST)
    );
    assert!(matches!(
        reports.last().map(|r| &r.outcomes[0]),
        Some(ActionOutcome::Loaded {
            entries: 5,
            recovered_default: false
        })
    ));
}

#[test]
fn test_pointer_persists_between_commands() {
    let frames = parse_script("point 3 -1; build; rotate; demolish").expect("parses");
    assert_eq!(frames.len(), 3);
    assert!(frames.iter().all(|frame| frame.pointer.is_some()));
    assert_eq!(frames[0].actions, vec![BuildAction::Build]);
    assert_eq!(frames[2].actions, vec![BuildAction::Demolish]);

    let frames = parse_script("build 1 1\nclear-pointer\nbuild").expect("parses");
    assert!(frames[0].pointer.is_some());
    assert!(frames[1].pointer.is_none());
}

#[test]
fn test_comments_blank_lines_and_wait() {
    let frames = parse_script("# header\n\nrotate # turn\n wait 3 ;; prev").expect("parses");
    assert_eq!(frames.len(), 5);
    assert_eq!(frames[0].actions, vec![BuildAction::Rotate]);
    assert!(frames[1..4].iter().all(|frame| frame.actions.is_empty()));
    assert_eq!(frames[4].actions, vec![BuildAction::PreviousStructure]);
}

#[test]
fn test_invalid_commands_are_rejected() {
    assert!(parse_script("teleport").is_err());
    assert!(parse_script("build 1").is_err());
    assert!(parse_script("build x 1").is_err());
    assert!(parse_script("rotate 2").is_err());
    assert!(parse_script("wait many").is_err());
    assert!(parse_script("point 1 2 3").is_err());
}

#[test]
fn test_wait_frame_count_is_bounded() {
    let frames = parse_script(&format!("wait {MAX_WAIT_FRAMES}")).expect("limit is allowed");
    assert_eq!(frames.len(), MAX_WAIT_FRAMES);

    let err = parse_script(&format!("wait {}", MAX_WAIT_FRAMES + 1)).unwrap_err();
    assert!(err.to_string().contains("limited to"), "{err}");

    assert!(parse_script(&format!("wait {}", usize::MAX)).is_err());
    assert!(parse_script("wait 18446744073709551616").is_err());
}
