//! Roster store through the public API

use cricbuzz_analytics::{
    cli::types::RosterRole,
    storage::{NewRosterPlayer, RosterDatabase, RosterUpdate, DEFAULT_PLAYERS},
};
use tempfile::TempDir;

fn open(dir: &TempDir) -> RosterDatabase {
    RosterDatabase::new(&dir.path().join("roster.db")).unwrap()
}

#[test]
fn test_first_open_seeds_ten_players() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir);
    assert_eq!(db.count_players().unwrap(), DEFAULT_PLAYERS.len());
}

#[test]
fn test_crud_round_trip_persists_across_connections() {
    let dir = TempDir::new().unwrap();
    let id = {
        let mut db = open(&dir);
        db.add_player(&NewRosterPlayer {
            name: "Shubman Gill".to_string(),
            country: "India".to_string(),
            role: RosterRole::Batsman,
            matches: 44,
            runs: 2328,
            wickets: 0,
        })
        .unwrap()
    };

    let mut db = open(&dir);
    assert_eq!(db.count_players().unwrap(), 11);

    let update = RosterUpdate {
        matches: Some(45),
        ..RosterUpdate::default()
    };
    assert_eq!(db.update_player(id, &update).unwrap(), 1);
    let gill = db.get_player(id).unwrap().unwrap();
    assert_eq!(gill.matches, 45);
    assert_eq!(gill.runs, 2328);

    assert_eq!(db.delete_player(id).unwrap(), 1);
    assert_eq!(db.delete_player(id).unwrap(), 0);
    assert_eq!(db.count_players().unwrap(), 10);
}

#[test]
fn test_search_by_country() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir);
    let kiwis = db.list_players(Some("zealand")).unwrap();
    assert_eq!(kiwis.len(), 1);
    assert_eq!(kiwis[0].name, "Kane Williamson");
    assert_eq!(kiwis[0].role, "Batsman");
}
