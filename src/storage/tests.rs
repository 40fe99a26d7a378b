//! Unit tests for the roster store

use super::*;
use crate::cli::types::RosterRole;
use tempfile::TempDir;

fn create_test_db() -> RosterDatabase {
    let mut db = RosterDatabase::open_in_memory().unwrap();
    db.seed_defaults().unwrap();
    db
}

fn new_player(name: &str) -> NewRosterPlayer {
    NewRosterPlayer {
        name: name.to_string(),
        country: "India".to_string(),
        role: RosterRole::AllRounder,
        matches: 10,
        runs: 250,
        wickets: 12,
    }
}

#[test]
fn test_seeded_exactly_once() {
    let mut db = create_test_db();
    assert_eq!(db.count_players().unwrap(), DEFAULT_PLAYERS.len());
    assert_eq!(db.seed_defaults().unwrap(), 0);
    assert_eq!(db.count_players().unwrap(), 10);
}

#[test]
fn test_reopening_file_database_does_not_reseed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("roster.db");

    {
        let mut db = RosterDatabase::new(&path).unwrap();
        db.delete_player(1).unwrap();
    }

    let db = RosterDatabase::new(&path).unwrap();
    assert_eq!(db.count_players().unwrap(), 9);
}

#[test]
fn test_list_in_id_order() {
    let db = create_test_db();
    let players = db.list_players(None).unwrap();
    assert_eq!(players[0].name, "Virat Kohli");
    assert_eq!(players[9].name, "Quinton de Kock");
    assert!(players.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn test_search_matches_name_or_country_case_insensitively() {
    let db = create_test_db();

    let by_country = db.list_players(Some("australia")).unwrap();
    let names: Vec<&str> = by_country.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Steve Smith", "Pat Cummins"]);

    let by_name = db.list_players(Some("ROOT")).unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].country, "England");

    assert_eq!(db.list_players(Some("   ")).unwrap().len(), 10);
    assert!(db.list_players(Some("Zimbabwe")).unwrap().is_empty());
}

#[test]
fn test_add_and_get_player() {
    let mut db = create_test_db();
    let id = db.add_player(&new_player("  Hardik Pandya ")).unwrap();

    let stored = db.get_player(id).unwrap().unwrap();
    assert_eq!(stored.name, "Hardik Pandya");
    assert_eq!(stored.role, "All-rounder");
    assert_eq!(stored.wickets, 12);
    assert_eq!(db.count_players().unwrap(), 11);
}

#[test]
fn test_get_missing_player() {
    let db = create_test_db();
    assert!(db.get_player(999).unwrap().is_none());
}

#[test]
fn test_update_player_changes_only_given_fields() {
    let mut db = create_test_db();
    let update = RosterUpdate {
        runs: Some(13000),
        role: Some(RosterRole::Batsman),
        ..RosterUpdate::default()
    };

    assert_eq!(db.update_player(1, &update).unwrap(), 1);
    let kohli = db.get_player(1).unwrap().unwrap();
    assert_eq!(kohli.runs, 13000);
    assert_eq!(kohli.matches, 275);
    assert_eq!(kohli.country, "India");
}

#[test]
fn test_update_and_delete_of_absent_id_affect_nothing() {
    let mut db = create_test_db();
    let update = RosterUpdate {
        name: Some("Nobody".to_string()),
        ..RosterUpdate::default()
    };
    assert_eq!(db.update_player(404, &update).unwrap(), 0);
    assert_eq!(db.delete_player(404).unwrap(), 0);
    assert_eq!(db.count_players().unwrap(), 10);
}

#[test]
fn test_delete_player() {
    let mut db = create_test_db();
    assert_eq!(db.delete_player(3).unwrap(), 1);
    assert!(db.get_player(3).unwrap().is_none());
    assert_eq!(db.count_players().unwrap(), 9);
}

#[test]
fn test_validation_rejects_empty_names() {
    assert!(new_player("Shubman Gill").validate().is_ok());

    let err = new_player("   ").validate().unwrap_err();
    assert!(err.is_user_warning());

    let blank = RosterUpdate {
        name: Some(String::new()),
        ..RosterUpdate::default()
    };
    assert!(blank.validate().is_err());
    assert!(RosterUpdate::default().validate().is_err());
    assert!(RosterUpdate {
        wickets: Some(1),
        ..RosterUpdate::default()
    }
    .validate()
    .is_ok());
}
