//! `roster list | add | update | delete`

use crate::{
    analysis::{Cell, QueryTable, TableRow},
    config::AppConfig,
    storage::{NewRosterPlayer, RosterDatabase, RosterPlayer, RosterUpdate},
    CricketError, Result,
};

use super::common::{print_table, OutputFormat};

impl TableRow for RosterPlayer {
    const COLUMNS: &'static [&'static str] =
        &["ID", "Name", "Country", "Role", "Matches", "Runs", "Wickets"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.id.into(),
            self.name.as_str().into(),
            self.country.as_str().into(),
            self.role.as_str().into(),
            self.matches.into(),
            self.runs.into(),
            self.wickets.into(),
        ]
    }
}

/// A parsed `roster` subcommand.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterAction {
    List {
        search: Option<String>,
        format: OutputFormat,
    },
    Add(NewRosterPlayer),
    Update(i64, RosterUpdate),
    Delete(i64),
}

/// Open the roster named in the config, seeding it on first use.
pub fn open_roster(config: &AppConfig) -> Result<RosterDatabase> {
    log::debug!("roster database: {}", config.roster_db.display());
    Ok(RosterDatabase::new(&config.roster_db)?)
}

pub fn roster_table(db: &RosterDatabase, search: Option<&str>) -> Result<QueryTable> {
    let players = db.list_players(search)?;
    let title = match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => format!("Roster matching \"{}\"", term),
        None => "Roster".to_string(),
    };
    Ok(QueryTable::from_rows(title, &players).with_metric("Total Records", db.count_players()?))
}

/// Handle `roster list`
pub fn handle_roster_list(
    db: &RosterDatabase,
    search: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    print_table(&roster_table(db, search)?, format)
}

/// Handle `roster add`; returns the new id.
pub fn handle_roster_add(db: &mut RosterDatabase, player: &NewRosterPlayer) -> Result<i64> {
    player.validate()?;
    let id = db.add_player(player)?;
    println!("✓ Added {} with ID {}", player.name.trim(), id);
    Ok(id)
}

/// Handle `roster update`; an absent id is a [`CricketError::RosterPlayerNotFound`].
pub fn handle_roster_update(db: &mut RosterDatabase, id: i64, update: &RosterUpdate) -> Result<()> {
    update.validate()?;
    if db.update_player(id, update)? == 0 {
        return Err(CricketError::RosterPlayerNotFound { id });
    }
    println!("✓ Updated player {}", id);
    Ok(())
}

/// Handle `roster delete`; an absent id is a [`CricketError::RosterPlayerNotFound`].
pub fn handle_roster_delete(db: &mut RosterDatabase, id: i64) -> Result<()> {
    if db.delete_player(id)? == 0 {
        return Err(CricketError::RosterPlayerNotFound { id });
    }
    println!("✓ Deleted player {}", id);
    Ok(())
}

/// Handle the roster command
pub fn handle_roster(config: &AppConfig, action: RosterAction) -> Result<()> {
    let mut db = open_roster(config)?;
    match action {
        RosterAction::List { search, format } => {
            handle_roster_list(&db, search.as_deref(), format)
        }
        RosterAction::Add(player) => handle_roster_add(&mut db, &player).map(|_| ()),
        RosterAction::Update(id, update) => handle_roster_update(&mut db, id, &update),
        RosterAction::Delete(id) => handle_roster_delete(&mut db, id),
    }
}
