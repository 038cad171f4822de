use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::scorecard::appearance::{AppearanceMarker, PlayerAppearance};
use crate::scorecard::names::strip_suffixes;
use crate::scorecard::traits::{BattingSlot, FieldingPosition, PlayerKey};
use crate::util::trim_chars;

lazy_static! {
    static ref TRAILING_SUFFIX_REGEX: Regex = Regex::new(r"(?: Jr| Sr| III| II| IV)$").unwrap();
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub obp: Option<f64>,
    pub slg: Option<f64>,
    pub era: Option<f64>,
    pub number: Option<u8>,
}

impl Player {
    pub fn new(id: u64, first_name: &str, last_name: &str) -> Self {
        Self {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            obp: None,
            slg: None,
            era: None,
            number: None,
        }
    }

    #[must_use]
    pub fn with_rates(self, obp: f64, slg: f64) -> Self {
        Self {
            obp: Some(obp),
            slg: Some(slg),
            ..self
        }
    }

    #[must_use]
    pub fn with_era(self, era: f64) -> Self {
        Self {
            era: Some(era),
            ..self
        }
    }

    #[must_use]
    pub fn with_number(self, number: u8) -> Self {
        Self {
            number: Some(number),
            ..self
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn hitting_stats(&self) -> String {
        match (self.obp, self.slg) {
            (Some(obp), Some(slg)) => format!("OBP: {obp:.3}   SLG: {slg:.3}"),
            _ => String::new(),
        }
    }

    pub fn pitching_stats(&self) -> Option<String> {
        self.era.map(|era| format!("ERA: {era:.2}"))
    }

    /// Last name as it appears in informal prose: suffixes dropped and, for
    /// two-word surnames like "De Aza", only the second word.
    fn short_last_name(&self) -> String {
        let last_name = trim_chars(&self.last_name, ". ").replace(',', "");
        let last_name = strip_trailing_suffixes(&last_name).replace(" St. ", " St ");
        last_name
            .split_whitespace()
            .nth(1)
            .map_or_else(|| last_name.trim().to_string(), str::to_string)
    }

    fn initial_key(&self) -> Option<String> {
        let initial = self.first_name.chars().next()?;
        Some(format!("{initial}{}", self.short_last_name()))
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.number {
            Some(n) => write!(f, "{n:2} ")?,
            None => write!(f, "   ")?,
        }
        write!(f, "{}", self.full_name())
    }
}

fn strip_trailing_suffixes(name: &str) -> String {
    let mut name = name.trim().to_string();
    while let Some(m) = TRAILING_SUFFIX_REGEX.find(&name) {
        name = trim_chars(&name[..m.start()], " .").to_string();
    }
    name
}

/// A team's roster indices plus the pitching staff and batting order
/// appearances recorded over a game.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Team {
    pub name: String,
    pub abbreviation: String,
    pitchers: Vec<PlayerAppearance>,
    batting_order: [Vec<PlayerAppearance>; 9],
    #[serde(skip)]
    by_id: HashMap<u64, Arc<Player>>,
    #[serde(skip)]
    by_name: HashMap<String, Arc<Player>>,
    #[serde(skip)]
    by_initial: HashMap<String, Arc<Player>>,
    #[serde(skip)]
    ambiguous_initials: HashSet<String>,
}

impl Team {
    pub fn new(name: &str, abbreviation: &str) -> Self {
        Self {
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            ..Default::default()
        }
    }

    pub fn with_roster<I: IntoIterator<Item = Player>>(name: &str, abbreviation: &str, roster: I) -> Self {
        let mut team = Self::new(name, abbreviation);
        for player in roster {
            team.register(player);
        }
        team
    }

    /// Adds a player to all three indices and returns the shared handle.
    /// A short-name key shared by two different players is dropped from the
    /// initial index, so prose lookups on it miss instead of guessing.
    pub fn register(&mut self, player: Player) -> Arc<Player> {
        let player = Arc::new(player);
        debug!("Registering {} with {}", player.full_name(), self.abbreviation);
        self.by_id.insert(player.id, Arc::clone(&player));
        self.by_name.insert(player.full_name(), Arc::clone(&player));
        if let Some(key) = player.initial_key() {
            if self.ambiguous_initials.contains(&key) {
                debug!("Short name {} already ambiguous on {}", key, self.abbreviation);
            } else if self.by_initial.get(&key).is_some_and(|p| p.id != player.id) {
                warn!("Ambiguous short name {} on {}", key, self.abbreviation);
                self.by_initial.remove(&key);
                self.ambiguous_initials.insert(key);
            } else {
                self.by_initial.insert(key, Arc::clone(&player));
            }
        }
        player
    }

    /// Looks a player up by id, by full name, or by the first initial and last
    /// word of a name as written in prose. A miss is expected for lossy prose.
    pub fn find(&self, key: &PlayerKey) -> Option<&Arc<Player>> {
        match key {
            PlayerKey::Id(id) => self.by_id.get(id),
            PlayerKey::Name(name) => self.by_name.get(name).or_else(|| {
                let cleaned = strip_suffixes(&strip_trailing_suffixes(trim_chars(name, " .")));
                if let Some(found) = self.by_name.get(&cleaned) {
                    return Some(found);
                }
                let initial = cleaned.chars().next()?;
                let last = cleaned.split_whitespace().last()?;
                let found = self.by_initial.get(&format!("{initial}{last}"));
                if found.is_none() {
                    debug!("No player matching {} on {}", name, self.abbreviation);
                }
                found
            }),
        }
    }

    pub fn contains(&self, key: &PlayerKey) -> bool {
        self.find(key).is_some()
    }

    pub fn get(&self, key: &PlayerKey) -> Result<Arc<Player>> {
        self.find(key)
            .cloned()
            .with_context(|| anyhow!("{} not found in team {}", key, self.name))
    }

    pub fn players(&self) -> impl Iterator<Item = &Arc<Player>> {
        self.by_id.values()
    }

    pub fn pitchers(&self) -> &[PlayerAppearance] {
        &self.pitchers
    }

    pub fn batting_slot(&self, slot: BattingSlot) -> &[PlayerAppearance] {
        &self.batting_order[slot.get() - 1]
    }

    pub fn batting_order(&self) -> impl Iterator<Item = &[PlayerAppearance]> {
        self.batting_order.iter().map(Vec::as_slice)
    }

    /// Brings in a pitcher, closing the current pitcher's appearance where the
    /// new one starts.
    pub fn add_pitcher(&mut self, appearance: PlayerAppearance) -> Result<()> {
        Self::substitute(&mut self.pitchers, appearance)
    }

    /// Puts a player into a batting slot, closing the appearance of whoever
    /// held it.
    pub fn add_batter(&mut self, slot: BattingSlot, appearance: PlayerAppearance) -> Result<()> {
        Self::substitute(&mut self.batting_order[slot.get() - 1], appearance)
    }

    fn substitute(appearances: &mut Vec<PlayerAppearance>, appearance: PlayerAppearance) -> Result<()> {
        if let Some(current) = appearances.last_mut().filter(|a| a.is_open()) {
            current.close(appearance.start)?;
        }
        appearances.push(appearance);
        Ok(())
    }

    /// Appearance for a player who starts the game at `position`.
    pub fn starting_appearance(&self, key: &PlayerKey, position: FieldingPosition) -> Result<PlayerAppearance> {
        Ok(PlayerAppearance::new(
            self.get(key)?,
            position,
            AppearanceMarker::game_start(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorecard::traits::InningHalf;

    fn red_sox() -> Team {
        Team::with_roster(
            "Boston Red Sox",
            "BOS",
            vec![
                Player::new(605_141, "Mookie", "Betts").with_number(50),
                Player::new(598_265, "Jackie", "Bradley Jr."),
                Player::new(502_110, "J.D.", "Martinez"),
                Player::new(657_077, "Alex", "Verdugo"),
                Player::new(545_361, "Cal", "Ripken III"),
                Player::new(444_444, "Alejandro", "De Aza"),
            ],
        )
    }

    #[test]
    fn test_find_by_id_and_name() {
        let team = red_sox();
        let betts = team.find(&PlayerKey::Id(605_141)).unwrap();
        assert_eq!(betts.last_name, "Betts");
        let by_name = team.find(&"Mookie Betts".into()).unwrap();
        assert!(Arc::ptr_eq(betts, by_name));
    }

    #[test]
    fn test_find_fuzzy() {
        let team = red_sox();
        assert_eq!(team.find(&"Jackie Bradley".into()).unwrap().id, 598_265);
        assert_eq!(team.find(&"Jackie Bradley Jr.".into()).unwrap().id, 598_265);
        assert_eq!(team.find(&"JD Martinez".into()).unwrap().id, 502_110);
        assert_eq!(team.find(&"Cal Ripken".into()).unwrap().id, 545_361);
        assert_eq!(team.find(&"Alex De Aza".into()).unwrap().id, 444_444);
        assert_eq!(team.find(&"M. Betts".into()).unwrap().id, 605_141);
    }

    #[test]
    fn test_indices_agree() {
        let team = red_sox();
        for player in team.players() {
            let by_id = team.find(&PlayerKey::Id(player.id)).unwrap();
            let by_name = team.find(&PlayerKey::Name(player.full_name())).unwrap();
            assert!(Arc::ptr_eq(by_id, by_name));
        }
        assert_eq!(team.by_initial.len(), team.by_id.len());
        for (key, player) in &team.by_initial {
            assert!(Arc::ptr_eq(player, &team.by_id[&player.id]), "{key}");
        }
    }

    #[test]
    fn test_ambiguous_short_names() {
        let mut team = Team::with_roster(
            "Cleveland Guardians",
            "CLE",
            vec![Player::new(1, "Jose", "Ramirez"), Player::new(2, "Jesus", "Ramirez")],
        );
        assert!(team.find(&"J. Ramirez".into()).is_none());
        assert_eq!(team.find(&"Jose Ramirez".into()).unwrap().id, 1);
        assert_eq!(team.find(&"Jose Ramirez Jr.".into()).unwrap().id, 1);
        assert_eq!(team.find(&"Jesus Ramirez".into()).unwrap().first_name, "Jesus");
        assert_eq!(team.find(&PlayerKey::Id(2)).unwrap().first_name, "Jesus");

        team.register(Player::new(3, "Juan", "Ramirez"));
        assert!(team.find(&"J Ramirez".into()).is_none());
        for (key, player) in &team.by_initial {
            assert!(Arc::ptr_eq(player, &team.by_id[&player.id]), "{key}");
        }
    }

    #[test]
    fn test_miss_is_recoverable() {
        let team = red_sox();
        assert!(team.find(&"Aaron Judge".into()).is_none());
        assert!(!team.contains(&PlayerKey::Id(1)));
        assert!(team.get(&"Aaron Judge".into()).is_err());
    }

    #[test]
    fn test_substitutions_close_previous() {
        let mut team = red_sox();
        let slot = BattingSlot::new(1).unwrap();
        let starter = team
            .starting_appearance(&PlayerKey::Id(605_141), FieldingPosition::RightFielder)
            .unwrap();
        team.add_batter(slot, starter).unwrap();
        let sub = PlayerAppearance::new(
            team.get(&PlayerKey::Id(657_077)).unwrap(),
            FieldingPosition::PinchHitter,
            AppearanceMarker::new(8, InningHalf::Top, 3),
        );
        team.add_batter(slot, sub).unwrap();
        let appearances = team.batting_slot(slot);
        assert_eq!(appearances.len(), 2);
        assert_eq!(appearances[0].end(), Some(AppearanceMarker::new(8, InningHalf::Top, 3)));
        assert!(appearances[1].is_open());
    }

    #[test]
    fn test_player_display() {
        let team = red_sox();
        let betts = team.get(&PlayerKey::Id(605_141)).unwrap();
        assert_eq!(betts.to_string(), "50 Mookie Betts");
        assert_eq!(Player::new(7, "Dustin", "Pedroia").with_era(3.5).pitching_stats().unwrap(), "ERA: 3.50");
        assert_eq!(
            Player::new(7, "Dustin", "Pedroia").with_rates(0.365, 0.44).hitting_stats(),
            "OBP: 0.365   SLG: 0.440"
        );
    }
}
