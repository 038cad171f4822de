use std::fmt::{Display, Formatter};

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, Utc};
use fixed_map::Map;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::info;

use crate::scorecard::appearance::PlayerAppearance;
use crate::scorecard::plate_appearance::PlateAppearance;
use crate::scorecard::roster::Team;
use crate::scorecard::traits::{Inning as InningNumber, InningHalf, Matchup, Side};

/// Counts for one half inning, computed once from its entries.
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone, Serialize)]
pub struct HalfInningStats {
    pub pitches: u16,
    pub strikes: u16,
    pub walks: u16,
    pub strikeouts: u16,
    pub left_on_base: u16,
    pub errors: u16,
    pub hits: u16,
    pub runs: u16,
}

fn count<'a, I, F>(appearances: I, f: F) -> u16
where
    I: Iterator<Item = &'a PlateAppearance>,
    F: Fn(&PlateAppearance) -> usize,
{
    let total: usize = appearances.map(f).sum();
    u16::try_from(total).unwrap_or(u16::MAX)
}

impl HalfInningStats {
    fn from_entries(entries: &[HalfInningEntry]) -> Self {
        let appearances = || entries.iter().filter_map(HalfInningEntry::plate_appearance);

        let pitches = count(appearances(), |pa| {
            pa.sub_events.iter().filter(|e| e.is_pitch()).count()
        });
        let strikes = count(appearances(), |pa| {
            pa.sub_events.iter().filter(|e| e.is_strike()).count()
        });
        let walks = count(appearances(), |pa| usize::from(pa.summary.is_walk()));
        let strikeouts = count(appearances(), |pa| usize::from(pa.scorecard().is_strikeout()));
        let errors = count(appearances(), |pa| usize::from(pa.scorecard().error_code.is_some()));
        let hits = count(appearances(), |pa| usize::from(pa.summary.is_hit()));
        let runs = count(appearances(), |pa| pa.scoring_runners.len());
        let reached = count(appearances(), |pa| usize::from(pa.scorecard().on_base));
        let thrown_out = count(appearances(), |pa| pa.out_runners().len());

        Self {
            pitches,
            strikes,
            walks,
            strikeouts,
            left_on_base: reached.saturating_sub(runs).saturating_sub(thrown_out),
            errors,
            hits,
            runs,
        }
    }
}

impl Display for HalfInningStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "R: {}  H: {}  E: {}  LOB: {}  BB: {}  K: {}  Pitches: {} ({} strikes)",
            self.runs,
            self.hits,
            self.errors,
            self.left_on_base,
            self.walks,
            self.strikeouts,
            self.pitches,
            self.strikes
        )
    }
}

/// Activity in a half inning, in the order it happened.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(tag = "type", content = "entry", rename_all = "snake_case")]
pub enum HalfInningEntry {
    PlateAppearance(PlateAppearance),
    Substitution(PlayerAppearance),
}

impl HalfInningEntry {
    pub const fn plate_appearance(&self) -> Option<&PlateAppearance> {
        match self {
            Self::PlateAppearance(pa) => Some(pa),
            Self::Substitution(_) => None,
        }
    }
}

impl Display for HalfInningEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlateAppearance(pa) => write!(f, "{pa}"),
            Self::Substitution(appearance) => write!(f, "{appearance}"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct HalfInning {
    entries: Vec<HalfInningEntry>,
    stats: HalfInningStats,
}

impl HalfInning {
    pub fn new(entries: Vec<HalfInningEntry>) -> Self {
        let stats = HalfInningStats::from_entries(&entries);
        Self { entries, stats }
    }

    pub fn entries(&self) -> &[HalfInningEntry] {
        &self.entries
    }

    pub const fn stats(&self) -> HalfInningStats {
        self.stats
    }

    pub fn plate_appearances(&self) -> impl Iterator<Item = &PlateAppearance> {
        self.entries.iter().filter_map(HalfInningEntry::plate_appearance)
    }
}

/// An inning's two halves. The bottom half is absent when the home team
/// did not need to bat.
#[derive(Debug, Clone)]
pub struct Inning {
    pub number: InningNumber,
    halves: Map<InningHalf, HalfInning>,
}

impl Inning {
    pub fn new(number: InningNumber, top: Option<HalfInning>, bottom: Option<HalfInning>) -> Self {
        let mut halves = Map::new();
        if let Some(top) = top {
            halves.insert(InningHalf::Top, top);
        }
        if let Some(bottom) = bottom {
            halves.insert(InningHalf::Bottom, bottom);
        }
        Self { number, halves }
    }

    pub fn half(&self, half: InningHalf) -> Option<&HalfInning> {
        self.halves.get(half)
    }

    pub fn stats(&self, half: InningHalf) -> Option<HalfInningStats> {
        self.half(half).map(HalfInning::stats)
    }
}

impl Serialize for Inning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Inning", 3)?;
        state.serialize_field("number", &self.number)?;
        state.serialize_field("top", &self.half(InningHalf::Top))?;
        state.serialize_field("bottom", &self.half(InningHalf::Bottom))?;
        state.end()
    }
}

impl Display for Inning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (half, banner) in [
            (InningHalf::Top, format!("{0} TOP OF INNING {0}", "-".repeat(32))),
            (InningHalf::Bottom, format!("{0} BOTTOM OF INNING {0}", "-".repeat(30))),
        ] {
            writeln!(f, "{banner}")?;
            if let Some(half) = self.half(half) {
                writeln!(f, "{}", half.stats)?;
                for entry in half.entries() {
                    writeln!(f, "{entry}")?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Game {
    pub teams: Matchup<Team>,
    pub location: String,
    pub date: NaiveDate,
    pub first_pitch: Option<DateTime<Utc>>,
    pub last_pitch: Option<DateTime<Utc>>,
    innings: Vec<Inning>,
}

impl Game {
    pub fn new(away: Team, home: Team, location: &str, date: NaiveDate) -> Self {
        Self {
            teams: Matchup::new(away, home),
            location: location.to_string(),
            date,
            first_pitch: None,
            last_pitch: None,
            innings: vec![],
        }
    }

    pub fn with_pitch_times(self, first_pitch: DateTime<Utc>, last_pitch: DateTime<Utc>) -> Result<Self> {
        if last_pitch < first_pitch {
            bail!("Last pitch {} precedes first pitch {}", last_pitch, first_pitch)
        }
        Ok(Self {
            first_pitch: Some(first_pitch),
            last_pitch: Some(last_pitch),
            ..self
        })
    }

    /// Appends the next inning. Innings must arrive in order starting at 1.
    pub fn push_inning(&mut self, inning: Inning) -> Result<()> {
        let expected = self.innings.len() + 1;
        if usize::from(inning.number) != expected {
            bail!("Expected inning {}, got inning {}", expected, inning.number)
        }
        info!(
            "{} at {}: inning {} recorded",
            self.teams.away.abbreviation, self.teams.home.abbreviation, inning.number
        );
        self.innings.push(inning);
        Ok(())
    }

    pub fn innings(&self) -> &[Inning] {
        &self.innings
    }

    pub const fn team(&self, side: Side) -> &Team {
        self.teams.get(side)
    }

    pub const fn batting_team(&self, half: InningHalf) -> &Team {
        self.team(half.batting_side())
    }

    pub const fn fielding_team(&self, half: InningHalf) -> &Team {
        self.team(half.fielding_side())
    }

    /// Every plate appearance by the team on `side`, in game order.
    pub fn plate_appearances(&self, side: Side) -> impl Iterator<Item = &PlateAppearance> {
        let half = match side {
            Side::Away => InningHalf::Top,
            Side::Home => InningHalf::Bottom,
        };
        self.innings
            .iter()
            .filter_map(move |inning| inning.half(half))
            .flat_map(HalfInning::plate_appearances)
    }

    /// Half-inning counts for the team on `side`, one entry per inning it batted.
    pub fn half_inning_stats(&self, side: Side) -> Vec<HalfInningStats> {
        let half = match side {
            Side::Away => InningHalf::Top,
            Side::Home => InningHalf::Bottom,
        };
        self.innings.iter().filter_map(|i| i.stats(half)).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;
    use crate::scorecard::appearance::AppearanceMarker;
    use crate::scorecard::plate_appearance::{PlateAppearanceInput, SummaryLabel};
    use crate::scorecard::roster::Player;
    use crate::scorecard::sub_event::{PitchCall, SubEvent};
    use crate::scorecard::traits::{FieldingPosition, Outs, PlayerKey};

    fn yankees() -> Team {
        Team::with_roster(
            "New York Yankees",
            "NYY",
            vec![
                Player::new(592_450, "Aaron", "Judge"),
                Player::new(458_731, "Brett", "Gardner"),
                Player::new(519_317, "Giancarlo", "Stanton"),
                Player::new(1, "Masahiro", "Tanaka").with_era(3.75),
            ],
        )
    }

    fn red_sox() -> Team {
        Team::with_roster(
            "Boston Red Sox",
            "BOS",
            vec![
                Player::new(605_141, "Mookie", "Betts"),
                Player::new(2, "Chris", "Sale").with_era(2.11),
            ],
        )
    }

    fn pitches(calls: &[PitchCall]) -> Vec<SubEvent> {
        calls.iter().map(|&call| SubEvent::Pitch { call }).collect()
    }

    fn appearance(
        team: &Team,
        batter: u64,
        description: &str,
        summary: &str,
        outs: u8,
        calls: &[PitchCall],
        scoring: Vec<u64>,
    ) -> HalfInningEntry {
        let input = PlateAppearanceInput {
            description: description.to_string(),
            summary: summary.parse().unwrap(),
            pitcher: Arc::new(Player::new(2, "Chris", "Sale")),
            batter: team.get(&PlayerKey::Id(batter)).unwrap(),
            outs: Outs::new(outs).unwrap(),
            scoring_runners: scoring
                .into_iter()
                .map(|id| team.get(&PlayerKey::Id(id)).unwrap())
                .collect(),
            runs_batted_in: vec![],
            sub_events: pitches(calls),
        };
        HalfInningEntry::PlateAppearance(PlateAppearance::new(input, team).unwrap())
    }

    fn top_first(team: &Team) -> HalfInning {
        use PitchCall::{Ball, CalledStrike, Foul, InPlay, SwingingStrike};
        HalfInning::new(vec![
            appearance(team, 458_731, "Brett Gardner walks.", "Walk", 0, &[Ball, Ball, CalledStrike, Ball, Ball], vec![]),
            appearance(
                team,
                592_450,
                "Aaron Judge singles on a line drive to left fielder Andrew Benintendi. Brett Gardner to 2nd.",
                "Single",
                0,
                &[Foul, InPlay],
                vec![],
            ),
            appearance(
                team,
                519_317,
                "Giancarlo Stanton strikes out swinging.",
                "Strikeout",
                0,
                &[SwingingStrike, SwingingStrike, SwingingStrike],
                vec![],
            ),
            HalfInningEntry::Substitution(PlayerAppearance::new(
                team.get(&PlayerKey::Id(1)).unwrap(),
                FieldingPosition::PinchRunner,
                AppearanceMarker::new(1, InningHalf::Top, 4),
            )),
        ])
    }

    #[test]
    fn test_half_inning_stats() {
        let team = yankees();
        let stats = top_first(&team).stats();
        assert_eq!(
            stats,
            HalfInningStats {
                pitches: 10,
                strikes: 6,
                walks: 1,
                strikeouts: 1,
                left_on_base: 2,
                errors: 0,
                hits: 1,
                runs: 0,
            }
        );
    }

    #[test]
    fn test_runs_and_runners_out_reduce_lob() {
        let team = yankees();
        let half = HalfInning::new(vec![
            appearance(&team, 458_731, "Brett Gardner singles to right fielder Mookie Betts.", "Single", 0, &[], vec![]),
            appearance(
                &team,
                592_450,
                "Aaron Judge homers (27) on a fly ball to left center field. Brett Gardner scores.",
                "Home Run",
                0,
                &[],
                vec![458_731, 592_450],
            ),
            appearance(
                &team,
                519_317,
                "Giancarlo Stanton reaches on a fielding error by shortstop Xander Bogaerts.",
                "Field Error",
                0,
                &[],
                vec![],
            ),
            appearance(
                &team,
                458_731,
                "Brett Gardner singles to left fielder Andrew Benintendi. Giancarlo Stanton out at 3rd, left fielder Andrew Benintendi to third baseman Rafael Devers.",
                "Single",
                1,
                &[],
                vec![],
            ),
        ]);
        let stats = half.stats();
        assert_eq!(stats.runs, 2);
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.left_on_base, 0);
    }

    #[test]
    fn test_game_accessors() {
        let away = yankees();
        let home = red_sox();
        let top = top_first(&away);
        let mut game = Game::new(away, home, "Fenway Park", NaiveDate::from_ymd_opt(2018, 7, 1).unwrap());
        game.push_inning(Inning::new(1, Some(top), None)).unwrap();
        assert!(game.push_inning(Inning::new(3, None, None)).is_err());

        assert_eq!(game.batting_team(InningHalf::Top).abbreviation, "NYY");
        assert_eq!(game.fielding_team(InningHalf::Top).abbreviation, "BOS");
        assert_eq!(game.plate_appearances(Side::Away).count(), 3);
        assert_eq!(game.plate_appearances(Side::Home).count(), 0);
        assert_eq!(game.half_inning_stats(Side::Away)[0].walks, 1);
        assert!(game.innings()[0].half(InningHalf::Bottom).is_none());

        let json = serde_json::to_value(&game.innings()[0]).unwrap();
        assert!(json["bottom"].is_null());
        assert_eq!(json["top"]["stats"]["pitches"], 10);
    }

    #[test]
    fn test_pitch_times() {
        let game = Game::new(yankees(), red_sox(), "Fenway Park", NaiveDate::from_ymd_opt(2018, 7, 1).unwrap());
        let first = Utc.with_ymd_and_hms(2018, 7, 1, 17, 35, 0).unwrap();
        let last = Utc.with_ymd_and_hms(2018, 7, 1, 20, 50, 0).unwrap();
        assert!(game.clone().with_pitch_times(last, first).is_err());
        let game = game.with_pitch_times(first, last).unwrap();
        assert_eq!(game.first_pitch, Some(first));
    }

    #[test]
    fn test_inning_display() {
        let team = yankees();
        let inning = Inning::new(1, Some(top_first(&team)), None);
        let text = inning.to_string();
        assert!(text.contains("TOP OF INNING"));
        assert!(text.contains("R: 0  H: 1  E: 0  LOB: 2"));
        assert!(text.contains(" Scorecard:      K"));
    }
}
