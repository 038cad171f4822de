use std::fmt::{Display, Formatter};
use std::sync::Arc;

use anyhow::{Context, Result};
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use strum_macros::{AsRefStr, EnumString};
use tracing::debug;

use crate::scorecard::baserunning::{defense_suffix, out_runners, OutRunner};
use crate::scorecard::defense::{error_position, DefensiveChain};
use crate::scorecard::names::normalize_description;
use crate::scorecard::play_code::PlayCode;
use crate::scorecard::roster::{Player, Team};
use crate::scorecard::segment::Segments;
use crate::scorecard::sub_event::SubEvent;
use crate::scorecard::traits::{FieldingPosition, Outs};

/// Short outcome label supplied by the data feed next to each description,
/// e.g. "Single" or "Groundout".
#[derive(Debug, Eq, PartialEq, EnumString, AsRefStr, Clone, Hash)]
pub enum SummaryLabel {
    Single,
    Double,
    Triple,
    #[strum(serialize = "Hit By Pitch")]
    HitByPitch,
    #[strum(serialize = "Home Run")]
    HomeRun,
    Walk,
    #[strum(serialize = "Intent Walk")]
    IntentWalk,
    #[strum(serialize = "Fan interference")]
    FanInterference,
    #[strum(default)]
    Other(String),
}

impl SummaryLabel {
    /// Scorecard notation for labels that put the batter on base.
    pub const fn on_base_notation(&self) -> Option<&'static str> {
        match self {
            Self::Single => Some("1B"),
            Self::Double => Some("2B"),
            Self::Triple => Some("3B"),
            Self::HitByPitch => Some("HBP"),
            Self::HomeRun => Some("HR"),
            Self::Walk => Some("BB"),
            Self::IntentWalk => Some("IBB"),
            Self::FanInterference | Self::Other(_) => None,
        }
    }

    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Single | Self::Double | Self::Triple | Self::HomeRun)
    }

    pub const fn is_walk(&self) -> bool {
        matches!(self, Self::Walk | Self::IntentWalk)
    }
}

impl Display for SummaryLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Other(label) => write!(f, "{label}"),
            _ => write!(f, "{}", self.as_ref()),
        }
    }
}

impl Serialize for SummaryLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Everything derived from a description and its summary label.
#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
pub struct Scorecard {
    pub play_code: Option<PlayCode>,
    pub hit_location: Option<String>,
    pub defensive_chain: String,
    pub defense_suffix: String,
    pub error_code: Option<String>,
    pub on_base: bool,
    pub summary: String,
}

impl Scorecard {
    pub fn translate(description: &str, summary: &SummaryLabel) -> Result<Self> {
        let segments = Segments::new(description);
        let play_code = PlayCode::classify(&segments.primary, &summary.to_string(), description)?;
        let defensive_chain = DefensiveChain::from_clause(&segments.fielding)?.render();
        let defense_suffix = defense_suffix(&segments.suffix)?;
        let error_code = Self::error_code(description)?;

        let code = play_code.map(|c| c.to_string()).unwrap_or_default();
        let hit_location = defensive_chain
            .chars()
            .next()
            .filter(|_| play_code.map_or(true, PlayCode::has_hit_location))
            .map(|first| format!("{code}{first}"));

        let (on_base, summary) = match summary.on_base_notation() {
            Some(notation) => (true, format!("{notation}{defense_suffix}")),
            None => (false, format!("{code}{defensive_chain}{defense_suffix}")),
        };

        Ok(Self {
            play_code,
            hit_location,
            defensive_chain,
            defense_suffix,
            error_code,
            on_base,
            summary,
        })
    }

    fn error_code(description: &str) -> Result<Option<String>> {
        if let Some(position) = error_position(description)? {
            Ok(Some(format!("E{position}")))
        } else if description.contains("catcher interference") {
            Ok(Some(format!("E{}", FieldingPosition::Catcher)))
        } else {
            Ok(None)
        }
    }

    pub fn is_strikeout(&self) -> bool {
        matches!(
            self.play_code,
            Some(PlayCode::Strikeout | PlayCode::StrikeoutLooking)
        )
    }
}

/// A translated description together with the runners it put out.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Translation {
    pub description: String,
    pub scorecard: Scorecard,
    pub out_runners: Vec<OutRunner>,
}

impl Translation {
    pub fn new(description: &str, summary: &SummaryLabel, batting_team: &Team) -> Result<Self> {
        let description = normalize_description(description);
        let scorecard = Scorecard::translate(&description, summary)
            .with_context(|| format!("Failed to translate {summary} description"))?;
        let stripped = Segments::new(&description).stripped;
        let out_runners = out_runners(&stripped, batting_team);
        debug!("Translated {:?} as {}", description, scorecard.summary);
        Ok(Self {
            description,
            scorecard,
            out_runners,
        })
    }

    /// Translates many descriptions against one roster in parallel. Results
    /// are returned in input order.
    pub fn batch(items: &[(String, SummaryLabel)], batting_team: &Team) -> Vec<Result<Self>> {
        items
            .par_iter()
            .map(|(description, summary)| Self::new(description, summary, batting_team))
            .collect()
    }
}

/// Runner who scored on the play and whether the batter is credited with
/// driving them in.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct RunBattedIn {
    pub runner: Arc<Player>,
    pub credited: bool,
}

#[derive(Debug, PartialEq, Clone)]
pub struct PlateAppearanceInput {
    pub description: String,
    pub summary: SummaryLabel,
    pub pitcher: Arc<Player>,
    pub batter: Arc<Player>,
    pub outs: Outs,
    pub scoring_runners: Vec<Arc<Player>>,
    pub runs_batted_in: Vec<RunBattedIn>,
    pub sub_events: Vec<SubEvent>,
}

/// One batter's turn at the plate. The translated fields are fixed at
/// construction.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct PlateAppearance {
    pub summary: SummaryLabel,
    pub pitcher: Arc<Player>,
    pub batter: Arc<Player>,
    pub outs: Outs,
    pub scoring_runners: Vec<Arc<Player>>,
    pub runs_batted_in: Vec<RunBattedIn>,
    pub sub_events: Vec<SubEvent>,
    translation: Translation,
}

impl PlateAppearance {
    pub fn new(input: PlateAppearanceInput, batting_team: &Team) -> Result<Self> {
        let translation = Translation::new(&input.description, &input.summary, batting_team)
            .with_context(|| format!("Batter {} facing {}", input.batter.full_name(), input.pitcher.full_name()))?;
        Ok(Self {
            summary: input.summary,
            pitcher: input.pitcher,
            batter: input.batter,
            outs: input.outs,
            scoring_runners: input.scoring_runners,
            runs_batted_in: input.runs_batted_in,
            sub_events: input.sub_events,
            translation,
        })
    }

    pub fn translate_batch(inputs: Vec<PlateAppearanceInput>, batting_team: &Team) -> Vec<Result<Self>> {
        inputs
            .into_par_iter()
            .map(|input| Self::new(input, batting_team))
            .collect()
    }

    pub fn description(&self) -> &str {
        &self.translation.description
    }

    pub const fn scorecard(&self) -> &Scorecard {
        &self.translation.scorecard
    }

    pub fn out_runners(&self) -> &[OutRunner] {
        &self.translation.out_runners
    }
}

impl Display for PlateAppearance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let scorecard = self.scorecard();
        let names = |players: &[Arc<Player>]| players.iter().map(|p| p.full_name()).join(", ");
        writeln!(f, " Scorecard:      {}", scorecard.summary)?;
        writeln!(f, " Hit location:   {}", scorecard.hit_location.as_deref().unwrap_or("-"))?;
        writeln!(f, " Pitcher:        {}", self.pitcher)?;
        writeln!(f, " Batter:         {}", self.batter)?;
        writeln!(f, " Got on base:    {}", scorecard.on_base)?;
        writeln!(f, " Fielding Error: {}", scorecard.error_code.as_deref().unwrap_or("-"))?;
        writeln!(
            f,
            " Out Runners:    {}",
            self.out_runners()
                .iter()
                .map(|r| format!("{} ({})", r.name, r.base))
                .join(", ")
        )?;
        writeln!(f, " Scoring Runners:{}", names(&self.scoring_runners))?;
        writeln!(
            f,
            " Runs Batted In: {}",
            self.runs_batted_in
                .iter()
                .filter(|r| r.credited)
                .map(|r| r.runner.full_name())
                .join(", ")
        )?;
        writeln!(f, " Inning Outs:    {}", self.outs)?;
        writeln!(f, " Summary:        {}", self.summary)?;
        writeln!(f, " Description:    {}", self.description())
    }
}
