use std::fmt::{Display, Formatter};
use std::sync::Arc;

use anyhow::{bail, Result};
use serde::Serialize;
use strum_macros::{AsRefStr, EnumString};

use crate::scorecard::roster::Player;
use crate::scorecard::traits::{FieldingPosition, Inning, InningHalf};

/// A point in the game between two plate appearances: the inning, its half,
/// and how many batters had come up in that half so far.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Serialize)]
pub struct AppearanceMarker {
    pub inning: Inning,
    pub half: InningHalf,
    pub batter_count: u8,
}

impl AppearanceMarker {
    pub const fn new(inning: Inning, half: InningHalf, batter_count: u8) -> Self {
        Self {
            inning,
            half,
            batter_count,
        }
    }

    pub const fn game_start() -> Self {
        Self::new(1, InningHalf::Top, 1)
    }
}

impl Display for AppearanceMarker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{} before batter #{}",
            self.inning, self.half, self.batter_count
        )
    }
}

/// Decision credited to a pitcher by the official scorer.
#[derive(Debug, Eq, PartialEq, EnumString, AsRefStr, Copy, Clone, Hash, Serialize)]
pub enum PitcherCredit {
    #[strum(serialize = "W")]
    Win,
    #[strum(serialize = "L")]
    Loss,
    #[strum(serialize = "S", serialize = "SV")]
    Save,
    #[strum(serialize = "H", serialize = "HLD")]
    Hold,
    #[strum(serialize = "BS")]
    BlownSave,
}

/// One player's tenure at a defensive position or batting slot. The end
/// marker stays open until the player is replaced.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct PlayerAppearance {
    pub player: Arc<Player>,
    pub position: FieldingPosition,
    pub start: AppearanceMarker,
    end: Option<AppearanceMarker>,
    pitcher_credit: Option<PitcherCredit>,
}

impl PlayerAppearance {
    pub fn new(player: Arc<Player>, position: FieldingPosition, start: AppearanceMarker) -> Self {
        Self {
            player,
            position,
            start,
            end: None,
            pitcher_credit: None,
        }
    }

    pub const fn end(&self) -> Option<AppearanceMarker> {
        self.end
    }

    pub const fn is_open(&self) -> bool {
        self.end.is_none()
    }

    pub const fn pitcher_credit(&self) -> Option<PitcherCredit> {
        self.pitcher_credit
    }

    /// Closes the appearance at `end`. Substitutions must be processed in play
    /// order, so an appearance can only be closed once and never before it began.
    pub fn close(&mut self, end: AppearanceMarker) -> Result<()> {
        if let Some(existing) = self.end {
            bail!(
                "Appearance of {} already closed at {}",
                self.player.full_name(),
                existing
            )
        }
        if end < self.start {
            bail!(
                "Appearance of {} cannot end at {} before it started at {}",
                self.player.full_name(),
                end,
                self.start
            )
        }
        self.end = Some(end);
        Ok(())
    }

    pub fn set_pitcher_credit(&mut self, credit: PitcherCredit) {
        self.pitcher_credit = Some(credit);
    }
}

impl Display for PlayerAppearance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.player)?;
        if let Some(pitching) = self.player.pitching_stats() {
            writeln!(f, "    {pitching}")?;
        }
        writeln!(f, "    {}", self.player.hitting_stats())?;
        writeln!(
            f,
            "    Entered:     {:24}    (position {:?})",
            self.start.to_string(),
            self.position
        )?;
        if let Some(end) = self.end {
            writeln!(f, "    Exited:      {end}")?;
        }
        Ok(())
    }
}
