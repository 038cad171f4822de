use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString};

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub enum PitchCallGeneral {
    Ball,
    Strike,
    InPlay,
    NoPitch,
    Unknown,
}

impl PitchCallGeneral {
    pub fn is_pitch(self) -> bool {
        ![Self::NoPitch, Self::Unknown].contains(&self)
    }

    pub fn is_strike(self) -> bool {
        [Self::Strike, Self::InPlay].contains(&self)
    }

    pub fn is_in_play(self) -> bool {
        self == Self::InPlay
    }
}

/// Umpire's call on a single pitch, keyed by the wording used in
/// pitch-by-pitch feeds.
#[derive(
    Debug, Ord, PartialOrd, Eq, PartialEq, EnumString, AsRefStr, Copy, Clone, Hash, Serialize, Deserialize, Default,
)]
pub enum PitchCall {
    #[strum(serialize = "Ball", serialize = "Ball In Dirt")]
    Ball,
    #[strum(serialize = "Called Strike")]
    CalledStrike,
    #[strum(serialize = "Swinging Strike", serialize = "Swinging Strike (Blocked)")]
    SwingingStrike,
    #[strum(serialize = "Foul")]
    Foul,
    #[strum(serialize = "Foul Tip")]
    FoulTip,
    #[strum(serialize = "Foul Bunt")]
    FoulBunt,
    #[strum(serialize = "Missed Bunt")]
    MissedBunt,
    #[strum(serialize = "Hit By Pitch")]
    HitBatter,
    #[strum(serialize = "Intent Ball")]
    IntentionalBall,
    #[strum(serialize = "Pitchout")]
    Pitchout,
    #[strum(serialize = "Automatic Ball")]
    AutomaticBall,
    #[strum(serialize = "Automatic Strike")]
    AutomaticStrike,
    #[strum(
        serialize = "In play, out(s)",
        serialize = "In play, no out",
        serialize = "In play, run(s)"
    )]
    InPlay,
    #[strum(serialize = "Pickoff Attempt")]
    PickoffAttempt,
    #[default]
    Unknown,
}

impl PitchCall {
    pub const fn general(self) -> PitchCallGeneral {
        match self {
            Self::Ball | Self::HitBatter | Self::IntentionalBall | Self::Pitchout | Self::AutomaticBall => {
                PitchCallGeneral::Ball
            }
            Self::CalledStrike
            | Self::SwingingStrike
            | Self::Foul
            | Self::FoulTip
            | Self::FoulBunt
            | Self::MissedBunt
            | Self::AutomaticStrike => PitchCallGeneral::Strike,
            Self::InPlay => PitchCallGeneral::InPlay,
            Self::PickoffAttempt => PitchCallGeneral::NoPitch,
            Self::Unknown => PitchCallGeneral::Unknown,
        }
    }
}

/// Something that happened while a batter was at the plate, supplied by the
/// ingestion layer alongside the plate appearance description.
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubEvent {
    Pitch { call: PitchCall },
    /// Stolen base, wild pitch, pickoff and the like.
    Baserunning { description: String },
    Substitution { description: String },
    Other { description: String },
}

impl SubEvent {
    pub const fn pitch_call(&self) -> Option<PitchCall> {
        match self {
            Self::Pitch { call } => Some(*call),
            _ => None,
        }
    }

    pub fn is_pitch(&self) -> bool {
        self.pitch_call().map_or(false, |c| c.general().is_pitch())
    }

    pub fn is_strike(&self) -> bool {
        self.pitch_call().map_or(false, |c| c.general().is_strike())
    }
}
