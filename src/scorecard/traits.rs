use std::fmt::{Display, Formatter};

use bounded_integer::{BoundedU8, BoundedUsize};
use fixed_map::Key;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use strum_macros::{AsRefStr, Display, EnumString};

/// Outs recorded in the inning before a plate appearance begins.
pub type Outs = BoundedU8<0, 2>;
/// One-indexed slot in the batting order.
pub type BattingSlot = BoundedUsize<1, 9>;
pub type Inning = u8;

#[derive(
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    Copy,
    Clone,
    Hash,
    Serialize_repr,
    Deserialize_repr,
)]
#[repr(u8)]
pub enum FieldingPosition {
    #[strum(disabled)]
    Unknown = 0,
    #[strum(serialize = "pitcher")]
    Pitcher,
    #[strum(serialize = "catcher")]
    Catcher,
    #[strum(serialize = "first")]
    FirstBaseman,
    #[strum(serialize = "second")]
    SecondBaseman,
    #[strum(serialize = "third")]
    ThirdBaseman,
    #[strum(serialize = "shortstop")]
    Shortstop,
    #[strum(serialize = "left")]
    LeftFielder,
    #[strum(serialize = "center")]
    CenterFielder,
    #[strum(serialize = "right")]
    RightFielder,
    #[strum(serialize = "designated")]
    DesignatedHitter,
    #[strum(disabled)]
    PinchHitter,
    #[strum(disabled)]
    PinchRunner,
}

impl FieldingPosition {
    /// Numeric scorecard code, e.g. `6` for the shortstop.
    pub fn code(self) -> u8 {
        self.into()
    }
}

impl Display for FieldingPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    EnumString,
    Display,
    AsRefStr,
    Copy,
    Clone,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum Base {
    #[strum(serialize = "1st")]
    #[serde(rename = "1st")]
    First,
    #[strum(serialize = "2nd")]
    #[serde(rename = "2nd")]
    Second,
    #[strum(serialize = "3rd")]
    #[serde(rename = "3rd")]
    Third,
    #[strum(serialize = "home")]
    #[serde(rename = "home")]
    Home,
}

impl Base {
    /// The base after this one, or `None` from home.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::First => Some(Self::Second),
            Self::Second => Some(Self::Third),
            Self::Third => Some(Self::Home),
            Self::Home => None,
        }
    }
}

#[derive(
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    EnumString,
    Display,
    Copy,
    Clone,
    Hash,
    Serialize,
    Deserialize,
    Key,
    Default,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InningHalf {
    #[default]
    Top,
    Bottom,
}

impl InningHalf {
    pub const fn batting_side(self) -> Side {
        match self {
            Self::Top => Side::Away,
            Self::Bottom => Side::Home,
        }
    }

    pub const fn fielding_side(self) -> Side {
        self.batting_side().flip()
    }
}

#[derive(
    Debug, Eq, PartialEq, EnumString, Display, Copy, Clone, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Away,
    Home,
}

impl Side {
    pub const fn flip(self) -> Self {
        match self {
            Self::Away => Self::Home,
            Self::Home => Self::Away,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Default, Serialize, Deserialize)]
pub struct Matchup<T> {
    pub away: T,
    pub home: T,
}

impl<T> Matchup<T> {
    pub const fn new(away: T, home: T) -> Self {
        Self { away, home }
    }

    pub const fn get(&self, side: Side) -> &T {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }
}

/// Roster lookup key. Prose and data feeds refer to players either by
/// numeric id or by name.
#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum PlayerKey {
    Id(u64),
    Name(String),
}

impl From<u64> for PlayerKey {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for PlayerKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for PlayerKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl Display for PlayerKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}
