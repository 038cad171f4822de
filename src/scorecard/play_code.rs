use anyhow::Result;
use serde::{Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::scorecard::error::TranslationError;

#[derive(Debug, Eq, PartialEq, EnumString, Display, AsRefStr, Copy, Clone, Hash)]
pub enum PlayCode {
    #[strum(serialize = "PO")]
    PickOff,
    #[strum(serialize = "CS")]
    CaughtStealing,
    #[strum(serialize = "WP")]
    WildPitch,
    #[strum(serialize = "PB")]
    PassedBall,
    #[strum(serialize = "BLK")]
    Balk,
    #[strum(serialize = "S")]
    StolenBase,
    #[strum(serialize = "FI")]
    FanInterference,
    #[strum(serialize = "CI")]
    CatcherInterference,
    #[strum(serialize = "E")]
    Error,
    #[strum(serialize = "G")]
    GroundBall,
    #[strum(serialize = "HR")]
    HomeRun,
    #[strum(serialize = "P")]
    PopUp,
    #[strum(serialize = "L")]
    LineDrive,
    #[strum(serialize = "F")]
    FlyBall,
    #[strum(serialize = "SF")]
    SacrificeFly,
    #[strum(serialize = "HBP")]
    HitByPitch,
    #[strum(serialize = "B")]
    Bunt,
    #[strum(serialize = "SB")]
    SacrificeBunt,
    #[strum(serialize = "BB")]
    Walk,
    #[strum(serialize = "IBB")]
    IntentionalWalk,
    /// Backwards K.
    #[strum(serialize = "ꓘ")]
    StrikeoutLooking,
    #[strum(serialize = "K")]
    Strikeout,
    #[strum(serialize = "FC")]
    FieldersChoice,
}

impl Serialize for PlayCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

/// Keyword table in precedence order. Every matching entry is applied and
/// the last one wins, so a more specific phrase must come after any broader
/// phrase it contains ("sacrifice fly" after "fly").
pub const PLAY_KEYWORDS: [(&str, PlayCode); 25] = [
    ("picks off", PlayCode::PickOff),
    ("caught stealing", PlayCode::CaughtStealing),
    ("wild pitch", PlayCode::WildPitch),
    ("passed ball", PlayCode::PassedBall),
    ("balk", PlayCode::Balk),
    ("steals", PlayCode::StolenBase),
    ("fan interference", PlayCode::FanInterference),
    ("catcher interference", PlayCode::CatcherInterference),
    ("error", PlayCode::Error),
    ("ground", PlayCode::GroundBall),
    ("grand slam", PlayCode::HomeRun),
    ("homers", PlayCode::HomeRun),
    ("pop", PlayCode::PopUp),
    ("line", PlayCode::LineDrive),
    ("fly", PlayCode::FlyBall),
    ("flies", PlayCode::FlyBall),
    ("sacrifice fly", PlayCode::SacrificeFly),
    ("hit by pitch", PlayCode::HitByPitch),
    ("bunt", PlayCode::Bunt),
    ("sacrifice bunt", PlayCode::SacrificeBunt),
    ("walks", PlayCode::Walk),
    ("intentionally walks", PlayCode::IntentionalWalk),
    ("called out on strikes", PlayCode::StrikeoutLooking),
    ("strikes out", PlayCode::Strikeout),
    ("choice", PlayCode::FieldersChoice),
];

/// Clauses where no single fielding-action keyword is expected.
const UNCODED_PHRASES: [&str; 6] = [
    "out at",
    "singles",
    "doubles",
    "triples",
    "hits a home run",
    "ejected",
];

/// Summary label that forces the fan interference code.
pub const FAN_INTERFERENCE_LABEL: &str = "Fan interference";

impl PlayCode {
    /// Plays that never put a batted ball in play.
    pub const fn has_hit_location(self) -> bool {
        !matches!(
            self,
            Self::Strikeout | Self::StrikeoutLooking | Self::Walk | Self::IntentionalWalk
        )
    }

    /// Classifies the primary clause of a description. `Ok(None)` is the empty
    /// code for hits and other plays without a fielding keyword.
    pub fn classify(primary: &str, summary: &str, description: &str) -> Result<Option<Self>> {
        if summary == FAN_INTERFERENCE_LABEL {
            return Ok(Some(Self::FanInterference));
        }
        let code = PLAY_KEYWORDS
            .iter()
            .filter(|(keyword, _)| primary.contains(keyword))
            .map(|(_, code)| *code)
            .last();
        match code {
            Some(c) => Ok(Some(c)),
            None if UNCODED_PHRASES.iter().any(|p| primary.contains(p)) => Ok(None),
            None => Err(TranslationError::no_play_keyword(description).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(primary: &str) -> Option<PlayCode> {
        PlayCode::classify(primary, "", primary).unwrap()
    }

    #[test]
    fn test_last_match_wins() {
        assert_eq!(classify("Mookie Betts hits a sacrifice fly to center"), Some(PlayCode::SacrificeFly));
        assert_eq!(classify("Mookie Betts flies out to center"), Some(PlayCode::FlyBall));
        assert_eq!(
            classify("Masahiro Tanaka intentionally walks Mookie Betts"),
            Some(PlayCode::IntentionalWalk)
        );
        assert_eq!(classify("Mookie Betts walks"), Some(PlayCode::Walk));
        assert_eq!(
            classify("Brett Gardner out on a sacrifice bunt, pitcher Chris Sale to first baseman Mitch Moreland"),
            Some(PlayCode::SacrificeBunt)
        );
        assert_eq!(
            classify("Didi Gregorius grounds into a force out, fielder's choice, shortstop Xander Bogaerts to second baseman Dustin Pedroia"),
            Some(PlayCode::FieldersChoice)
        );
    }

    #[test]
    fn test_strikeouts() {
        assert_eq!(classify("Aaron Judge strikes out swinging"), Some(PlayCode::Strikeout));
        assert_eq!(classify("Aaron Judge called out on strikes"), Some(PlayCode::StrikeoutLooking));
        assert_eq!(PlayCode::StrikeoutLooking.to_string(), "ꓘ");
        assert!(!PlayCode::Strikeout.has_hit_location());
        assert!(PlayCode::GroundBall.has_hit_location());
    }

    #[test]
    fn test_uncoded_plays() {
        assert_eq!(classify("Mike Trout singles to center field"), None);
        assert_eq!(classify("Mike Trout triples to deep right field"), None);
        assert_eq!(classify("Mike Trout hits a home run to left"), None);
        assert_eq!(classify("Manager John Farrell ejected by HP umpire Joe West"), None);
    }

    #[test]
    fn test_fan_interference_label() {
        let code = PlayCode::classify("Mike Trout doubles to left", FAN_INTERFERENCE_LABEL, "").unwrap();
        assert_eq!(code, Some(PlayCode::FanInterference));
    }

    #[test]
    fn test_no_keyword() {
        let err = PlayCode::classify("Mike Trout does something odd", "Runner Out", "Mike Trout does something odd.")
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<TranslationError>(),
            Some(&TranslationError::no_play_keyword("Mike Trout does something odd."))
        );
    }

    #[test]
    fn test_specific_entries_follow_broader_ones() {
        let position = |keyword: &str| PLAY_KEYWORDS.iter().position(|(k, _)| *k == keyword).unwrap();
        for (broad, specific) in [
            ("fly", "sacrifice fly"),
            ("bunt", "sacrifice bunt"),
            ("walks", "intentionally walks"),
            ("error", "catcher interference"),
        ] {
            if specific.contains(broad) {
                assert!(position(broad) < position(specific), "{specific} must follow {broad}");
            }
        }
        for (i, (keyword, _)) in PLAY_KEYWORDS.iter().enumerate() {
            for (later, _) in &PLAY_KEYWORDS[i + 1..] {
                assert!(
                    !keyword.contains(later),
                    "{later} would override the more specific {keyword}"
                );
            }
        }
    }
}
