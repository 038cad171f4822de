use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use const_format::concatcp;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Serialize;
use tracing::warn;

use crate::scorecard::defense::DefensiveChain;
use crate::scorecard::roster::{Player, Team};
use crate::scorecard::traits::{Base, PlayerKey};

const RUNNER_NAME: &str = r"([A-Z][\w'-]+\s+(?:[A-Za-z][\w'-]+\s+)?(?:[A-Za-z][\w'-]+\s+)?[A-Z][\w'-]+)";
const OUT_PHRASE: &str = r"(out at|(?:was )?picked off and caught stealing|(?:was )?caught stealing|(?:was )?picked off|(?:was )?doubled off)";
const BASE_TOKEN: &str = r"([1-3h][snro][tdm]e?)";

const RUNNER_OUT: &str = concatcp!(RUNNER_NAME, r"\s+", OUT_PHRASE, r"\s+", BASE_TOKEN);
const OUT_WITH_FIELDERS: &str = concatcp!(OUT_PHRASE, r"\s+", BASE_TOKEN, r"[\w\s]*, ");

lazy_static! {
    static ref RUNNER_OUT_REGEX: Regex = Regex::new(RUNNER_OUT).unwrap();
    static ref OUT_WITH_FIELDERS_REGEX: Regex = Regex::new(OUT_WITH_FIELDERS).unwrap();
}

/// A baserunner put out during the plate appearance. `player` is `None` when
/// the name as written could not be matched against the batting team.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct OutRunner {
    pub name: String,
    pub player: Option<Arc<Player>>,
    pub base: Base,
}

impl OutRunner {
    fn from_captures(captures: &Captures, batting_team: &Team) -> Option<Self> {
        let name = captures.get(1)?.as_str();
        let phrase = captures.get(2)?.as_str();
        let token = captures.get(3)?.as_str();

        let Ok(mut base) = Base::from_str(token) else {
            warn!("Unrecognized base {:?} for runner {}", token, name);
            return None;
        };
        // The runner was heading back to the previous base.
        if phrase.ends_with("doubled off") {
            match base.next() {
                Some(next) => base = next,
                None => warn!("{} doubled off home, keeping home", name),
            }
        }

        let player = batting_team.find(&PlayerKey::from(name)).cloned();
        if player.is_none() {
            warn!("Out runner {} not on the {} roster", name, batting_team.abbreviation);
        }
        Some(Self {
            name: name.to_string(),
            player,
            base,
        })
    }
}

/// Every runner put out anywhere in `stripped`, in order of appearance.
pub fn out_runners(stripped: &str, batting_team: &Team) -> Vec<OutRunner> {
    RUNNER_OUT_REGEX
        .captures_iter(stripped)
        .filter_map(|c| OutRunner::from_captures(&c, batting_team))
        .collect()
}

/// Parenthesized putout chain for the first runner out in the suffix clauses,
/// e.g. " (4-6)". Empty when there is no such runner or no fielder is credited.
pub fn defense_suffix(suffix: &str) -> Result<String> {
    let Some(m) = OUT_WITH_FIELDERS_REGEX.find(suffix) else {
        return Ok(String::new());
    };
    let chain = DefensiveChain::from_clause(&suffix[m.start()..])?;
    if chain.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!(" ({})", chain.render()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yankees() -> Team {
        Team::with_roster(
            "New York Yankees",
            "NYY",
            vec![
                Player::new(519_317, "Giancarlo", "Stanton"),
                Player::new(592_450, "Aaron", "Judge"),
                Player::new(544_369, "Didi", "Gregorius"),
                Player::new(458_731, "Brett", "Gardner"),
            ],
        )
    }

    #[test]
    fn test_out_at_base() {
        let runners = out_runners(
            "Didi Gregorius singles to right fielder Mookie Betts. Aaron Judge out at home, right fielder Mookie Betts to catcher Sandy Leon.",
            &yankees(),
        );
        assert_eq!(runners.len(), 1);
        assert_eq!(runners[0].name, "Aaron Judge");
        assert_eq!(runners[0].base, Base::Home);
        assert_eq!(runners[0].player.as_ref().unwrap().id, 592_450);
    }

    #[test]
    fn test_doubled_off_advances() {
        let runners = out_runners(
            "Aaron Judge lines into a double play, second baseman Dustin Pedroia to shortstop Xander Bogaerts. Brett Gardner doubled off 2nd.",
            &yankees(),
        );
        assert_eq!(runners.len(), 1);
        assert_eq!(runners[0].name, "Brett Gardner");
        assert_eq!(runners[0].base, Base::Third);
    }

    #[test]
    fn test_caught_stealing_in_primary_clause() {
        let runners = out_runners("Brett Gardner caught stealing 2nd base, catcher Sandy Leon to shortstop Xander Bogaerts.", &yankees());
        assert_eq!(runners[0].base, Base::Second);
        let runners = out_runners("Brett Gardner was picked off and caught stealing 3rd.", &yankees());
        assert_eq!(runners[0].base, Base::Third);
    }

    #[test]
    fn test_unknown_runner_kept() {
        let runners = out_runners("Aaron Hicks grounds out. Tyler Wade out at 2nd, shortstop Xander Bogaerts to second baseman Dustin Pedroia.", &yankees());
        assert_eq!(runners.len(), 1);
        assert_eq!(runners[0].name, "Tyler Wade");
        assert!(runners[0].player.is_none());
    }

    #[test]
    fn test_multiple_runners() {
        let runners = out_runners(
            "Giancarlo Stanton grounds into a triple play. Aaron Judge out at 3rd, third baseman Rafael Devers unassisted. Brett Gardner out at 2nd, third baseman Rafael Devers to second baseman Dustin Pedroia.",
            &yankees(),
        );
        let names: Vec<_> = runners.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Aaron Judge", "Brett Gardner"]);
    }

    #[test]
    fn test_defense_suffix() {
        assert_eq!(
            defense_suffix("Brett Gardner doubled off 2nd, second baseman Dustin Pedroia to shortstop Xander Bogaerts.").unwrap(),
            " (4-6)"
        );
        assert_eq!(
            defense_suffix("Aaron Judge out at home, right fielder Mookie Betts to catcher Sandy Leon.").unwrap(),
            " (9-2)"
        );
        assert_eq!(defense_suffix("Aaron Judge to 3rd.").unwrap(), "");
        assert_eq!(defense_suffix("").unwrap(), "");
    }

    #[test]
    fn test_defense_suffix_without_fielders() {
        assert_eq!(
            defense_suffix("Brett Gardner caught stealing 2nd base, catcher Sandy Leon to shortstop Xander Bogaerts.").unwrap(),
            ""
        );
    }
}
