//! Investigation - one playthrough of a case.
//!
//! This module wraps the mansion, the clue notebook, the suspect index and
//! the exploration controller into a single session object. Front-ends
//! drive it with [`Investigation::choose`] and finish with
//! [`Investigation::accuse`].

use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::accusation::{judge, Judgment};
use crate::case::{CaseError, CaseFile};
use crate::clues::ClueSet;
use crate::exploration::{Choice, Exploration, Step, Visit};
use crate::mansion::{Mansion, Room};
use crate::suspects::SuspectIndex;

/// How much of the game is in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    /// Explore the rooms; nothing is collected.
    Novice,
    /// Collect clues and review them at the end.
    Adventurer,
    /// Collect clues, see who they point to, and accuse a suspect.
    #[default]
    Master,
}

impl Level {
    pub fn collects_clues(&self) -> bool {
        !matches!(self, Level::Novice)
    }

    /// Whether suspect hints are shown while exploring.
    pub fn reveals_suspects(&self) -> bool {
        matches!(self, Level::Master)
    }

    pub fn has_accusation(&self) -> bool {
        matches!(self, Level::Master)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Novice => write!(f, "novice"),
            Level::Adventurer => write!(f, "adventurer"),
            Level::Master => write!(f, "master"),
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "novice" | "novato" => Ok(Level::Novice),
            "adventurer" | "aventureiro" => Ok(Level::Adventurer),
            "master" | "mestre" => Ok(Level::Master),
            other => Err(format!("Unknown level: {other}")),
        }
    }
}

/// Configuration for a new investigation.
#[derive(Debug, Clone)]
pub struct InvestigationConfig {
    /// Level of play.
    pub level: Level,

    /// The case to investigate.
    pub case: CaseFile,
}

impl InvestigationConfig {
    /// The standard mansion at Master level.
    pub fn standard() -> Self {
        Self {
            level: Level::default(),
            case: CaseFile::standard(),
        }
    }

    /// Set the level of play.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Investigate a different case.
    pub fn with_case(mut self, case: CaseFile) -> Self {
        self.case = case;
        self
    }
}

impl Default for InvestigationConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Counts reported by [`Investigation::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Teardown {
    pub clues_released: usize,
    pub associations_released: usize,
}

/// A single playthrough.
pub struct Investigation {
    title: String,
    level: Level,
    mansion: Mansion,
    clues: ClueSet,
    suspects: SuspectIndex,
    exploration: Exploration,
}

impl Investigation {
    /// Build the mansion and seed the suspect index from the config's case.
    pub fn new(config: InvestigationConfig) -> Result<Self, CaseError> {
        let InvestigationConfig { level, case } = config;
        let mansion = Mansion::from_case(&case)?;

        let mut suspects = SuspectIndex::new();
        for association in &case.associations {
            suspects.associate(&association.clue, &association.suspect);
        }

        let exploration = Exploration::new(&mansion).collecting(level.collects_clues());
        info!(
            title = %case.title,
            %level,
            rooms = mansion.len(),
            associations = suspects.len(),
            "investigation opened"
        );

        Ok(Self {
            title: case.title,
            level,
            mansion,
            clues: ClueSet::new(),
            suspects,
            exploration,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn mansion(&self) -> &Mansion {
        &self.mansion
    }

    /// Enter the mansion. Returns `None` if already inside.
    pub fn start(&mut self) -> Option<Visit> {
        self.exploration
            .enter(&self.mansion, &mut self.clues, &self.suspects)
    }

    /// Apply one navigation choice.
    pub fn choose(&mut self, choice: Choice) -> Step {
        self.exploration
            .choose(choice, &self.mansion, &mut self.clues, &self.suspects)
    }

    /// Whether exploration has ended (dead end or exit).
    pub fn is_over(&self) -> bool {
        self.exploration.is_over()
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.exploration
            .current_room()
            .and_then(|id| self.mansion.get(id))
    }

    pub fn options(&self) -> Vec<(Choice, &str)> {
        self.exploration.options(&self.mansion)
    }

    pub fn rooms_visited(&self) -> usize {
        self.exploration.visits()
    }

    pub fn clues(&self) -> &ClueSet {
        &self.clues
    }

    /// Collected clues in alphabetical order.
    pub fn collected_clues(&self) -> Vec<&str> {
        self.clues.in_order()
    }

    pub fn suspects(&self) -> &SuspectIndex {
        &self.suspects
    }

    /// Judge an accusation against the collected clues.
    ///
    /// Returns `None` when the level has no accusation phase.
    pub fn accuse(&self, accused: &str) -> Option<Judgment> {
        if !self.level.has_accusation() {
            return None;
        }
        Some(judge(&self.clues, &self.suspects, accused))
    }

    /// Release the notebook and the index, reporting what was freed.
    pub fn finish(mut self) -> Teardown {
        let teardown = Teardown {
            clues_released: self.clues.clear(),
            associations_released: self.suspects.clear(),
        };
        info!(
            clues = teardown.clues_released,
            associations = teardown.associations_released,
            "investigation closed"
        );
        teardown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accusation::Verdict;

    #[test]
    fn test_level_parsing() {
        assert_eq!("novice".parse::<Level>(), Ok(Level::Novice));
        assert_eq!("Aventureiro".parse::<Level>(), Ok(Level::Adventurer));
        assert_eq!(" MASTER ".parse::<Level>(), Ok(Level::Master));
        assert!("expert".parse::<Level>().is_err());
        assert_eq!(Level::default(), Level::Master);
    }

    #[test]
    fn test_master_game_judges_accusation() {
        let mut game = Investigation::new(InvestigationConfig::standard()).unwrap();
        game.start();
        game.choose(Choice::Left);
        game.choose(Choice::Left);
        assert!(game.is_over());

        assert_eq!(
            game.collected_clues(),
            vec!["livro_aberto_sobre_enigmas", "mapa_rasgado_com_x", "pegadas_no_chao"]
        );

        let judgment = game.accuse("Dr. Costa").unwrap();
        assert_eq!(judgment.count(), Some(1));
        assert_eq!(judgment.verdict(), Some(Verdict::Unsupported));
    }

    #[test]
    fn test_novice_collects_nothing() {
        let config = InvestigationConfig::standard().with_level(Level::Novice);
        let mut game = Investigation::new(config).unwrap();
        game.start();
        game.choose(Choice::Right);
        assert!(game.collected_clues().is_empty());
        assert_eq!(game.rooms_visited(), 2);
        assert_eq!(game.accuse("Sr. Silva"), None);
    }

    #[test]
    fn test_adventurer_has_no_accusation() {
        let config = InvestigationConfig::standard().with_level(Level::Adventurer);
        let mut game = Investigation::new(config).unwrap();
        game.start();
        assert_eq!(game.collected_clues(), vec!["pegadas_no_chao"]);
        assert_eq!(game.accuse("Sr. Silva"), None);
    }

    #[test]
    fn test_finish_reports_released_counts() {
        let mut game = Investigation::new(InvestigationConfig::standard()).unwrap();
        game.start();
        game.choose(Choice::Right);
        game.choose(Choice::Exit);

        let teardown = game.finish();
        assert_eq!(
            teardown,
            Teardown {
                clues_released: 2,
                associations_released: 7,
            }
        );
    }

    #[test]
    fn test_invalid_case_is_rejected() {
        let mut case = CaseFile::standard();
        case.entrance = "Garagem".to_string();
        let result = Investigation::new(InvestigationConfig::standard().with_case(case));
        assert!(matches!(result, Err(CaseError::UnknownEntrance(_))));
    }
}
