//! Walking the mansion one choice at a time.
//!
//! The controller only tracks where the player stands. It reads the mansion,
//! records clues in the notebook, and asks the index who each clue points
//! to. There is no history: the player can never step back.

use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

use crate::clues::ClueSet;
use crate::mansion::{Mansion, RoomId};
use crate::suspects::SuspectIndex;

/// A navigation choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Left,
    Right,
    Exit,
}

impl Choice {
    /// The key shown to the player for this choice.
    pub fn key(&self) -> char {
        match self {
            Choice::Left => 'e',
            Choice::Right => 'd',
            Choice::Exit => 's',
        }
    }
}

/// Input that is not a navigation choice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Not a valid choice: '{0}'")]
pub struct InvalidChoice(pub String);

impl FromStr for Choice {
    type Err = InvalidChoice;

    /// Only the first non-blank character counts: `e`/`l` go left,
    /// `d`/`r` go right, `s`/`q`/`x` leave the mansion.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let first = line.trim_start().chars().next().map(|c| c.to_ascii_lowercase());
        match first {
            Some('e') | Some('l') => Ok(Choice::Left),
            Some('d') | Some('r') => Ok(Choice::Right),
            Some('s') | Some('q') | Some('x') => Ok(Choice::Exit),
            _ => Err(InvalidChoice(line.trim().to_string())),
        }
    }
}

/// Where the walk stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorationState {
    /// Standing at the entrance, not yet entered.
    AtDoor(RoomId),
    /// In a room with at least one way forward.
    InRoom(RoomId),
    /// Entered a room with no way forward; the walk is over.
    DeadEnd(RoomId),
    /// The player chose to leave.
    Exited,
}

impl ExplorationState {
    pub fn is_over(&self) -> bool {
        matches!(self, ExplorationState::DeadEnd(_) | ExplorationState::Exited)
    }
}

/// What the player found on entering a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub room: RoomId,
    pub room_name: String,
    pub discovery: Option<Discovery>,
    /// True when the room has no way forward and the walk stops here.
    pub dead_end: bool,
}

/// A clue found in a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub clue: String,
    /// Suspect linked to the clue, if the index knows one.
    pub suspect: Option<String>,
    /// False when the clue was already in the notebook or not collected.
    pub newly_collected: bool,
}

/// Why a choice did not move the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// No room in that direction.
    NoPath,
    /// The walk already ended.
    Finished,
    /// The entrance has not been entered yet.
    NotStarted,
}

/// Result of one choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Moved(Visit),
    Exited,
    Ignored(IgnoredReason),
}

/// The exploration state machine.
///
/// Holds only room ids, so every call must be given the same [`Mansion`]
/// that was passed to [`Exploration::new`]. A different mansion panics on
/// out-of-range ids or walks the wrong rooms. [`Investigation`] keeps the
/// two paired.
///
/// [`Investigation`]: crate::Investigation
#[derive(Debug, Clone)]
pub struct Exploration {
    state: ExplorationState,
    collect_clues: bool,
    visits: usize,
}

impl Exploration {
    /// Stand at the door of `mansion`.
    pub fn new(mansion: &Mansion) -> Self {
        Self {
            state: ExplorationState::AtDoor(mansion.entrance()),
            collect_clues: true,
            visits: 0,
        }
    }

    /// Enable or disable clue collection. With collection off, rooms are
    /// visited without touching the notebook or the index.
    pub fn collecting(mut self, collect: bool) -> Self {
        self.collect_clues = collect;
        self
    }

    pub fn state(&self) -> ExplorationState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Number of rooms entered so far.
    pub fn visits(&self) -> usize {
        self.visits
    }

    /// The room the player stands in, if inside.
    pub fn current_room(&self) -> Option<RoomId> {
        match self.state {
            ExplorationState::InRoom(id) | ExplorationState::DeadEnd(id) => Some(id),
            ExplorationState::AtDoor(_) | ExplorationState::Exited => None,
        }
    }

    /// Step through the front door.
    ///
    /// Returns `None` if the walk has already begun.
    pub fn enter(
        &mut self,
        mansion: &Mansion,
        clues: &mut ClueSet,
        index: &SuspectIndex,
    ) -> Option<Visit> {
        match self.state {
            ExplorationState::AtDoor(entrance) => Some(self.visit(entrance, mansion, clues, index)),
            _ => None,
        }
    }

    /// Apply one navigation choice.
    pub fn choose(
        &mut self,
        choice: Choice,
        mansion: &Mansion,
        clues: &mut ClueSet,
        index: &SuspectIndex,
    ) -> Step {
        let current = match self.state {
            ExplorationState::InRoom(id) => id,
            ExplorationState::AtDoor(_) => return Step::Ignored(IgnoredReason::NotStarted),
            ExplorationState::DeadEnd(_) | ExplorationState::Exited => {
                return Step::Ignored(IgnoredReason::Finished)
            }
        };

        let room = &mansion[current];
        let target = match choice {
            Choice::Exit => {
                debug!(room = room.name(), "player left the mansion");
                self.state = ExplorationState::Exited;
                return Step::Exited;
            }
            Choice::Left => room.left(),
            Choice::Right => room.right(),
        };

        match target {
            Some(next) => Step::Moved(self.visit(next, mansion, clues, index)),
            None => {
                warn!(room = room.name(), ?choice, "no path in that direction");
                Step::Ignored(IgnoredReason::NoPath)
            }
        }
    }

    /// Moves available from the current room, with the target room names.
    /// Exit is always listed while the walk is in progress.
    pub fn options<'m>(&self, mansion: &'m Mansion) -> Vec<(Choice, &'m str)> {
        let ExplorationState::InRoom(current) = self.state else {
            return Vec::new();
        };
        let room = &mansion[current];
        let mut options = Vec::with_capacity(3);
        if let Some(left) = room.left() {
            options.push((Choice::Left, mansion[left].name()));
        }
        if let Some(right) = room.right() {
            options.push((Choice::Right, mansion[right].name()));
        }
        options.push((Choice::Exit, "exit"));
        options
    }

    fn visit(
        &mut self,
        id: RoomId,
        mansion: &Mansion,
        clues: &mut ClueSet,
        index: &SuspectIndex,
    ) -> Visit {
        let room = &mansion[id];
        self.visits += 1;
        self.state = if room.is_dead_end() {
            ExplorationState::DeadEnd(id)
        } else {
            ExplorationState::InRoom(id)
        };

        let discovery = room.clue().map(|clue| {
            if self.collect_clues {
                let newly_collected = clues.insert(clue);
                Discovery {
                    clue: clue.to_string(),
                    suspect: index.lookup(clue).map(str::to_string),
                    newly_collected,
                }
            } else {
                Discovery {
                    clue: clue.to_string(),
                    suspect: None,
                    newly_collected: false,
                }
            }
        });

        debug!(room = room.name(), clue = ?room.clue(), dead_end = room.is_dead_end(), "entered room");
        Visit {
            room: id,
            room_name: room.name().to_string(),
            discovery,
            dead_end: room.is_dead_end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::CaseFile;

    struct Fixture {
        mansion: Mansion,
        clues: ClueSet,
        index: SuspectIndex,
    }

    fn fixture() -> Fixture {
        Fixture {
            mansion: Mansion::from_case(&CaseFile::standard()).unwrap(),
            clues: ClueSet::new(),
            index: SuspectIndex::standard(),
        }
    }

    #[test]
    fn test_parse_choices() {
        assert_eq!("e".parse::<Choice>(), Ok(Choice::Left));
        assert_eq!("  Esquerda".parse::<Choice>(), Ok(Choice::Left));
        assert_eq!("left".parse::<Choice>(), Ok(Choice::Left));
        assert_eq!("D".parse::<Choice>(), Ok(Choice::Right));
        assert_eq!("right".parse::<Choice>(), Ok(Choice::Right));
        assert_eq!("s".parse::<Choice>(), Ok(Choice::Exit));
        assert_eq!("quit".parse::<Choice>(), Ok(Choice::Exit));
        assert_eq!("z".parse::<Choice>(), Err(InvalidChoice("z".to_string())));
        assert!("".parse::<Choice>().is_err());
    }

    #[test]
    fn test_keys_parse_back() {
        for choice in [Choice::Left, Choice::Right, Choice::Exit] {
            assert_eq!(choice.key().to_string().parse::<Choice>(), Ok(choice));
        }
    }

    #[test]
    #[should_panic]
    fn test_foreign_mansion_panics() {
        let mut f = fixture();
        let mut walk = Exploration::new(&f.mansion);
        walk.enter(&f.mansion, &mut f.clues, &f.index);
        walk.choose(Choice::Right, &f.mansion, &mut f.clues, &f.index);

        let tiny = CaseFile {
            title: "Tiny".to_string(),
            entrance: "Hall".to_string(),
            rooms: vec![crate::case::RoomSpec::new("Hall")],
            associations: Vec::new(),
        };
        let tiny = Mansion::from_case(&tiny).unwrap();
        walk.options(&tiny);
    }

    #[test]
    fn test_enter_collects_entrance_clue() {
        let mut f = fixture();
        let mut walk = Exploration::new(&f.mansion);

        let visit = walk.enter(&f.mansion, &mut f.clues, &f.index).unwrap();
        assert_eq!(visit.room_name, "Hall de Entrada");
        let discovery = visit.discovery.unwrap();
        assert_eq!(discovery.clue, "pegadas_no_chao");
        assert_eq!(discovery.suspect.as_deref(), Some("Sr. Silva"));
        assert!(discovery.newly_collected);
        assert_eq!(f.clues.in_order(), vec!["pegadas_no_chao"]);

        // A second enter does nothing
        assert!(walk.enter(&f.mansion, &mut f.clues, &f.index).is_none());
        assert_eq!(walk.visits(), 1);
    }

    #[test]
    fn test_choice_before_entering_is_ignored() {
        let mut f = fixture();
        let mut walk = Exploration::new(&f.mansion);
        let step = walk.choose(Choice::Left, &f.mansion, &mut f.clues, &f.index);
        assert_eq!(step, Step::Ignored(IgnoredReason::NotStarted));
    }

    #[test]
    fn test_walk_to_dead_end() {
        let mut f = fixture();
        let mut walk = Exploration::new(&f.mansion);
        walk.enter(&f.mansion, &mut f.clues, &f.index);

        let step = walk.choose(Choice::Right, &f.mansion, &mut f.clues, &f.index);
        assert!(matches!(step, Step::Moved(ref v) if v.room_name == "Cozinha" && !v.dead_end));

        let step = walk.choose(Choice::Left, &f.mansion, &mut f.clues, &f.index);
        let Step::Moved(visit) = step else {
            panic!("expected to move into the basement");
        };
        assert_eq!(visit.room_name, "Porao");
        assert!(visit.dead_end);
        assert!(walk.is_over());
        assert!(matches!(walk.state(), ExplorationState::DeadEnd(_)));

        assert_eq!(
            f.clues.in_order(),
            vec!["cofre_trancado_com_simbolos", "faca_limpa_na_mesa", "pegadas_no_chao"]
        );

        let after = walk.choose(Choice::Left, &f.mansion, &mut f.clues, &f.index);
        assert_eq!(after, Step::Ignored(IgnoredReason::Finished));
        assert!(walk.options(&f.mansion).is_empty());
    }

    #[test]
    fn test_exit_ends_walk() {
        let mut f = fixture();
        let mut walk = Exploration::new(&f.mansion);
        walk.enter(&f.mansion, &mut f.clues, &f.index);

        assert_eq!(walk.choose(Choice::Exit, &f.mansion, &mut f.clues, &f.index), Step::Exited);
        assert_eq!(walk.state(), ExplorationState::Exited);
        assert_eq!(walk.current_room(), None);
        assert_eq!(
            walk.choose(Choice::Right, &f.mansion, &mut f.clues, &f.index),
            Step::Ignored(IgnoredReason::Finished)
        );
    }

    #[test]
    fn test_options_list_targets() {
        let mut f = fixture();
        let mut walk = Exploration::new(&f.mansion);
        walk.enter(&f.mansion, &mut f.clues, &f.index);

        assert_eq!(
            walk.options(&f.mansion),
            vec![
                (Choice::Left, "Sala de Estar"),
                (Choice::Right, "Cozinha"),
                (Choice::Exit, "exit"),
            ]
        );
    }

    #[test]
    fn test_missing_path_keeps_state() {
        let case = CaseFile {
            title: "Corridor".to_string(),
            entrance: "Hall".to_string(),
            rooms: vec![
                crate::case::RoomSpec::new("Hall").with_left("Study"),
                crate::case::RoomSpec::new("Study"),
            ],
            associations: Vec::new(),
        };
        let mansion = Mansion::from_case(&case).unwrap();
        let (mut clues, index) = (ClueSet::new(), SuspectIndex::new());
        let mut walk = Exploration::new(&mansion);
        walk.enter(&mansion, &mut clues, &index);

        let before = walk.state();
        let step = walk.choose(Choice::Right, &mansion, &mut clues, &index);
        assert_eq!(step, Step::Ignored(IgnoredReason::NoPath));
        assert_eq!(walk.state(), before);
        assert_eq!(walk.visits(), 1);
    }

    #[test]
    fn test_collection_disabled() {
        let mut f = fixture();
        let mut walk = Exploration::new(&f.mansion).collecting(false);
        let visit = walk.enter(&f.mansion, &mut f.clues, &f.index).unwrap();

        let discovery = visit.discovery.unwrap();
        assert!(!discovery.newly_collected);
        assert_eq!(discovery.suspect, None);
        assert!(f.clues.is_empty());
    }
}
