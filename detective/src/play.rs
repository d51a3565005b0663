//! The console game loop.
//!
//! Reads one choice per line and renders what the investigation returns.
//! Input and output are generic so the loop can be driven from a script.

use detective_core::exploration::IgnoredReason;
use detective_core::{Choice, Investigation, Judgment, Step, Verdict, Visit};
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Play a full investigation: explore, review clues, accuse, tear down.
pub fn run<R: BufRead, W: Write>(
    mut game: Investigation,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "=== {} ===", game.title().to_uppercase())?;
    writeln!(
        out,
        "In each room choose 'e' to go left, 'd' to go right or 's' to leave."
    )?;

    if let Some(visit) = game.start() {
        render_visit(&game, &visit, out)?;
    }

    while !game.is_over() {
        render_options(&game, out)?;
        let Some(line) = read_line(input)? else {
            // End of input counts as leaving the mansion
            game.choose(Choice::Exit);
            break;
        };

        let choice = match line.parse::<Choice>() {
            Ok(choice) => choice,
            Err(e) => {
                warn!(error = %e, "ignored input");
                writeln!(out, "Invalid option or missing path. Try again.")?;
                continue;
            }
        };

        match game.choose(choice) {
            Step::Moved(visit) => render_visit(&game, &visit, out)?,
            Step::Exited => {
                writeln!(out)?;
                writeln!(out, "Exploration ended.")?;
            }
            Step::Ignored(IgnoredReason::NoPath) => {
                writeln!(out, "Invalid option or missing path. Try again.")?;
            }
            Step::Ignored(_) => break,
        }
    }

    if game.level().collects_clues() {
        render_notebook(&game, out)?;
    }

    if game.level().has_accusation() && !game.clues().is_empty() {
        write!(out, "\nName the suspect you accuse: ")?;
        out.flush()?;
        let accused = read_line(input)?.unwrap_or_default();
        if let Some(judgment) = game.accuse(&accused) {
            render_judgment(&judgment, out)?;
        }
    } else if game.level().has_accusation() {
        writeln!(
            out,
            "\nNo clues were collected. Nobody can be accused on evidence."
        )?;
    }

    game.finish();
    writeln!(out, "\nThe end. Thanks for playing, detective!")?;
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn render_visit<W: Write>(game: &Investigation, visit: &Visit, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "You are in: {}", visit.room_name)?;

    if game.level().collects_clues() {
        match &visit.discovery {
            Some(discovery) => {
                writeln!(out, "You found a clue: \"{}\"", discovery.clue)?;
                if game.level().reveals_suspects() {
                    match &discovery.suspect {
                        Some(suspect) => {
                            writeln!(out, "  (this clue points to the suspect: {suspect})")?
                        }
                        None => writeln!(out, "  (no suspect is linked to this clue yet)")?,
                    }
                }
            }
            None => writeln!(out, "There is no clue in this room.")?,
        }
    }

    if visit.dead_end {
        writeln!(out, "There are no more paths to follow. Exploration is over!")?;
    }
    Ok(())
}

fn render_options<W: Write>(game: &Investigation, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Choose your next path:")?;
    for (choice, target) in game.options() {
        let key = choice.key();
        match choice {
            Choice::Left => writeln!(out, "  ({key}) Left  -> {target}")?,
            Choice::Right => writeln!(out, "  ({key}) Right -> {target}")?,
            Choice::Exit => writeln!(out, "  ({key}) Leave the mansion")?,
        }
    }
    write!(out, "Option: ")?;
    out.flush()
}

fn render_notebook<W: Write>(game: &Investigation, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "===== COLLECTED CLUES =====")?;
    let clues = game.collected_clues();
    if clues.is_empty() {
        writeln!(out, "No clues were collected.")?;
    }
    for clue in clues {
        writeln!(out, "- {clue}")?;
    }
    Ok(())
}

fn render_judgment<W: Write>(judgment: &Judgment, out: &mut W) -> io::Result<()> {
    match judgment {
        Judgment::NoEvidence => {
            writeln!(out, "\nNo clues were collected. Nobody can be accused on evidence.")
        }
        Judgment::NoAccusation => writeln!(out, "\nNo name given. Accusation withdrawn."),
        Judgment::Decided {
            accused,
            count,
            verdict,
        } => {
            writeln!(out, "\nClues pointing to {accused}: {count}")?;
            match verdict {
                Verdict::Supported => writeln!(
                    out,
                    "\nResult: the evidence is sufficient! {accused} is found guilty."
                ),
                Verdict::Unsupported => writeln!(
                    out,
                    "\nResult: not enough evidence to sustain the accusation against {accused}."
                ),
            }
        }
    }
}
