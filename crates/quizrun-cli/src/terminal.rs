//! Line-oriented terminal front end for a quiz session.

use std::io::{BufRead, Write};

use anyhow::Result;
use rand::Rng;

use quizrun_core::model::{QuestionKind, Selection};
use quizrun_core::report::{format_points, SummaryReport};
use quizrun_core::view::{Forward, OptionMark, QuestionView};
use quizrun_core::{Session, SessionError};

const HELP: &str = "\
Commands:
  <numbers>      select option(s), e.g. `2` or `1 3` (toggles on multi-choice)
  a <text>       answer a free-text question (`answer <text>` also works)
  c, check       check the current answer
  n, next        go to the next question
  p, prev        go to the previous question
  s, submit      finish and show the summary
  r, restart     start over with a fresh order
  h, help        show this help
  q, quit        leave without a summary";

/// How an interactive session ended.
#[derive(Debug)]
pub enum Outcome {
    Submitted(SummaryReport),
    Quit,
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 1-based option numbers converted to 0-based indices.
    Choose(Vec<usize>),
    Answer(String),
    Check,
    Next,
    Previous,
    Submit,
    Restart,
    Help,
    Quit,
    Empty,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "a" | "answer" => Command::Answer(rest.to_string()),
        "c" | "check" => Command::Check,
        "n" | "next" => Command::Next,
        "p" | "prev" | "previous" => Command::Previous,
        "s" | "submit" => Command::Submit,
        "r" | "restart" => Command::Restart,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => Command::Choose(parse_numbers(line)?),
    };
    Ok(command)
}

fn parse_numbers(line: &str) -> Result<Vec<usize>, String> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(format!("unknown command `{s}` (type `h` for help)")),
        })
        .collect()
}

/// Drive `session` from `input` until the user submits or quits.
/// End of input counts as quitting.
pub fn run_interactive<R, I, O>(
    session: &mut Session,
    rng: &mut R,
    mut input: I,
    out: &mut O,
) -> Result<Outcome>
where
    R: Rng + ?Sized,
    I: BufRead,
    O: Write,
{
    writeln!(out, "{}", session.title().unwrap_or("Quiz"))?;
    writeln!(out, "Type `h` for help.\n")?;
    render(&session.view(), out)?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => return Ok(Outcome::Quit),
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                writeln!(out, "! input is not valid UTF-8")?;
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "! {message}")?;
                continue;
            }
        };

        let result = match command {
            Command::Empty => continue,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Quit => return Ok(Outcome::Quit),
            Command::Submit => return Ok(Outcome::Submitted(session.finalize())),
            Command::Restart => {
                session.restart(rng);
                writeln!(out, "Restarted.")?;
                Ok(())
            }
            Command::Choose(indices) => choose(session, &line, indices),
            Command::Answer(text) => session.select_answer(Selection::Text(text)),
            Command::Check => session.check().map(|_| ()),
            Command::Next => session.next().map(|_| ()),
            Command::Previous => session.previous().map(|_| ()),
        };

        if let Err(e) = result {
            writeln!(out, "! {e}")?;
            continue;
        }
        render(&session.view(), out)?;
    }
}

/// Numbers typed on a free-text question are the answer itself.
///
/// Every index is range-checked before the first one is applied, so a line
/// with a bad number changes nothing.
fn choose(
    session: &mut Session,
    line: &str,
    indices: Vec<usize>,
) -> Result<(), SessionError> {
    let kind = &session.current_question().kind;
    if matches!(kind, QuestionKind::FreeText { .. }) {
        return session.select_answer(Selection::Text(line.trim().to_string()));
    }
    let len = kind.options().len();
    if let Some(&index) = indices.iter().find(|&&i| i >= len) {
        return Err(SessionError::OptionOutOfRange { index, len });
    }
    for index in indices {
        session.select_answer(Selection::Choice(index))?;
    }
    Ok(())
}

pub fn render<O: Write>(view: &QuestionView, out: &mut O) -> Result<()> {
    writeln!(out, "{}", view.section)?;
    writeln!(
        out,
        "{} ({} pts) | Score: {}",
        view.progress_label(),
        format_points(view.points),
        format_points(view.score)
    )?;
    writeln!(out, "{}", view.prompt)?;

    for (i, option) in view.options.iter().enumerate() {
        let selected = if option.selected { "x" } else { " " };
        let mark = match option.mark {
            Some(OptionMark::Correct) => "  [correct]",
            Some(OptionMark::Incorrect) => "  [wrong]",
            None => "",
        };
        writeln!(out, "  [{selected}] {}. {}{mark}", i + 1, option.text)?;
    }

    if let Some(text) = &view.text_answer {
        let shown = if text.is_empty() { "(empty)" } else { text };
        writeln!(out, "  Your answer: {shown}")?;
    }
    if let Some(hint) = &view.hint {
        writeln!(out, "  Hint: {hint}")?;
    }
    if let Some(note) = view.note {
        writeln!(out, "  Note: {note}")?;
    }
    if let Some(feedback) = &view.feedback {
        writeln!(out, "{}", feedback.message)?;
    }

    let mut controls = Vec::new();
    if view.navigation.can_previous {
        controls.push("p = previous");
    }
    if view.navigation.can_check {
        controls.push("c = check");
    }
    match view.navigation.forward {
        Forward::Hidden => {}
        Forward::Next => controls.push("n = next"),
        Forward::Submit => controls.push("s = submit"),
    }
    writeln!(out, "[{}]\n", controls.join(", "))?;
    Ok(())
}
