use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::data::filter::FilterCriteria;
use crate::data::model::{join_days, CourseField, Day};
use crate::session::{Choice, Prompt};

const APPLY_LABEL: &str = "None";

// ---------------------------------------------------------------------------
// TerminalPrompt – numbered menus over a line-based reader/writer
// ---------------------------------------------------------------------------

/// Line-oriented prompt. Generic over its streams so it can be driven by
/// stdin/stdout or by in-memory buffers.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Yes/no question. Anything but `y`/`yes` (or end of input) is no.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{question} [y/N] ")?;
        self.output.flush()?;
        Ok(matches!(
            self.read_line()?.map(|l| l.to_ascii_lowercase()).as_deref(),
            Some("y" | "yes")
        ))
    }

    /// Next trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("reading from terminal")?;
        if n == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim().to_string()))
        }
    }

    fn show_menu(&mut self, current: &FilterCriteria) -> Result<()> {
        writeln!(self.output, "\nWhat would you like to filter by?")?;
        for (i, field) in CourseField::ALL.iter().enumerate() {
            match current.get(field.name()) {
                Some(value) => writeln!(self.output, "  {}) {} ({value})", i + 1, field.label())?,
                None => writeln!(self.output, "  {}) {}", i + 1, field.label())?,
            }
        }
        writeln!(self.output, "  {}) {APPLY_LABEL}", CourseField::ALL.len() + 1)?;
        write!(self.output, "> ")?;
        self.output.flush()?;
        Ok(())
    }

    /// Menu entry picked by number, label or field name; `Some(None)` means
    /// apply.
    fn parse_selection(answer: &str) -> Option<Option<CourseField>> {
        let apply_no = CourseField::ALL.len() + 1;
        if let Ok(n) = answer.parse::<usize>() {
            return match n {
                n if n == apply_no => Some(None),
                n if (1..apply_no).contains(&n) => Some(Some(CourseField::ALL[n - 1])),
                _ => None,
            };
        }
        if answer.eq_ignore_ascii_case(APPLY_LABEL) {
            return Some(None);
        }
        CourseField::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(answer))
            .or_else(|| CourseField::from_name(answer))
            .map(Some)
    }

    fn ask_days(&mut self) -> Result<Option<String>> {
        write!(
            self.output,
            "What days would you like to filter by? (any of M T W R F) "
        )?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(None);
        };
        let days: Vec<Day> = line.chars().filter_map(Day::from_letter).collect();
        Ok(Some(join_days(&days)))
    }

    fn ask_value(&mut self) -> Result<Option<String>> {
        write!(self.output, "What is the value of the filter? ")?;
        self.output.flush()?;
        self.read_line()
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn next_choice(&mut self, current: &FilterCriteria) -> Result<Choice> {
        loop {
            self.show_menu(current)?;
            let Some(answer) = self.read_line()? else {
                return Ok(Choice::Apply);
            };

            let field = match Self::parse_selection(&answer) {
                Some(Some(field)) => field,
                Some(None) => return Ok(Choice::Apply),
                None => {
                    writeln!(self.output, "Unknown choice: {answer}")?;
                    continue;
                }
            };

            let value = if field == CourseField::ShortDays {
                self.ask_days()?
            } else {
                self.ask_value()?
            };

            return Ok(match value {
                Some(value) => Choice::Set { field, value },
                None => Choice::Apply,
            });
        }
    }
}
