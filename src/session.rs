use anyhow::Result;
use log::debug;

use crate::data::filter::{set_criterion, FilterCriteria};
use crate::data::model::CourseField;

// ---------------------------------------------------------------------------
// Prompt capability
// ---------------------------------------------------------------------------

/// One answer from the user in the filter menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Stop adding filters and run the search.
    Apply,
    /// Set (or replace) the criterion for `field`.
    Set { field: CourseField, value: String },
}

/// Something that can ask the user for the next filter choice.
pub trait Prompt {
    /// `current` is shown so the user sees what is already chosen.
    fn next_choice(&mut self, current: &FilterCriteria) -> Result<Choice>;
}

// ---------------------------------------------------------------------------
// FilterSession – turn-by-turn criteria accumulation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    CollectingCriterion(FilterCriteria),
    Complete(FilterCriteria),
}

#[derive(Debug, Clone)]
pub struct FilterSession {
    state: SessionState,
}

impl Default for FilterSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSession {
    pub fn new() -> Self {
        Self::resume(FilterCriteria::new())
    }

    /// Start collecting on top of criteria from an earlier search.
    pub fn resume(criteria: FilterCriteria) -> Self {
        Self {
            state: SessionState::CollectingCriterion(criteria),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Ask once and advance. Returns `true` once the session is complete.
    pub fn step(&mut self, prompt: &mut dyn Prompt) -> Result<bool> {
        let criteria = match &mut self.state {
            SessionState::Complete(_) => return Ok(true),
            SessionState::CollectingCriterion(criteria) => criteria,
        };

        match prompt.next_choice(criteria)? {
            Choice::Set { field, value } => {
                debug!("filter {} = {value:?}", field.name());
                set_criterion(criteria, field, value);
                Ok(false)
            }
            Choice::Apply => {
                let done = std::mem::take(criteria);
                self.state = SessionState::Complete(done);
                Ok(true)
            }
        }
    }

    /// Drive the session until the user applies, then hand back the criteria.
    pub fn run(mut self, prompt: &mut dyn Prompt) -> Result<FilterCriteria> {
        while !self.step(prompt)? {}
        match self.state {
            SessionState::Complete(criteria) | SessionState::CollectingCriterion(criteria) => {
                Ok(criteria)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed list of choices and records what it was shown.
    struct Scripted {
        answers: VecDeque<Choice>,
        seen: Vec<FilterCriteria>,
    }

    impl Scripted {
        fn new(answers: Vec<Choice>) -> Self {
            Self {
                answers: answers.into(),
                seen: Vec::new(),
            }
        }
    }

    impl Prompt for Scripted {
        fn next_choice(&mut self, current: &FilterCriteria) -> Result<Choice> {
            self.seen.push(current.clone());
            Ok(self.answers.pop_front().unwrap_or(Choice::Apply))
        }
    }

    fn set(field: CourseField, value: &str) -> Choice {
        Choice::Set {
            field,
            value: value.into(),
        }
    }

    #[test]
    fn apply_right_away_gives_empty_criteria() {
        let mut prompt = Scripted::new(vec![Choice::Apply]);
        let criteria = FilterSession::new().run(&mut prompt).unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn later_value_overwrites_earlier_one() {
        let mut prompt = Scripted::new(vec![
            set(CourseField::Subject, "cs"),
            set(CourseField::ShortDays, "MWF"),
            set(CourseField::Subject, "math"),
            Choice::Apply,
        ]);
        let criteria = FilterSession::new().run(&mut prompt).unwrap();
        assert_eq!(criteria.get("subject").map(String::as_str), Some("math"));
        assert_eq!(criteria.get("shortDays").map(String::as_str), Some("MWF"));
        assert_eq!(criteria.len(), 2);
    }

    #[test]
    fn prompt_sees_accumulated_criteria() {
        let mut prompt = Scripted::new(vec![set(CourseField::Room, "120"), Choice::Apply]);
        FilterSession::new().run(&mut prompt).unwrap();
        assert!(prompt.seen[0].is_empty());
        assert_eq!(prompt.seen[1].get("room").map(String::as_str), Some("120"));
    }

    #[test]
    fn step_stops_at_complete() {
        let mut session = FilterSession::new();
        let mut prompt = Scripted::new(vec![set(CourseField::Crn, "1"), Choice::Apply]);
        assert!(!session.step(&mut prompt).unwrap());
        assert!(session.step(&mut prompt).unwrap());
        assert!(matches!(session.state(), SessionState::Complete(c) if c.len() == 1));
        assert!(session.step(&mut prompt).unwrap());
        assert_eq!(prompt.seen.len(), 2);
    }

    #[test]
    fn resume_keeps_previous_criteria() {
        let mut previous = FilterCriteria::new();
        previous.insert("location".into(), "Gallogly".into());
        let mut prompt = Scripted::new(vec![set(CourseField::Room, "120")]);
        let criteria = FilterSession::resume(previous).run(&mut prompt).unwrap();
        assert_eq!(criteria.len(), 2);
    }
}
