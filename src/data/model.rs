use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CourseRecord – one scheduled course section
// ---------------------------------------------------------------------------

/// A normalized catalog entry. Every text field is trimmed; values that were
/// absent in the source are empty strings.
///
/// Serialized with camelCase keys, which double as the filter vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseRecord {
    pub index: String,
    pub crn: String,
    pub subject: String,
    pub course: String,
    pub section: String,
    pub title: String,
    pub primary_instructor: String,
    pub delivery_type: String,
    pub delivery_method: String,
    pub education_type: String,
    pub semester_length: String,
    pub dates: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub room: String,
    pub description: String,
    /// Non-empty instructor names, in source order.
    pub all_instructors: Vec<String>,
    /// Day letters drawn from `M T W R F`.
    pub short_days: String,
}

impl CourseRecord {
    /// Look up a field by its camelCase name.
    ///
    /// `allInstructors` reads as the names joined with `", "`. Unknown names
    /// return `None`.
    pub fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        let value: &str = match name {
            "index" => &self.index,
            "crn" => &self.crn,
            "subject" => &self.subject,
            "course" => &self.course,
            "section" => &self.section,
            "title" => &self.title,
            "primaryInstructor" => &self.primary_instructor,
            "deliveryType" => &self.delivery_type,
            "deliveryMethod" => &self.delivery_method,
            "educationType" => &self.education_type,
            "semesterLength" => &self.semester_length,
            "dates" => &self.dates,
            "startTime" => &self.start_time,
            "endTime" => &self.end_time,
            "location" => &self.location,
            "room" => &self.room,
            "description" => &self.description,
            "shortDays" => &self.short_days,
            "allInstructors" => return Some(Cow::Owned(self.all_instructors.join(", "))),
            _ => return None,
        };
        Some(Cow::Borrowed(value))
    }
}

// ---------------------------------------------------------------------------
// CourseField – the fields offered in the filter menu
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CourseField {
    Location,
    Room,
    Crn,
    Subject,
    Course,
    Section,
    ShortDays,
}

impl CourseField {
    /// Menu order.
    pub const ALL: [CourseField; 7] = [
        CourseField::Location,
        CourseField::Room,
        CourseField::Crn,
        CourseField::Subject,
        CourseField::Course,
        CourseField::Section,
        CourseField::ShortDays,
    ];

    /// Key used in [`CourseRecord::field`] and in filter criteria.
    pub fn name(self) -> &'static str {
        match self {
            CourseField::Location => "location",
            CourseField::Room => "room",
            CourseField::Crn => "crn",
            CourseField::Subject => "subject",
            CourseField::Course => "course",
            CourseField::Section => "section",
            CourseField::ShortDays => "shortDays",
        }
    }

    /// Human-readable label for menus.
    pub fn label(self) -> &'static str {
        match self {
            CourseField::Location => "Location",
            CourseField::Room => "Room",
            CourseField::Crn => "CRN",
            CourseField::Subject => "Subject",
            CourseField::Course => "Course",
            CourseField::Section => "Section",
            CourseField::ShortDays => "Short Days",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for CourseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Day – meeting day codes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    M,
    T,
    W,
    R,
    F,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::M, Day::T, Day::W, Day::R, Day::F];

    pub fn letter(self) -> char {
        match self {
            Day::M => 'M',
            Day::T => 'T',
            Day::W => 'W',
            Day::R => 'R',
            Day::F => 'F',
        }
    }

    /// Case-insensitive.
    pub fn from_letter(c: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.letter() == c.to_ascii_uppercase())
    }
}

/// Join selected days into one code string, in week order, without repeats.
pub fn join_days(days: &[Day]) -> String {
    Day::ALL
        .into_iter()
        .filter(|d| days.contains(d))
        .map(Day::letter)
        .collect()
}
