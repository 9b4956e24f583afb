use std::io::Write;

use crate::data::model::CourseRecord;

/// Print matching records, one block each, then a count.
pub fn write_results<W: Write>(out: &mut W, results: &[&CourseRecord]) -> std::io::Result<()> {
    for rec in results {
        writeln!(
            out,
            "\n{} {}-{} | {} ({})",
            rec.subject, rec.course, rec.section, rec.title, rec.crn
        )?;
        writeln!(out, "\tPrimary Instructor: {}", rec.primary_instructor)?;
        writeln!(out, "\tLocation: {}", rec.location)?;
        writeln!(out, "\tRoom: {}", rec.room)?;
        writeln!(out, "\tTime: {} - {}", rec.start_time, rec.end_time)?;
        writeln!(out, "\tDays: {}", rec.short_days)?;
    }
    match results.len() {
        1 => writeln!(out, "\n1 class found"),
        n => writeln!(out, "\n{n} classes found"),
    }
}
