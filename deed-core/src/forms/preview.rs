//! Plain-text rendering helpers for document previews.

use std::fmt;

use rust_decimal::Decimal;

use crate::models::PersonRecord;

pub(crate) fn heading(
    f: &mut fmt::Formatter<'_>,
    title: &str,
) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "=".repeat(title.chars().count()))
}

/// Writes `label: value`, skipping blank values.
pub(crate) fn line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: &str,
) -> fmt::Result {
    if value.trim().is_empty() {
        return Ok(());
    }
    writeln!(f, "{label:<22}{value}")
}

pub(crate) fn money(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: Option<Decimal>,
) -> fmt::Result {
    match value {
        Some(v) => writeln!(f, "{label:<22}₹{v}"),
        None => Ok(()),
    }
}

pub(crate) fn person(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    person: &PersonRecord,
) -> fmt::Result {
    if !person.has_name() {
        return Ok(());
    }
    write!(f, "{label:<22}{}", person.name.trim())?;
    if !person.relation.trim().is_empty() {
        write!(f, ", {}", person.relation.trim())?;
    }
    if !person.address.trim().is_empty() {
        write!(f, ", {}", person.address.trim())?;
    }
    if let Some(id_type) = person.id_type {
        if !person.id_number.trim().is_empty() {
            write!(f, " ({} {})", id_type.label(), person.id_number.trim())?;
        }
    }
    writeln!(f)
}

/// Writes a numbered list of the named people in `people`.
pub(crate) fn parties(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    people: &[PersonRecord],
) -> fmt::Result {
    let named: Vec<_> = people.iter().filter(|p| p.has_name()).collect();
    if named.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "{title}:")?;
    for (i, p) in named.into_iter().enumerate() {
        person(f, &format!("  {}.", i + 1), p)?;
    }
    Ok(())
}

pub(crate) fn list(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    items: &[String],
) -> fmt::Result {
    let items: Vec<_> = items.iter().filter(|s| !s.trim().is_empty()).collect();
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "{title}:")?;
    for item in items {
        writeln!(f, "  - {}", item.trim())?;
    }
    Ok(())
}
