use chrono::NaiveDate;

/// Completed years between `date_of_birth` and `on`.
///
/// Returns `None` when the birth date falls after `on`.
///
/// ```
/// use chrono::NaiveDate;
/// use deed_core::calculations::age_in_years;
///
/// let dob = NaiveDate::from_ymd_opt(2015, 6, 20).unwrap();
/// let on = NaiveDate::from_ymd_opt(2025, 6, 19).unwrap();
/// assert_eq!(age_in_years(dob, on), Some(9));
/// ```
pub fn age_in_years(
    date_of_birth: NaiveDate,
    on: NaiveDate,
) -> Option<u32> {
    on.years_since(date_of_birth)
}
