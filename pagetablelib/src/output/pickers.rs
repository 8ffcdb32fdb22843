//! Start/end date pickers for the search form.
//!
//! Both pickers default to today. The host page calls [`init_date_range`]
//! once while setting itself up; nothing happens implicitly.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::format::escape_attr;

/// Identifier of the range's first picker
pub const START_DATE_ID: &str = "start_date";
/// Identifier of the range's last picker
pub const END_DATE_ID: &str = "end_date";

/// A form field that holds a calendar date.
pub trait DateField {
    /// Element identifier
    fn id(&self) -> &str;
    /// Current value, if any
    fn date(&self) -> Option<NaiveDate>;
    /// Replace the current value
    fn set_date(&mut self, date: NaiveDate);
}

/// An `<input type='date'>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateInput {
    id: String,
    label: String,
    value: Option<NaiveDate>,
}

impl DateInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: None,
        }
    }

    /// The `start_date` picker
    pub fn start() -> Self {
        Self::new(START_DATE_ID, "Start date")
    }

    /// The `end_date` picker
    pub fn end() -> Self {
        Self::new(END_DATE_ID, "End date")
    }

    /// Label and input markup. The value is written as `YYYY-MM-DD`.
    pub fn to_html(&self) -> String {
        let id = escape_attr(&self.id);
        let value = self
            .value
            .map(|d| format!(" value='{}'", d.format("%Y-%m-%d")))
            .unwrap_or_default();
        format!(
            "<label for='{id}'>{label}</label><input type='date' id='{id}' name='{id}'{value}>",
            id = id,
            label = escape_attr(&self.label),
            value = value,
        )
    }
}

impl DateField for DateInput {
    fn id(&self) -> &str {
        &self.id
    }

    fn date(&self) -> Option<NaiveDate> {
        self.value
    }

    fn set_date(&mut self, date: NaiveDate) {
        self.value = Some(date);
    }
}

/// Default both ends of a date range to `today`.
pub fn init_date_range<S, E>(start: &mut S, end: &mut E, today: NaiveDate)
where
    S: DateField + ?Sized,
    E: DateField + ?Sized,
{
    start.set_date(today);
    end.set_date(today);
    debug!(start = start.id(), end = end.id(), %today, "initialized date range");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    #[test]
    fn test_init_sets_both_fields() {
        let mut start = DateInput::start();
        let mut end = DateInput::end();
        assert_eq!(start.date(), None);

        init_date_range(&mut start, &mut end, day());
        assert_eq!(start.date(), Some(day()));
        assert_eq!(end.date(), Some(day()));
    }

    #[test]
    fn test_html() {
        let mut start = DateInput::start();
        assert_eq!(
            start.to_html(),
            "<label for='start_date'>Start date</label>\
             <input type='date' id='start_date' name='start_date'>"
        );
        start.set_date(day());
        assert!(start.to_html().ends_with("value='2024-02-29'>"));
    }

    struct Recorder {
        dates: Vec<NaiveDate>,
    }

    impl DateField for Recorder {
        fn id(&self) -> &str {
            "recorder"
        }

        fn date(&self) -> Option<NaiveDate> {
            self.dates.last().copied()
        }

        fn set_date(&mut self, date: NaiveDate) {
            self.dates.push(date);
        }
    }

    #[test]
    fn test_any_field_type() {
        let mut start = Recorder { dates: vec![] };
        let mut end: Box<dyn DateField> = Box::new(DateInput::end());
        init_date_range(&mut start, end.as_mut(), day());
        assert_eq!(start.dates, vec![day()]);
        assert_eq!(end.date(), Some(day()));
    }
}
