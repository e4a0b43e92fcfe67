//! Month/day selection and the non-destructive views it produces.

use chrono::Weekday;

use crate::calendar::{month_from_name, month_name, weekday_from_name, weekday_name};
use crate::error::{BikeshareError, Result};
use crate::record::{Dataset, TripRecord};

pub const ALL: &str = "all";

/// Either every value, or an explicit non-empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(Vec<T>),
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(values) => values.contains(value),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

/// Month numbers (1-6) selected by name.
pub type MonthSelector = Selector<u32>;
pub type DaySelector = Selector<Weekday>;

impl Selector<u32> {
    /// Parses lowercase month names; `"all"` anywhere selects every month.
    pub fn months<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        parse_selector(names, "month", month_from_name)
    }

    /// Lowercase names, or `["all"]`.
    pub fn labels(&self) -> Vec<String> {
        match self {
            Selector::All => vec![ALL.to_string()],
            Selector::Only(months) => months
                .iter()
                .filter_map(|m| month_name(*m))
                .map(str::to_lowercase)
                .collect(),
        }
    }
}

impl Selector<Weekday> {
    pub fn days<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        parse_selector(names, "day", weekday_from_name)
    }

    pub fn labels(&self) -> Vec<String> {
        match self {
            Selector::All => vec![ALL.to_string()],
            Selector::Only(days) => days.iter().map(|d| weekday_name(*d).to_lowercase()).collect(),
        }
    }
}

fn parse_selector<S, T, F>(names: &[S], field: &'static str, lookup: F) -> Result<Selector<T>>
where
    S: AsRef<str>,
    T: PartialEq,
    F: Fn(&str) -> Option<T>,
{
    if names.is_empty() {
        return Err(BikeshareError::validation(field, ""));
    }

    let mut values = Vec::new();
    for raw in names {
        let name = raw.as_ref().trim().to_lowercase();
        if name == ALL {
            return Ok(Selector::All);
        }
        let value = lookup(&name).ok_or_else(|| BikeshareError::validation(field, raw.as_ref()))?;
        if !values.contains(&value) {
            values.push(value);
        }
    }
    Ok(Selector::Only(values))
}

/// A filtered subset of a [`Dataset`], kept as indices in dataset order.
#[derive(Debug, Clone)]
pub struct View<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> View<'a> {
    /// Every record of `dataset`.
    pub fn all(dataset: &'a Dataset) -> Self {
        View {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TripRecord> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Keeps records satisfying `predicate`; order is preserved.
    pub fn retain<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&TripRecord) -> bool,
    {
        let records = self.dataset.records();
        self.indices.retain(|&i| predicate(&records[i]));
        self
    }

    pub fn retain_months(self, months: &MonthSelector) -> Self {
        if months.is_all() {
            return self;
        }
        self.retain(|r| months.matches(&r.month()))
    }

    pub fn retain_days(self, days: &DaySelector) -> Self {
        if days.is_all() {
            return self;
        }
        self.retain(|r| days.matches(&r.day_of_week()))
    }

    /// Up to `limit` records starting at `offset`, verbatim.
    pub fn window(&self, offset: usize, limit: usize) -> Vec<&'a TripRecord> {
        self.iter().skip(offset).take(limit).collect()
    }

    /// Consecutive windows of `page_size` records.
    pub fn pages(&self, page_size: usize) -> impl Iterator<Item = Vec<&'a TripRecord>> + '_ {
        let page_size = page_size.max(1);
        (0..self.len())
            .step_by(page_size)
            .map(move |offset| self.window(offset, page_size))
    }
}

/// Narrows `dataset` to records in `months` and on `days`.
#[tracing::instrument(skip_all, fields(records = dataset.len()))]
pub fn filter<'a>(dataset: &'a Dataset, months: &MonthSelector, days: &DaySelector) -> View<'a> {
    let view = View::all(dataset).retain_months(months).retain_days(days);
    tracing::debug!(kept = view.len(), "Filter applied");
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_timestamp;
    use crate::config::City;
    use crate::record::Capabilities;

    fn dataset(starts: &[&str]) -> Dataset {
        let records = starts
            .iter()
            .map(|s| TripRecord::new(parse_timestamp(s).unwrap(), 60.0, "A", "B", None))
            .collect();
        Dataset::new(City::Chicago, Capabilities::default(), records)
    }

    fn sample() -> Dataset {
        dataset(&[
            "2017-01-01 08:00:00", // Sunday
            "2017-01-02 09:00:00", // Monday
            "2017-02-05 10:00:00", // Sunday
            "2017-03-06 11:00:00", // Monday
            "2017-06-30 12:00:00", // Friday
        ])
    }

    #[test]
    fn test_parse_months() {
        assert_eq!(Selector::months(&["all"]).unwrap(), Selector::All);
        assert_eq!(
            Selector::months(&["March", "january", "march"]).unwrap(),
            Selector::Only(vec![3, 1])
        );
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        let err = Selector::months(&["july"]).unwrap_err();
        assert!(matches!(err, BikeshareError::Validation { field: "month", .. }));
        assert!(Selector::days(&["someday"]).is_err());
        assert!(Selector::<u32>::months::<&str>(&[]).is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Selector::months(&["ALL"]).unwrap().labels(), vec!["all"]);
        assert_eq!(
            Selector::months(&["june", "may"]).unwrap().labels(),
            vec!["june", "may"]
        );
        assert_eq!(Selector::days(&["Friday"]).unwrap().labels(), vec!["friday"]);
    }

    #[test]
    fn test_all_all_keeps_everything_in_order() {
        let ds = sample();
        let view = filter(&ds, &Selector::All, &Selector::All);
        assert_eq!(view.indices(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_month_and_day_filter() {
        let ds = sample();
        let months = Selector::months(&["january", "february"]).unwrap();
        let days = Selector::days(&["sunday"]).unwrap();

        let view = filter(&ds, &months, &days);
        assert_eq!(view.indices(), &[0, 2]);
        assert!(view.iter().all(|r| r.day_of_week() == Weekday::Sun));
    }

    #[test]
    fn test_filter_order_does_not_matter() {
        let ds = sample();
        let months = Selector::months(&["january", "march"]).unwrap();
        let days = Selector::days(&["monday"]).unwrap();

        let month_first = View::all(&ds).retain_months(&months).retain_days(&days);
        let day_first = View::all(&ds).retain_days(&days).retain_months(&months);
        assert_eq!(month_first.indices(), day_first.indices());
        assert_eq!(month_first.indices(), &[1, 3]);
    }

    #[test]
    fn test_filter_can_be_empty() {
        let ds = sample();
        let view = filter(&ds, &Selector::months(&["april"]).unwrap(), &Selector::All);
        assert!(view.is_empty());
        assert_eq!(ds.len(), 5);
    }

    #[test]
    fn test_window_and_pages() {
        let ds = sample();
        let view = View::all(&ds);

        assert_eq!(view.window(3, 5).len(), 2);
        assert!(view.window(10, 5).is_empty());

        let pages: Vec<_> = view.pages(2).map(|p| p.len()).collect();
        assert_eq!(pages, vec![2, 2, 1]);
    }
}
