use crate::analyzers::types::{Availability, BirthYearStats, Outcome, UserStats};
use crate::analyzers::utility::{mode, value_counts};
use crate::filter::View;

/// Rider breakdown by user type, plus gender and birth year where the
/// source carries them. Blank cells are not counted.
pub fn user_stats(view: &View) -> Outcome<UserStats> {
    if view.is_empty() {
        return Outcome::NoData;
    }
    let capabilities = view.dataset().capabilities;

    let user_types = value_counts(view.iter().filter_map(|r| r.user_type.clone()));

    let gender = if capabilities.has_gender {
        Availability::Available(value_counts(view.iter().filter_map(|r| r.gender.clone())))
    } else {
        Availability::NotAvailable
    };

    let birth_year = if capabilities.has_birth_year {
        Availability::Available(birth_year_stats(view).into())
    } else {
        Availability::NotAvailable
    };

    Outcome::Data(UserStats {
        user_types,
        gender,
        birth_year,
    })
}

fn birth_year_stats(view: &View) -> Option<BirthYearStats> {
    let years = || view.iter().filter_map(|r| r.birth_year);

    Some(BirthYearStats {
        earliest: years().min()?,
        most_recent: years().max()?,
        most_common: mode(years())?.0,
    })
}
