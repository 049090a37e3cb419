use chrono::{Datelike, NaiveDate, Utc};

use crate::features::profiles::types::ProfileType;
use crate::utils::error::{Error, Result};

/// Completed years between `date_of_birth` and today.
pub fn calculate_age(date_of_birth: NaiveDate) -> i32 {
    let today = Utc::now().date_naive();
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Brides must be at least 18, grooms at least 21.
pub fn validate_minimum_age(date_of_birth: NaiveDate, profile_type: ProfileType) -> Result<()> {
    let age = calculate_age(date_of_birth);
    let (min_age, label) = match profile_type {
        ProfileType::Bride => (18, "brides"),
        ProfileType::Groom => (21, "grooms"),
    };

    if age < min_age {
        return Err(Error::Validation(format!(
            "minimum age for {label} is {min_age} years, you are currently {age} years old"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn years_ago(years: i64) -> NaiveDate {
        (Utc::now() - Duration::days(years * 365 + years / 4 + 1)).date_naive()
    }

    #[test]
    fn age_counts_completed_years() {
        assert_eq!(calculate_age(years_ago(25)), 25);
    }

    #[test]
    fn minimum_age_differs_by_profile_type() {
        let nineteen = years_ago(19);
        assert!(validate_minimum_age(nineteen, ProfileType::Bride).is_ok());
        assert!(validate_minimum_age(nineteen, ProfileType::Groom).is_err());

        let twenty_two = years_ago(22);
        assert!(validate_minimum_age(twenty_two, ProfileType::Groom).is_ok());
    }
}
