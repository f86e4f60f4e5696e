use std::fmt::{self, Display, Formatter};

use chrono::{Datelike, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The fixed age bands a fighter is grouped into for matchmaking.
///
/// The band is derived from the date of birth at the time the
/// registration is processed, see [`AgeClass::from_date_of_birth`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AgeClass {
    Youth,
    Teen,
    Adult,
    Senior,
}

impl AgeClass {
    /// Returns the `AgeClass` for a fighter born on `date_of_birth`, as
    /// of `today`.
    ///
    /// Bands: 45 and over is `Senior`, 18 to 44 is `Adult`, 16 and 17
    /// is `Teen`, everything younger is `Youth`.
    pub fn from_date_of_birth(date_of_birth: NaiveDate, today: NaiveDate) -> Self {
        let age = age_on(date_of_birth, today);

        if age >= 45 {
            Self::Senior
        } else if age >= 18 {
            Self::Adult
        } else if age >= 16 {
            Self::Teen
        } else {
            Self::Youth
        }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Youth => "Youth",
            Self::Teen => "Teen",
            Self::Adult => "Adult",
            Self::Senior => "Senior",
        }
    }
}

impl Display for AgeClass {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the age in whole years on `today`.
///
/// The calendar-year difference is decremented by one if the birthday
/// has not yet occurred this year.
fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();

    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }

    age
}

/// Derives the skill criteria label from a banded skill level string.
///
/// The criteria is the substring before the first `:`, trimmed. A
/// missing skill level yields an empty criteria, which still matches
/// divisions created without one.
pub fn bracket_criteria(skill_level: Option<&str>) -> String {
    match skill_level {
        Some(level) => level.split(':').next().unwrap_or("").trim().to_owned(),
        None => String::new(),
    }
}

/// Composes the sport label a division is matched on, e.g.
/// `"Kickboxing (Male)"`.
pub fn sport_label(sport_type: &str, gender: &str) -> String {
    format!("{} ({})", sport_type, gender)
}

/// Generates the human readable division title, e.g.
/// `"Women's Novice Bantamweight"`.
///
/// Empty segments are omitted so the title never contains double
/// spaces. Genders other than `Male`/`Female` carry no gender prefix.
pub fn division_title(gender: &str, criteria: &str, weight_class: Option<&str>) -> String {
    let gender = match gender {
        "Male" => Some("Men's"),
        "Female" => Some("Women's"),
        _ => None,
    };

    let mut parts = Vec::new();

    if let Some(gender) = gender {
        parts.push(gender);
    }

    if !criteria.is_empty() {
        parts.push(criteria);
    }

    if let Some(weight_class) = weight_class {
        if !weight_class.is_empty() {
            parts.push(weight_class);
        }
    }

    parts.join(" ")
}

/// The tuple of attributes a division is matched on.
///
/// Two fighters belong to the same division exactly when their keys are
/// equal. The weight class is deliberately not part of the key; it only
/// feeds the division title.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DivisionKey {
    pub age_class: AgeClass,
    pub sport: String,
    pub rule_style: String,
    pub criteria: String,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{bracket_criteria, division_title, sport_label, AgeClass};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_age_class_bands() {
        let today = date(2024, 6, 1);

        // Ages 17, 18, 44, 45, 15.
        let cases = [
            (date(2007, 1, 1), AgeClass::Teen),
            (date(2006, 1, 1), AgeClass::Adult),
            (date(1980, 1, 1), AgeClass::Adult),
            (date(1979, 1, 1), AgeClass::Senior),
            (date(2009, 1, 1), AgeClass::Youth),
        ];

        for (date_of_birth, expected) in cases {
            assert_eq!(AgeClass::from_date_of_birth(date_of_birth, today), expected);
        }
    }

    #[test]
    fn test_age_class_birthday_not_yet_occurred() {
        let today = date(2024, 6, 1);

        // Turns 18 later this year; still 17 today.
        let date_of_birth = date(2006, 6, 2);
        assert_eq!(
            AgeClass::from_date_of_birth(date_of_birth, today),
            AgeClass::Teen
        );

        // Birthday is today; already 18.
        let date_of_birth = date(2006, 6, 1);
        assert_eq!(
            AgeClass::from_date_of_birth(date_of_birth, today),
            AgeClass::Adult
        );
    }

    #[test]
    fn test_bracket_criteria() {
        assert_eq!(
            bracket_criteria(Some("Class B: 4-6 Years (Belt Award)")),
            "Class B"
        );
        assert_eq!(bracket_criteria(Some("Novice: 0-2 Years")), "Novice");
        assert_eq!(bracket_criteria(Some("Freestyle")), "Freestyle");
        assert_eq!(bracket_criteria(None), "");
    }

    #[test]
    fn test_sport_label() {
        assert_eq!(sport_label("Kickboxing", "Male"), "Kickboxing (Male)");
        assert_eq!(sport_label("Muay Thai", "Female"), "Muay Thai (Female)");
    }

    #[test]
    fn test_division_title() {
        assert_eq!(
            division_title("Female", "Novice", Some("Bantamweight")),
            "Women's Novice Bantamweight"
        );
        assert_eq!(
            division_title("Male", "Class A", Some("Heavyweight")),
            "Men's Class A Heavyweight"
        );

        // Missing segments are omitted without leaving double spaces.
        assert_eq!(division_title("Female", "Novice", None), "Women's Novice");
        assert_eq!(division_title("Male", "", Some("Lightweight")), "Men's Lightweight");
        assert_eq!(division_title("Other", "Novice", None), "Novice");
        assert_eq!(division_title("Male", "", None), "Men's");
    }
}
