//! Rules that derive the likely value of one census column from what is
//! known about an individual.

use super::date::Date;
use super::individual::{Individual, Sex};

/// Labels for a column, plus the date of the census it belongs to.
#[derive(Clone, Debug)]
pub struct ColumnHeader {
    date: Date,
    abbreviation: String,
    title: String,
}

pub trait CensusColumn {
    fn header(&self) -> &ColumnHeader;

    /// The likely value of this column for `individual`, a member of the
    /// household headed by `head`.
    fn generate(&self, individual: &Individual, head: Option<&Individual>) -> String;

    fn abbreviation(&self) -> &str {
        &self.header().abbreviation
    }

    fn title(&self) -> &str {
        &self.header().title
    }

    /// The date of the census.
    fn date(&self) -> &Date {
        &self.header().date
    }
}

macro_rules! census_column {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            header: ColumnHeader,
        }

        impl $name {
            pub fn new(census_date: &Date, abbreviation: &str, title: &str) -> Self {
                $name {
                    header: ColumnHeader {
                        date: census_date.clone(),
                        abbreviation: abbreviation.to_owned(),
                        title: title.to_owned(),
                    },
                }
            }
        }
    };
}

census_column!(
    /// A column left for the user to fill in.
    Null
);
census_column!(FullName);
census_column!(
    /// `head` for the head of household, otherwise the member's relationship.
    RelationToHead
);
census_column!(
    /// Age in whole years.
    Age
);
census_column!(
    /// Age of a male, rounded down to 5 years once over 15.
    AgeMale5Years
);
census_column!(
    /// Age of a female, rounded down to 5 years once over 15.
    AgeFemale5Years
);
census_column!(
    /// Age of a female aged 16 to 25; empty for everyone else.
    AgeFemale16To26Years
);
census_column!(
    /// Date of birth, formatted `30. June 1832`.
    BirthDayDotMonthYear
);
census_column!(BirthYear);
census_column!(Occupation);

fn age_at_census(column: &dyn CensusColumn, individual: &Individual) -> i32 {
    Date::age_in_years(&individual.estimated_birth_date(), column.date())
}

fn rounded_to_five_years(years: i32) -> String {
    match years {
        years if years < 0 => String::new(),
        years if years > 15 => (years - years % 5).to_string(),
        years => years.to_string(),
    }
}

impl CensusColumn for Null {
    fn header(&self) -> &ColumnHeader {
        &self.header
    }

    fn generate(&self, _individual: &Individual, _head: Option<&Individual>) -> String {
        String::new()
    }
}

impl CensusColumn for FullName {
    fn header(&self) -> &ColumnHeader {
        &self.header
    }

    fn generate(&self, individual: &Individual, _head: Option<&Individual>) -> String {
        individual.full_name().to_owned()
    }
}

impl CensusColumn for RelationToHead {
    fn header(&self) -> &ColumnHeader {
        &self.header
    }

    fn generate(&self, individual: &Individual, head: Option<&Individual>) -> String {
        match head {
            Some(head) if head.xref() == individual.xref() => "head".to_owned(),
            Some(_) => individual.relation_to_head().unwrap_or("").to_owned(),
            None => String::new(),
        }
    }
}

impl CensusColumn for Age {
    fn header(&self) -> &ColumnHeader {
        &self.header
    }

    fn generate(&self, individual: &Individual, _head: Option<&Individual>) -> String {
        match age_at_census(self, individual) {
            years if years < 0 => String::new(),
            years => years.to_string(),
        }
    }
}

impl CensusColumn for AgeMale5Years {
    fn header(&self) -> &ColumnHeader {
        &self.header
    }

    fn generate(&self, individual: &Individual, _head: Option<&Individual>) -> String {
        if individual.sex() != Sex::Male {
            return String::new();
        }
        rounded_to_five_years(age_at_census(self, individual))
    }
}

impl CensusColumn for AgeFemale5Years {
    fn header(&self) -> &ColumnHeader {
        &self.header
    }

    fn generate(&self, individual: &Individual, _head: Option<&Individual>) -> String {
        if individual.sex() != Sex::Female {
            return String::new();
        }
        rounded_to_five_years(age_at_census(self, individual))
    }
}

impl CensusColumn for AgeFemale16To26Years {
    fn header(&self) -> &ColumnHeader {
        &self.header
    }

    fn generate(&self, individual: &Individual, _head: Option<&Individual>) -> String {
        if individual.sex() != Sex::Female {
            return String::new();
        }
        match age_at_census(self, individual) {
            years if years > 15 && years < 26 => years.to_string(),
            _ => String::new(),
        }
    }
}

impl CensusColumn for BirthDayDotMonthYear {
    fn header(&self) -> &ColumnHeader {
        &self.header
    }

    fn generate(&self, individual: &Individual, _head: Option<&Individual>) -> String {
        individual
            .birth_date()
            .minimum_date()
            .map(|date| date.format_day_dot_month_year())
            .unwrap_or_default()
    }
}

impl CensusColumn for BirthYear {
    fn header(&self) -> &ColumnHeader {
        &self.header
    }

    fn generate(&self, individual: &Individual, _head: Option<&Individual>) -> String {
        individual
            .birth_date()
            .minimum_date()
            .map(|date| date.year().to_string())
            .unwrap_or_default()
    }
}

impl CensusColumn for Occupation {
    fn header(&self) -> &ColumnHeader {
        &self.header
    }

    fn generate(&self, individual: &Individual, _head: Option<&Individual>) -> String {
        individual.occupation().unwrap_or("").to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn census_date() -> Date {
        Date::parse("30 JUN 1832")
    }

    fn woman_born(date: &str) -> Individual {
        Individual::new("I1", "Mary Smith", Sex::Female).with_birth_date(Date::parse(date))
    }

    #[test]
    fn age_female_16_to_26_boundaries() {
        let column = AgeFemale16To26Years::new(&census_date(), "", "");

        assert_eq!(column.generate(&woman_born("30 JUN 1817"), None), "");
        assert_eq!(column.generate(&woman_born("30 JUN 1816"), None), "16");
        assert_eq!(column.generate(&woman_born("30 JUN 1807"), None), "25");
        assert_eq!(column.generate(&woman_born("30 JUN 1806"), None), "");
    }

    #[test]
    fn age_female_16_to_26_ignores_everyone_but_women() {
        let column = AgeFemale16To26Years::new(&census_date(), "", "");
        for year in 1790..1832 {
            let birth = Date::parse(&year.to_string());
            for sex in &[Sex::Male, Sex::Unknown] {
                let individual = Individual::new("I2", "", *sex).with_birth_date(birth.clone());
                assert_eq!(column.generate(&individual, None), "");
            }
        }
    }

    #[test]
    fn age_female_16_to_26_uses_estimated_birth_date() {
        let column = AgeFemale16To26Years::new(&census_date(), "", "");
        let individual = Individual::new("I3", "", Sex::Female)
            .with_estimated_birth_date(Date::parse("ABT 1812"));
        assert_eq!(column.generate(&individual, None), "20");

        let unknown = Individual::new("I4", "", Sex::Female);
        assert_eq!(column.generate(&unknown, None), "");
    }

    #[test]
    fn relation_to_head_of_head_is_head() {
        let column = RelationToHead::new(&census_date(), "", "");
        let head = Individual::new("I1", "John Smith", Sex::Male).with_relation_to_head("self");
        assert_eq!(column.generate(&head, Some(&head)), "head");

        let wife = Individual::new("I2", "Mary Smith", Sex::Female).with_relation_to_head("wife");
        assert_eq!(column.generate(&wife, Some(&head)), "wife");
        assert_eq!(column.generate(&wife, None), "");
    }

    #[test]
    fn birth_day_dot_month_year() {
        let column = BirthDayDotMonthYear::new(&census_date(), "", "");
        assert_eq!(
            column.generate(&woman_born("30 JUN 1832"), None),
            "30. June 1832"
        );
        assert_eq!(
            column.generate(&Individual::new("I5", "", Sex::Male), None),
            ""
        );
    }

    #[test]
    fn five_year_age_columns() {
        let male = AgeMale5Years::new(&census_date(), "AgeM", "Age of males");
        let female = AgeFemale5Years::new(&census_date(), "AgeF", "Age of females");
        let boy = Individual::new("I6", "", Sex::Male).with_birth_date(Date::parse("1 JAN 1820"));
        let man = Individual::new("I7", "", Sex::Male).with_birth_date(Date::parse("1 JAN 1795"));

        assert_eq!(male.generate(&boy, None), "12");
        assert_eq!(male.generate(&man, None), "35");
        assert_eq!(female.generate(&man, None), "");
        assert_eq!(female.generate(&woman_born("1 JAN 1793"), None), "35");
        assert_eq!(male.abbreviation(), "AgeM");
        assert_eq!(male.title(), "Age of males");
    }

    #[test]
    fn simple_columns() {
        let date = census_date();
        let person = Individual::new("I8", "Ann Jones", Sex::Female)
            .with_birth_date(Date::parse("MAR 1800"))
            .with_occupation("Dressmaker");

        assert_eq!(Null::new(&date, "", "").generate(&person, None), "");
        assert_eq!(FullName::new(&date, "", "").generate(&person, None), "Ann Jones");
        assert_eq!(Age::new(&date, "", "").generate(&person, None), "32");
        assert_eq!(BirthYear::new(&date, "", "").generate(&person, None), "1800");
        assert_eq!(
            Occupation::new(&date, "", "").generate(&person, None),
            "Dressmaker"
        );
        assert_eq!(
            Age::new(&date, "", "").generate(&Individual::new("I9", "", Sex::Male), None),
            ""
        );
    }
}
