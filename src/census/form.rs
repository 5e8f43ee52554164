use super::column::*;
use super::date::Date;
use super::individual::Individual;

/// One historical census: where and when it was taken, and its columns.
pub trait Census {
    fn place(&self) -> &str;

    /// The census date, in GEDCOM format.
    fn census_date(&self) -> &str;

    fn columns(&self) -> Vec<Box<dyn CensusColumn>>;

    fn date(&self) -> Date {
        Date::parse(self.census_date())
    }

    /// One row per household member, one cell per column.
    fn household(&self, members: &[Individual], head: Option<&Individual>) -> Vec<Vec<String>> {
        let columns = self.columns();
        members
            .iter()
            .map(|member| {
                columns
                    .iter()
                    .map(|column| column.generate(member, head))
                    .collect()
            })
            .collect()
    }
}

pub struct CensusOfEngland1841;

impl Census for CensusOfEngland1841 {
    fn place(&self) -> &str {
        "England"
    }

    fn census_date(&self) -> &str {
        "06 JUN 1841"
    }

    fn columns(&self) -> Vec<Box<dyn CensusColumn>> {
        let date = self.date();
        vec![
            Box::new(FullName::new(&date, "Name", "Name")) as Box<dyn CensusColumn>,
            Box::new(AgeMale5Years::new(&date, "AgeM", "Age (males)")),
            Box::new(AgeFemale5Years::new(&date, "AgeF", "Age (females)")),
            Box::new(Occupation::new(
                &date,
                "Occupation",
                "Profession, trade, employment or of independent means",
            )),
            Box::new(Null::new(&date, "BiC", "Born in same county")),
            Box::new(Null::new(
                &date,
                "SIF",
                "Born in Scotland, Ireland or foreign parts",
            )),
        ]
    }
}

pub struct CensusOfDeutschland1867;

impl Census for CensusOfDeutschland1867 {
    fn place(&self) -> &str {
        "Deutschland"
    }

    fn census_date(&self) -> &str {
        "03 DEC 1867"
    }

    fn columns(&self) -> Vec<Box<dyn CensusColumn>> {
        let date = self.date();
        vec![
            Box::new(FullName::new(&date, "Name", "Vor- und Familienname")) as Box<dyn CensusColumn>,
            Box::new(RelationToHead::new(&date, "Stellung", "Stellung im Haushalt")),
            Box::new(BirthDayDotMonthYear::new(&date, "Geburtstag", "Geburtstag")),
            Box::new(AgeFemale16To26Years::new(
                &date,
                "16-26",
                "Alter der Frauen von 16 bis 26 Jahren",
            )),
            Box::new(Occupation::new(
                &date,
                "Stand",
                "Stand, Beruf oder Vorbereitung zum Beruf",
            )),
            Box::new(Null::new(&date, "Bemerkungen", "Bemerkungen")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::census::individual::Sex;

    fn household() -> Vec<Individual> {
        vec![
            Individual::new("I1", "Johann Schmidt", Sex::Male)
                .with_birth_date(Date::parse("12 MAR 1830"))
                .with_occupation("Schmied"),
            Individual::new("I2", "Anna Schmidt", Sex::Female)
                .with_birth_date(Date::parse("30 JUN 1845"))
                .with_relation_to_head("Ehefrau"),
            Individual::new("I3", "Maria Schmidt", Sex::Female)
                .with_birth_date(Date::parse("1866"))
                .with_relation_to_head("Tochter"),
        ]
    }

    #[test]
    fn each_member_gets_one_cell_per_column() {
        let members = household();
        let census = CensusOfDeutschland1867;
        let rows = census.household(&members, Some(&members[0]));

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.len() == census.columns().len()));
        assert_eq!(
            rows[0],
            vec!["Johann Schmidt", "head", "12. March 1830", "", "Schmied", ""]
        );
        assert_eq!(
            rows[1],
            vec!["Anna Schmidt", "Ehefrau", "30. June 1845", "22", "", ""]
        );
        assert_eq!(rows[2][1], "Tochter");
        assert_eq!(rows[2][3], "");
    }

    #[test]
    fn england_1841_rounds_adult_ages() {
        let members = household();
        let rows = CensusOfEngland1841.household(&members, None);
        assert_eq!(rows[0][1], "11");
        assert_eq!(rows[0][2], "");
        assert_eq!(CensusOfEngland1841.place(), "England");
        assert!(CensusOfEngland1841.date().is_known());
    }
}
