use super::date::Date;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl Sex {
    /// Reads a GEDCOM `SEX` value. Anything other than `M` or `F` is unknown.
    pub fn from_gedcom(value: &str) -> Self {
        match value.trim() {
            "M" | "m" => Sex::Male,
            "F" | "f" => Sex::Female,
            _ => Sex::Unknown,
        }
    }
}

/// The facts about one person that census columns are derived from.
#[derive(Clone, Debug)]
pub struct Individual {
    xref: String,
    full_name: String,
    sex: Sex,
    birth_date: Date,
    estimated_birth_date: Option<Date>,
    relation_to_head: Option<String>,
    occupation: Option<String>,
}

impl Individual {
    pub fn new(xref: &str, full_name: &str, sex: Sex) -> Self {
        Individual {
            xref: xref.to_owned(),
            full_name: full_name.to_owned(),
            sex,
            birth_date: Date::unknown(),
            estimated_birth_date: None,
            relation_to_head: None,
            occupation: None,
        }
    }

    pub fn with_birth_date(mut self, date: Date) -> Self {
        self.birth_date = date;
        self
    }

    /// A birth date inferred from other events, used when none is recorded.
    pub fn with_estimated_birth_date(mut self, date: Date) -> Self {
        self.estimated_birth_date = Some(date);
        self
    }

    /// The relationship to the household head, e.g. `wife` or `son`.
    pub fn with_relation_to_head(mut self, relation: &str) -> Self {
        self.relation_to_head = Some(relation.to_owned());
        self
    }

    pub fn with_occupation(mut self, occupation: &str) -> Self {
        self.occupation = Some(occupation.to_owned());
        self
    }

    pub fn xref(&self) -> &str {
        &self.xref
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn birth_date(&self) -> &Date {
        &self.birth_date
    }

    pub fn estimated_birth_date(&self) -> Date {
        if self.birth_date.is_known() {
            return self.birth_date.clone();
        }
        self.estimated_birth_date
            .clone()
            .unwrap_or_else(Date::unknown)
    }

    pub fn relation_to_head(&self) -> Option<&str> {
        self.relation_to_head.as_ref().map(String::as_str)
    }

    pub fn occupation(&self) -> Option<&str> {
        self.occupation.as_ref().map(String::as_str)
    }
}
