//! Census assistant: derives the likely contents of historical census forms
//! from what is known about each member of a household.

mod column;
pub mod date;
mod form;
mod individual;

pub use self::column::{
    Age, AgeFemale16To26Years, AgeFemale5Years, AgeMale5Years, BirthDayDotMonthYear, BirthYear,
    CensusColumn, ColumnHeader, FullName, Null, Occupation, RelationToHead,
};
pub use self::date::{CalendarDate, Date};
pub use self::form::{Census, CensusOfDeutschland1867, CensusOfEngland1841};
pub use self::individual::{Individual, Sex};
