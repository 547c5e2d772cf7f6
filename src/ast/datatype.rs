// Data type model

/// A parsed data type. Numeric precision and scale are carried as opaque
/// decimal text (`2E2`, `134217728`) to avoid floating-point precision
/// loss; nothing here validates charset or collation names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Number(NumberType),
    Character(CharacterType),
    Timestamp(TimestampType),
    General(GeneralDataType),
    Collection(CollectionType),
    Interval(IntervalType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberType {
    pub name: String,
    pub precision: Option<String>,
    pub scale: Option<String>,
    /// `Some(false)` for UNSIGNED, `Some(true)` for an explicit SIGNED,
    /// `None` when neither keyword appeared.
    pub signed: Option<bool>,
    pub zerofill: bool,
    /// Oracle `NUMBER(*)` / `NUMBER(*,n)`; a flag, not a sentinel precision.
    pub star_precision: bool,
}

impl NumberType {
    pub fn new(name: &str, precision: Option<&str>, scale: Option<&str>) -> Self {
        Self {
            name: name.to_owned(),
            precision: precision.map(str::to_owned),
            scale: scale.map(str::to_owned),
            signed: None,
            zerofill: false,
            star_precision: false,
        }
    }

    pub fn star(mut self) -> Self {
        self.star_precision = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterType {
    pub name: String,
    pub length: Option<String>,
    /// Oracle `varchar2(10 char)` vs `varchar2(10 byte)`.
    pub length_option: Option<LengthOption>,
    pub binary: bool,
    pub charset: Option<String>,
    pub collation: Option<String>,
}

impl CharacterType {
    pub fn new(name: &str, length: Option<&str>) -> Self {
        Self {
            name: name.to_owned(),
            length: length.map(str::to_owned),
            length_option: None,
            binary: false,
            charset: None,
            collation: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthOption {
    Char,
    Byte,
}

/// TIMESTAMP with the two timezone flags kept independent; at most one is
/// ever set by a factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampType {
    pub precision: Option<String>,
    pub with_time_zone: bool,
    pub with_local_time_zone: bool,
}

impl TimestampType {
    pub fn new(precision: Option<&str>, with_time_zone: bool, with_local_time_zone: bool) -> Self {
        Self {
            precision: precision.map(str::to_owned),
            with_time_zone,
            with_local_time_zone,
        }
    }
}

/// Fallback shape: type name plus opaque argument texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralDataType {
    pub name: String,
    pub args: Vec<String>,
}

impl GeneralDataType {
    pub fn new(name: &str, args: Vec<String>) -> Self {
        Self {
            name: name.to_owned(),
            args,
        }
    }
}

/// MySQL `enum(…)` / `set(…)`: ordered literal list, quotes preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionType {
    pub name: String,
    pub values: Vec<String>,
    pub binary: bool,
    pub charset: Option<String>,
    pub collation: Option<String>,
}

impl CollectionType {
    pub fn new(name: &str, values: Vec<String>) -> Self {
        Self {
            name: name.to_owned(),
            values,
            binary: false,
            charset: None,
            collation: None,
        }
    }
}

/// Oracle interval types. Leading and trailing precisions are independently
/// optional; absence of one says nothing about the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalType {
    YearToMonth {
        year_precision: Option<String>,
    },
    DayToSecond {
        day_precision: Option<String>,
        second_precision: Option<String>,
    },
}
