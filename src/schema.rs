/// Column names as they appear in the city CSV headers.
/// Tables only guarantee what their own header row lists.

// ── Source columns ──────────────────────────────────────────────────────────
pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// An optional column a reporter may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    StartTime,
    EndTime,
    StartStation,
    EndStation,
    UserType,
    Gender,
    BirthYear,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::StartTime,
        Column::EndTime,
        Column::StartStation,
        Column::EndStation,
        Column::UserType,
        Column::Gender,
        Column::BirthYear,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::StartTime => START_TIME,
            Column::EndTime => END_TIME,
            Column::StartStation => START_STATION,
            Column::EndStation => END_STATION,
            Column::UserType => USER_TYPE,
            Column::Gender => GENDER,
            Column::BirthYear => BIRTH_YEAR,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Which optional columns a loaded table carries, computed once from its
/// header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    present: u8,
}

impl Schema {
    pub fn from_headers<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut schema = Schema::default();
        for header in headers {
            if let Some(column) = Column::ALL.into_iter().find(|c| c.header() == header) {
                schema.present |= column.bit();
            }
        }
        schema
    }

    pub fn has(&self, column: Column) -> bool {
        self.present & column.bit() != 0
    }

    pub fn has_all(&self, columns: &[Column]) -> bool {
        columns.iter().all(|c| self.has(*c))
    }
}
