/// Column-name constants for the trip CSVs.
/// Single source of truth for every column lookup in the crate.

// ── Raw trip columns ────────────────────────────────────────────────────────
pub mod trip {
    pub const START_TIME: &str = "Start Time";
    pub const END_TIME: &str = "End Time";
    pub const START_STATION: &str = "Start Station";
    pub const END_STATION: &str = "End Station";
    pub const TRIP_DURATION: &str = "Trip Duration";
    pub const USER_TYPE: &str = "User Type";

    // Present in some city files only.
    pub const GENDER: &str = "Gender";
    pub const BIRTH_YEAR: &str = "Birth Year";

    pub const REQUIRED: [&str; 6] = [
        START_TIME,
        END_TIME,
        START_STATION,
        END_STATION,
        TRIP_DURATION,
        USER_TYPE,
    ];
}

// ── Columns derived at load time ────────────────────────────────────────────
pub mod derived {
    pub const MONTH: &str = "month";
    pub const DAY_OF_WEEK: &str = "day_of_week";
    pub const HOUR: &str = "hour";
    pub const ROUTE: &str = "start_to_end";
}

// ── Start-time parse format ─────────────────────────────────────────────────
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
