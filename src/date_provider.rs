use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};

/// Source of the current time for problem ids, banner deadlines and saved sessions
pub trait DateProvider: Send + Sync {
    fn get_current_time(&self) -> DateTime<Utc>;
}

pub struct SystemDateProvider;

impl DateProvider for SystemDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Reports a fixed calendar date while keeping the wall-clock time of day,
/// so banner deadlines still advance.
pub struct OverrideDateProvider {
    override_date: NaiveDate,
}

impl OverrideDateProvider {
    pub fn new(override_date: NaiveDate) -> Self {
        Self { override_date }
    }
}

impl DateProvider for OverrideDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        let now = Utc::now();
        let time_of_day = NaiveTime::from_hms_milli_opt(
            now.hour(),
            now.minute(),
            now.second(),
            now.timestamp_subsec_millis().min(999),
        )
        .unwrap_or(NaiveTime::MIN);
        self.override_date.and_time(time_of_day).and_utc()
    }
}

/// Always returns the same instant
pub struct FixedDateProvider {
    instant: DateTime<Utc>,
}

impl FixedDateProvider {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl DateProvider for FixedDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        self.instant
    }
}
