use time::{Date, OffsetDateTime, UtcOffset};

pub trait Clock {
    fn today(&self) -> Date;
}

/// Wall clock in the local time zone, or UTC when the offset is unknown.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(local_offset()).date()
    }
}

pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

/// The calendar day currently being browsed. Session-only state.
#[derive(Debug, Clone)]
pub struct DaySelector<C: Clock = SystemClock> {
    clock: C,
    current: Date,
}

impl DaySelector<SystemClock> {
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> DaySelector<C> {
    pub fn new(clock: C) -> Self {
        let current = clock.today();
        Self { clock, current }
    }

    pub fn current(&self) -> Date {
        self.current
    }

    pub fn previous(&mut self) -> Date {
        if let Some(day) = self.current.previous_day() {
            self.current = day;
        }
        self.current
    }

    pub fn next(&mut self) -> Date {
        if let Some(day) = self.current.next_day() {
            self.current = day;
        }
        self.current
    }

    pub fn today(&mut self) -> Date {
        self.current = self.clock.today();
        self.current
    }

    pub fn select(&mut self, day: Date) -> Date {
        self.current = day;
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, DaySelector, FixedClock};
    use std::cell::Cell;
    use time::Date;
    use time::macros::date;

    struct SteppingClock(Cell<Date>);

    impl Clock for SteppingClock {
        fn today(&self) -> Date {
            self.0.get()
        }
    }

    #[test]
    fn starts_on_today() {
        let selector = DaySelector::new(FixedClock(date!(2024 - 03 - 10)));
        assert_eq!(selector.current(), date!(2024 - 03 - 10));
    }

    #[test]
    fn previous_and_next_move_one_day() {
        let mut selector = DaySelector::new(FixedClock(date!(2024 - 03 - 01)));

        assert_eq!(selector.previous(), date!(2024 - 02 - 29));
        assert_eq!(selector.next(), date!(2024 - 03 - 01));
        assert_eq!(selector.next(), date!(2024 - 03 - 02));
    }

    #[test]
    fn crosses_year_boundaries() {
        let mut selector = DaySelector::new(FixedClock(date!(2024 - 12 - 31)));
        assert_eq!(selector.next(), date!(2025 - 01 - 01));
        assert_eq!(selector.previous(), date!(2024 - 12 - 31));
    }

    #[test]
    fn today_reads_clock_at_call_time() {
        let clock = SteppingClock(Cell::new(date!(2024 - 01 - 01)));
        let mut selector = DaySelector::new(clock);
        selector.next();
        selector.next();

        selector.clock.0.set(date!(2024 - 01 - 05));

        assert_eq!(selector.today(), date!(2024 - 01 - 05));
        assert_eq!(selector.current(), date!(2024 - 01 - 05));
    }

    #[test]
    fn select_jumps_to_day() {
        let mut selector = DaySelector::new(FixedClock(date!(2024 - 01 - 01)));
        selector.select(date!(2030 - 06 - 15));
        assert_eq!(selector.current(), date!(2030 - 06 - 15));
    }

    #[test]
    fn saturates_at_calendar_limits() {
        let mut selector = DaySelector::new(FixedClock(Date::MIN));
        assert_eq!(selector.previous(), Date::MIN);

        selector.select(Date::MAX);
        assert_eq!(selector.next(), Date::MAX);
    }
}
