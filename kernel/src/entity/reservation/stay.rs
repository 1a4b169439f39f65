use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

const MILLIS_PER_NIGHT: f64 = 1000.0 * 3600.0 * 24.0;

/// The interval between arrival and departure for one reservation.
///
/// Departure is not required to be on or after arrival; the stored value is
/// whatever the guest submitted and `nights()` may come out negative then.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct StayRange {
    #[serde(with = "time::serde::rfc3339")]
    arrival_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    departure_date: OffsetDateTime,
}

impl StayRange {
    pub fn new(
        arrival_date: impl Into<OffsetDateTime>,
        departure_date: impl Into<OffsetDateTime>,
    ) -> Self {
        Self {
            arrival_date: arrival_date.into(),
            departure_date: departure_date.into(),
        }
    }

    pub fn arrival_date(&self) -> OffsetDateTime {
        self.arrival_date
    }

    pub fn departure_date(&self) -> OffsetDateTime {
        self.departure_date
    }

    /// Length of the stay in nights, unrounded. A stay of twelve hours is
    /// 0.5 nights.
    pub fn nights(&self) -> f64 {
        let stay = self.departure_date - self.arrival_date;
        stay.whole_milliseconds() as f64 / MILLIS_PER_NIGHT
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use super::StayRange;

    #[test]
    fn whole_nights() {
        let range = StayRange::new(
            datetime!(2023-01-01 00:00 UTC),
            datetime!(2023-01-05 00:00 UTC),
        );
        assert_eq!(range.nights(), 4.0);
    }

    #[test]
    fn fractional_nights_are_not_rounded() {
        let range = StayRange::new(
            datetime!(2023-01-01 12:00 UTC),
            datetime!(2023-01-02 00:00 UTC),
        );
        assert_eq!(range.nights(), 0.5);
    }

    #[test]
    fn zero_nights() {
        let at = datetime!(2023-01-01 00:00 UTC);
        assert_eq!(StayRange::new(at, at).nights(), 0.0);
    }
}
