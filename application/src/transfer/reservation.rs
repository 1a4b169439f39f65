use time::OffsetDateTime;

use kernel::prelude::entity::{
    BaseStayAmount, GuestMemberId, GuestName, HotelName, Reservation, ReservationId, StayRange,
    TaxAmount,
};

pub struct CreateReservationDto {
    pub guest_member_id: GuestMemberId,
    pub guest_name: GuestName,
    pub hotel_name: HotelName,
    pub stay_range: StayRange,
    pub base_stay_amount: BaseStayAmount,
    pub tax_amount: TaxAmount,
}

pub struct GetReservationDto {
    pub id: ReservationId,
}

pub struct CancelReservationDto {
    pub id: ReservationId,
}

pub struct SearchStaysDto {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

pub struct GuestStaySummaryDto {
    pub guest_member_id: GuestMemberId,
}

/// Aggregated figures for one partition of a guest's reservations.
#[derive(Debug, Clone, PartialEq)]
pub struct StayPartitionInfo {
    pub number_of_stays: usize,
    pub total_nights: f64,
    pub total_amount: f64,
}

impl StayPartitionInfo {
    pub fn summarize(stays: &[Reservation]) -> Self {
        Self {
            number_of_stays: stays.len(),
            total_nights: stays.iter().map(|stay| stay.stay_range().nights()).sum(),
            total_amount: stays.iter().map(Reservation::total_amount).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelledStayInfo {
    pub number_of_stays: usize,
}

/// Read-only aggregate over a guest's stay history.
///
/// The upcoming, past and cancelled partitions are deliberately not mutually
/// exclusive: a cancelled reservation with a future arrival date counts in
/// both `upcoming_stay_info` and `cancelled_stay_info`, and
/// `total_stays_amount` double-counts anything present in both the upcoming
/// and past partitions.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestStaySummary {
    pub guest_member_id: GuestMemberId,
    pub upcoming_stay_info: StayPartitionInfo,
    pub past_stay_info: StayPartitionInfo,
    pub cancelled_stay_info: CancelledStayInfo,
    pub total_stays_amount: f64,
}

impl GuestStaySummary {
    pub fn new(
        guest_member_id: GuestMemberId,
        upcoming: &[Reservation],
        past: &[Reservation],
        cancelled: &[Reservation],
    ) -> Self {
        let upcoming_stay_info = StayPartitionInfo::summarize(upcoming);
        let past_stay_info = StayPartitionInfo::summarize(past);
        let total_stays_amount = upcoming_stay_info.total_amount + past_stay_info.total_amount;
        Self {
            guest_member_id,
            upcoming_stay_info,
            past_stay_info,
            cancelled_stay_info: CancelledStayInfo {
                number_of_stays: cancelled.len(),
            },
            total_stays_amount,
        }
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use kernel::prelude::entity::{
        BaseStayAmount, CreatedAt, GuestMemberId, GuestName, HotelName, Reservation,
        ReservationId, ReservationStatus, StayRange, TaxAmount,
    };

    use super::{GuestStaySummary, StayPartitionInfo};

    fn stay(range: StayRange, base: f64, tax: f64) -> Reservation {
        Reservation::new(
            ReservationId::new(Uuid::new_v4()),
            GuestMemberId::new(123i64),
            GuestName::new("John Doe"),
            HotelName::new("Sample Hotel"),
            range,
            ReservationStatus::Active,
            BaseStayAmount::new(base),
            TaxAmount::new(tax),
            CreatedAt::new(datetime!(2022-12-01 00:00 UTC)),
        )
    }

    #[test]
    fn partition_totals() {
        let stays = [
            stay(
                StayRange::new(
                    datetime!(2023-01-01 00:00 UTC),
                    datetime!(2023-01-05 00:00 UTC),
                ),
                200.0,
                50.0,
            ),
            stay(
                StayRange::new(
                    datetime!(2023-02-01 00:00 UTC),
                    datetime!(2023-02-02 12:00 UTC),
                ),
                100.0,
                25.0,
            ),
        ];
        let info = StayPartitionInfo::summarize(&stays);
        assert_eq!(info.number_of_stays, 2);
        assert_eq!(info.total_nights, 5.5);
        assert_eq!(info.total_amount, 375.0);
    }

    #[test]
    fn empty_partition_is_all_zero() {
        let info = StayPartitionInfo::summarize(&[]);
        assert_eq!(info.number_of_stays, 0);
        assert_eq!(info.total_nights, 0.0);
        assert_eq!(info.total_amount, 0.0);
    }

    #[test]
    fn total_stays_amount_double_counts_shared_records() {
        // the same reservation handed to both partitions is counted twice
        let shared = stay(
            StayRange::new(
                datetime!(2023-01-01 00:00 UTC),
                datetime!(2023-01-05 00:00 UTC),
            ),
            200.0,
            50.0,
        );
        let summary = GuestStaySummary::new(
            GuestMemberId::new(123i64),
            std::slice::from_ref(&shared),
            std::slice::from_ref(&shared),
            &[],
        );
        assert_eq!(summary.total_stays_amount, 500.0);
    }
}
