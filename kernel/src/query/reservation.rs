use time::OffsetDateTime;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{GuestMemberId, Reservation, ReservationId, ReservationStatus};
use crate::KernelError;

/// Predicates applied when listing reservations. Unset fields match
/// everything, so the default filter returns the whole collection.
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub guest_member_id: Option<GuestMemberId>,
    pub status: Option<ReservationStatus>,
    pub arrives_on_or_after: Option<OffsetDateTime>,
    pub departs_before: Option<OffsetDateTime>,
}

impl ReservationFilter {
    pub fn for_guest(mut self, guest_member_id: GuestMemberId) -> Self {
        self.guest_member_id = Some(guest_member_id);
        self
    }

    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Keep reservations with `arrival_date >= instant`.
    pub fn arriving_on_or_after(mut self, instant: OffsetDateTime) -> Self {
        self.arrives_on_or_after = Some(instant);
        self
    }

    /// Keep reservations with `departure_date < instant` (strict; a departure
    /// exactly at `instant` is excluded).
    pub fn departing_before(mut self, instant: OffsetDateTime) -> Self {
        self.departs_before = Some(instant);
        self
    }

    /// In-memory equivalent of the SQL the driver generates. Substitutable
    /// store fakes lean on this so both implementations share one semantics.
    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.guest_member_id
            .map_or(true, |id| id == *reservation.guest_member_id())
            && self
                .status
                .map_or(true, |status| status == *reservation.status())
            && self
                .arrives_on_or_after
                .map_or(true, |at| reservation.stay_range().arrival_date() >= at)
            && self
                .departs_before
                .map_or(true, |at| reservation.stay_range().departure_date() < at)
    }
}

#[async_trait::async_trait]
pub trait ReservationQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find(
        &self,
        con: &mut Self::Transaction,
        filter: &ReservationFilter,
    ) -> error_stack::Result<Vec<Reservation>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &ReservationId,
    ) -> error_stack::Result<Option<Reservation>, KernelError>;
}

pub trait DependOnReservationQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type ReservationQuery: ReservationQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn reservation_query(&self) -> &Self::ReservationQuery;
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use crate::entity::{
        BaseStayAmount, CreatedAt, GuestMemberId, GuestName, HotelName, Reservation,
        ReservationId, ReservationStatus, StayRange, TaxAmount,
    };

    use super::ReservationFilter;

    fn reservation(status: ReservationStatus) -> Reservation {
        Reservation::new(
            ReservationId::new(Uuid::new_v4()),
            GuestMemberId::new(123i64),
            GuestName::new("John Doe"),
            HotelName::new("Sample Hotel"),
            StayRange::new(
                datetime!(2023-01-01 00:00 UTC),
                datetime!(2023-01-05 00:00 UTC),
            ),
            status,
            BaseStayAmount::new(200.0),
            TaxAmount::new(50.0),
            CreatedAt::new(datetime!(2022-12-01 00:00 UTC)),
        )
    }

    #[test]
    fn default_filter_matches_everything() {
        let filter = ReservationFilter::default();
        assert!(filter.matches(&reservation(ReservationStatus::Active)));
        assert!(filter.matches(&reservation(ReservationStatus::Cancelled)));
    }

    #[test]
    fn status_filter_excludes_other_states() {
        let filter = ReservationFilter::default().with_status(ReservationStatus::Active);
        assert!(filter.matches(&reservation(ReservationStatus::Active)));
        assert!(!filter.matches(&reservation(ReservationStatus::Cancelled)));
    }

    #[test]
    fn date_range_is_half_open() {
        let subject = reservation(ReservationStatus::Active);

        let inside = ReservationFilter::default()
            .arriving_on_or_after(datetime!(2023-01-01 00:00 UTC))
            .departing_before(datetime!(2023-06-30 00:00 UTC));
        assert!(inside.matches(&subject));

        // A departure exactly at the end bound falls outside the range.
        let boundary = ReservationFilter::default()
            .arriving_on_or_after(datetime!(2023-01-01 00:00 UTC))
            .departing_before(datetime!(2023-01-05 00:00 UTC));
        assert!(!boundary.matches(&subject));
    }

    #[test]
    fn guest_filter_requires_exact_member_id() {
        let filter = ReservationFilter::default().for_guest(GuestMemberId::new(999i64));
        assert!(!filter.matches(&reservation(ReservationStatus::Active)));
    }
}
