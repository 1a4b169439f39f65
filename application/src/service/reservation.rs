use error_stack::Report;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnReservationQuery, ReservationFilter, ReservationQuery};
use kernel::interface::update::{DependOnReservationModifier, ReservationModifier};
use kernel::prelude::entity::{CreatedAt, Reservation, ReservationId, ReservationStatus};
use kernel::KernelError;

use crate::transfer::{
    CancelReservationDto, CreateReservationDto, GetReservationDto, GuestStaySummary,
    GuestStaySummaryDto, SearchStaysDto,
};

#[async_trait::async_trait]
pub trait GetReservationService: 'static + Sync + Send + DependOnReservationQuery {
    /// All reservations that are still active. Cancelled records stay in the
    /// store but never show up here.
    async fn get_active_reservations(&self) -> error_stack::Result<Vec<Reservation>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let filter = ReservationFilter::default().with_status(ReservationStatus::Active);
        let found = self
            .reservation_query()
            .find(&mut connection, &filter)
            .await?;
        connection.commit().await?;

        Ok(found)
    }

    async fn get_reservation(
        &self,
        dto: GetReservationDto,
    ) -> error_stack::Result<Reservation, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let found = self
            .reservation_query()
            .find_by_id(&mut connection, &dto.id)
            .await?;
        connection.commit().await?;

        found.ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("reservation {:?} does not exist", dto.id))
        })
    }
}

impl<T> GetReservationService for T where T: DependOnReservationQuery {}

#[async_trait::async_trait]
pub trait CreateReservationService: 'static + Sync + Send + DependOnReservationModifier {
    /// Persists a new reservation. The id and creation timestamp are assigned
    /// here and the record always starts out active; any status a client sent
    /// was dropped before the DTO was built.
    async fn create_reservation(
        &self,
        dto: CreateReservationDto,
    ) -> error_stack::Result<Reservation, KernelError> {
        let reservation = Reservation::new(
            ReservationId::new(Uuid::new_v4()),
            dto.guest_member_id,
            dto.guest_name,
            dto.hotel_name,
            dto.stay_range,
            ReservationStatus::Active,
            dto.base_stay_amount,
            dto.tax_amount,
            CreatedAt::new(OffsetDateTime::now_utc()),
        );

        let mut connection = self.database_connection().transact().await?;
        self.reservation_modifier()
            .create(&mut connection, &reservation)
            .await?;
        connection.commit().await?;

        tracing::debug!(id = ?reservation.id(), "created reservation");
        Ok(reservation)
    }
}

impl<T> CreateReservationService for T where T: DependOnReservationModifier {}

#[async_trait::async_trait]
pub trait CancelReservationService: 'static + Sync + Send + DependOnReservationModifier {
    async fn cancel_reservation(
        &self,
        dto: CancelReservationDto,
    ) -> error_stack::Result<Reservation, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let cancelled = self
            .reservation_modifier()
            .cancel(&mut connection, &dto.id)
            .await?;
        connection.commit().await?;

        cancelled.ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("reservation {:?} does not exist", dto.id))
        })
    }
}

impl<T> CancelReservationService for T where T: DependOnReservationModifier {}

#[async_trait::async_trait]
pub trait SearchStaysService: 'static + Sync + Send + DependOnReservationQuery {
    /// Reservations arriving on or after `start` and departing strictly
    /// before `end`, regardless of status. Order is store-determined.
    async fn search_stays(
        &self,
        dto: SearchStaysDto,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let filter = ReservationFilter::default()
            .arriving_on_or_after(dto.start)
            .departing_before(dto.end);
        let found = self
            .reservation_query()
            .find(&mut connection, &filter)
            .await?;
        connection.commit().await?;

        Ok(found)
    }
}

impl<T> SearchStaysService for T where T: DependOnReservationQuery {}

#[async_trait::async_trait]
pub trait GuestStaySummaryService: 'static + Sync + Send + DependOnReservationQuery {
    /// Aggregates a guest's upcoming, past and cancelled reservations. The
    /// three partitions are fetched by independent queries joined
    /// all-or-nothing; see [`GuestStaySummary`] for the overlap semantics.
    async fn guest_stay_summary(
        &self,
        dto: GuestStaySummaryDto,
    ) -> error_stack::Result<GuestStaySummary, KernelError> {
        let now = OffsetDateTime::now_utc();
        let guest_member_id = dto.guest_member_id;

        let upcoming = ReservationFilter::default()
            .for_guest(guest_member_id)
            .arriving_on_or_after(now);
        let past = ReservationFilter::default()
            .for_guest(guest_member_id)
            .departing_before(now);
        let cancelled = ReservationFilter::default()
            .for_guest(guest_member_id)
            .with_status(ReservationStatus::Cancelled);

        let (upcoming, past, cancelled) = tokio::try_join!(
            self.fetch_partition(upcoming),
            self.fetch_partition(past),
            self.fetch_partition(cancelled),
        )?;

        tracing::debug!(
            guest_member_id = ?guest_member_id,
            upcoming = upcoming.len(),
            past = past.len(),
            cancelled = cancelled.len(),
            "computed guest stay summary"
        );
        Ok(GuestStaySummary::new(
            guest_member_id,
            &upcoming,
            &past,
            &cancelled,
        ))
    }

    async fn fetch_partition(
        &self,
        filter: ReservationFilter,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let found = self
            .reservation_query()
            .find(&mut connection, &filter)
            .await?;
        connection.commit().await?;
        Ok(found)
    }
}

impl<T> GuestStaySummaryService for T where T: DependOnReservationQuery {}
