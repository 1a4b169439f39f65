use error_stack::Report;
use sqlx::types::Uuid;
use sqlx::{PgConnection, QueryBuilder};
use time::OffsetDateTime;

use kernel::interface::query::{ReservationFilter, ReservationQuery};
use kernel::interface::update::ReservationModifier;
use kernel::prelude::entity::{
    BaseStayAmount, CreatedAt, GuestMemberId, GuestName, HotelName, Reservation, ReservationId,
    ReservationStatus, StayRange, TaxAmount,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresReservationRepository;

#[async_trait::async_trait]
impl ReservationQuery for PostgresReservationRepository {
    type Transaction = PostgresTransaction;

    async fn find(
        &self,
        con: &mut PostgresTransaction,
        filter: &ReservationFilter,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        PgReservationInternal::find(con, filter).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &ReservationId,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        PgReservationInternal::find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl ReservationModifier for PostgresReservationRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        reservation: &Reservation,
    ) -> error_stack::Result<(), KernelError> {
        PgReservationInternal::create(con, reservation).await
    }

    async fn cancel(
        &self,
        con: &mut PostgresTransaction,
        id: &ReservationId,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        PgReservationInternal::cancel(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    guest_member_id: i64,
    guest_name: String,
    hotel_name: String,
    arrival_date: OffsetDateTime,
    departure_date: OffsetDateTime,
    status: String,
    base_stay_amount: f64,
    tax_amount: f64,
    created_at: OffsetDateTime,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = Report<KernelError>;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ReservationStatus>()
            .map_err(|error| Report::new(error).attach_printable("unexpected status column"))?;
        Ok(Reservation::new(
            ReservationId::new(row.id),
            GuestMemberId::new(row.guest_member_id),
            GuestName::new(row.guest_name),
            HotelName::new(row.hotel_name),
            StayRange::new(row.arrival_date, row.departure_date),
            status,
            BaseStayAmount::new(row.base_stay_amount),
            TaxAmount::new(row.tax_amount),
            CreatedAt::new(row.created_at),
        ))
    }
}

static SELECT_COLUMNS: &str = "SELECT id, guest_member_id, guest_name, hotel_name, arrival_date, departure_date, status, base_stay_amount, tax_amount, created_at FROM reservations";

pub(in crate::database) struct PgReservationInternal;

impl PgReservationInternal {
    async fn find(
        con: &mut PgConnection,
        filter: &ReservationFilter,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        let mut query = QueryBuilder::new(format!("{SELECT_COLUMNS} WHERE TRUE"));
        if let Some(guest_member_id) = &filter.guest_member_id {
            query
                .push(" AND guest_member_id = ")
                .push_bind(*guest_member_id.as_ref());
        }
        if let Some(status) = &filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(arrives_on_or_after) = filter.arrives_on_or_after {
            query
                .push(" AND arrival_date >= ")
                .push_bind(arrives_on_or_after);
        }
        if let Some(departs_before) = filter.departs_before {
            query
                .push(" AND departure_date < ")
                .push_bind(departs_before);
        }
        let rows = query
            .build_query_as::<ReservationRow>()
            .fetch_all(&mut *con)
            .await
            .convert_error()?;
        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &ReservationId,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        let row = sqlx::query_as::<_, ReservationRow>(
            // language=postgresql
            r#"
            SELECT id, guest_member_id, guest_name, hotel_name, arrival_date, departure_date, status, base_stay_amount, tax_amount, created_at
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(&mut *con)
        .await
        .convert_error()?;
        row.map(Reservation::try_from).transpose()
    }

    async fn create(
        con: &mut PgConnection,
        reservation: &Reservation,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO reservations (id, guest_member_id, guest_name, hotel_name, arrival_date, departure_date, status, base_stay_amount, tax_amount, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(reservation.id().as_ref())
        .bind(reservation.guest_member_id().as_ref())
        .bind(reservation.guest_name().as_ref())
        .bind(reservation.hotel_name().as_ref())
        .bind(reservation.stay_range().arrival_date())
        .bind(reservation.stay_range().departure_date())
        .bind(reservation.status().as_str())
        .bind(reservation.base_stay_amount().as_ref())
        .bind(reservation.tax_amount().as_ref())
        .bind(*reservation.created_at().as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn cancel(
        con: &mut PgConnection,
        id: &ReservationId,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        // One statement instead of load-then-save: the status transition is
        // one-way, so writing it unconditionally cannot lose updates.
        let row = sqlx::query_as::<_, ReservationRow>(
            // language=postgresql
            r#"
            UPDATE reservations
            SET status = $2
            WHERE id = $1
            RETURNING id, guest_member_id, guest_name, hotel_name, arrival_date, departure_date, status, base_stay_amount, tax_amount, created_at
            "#,
        )
        .bind(id.as_ref())
        .bind(ReservationStatus::Cancelled.as_str())
        .fetch_optional(&mut *con)
        .await
        .convert_error()?;
        row.map(Reservation::try_from).transpose()
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{ReservationFilter, ReservationQuery};
    use kernel::interface::update::ReservationModifier;
    use kernel::prelude::entity::{
        BaseStayAmount, CreatedAt, GuestMemberId, GuestName, HotelName, Reservation,
        ReservationId, ReservationStatus, StayRange, TaxAmount,
    };
    use kernel::KernelError;

    use crate::database::postgres::reservation::PostgresReservationRepository;
    use crate::database::postgres::PostgresDatabase;

    fn sample(guest_member_id: i64, now: OffsetDateTime) -> Reservation {
        Reservation::new(
            ReservationId::new(Uuid::new_v4()),
            GuestMemberId::new(guest_member_id),
            GuestName::new("John Doe"),
            HotelName::new("Sample Hotel"),
            StayRange::new(now + Duration::days(7), now + Duration::days(11)),
            ReservationStatus::Active,
            BaseStayAmount::new(200.0),
            TaxAmount::new(50.0),
            CreatedAt::new(now),
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn create_find_cancel() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut connection = db.transact().await?;
        // timestamptz keeps microseconds; drop the nanosecond tail so the
        // round-tripped record compares equal
        let now = OffsetDateTime::now_utc().replace_nanosecond(0).unwrap();
        let reservation = sample(3001, now);
        let id = reservation.id().clone();

        PostgresReservationRepository
            .create(&mut connection, &reservation)
            .await?;

        let found = PostgresReservationRepository
            .find_by_id(&mut connection, &id)
            .await?;
        assert_eq!(found, Some(reservation.clone()));

        let cancelled = PostgresReservationRepository
            .cancel(&mut connection, &id)
            .await?
            .unwrap();
        assert_eq!(*cancelled.status(), ReservationStatus::Cancelled);

        // A second cancel still returns the row in its terminal state.
        let again = PostgresReservationRepository
            .cancel(&mut connection, &id)
            .await?
            .unwrap();
        assert_eq!(*again.status(), ReservationStatus::Cancelled);

        connection.roll_back().await?;
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn cancel_missing_id_is_none() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut connection = db.transact().await?;

        let missing = ReservationId::new(Uuid::new_v4());
        let cancelled = PostgresReservationRepository
            .cancel(&mut connection, &missing)
            .await?;
        assert!(cancelled.is_none());

        connection.roll_back().await?;
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn filter_is_applied_in_sql() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut connection = db.transact().await?;
        let now = OffsetDateTime::now_utc().replace_nanosecond(0).unwrap();
        let reservation = sample(3002, now);

        PostgresReservationRepository
            .create(&mut connection, &reservation)
            .await?;

        let guest = ReservationFilter::default().for_guest(GuestMemberId::new(3002i64));
        let found = PostgresReservationRepository
            .find(&mut connection, &guest)
            .await?;
        assert_eq!(found, vec![reservation.clone()]);

        // departure_date == bound is excluded by the half-open range
        let boundary = ReservationFilter::default()
            .for_guest(GuestMemberId::new(3002i64))
            .departing_before(reservation.stay_range().departure_date());
        let found = PostgresReservationRepository
            .find(&mut connection, &boundary)
            .await?;
        assert!(found.is_empty());

        connection.roll_back().await?;
        Ok(())
    }
}
