use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Reservation, ReservationId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReservationModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        reservation: &Reservation,
    ) -> error_stack::Result<(), KernelError>;
    /// Flips the record to cancelled in one conditional update rather than a
    /// load-then-save cycle, so concurrent cancels cannot lose writes.
    /// Returns the updated record, or `None` when the id has no row. Calling
    /// this on an already cancelled reservation writes again and returns the
    /// row unchanged.
    async fn cancel(
        &self,
        con: &mut Self::Transaction,
        id: &ReservationId,
    ) -> error_stack::Result<Option<Reservation>, KernelError>;
}

pub trait DependOnReservationModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type ReservationModifier: ReservationModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn reservation_modifier(&self) -> &Self::ReservationModifier;
}
