mod amount;
mod guest;
mod hotel;
mod id;
mod status;
mod stay;

pub use self::{amount::*, guest::*, hotel::*, id::*, status::*, stay::*};
use crate::entity::common::CreatedAt;
use destructure::{Destructure, Mutation};
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Destructure, Mutation, References)]
pub struct Reservation {
    id: ReservationId,
    guest_member_id: GuestMemberId,
    guest_name: GuestName,
    hotel_name: HotelName,
    stay_range: StayRange,
    status: ReservationStatus,
    base_stay_amount: BaseStayAmount,
    tax_amount: TaxAmount,
    created_at: CreatedAt<Reservation>,
}

impl Reservation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ReservationId,
        guest_member_id: GuestMemberId,
        guest_name: GuestName,
        hotel_name: HotelName,
        stay_range: StayRange,
        status: ReservationStatus,
        base_stay_amount: BaseStayAmount,
        tax_amount: TaxAmount,
        created_at: CreatedAt<Reservation>,
    ) -> Self {
        Self {
            id,
            guest_member_id,
            guest_name,
            hotel_name,
            stay_range,
            status,
            base_stay_amount,
            tax_amount,
            created_at,
        }
    }

    /// Base stay amount and tax combined.
    pub fn total_amount(&self) -> f64 {
        self.base_stay_amount.as_ref() + self.tax_amount.as_ref()
    }
}
