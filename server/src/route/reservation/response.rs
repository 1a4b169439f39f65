use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::OffsetDateTime;

use application::transfer::{CancelledStayInfo, GuestStaySummary, StayPartitionInfo};
use kernel::prelude::entity::{
    BaseStayAmount, DestructReservation, GuestMemberId, GuestName, HotelName, Reservation,
    ReservationId, ReservationStatus, TaxAmount,
};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    id: ReservationId,
    guest_member_id: GuestMemberId,
    guest_name: GuestName,
    hotel_name: HotelName,
    #[serde(with = "time::serde::rfc3339")]
    arrival_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    departure_date: OffsetDateTime,
    status: ReservationStatus,
    base_stay_amount: BaseStayAmount,
    tax_amount: TaxAmount,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        let DestructReservation {
            id,
            guest_member_id,
            guest_name,
            hotel_name,
            stay_range,
            status,
            base_stay_amount,
            tax_amount,
            created_at,
        } = reservation.into_destruct();
        Self {
            id,
            guest_member_id,
            guest_name,
            hotel_name,
            arrival_date: stay_range.arrival_date(),
            departure_date: stay_range.departure_date(),
            status,
            base_stay_amount,
            tax_amount,
            created_at: *created_at.as_ref(),
        }
    }
}

impl IntoResponse for ReservationResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedReservationResponse(ReservationResponse);

impl IntoResponse for CreatedReservationResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self.0)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StayPartitionInfoResponse {
    number_of_stays: usize,
    total_nights: f64,
    total_amount: f64,
}

impl From<StayPartitionInfo> for StayPartitionInfoResponse {
    fn from(info: StayPartitionInfo) -> Self {
        Self {
            number_of_stays: info.number_of_stays,
            total_nights: info.total_nights,
            total_amount: info.total_amount,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledStayInfoResponse {
    number_of_stays: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestStaySummaryResponse {
    guest_member_id: GuestMemberId,
    upcoming_stay_info: StayPartitionInfoResponse,
    past_stay_info: StayPartitionInfoResponse,
    cancelled_stay_info: CancelledStayInfoResponse,
    total_stays_amount: f64,
}

impl From<GuestStaySummary> for GuestStaySummaryResponse {
    fn from(summary: GuestStaySummary) -> Self {
        let GuestStaySummary {
            guest_member_id,
            upcoming_stay_info,
            past_stay_info,
            cancelled_stay_info: CancelledStayInfo { number_of_stays },
            total_stays_amount,
        } = summary;
        Self {
            guest_member_id,
            upcoming_stay_info: upcoming_stay_info.into(),
            past_stay_info: past_stay_info.into(),
            cancelled_stay_info: CancelledStayInfoResponse { number_of_stays },
            total_stays_amount,
        }
    }
}

impl IntoResponse for GuestStaySummaryResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct ReservationPresenter;

impl Exhaust<Reservation> for ReservationPresenter {
    type To = ReservationResponse;
    fn emit(&self, input: Reservation) -> Self::To {
        input.into()
    }
}

impl Exhaust<Vec<Reservation>> for ReservationPresenter {
    type To = axum::Json<Vec<ReservationResponse>>;
    fn emit(&self, input: Vec<Reservation>) -> Self::To {
        let result = input
            .into_iter()
            .map(ReservationResponse::from)
            .collect::<Vec<_>>();
        axum::Json::from(result)
    }
}

impl Exhaust<GuestStaySummary> for ReservationPresenter {
    type To = GuestStaySummaryResponse;
    fn emit(&self, input: GuestStaySummary) -> Self::To {
        input.into()
    }
}

pub struct CreatedReservationPresenter;

impl Exhaust<Reservation> for CreatedReservationPresenter {
    type To = CreatedReservationResponse;
    fn emit(&self, input: Reservation) -> Self::To {
        CreatedReservationResponse(input.into())
    }
}
