use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{
    CancelReservationService, CreateReservationService, GetReservationService,
    GuestStaySummaryService, SearchStaysService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::reservation::request::{
    CancelReservationRequest, CreateReservationRequest, GetReservationRequest,
    GuestStaySummaryRequest, ReservationTransformer, SearchStaysRequest,
};
use crate::route::reservation::response::{CreatedReservationPresenter, ReservationPresenter};

mod request;
mod response;

pub trait ReservationRouter {
    fn route_reservation(self) -> Self;
}

impl ReservationRouter for Router<AppModule> {
    fn route_reservation(self) -> Self {
        self.route(
            "/reservations",
            get(|State(handler): State<AppModule>| async move {
                Controller::new((), ReservationPresenter)
                    .bypass(|| handler.pgpool().get_active_reservations())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(handler): State<AppModule>, Json(req): Json<CreateReservationRequest>| async move {
                    Controller::new(ReservationTransformer, CreatedReservationPresenter)
                        .try_intake(req)
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| handler.pgpool().create_reservation(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reservations/search-stays",
            get(
                |State(handler): State<AppModule>, Query(req): Query<SearchStaysRequest>| async move {
                    Controller::new(ReservationTransformer, ReservationPresenter)
                        .try_intake(req)
                        .map_err(ErrorStatus::from)?
                        .handle(|dto| handler.pgpool().search_stays(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reservations/guest-stay-summary/:guest_member_id",
            get(
                |State(handler): State<AppModule>, Path(guest_member_id): Path<i64>| async move {
                    Controller::new(ReservationTransformer, ReservationPresenter)
                        .intake(GuestStaySummaryRequest::new(guest_member_id))
                        .handle(|dto| handler.pgpool().guest_stay_summary(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reservations/:id",
            get(
                |State(handler): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(ReservationTransformer, ReservationPresenter)
                        .intake(GetReservationRequest::new(id))
                        .handle(|dto| handler.pgpool().get_reservation(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(handler): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(ReservationTransformer, ReservationPresenter)
                        .intake(CancelReservationRequest::new(id))
                        .handle(|dto| handler.pgpool().cancel_reservation(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
