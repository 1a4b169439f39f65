use error_stack::{Report, ResultExt};
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use application::transfer::{
    CancelReservationDto, CreateReservationDto, GetReservationDto, GuestStaySummaryDto,
    SearchStaysDto,
};
use kernel::prelude::entity::{
    BaseStayAmount, GuestMemberId, GuestName, HotelName, ReservationId, StayRange, TaxAmount,
};
use kernel::KernelError;

use crate::controller::{Intake, TryIntake};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    guest_member_id: i64,
    guest_name: String,
    hotel_name: String,
    arrival_date: String,
    departure_date: String,
    /// Accepted for compatibility with existing clients but never honored;
    /// a new reservation always starts out active.
    #[serde(default)]
    status: Option<String>,
    base_stay_amount: f64,
    tax_amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct SearchStaysRequest {
    start: String,
    end: String,
}

#[derive(Debug)]
pub struct GetReservationRequest {
    id: Uuid,
}

impl GetReservationRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct CancelReservationRequest {
    id: Uuid,
}

impl CancelReservationRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct GuestStaySummaryRequest {
    guest_member_id: i64,
}

impl GuestStaySummaryRequest {
    pub fn new(guest_member_id: i64) -> Self {
        Self { guest_member_id }
    }
}

/// Parses an RFC 3339 timestamp, or a plain `YYYY-MM-DD` taken as midnight
/// UTC.
fn parse_stay_date(field: &str, value: &str) -> error_stack::Result<OffsetDateTime, KernelError> {
    if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(parsed);
    }
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map(|date| date.midnight().assume_utc())
        .change_context_lazy(|| KernelError::InvalidInput)
        .attach_printable_lazy(|| format!("{field} is not a valid date: {value}"))
}

fn non_blank(field: &str, value: String) -> error_stack::Result<String, KernelError> {
    if value.trim().is_empty() {
        return Err(Report::new(KernelError::InvalidInput)
            .attach_printable(format!("{field} must not be empty")));
    }
    Ok(value)
}

fn positive(field: &str, value: f64) -> error_stack::Result<f64, KernelError> {
    if !(value > 0.0) {
        return Err(Report::new(KernelError::InvalidInput)
            .attach_printable(format!("{field} must be a positive number")));
    }
    Ok(value)
}

pub struct ReservationTransformer;

impl TryIntake<CreateReservationRequest> for ReservationTransformer {
    type To = CreateReservationDto;
    type Error = Report<KernelError>;

    fn emit(&self, input: CreateReservationRequest) -> Result<Self::To, Self::Error> {
        let CreateReservationRequest {
            guest_member_id,
            guest_name,
            hotel_name,
            arrival_date,
            departure_date,
            status: _client_status,
            base_stay_amount,
            tax_amount,
        } = input;

        if guest_member_id <= 0 {
            return Err(Report::new(KernelError::InvalidInput)
                .attach_printable("guestMemberId must be a positive integer"));
        }
        let guest_name = non_blank("guestName", guest_name)?;
        let hotel_name = non_blank("hotelName", hotel_name)?;
        let arrival_date = parse_stay_date("arrivalDate", &arrival_date)?;
        let departure_date = parse_stay_date("departureDate", &departure_date)?;
        let base_stay_amount = positive("baseStayAmount", base_stay_amount)?;
        let tax_amount = positive("taxAmount", tax_amount)?;

        Ok(CreateReservationDto {
            guest_member_id: GuestMemberId::new(guest_member_id),
            guest_name: GuestName::new(guest_name),
            hotel_name: HotelName::new(hotel_name),
            stay_range: StayRange::new(arrival_date, departure_date),
            base_stay_amount: BaseStayAmount::new(base_stay_amount),
            tax_amount: TaxAmount::new(tax_amount),
        })
    }
}

impl TryIntake<SearchStaysRequest> for ReservationTransformer {
    type To = SearchStaysDto;
    type Error = Report<KernelError>;

    fn emit(&self, input: SearchStaysRequest) -> Result<Self::To, Self::Error> {
        Ok(SearchStaysDto {
            start: parse_stay_date("start", &input.start)?,
            end: parse_stay_date("end", &input.end)?,
        })
    }
}

impl Intake<GetReservationRequest> for ReservationTransformer {
    type To = GetReservationDto;
    fn emit(&self, input: GetReservationRequest) -> Self::To {
        GetReservationDto {
            id: ReservationId::new(input.id),
        }
    }
}

impl Intake<CancelReservationRequest> for ReservationTransformer {
    type To = CancelReservationDto;
    fn emit(&self, input: CancelReservationRequest) -> Self::To {
        CancelReservationDto {
            id: ReservationId::new(input.id),
        }
    }
}

impl Intake<GuestStaySummaryRequest> for ReservationTransformer {
    type To = GuestStaySummaryDto;
    fn emit(&self, input: GuestStaySummaryRequest) -> Self::To {
        GuestStaySummaryDto {
            guest_member_id: GuestMemberId::new(input.guest_member_id),
        }
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use kernel::prelude::entity::{GuestMemberId, GuestName, HotelName};

    use crate::controller::TryIntake;

    use super::{CreateReservationRequest, ReservationTransformer, SearchStaysRequest};

    fn valid_request() -> CreateReservationRequest {
        serde_json::from_value(serde_json::json!({
            "guestMemberId": 123,
            "guestName": "John Doe",
            "hotelName": "Sample Hotel",
            "arrivalDate": "2023-01-01",
            "departureDate": "2023-01-05",
            "baseStayAmount": 200.0,
            "taxAmount": 50.0
        }))
        .unwrap()
    }

    #[test]
    fn valid_payload_becomes_dto() {
        let dto = ReservationTransformer.emit(valid_request()).unwrap();
        assert_eq!(dto.guest_member_id, GuestMemberId::new(123i64));
        assert_eq!(dto.guest_name, GuestName::new("John Doe"));
        assert_eq!(dto.hotel_name, HotelName::new("Sample Hotel"));
        // date-only input is taken as midnight UTC
        assert_eq!(
            dto.stay_range.arrival_date(),
            datetime!(2023-01-01 00:00 UTC)
        );
        assert_eq!(dto.stay_range.nights(), 4.0);
    }

    #[test]
    fn client_supplied_status_is_ignored() {
        let request: CreateReservationRequest = serde_json::from_value(serde_json::json!({
            "guestMemberId": 123,
            "guestName": "John Doe",
            "hotelName": "Sample Hotel",
            "arrivalDate": "2023-01-01",
            "departureDate": "2023-01-05",
            "status": "cancelled",
            "baseStayAmount": 200.0,
            "taxAmount": 50.0
        }))
        .unwrap();
        // the DTO carries no status at all; the service always starts active
        assert!(ReservationTransformer.emit(request).is_ok());
    }

    #[test]
    fn rfc3339_dates_are_accepted() {
        let request = CreateReservationRequest {
            arrival_date: "2023-01-01T15:30:00Z".to_string(),
            ..valid_request()
        };
        let dto = ReservationTransformer.emit(request).unwrap();
        assert_eq!(
            dto.stay_range.arrival_date(),
            datetime!(2023-01-01 15:30 UTC)
        );
    }

    #[test]
    fn malformed_date_is_rejected() {
        let request = CreateReservationRequest {
            arrival_date: "not-a-date".to_string(),
            ..valid_request()
        };
        assert!(ReservationTransformer.emit(request).is_err());
    }

    #[test]
    fn blank_guest_name_is_rejected() {
        let request = CreateReservationRequest {
            guest_name: "   ".to_string(),
            ..valid_request()
        };
        assert!(ReservationTransformer.emit(request).is_err());
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let request = CreateReservationRequest {
            base_stay_amount: 0.0,
            ..valid_request()
        };
        assert!(ReservationTransformer.emit(request).is_err());

        let request = CreateReservationRequest {
            tax_amount: -1.0,
            ..valid_request()
        };
        assert!(ReservationTransformer.emit(request).is_err());
    }

    #[test]
    fn non_positive_guest_member_id_is_rejected() {
        let request = CreateReservationRequest {
            guest_member_id: 0,
            ..valid_request()
        };
        assert!(ReservationTransformer.emit(request).is_err());
    }

    #[test]
    fn search_bounds_parse_both_formats() {
        let dto = ReservationTransformer
            .emit(SearchStaysRequest {
                start: "2023-01-01".to_string(),
                end: "2023-06-30T12:00:00Z".to_string(),
            })
            .unwrap();
        assert_eq!(dto.start, datetime!(2023-01-01 00:00 UTC));
        assert_eq!(dto.end, datetime!(2023-06-30 12:00 UTC));

        let malformed = ReservationTransformer.emit(SearchStaysRequest {
            start: "2023-13-01".to_string(),
            end: "2023-06-30".to_string(),
        });
        assert!(malformed.is_err());
    }
}
