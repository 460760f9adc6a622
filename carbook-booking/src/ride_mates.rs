use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use carbook_core::repository::{BookingRepository, RideMateRepository, UserRepository};
use carbook_core::RepoError;
use carbook_shared::{RideMateDetails, RideMateRequest, RideMateStatus};

#[derive(Debug, thiserror::Error)]
pub enum RideMateError {
    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),

    #[error("Request not found: {0}")]
    RequestNotFound(Uuid),

    #[error("The booking owner cannot join their own ride")]
    OwnBooking,

    #[error("User already has a live request on this booking")]
    DuplicateRequest,

    #[error("Request was already {0:?}")]
    AlreadyResolved(RideMateStatus),

    #[error("Storage failure: {0}")]
    Storage(#[from] RepoError),
}

/// Join-a-ride flow: a second user asks onto an existing booking, the booker
/// approves or declines.
pub struct RideMateService {
    bookings: Arc<dyn BookingRepository>,
    users: Arc<dyn UserRepository>,
    ride_mates: Arc<dyn RideMateRepository>,
}

impl RideMateService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        users: Arc<dyn UserRepository>,
        ride_mates: Arc<dyn RideMateRepository>,
    ) -> Self {
        Self {
            bookings,
            users,
            ride_mates,
        }
    }

    /// File a request to join. One live (non-declined) request per user and
    /// booking; the booker cannot request their own ride.
    pub async fn request(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        message: Option<String>,
    ) -> Result<RideMateRequest, RideMateError> {
        let booking = self
            .bookings
            .get_booking(booking_id)
            .await?
            .ok_or(RideMateError::BookingNotFound(booking_id))?;

        if booking.user_id == user_id {
            return Err(RideMateError::OwnBooking);
        }

        let existing = self.ride_mates.list_for_booking(booking_id).await?;
        if existing
            .iter()
            .any(|r| r.user_id == user_id && r.status != RideMateStatus::Declined)
        {
            return Err(RideMateError::DuplicateRequest);
        }

        let request = RideMateRequest {
            id: Uuid::new_v4(),
            booking_id,
            user_id,
            status: RideMateStatus::Requested,
            message,
            created_at: Utc::now(),
        };
        self.ride_mates.insert_request(&request).await?;
        info!(booking = %booking_id, user = %user_id, "ride-mate requested");
        Ok(request)
    }

    /// Resolve a pending request.
    pub async fn respond(
        &self,
        request_id: Uuid,
        approve: bool,
    ) -> Result<RideMateRequest, RideMateError> {
        let mut request = self
            .ride_mates
            .get_request(request_id)
            .await?
            .ok_or(RideMateError::RequestNotFound(request_id))?;

        if request.status != RideMateStatus::Requested {
            return Err(RideMateError::AlreadyResolved(request.status));
        }

        request.status = if approve {
            RideMateStatus::Approved
        } else {
            RideMateStatus::Declined
        };

        self.ride_mates
            .save_request(&request)
            .await?
            .ok_or(RideMateError::RequestNotFound(request_id))?;
        Ok(request)
    }

    /// Requests on a booking with requester details joined.
    pub async fn requests_for(
        &self,
        booking_id: Uuid,
    ) -> Result<Vec<RideMateDetails>, RideMateError> {
        let mut details = Vec::new();
        for request in self.ride_mates.list_for_booking(booking_id).await? {
            let user = self.users.get_user(request.user_id).await?;
            details.push(RideMateDetails { request, user });
        }
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBooking;
    use crate::test_support::TestEnv;
    use chrono::Duration;

    async fn booked(env: &TestEnv) -> Uuid {
        let pickup = Utc::now() + Duration::hours(24);
        env.manager()
            .create(NewBooking {
                car_id: env.car.id,
                user_id: env.user.id,
                pickup_at: pickup,
                return_at: pickup + Duration::hours(8),
                pickup_location: "Dubai Office".to_string(),
                destination: "Al Ain".to_string(),
                purpose: None,
                passengers: 2,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_request_and_approve() {
        let env = TestEnv::new().await;
        let svc = env.ride_mate_service();
        let booking_id = booked(&env).await;

        let request = svc
            .request(booking_id, env.mate.id, Some("Heading the same way".to_string()))
            .await
            .unwrap();
        assert_eq!(request.status, RideMateStatus::Requested);

        let resolved = svc.respond(request.id, true).await.unwrap();
        assert_eq!(resolved.status, RideMateStatus::Approved);

        let details = svc.requests_for(booking_id).await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].user.as_ref().unwrap().id, env.mate.id);
    }

    #[tokio::test]
    async fn test_owner_cannot_join_own_ride() {
        let env = TestEnv::new().await;
        let svc = env.ride_mate_service();
        let booking_id = booked(&env).await;

        let err = svc.request(booking_id, env.user.id, None).await.unwrap_err();
        assert!(matches!(err, RideMateError::OwnBooking));
    }

    #[tokio::test]
    async fn test_duplicate_live_request_rejected() {
        let env = TestEnv::new().await;
        let svc = env.ride_mate_service();
        let booking_id = booked(&env).await;

        svc.request(booking_id, env.mate.id, None).await.unwrap();
        let err = svc.request(booking_id, env.mate.id, None).await.unwrap_err();
        assert!(matches!(err, RideMateError::DuplicateRequest));
    }

    #[tokio::test]
    async fn test_declined_request_can_be_retried() {
        let env = TestEnv::new().await;
        let svc = env.ride_mate_service();
        let booking_id = booked(&env).await;

        let request = svc.request(booking_id, env.mate.id, None).await.unwrap();
        svc.respond(request.id, false).await.unwrap();

        // A declined request does not block asking again.
        svc.request(booking_id, env.mate.id, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_respond_twice_rejected() {
        let env = TestEnv::new().await;
        let svc = env.ride_mate_service();
        let booking_id = booked(&env).await;

        let request = svc.request(booking_id, env.mate.id, None).await.unwrap();
        svc.respond(request.id, true).await.unwrap();

        let err = svc.respond(request.id, false).await.unwrap_err();
        assert!(matches!(err, RideMateError::AlreadyResolved(RideMateStatus::Approved)));
    }
}
