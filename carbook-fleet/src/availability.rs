use chrono::{DateTime, Utc};
use uuid::Uuid;

use carbook_shared::Booking;

/// Half-open interval overlap: `[a_start, a_end)` vs `[b_start, b_end)`.
/// Back-to-back windows (return at 10:00, next pickup at 10:00) do not clash.
pub fn windows_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Scan a car's bookings for one that blocks the requested window.
///
/// Only reserved and checked-out bookings occupy the calendar; cancelled and
/// returned ones never conflict. `exclude` skips the booking being edited so
/// a reschedule does not collide with itself.
pub fn find_conflict<'a>(
    bookings: &'a [Booking],
    pickup_at: DateTime<Utc>,
    return_at: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> Option<&'a Booking> {
    bookings.iter().find(|b| {
        b.status.blocks_car()
            && Some(b.id) != exclude
            && windows_overlap(b.pickup_at, b.return_at, pickup_at, return_at)
    })
}
