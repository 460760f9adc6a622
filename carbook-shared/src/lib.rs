pub mod models;

pub use models::views::{BookingDetails, CarSchedule, RideMateDetails};
pub use models::{
    Booking, BookingStatus, Car, CarStatus, CarTag, Handover, HomeOffice, Issue, IssueCategory,
    IssueSeverity, IssueStatus, RideMateRequest, RideMateStatus, User, UserRole,
};
