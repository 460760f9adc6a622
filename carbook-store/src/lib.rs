pub mod app_config;
pub mod booking_repo;
pub mod car_repo;
pub mod handover_repo;
pub mod issue_repo;
pub mod kv;
pub mod remote;
pub mod ride_mate_repo;
pub mod seed;
pub mod session;
pub mod user_repo;

pub use booking_repo::KvBookingRepository;
pub use car_repo::KvCarRepository;
pub use handover_repo::KvHandoverRepository;
pub use issue_repo::KvIssueRepository;
pub use kv::{KvStore, StoreError};
pub use remote::{RemoteCar, RemoteCarList, RemoteCarSource, RemoteCarStatus};
pub use ride_mate_repo::KvRideMateRepository;
pub use session::KvSessionStore;
pub use user_repo::KvUserRepository;
