use std::sync::Arc;

use carbook_booking::{BookingManager, IssueService, RideMateService};
use carbook_core::identity::AccountService;
use carbook_fleet::FleetService;
use carbook_store::app_config::Config;
use carbook_store::{
    seed, KvBookingRepository, KvCarRepository, KvHandoverRepository, KvIssueRepository,
    KvRideMateRepository, KvSessionStore, KvStore, KvUserRepository, RemoteCarSource,
};

/// Everything the command handlers need, wired once at startup.
pub struct AppState {
    pub store: KvStore,
    pub accounts: AccountService,
    pub fleet: FleetService,
    pub bookings: BookingManager,
    pub ride_mates: RideMateService,
    pub issues: IssueService,
    pub remote: Option<RemoteCarSource>,
}

impl AppState {
    pub async fn init(config: &Config) -> anyhow::Result<Self> {
        let store = KvStore::open(config.store.dir.clone()).await?;

        if seed::initialize(&store).await? {
            tracing::info!("seeded demo data into {}", config.store.dir);
        }

        let users = Arc::new(KvUserRepository::new(store.clone()));
        let cars = Arc::new(KvCarRepository::new(store.clone()));
        let bookings = Arc::new(KvBookingRepository::new(store.clone()));
        let ride_mates = Arc::new(KvRideMateRepository::new(store.clone()));
        let handovers = Arc::new(KvHandoverRepository::new(store.clone()));
        let issues = Arc::new(KvIssueRepository::new(store.clone()));
        let session = Arc::new(KvSessionStore::new(store.clone()));

        let remote = config
            .remote
            .cars_url
            .as_ref()
            .map(|url| RemoteCarSource::new(url.clone(), store.clone()));

        Ok(Self {
            accounts: AccountService::new(users.clone(), session),
            fleet: FleetService::new(cars.clone(), bookings.clone()),
            bookings: BookingManager::new(
                bookings.clone(),
                cars.clone(),
                users.clone(),
                ride_mates.clone(),
                handovers.clone(),
            ),
            ride_mates: RideMateService::new(bookings, users.clone(), ride_mates),
            issues: IssueService::new(issues, cars, users),
            remote,
            store,
        })
    }
}
