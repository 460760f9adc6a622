use anyhow::{bail, Result};
use chrono::{DateTime, Utc};

use carbook_booking::{HandoverReading, NewBooking};
use carbook_core::identity::ProfileUpdate;
use carbook_shared::{Booking, BookingDetails, Car, User};
use carbook_store::seed;

use crate::state::AppState;
use crate::{Commands, IssueAction, RidemateAction};

pub async fn run(command: Commands, state: &AppState) -> Result<()> {
    match command {
        Commands::Register { email, name, office } => {
            let user = state.accounts.register(&email, &name, office).await?;
            println!("Registered and signed in as {} <{}>", user.full_name, user.email);
        }

        Commands::Login { email } => {
            let user = state.accounts.login(&email).await?;
            println!("Signed in as {} <{}>", user.full_name, user.email);
        }

        Commands::Logout => {
            state.accounts.logout().await?;
            println!("Signed out");
        }

        Commands::Whoami => match state.accounts.current_user().await? {
            Some(user) => print_user(&user),
            None => println!("Not signed in"),
        },

        Commands::Profile { name, phone, share_phone, team, office } => {
            let user = require_user(state).await?;
            let updated = state
                .accounts
                .update_profile(
                    user.id,
                    ProfileUpdate {
                        full_name: name,
                        phone,
                        share_phone,
                        team,
                        home_office: office,
                    },
                )
                .await?;
            print_user(&updated);
        }

        Commands::Cars { from, to } => {
            let cars = match (from, to) {
                (Some(from), Some(to)) => state.fleet.available_cars(from, to).await?,
                _ => state.fleet.list_cars().await?,
            };
            if cars.is_empty() {
                println!("No cars");
            }
            for car in &cars {
                print_car(car);
            }
        }

        Commands::Car { id } => {
            let schedule = state.fleet.car_schedule(id).await?;
            print_car(&schedule.car);
            if schedule.bookings.is_empty() {
                println!("  no upcoming bookings");
            }
            for booking in &schedule.bookings {
                println!(
                    "  {} {:?} {} -> {}",
                    booking.id,
                    booking.status,
                    fmt_time(booking.pickup_at),
                    fmt_time(booking.return_at)
                );
            }
        }

        Commands::Book { car, from, to, pickup, destination, purpose, passengers } => {
            let user = require_user(state).await?;
            let booking = state
                .bookings
                .create(NewBooking {
                    car_id: car,
                    user_id: user.id,
                    pickup_at: from,
                    return_at: to,
                    pickup_location: pickup,
                    destination,
                    purpose,
                    passengers,
                })
                .await?;
            println!(
                "Reserved {} from {} to {}",
                booking.id,
                fmt_time(booking.pickup_at),
                fmt_time(booking.return_at)
            );
        }

        Commands::Bookings => {
            let user = require_user(state).await?;
            let bookings = state.bookings.user_bookings(user.id).await?;
            if bookings.is_empty() {
                println!("No bookings");
            }
            for details in &bookings {
                print_booking_line(&details.booking, details.car.as_ref());
            }
        }

        Commands::Booking { id } => {
            let details = state.bookings.booking_details(id).await?;
            print_booking_details(&details);
        }

        Commands::Cancel { id } => {
            state.bookings.cancel(id).await?;
            println!("Cancelled {id}");
        }

        Commands::Checkout { id, odometer, fuel } => {
            let handover = state
                .bookings
                .checkout(id, HandoverReading { odometer, fuel })
                .await?;
            println!("Checked out; handover {}", handover.id);
        }

        Commands::Return { id, odometer, fuel, notes } => {
            let handover = state
                .bookings
                .check_in(id, HandoverReading { odometer, fuel }, notes)
                .await?;
            println!(
                "Returned; odometer {} -> {}",
                handover.checkout_odometer.unwrap_or_default(),
                handover.return_odometer.unwrap_or_default()
            );
        }

        Commands::Ridemate { action } => run_ridemate(action, state).await?,

        Commands::Issue { action } => run_issue(action, state).await?,

        Commands::SyncCars => {
            let Some(remote) = &state.remote else {
                bail!("no remote car list configured (remote.cars_url)");
            };
            match remote.load().await {
                Some(list) => {
                    println!("Car list as of {}", list.updated_at);
                    for car in &list.cars {
                        println!("  {} {} ({} seats, {}, {:?})", car.plate, car.name, car.seats, car.base, car.status);
                    }
                }
                None => println!("Remote unreachable and nothing cached yet"),
            }
        }

        Commands::Reset { yes } => {
            if !yes {
                bail!("refusing to wipe the store without --yes");
            }
            seed::clear_all(&state.store).await?;
            println!("Store wiped");
        }
    }

    Ok(())
}

async fn run_ridemate(action: RidemateAction, state: &AppState) -> Result<()> {
    match action {
        RidemateAction::Request { booking, message } => {
            let user = require_user(state).await?;
            let request = state.ride_mates.request(booking, user.id, message).await?;
            println!("Requested to join; request {}", request.id);
        }

        RidemateAction::Approve { request } => {
            state.ride_mates.respond(request, true).await?;
            println!("Approved {request}");
        }

        RidemateAction::Decline { request } => {
            state.ride_mates.respond(request, false).await?;
            println!("Declined {request}");
        }

        RidemateAction::List { booking } => {
            let requests = state.ride_mates.requests_for(booking).await?;
            if requests.is_empty() {
                println!("No ride-mate requests");
            }
            for details in &requests {
                let name = details
                    .user
                    .as_ref()
                    .map(|u| u.full_name.as_str())
                    .unwrap_or("<unknown user>");
                println!(
                    "  {} {} {:?} {}",
                    details.request.id,
                    name,
                    details.request.status,
                    details.request.message.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}

async fn run_issue(action: IssueAction, state: &AppState) -> Result<()> {
    match action {
        IssueAction::Report { car, category, severity, description } => {
            let user = require_user(state).await?;
            let issue = state
                .issues
                .report(car, user.id, category, severity, description)
                .await?;
            println!("Filed issue {}", issue.id);
        }

        IssueAction::Progress { id, status } => {
            let issue = state.issues.set_status(id, status).await?;
            println!("Issue {} is now {:?}", issue.id, issue.status);
        }

        IssueAction::List { car } => {
            let issues = match car {
                Some(car) => state.issues.list_for_car(car).await?,
                None => state.issues.list().await?,
            };
            if issues.is_empty() {
                println!("No issues");
            }
            for issue in &issues {
                println!(
                    "  {} {:?}/{:?} {:?}: {}",
                    issue.id, issue.category, issue.severity, issue.status, issue.description
                );
            }
        }
    }

    Ok(())
}

async fn require_user(state: &AppState) -> Result<User> {
    match state.accounts.current_user().await? {
        Some(user) => Ok(user),
        None => bail!("not signed in (use `carbook login` or `carbook register`)"),
    }
}

fn fmt_time(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn print_user(user: &User) {
    println!("{} <{}>", user.full_name, user.email);
    println!("  office: {}", user.home_office);
    if let Some(team) = &user.team {
        println!("  team: {team}");
    }
    if let Some(phone) = &user.phone {
        let shared = if user.share_phone { "shared" } else { "private" };
        println!("  phone: {phone} ({shared})");
    }
}

fn print_car(car: &Car) {
    println!(
        "{} {} {} {} ({} seats, {}, {:?})",
        car.id, car.plate, car.make, car.model, car.seats, car.base, car.status
    );
}

fn print_booking_line(booking: &Booking, car: Option<&Car>) {
    let plate = car.map(|c| c.plate.as_str()).unwrap_or("<unknown car>");
    println!(
        "{} {} {:?} {} -> {} ({} -> {})",
        booking.id,
        plate,
        booking.status,
        fmt_time(booking.pickup_at),
        fmt_time(booking.return_at),
        booking.pickup_location,
        booking.destination
    );
}

fn print_booking_details(details: &BookingDetails) {
    print_booking_line(&details.booking, details.car.as_ref());
    if let Some(user) = &details.user {
        println!("  booked by {} <{}>", user.full_name, user.email);
    }
    if let Some(purpose) = &details.booking.purpose {
        println!("  purpose: {purpose}");
    }
    println!("  passengers: {}", details.booking.passengers);
    for mate in &details.ride_mates {
        let name = mate
            .user
            .as_ref()
            .map(|u| u.full_name.as_str())
            .unwrap_or("<unknown user>");
        println!("  ride mate: {} ({:?})", name, mate.request.status);
    }
    if let Some(handover) = &details.handover {
        println!(
            "  handover: out {}/{} back {}/{}",
            handover.checkout_odometer.unwrap_or_default(),
            handover.checkout_fuel.as_deref().unwrap_or("-"),
            handover.return_odometer.unwrap_or_default(),
            handover.return_fuel.as_deref().unwrap_or("-")
        );
    }
}
