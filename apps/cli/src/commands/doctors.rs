use anyhow::Result;
use chrono::NaiveDate;
use futures::try_join;
use tracing::debug;

use doctor_cell::{
    BookingCalendar, DoctorSearchFilters, DoctorService, Pagination, WorkingDayService,
};
use review_cell::ReviewService;
use shared_api::ApiClient;

use super::Context;
use crate::render;

pub async fn list(ctx: &Context, page: u32, limit: u32) -> Result<()> {
    let doctors = DoctorService::new(&ctx.config)?;
    let pagination = Pagination::from_params(Some(&page.to_string()), Some(&limit.to_string()));

    let cards = doctors.list_doctors(pagination).await?;
    if cards.is_empty() {
        println!("No doctors on page {}.", pagination.page);
        return Ok(());
    }

    println!("Page {}", pagination.page);
    for card in &cards {
        render::print_doctor_card(card);
    }
    Ok(())
}

pub async fn search(ctx: &Context, filters: DoctorSearchFilters) -> Result<()> {
    let doctors = DoctorService::new(&ctx.config)?;
    let results = doctors.search(&filters).await?;

    if results.doctors.is_empty() {
        println!("No doctors match these filters.");
        return Ok(());
    }

    for card in &results.doctors {
        render::print_doctor_card(card);
    }

    let pagination = filters.pagination;
    println!("Page {} of {}", pagination.page, results.total_pages);
    if let Some(next) = pagination.next(results.total_pages) {
        println!("More results with --page {}", next.page);
    }
    Ok(())
}

pub async fn search_options(ctx: &Context) -> Result<()> {
    let doctors = DoctorService::new(&ctx.config)?;
    let (options, specializations, assurances) = try_join!(
        doctors.search_options(),
        doctors.specializations(),
        doctors.assurances(),
    )?;

    render::print_list("Specialities", &options.specialities);
    render::print_list("Assurances", &options.assurances);
    render::print_list("Days", &options.days_of_week);

    // Ids are what `profile edit` expects.
    println!("Speciality ids:");
    for speciality in &specializations {
        println!("  {:>3} {}", speciality.id, speciality.name);
    }
    println!("Assurance ids:");
    for assurance in &assurances {
        println!("  {:>3} {}", assurance.id, assurance.name);
    }
    Ok(())
}

/// Profile page: the doctor, their working days, reviews and the next free dates.
pub async fn show(ctx: &Context, doctor_id: i64, dates: usize) -> Result<()> {
    let token = ctx.optional_token()?;
    let api = ApiClient::new(&ctx.config)?;
    let doctors = DoctorService::with_client(api.clone());
    let working_days = WorkingDayService::with_client(api.clone());
    let reviews = ReviewService::with_client(api);

    let (profile, days, ratings) = try_join!(
        doctors.get_doctor(doctor_id),
        working_days.list(doctor_id, token.as_deref()),
        reviews.reviews_for_doctor(doctor_id, token.as_deref()),
    )?;
    debug!("Loaded doctor {} with {} working days", doctor_id, days.len());

    render::print_doctor_profile(&profile);

    println!();
    println!("Working days:");
    if days.is_empty() {
        println!("  none declared");
    }
    for day in &days {
        render::print_working_day(day);
    }

    let calendar = BookingCalendar::new(doctor_id, &days, ctx.today())
        .with_horizon(ctx.config.booking_horizon_days);
    println!();
    render::print_dates("Next bookable dates", &calendar.next_bookable(dates));

    println!();
    render::print_reviews(&ratings);
    Ok(())
}

pub async fn excluded_dates(ctx: &Context, doctor_id: i64, from: Option<NaiveDate>) -> Result<()> {
    let token = ctx.optional_token()?;
    let working_days = WorkingDayService::new(&ctx.config)?;
    let days = working_days.list(doctor_id, token.as_deref()).await?;

    let calendar = BookingCalendar::new(doctor_id, &days, from.unwrap_or_else(|| ctx.today()))
        .with_horizon(ctx.config.booking_horizon_days);

    for date in calendar.excluded_dates() {
        println!("{}", date.format("%Y-%m-%d"));
    }
    Ok(())
}
