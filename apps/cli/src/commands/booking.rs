use anyhow::{bail, Context as _, Result};
use chrono::NaiveDate;

use appointment_cell::AppointmentService;
use auth_cell::services::fetch_current_user;
use doctor_cell::{BookingCalendar, WorkingDayService};
use review_cell::{Review, ReviewService};
use shared_api::ApiClient;

use super::Context;
use crate::render;

pub async fn book(ctx: &Context, doctor_id: i64, date: NaiveDate, reason: Option<String>) -> Result<()> {
    let token = ctx.token()?;
    let api = ApiClient::new(&ctx.config)?;

    let days = WorkingDayService::with_client(api.clone())
        .list(doctor_id, Some(&token))
        .await?;
    if days.is_empty() {
        bail!("Doctor {} has no working days to book", doctor_id);
    }

    let calendar = BookingCalendar::new(doctor_id, &days, ctx.today())
        .with_horizon(ctx.config.booking_horizon_days);
    let selection = calendar.select(date)?;

    AppointmentService::with_client(api)
        .book(&selection, reason, &token)
        .await
        .context("Booking failed")?;

    println!(
        "Appointment requested for {} ({}).",
        selection.display_date(),
        selection.weekday_name()
    );
    Ok(())
}

pub async fn reviews(ctx: &Context, doctor_id: i64) -> Result<()> {
    let token = ctx.optional_token()?;
    let reviews = ReviewService::new(&ctx.config)?;
    let list = reviews.reviews_for_doctor(doctor_id, token.as_deref()).await?;
    render::print_reviews(&list);
    Ok(())
}

pub async fn rate(ctx: &Context, doctor_id: i64, note: u8, comment: String) -> Result<()> {
    let token = ctx.token()?;
    let api = ApiClient::new(&ctx.config)?;
    let patient = fetch_current_user(&api, &token).await?;
    let reviews = ReviewService::with_client(api);

    if let Some(previous) = reviews.last_review(patient.id, doctor_id, &token).await? {
        println!("Your previous rating: {}/5", previous.note);
    }

    let review = Review::new(doctor_id, patient.id, note, comment);
    reviews.submit(&review, &token).await?;

    println!("Thanks, your rating was recorded.");
    Ok(())
}
