use anyhow::{Context as _, Result};
use chrono::NaiveDate;

use appointment_cell::AppointmentService;
use auth_cell::services::fetch_current_user;
use doctor_cell::models::{WorkingDay, WorkingHours};
use doctor_cell::WorkingDayService;
use shared_api::ApiClient;

use super::Context;
use crate::render;

pub async fn list_working_days(ctx: &Context, doctor: Option<i64>) -> Result<()> {
    let api = ApiClient::new(&ctx.config)?;
    let token = ctx.optional_token()?;

    let doctor_id = match doctor {
        Some(id) => id,
        None => {
            let token = ctx.token()?;
            fetch_current_user(&api, &token).await?.id
        }
    };

    let days = WorkingDayService::with_client(api)
        .list(doctor_id, token.as_deref())
        .await?;

    if days.is_empty() {
        println!("No working days declared.");
    }
    for day in &days {
        render::print_working_day(day);
    }
    Ok(())
}

pub async fn add_working_day(
    ctx: &Context,
    day_of_week: String,
    daily_limit: u32,
    start_time: String,
    end_time: String,
) -> Result<()> {
    let token = ctx.token()?;
    let day = WorkingDay {
        id: None,
        day_of_week,
        daily_appointment_limit: daily_limit,
        hours: vec![WorkingHours {
            hour_id: None,
            start_time,
            end_time,
        }],
    };

    WorkingDayService::new(&ctx.config)?
        .add(&day, &token)
        .await
        .context("Could not add working day")?;

    println!("Added {}.", day.day_of_week);
    Ok(())
}

pub async fn delete_working_day(ctx: &Context, id: i64) -> Result<()> {
    let token = ctx.token()?;
    WorkingDayService::new(&ctx.config)?.delete(id, &token).await?;
    println!("Working day {} removed.", id);
    Ok(())
}

pub async fn agenda(ctx: &Context, date: Option<NaiveDate>) -> Result<()> {
    let token = ctx.token()?;
    let date = date.unwrap_or_else(|| ctx.today());

    let appointments = AppointmentService::new(&ctx.config)?
        .appointments_for_day(date, &token)
        .await?;

    render::print_agenda(date, &appointments);
    Ok(())
}

pub async fn complete(ctx: &Context, appointment_id: i64, date: Option<NaiveDate>) -> Result<()> {
    let token = ctx.token()?;
    let date = date.unwrap_or_else(|| ctx.today());
    let service = AppointmentService::new(&ctx.config)?;

    let mut agenda = service.appointments_for_day(date, &token).await?;
    service
        .complete(&mut agenda, appointment_id, &token)
        .await
        .context("Could not update the appointment")?;

    render::print_agenda(date, &agenda);
    Ok(())
}
