use chrono::NaiveDate;

use appointment_cell::Appointment;
use doctor_cell::models::{rating_stars, DoctorProfile, DoctorSummary, WorkingDay};
use profile_cell::ProfileView;
use review_cell::ReviewList;
use shared_models::auth::User;

pub fn print_user(user: &User) {
    println!("{} (@{})", user.full_name(), user.username);
    println!("  email: {}", user.email);
    if let Some(phone) = &user.phone_number {
        println!("  phone: {}", phone);
    }
    println!("  account: {}", if user.is_doctor { "doctor" } else { "patient" });
}

pub fn print_doctor_card(doctor: &DoctorSummary) {
    let rating = doctor.rating.unwrap_or(0.0);
    println!(
        "#{:<5} Dr. {:<30} {} {:.1}",
        doctor.id,
        doctor.full_name(),
        rating_stars(rating),
        rating
    );

    let place = [doctor.city.as_deref(), doctor.state.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "       {} | {}",
        doctor.specialization_name.as_deref().unwrap_or("General practice"),
        if place.is_empty() { "-" } else { place.as_str() }
    );
}

pub fn print_doctor_profile(doctor: &DoctorProfile) {
    let rating = doctor.rating.unwrap_or(0.0);
    println!("Dr. {}", doctor.full_name());
    println!("  rating: {} {:.1}", rating_stars(rating), rating);
    if let Some(speciality) = &doctor.specialization_name {
        println!("  speciality: {}", speciality);
    }
    if let Some(price) = doctor.visit_price {
        println!("  visit price: {:.0} DA", price);
    }

    let address = doctor.address();
    if !address.is_empty() {
        println!("  address: {}", address);
    }
    let position = doctor.position();
    println!("  map: {:.6}, {:.6}", position.latitude, position.longitude);

    if !doctor.assurances.is_empty() {
        println!("  assurances: {}", doctor.assurances.join(", "));
    }
}

pub fn print_working_day(day: &WorkingDay) {
    let id = day.id.map(|id| format!("#{} ", id)).unwrap_or_default();
    println!(
        "  {}{:<10} {} (max {} per day)",
        id,
        day.day_of_week,
        day.time_window().unwrap_or_else(|| "no hours set".to_string()),
        day.daily_appointment_limit
    );
}

pub fn print_dates(title: &str, dates: &[NaiveDate]) {
    println!("{}:", title);
    if dates.is_empty() {
        println!("  none");
    }
    for date in dates {
        println!("  {}", date.format("%A %d/%m/%Y"));
    }
}

pub fn print_list(title: &str, values: &[String]) {
    println!("{}:", title);
    for value in values {
        println!("  {}", value);
    }
}

pub fn print_reviews(list: &ReviewList) {
    println!("Reviews ({}):", list.reviews.len());
    let mut comments = list.comments().peekable();
    if comments.peek().is_none() {
        println!("  no comments yet");
    }
    for review in comments {
        println!("  {} {}", rating_stars(f64::from(review.note)), review.comment);
    }
}

pub fn print_agenda(date: NaiveDate, appointments: &[Appointment]) {
    println!("Appointments on {}:", date.format("%d/%m/%Y"));
    if appointments.is_empty() {
        println!("  none");
    }
    for appointment in appointments {
        println!(
            "  #{:<5} {:<25} {:<10} {}",
            appointment.id,
            appointment.patient_name(),
            appointment.status.to_string(),
            appointment.reason_or_default()
        );
    }
}

pub fn print_profile(view: &ProfileView) {
    print_user(&view.user);
    if let Some(doctor) = &view.doctor {
        println!();
        print_doctor_profile(doctor);
        if let Some(languages) = &doctor.spoken_languages {
            println!("  languages: {}", languages);
        }
        if let Some(link) = doctor.zoom_link.as_deref().filter(|l| !l.is_empty()) {
            println!("  video link: {}", link);
        }
    }
}
