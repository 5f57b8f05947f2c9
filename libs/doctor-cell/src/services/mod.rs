pub mod availability;
pub mod doctor;
pub mod working_days;

pub use availability::{BookingCalendar, BookingSelection};
pub use doctor::DoctorService;
pub use working_days::WorkingDayService;
