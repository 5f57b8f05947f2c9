use assert_matches::assert_matches;
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::models::{Appointment, AppointmentStatus};
use appointment_cell::AppointmentService;
use doctor_cell::models::{WorkingDay, WorkingHours};
use doctor_cell::services::BookingCalendar;
use shared_api::ApiClient;
use shared_models::error::AppError;
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

fn service_for(server: &MockServer) -> AppointmentService {
    let config = TestConfig::with_api_url(server.uri()).to_app_config();
    AppointmentService::with_client(ApiClient::new(&config).unwrap())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_appointments_for_day() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctor/appointments/day"))
        .and(query_param("date", "2026-03-07"))
        .and(header("authorization", "Bearer doc-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockBackendResponses::appointment_response(1, "pending"),
            MockBackendResponses::appointment_response(2, "cancelled")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let agenda = service
        .appointments_for_day(date(2026, 3, 7), "doc-token")
        .await
        .unwrap();

    assert_eq!(agenda.len(), 2);
    assert_eq!(agenda[0].status, AppointmentStatus::Pending);
    assert_eq!(agenda[1].status, AppointmentStatus::Cancelled);
    assert_eq!(agenda[0].patient_name(), "Lina Haddad");
}

#[tokio::test]
async fn test_empty_day() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctor/appointments/day"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let agenda = service
        .appointments_for_day(date(2026, 3, 8), "doc-token")
        .await
        .unwrap();
    assert!(agenda.is_empty());
}

#[tokio::test]
async fn test_blank_body_is_empty_day() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctor/appointments/day"))
        .and(query_param("date", "2026-03-09"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/doctor/appointments/day"))
        .and(query_param("date", "2026-03-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let blank = service
        .appointments_for_day(date(2026, 3, 9), "doc-token")
        .await
        .unwrap();
    assert!(blank.is_empty());

    let null = service
        .appointments_for_day(date(2026, 3, 10), "doc-token")
        .await
        .unwrap();
    assert!(null.is_empty());
}

#[tokio::test]
async fn test_complete_updates_local_agenda() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/doctor/appointments/2/status"))
        .and(body_json(json!({"status": "completed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "updated"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let mut agenda: Vec<Appointment> = vec![
        serde_json::from_value(MockBackendResponses::appointment_response(1, "pending")).unwrap(),
        serde_json::from_value(MockBackendResponses::appointment_response(2, "pending")).unwrap(),
    ];

    service.complete(&mut agenda, 2, "doc-token").await.unwrap();

    assert_eq!(agenda[0].status, AppointmentStatus::Pending);
    assert_eq!(agenda[1].status, AppointmentStatus::Completed);
}

#[tokio::test]
async fn test_failed_update_keeps_local_agenda() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/doctor/appointments/1/status"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(MockBackendResponses::error_response("Not your appointment")),
        )
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let mut agenda: Vec<Appointment> =
        vec![serde_json::from_value(MockBackendResponses::appointment_response(1, "pending")).unwrap()];

    let result = service.complete(&mut agenda, 1, "doc-token").await;

    assert_matches!(result, Err(AppError::Auth(_)));
    assert_eq!(agenda[0].status, AppointmentStatus::Pending);
}

#[tokio::test]
async fn test_book_selected_date() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/appointments"))
        .and(header("authorization", "Bearer patient-token"))
        .and(body_json(json!({
            "doctor_id": 5,
            "appointment_date": "2026-10-21",
            "working_day_id": 3,
            "reason": "Chest pain"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 77})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let days = vec![WorkingDay {
        id: Some(1),
        day_of_week: "Wednesday".to_string(),
        daily_appointment_limit: 10,
        hours: vec![WorkingHours {
            hour_id: Some(1),
            start_time: "09:00".to_string(),
            end_time: "12:00".to_string(),
        }],
    }];
    let calendar = BookingCalendar::new(5, &days, date(2026, 10, 18));
    let selection = calendar.select(date(2026, 10, 21)).unwrap();

    let service = service_for(&mock_server);
    service
        .book(&selection, Some("Chest pain".to_string()), "patient-token")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_book_full_day_conflict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/appointments"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(MockBackendResponses::error_response("Daily appointment limit reached")),
        )
        .mount(&mock_server)
        .await;

    let days = vec![WorkingDay {
        id: Some(1),
        day_of_week: "Sunday".to_string(),
        daily_appointment_limit: 1,
        hours: vec![],
    }];
    let calendar = BookingCalendar::new(5, &days, date(2026, 10, 18));
    let selection = calendar.select(date(2026, 10, 18)).unwrap();

    let service = service_for(&mock_server);
    let result = service.book(&selection, None, "patient-token").await;

    assert_matches!(result, Err(AppError::Conflict(msg)) if msg.contains("limit"));
}
