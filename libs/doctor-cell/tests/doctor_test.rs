use assert_matches::assert_matches;
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::models::{DoctorSearchFilters, Pagination, WorkingDay, WorkingHours};
use doctor_cell::services::{BookingCalendar, DoctorService, WorkingDayService};
use shared_api::ApiClient;
use shared_models::error::AppError;
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&TestConfig::with_api_url(server.uri()).to_app_config()).unwrap()
}

#[tokio::test]
async fn test_list_doctors_sends_pagination() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockBackendResponses::doctor_response(1),
            MockBackendResponses::doctor_response(2)
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = DoctorService::with_client(client_for(&mock_server));
    let page = Pagination::from_params(Some("2"), None);
    let doctors = service.list_doctors(page).await.unwrap();

    assert_eq!(doctors.len(), 2);
    assert_eq!(doctors[0].full_name(), "Karim Benali");
    assert_eq!(doctors[1].specialization_name.as_deref(), Some("Cardiology"));
}

#[tokio::test]
async fn test_list_doctors_null_body_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&mock_server)
        .await;

    let service = DoctorService::with_client(client_for(&mock_server));
    let doctors = service.list_doctors(Pagination::default()).await.unwrap();
    assert!(doctors.is_empty());
}

#[tokio::test]
async fn test_blank_working_days_body_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/working-days/7"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let service = WorkingDayService::with_client(client_for(&mock_server));
    let days = service.list(7, None).await.unwrap();
    assert!(days.is_empty());
}

#[tokio::test]
async fn test_get_doctor_profile() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::doctor_response(5)))
        .mount(&mock_server)
        .await;

    let service = DoctorService::with_client(client_for(&mock_server));
    let profile = service.get_doctor(5).await.unwrap();

    assert_eq!(profile.id, 5);
    assert_eq!(profile.assurances, vec!["CNAS", "CASNOS"]);
    assert_eq!(profile.position().latitude, 36.72);
    assert_eq!(profile.address(), "12 rue des Freres, Bab Ezzouar, Alger");
}

#[tokio::test]
async fn test_get_missing_doctor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(MockBackendResponses::error_response("Doctor not found")),
        )
        .mount(&mock_server)
        .await;

    let service = DoctorService::with_client(client_for(&mock_server));
    assert_matches!(service.get_doctor(404).await, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn test_search_passes_every_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/adv_search/search"))
        .and(query_param("specialite", "Cardiology"))
        .and(query_param("localization", "Oran"))
        .and(query_param("assurance", "CNAS"))
        .and(query_param("disponibilite", "Monday"))
        .and(query_param("name", "Benali"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "doctors": [MockBackendResponses::doctor_response(9)],
            "totalPages": 3
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = DoctorService::with_client(client_for(&mock_server));
    let filters = DoctorSearchFilters {
        name: "Benali".to_string(),
        specialite: "Cardiology".to_string(),
        localization: "Oran".to_string(),
        assurance: "CNAS".to_string(),
        disponibilite: "Monday".to_string(),
        pagination: Pagination::default(),
    };

    let results = service.search(&filters).await.unwrap();
    assert_eq!(results.total_pages, 3);
    assert_eq!(results.doctors[0].id, 9);
    assert_eq!(filters.pagination.next(results.total_pages).map(|p| p.page), Some(2));
}

#[tokio::test]
async fn test_search_defaults_total_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/adv_search/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"doctors": []})))
        .mount(&mock_server)
        .await;

    let service = DoctorService::with_client(client_for(&mock_server));
    let results = service.search(&DoctorSearchFilters::default()).await.unwrap();

    assert!(results.doctors.is_empty());
    assert_eq!(results.total_pages, 1);
}

#[tokio::test]
async fn test_vocabularies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/adv_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "specialities": {"1": "Cardiology"},
            "assurances": {"1": "CNAS"},
            "days_of_week": {"1": "Sunday", "2": "Monday"}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/specializations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Cardiology"},
            {"id": 2, "name": "Pediatrics"}
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/assurances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 4, "name": "CNAS"}])))
        .mount(&mock_server)
        .await;

    let service = DoctorService::with_client(client_for(&mock_server));

    let options = service.search_options().await.unwrap();
    assert_eq!(options.days_of_week, vec!["Sunday", "Monday"]);

    let specializations = service.specializations().await.unwrap();
    assert_eq!(specializations[1].name, "Pediatrics");

    let assurances = service.assurances().await.unwrap();
    assert_eq!(assurances[0].id, 4);
}

#[tokio::test]
async fn test_working_days_drive_the_calendar() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/working-days/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockBackendResponses::working_day_response(1, "Monday"),
            MockBackendResponses::working_day_response(2, "Wednesday")
        ])))
        .mount(&mock_server)
        .await;

    let service = WorkingDayService::with_client(client_for(&mock_server));
    let days = service.list(5, None).await.unwrap();
    assert_eq!(days[0].time_window().as_deref(), Some("09:00 - 13:00"));

    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let calendar = BookingCalendar::new(5, &days, today);

    assert_eq!(
        calendar.next_bookable(3),
        vec![
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 21).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 26).unwrap(),
        ]
    );
    assert_eq!(calendar.excluded_dates().len(), 365 - 104);
}

#[tokio::test]
async fn test_add_working_day_posts_batch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/working-days"))
        .and(header("authorization", "Bearer doc-token"))
        .and(body_json(json!([{
            "day_of_week": "Thursday",
            "daily_appointment_limit": 6,
            "hours": [{"hour_id": 1, "start_time": "08:00", "end_time": "12:00"}]
        }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "created"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = WorkingDayService::with_client(client_for(&mock_server));
    let day = WorkingDay {
        id: None,
        day_of_week: "Thursday".to_string(),
        daily_appointment_limit: 6,
        hours: vec![WorkingHours {
            hour_id: Some(1),
            start_time: "08:00".to_string(),
            end_time: "12:00".to_string(),
        }],
    };

    service.add(&day, "doc-token").await.unwrap();
}

#[tokio::test]
async fn test_add_invalid_working_day_is_rejected_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/working-days"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = WorkingDayService::with_client(client_for(&mock_server));
    let day = WorkingDay {
        id: None,
        day_of_week: "Thursday".to_string(),
        daily_appointment_limit: 6,
        hours: vec![],
    };

    assert_matches!(service.add(&day, "doc-token").await, Err(AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_delete_working_day() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/working-days/12"))
        .and(header("authorization", "Bearer doc-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = WorkingDayService::with_client(client_for(&mock_server));
    service.delete(12, "doc-token").await.unwrap();
}
