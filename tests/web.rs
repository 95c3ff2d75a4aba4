use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::{json, Value};

use timetable_maker::web::{configure, AppState, WARNINGS_HEADER};
use timetable_maker::AppConfig;

fn full_week() -> Value {
    let mut classes = json!({});
    for n in 1..=8 {
        classes[n.to_string()] = json!({
            "name": format!("Class {}", n),
            "room": format!("Room {}", n),
            "teacher": format!("Teacher {}", n)
        });
    }
    classes
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(AppConfig::default())))
                .configure(configure),
        )
        .await
    };
}

#[actix_web::test]
async fn index_serves_the_form() {
    let app = app!();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("scheduleForm"));
}

#[actix_web::test]
async fn form_post_renders_responsive_svg() {
    let app = app!();
    let classes = full_week().to_string();
    let req = test::TestRequest::post()
        .uri("/generate")
        .set_form([("title", "My Week"), ("free_period_name", "Free"), ("classes", classes.as_str())])
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/svg+xml");

    let body = test::read_body(resp).await;
    let svg = std::str::from_utf8(&body).unwrap();
    assert!(svg.contains(r#"width="100%""#));
    assert!(svg.contains(">My Week</text>"));
}

#[actix_web::test]
async fn get_generate_redirects_home() {
    let app = app!();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/generate").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
}

#[actix_web::test]
async fn form_with_bad_json_is_rejected() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/generate")
        .set_form([("classes", "{not json")])
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "invalid_json");
}

#[actix_web::test]
async fn api_generate_reports_warning_count() {
    let app = app!();
    let mut classes = full_week();
    classes["2"] = json!({"name": ["Latin", "Greek"], "room": ["12"], "teacher": ["A", "B"]});

    let req = test::TestRequest::post()
        .uri("/api/generate")
        .set_json(json!({"classes": classes}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(WARNINGS_HEADER).unwrap(), "1");
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains(r#"width="3165""#));
}

#[actix_web::test]
async fn api_generate_validation_error_is_422() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/generate")
        .set_json(json!({"classes": {"1": {"name": "Only one"}}}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "too_many_empty_periods");
}

#[actix_web::test]
async fn api_generate_bad_key_is_422() {
    let app = app!();
    let mut classes = full_week();
    classes["lunch"] = json!({"name": "Pizza"});
    let req = test::TestRequest::post()
        .uri("/api/generate")
        .set_json(json!({"classes": classes}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "invalid_period_key");
}

#[actix_web::test]
async fn api_generate_control_character_is_500() {
    let app = app!();
    let mut classes = full_week();
    classes["4"] = json!({"name": "Bell\u{7}Choir"});
    let req = test::TestRequest::post()
        .uri("/api/generate")
        .set_json(json!({"classes": classes}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "unsupported_character");
}

#[actix_web::test]
async fn api_generate_malformed_body_is_400() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/generate")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"classes\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "invalid_json");
}

#[actix_web::test]
async fn import_events_formats_calendar() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/import_events")
        .set_json(json!({"events": [
            {"summary": "US History - 5* Block 5", "location": "20"},
            {"summary": "Graphic Design - 6 Block 6", "location": "214"},
            {"summary": "Assembly"}
        ]}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["schedule"]["5"]["name"], json!(["Foundations"]));
    assert_eq!(body["schedule"]["5"]["room"], json!(["VASC 20"]));
    assert_eq!(body["schedule"]["6"]["room"], json!(["USQuad 214"]));
    assert_eq!(body["unrecognized"], json!(["Assembly"]));
}

#[actix_web::test]
async fn defaults_prefill_the_form() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/defaults").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["title"], "Upper School Timetable");
    assert_eq!(body["free_period_name"], "Study Period");
    assert_eq!(body["classes"]["1"], "Class 1");
    assert_eq!(body["rooms"]["8"], "Room 8");
    assert_eq!(body["teachers"]["3"], "Teacher 3");
}
