use std::env;

use attendance_backend::dto::event_dto::CreateEventPayload;
use attendance_backend::dto::student_dto::{
    BulkImportPayload, BulkStudentRow, CreateStudentPayload,
};
use attendance_backend::error::Error;
use attendance_backend::AppState;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value as JsonValue};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

fn init_test_config() {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("SCAN_RPS", "100");
    env::set_var("ADMIN_PASSWORD", "hunter2hunter2");
    // Tests in one binary share the OnceLock; first caller wins.
    let _ = attendance_backend::config::init_config();
}

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");
    pool
}

#[tokio::test]
async fn login_issues_token_the_middleware_accepts() {
    init_test_config();
    let pool = test_pool().await;
    let state = AppState::new(pool);
    state.auth_service.ensure_default_admin().await.unwrap();

    let app = Router::new()
        .route("/api/auth/login", post(attendance_backend::routes::auth::login))
        .merge(
            Router::new()
                .route("/api/auth/me", get(attendance_backend::routes::auth::me))
                .layer(axum::middleware::from_fn(
                    attendance_backend::middleware::auth::require_bearer_auth,
                )),
        )
        .with_state(state);

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({ "username": "admin", "password": "hunter2hunter2" }))
                .unwrap(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    let token = body["token"].as_str().expect("token").to_string();
    assert_eq!(body["admin"]["username"], "admin");

    let request = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["admin"]["username"], "admin");

    // wrong password and missing token are both rejected
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({ "username": "admin", "password": "wrong" })).unwrap(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_student_registration_conflicts() {
    init_test_config();
    let pool = test_pool().await;
    let state = AppState::new(pool);

    let payload = CreateStudentPayload {
        roll_no: "cs101".into(),
        name: "Alice".into(),
        department: Some("CS".into()),
        year: Some(2),
    };
    let student = state.student_service.create(payload.clone()).await.unwrap();
    assert_eq!(student.roll_no, "CS101");

    match state.student_service.create(payload).await {
        Err(Error::Conflict(msg)) => assert!(msg.contains("CS101")),
        other => panic!("expected Conflict, got {:?}", other.map(|s| s.roll_no)),
    }
}

#[tokio::test]
async fn bulk_import_counts_added_and_skipped() {
    init_test_config();
    let pool = test_pool().await;
    let state = AppState::new(pool);

    state
        .student_service
        .create(CreateStudentPayload {
            roll_no: "CS300".into(),
            name: "Existing".into(),
            department: None,
            year: None,
        })
        .await
        .unwrap();

    let summary = state
        .student_service
        .bulk_import(BulkImportPayload {
            students: vec![
                BulkStudentRow {
                    roll_no: Some("cs301".into()),
                    name: Some("One".into()),
                    department: Some("CS".into()),
                    year: Some(1),
                },
                BulkStudentRow {
                    roll_no: Some("CS300".into()), // duplicate
                    name: Some("Existing".into()),
                    department: None,
                    year: None,
                },
                BulkStudentRow {
                    roll_no: None, // invalid
                    name: Some("No Roll".into()),
                    department: None,
                    year: None,
                },
            ],
        })
        .await
        .unwrap();

    assert_eq!(summary.added, 1);
    assert_eq!(summary.skipped, 2);

    let listed = state.student_service.list(Some("cs3".into())).await.unwrap();
    assert_eq!(listed.len(), 2);
}

async fn seed_event(state: &AppState) -> i64 {
    state
        .event_service
        .create(CreateEventPayload {
            title: "Demo Day".into(),
            description: None,
            event_date: "2025-04-01".into(),
            start_time: "2025-04-01T10:00:00Z".into(),
            end_time: "2025-04-01T12:00:00Z".into(),
            duration_minutes: 120,
            min_attendance_percent: None,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn stats_reflect_committed_ledger_state() {
    init_test_config();
    let pool = test_pool().await;
    let state = AppState::new(pool);
    let event_id = seed_event(&state).await;

    for (roll, status) in [("S1", "PRESENT"), ("S2", "PRESENT"), ("S3", "PENDING")] {
        state
            .student_service
            .create(CreateStudentPayload {
                roll_no: roll.into(),
                name: roll.into(),
                department: None,
                year: None,
            })
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO attendance_logs (roll_no, event_id, check_in_time, status) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(roll)
        .bind(event_id)
        .bind(Utc::now())
        .bind(status)
        .execute(&state.pool)
        .await
        .unwrap();
    }

    let stats = state.event_service.stats(event_id).await.unwrap();
    assert_eq!(stats.total_scans, 3);
    assert_eq!(stats.present, 2);
    assert_eq!(stats.absent, 0);
    assert_eq!(stats.pending, 1);

    // default min percent applied at creation
    let event = state.event_service.get_by_id(event_id).await.unwrap();
    assert_eq!(event.min_attendance_percent, 75.0);
    assert!(!event.session_token.is_empty());
}

#[tokio::test]
async fn export_carries_the_report_columns() {
    init_test_config();
    let pool = test_pool().await;
    let state = AppState::new(pool);
    let event_id = seed_event(&state).await;

    state
        .student_service
        .create(CreateStudentPayload {
            roll_no: "CS101".into(),
            name: "Alice".into(),
            department: Some("CS".into()),
            year: Some(3),
        })
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO attendance_logs \
         (roll_no, event_id, check_in_time, check_out_time, duration_minutes, status) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind("CS101")
    .bind(event_id)
    .bind(Utc::now())
    .bind(Utc::now())
    .bind(95.5_f64)
    .bind("PRESENT")
    .execute(&state.pool)
    .await
    .unwrap();

    let event = state.event_service.get_by_id(event_id).await.unwrap();
    let export = state.export_service.export_event_csv(&event).await.unwrap();
    let text = String::from_utf8(export.data).unwrap();

    assert!(text.starts_with(
        "Roll No,Student Name,Department,Year,Check-In Time,Check-Out Time,Duration (min),Status"
    ));
    assert!(text.contains("CS101,Alice,CS,3,"));
    assert!(text.contains("95.5,PRESENT"));
    assert_eq!(export.filename, "attendance_Demo_Day_2025-04-01.csv");
}

#[tokio::test]
async fn event_update_and_delete_cascade() {
    init_test_config();
    let pool = test_pool().await;
    let state = AppState::new(pool);
    let event_id = seed_event(&state).await;

    let updated = state
        .event_service
        .update(
            event_id,
            attendance_backend::dto::event_dto::UpdateEventPayload {
                title: Some("Demo Day v2".into()),
                description: None,
                event_date: None,
                start_time: None,
                end_time: None,
                duration_minutes: None,
                min_attendance_percent: Some(50.0),
                is_active: Some(false),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Demo Day v2");
    assert_eq!(updated.min_attendance_percent, 50.0);
    assert!(!updated.is_active);
    // untouched fields retained
    assert_eq!(updated.duration_minutes, 120);

    state
        .student_service
        .create(CreateStudentPayload {
            roll_no: "X1".into(),
            name: "X".into(),
            department: None,
            year: None,
        })
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO attendance_logs (roll_no, event_id, check_in_time, status) \
         VALUES ('X1', ?, ?, 'PENDING')",
    )
    .bind(event_id)
    .bind(Utc::now())
    .execute(&state.pool)
    .await
    .unwrap();

    state.event_service.delete(event_id).await.unwrap();
    let logs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance_logs WHERE event_id = ?")
        .bind(event_id)
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(logs, 0);
}
