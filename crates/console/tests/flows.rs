mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;

use common::{console, fake_backend, Reply};
use qms_client::{ApiError, Route};
use qms_core::filters::DateRange;
use qms_console::dashboard::DashboardView;
use qms_console::login::LoginFlow;
use qms_console::notice::{drain, NoticeLevel};
use qms_models::auth::LoginRequest;

#[tokio::test]
async fn login_stores_the_token_and_username() {
    let (base, rec) = fake_backend(|_| Reply::ok(json!({"token": "tok-1"}))).await;
    let console = console(&base, None);
    let mut notices = console.notifier.subscribe();
    assert_eq!(console.navigate(Route::Dashboard), Route::Login);

    let flow = LoginFlow::new(&console);
    flow.handle_login(&LoginRequest::new("admin", "secret")).await.unwrap();

    assert_eq!(console.session().authentication_header().as_deref(), Some("Bearer tok-1"));
    assert_eq!(console.session().username().as_deref(), Some("admin"));
    assert_eq!(console.navigate(Route::Dashboard), Route::Dashboard);
    assert_eq!(flow.error_message(), "");

    let req = &rec.requests()[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/api/management/login");
    assert_eq!(req.body, json!({"username": "admin", "password": "secret"}));

    let notices = drain(&mut notices);
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].message, "Login successful");
}

#[tokio::test]
async fn rejected_login_keeps_the_session_empty() {
    let (base, _rec) =
        fake_backend(|_| Reply::status(StatusCode::BAD_REQUEST, json!({"error": "invalid password"}))).await;
    let console = console(&base, None);
    let mut notices = console.notifier.subscribe();
    let flow = LoginFlow::new(&console);

    let err = flow.handle_login(&LoginRequest::new("admin", "nope")).await.unwrap_err();

    assert_matches!(err, ApiError::Server { status: 400, .. });
    assert!(!console.session().is_authenticated());
    let expected = "Login failed. Please check your credentials and try again. invalid password";
    assert_eq!(flow.error_message(), expected);

    let notices = drain(&mut notices);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, expected);
}

#[tokio::test]
async fn dashboard_fetch_builds_chart_data() {
    let (base, rec) = fake_backend(|_| {
        Reply::ok(json!({
            "data": {
                "qualityRate": {"qualifiedCount": 98, "defectCount": 2, "totalCount": 100, "qualityRate": 98.0},
                "defectTypeDistribution": [{"type": "端子变形", "count": 2, "rate": 100.0}],
                "supplierDefectTrend": null,
                "defectTrendByType": {
                    "terminalData": [{"date": "2024-04-30", "count": 2}],
                    "tagData": null,
                    "appearanceData": null,
                    "noiseData": null
                }
            }
        }))
    })
    .await;
    let console = console(&base, Some("tok"));
    let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let view = DashboardView::with_today(&console, today);

    view.fetch().await.unwrap();

    let req = &rec.requests()[0];
    assert_eq!(req.path, "/api/management/quality_stats");
    assert_eq!(req.query.get("startDate").map(String::as_str), Some("2024-04-24"));
    assert_eq!(req.query.get("endDate").map(String::as_str), Some("2024-05-01"));

    let state = view.snapshot().await;
    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert_eq!(state.data.date_range.len(), 8);
    assert_eq!(state.data.date_range[0], "4/24");
    assert_eq!(state.data.stats.total_completed, 100);
    assert_eq!(state.data.defect_types.terminal, 100.0);
    assert_eq!(state.data.defect_trends.terminal[6], 2);
    assert_eq!(state.data.defect_trends.tag, vec![0; 8]);
}

#[tokio::test]
async fn dashboard_failure_is_kept_as_error() {
    let (base, _rec) =
        fake_backend(|_| Reply::status(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "stats unavailable"})))
            .await;
    let console = console(&base, Some("tok"));
    let view = DashboardView::new(&console);

    assert!(view.fetch().await.is_err());

    let state = view.snapshot().await;
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("stats unavailable"));
}

#[tokio::test]
async fn overlapping_dashboard_fetches_keep_the_latest_range() {
    let (base, _rec) = fake_backend(|req| {
        let body = json!({"data": {"qualityRate": {"totalCount": 10}}});
        if req.query.get("startDate").map(String::as_str) == Some("2024-04-24") {
            Reply::ok(body).after(Duration::from_millis(300))
        } else {
            Reply::ok(body)
        }
    })
    .await;
    let console = console(&base, Some("tok"));
    let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let view = DashboardView::with_today(&console, today);
    let short = DateRange::days(NaiveDate::from_ymd_opt(2024, 4, 29).unwrap(), today).unwrap();

    let (slow, fast) = tokio::join!(view.fetch(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        view.set_range(short).await;
        view.fetch().await
    });
    slow.unwrap();
    fast.unwrap();

    let state = view.snapshot().await;
    assert!(!state.loading);
    assert_eq!(state.range, short);
    assert_eq!(state.data.date_range, vec!["4/29", "4/30", "5/1"]);
}

#[tokio::test]
async fn unauthorized_list_redirects_to_login() {
    let (base, _rec) =
        fake_backend(|_| Reply::status(StatusCode::UNAUTHORIZED, json!({"error": "token expired"}))).await;
    let console = console(&base, Some("stale"));
    let mut routes = console.navigator().subscribe();
    let view = qms_console::views::UserView::new(&console);

    let err = view.list().await.unwrap_err();

    assert_matches!(err, ApiError::Unauthorized);
    assert!(!console.session().is_authenticated());
    assert_eq!(routes.try_recv().unwrap(), Route::Login);
}
