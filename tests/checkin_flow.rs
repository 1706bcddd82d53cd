//! End-to-end runs of both batches against a mock forum.
//!
//! The real `HttpForumApi` talks to a wiremock server through
//! `ClientConfig::with_base_url`; audit files go to a temp directory.

use forum_api::{ClientConfig, HttpForumApi};
use forum_checkin::config::AttendanceConfig;
use forum_checkin::{
    sign_accounts, stats_accounts, AttendancePayload, AttendanceStatus, AuditLog,
    StatisticsPayload, StatisticsStatus,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ALICE: &str = "session=alice-0123456789abcdef";
const BOB: &str = "session=bob-0123456789abcdef";
const CAROL: &str = "session=carol-0123456789abcdef";

fn api_for(server: &MockServer) -> HttpForumApi {
    let config = ClientConfig::default().with_base_url(server.uri());
    HttpForumApi::new(&config).expect("client")
}

fn no_delay() -> AttendanceConfig {
    AttendanceConfig { retry_delay_ms: 0 }
}

async fn mount_attendance(server: &MockServer, cookie: &str, status: u16, body: &str, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/attendance"))
        .and(header("cookie", cookie))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn sign_batch_classifies_each_account() {
    let server = MockServer::start().await;
    mount_attendance(
        &server,
        ALICE,
        200,
        r#"{"success":true,"message":"今日签到获得鸡腿 7 个"}"#,
        1,
    )
    .await;
    mount_attendance(
        &server,
        BOB,
        500,
        r#"{"success":false,"message":"今天已完成签到，请勿重复签到"}"#,
        1,
    )
    .await;
    mount_attendance(&server, CAROL, 200, "<html>please log in</html>", 3).await;

    let payload = AttendancePayload::from_json(&format!(
        r#"{{
            "targets": {{
                "1001": {{"ns": {{"alice": "{ALICE}", "bob": "{BOB}"}}}},
                "1002": {{"df": {{"carol": "{CAROL}"}}, "ns": {{}}}}
            }},
            "userModes": {{"1002": {{"df": true}}}}
        }}"#
    ))
    .expect("payload");

    let dir = tempfile::tempdir().expect("tempdir");
    let audit = AuditLog::open(dir.path()).expect("audit");
    let api = api_for(&server);

    let results = sign_accounts(&api, &audit, &no_delay(), &payload).await;

    let ns = results.get("1001").and_then(|u| u.get("ns")).expect("1001/ns");
    assert_eq!(ns.len(), 2);
    assert_eq!(ns[0].name, "alice");
    assert_eq!(ns[0].result, "✅ 签到收益 7 个 🍗");
    assert_eq!(ns[1].status, AttendanceStatus::AlreadyDone);

    let df = results.get("1002").and_then(|u| u.get("df")).expect("1002/df");
    assert_eq!(df[0].status, AttendanceStatus::ProtocolError);
    assert_eq!(df[0].site_type, "df");
    assert!(results
        .get("1002")
        .and_then(|u| u.get("ns"))
        .is_some_and(Vec::is_empty));

    let output = serde_json::to_value(&results).expect("serialize");
    assert_eq!(output["1001"]["ns"][0]["result"], "✅ 签到收益 7 个 🍗");
    assert_eq!(output["1002"]["ns"], json!([]));

    let log = std::fs::read_to_string(audit.today_path()).expect("audit file");
    for secret in [ALICE, BOB, CAROL] {
        assert!(!log.contains(secret), "credential leaked into audit log");
    }
    assert!(log.contains("随机模式: true"));
    assert!(log.contains(&format!(
        "请求 URL: {}/api/attendance?random=true",
        server.uri()
    )));
    assert!(!log.contains("https://www.deepflood.com"));
    assert!(!log.contains("please log in"));
}

#[tokio::test]
async fn stats_batch_sums_recent_signin_rewards() {
    let server = MockServer::start().await;
    let now = forum_checkin::clock::now();
    let recent = |days: i64| {
        forum_checkin::clock::timestamp(&(now - chrono::TimeDelta::days(days)))
    };

    Mock::given(method("GET"))
        .and(path("/board"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/account/credit/page-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                [6, 106, "签到收益6个鸡腿", recent(1)],
                [20, 100, "评论奖励 鸡腿", recent(2)],
                [4, 80, "签到收益4个鸡腿", recent(3)],
                [9, 76, "签到收益9个鸡腿", recent(45)]
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = StatisticsPayload::from_json(&format!(
        r#"{{"targets": {{"1001": {{"ns": {{"alice": "{ALICE}"}}}}}}, "days": 30}}"#
    ))
    .expect("payload");

    let dir = tempfile::tempdir().expect("tempdir");
    let audit = AuditLog::open(dir.path()).expect("audit");
    let api = api_for(&server);

    let results = stats_accounts(&api, &audit, &payload).await;
    let outcome = &results
        .get("1001")
        .and_then(|u| u.get("ns"))
        .expect("1001/ns")[0];

    assert_eq!(outcome.status, StatisticsStatus::Success);
    assert_eq!(outcome.stats.total_amount, 10);
    assert_eq!(outcome.stats.days_count, 2);
    assert_eq!(outcome.stats.average, "5.00");
    assert_eq!(outcome.stats.records[0].amount, 6);

    let log = std::fs::read_to_string(audit.today_path()).expect("audit file");
    assert!(log.contains("信用记录第 1 页 - 响应正文第 1 段"));
    assert!(log.contains("天数: 30"));
    assert!(!log.contains(ALICE));
}

#[tokio::test]
async fn stats_batch_reports_unreachable_forum_as_no_records() {
    let config = ClientConfig::default().with_base_url("http://127.0.0.1:9");
    let api = HttpForumApi::new(&config).expect("client");
    let payload =
        StatisticsPayload::from_json(r#"{"targets": {"u": {"df": {"a": "cookie"}}}}"#)
            .expect("payload");

    let dir = tempfile::tempdir().expect("tempdir");
    let audit = AuditLog::open(dir.path()).expect("audit");

    let results = stats_accounts(&api, &audit, &payload).await;
    let outcome = &results.get("u").and_then(|u| u.get("df")).expect("u/df")[0];
    assert_eq!(outcome.status, StatisticsStatus::NoRecords { days: 30 });

    let log = std::fs::read_to_string(audit.today_path()).expect("audit file");
    assert!(log.contains("访问 /board 失败"));
    assert!(log.contains("请求信用记录异常"));
}

#[tokio::test]
async fn stats_batch_survives_out_of_range_lookback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/account/credit/page-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [[3, 3, "签到收益3个鸡腿", "2001-01-01 08:00:00"]]
        })))
        .mount(&server)
        .await;

    let payload = StatisticsPayload::from_json(
        r#"{"targets": {"u": {"ns": {"a": "cookie"}, "xx": {"b": "cookie"}}}, "days": 200000000}"#,
    )
    .expect("payload");

    let dir = tempfile::tempdir().expect("tempdir");
    let audit = AuditLog::open(dir.path()).expect("audit");
    let api = api_for(&server);

    let results = stats_accounts(&api, &audit, &payload).await;
    let ns = &results.get("u").and_then(|u| u.get("ns")).expect("u/ns")[0];
    assert_eq!(ns.status, StatisticsStatus::Success);
    assert_eq!(ns.stats.total_amount, 3);
    assert_eq!(ns.stats.records[0].date, "2001-01-01");

    let xx = &results.get("u").and_then(|u| u.get("xx")).expect("u/xx")[0];
    assert_eq!(xx.status, StatisticsStatus::ConfigError { site: "xx".into() });
}
