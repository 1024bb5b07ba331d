//! End-to-end transaction scenarios against local mock origins.

use axum::routing::get;
use axum::Router;

use webtx::{run, EngineConfig, Expectation, Outcome, Status, StatusClass};
use webtx_testkit::{self as testkit, MockOrigin};

#[tokio::test]
async fn test_passing_transaction_reports_ok_with_default_message() {
    let origin = MockOrigin::serve(testkit::healthy_origin()).await;
    let config = EngineConfig::default();

    let outcome = run(&origin.base_url(), &config, |mut check| async move {
        check.get("/").await?;
        if !check.expect([Expectation::Code(200), Expectation::Pattern("health".into())])? {
            return Err(check.critical("unexpected front page"));
        }
        Ok(())
    })
    .await;

    assert_eq!(outcome, Outcome::ok("Synthetic Transaction Passed"));
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(outcome.to_string(), "OK: Synthetic Transaction Passed");
}

#[tokio::test]
async fn test_server_error_reports_critical() {
    let origin = MockOrigin::serve(testkit::fixed_status(500, "boom")).await;
    let config = EngineConfig::default();

    let outcome = run(&origin.base_url(), &config, |mut check| async move {
        check.get("/").await?;
        if !check.expect_not([Expectation::Class(StatusClass::ServerError)])? {
            return Err(check.critical("server error"));
        }
        Ok(())
    })
    .await;

    assert_eq!(outcome, Outcome::critical("server error"));
    assert_eq!(outcome.exit_code(), 2);
    assert_eq!(outcome.to_string(), "CRIT: server error");
}

#[tokio::test]
async fn test_redirect_chain_is_followed_to_completion() {
    let origin = MockOrigin::serve(testkit::redirect_chain()).await;
    let config = EngineConfig::default();
    let target = origin.url("/hop/3");

    let outcome = run(&origin.base_url(), &config, |mut check| async move {
        let completed = check.get(&target).await?;
        if !completed {
            return Err(check.critical(format!("chain did not resolve: {}", check.error())));
        }
        if check.error() != "(no error)" {
            return Err(check.critical("stale session error after success"));
        }
        if !check.expect([Expectation::Code(200), Expectation::Pattern("arrived".into())])? {
            return Err(check.critical("wrong final response"));
        }
        Err(check.ok("chain resolved"))
    })
    .await;

    assert_eq!(outcome, Outcome::ok("chain resolved"));
    // three hops plus the terminal response
    assert_eq!(origin.request_count(), 4);
}

#[tokio::test]
async fn test_self_redirect_exhausts_the_hop_limit() {
    let origin = MockOrigin::serve(testkit::redirect_loop()).await;
    let config = EngineConfig::default().with_redirect_loop_limit(5);

    let outcome = run(&origin.base_url(), &config, |mut check| async move {
        if check.get("/loop").await? {
            return Err(check.critical("loop unexpectedly resolved"));
        }
        if check.error() != "redirect loop" {
            return Err(check.critical(format!("unexpected session error: {}", check.error())));
        }
        Err(check.unknown("could not complete"))
    })
    .await;

    assert_eq!(outcome, Outcome::unknown("could not complete"));
    assert_eq!(outcome.exit_code(), 3);
    // the initial request plus exactly `redirect_loop_limit` extra hops
    assert_eq!(origin.request_count(), 6);
}

#[tokio::test]
async fn test_absolute_location_stays_on_the_resolved_endpoint() {
    let origin = MockOrigin::serve(testkit::absolute_redirect()).await;
    let config = EngineConfig::default();

    let outcome = run(&origin.base_url(), &config, |mut check| async move {
        if !check.get("/absolute").await? {
            return Err(check.critical("redirect not followed"));
        }
        if !check.expect([Expectation::Code(200), Expectation::Pattern("arrived".into())])? {
            return Err(check.critical("did not land on /done"));
        }
        Ok(())
    })
    .await;

    assert_eq!(outcome.status, Status::Ok);
    assert_eq!(origin.request_count(), 2);
}

#[tokio::test]
async fn test_get_once_does_not_follow_redirects() {
    let origin = MockOrigin::serve(testkit::redirect_chain()).await;
    let config = EngineConfig::default();

    let outcome = run(&origin.base_url(), &config, |mut check| async move {
        check.get_once("/hop/2").await?;
        if !check.expect([Expectation::Class(StatusClass::Redirect)])? {
            return Err(check.critical("expected a raw redirect response"));
        }
        Err(check.ok("saw the redirect itself"))
    })
    .await;

    assert_eq!(outcome.status, Status::Ok);
    assert_eq!(origin.request_count(), 1);
}

#[tokio::test]
async fn test_post_form_updates_the_last_response() {
    let origin = MockOrigin::serve(testkit::form_echo()).await;
    let config = EngineConfig::default();

    let outcome = run(&origin.base_url(), &config, |mut check| async move {
        check.post("/submit", &[("user", "probe"), ("op", "login")]).await?;
        if !check.expect([
            Expectation::Pattern("user=probe".into()),
            Expectation::Pattern("op=login".into()),
        ])? {
            return Err(check.critical("form fields not echoed"));
        }
        Err(check.ok("submitted"))
    })
    .await;

    assert_eq!(outcome, Outcome::ok("submitted"));
}

#[tokio::test]
async fn test_warning_signal_passes_through_unconverted() {
    let origin = MockOrigin::serve(testkit::healthy_origin()).await;
    let config = EngineConfig::default();

    let outcome = run(&origin.base_url(), &config, |check| async move {
        Err(check.warning("degraded but serving"))
    })
    .await;

    assert_eq!(outcome, Outcome::warning("degraded but serving"));
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(outcome.to_string(), "WARN: degraded but serving");
}

#[tokio::test]
async fn test_script_faults_become_critical() {
    let origin = MockOrigin::serve(testkit::healthy_origin()).await;
    let config = EngineConfig::default();

    let outcome = run(&origin.base_url(), &config, |_check| async move {
        Err(anyhow::anyhow!("backend credentials missing").into())
    })
    .await;

    assert_eq!(outcome, Outcome::critical("backend credentials missing"));
}

#[tokio::test]
async fn test_expectation_before_any_request_is_a_fault() {
    let origin = MockOrigin::serve(testkit::healthy_origin()).await;
    let config = EngineConfig::default();

    let outcome = run(&origin.base_url(), &config, |check| async move {
        check.expect([Expectation::Code(200)])?;
        Ok(())
    })
    .await;

    assert_eq!(outcome.status, Status::Critical);
    assert!(outcome.message.contains("no response"));
}

#[tokio::test]
async fn test_resolution_failure_reports_critical() {
    let config = EngineConfig::default();

    let outcome = run("http://host.invalid./", &config, |_check| async move {
        Err(anyhow::anyhow!("script should never run").into())
    })
    .await;

    assert_eq!(outcome.status, Status::Critical);
}

#[tokio::test]
async fn test_scripts_can_branch_on_a_custom_route() {
    // Maintenance page: 503 with an explanatory body.
    let router = Router::new().route(
        "/",
        get(|| async {
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                "scheduled maintenance until 06:00",
            )
        }),
    );
    let origin = MockOrigin::serve(router).await;
    let config = EngineConfig::default();

    let outcome = run(&origin.base_url(), &config, |mut check| async move {
        check.get("/").await?;
        if check.expect([
            Expectation::Class(StatusClass::ServerError),
            Expectation::Pattern("maintenance".into()),
        ])? {
            return Err(check.warning("in scheduled maintenance"));
        }
        Ok(())
    })
    .await;

    assert_eq!(outcome, Outcome::warning("in scheduled maintenance"));
}
