use anyhow::Result;
use httpmock::prelude::*;
use sem_api_models::{Job, JobState, Resource, ResourceList, Secret};
use sem_client::{ClientError, HEADER_REQUEST_ID, HEADER_USER_ID, ResourceApi};
use sem_config::ClientConfig;
use sem_test_support::fixtures::{job_list_payload, secret_list_payload, secret_payload};
use sem_test_support::upstream::{TEST_TOKEN, expected_authorization, mock_host, unreachable_host};
use serde_json::json;

fn secrets(server: &MockServer) -> Result<ResourceApi<Secret>> {
    Ok(ResourceApi::new(&ClientConfig::new(
        mock_host(server),
        TEST_TOKEN,
    ))?)
}

#[tokio::test]
async fn list_sends_fixed_headers_and_back_fills_every_entry() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1beta/secrets")
            .header("authorization", expected_authorization())
            .header("content-type", "application/json")
            .header_exists(HEADER_REQUEST_ID)
            .header_exists(HEADER_USER_ID);
        then.status(200)
            .json_body(secret_list_payload(&["db-password", "aws-credentials"]));
    });

    let list = secrets(&server)?.list().await?;
    mock.assert();
    let names: Vec<&str> = list.items().iter().map(Resource::name).collect();
    assert_eq!(names, ["db-password", "aws-credentials"]);
    for secret in list.items() {
        assert_eq!(secret.api_version, "v1beta");
        assert_eq!(secret.kind, "Secret");
    }
    Ok(())
}

#[tokio::test]
async fn get_decodes_single_secret() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1beta/secrets/db-password");
        then.status(200)
            .json_body(secret_payload("db-password", Some("0f3c")));
    });

    let secret = secrets(&server)?.get("db-password").await?;
    mock.assert();
    assert_eq!(secret.name(), "db-password");
    assert_eq!(secret.identifier(), "0f3c");
    assert_eq!(secret.metadata.create_time, Some(1_700_000_000));
    assert_eq!(secret.data.env_vars[0].name, "TOKEN");
    Ok(())
}

#[tokio::test]
async fn get_missing_reports_status_and_body() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1beta/secrets/missing");
        then.status(404).body("not found");
    });

    let err = secrets(&server)?
        .get("missing")
        .await
        .expect_err("404 must fail");
    mock.assert();
    assert_eq!(err.status(), Some(404));
    let message = err.to_string();
    assert!(message.contains("404"), "unexpected message: {message}");
    assert!(message.contains("not found"), "unexpected message: {message}");
    Ok(())
}

#[tokio::test]
async fn create_posts_serialized_secret() -> Result<()> {
    let server = MockServer::start_async().await;
    let mut secret = Secret::named("db-password");
    secret.add_env_var("DB_PASSWORD", "hunter2");
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1beta/secrets")
            .json_body_includes(
                r#"{"apiVersion":"v1beta","kind":"Secret","metadata":{"name":"db-password"}}"#,
            );
        then.status(200).json_body(secret_payload("db-password", Some("1")));
    });

    secrets(&server)?.create(&secret).await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn create_with_blank_name_sends_nothing() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200).body("{}");
    });

    let err = secrets(&server)?
        .create(&Secret::default())
        .await
        .expect_err("blank name must fail");
    assert!(err.is_local());
    assert_eq!(err.to_string(), "Secret name can't be blank");
    mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn create_rejects_non_200_success_codes() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/v1beta/secrets");
        then.status(201).body("created");
    });

    let err = secrets(&server)?
        .create(&Secret::named("x"))
        .await
        .expect_err("only 200 counts as success");
    assert_eq!(err.status(), Some(201));
    Ok(())
}

#[tokio::test]
async fn update_addresses_by_id_when_present() -> Result<()> {
    let server = MockServer::start_async().await;
    let by_id = server.mock(|when, then| {
        when.method(PATCH).path("/api/v1beta/secrets/5a1f");
        then.status(200).json_body(json!({}));
    });
    let by_name = server.mock(|when, then| {
        when.method(PATCH).path("/api/v1beta/secrets/db-password");
        then.status(200).json_body(json!({}));
    });

    let api = secrets(&server)?;
    let mut secret = Secret::named("db-password");
    api.update(&secret).await?;
    by_name.assert();

    secret.metadata.id = Some("5a1f".to_string());
    api.update(&secret).await?;
    by_id.assert();
    Ok(())
}

#[tokio::test]
async fn delete_targets_named_secret() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/api/v1beta/secrets/old");
        then.status(200).body("{}");
    });

    secrets(&server)?.delete("old").await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn jobs_filter_sends_repeated_states_parameters() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1alpha/jobs")
            .query_param("states", "RUNNING")
            .query_param("states", "QUEUED");
        then.status(200).json_body(job_list_payload(&[
            ("j-1", "build", "RUNNING"),
            ("j-2", "deploy", "QUEUED"),
        ]));
    });

    let api: ResourceApi<Job> =
        ResourceApi::new(&ClientConfig::new(mock_host(&server), TEST_TOKEN))?;
    let jobs = api
        .list_by_states(&[JobState::Running, JobState::Queued])
        .await?;
    mock.assert();
    assert_eq!(jobs.items().len(), 2);
    assert_eq!(jobs.items()[1].identifier(), "j-2");
    assert_eq!(jobs.items()[1].api_version, "v1alpha");
    Ok(())
}

#[tokio::test]
async fn configured_user_id_is_sent() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1beta/secrets")
            .header(HEADER_USER_ID, "user-7");
        then.status(200).json_body(json!({"secrets": []}));
    });

    let config = ClientConfig::new(mock_host(&server), TEST_TOKEN).with_user_id("user-7");
    let list = ResourceApi::<Secret>::new(&config)?.list().await?;
    mock.assert();
    assert!(list.items().is_empty());
    Ok(())
}

#[tokio::test]
async fn undecodable_body_is_a_local_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/v1beta/secrets/broken");
        then.status(200).body("<html>");
    });

    let err = secrets(&server)?
        .get("broken")
        .await
        .expect_err("html is not a secret");
    assert!(matches!(err, ClientError::Model(_)));
    Ok(())
}

#[tokio::test]
async fn unreachable_host_is_a_connection_error() -> Result<()> {
    let api: ResourceApi<Secret> =
        ResourceApi::new(&ClientConfig::new(unreachable_host(), TEST_TOKEN))?;
    let err = api.list().await.expect_err("nothing listens there");
    assert!(matches!(err, ClientError::Connection { .. }));
    assert!(
        err.to_string().starts_with("connecting to Semaphore failed"),
        "unexpected message: {err}"
    );
    Ok(())
}

fn assert_upstream(err: &ClientError, status: u16, body: &str) {
    assert_eq!(err.status(), Some(status));
    let message = err.to_string();
    assert!(message.contains(&status.to_string()), "unexpected message: {message}");
    assert!(message.contains(body), "unexpected message: {message}");
}

#[tokio::test]
async fn list_reports_upstream_failure() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/v1beta/secrets");
        then.status(500).body("internal error");
    });

    let err = secrets(&server)?.list().await.expect_err("500 must fail");
    assert_upstream(&err, 500, "internal error");
    Ok(())
}

#[tokio::test]
async fn update_reports_upstream_failure() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(PATCH).path("/api/v1beta/secrets/db-password");
        then.status(409).body("conflict");
    });

    let err = secrets(&server)?
        .update(&Secret::named("db-password"))
        .await
        .expect_err("409 must fail");
    assert_upstream(&err, 409, "conflict");
    Ok(())
}

#[tokio::test]
async fn delete_reports_upstream_failure() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(DELETE).path("/api/v1beta/secrets/locked");
        then.status(403).body("forbidden");
    });

    let err = secrets(&server)?
        .delete("locked")
        .await
        .expect_err("403 must fail");
    assert_upstream(&err, 403, "forbidden");
    Ok(())
}

#[tokio::test]
async fn every_verb_reports_connection_failures() -> Result<()> {
    let api: ResourceApi<Secret> =
        ResourceApi::new(&ClientConfig::new(unreachable_host(), TEST_TOKEN))?;
    let secret = Secret::named("db-password");

    let failures = [
        ("get", api.get("db-password").await.err()),
        ("create", api.create(&secret).await.err()),
        ("update", api.update(&secret).await.err()),
        ("delete", api.delete("db-password").await.err()),
    ];
    for (verb, err) in failures {
        assert!(
            matches!(err, Some(ClientError::Connection { .. })),
            "{verb} returned {err:?}"
        );
    }
    Ok(())
}
