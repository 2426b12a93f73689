use async_trait::async_trait;
use github_repos_api::{
    ApiError, CreateRepoRequest, CreatedRepo, CreationResult, GitHubProvider, RepoProvider,
    RepositoryService, ValidRequest, INVALID_REPOSITORY_NAME,
};
use rand::Rng;
use serde_json::json;
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Sleeps a random time per call, then fails names starting with `fail`.
#[derive(Default)]
struct JitterProvider {
    next_id: AtomicI64,
}

#[async_trait]
impl RepoProvider for JitterProvider {
    async fn create_repo(&self, request: &ValidRequest) -> Result<CreatedRepo, ApiError> {
        let delay = rand::thread_rng().gen_range(0..25);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        if request.name().starts_with("fail") {
            return Err(ApiError::new(422, format!("{} rejected", request.name())));
        }

        Ok(CreatedRepo {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            owner: "octocat".to_string(),
            name: request.name().to_string(),
        })
    }
}

fn jitter_service() -> RepositoryService {
    RepositoryService::new(Arc::new(JitterProvider::default()))
}

fn requests(names: &[&str]) -> Vec<CreateRepoRequest> {
    names
        .iter()
        .map(|name| CreateRepoRequest::new(*name, ""))
        .collect()
}

/// Names an outcome, so outcomes can be matched to inputs without relying on order.
fn outcome_name(result: &CreationResult) -> String {
    match result {
        CreationResult::Response(repo) => repo.name.clone(),
        CreationResult::Error(error) => error.message().trim_end_matches(" rejected").to_string(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn no_outcome_is_lost_or_duplicated() {
    let service = jitter_service();

    for round in 0..20 {
        let size = rand::thread_rng().gen_range(0..40);
        let names: Vec<String> = (0..size)
            .map(|i| {
                if rand::thread_rng().gen_bool(0.3) {
                    format!("fail-{round}-{i}")
                } else {
                    format!("repo-{round}-{i}")
                }
            })
            .collect();
        let batch = names
            .iter()
            .map(|name| CreateRepoRequest::new(name.clone(), ""))
            .collect();

        let response = service.create_repos(batch).await;

        assert_eq!(response.results.len(), size);
        assert_eq!(response.successes() + response.failures(), size);

        let seen: HashSet<String> = response.results.iter().map(outcome_name).collect();
        let expected: HashSet<String> = names.into_iter().collect();
        assert_eq!(seen, expected);

        let expected_successes = expected.iter().filter(|n| n.starts_with("repo")).count();
        assert_eq!(response.successes(), expected_successes);

        let expected_status = if expected_successes == size {
            201
        } else if expected_successes == 0 {
            422
        } else {
            206
        };
        assert_eq!(response.status_code, expected_status);
    }
}

#[tokio::test]
async fn all_valid_batch_is_created() {
    let response = jitter_service()
        .create_repos(requests(&["a", "b", "c"]))
        .await;

    assert_eq!(response.status_code, 201);
    assert!(response.results.iter().all(CreationResult::is_success));
}

#[tokio::test]
async fn all_invalid_batch_reports_bad_request() {
    let response = jitter_service()
        .create_repos(requests(&["", "   ", "\t"]))
        .await;

    assert_eq!(response.status_code, 400);
    for result in &response.results {
        let error = result.error().unwrap();
        assert_eq!(error.status(), 400);
        assert_eq!(error.message(), INVALID_REPOSITORY_NAME);
    }
}

#[tokio::test]
async fn invalid_and_valid_mix_is_partial() {
    let response = jitter_service().create_repos(requests(&["", "ok"])).await;

    assert_eq!(response.status_code, 206);
    assert_eq!(response.successes(), 1);
    let error = response.results.iter().find_map(CreationResult::error).unwrap();
    assert_eq!(error.status(), 400);
    assert_eq!(error.message(), INVALID_REPOSITORY_NAME);
}

#[tokio::test]
async fn empty_batch_is_created() {
    let response = jitter_service().create_repos(vec![]).await;

    assert_eq!(response.status_code, 201);
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn bounded_batch_still_completes() {
    let service = jitter_service().with_concurrency(Some(3));
    let names: Vec<String> = (0..30).map(|i| format!("repo-{i}")).collect();
    let batch = names
        .iter()
        .map(|name| CreateRepoRequest::new(name.clone(), ""))
        .collect();

    let response = service.create_repos(batch).await;

    assert_eq!(response.status_code, 201);
    assert_eq!(response.results.len(), 30);
}

async fn github_service(server: &MockServer) -> RepositoryService {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    let provider = GitHubProvider::with_base_uri("test-token", &server.uri()).unwrap();
    RepositoryService::new(Arc::new(provider))
}

#[tokio::test]
async fn github_rejecting_every_item_reports_its_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Requires authentication",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let response = github_service(&server)
        .await
        .create_repos(requests(&["a", "b"]))
        .await;

    assert_eq!(response.status_code, 401);
    assert_eq!(response.results.len(), 2);
    for result in &response.results {
        assert_eq!(
            result,
            &CreationResult::Error(ApiError::new(401, "Requires authentication"))
        );
    }
}

#[tokio::test]
async fn github_single_item_batch_is_created() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 123,
            "name": "a",
            "owner": { "login": "x" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = github_service(&server)
        .await
        .create_repos(requests(&["a"]))
        .await;

    assert_eq!(response.status_code, 201);
    assert_eq!(
        response.results,
        vec![CreationResult::Response(CreatedRepo {
            id: 123,
            owner: "x".to_string(),
            name: "a".to_string(),
        })]
    );
}

#[tokio::test]
async fn invalid_items_never_reach_github() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 123,
            "name": "my-github-repo",
            "owner": { "login": "octocat" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = github_service(&server)
        .await
        .create_repos(requests(&["", "my-github-repo"]))
        .await;

    assert_eq!(response.status_code, 206);
    for result in &response.results {
        match result {
            CreationResult::Error(error) => {
                assert_eq!(error.status(), 400);
                assert_eq!(error.message(), INVALID_REPOSITORY_NAME);
            }
            CreationResult::Response(repo) => {
                assert_eq!(repo.id, 123);
                assert_eq!(repo.name, "my-github-repo");
                assert_eq!(repo.owner, "octocat");
            }
        }
    }
}

#[tokio::test]
async fn github_server_error_is_reported_once_per_item() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .and(body_partial_json(json!({ "name": "broken" })))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({
            "message": "Bad Gateway"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user/repos"))
        .and(body_partial_json(json!({ "name": "fine" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7,
            "name": "fine",
            "owner": { "login": "octocat" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = github_service(&server)
        .await
        .create_repos(requests(&["broken", "fine"]))
        .await;

    assert_eq!(response.status_code, 206);
    assert_eq!(response.results.len(), 2);
    assert!(response
        .results
        .contains(&CreationResult::Error(ApiError::new(502, "Bad Gateway"))));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}
