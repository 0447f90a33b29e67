use docsync_engine::{
    content_hash, ContentLimits, ContentSource, DocumentSource, DocumentTransform, FailureCategory,
    FailureKind, FetchSettings, MarkdownTransform, ReqwestFetcher, RetryPolicy, TransformSettings,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<html><head><title>Actions</title></head><body>
<nav>Site navigation</nav>
<main class="content">
<h2>Defining actions</h2>
<p>Actions are the operations a connector exposes to recipes.</p>
</main>
<footer>Footer links</footer>
</body></html>"#;

struct Verbatim;

impl DocumentTransform for Verbatim {
    fn transform(&self, html: &str, _source_url: &str) -> String {
        html.to_string()
    }
}

fn markdown_source(retry: RetryPolicy) -> DocumentSource {
    DocumentSource::new(
        ReqwestFetcher::new(FetchSettings::default()),
        MarkdownTransform::new(TransformSettings::default()),
        ContentLimits::default(),
        retry,
    )
}

async fn serve(server: &MockServer, route: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body.to_string(), "text/html"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn converts_page_to_markdown_with_hash() {
    let server = MockServer::start().await;
    serve(&server, "/actions.html", 200, PAGE).await;
    let url = format!("{}/actions.html", server.uri());

    let result = markdown_source(RetryPolicy::without_delay(0))
        .fetch(&url)
        .await
        .expect("fetch ok");

    assert_eq!(result.source_id, url);
    assert!(result.content.starts_with("# SDK Documentation\n"));
    assert!(result.content.contains(&format!("> **Source**: {url}")));
    assert!(result.content.contains("Defining actions"));
    assert!(!result.content.contains("Site navigation"));
    assert!(!result.content.contains("Footer links"));
    assert_eq!(result.content_hash, content_hash(&result.content));
}

#[tokio::test]
async fn unchanged_page_converts_identically() {
    let server = MockServer::start().await;
    serve(&server, "/actions.html", 200, PAGE).await;
    let url = format!("{}/actions.html", server.uri());
    let source = markdown_source(RetryPolicy::without_delay(0));

    let first = source.fetch(&url).await.unwrap();
    let second = source.fetch(&url).await.unwrap();
    assert_eq!(first.content_hash, second.content_hash);
}

#[tokio::test]
async fn short_body_is_rejected_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty.html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>x</p>", "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let err = markdown_source(RetryPolicy::without_delay(3))
        .fetch(&format!("{}/empty.html", server.uri()))
        .await
        .unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::ContentTooShort {
            min_bytes: 100,
            actual: 8
        }
    );
    assert_eq!(err.category(), FailureCategory::Content);
}

#[tokio::test]
async fn short_conversion_is_rejected() {
    let server = MockServer::start().await;
    let body = format!("{:<120}", "tiny");
    serve(&server, "/tiny.html", 200, &body).await;

    let source = DocumentSource::new(
        ReqwestFetcher::new(FetchSettings::default()),
        Verbatim,
        ContentLimits {
            min_raw_bytes: 100,
            min_markdown_chars: 50,
        },
        RetryPolicy::without_delay(0),
    );
    let err = source
        .fetch(&format!("{}/tiny.html", server.uri()))
        .await
        .unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::ConvertedTooShort {
            min_chars: 50,
            actual: 4
        }
    );
}

#[tokio::test]
async fn server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky.html"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    serve(&server, "/flaky.html", 200, PAGE).await;

    let result = markdown_source(RetryPolicy::without_delay(3))
        .fetch(&format!("{}/flaky.html", server.uri()))
        .await
        .expect("third attempt succeeds");
    assert!(result.content.contains("Defining actions"));
}

#[tokio::test]
async fn persistent_failure_surfaces_after_all_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&server)
        .await;

    let err = markdown_source(RetryPolicy::without_delay(3))
        .fetch(&format!("{}/down.html", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}
