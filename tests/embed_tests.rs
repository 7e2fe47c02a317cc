use async_trait::async_trait;
use gardn_embed::orchestrator::BindingOutcome;
use gardn_embed::render::{EMPTY_ROLL_TEXT, FALLBACK_TEXT};
use gardn_embed::style::STYLE_ID;
use gardn_embed::{
    Dom, EmbedError, EmbedResult, HostContent, HostId, HttpClient, HttpResponse, MemoryDocument,
    Orchestrator, WidgetConfig, WidgetKind, PLANT_MARKER, ROLL_MARKER,
};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::collections::HashMap;

const BASE: &str = "https://gardn.test";

enum Reply {
    Body(u16, &'static str),
    Offline,
    /// Yield this many times before answering, to reorder completions.
    Delayed(usize, u16, &'static str),
    Hang,
}

/// Scripted client: replies by URL and records every request.
#[derive(Default)]
struct FakeClient {
    replies: HashMap<String, Reply>,
    requests: RefCell<Vec<String>>,
}

impl FakeClient {
    fn reply(mut self, url: &str, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), reply);
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpClient for FakeClient {
    async fn get(&self, url: &str) -> EmbedResult<HttpResponse> {
        self.requests.borrow_mut().push(url.to_string());
        match self.replies.get(url) {
            Some(Reply::Body(status, body)) => Ok(HttpResponse::with_status(*status, body.as_bytes())),
            Some(Reply::Delayed(n, status, body)) => {
                for _ in 0..*n {
                    tokio::task::yield_now().await;
                }
                Ok(HttpResponse::with_status(*status, body.as_bytes()))
            }
            Some(Reply::Hang) => futures::future::pending::<EmbedResult<HttpResponse>>().await,
            Some(Reply::Offline) | None => Err(EmbedError::Network {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}

fn plant_url(user: &str) -> String {
    format!("{}/api/{}/plant.json", BASE, user)
}

fn roll_url(user: &str) -> String {
    format!("{}/api/{}/roll.json", BASE, user)
}

fn plant_json(has_picked: bool) -> &'static str {
    if has_picked {
        r#"{"username":"alice","display_name":"Alice","identity_domain":"alice.example",
            "me_url":"https://alice.example/","plant_svg_url":"https://gardn.test/u/alice/plant.svg",
            "login_to_pick_url":"https://gardn.test/login/?next=/u/alice/",
            "pick_count":12,"has_picked":true}"#
    } else {
        r#"{"username":"alice","display_name":"Alice","identity_domain":"alice.example",
            "me_url":"https://alice.example/","plant_svg_url":"https://gardn.test/u/alice/plant.svg",
            "login_to_pick_url":"https://gardn.test/login/?next=/u/alice/",
            "pick_count":12,"has_picked":false}"#
    }
}

const ROLL_JSON: &str = r#"{"username":"alice","roll":[
    {"username":"zed","display_name":"","me_url":"https://zed.example/",
     "plant_svg_url":"https://gardn.test/u/zed/plant.svg","picked_at":"2025-03-01T00:00:00+00:00"},
    {"username":"bea","display_name":"<b>Bea</b>","me_url":"http://bea.example/garden/",
     "plant_svg_url":"https://gardn.test/u/bea/plant.svg","picked_at":"2025-02-01T00:00:00+00:00"},
    {"username":"cy","display_name":"Cy","me_url":"https://cy.example/?a=1&b=2",
     "plant_svg_url":"https://gardn.test/u/cy/plant.svg","picked_at":"2025-01-01T00:00:00+00:00"}
]}"#;

fn markup(doc: &MemoryDocument, host: HostId) -> gardn_embed::Element {
    match doc.content(host) {
        HostContent::Markup(el) => el,
        other => panic!("expected markup, got {:?}", other),
    }
}

fn assert_single_fallback_link(doc: &MemoryDocument, host: HostId, username: &str) {
    let link = markup(doc, host);
    assert_eq!(link.tag(), "a");
    assert_eq!(
        link.attribute("href"),
        Some(format!("{}/u/{}/", BASE, username).as_str())
    );
    assert_eq!(link.attribute("target"), Some("_top"));
    assert_eq!(link.attribute("rel"), Some("noopener noreferrer"));
    assert_eq!(link.descendants().len(), 1, "fallback must be a lone link");
    assert_eq!(link.text_content(), FALLBACK_TEXT);
}

#[tokio::test]
async fn test_plant_not_picked_shows_login_link() {
    let doc = MemoryDocument::new();
    let host = doc.add_host(&[(PLANT_MARKER, "alice")]);
    let client = FakeClient::default().reply(&plant_url("alice"), Reply::Body(200, plant_json(false)));
    let config = WidgetConfig::new(BASE);

    let reports = Orchestrator::new(&doc, &client, &config).run().await;

    assert_eq!(reports.len(), 1);
    assert!(reports[0].is_rendered());
    let card = markup(&doc, host);
    assert!(card.has_class("gardn-widget"));
    let login: Vec<_> = card
        .find_all("a")
        .into_iter()
        .filter(|a| a.has_class("btn"))
        .collect();
    assert_eq!(login.len(), 1);
    assert_eq!(
        login[0].attribute("href"),
        Some("https://gardn.test/login/?next=/u/alice/")
    );
    assert!(card.find_all("span").is_empty());
    assert_eq!(card.find_all("img")[0].attribute("alt"), Some("Plant for alice.example"));
    assert!(card.text_content().contains("Picks: 12"));
}

#[tokio::test]
async fn test_plant_picked_shows_status() {
    let doc = MemoryDocument::new();
    let host = doc.add_host(&[(PLANT_MARKER, "alice")]);
    let client = FakeClient::default().reply(&plant_url("alice"), Reply::Body(200, plant_json(true)));
    let config = WidgetConfig::new(BASE);

    Orchestrator::new(&doc, &client, &config).run().await;

    let card = markup(&doc, host);
    let status = card.find_all("span");
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].text_content(), "You picked this");
    assert!(card
        .find_all("a")
        .iter()
        .all(|a| a.attribute("href") != Some("https://gardn.test/login/?next=/u/alice/")));
}

#[tokio::test]
async fn test_network_error_falls_back() {
    let doc = MemoryDocument::new();
    let host = doc.add_host(&[(PLANT_MARKER, "alice")]);
    let client = FakeClient::default().reply(&plant_url("alice"), Reply::Offline);
    let config = WidgetConfig::new(BASE);

    let reports = Orchestrator::new(&doc, &client, &config).run().await;

    assert!(matches!(
        reports[0].outcome,
        BindingOutcome::Fallback(EmbedError::Network { .. })
    ));
    assert_single_fallback_link(&doc, host, "alice");
}

#[tokio::test]
async fn test_bad_status_and_bad_json_fall_back() {
    let doc = MemoryDocument::new();
    let forbidden = doc.add_host(&[(PLANT_MARKER, "a")]);
    let garbage = doc.add_host(&[(PLANT_MARKER, "b")]);
    let not_object = doc.add_host(&[(PLANT_MARKER, "c")]);
    let client = FakeClient::default()
        // Valid JSON on a 403 must still not be rendered.
        .reply(&plant_url("a"), Reply::Body(403, r#"{"detail":"Forbidden: embed domain not allowed"}"#))
        .reply(&plant_url("b"), Reply::Body(200, "<html>oops</html>"))
        .reply(&plant_url("c"), Reply::Body(200, "[1,2,3]"));
    let config = WidgetConfig::new(BASE);

    let reports = Orchestrator::new(&doc, &client, &config).run().await;

    assert!(matches!(
        reports[0].outcome,
        BindingOutcome::Fallback(EmbedError::HttpStatus { status: 403, .. })
    ));
    assert!(matches!(
        reports[1].outcome,
        BindingOutcome::Fallback(EmbedError::Payload { .. })
    ));
    assert!(matches!(
        reports[2].outcome,
        BindingOutcome::Fallback(EmbedError::Payload { .. })
    ));
    assert_single_fallback_link(&doc, forbidden, "a");
    assert_single_fallback_link(&doc, garbage, "b");
    assert_single_fallback_link(&doc, not_object, "c");
}

#[tokio::test]
async fn test_sparse_payload_still_renders() {
    let doc = MemoryDocument::new();
    let host = doc.add_host(&[(PLANT_MARKER, "bob")]);
    let client = FakeClient::default().reply(&plant_url("bob"), Reply::Body(200, r#"{"username":"bob"}"#));
    let config = WidgetConfig::new(BASE);

    let reports = Orchestrator::new(&doc, &client, &config).run().await;

    assert!(reports[0].is_rendered());
    let card = markup(&doc, host);
    assert_eq!(card.find_all("a")[0].text_content(), "bob");
    assert_eq!(card.find_all("img")[0].attribute("alt"), Some("Plant for bob"));
}

#[tokio::test]
async fn test_roll_renders_cards_in_order() {
    let doc = MemoryDocument::new();
    let host = doc.add_host(&[(ROLL_MARKER, "alice")]);
    let client = FakeClient::default().reply(&roll_url("alice"), Reply::Body(200, ROLL_JSON));
    let config = WidgetConfig::new(BASE);

    let reports = Orchestrator::new(&doc, &client, &config).run().await;

    assert_eq!(reports[0].kind, WidgetKind::Roll);
    assert!(reports[0].is_rendered());
    assert_eq!(doc.write_count(host), 1);
    let grid = markup(&doc, host);
    assert!(grid.has_class("gardn-roll"));
    let cards: Vec<_> = grid
        .child_nodes()
        .iter()
        .filter_map(|n| n.as_element())
        .collect();
    assert_eq!(cards.len(), 3);
    let hrefs: Vec<_> = cards.iter().map(|c| c.attribute("href").unwrap()).collect();
    assert_eq!(
        hrefs,
        vec!["https://zed.example/", "http://bea.example/garden/", "https://cy.example/?a=1&b=2"]
    );
    let names: Vec<_> = cards.iter().map(|c| c.find_all("strong")[0].text_content()).collect();
    assert_eq!(names, vec!["zed", "<b>Bea</b>", "Cy"]);
    let alts: Vec<_> = cards
        .iter()
        .map(|c| c.find_all("img")[0].attribute("alt").unwrap().to_string())
        .collect();
    assert_eq!(
        alts,
        vec!["Plant for zed.example", "Plant for bea.example/garden", "Plant for cy.example/?a=1&b=2"]
    );

    let html = grid.to_html();
    assert!(html.as_str().contains("<strong>&lt;b&gt;Bea&lt;/b&gt;</strong>"));
    assert!(html.as_str().contains("href=\"https://cy.example/?a=1&amp;b=2\""));
}

#[tokio::test]
async fn test_empty_roll_is_text_only() {
    let doc = MemoryDocument::new();
    let empty = doc.add_host(&[(ROLL_MARKER, "a")]);
    let missing = doc.add_host(&[(ROLL_MARKER, "b")]);
    let client = FakeClient::default()
        .reply(&roll_url("a"), Reply::Body(200, r#"{"username":"a","roll":[]}"#))
        .reply(&roll_url("b"), Reply::Body(200, r#"{"username":"b"}"#));
    let config = WidgetConfig::new(BASE);

    let reports = Orchestrator::new(&doc, &client, &config).run().await;

    assert!(reports.iter().all(|r| r.is_rendered()));
    assert_eq!(doc.content(empty), HostContent::Text(EMPTY_ROLL_TEXT.to_string()));
    assert_eq!(doc.content(missing), HostContent::Text(EMPTY_ROLL_TEXT.to_string()));
}

#[tokio::test]
async fn test_roll_error_leaves_no_grid() {
    let doc = MemoryDocument::new();
    let server_error = doc.add_host(&[(ROLL_MARKER, "a")]);
    let bad_shape = doc.add_host(&[(ROLL_MARKER, "b")]);
    doc.set_placeholder(server_error, "Loading…");
    let client = FakeClient::default()
        .reply(&roll_url("a"), Reply::Body(500, ROLL_JSON))
        .reply(&roll_url("b"), Reply::Body(200, r#"{"roll":"nope"}"#));
    let config = WidgetConfig::new(BASE);

    Orchestrator::new(&doc, &client, &config).run().await;

    for (host, user) in [(server_error, "a"), (bad_shape, "b")] {
        assert_single_fallback_link(&doc, host, user);
        assert!(markup(&doc, host).find_all("div").is_empty());
        assert_eq!(doc.write_count(host), 1);
    }
}

#[tokio::test]
async fn test_one_request_per_binding_and_styles_once() {
    let doc = MemoryDocument::new();
    let hosts = [
        doc.add_host(&[(PLANT_MARKER, "alice")]),
        doc.add_host(&[(ROLL_MARKER, "alice")]),
        doc.add_host(&[(PLANT_MARKER, "we ird/name")]),
        doc.add_host(&[("class", "unrelated")]),
    ];
    let client = FakeClient::default()
        .reply(&plant_url("alice"), Reply::Body(200, plant_json(false)))
        .reply(&roll_url("alice"), Reply::Body(200, ROLL_JSON));
    let config = WidgetConfig::new(BASE);
    let orchestrator = Orchestrator::new(&doc, &client, &config);

    orchestrator.run().await;
    orchestrator.run().await;

    assert_eq!(doc.style_count(STYLE_ID), 1);
    let mut requests = client.requests();
    requests.sort();
    let mut expected = vec![
        plant_url("alice"),
        plant_url("alice"),
        plant_url("we%20ird%2Fname"),
        plant_url("we%20ird%2Fname"),
        roll_url("alice"),
        roll_url("alice"),
    ];
    expected.sort();
    assert_eq!(requests, expected);
    assert_single_fallback_link(&doc, hosts[2], "we%20ird%2Fname");
    assert_eq!(doc.content(hosts[3]), HostContent::Empty);
    assert_eq!(doc.write_count(hosts[3]), 0);
}

#[tokio::test]
async fn test_existing_style_element_is_respected() {
    let doc = MemoryDocument::new();
    doc.append_head_style(STYLE_ID, "/* page-provided */").unwrap();
    let client = FakeClient::default();
    let config = WidgetConfig::new(BASE);

    Orchestrator::new(&doc, &client, &config).run().await;

    assert_eq!(doc.head_styles(), vec![(STYLE_ID.to_string(), "/* page-provided */".to_string())]);
}

#[tokio::test]
async fn test_completion_order_does_not_matter() {
    let doc = MemoryDocument::new();
    let slow = doc.add_host(&[(PLANT_MARKER, "slow")]);
    let fast = doc.add_host(&[(ROLL_MARKER, "fast")]);
    let client = FakeClient::default()
        .reply(&plant_url("slow"), Reply::Delayed(5, 200, r#"{"username":"slow"}"#))
        .reply(&roll_url("fast"), Reply::Delayed(0, 404, ""));
    let config = WidgetConfig::new(BASE);

    let reports = Orchestrator::new(&doc, &client, &config).run().await;

    assert_eq!(
        reports.iter().map(|r| r.username.as_str()).collect::<Vec<_>>(),
        vec!["slow", "fast"]
    );
    assert!(reports[0].is_rendered());
    assert!(!reports[1].is_rendered());
    assert_eq!(doc.write_count(slow), 1);
    assert_single_fallback_link(&doc, fast, "fast");
}

#[tokio::test]
async fn test_hung_request_does_not_block_other_bindings() {
    let doc = MemoryDocument::new();
    let stuck = doc.add_host(&[(PLANT_MARKER, "stuck")]);
    doc.set_placeholder(stuck, "Loading…");
    let ok = doc.add_host(&[(PLANT_MARKER, "alice")]);
    let client = FakeClient::default()
        .reply(&plant_url("stuck"), Reply::Hang)
        .reply(&plant_url("alice"), Reply::Body(200, plant_json(true)));
    let config = WidgetConfig::new(BASE);
    let orchestrator = Orchestrator::new(&doc, &client, &config);

    tokio::select! {
        _ = orchestrator.run() => panic!("a hung binding never resolves"),
        _ = async {
            for _ in 0..10 {
                tokio::task::yield_now().await;
            }
        } => {}
    }

    assert_eq!(doc.write_count(ok), 1);
    assert!(markup(&doc, ok).has_class("gardn-widget"));
    assert_eq!(doc.content(stuck), HostContent::Text("Loading…".to_string()));
    assert_eq!(doc.write_count(stuck), 0);
}
