// src/test_support.rs
// DOCUMENTATION: Local stand-in for the Unsplash search API
// PURPOSE: Lets service and handler tests run without network access

use crate::services::UnsplashClient;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::net::TcpListener;

pub const FAKE_ACCESS_KEY: &str = "test-key";
pub const FAKE_RAW_PREFIX: &str = "https://images.unsplash.com/";

/// Most matches the fake holds for any query
const FAKE_MATCHES: u32 = 3;

#[derive(Deserialize)]
struct FakeSearch {
    query: String,
    per_page: u32,
}

/// Behaviour keyed on the query:
/// `nothing` has no matches, `boom` fails with 500, `noresults` omits
/// the results list, `noraw` has two matches where the second lacks a
/// raw url, anything else has up to three matches.
async fn fake_search(req: HttpRequest, params: web::Query<FakeSearch>) -> HttpResponse {
    let expected = format!("Client-ID {}", FAKE_ACCESS_KEY);
    let authorized = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str());
    if !authorized {
        return HttpResponse::Unauthorized()
            .json(json!({"errors": ["OAuth error: The access token is invalid"]}));
    }

    match params.query.as_str() {
        "nothing" => HttpResponse::Ok().json(json!({"total": 0, "total_pages": 0, "results": []})),
        "noresults" => HttpResponse::Ok().json(json!({"total": 0})),
        "boom" => HttpResponse::InternalServerError().json(json!({"errors": ["Something went wrong"]})),
        "noraw" => {
            let mut broken = fake_photo("noraw", 1);
            if let Some(urls) = broken["urls"].as_object_mut() {
                urls.remove("raw");
            }
            HttpResponse::Ok().json(json!({"results": [fake_photo("noraw", 0), broken]}))
        }
        term => {
            let results: Vec<_> = (0..params.per_page.min(FAKE_MATCHES))
                .map(|i| fake_photo(term, i))
                .collect();
            HttpResponse::Ok().json(json!({
                "total": FAKE_MATCHES,
                "total_pages": 1,
                "results": results
            }))
        }
    }
}

fn fake_photo(term: &str, i: u32) -> serde_json::Value {
    let raw = format!("{}{}-{}?ixid=test&ixlib=rb-4.0.3", FAKE_RAW_PREFIX, term, i);
    json!({
        "id": format!("{}-{}", term, i),
        "description": format!("{} number {}", term, i),
        "alt_description": null,
        "urls": {
            "raw": raw,
            "full": format!("{}&q=85&fm=jpg", raw),
            "regular": format!("{}&w=1080&fit=max", raw),
            "small": format!("{}&w=400&fit=max", raw),
            "thumb": format!("{}&w=200&fit=max", raw)
        }
    })
}

/// Start the fake on an ephemeral port inside the current actix system
/// and return its base URL
pub fn spawn_fake_unsplash() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake upstream");
    let port = listener.local_addr().expect("fake upstream address").port();

    let server = HttpServer::new(|| App::new().route("/search/photos", web::get().to(fake_search)))
        .workers(1)
        .disable_signals()
        .listen(listener)
        .expect("listen fake upstream")
        .run();
    actix_rt::spawn(server);

    format!("http://127.0.0.1:{}", port)
}

/// Base URL of a port nothing listens on
pub fn dead_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let port = listener.local_addr().expect("free port address").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub fn fake_client(base_url: &str) -> UnsplashClient {
    UnsplashClient::new(
        Client::new(),
        FAKE_ACCESS_KEY.to_string(),
        base_url.to_string(),
    )
}
