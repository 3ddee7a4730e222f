use std::{
    collections::HashMap,
    io::{BufRead, BufReader, Cursor, Read, Write},
    net::{TcpListener, TcpStream},
    sync::{Arc, Mutex},
    thread,
};

use image::{DynamicImage, ImageFormat, RgbImage};
use reqwest::blocking::Client;
use serde_json::{Value, json};
use tierlistify::cli::build_tier_list;
use tierlistify::errors::Error;
use tierlistify::page::DEFAULT_TEMPLATE;
use tierlistify::spotify::{Credentials, Session, SpotifyApi};

struct Reply {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

fn json_reply(status: u16, body: Value) -> Reply {
    Reply {
        status,
        content_type: "application/json",
        body: body.to_string().into_bytes(),
    }
}

fn png_reply() -> Reply {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, image::Rgb([10, 120, 220])));
    let mut body = Vec::new();
    img.write_to(&mut Cursor::new(&mut body), ImageFormat::Png).unwrap();
    Reply {
        status: 200,
        content_type: "image/png",
        body,
    }
}

#[derive(Debug, Clone)]
struct Request {
    // "METHOD /path?query"
    target: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Request {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Single-threaded HTTP/1.1 server on a random local port. Every connection
// gets one canned reply, looked up by method and path, then is closed.
// Unknown routes answer 404.
struct StubServer {
    base: String,
    listener: TcpListener,
}

impl StubServer {
    fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        StubServer { base, listener }
    }

    fn serve(self, routes: HashMap<String, Reply>) -> Arc<Mutex<Vec<Request>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&log);
        thread::spawn(move || {
            for stream in self.listener.incoming() {
                let Ok(stream) = stream else { break };
                let Some(request) = read_request(&stream) else {
                    continue;
                };
                let not_found = json_reply(404, json!({ "error": { "status": 404 } }));
                let reply = routes.get(&request.target).unwrap_or(&not_found);
                seen.lock().unwrap().push(request);
                write_reply(&stream, reply);
            }
        });
        log
    }
}

fn read_request(stream: &TcpStream) -> Option<Request> {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    reader.read_line(&mut line).ok()?;
    let (target, _version) = line.trim_end().rsplit_once(' ')?;

    let mut headers = Vec::new();
    loop {
        let mut header = String::new();
        reader.read_line(&mut header).ok()?;
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        let (name, value) = header.split_once(':')?;
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    reader.read_exact(&mut body).ok()?;

    Some(Request {
        target: target.to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn write_reply(mut stream: &TcpStream, reply: &Reply) {
    let reason = match reply.status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        _ => "Internal Server Error",
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        reply.status,
        reason,
        reply.content_type,
        reply.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&reply.body);
    let _ = stream.flush();
}

fn token_route() -> (String, Reply) {
    (
        "POST /api/token".to_string(),
        json_reply(
            200,
            json!({ "access_token": "test-token", "token_type": "Bearer", "expires_in": 3600 }),
        ),
    )
}

fn track_json(name: &str, artist: &str, image_url: &str) -> Value {
    json!({
        "id": name.to_lowercase(),
        "name": name,
        "artists": [{ "name": artist }],
        "album": {
            "name": "Album",
            "images": [{ "url": image_url, "width": 640, "height": 640 }],
        },
    })
}

fn items(tracks: &[Value]) -> Vec<Value> {
    tracks.iter().map(|t| json!({ "track": t })).collect()
}

fn test_client() -> Client {
    // A proxy from the environment must not intercept loopback requests
    Client::builder().no_proxy().build().unwrap()
}

fn connect(base: &str) -> Session {
    let credentials = Credentials::new(Some("client".into()), Some("secret".into())).unwrap();
    let token_url = format!("{}/api/token", base);
    let api_url = format!("{}/v1/", base);
    match Session::connect_with(test_client(), &credentials, &token_url, &api_url) {
        Ok(session) => session,
        Err(e) => panic!("token exchange failed: {}", e),
    }
}

#[test]
fn test_token_exchange_uses_client_credentials() {
    let server = StubServer::bind();
    let base = server.base.clone();
    let requests = server.serve(HashMap::from([token_route()]));

    let _session = connect(&base);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.target, "POST /api/token");
    // base64("client:secret")
    assert_eq!(request.header("authorization"), Some("Basic Y2xpZW50OnNlY3JldA=="));
    assert_eq!(request.body, "grant_type=client_credentials");
}

#[test]
fn test_rejected_credentials_fail_authentication() {
    let server = StubServer::bind();
    let base = server.base.clone();
    server.serve(HashMap::from([(
        "POST /api/token".to_string(),
        json_reply(401, json!({ "error": "invalid_client" })),
    )]));

    let credentials = Credentials::new(Some("client".into()), Some("wrong".into())).unwrap();
    let result = Session::connect_with(
        test_client(),
        &credentials,
        &format!("{}/api/token", base),
        &format!("{}/v1", base),
    );

    assert!(matches!(result, Err(Error::Authentication(_))));
}

#[test]
fn test_token_without_access_token_fails_authentication() {
    let server = StubServer::bind();
    let base = server.base.clone();
    server.serve(HashMap::from([(
        "POST /api/token".to_string(),
        json_reply(200, json!({ "token_type": "Bearer" })),
    )]));

    let credentials = Credentials::new(Some("client".into()), Some("secret".into())).unwrap();
    let result = Session::connect_with(
        test_client(),
        &credentials,
        &format!("{}/api/token", base),
        &format!("{}/v1", base),
    );

    assert!(matches!(result, Err(Error::Authentication(_))));
}

#[test]
fn test_playlist_follows_next_pages_in_order() {
    let server = StubServer::bind();
    let base = server.base.clone();
    let img = format!("{}/img/a.png", base);

    let first = json!({
        "id": "mix",
        "name": "Road Trip",
        "tracks": {
            "items": items(&[track_json("One", "A", &img), track_json("Two", "A", &img)]),
            "next": format!("{}/v1/playlists/mix/tracks?offset=2&limit=2", base),
            "total": 5,
        },
    });
    let second = json!({
        "items": items(&[track_json("Three", "B", &img), track_json("Four", "B", &img)]),
        "next": format!("{}/v1/playlists/mix/tracks?offset=4&limit=2", base),
        "total": 5,
    });
    let third = json!({
        "items": items(&[track_json("Five", "C", &img)]),
        "next": null,
        "total": 5,
    });

    let requests = server.serve(HashMap::from([
        token_route(),
        ("GET /v1/playlists/mix".to_string(), json_reply(200, first)),
        (
            "GET /v1/playlists/mix/tracks?offset=2&limit=2".to_string(),
            json_reply(200, second),
        ),
        (
            "GET /v1/playlists/mix/tracks?offset=4&limit=2".to_string(),
            json_reply(200, third),
        ),
    ]));

    let session = connect(&base);
    let playlist = session.playlist("mix").unwrap();

    assert_eq!(playlist.id, "mix");
    assert_eq!(playlist.name, "Road Trip");
    let names: Vec<&str> = playlist.tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["One", "Two", "Three", "Four", "Five"]);

    // Every lookup carries the token from the exchange
    let requests = requests.lock().unwrap();
    let lookups: Vec<&Request> = requests
        .iter()
        .filter(|r| r.target.starts_with("GET "))
        .collect();
    assert_eq!(lookups.len(), 3);
    for request in lookups {
        assert_eq!(request.header("authorization"), Some("Bearer test-token"));
    }
}

#[test]
fn test_playlist_without_name_is_missing_field() {
    let server = StubServer::bind();
    let base = server.base.clone();
    server.serve(HashMap::from([
        token_route(),
        (
            "GET /v1/playlists/noname".to_string(),
            json_reply(200, json!({ "id": "noname", "tracks": { "items": [], "next": null } })),
        ),
    ]));

    let session = connect(&base);

    match session.playlist("noname") {
        Err(Error::MissingField { entity, field }) => {
            assert_eq!(entity, "playlist");
            assert_eq!(field, "name");
        }
        other => panic!("expected MissingField, got {:?}", other),
    }
}

#[test]
fn test_playlist_without_tracks_is_missing_field() {
    let server = StubServer::bind();
    let base = server.base.clone();
    server.serve(HashMap::from([
        token_route(),
        (
            "GET /v1/playlists/empty".to_string(),
            json_reply(200, json!({ "id": "empty", "name": "Empty" })),
        ),
    ]));

    let session = connect(&base);

    match session.playlist("empty") {
        Err(Error::MissingField { entity, field }) => {
            assert_eq!(entity, "playlist");
            assert_eq!(field, "tracks");
        }
        other => panic!("expected MissingField, got {:?}", other),
    }
}

#[test]
fn test_unknown_playlist_is_lookup_error() {
    let server = StubServer::bind();
    let base = server.base.clone();
    server.serve(HashMap::from([token_route()]));

    let session = connect(&base);

    match session.playlist("gone") {
        Err(Error::Lookup { what, source }) => {
            assert_eq!(what, "playlist gone");
            assert_eq!(source.status().map(|s| s.as_u16()), Some(404));
        }
        other => panic!("expected Lookup, got {:?}", other),
    }
}

#[test]
fn test_track_lookup() {
    let server = StubServer::bind();
    let base = server.base.clone();
    let img = format!("{}/img/a.png", base);
    server.serve(HashMap::from([
        token_route(),
        (
            "GET /v1/tracks/t1".to_string(),
            json_reply(200, track_json("Solo", "Me", &img)),
        ),
    ]));

    let session = connect(&base);
    let track = session.track("t1").unwrap();

    assert_eq!(track.name, "Solo");
    assert_eq!(track.artwork_url(), img);
}

#[test]
fn test_artwork_download_and_server_error() {
    let server = StubServer::bind();
    let base = server.base.clone();
    let expected = png_reply().body;
    let requests = server.serve(HashMap::from([
        token_route(),
        ("GET /img/a.png".to_string(), png_reply()),
        (
            "GET /img/broken.png".to_string(),
            json_reply(500, json!({ "error": "boom" })),
        ),
    ]));

    let session = connect(&base);

    let bytes = session.artwork(&format!("{}/img/a.png", base)).unwrap();
    assert_eq!(bytes, expected);

    let broken = format!("{}/img/broken.png", base);
    match session.artwork(&broken) {
        Err(Error::ArtworkFetch { url, source }) => {
            assert_eq!(url, broken);
            assert_eq!(source.status().map(|s| s.as_u16()), Some(500));
        }
        other => panic!("expected ArtworkFetch, got {:?}", other.map(|b| b.len())),
    }

    // Artwork comes from a public CDN, no token is sent
    let requests = requests.lock().unwrap();
    let image_request = requests
        .iter()
        .find(|r| r.target == "GET /img/a.png")
        .unwrap();
    assert_eq!(image_request.header("authorization"), None);
}

#[test]
fn test_build_tier_list_over_http() {
    let server = StubServer::bind();
    let base = server.base.clone();
    let shared = format!("{}/img/shared.png", base);
    let single = format!("{}/img/single.png", base);
    let playlist = json!({
        "id": "mix",
        "name": "Road Trip",
        "tracks": {
            "items": items(&[
                track_json("One", "A", &shared),
                track_json("Two", "A", &shared),
                track_json("Three", "B", &single),
            ]),
            "next": null,
        },
    });
    server.serve(HashMap::from([
        token_route(),
        ("GET /v1/playlists/mix".to_string(), json_reply(200, playlist)),
        ("GET /img/shared.png".to_string(), png_reply()),
        ("GET /img/single.png".to_string(), png_reply()),
    ]));

    let session = connect(&base);
    let dir = tempfile::tempdir().unwrap();

    let page = build_tier_list(&session, "mix", dir.path(), DEFAULT_TEMPLATE, false).unwrap();

    assert_eq!(page, dir.path().join("Road_Trip_Tier_List.html"));
    let folder = dir.path().join("road_trip");
    assert!(folder.join("One_-_A.png").is_file());
    assert!(folder.join("Three_-_B.png").is_file());
    assert!(!folder.join("Two_-_A.png").exists());
    let html = std::fs::read_to_string(&page).unwrap();
    assert!(html.contains("src=\"road_trip/One_-_A.png\""));
}
