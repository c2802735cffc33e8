//! End-to-end requests against a server bound to an ephemeral port.

use server::{router, AppState, ServerConfig};

async fn spawn_server() -> String {
    let app = router(AppState::from(&ServerConfig::default()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn get(base: &str, path: &str) -> reqwest::Response {
    reqwest::get(format!("{base}{path}")).await.unwrap()
}

#[tokio::test]
async fn serves_png_with_default_caption() {
    let base = spawn_server().await;
    let res = get(&base, "/ff0000-200-100.png").await;
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "image/png");
    assert!(res.headers().get("cache-control").is_none());

    let bytes = res.bytes().await.unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (200, 100));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(199, 99).0, [255, 0, 0, 255]);
    // Red is a dark background, so the caption halo is white ink over red.
    assert!(img.pixels().any(|p| p.0 == [255, 179, 179, 255]));
}

#[tokio::test]
async fn cross_and_text_routes() {
    let base = spawn_server().await;

    let res = get(&base, "/000000-64-32-x.png").await;
    assert_eq!(res.status(), 200);
    let img = image::load_from_memory(&res.bytes().await.unwrap())
        .unwrap()
        .to_rgba8();
    assert_ne!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);

    let res = get(&base, "/hello_world/ffffff-300-150.png").await;
    assert_eq!(res.status(), 200);
    let img = image::load_from_memory(&res.bytes().await.unwrap())
        .unwrap()
        .to_rgba8();
    assert_eq!(img.dimensions(), (300, 150));
    // Light background: black ink.
    assert!(img.pixels().any(|p| p.0 == [76, 76, 76, 255]));

    let res = get(&base, "/hi/ffffff-30-15-x.png").await;
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn identical_requests_are_byte_identical() {
    let base = spawn_server().await;
    let a = get(&base, "/caption/abcdef-120-80-x.png").await.bytes().await.unwrap();
    let b = get(&base, "/caption/abcdef-120-80-x.png").await.bytes().await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn invalid_color_is_bad_request() {
    let base = spawn_server().await;
    let res = get(&base, "/zzzzzz-100-100.png").await;
    assert_eq!(res.status(), 400);
    assert!(res.text().await.unwrap().contains("Color Format"));
}

#[tokio::test]
async fn invalid_width_is_bad_request() {
    let base = spawn_server().await;
    let res = get(&base, "/000000-abc-100.png").await;
    assert_eq!(res.status(), 400);
    assert!(res.text().await.unwrap().contains("Width"));
}

#[tokio::test]
async fn oversized_is_bad_request() {
    let base = spawn_server().await;
    let res = get(&base, "/000000-20000-100.png").await;
    assert_eq!(res.status(), 400);
    assert!(res.text().await.unwrap().contains("10000x10000"));
}

#[tokio::test]
async fn missing_width_is_bad_request() {
    let base = spawn_server().await;
    let res = get(&base, "/000000--100.png").await;
    assert_eq!(res.status(), 400);
    assert_eq!(res.text().await.unwrap(), "Missing Width");
}

#[tokio::test]
async fn trailing_dash_is_bad_height() {
    let base = spawn_server().await;
    let res = get(&base, "/ff0000-200-100-.png").await;
    assert_eq!(res.status(), 400);
    assert_eq!(res.text().await.unwrap(), "Invalid Height");
}

#[tokio::test]
async fn zero_size_yields_minimal_png() {
    let base = spawn_server().await;
    let res = get(&base, "/000000-0-100.png").await;
    assert_eq!(res.status(), 200);
    let img = image::load_from_memory(&res.bytes().await.unwrap()).unwrap();
    assert_eq!((img.width(), img.height()), (1, 1));
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let base = spawn_server().await;
    assert_eq!(get(&base, "/ff0000-200-100.jpg").await.status(), 404);
    assert_eq!(get(&base, "/a/b/ff0000-200-100.png").await.status(), 404);
    assert_eq!(get(&base, "/health").await.status(), 200);
}
