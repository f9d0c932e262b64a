// 集成测试公共模块
//
// 在本地端口上启动一个提供固定页面的 HTTP 服务

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use axum::{
    http::{header, StatusCode},
    response::{Html, Redirect},
    routing::get,
    Router,
};

pub const ARTICLE_HTML: &str = r#"<html>
<head><title>Fixture</title></head>
<body>
  <header>site header</header>
  <article>
    <h2>Fixture article</h2>
    <img src="images/photo.jpg" alt="photo">
    <pre><code>let x = 1;</code></pre>
    <pre>plain</pre>
  </article>
</body>
</html>"#;

pub fn gbk_page() -> Vec<u8> {
    let (bytes, _, _) = encoding_rs::GBK.encode("<html><body><p>中文内容</p></body></html>");
    bytes.into_owned()
}

pub fn fixture_routes() -> Router {
    Router::new()
        .route("/article", get(|| async { Html(ARTICLE_HTML) }))
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "gone") }))
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Html("<p>late</p>")
            }),
        )
        .route(
            "/gbk",
            get(|| async { ([(header::CONTENT_TYPE, "text/html; charset=gbk")], gbk_page()) }),
        )
        .route("/old", get(|| async { Redirect::permanent("/new/page") }))
        .route(
            "/new/page",
            get(|| async { Html(r#"<article><img src="pic.png"></article>"#) }),
        )
}

/// 在独立线程的运行时中启动固定页面服务，返回基础地址
pub fn spawn_fixture_server() -> String {
    let (tx, rx) = mpsc::channel::<SocketAddr>();

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("fixture runtime");

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind fixture server");
            tx.send(listener.local_addr().expect("fixture address"))
                .expect("send fixture address");
            axum::serve(listener, fixture_routes())
                .await
                .expect("fixture server");
        });
    });

    let addr = rx.recv().expect("fixture server failed to start");
    format!("http://{}", addr)
}
