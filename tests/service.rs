// tests/service.rs
use actix_web::{ web, App, HttpResponse, HttpServer };
use game_status::{ Game, NetworkProber, QueryOptions, ServerDescriptor, StatusCache, StatusService };
use serde_json::{ json, Value };
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;

fn service() -> StatusService {
    StatusService::new(
        Arc::new(StatusCache::new(Duration::from_secs(300))),
        NetworkProber::new(Duration::from_millis(300), Duration::from_millis(300))
    )
}

/// Serves `body` on both game status paths.
async fn http_fixture(body: Value) -> u16 {
    let server = HttpServer::new(move || {
        let body = body.clone();
        App::new()
            .route("/info.json", web::get().to({
                let body = body.clone();
                move || {
                    let body = body.clone();
                    async move { HttpResponse::Ok().json(body) }
                }
            }))
            .route("/status", web::get().to(move || {
                let body = body.clone();
                async move { HttpResponse::Ok().json(body) }
            }))
    })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
    let port = server.addrs()[0].port();
    actix_web::rt::spawn(server.run());
    port
}

/// Answers every datagram with a fixed payload.
async fn udp_fixture() -> u16 {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = socket.local_addr().unwrap().port();
    actix_web::rt::spawn(async move {
        let mut buf = [0u8; 64];
        while let Ok((_, peer)) = socket.recv_from(&mut buf).await {
            let _ = socket.send_to(b"\xff\x00\x00\x00", peer).await;
        }
    });
    port
}

/// A port nothing listens on.
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[actix_web::test]
async fn reachable_servers_are_online_with_their_fields() {
    let service = service();
    let http_port = http_fixture(
        json!({
            "players": 7,
            "hostname": "fixture",
            "serverName": "fixture",
            "version": "1.0",
            "ping": 12,
            "sv_maxclients": 32
        })
    ).await;
    let udp_port = udp_fixture().await;

    let expected: [(Game, u16, &[&str]); 4] = [
        (Game::Minecraft, udp_port, &["players", "ping", "serverName", "version"]),
        (Game::FiveM, http_port, &["maxPlayers", "ping", "serverName", "version", "data"]),
        (Game::CsGo, http_port, &["players", "maxPlayers", "ping", "serverName", "version", "data"]),
        (Game::Rust, http_port, &["players", "maxPlayers", "ping", "serverName", "version", "data"]),
    ];

    for (game, port, fields) in expected {
        let status = service
            .get_server_status(game.as_str(), "127.0.0.1", Some(port), &QueryOptions::default()).await
            .unwrap();
        let record = status.into_record().unwrap();
        assert!(record.online, "{} should be online", game);
        assert_eq!(record.game, game.display_name());
        for field in fields {
            assert!(record.field(field).is_some(), "{} is missing {}", game, field);
        }
    }
}

#[actix_web::test]
async fn unreachable_servers_are_offline_without_error() {
    let service = service();
    let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let silent_port = silent.local_addr().unwrap().port();

    for game in Game::ALL {
        let port = if game == Game::Minecraft { silent_port } else { closed_port() };
        let status = service
            .get_server_status(game.as_str(), "127.0.0.1", Some(port), &QueryOptions::default()).await
            .unwrap();
        let record = status.into_record().unwrap();
        assert!(!record.online);
        assert_eq!(record.game, game.display_name());
        assert_eq!(record.message.as_deref(), Some("Server is offline"));
    }
}

#[actix_web::test]
async fn batch_against_live_fixtures() {
    let service = service();
    let port = http_fixture(json!({ "players": 3, "hostname": "a", "serverName": "b" })).await;
    let servers = vec![
        ServerDescriptor::new("rust", "127.0.0.1", Some(port)),
        ServerDescriptor::new("csgo", "127.0.0.1", Some(port)),
        ServerDescriptor::new("rust", "127.0.0.1", Some(closed_port()))
    ];

    let results = service
        .check_multiple_servers(&servers, &QueryOptions::default().with_select(["online", "serverName"])).await
        .unwrap();

    let statuses: Vec<Value> = results
        .into_iter()
        .map(|entry| serde_json::to_value(entry.status).unwrap())
        .collect();
    assert_eq!(
        statuses,
        vec![
            json!({ "online": true, "serverName": "a" }),
            json!({ "online": true, "serverName": "b" }),
            json!({ "online": false })
        ]
    );
}
