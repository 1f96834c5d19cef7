use std::sync::Arc;

use giftflow_rust::router::View;
use giftflow_rust::test_utils::{MockBridge, MockHttpClient, build_test_app};
use giftflow_rust::views::SantaScreen;
use serde_json::json;

const LOBBY_STATE: &str = r#"{
    "status": "ok",
    "state": {
        "game_id": "g1", "game_title": "Office Santa", "game_status": "recruiting",
        "invite_link": "https://t.me/GiftFlowBot/app?startapp=santa_g1",
        "participants_count": 2, "participants_list": ["@alice", "@bob"],
        "my_wishlist": "socks", "is_creator": true
    }
}"#;

const GAME_STATE: &str = r#"{
    "status": "ok",
    "state": {
        "game_id": "g1", "game_title": "Office Santa", "game_status": "active",
        "target_user_name": "@alice",
        "target_wishlist": "a [kite](https://shop.test/kite)\nand socks"
    }
}"#;

#[tokio::test]
async fn no_game_resolves_to_the_start_screen() {
    let http = Arc::new(MockHttpClient::new());
    let bridge = Arc::new(MockBridge::new());
    let app = build_test_app(http.clone(), bridge.clone());

    http.push_ok(r#"{"status":"ok","state":null}"#);
    app.switch_view(View::Santa).await;

    let state = app.snapshot().await;
    assert_eq!(state.santa, SantaScreen::Start);
    assert!(state.santa_game_id.is_none());
}

#[tokio::test]
async fn recruiting_game_resolves_to_the_lobby() {
    let http = Arc::new(MockHttpClient::new());
    let bridge = Arc::new(MockBridge::new());
    let app = build_test_app(http.clone(), bridge.clone());

    http.push_ok(LOBBY_STATE);
    app.switch_view(View::Santa).await;

    let state = app.snapshot().await;
    assert_eq!(state.santa_game_id.as_deref(), Some("g1"));
    let SantaScreen::Lobby(lobby) = state.santa else {
        panic!("expected the lobby, got {:?}", state.santa);
    };
    assert_eq!(lobby.title, "Office Santa");
    assert_eq!(lobby.participants_count, 2);
    assert_eq!(lobby.participants, vec!["@alice", "@bob"]);
    assert_eq!(lobby.wishlist_input, "socks");
    assert!(lobby.admin_controls);
}

#[tokio::test]
async fn active_game_renders_the_target_and_their_wishlist() {
    let http = Arc::new(MockHttpClient::new());
    let bridge = Arc::new(MockBridge::new());
    let app = build_test_app(http.clone(), bridge.clone());

    http.push_ok(GAME_STATE);
    app.switch_view(View::Santa).await;

    let SantaScreen::Game(game) = app.snapshot().await.santa else {
        panic!("expected the game screen");
    };
    assert_eq!(game.target_name, "@alice");
    assert_eq!(
        game.target_wishlist_html,
        "a <a href=\"https://shop.test/kite\" target=\"_blank\" class=\"wishlist-link\">kite</a><br>and socks"
    );
}

#[tokio::test]
async fn unknown_game_status_shows_the_unsupported_screen() {
    let http = Arc::new(MockHttpClient::new());
    let bridge = Arc::new(MockBridge::new());
    let app = build_test_app(http.clone(), bridge.clone());

    http.push_ok(
        r#"{"status":"ok","state":{"game_id":"g1","game_status":"archived"}}"#,
    );
    app.switch_view(View::Santa).await;

    assert_eq!(
        app.snapshot().await.santa,
        SantaScreen::Unsupported {
            status: "archived".to_string()
        }
    );
}

#[tokio::test]
async fn creating_a_game_posts_the_default_title_and_resyncs() {
    let http = Arc::new(MockHttpClient::new());
    let bridge = Arc::new(MockBridge::new());
    let app = build_test_app(http.clone(), bridge.clone());

    http.push_ok(r#"{"status":"ok"}"#);
    http.push_ok(LOBBY_STATE);
    app.create_santa_game().await.unwrap();

    assert_eq!(http.endpoints(), vec!["/santa/create", "/santa/state"]);
    assert_eq!(http.requests()[0].body["title"], json!("Secret Santa"));
    assert!(matches!(app.snapshot().await.santa, SantaScreen::Lobby(_)));
}

#[tokio::test]
async fn saving_an_empty_wishlist_is_rejected_locally() {
    let http = Arc::new(MockHttpClient::new());
    let bridge = Arc::new(MockBridge::new());
    let app = build_test_app(http.clone(), bridge.clone());

    http.push_ok(LOBBY_STATE);
    app.switch_view(View::Santa).await;
    app.set_wishlist_input("").await;
    let requests_before = http.request_count();

    let err = app.save_wishlist().await.unwrap_err();

    assert_eq!(err.message, "Wishlist is empty!");
    assert_eq!(bridge.alerts(), vec!["Wishlist is empty!"]);
    assert_eq!(http.request_count(), requests_before);
}

#[tokio::test]
async fn saving_a_wishlist_joins_the_cached_game_and_resyncs() {
    let http = Arc::new(MockHttpClient::new());
    let bridge = Arc::new(MockBridge::new());
    let app = build_test_app(http.clone(), bridge.clone());

    http.push_ok(LOBBY_STATE);
    app.switch_view(View::Santa).await;
    app.set_wishlist_input("books and tea").await;
    app.save_wishlist().await.unwrap();

    assert_eq!(
        http.endpoints(),
        vec!["/santa/state", "/santa/join", "/santa/state"]
    );
    let join = &http.requests()[1];
    assert_eq!(join.body["game_id"], json!("g1"));
    assert_eq!(join.body["wishlist"], json!("books and tea"));
    assert_eq!(bridge.alerts(), vec!["Saved!"]);
}

#[tokio::test]
async fn starting_the_draw_is_confirmation_gated() {
    let http = Arc::new(MockHttpClient::new());
    let bridge = Arc::new(MockBridge::new());
    let app = build_test_app(http.clone(), bridge.clone());

    http.push_ok(LOBBY_STATE);
    app.switch_view(View::Santa).await;
    let requests_before = http.request_count();

    bridge.set_confirm_answer(false);
    app.start_santa_game().await.unwrap();
    assert_eq!(bridge.confirms(), vec!["Start the draw?"]);
    assert_eq!(http.request_count(), requests_before);

    bridge.set_confirm_answer(true);
    http.push_ok(r#"{"status":"ok"}"#);
    http.push_ok(GAME_STATE);
    app.start_santa_game().await.unwrap();

    assert_eq!(
        http.endpoints()[requests_before..],
        ["/santa/start", "/santa/state"]
    );
    assert_eq!(http.requests()[requests_before].body["game_id"], json!("g1"));
    assert!(matches!(app.snapshot().await.santa, SantaScreen::Game(_)));
}

#[tokio::test]
async fn sharing_hands_the_encoded_invite_link_to_the_host() {
    let http = Arc::new(MockHttpClient::new());
    let bridge = Arc::new(MockBridge::new());
    let app = build_test_app(http.clone(), bridge.clone());

    http.push_ok(LOBBY_STATE);
    app.switch_view(View::Santa).await;
    app.share_invite_link().await;

    let links = bridge.opened_links();
    assert_eq!(links.len(), 1);
    assert!(links[0].starts_with("https://t.me/share/url?url="));
    assert!(links[0].contains("santa_g1"));
    // The invite link itself must be percent-encoded inside the share URL.
    assert!(links[0].contains("https%3A%2F%2Ft.me%2FGiftFlowBot"));
}

#[tokio::test]
async fn sharing_without_a_cached_link_alerts_instead() {
    let http = Arc::new(MockHttpClient::new());
    let bridge = Arc::new(MockBridge::new());
    let app = build_test_app(http.clone(), bridge.clone());

    app.share_invite_link().await;

    assert!(bridge.opened_links().is_empty());
    assert_eq!(bridge.alerts(), vec!["Invite link not found"]);
}

#[tokio::test]
async fn gift_sent_and_received_are_confirmation_gated_and_resync() {
    let http = Arc::new(MockHttpClient::new());
    let bridge = Arc::new(MockBridge::new());
    let app = build_test_app(http.clone(), bridge.clone());

    http.push_ok(GAME_STATE);
    app.switch_view(View::Santa).await;
    let requests_before = http.request_count();

    bridge.set_confirm_answer(false);
    app.mark_gift_sent().await.unwrap();
    app.mark_gift_received().await.unwrap();
    assert_eq!(http.request_count(), requests_before);
    assert!(bridge.alerts().is_empty());

    bridge.set_confirm_answer(true);
    app.mark_gift_sent().await.unwrap();
    app.mark_gift_received().await.unwrap();

    assert_eq!(
        http.endpoints()[requests_before..],
        ["/santa/sent", "/santa/state", "/santa/received", "/santa/state"]
    );
    assert_eq!(bridge.alerts(), vec!["Done!", "Great!"]);
}
