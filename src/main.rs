use std::io::{self, Write as _};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use clap::Parser;
use giftflow_rust::app::{App, AppState};
use giftflow_rust::bridge::{HostBridge, InvoiceStatus};
use giftflow_rust::config::ClientConfig;
use giftflow_rust::router::View;
use giftflow_rust::views::{
    CreateCollectionForm, SantaScreen, render_chat_options, render_collection_list,
};
use giftflow_ureq_http_client::UreqHttpClient;
use log::error;

// A small console shell around the GiftFlow client, standing in for the
// Telegram host. Dialogs become terminal prompts.
//
// Usage:
//   cargo run -- --api-base https://example.com/api
//   cargo run -- --user-id 1001 --start-param donate_42

#[derive(Parser, Debug)]
#[command(about = "Console shell for the GiftFlow mini-app client")]
struct Args {
    /// Base URL of the backend API, including the /api prefix
    #[arg(long, default_value = "http://localhost:8080/api")]
    api_base: String,

    /// Telegram user id to act as; omit to use the dev fallback id
    #[arg(long)]
    user_id: Option<i64>,

    /// Startup deep-link parameter, e.g. donate_42 or santa_7
    #[arg(long)]
    start_param: Option<String>,
}

struct ConsoleBridge {
    user_id: Option<i64>,
    start_param: Option<String>,
}

#[async_trait]
impl HostBridge for ConsoleBridge {
    fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    fn start_param(&self) -> Option<String> {
        self.start_param.clone()
    }

    fn show_alert(&self, message: &str) {
        println!("[alert] {message}");
    }

    async fn show_confirm(&self, message: &str) -> bool {
        prompt_yes_no(format!("{message} [y/N] ")).await
    }

    async fn open_invoice(&self, url: &str) -> InvoiceStatus {
        println!("[invoice] {url}");
        if prompt_yes_no("Mark invoice as paid? [y/N] ".to_string()).await {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Cancelled
        }
    }

    fn open_telegram_link(&self, url: &str) {
        println!("[link] {url}");
    }

    fn show_progress(&self) {
        println!("...");
    }

    fn hide_progress(&self) {}
}

async fn prompt_yes_no(prompt: String) -> bool {
    tokio::task::spawn_blocking(move || {
        print!("{prompt}");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim(), "y" | "Y" | "yes")
    })
    .await
    .unwrap_or(false)
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:<5}] [{}] - {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build tokio runtime");

    let bridge = Arc::new(ConsoleBridge {
        user_id: args.user_id,
        start_param: args.start_param,
    });
    let app = App::builder()
        .with_bridge(bridge)
        .with_http_client(Arc::new(UreqHttpClient::new()))
        .with_config(ClientConfig::new(args.api_base))
        .build();
    let app = match app {
        Ok(app) => Arc::new(app),
        Err(e) => {
            error!("Failed to build app: {e}");
            return;
        }
    };

    rt.block_on(app.bootstrap());
    rt.block_on(async { print_snapshot(&app.snapshot().await) });
    print_help();

    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if io::stdin().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, rest)) = parts.split_first() else {
            continue;
        };
        if cmd == "quit" || cmd == "exit" {
            break;
        }
        rt.block_on(handle_command(&app, cmd, rest));
        rt.block_on(async { print_snapshot(&app.snapshot().await) });
    }
}

async fn handle_command(app: &App, cmd: &str, rest: &[&str]) {
    match (cmd, rest) {
        ("home", _) => app.switch_view(View::Home).await,
        ("colls", _) => app.switch_view(View::MyCollections).await,
        ("santa", _) => app.switch_view(View::Santa).await,
        ("open", [id]) => app.open_collection(id).await,
        ("close", _) => app.close_details().await,
        ("form", [chat_id, amount, goal @ ..]) => {
            app.set_create_form(CreateCollectionForm {
                chat_id: (*chat_id).to_string(),
                amount: (*amount).to_string(),
                goal: goal.join(" "),
            })
            .await;
        }
        ("create", _) => {
            let _ = app.create_collection().await;
        }
        ("edit", _) => app.enable_edit_mode().await,
        ("desc", text) => app.set_edit_description(text.join(" ")).await,
        ("save", _) => {
            let _ = app.save_changes().await;
        }
        ("delete", _) => {
            let _ = app.delete_collection().await;
        }
        ("pay", [amount]) => {
            let _ = app.initiate_payment(amount).await;
        }
        ("newgame", _) => {
            let _ = app.create_santa_game().await;
        }
        ("wishlist", text) => app.set_wishlist_input(text.join(" ")).await,
        ("savewish", _) => {
            let _ = app.save_wishlist().await;
        }
        ("startgame", _) => {
            let _ = app.start_santa_game().await;
        }
        ("share", _) => app.share_invite_link().await,
        ("sent", _) => {
            let _ = app.mark_gift_sent().await;
        }
        ("received", _) => {
            let _ = app.mark_gift_received().await;
        }
        ("help", _) => print_help(),
        _ => println!("Unknown command; try 'help'"),
    }
}

fn print_snapshot(state: &AppState) {
    println!("=== view: {} ===", state.view.as_str());
    match state.view {
        View::Home => {
            for option in render_chat_options(state.chats.as_deref().unwrap_or(&[])) {
                println!("  chat: {option}");
            }
        }
        View::MyCollections => {
            let lists = state.collections.clone().unwrap_or_default();
            println!("  created:");
            for row in render_collection_list(&lists.created) {
                println!("    {row}");
            }
            println!("  participated:");
            for row in render_collection_list(&lists.participated) {
                println!("    {row}");
            }
        }
        View::Santa => match &state.santa {
            SantaScreen::Start => println!("  no game yet; 'newgame' starts one"),
            SantaScreen::Lobby(lobby) => {
                println!("  lobby: {} ({} joined)", lobby.title, lobby.participants_count);
                for row in lobby.participant_rows() {
                    println!("    {row}");
                }
                println!("  wishlist: {}", lobby.wishlist_input);
                if lobby.admin_controls {
                    println!("  admin: 'startgame' / 'share'");
                }
            }
            SantaScreen::Game(game) => {
                println!("  your target: {}", game.target_name);
                println!("  their wishlist: {}", game.target_wishlist_html);
            }
            SantaScreen::Unsupported { status } => {
                println!("  game is in an unsupported state: {status}");
            }
        },
    }
    if let Some(details) = &state.details {
        println!("  --- details #{} ---", details.collection_id);
        println!("  {} — {} / {} ⭐ ({}%)", details.goal, details.current, details.amount, details.percent);
        println!("  {}", details.description);
        println!("  image: {}", details.image_url);
        if details.finished {
            println!("  collection finished, thank you!");
        }
        if let Some(status) = &details.upload_status {
            println!("  upload: {status}");
        }
    }
}

fn print_help() {
    println!(
        "commands: home | colls | santa | open <id> | close | form <chat> <amount> <goal> | \
         create | edit | desc <text> | save | delete | pay <amount> | newgame | \
         wishlist <text> | savewish | startgame | share | sent | received | quit"
    );
}
