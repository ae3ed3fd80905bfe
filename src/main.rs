mod common;
mod config;
mod network;
mod ui;

use clap::Parser;
use dotenvy::dotenv;
use network::SocketClient;
use tokio::sync::mpsc;
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "rust_socket_chat",
    version,
    about = "Minimal real-time chat client"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Server URL, overrides the config file
    #[arg(long, env = "CHAT_SERVER", value_name = "URL")]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    if let Some(server) = cli.server {
        app_config.server_url = server;
    }

    run_client(app_config)
}

fn run_client(app_config: config::AppConfig) -> Result<(), eframe::Error> {
    // Network -> UI
    let (event_tx, event_rx) = mpsc::channel(100);
    // UI -> Network goes through the handle
    let (client, socket) = SocketClient::new(&app_config, event_tx);

    tokio::spawn(async move {
        if let Err(err) = client.run().await {
            log::error!("Socket client terminated: {err}");
        }
    });

    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);
    let title = app_config.window_title.clone();

    log::info!("Client starting against {}", app_config.server_url);

    eframe::run_native(
        &app_config.window_title,
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");

            Ok(Box::new(ChatApp::new(cc, title, socket, event_receiver)))
        }),
    )
}
