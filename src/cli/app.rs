use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::cli::actions::{Commands, ConfigSubcommand};
use crate::error::Result;
use crate::models::backend::HttpResponder;
use crate::session::config::Config;
use crate::session::main_loop::{main_loop, ChatView, LoopExit};
use crate::session::store::ConversationStore;
use crate::ui::bubble::View;
use crate::ui::header::{login_screen, LoginChoice};

#[derive(Debug, Parser)]
#[command(name = "chatfront")]
#[command(version)]
#[command(about = "Terminal front-end for the SostenibiliChat assistant", long_about = None)]
pub struct Cli {
    /// Backend base URL, e.g. http://localhost:8000
    #[arg(long, env = "CHAT_API_URL", global = true)]
    pub base_url: Option<String>,

    /// Path of the JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Go straight to the chat view
    #[arg(long, global = true)]
    pub skip_login: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

pub struct App {
    cli: Cli,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        App { cli }
    }

    pub async fn run(self) -> Result<()> {
        let config_path = self.cli.config.clone().unwrap_or_else(Config::default_path);
        let mut config = Config::load_or_init(&config_path)?;
        let base_url = config.resolve_base_url(self.cli.base_url.as_deref());
        debug!(%base_url, config = %config_path.display(), "starting");

        match self.cli.command.unwrap_or(Commands::Chat) {
            Commands::Chat => {
                let chat = ChatView {
                    view: View::detect(config.color.enabled()),
                    show_welcome: config.show_welcome,
                };
                run_chat(&base_url, &chat, self.cli.skip_login).await?;
            }

            Commands::Health => {
                let responder = HttpResponder::new(&base_url);
                let report = responder.health().await?;
                println!("Backend: {}", responder.base_url());
                println!("Estado: {}", report.status);
                for (name, service) in &report.services {
                    match &service.error {
                        Some(err) => println!("  {name}: {} ({err})", service.status),
                        None => println!("  {name}: {}", service.status),
                    }
                }
            }

            Commands::Config { subcommand } => match subcommand {
                ConfigSubcommand::Show => {
                    println!("Configuración ({}):", config_path.display());
                    println!("  base_url: {}", config.base_url);
                    println!("  show_welcome: {}", config.show_welcome);
                    println!("  color: {:?}", config.color);
                    if base_url != config.base_url {
                        println!("  (en uso: {base_url})");
                    }
                }

                ConfigSubcommand::SetBaseUrl { url } => {
                    config.base_url = config.resolve_base_url(Some(&url));
                    config.save(&config_path)?;
                    println!("base_url = {}", config.base_url);
                }

                ConfigSubcommand::SetColor { mode } => {
                    config.color = mode;
                    config.save(&config_path)?;
                    println!("color = {mode:?}");
                }

                ConfigSubcommand::ToggleWelcome => {
                    config.show_welcome = !config.show_welcome;
                    config.save(&config_path)?;
                    println!("show_welcome = {}", config.show_welcome);
                }
            },
        }

        Ok(())
    }
}

/// Login screen and chat view, alternating until the user quits.
async fn run_chat(base_url: &str, chat: &ChatView, skip_login: bool) -> Result<()> {
    let responder = HttpResponder::new(base_url);

    loop {
        if !skip_login && login_screen(chat.view.styled)? == LoginChoice::Quit {
            break;
        }

        // every visit to the chat view starts from an empty conversation
        let mut store = ConversationStore::new(responder.base_url());
        let stdin = io::stdin();
        let stdout = io::stdout();
        let exit = main_loop(
            &responder,
            &mut store,
            chat,
            &mut stdin.lock(),
            &mut stdout.lock(),
        )
        .await?;
        info!(?exit, messages = store.messages().len(), "left chat view");

        if exit == LoopExit::Quit || skip_login {
            break;
        }
    }

    Ok(())
}
