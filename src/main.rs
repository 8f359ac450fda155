use std::sync::Arc;

use anyhow::Context as _;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn, Instrument};

use user_directory::app_system::{setup_tracing, DirectorySystem};
use user_directory::args::{Args, Command};
use user_directory::config::Config;
use user_directory::console::{Console, ConsoleCommand, Flow, HELP};
use user_directory::controller::UserListClient;
use user_directory::domain::Credentials;
use user_directory::error::ControllerError;
use user_directory::render::{render_notification, render_view};
use user_directory::session::{self, FileSession, SessionProvider, StaticSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => e.exit(),
    };
    let config = Config::new(&args.config).context("failed to load configuration")?;
    setup_tracing(&config.log.level);

    let mut system = DirectorySystem::start(&config).context("failed to start directory client")?;
    let store = FileSession::new(&config.session.token_path);

    let result = match args.command {
        Command::Login { email, password } => {
            let span = tracing::info_span!("login");
            async {
                session::login(&system.directory, &store, Credentials { email, password }).await?;
                println!("Logged in.");
                anyhow::Ok(())
            }
            .instrument(span)
            .await
        }
        Command::Logout => {
            store.clear().context("failed to clear session")?;
            println!("Logged out.");
            Ok(())
        }
        Command::Browse { page, token } => {
            let session: Arc<dyn SessionProvider> = match token {
                Some(token) => Arc::new(StaticSession::new(token)),
                None => Arc::new(store.clone()),
            };
            let client = system.open_user_list(&config, session);
            let result = browse(client.clone(), page).await;
            if let Err(e) = client.shutdown().await {
                warn!(error = %e, "Controller already stopped");
            }
            result
        }
    };

    if let Err(e) = system.shutdown().await {
        error!(error = %e, "Shutdown failed");
    }
    result
}

async fn browse(client: UserListClient, page: u32) -> anyhow::Result<()> {
    let opened = Console::open(client, page, |notification| {
        println!("{}", render_notification(&notification));
    })
    .await;
    let mut console = match opened {
        Err(ControllerError::Unauthenticated) => {
            anyhow::bail!("not logged in, run `user_directory login --email .. --password ..` first")
        }
        opened => opened?,
    };

    print!("{}", render_view(&console.client().view().await?));
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        match console.execute(command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Help) => println!("{HELP}"),
            Ok(Flow::Redraw) => {}
            Err(e @ ControllerError::ActorCommunicationError(_)) => return Err(e.into()),
            Err(e) => println!("{e}"),
        }
        print!("{}", render_view(&console.client().view().await?));
    }

    info!("Leaving browser");
    Ok(())
}
