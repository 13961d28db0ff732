//! Cicerone REPL binary entry point.

use std::io::{BufRead, Write};

use clap::Parser;

use cicerone::bots;
use cicerone::cli::{Bot, Cli};
use cicerone::config::CiceroneConfig;
use cicerone::provider::create_provider;
use cicerone::tools::country::CountryApi;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CiceroneConfig::from_env();
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    let provider = create_provider(&config)?;

    let api = CountryApi::new().with_timeout(config.request_timeout);
    let mut surface = match cli.bot {
        Bot::CountryInfo => bots::country_info_surface(provider.as_ref(), &api),
        Bot::MoodTracker => bots::mood_tracker_surface(provider.as_ref()),
        Bot::SmartStore => bots::smart_store_surface(provider.as_ref()),
    };

    println!("{}", surface.on_chat_start());

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }

        if cli.no_stream {
            let reply = surface.on_message(line).await?;
            println!("{reply}");
        } else {
            surface
                .on_message_streamed(line, |delta| {
                    print!("{delta}");
                    let _ = std::io::stdout().flush();
                })
                .await?;
            println!();
        }
    }

    Ok(())
}
