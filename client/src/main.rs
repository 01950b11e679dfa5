use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use notes_client::cli::CliConfig;
use notes_client::http::HttpNoteStore;
use notes_client::local::LocalNoteStore;
use notes_client::notify::ConsoleNotifier;
use notes_client::view::{render, Command, HELP};
use notes_client::{NoteClient, NoteStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = CliConfig::parse();
    let store: Box<dyn NoteStore> = if config.offline {
        log::info!("Running offline, notes are kept in memory");
        let store = LocalNoteStore::new();
        Box::new(if config.reject_empty { store.rejecting_empty() } else { store })
    } else {
        log::info!("Using notes API at {}", config.api_url);
        Box::new(HttpNoteStore::new(config.api_url))
    };

    let mut client = NoteClient::new(store, ConsoleNotifier);
    client.load().await;
    print!("{}", render(&client));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match command {
            Command::Type(text) => client.set_draft(text),
            Command::Add(text) => {
                if let Some(text) = text {
                    client.set_draft(text);
                }
                client.add().await;
            }
            Command::Edit(id) => {
                if !client.edit(id) {
                    eprintln!("No note with id {}", id);
                }
            }
            Command::Save(text) => {
                if let Some(text) = text {
                    client.set_draft(text);
                }
                client.save().await;
            }
            Command::Cancel => client.cancel_edit(),
            Command::Delete(id) => {
                client.delete(id).await;
            }
            Command::Clear => {
                let report = client.clear_all().await;
                for (id, e) in report.failures() {
                    eprintln!("Could not delete note {}: {}", id, e.detail());
                }
            }
            Command::Search(query) => client.set_search(query),
            Command::List => {}
            Command::Reload => {
                client.load().await;
            }
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        }

        print!("{}", render(&client));
    }

    Ok(())
}
