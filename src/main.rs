use api::api::start_server;

#[macro_use]
extern crate diesel;

use clap::{Parser, Subcommand};
use config::{ClientConfig, ServerConfig};
use errors::TodoError;
use models::todo_model::ToDo;

mod api;
mod config;
mod errors;
mod models;
mod schema;
mod todo_commands;
mod utils;

#[derive(Debug, Subcommand)]
enum Commands {
    #[clap(alias = "ls")]
    List,
    #[clap(alias = "c")]
    Create {
        /// Prompted for when left out
        name: Option<String>,
    },
    Update {
        id: i32,
        name: String,
    },
    Delete {
        id: i32,
    },
}

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = "Serve and manage todos")]
struct TodoArgs {
    #[clap(short = 's', long = "start-server")]
    start_server: bool,

    /// Address the server listens on, overrides API_URL
    #[clap(long = "bind")]
    bind: Option<String>,

    /// Sqlite database the server uses, overrides DATABASE_URL
    #[clap(long = "database-url")]
    database_url: Option<String>,

    /// host:port of the server the commands talk to, overrides API_URL
    #[clap(long = "api-url")]
    api_url: Option<String>,

    #[clap(subcommand)]
    command: Option<Commands>,
}

fn run_command(command: &Commands, config: &ClientConfig) -> Result<(), TodoError> {
    match command {
        Commands::List => {
            for todo in todo_commands::list_todos(config)? {
                println!("{:>5}  {}", todo.id, todo.to_do_name);
            }
        }
        Commands::Create { name } => {
            let name = match name {
                Some(name) => name.to_owned(),
                None => todo_commands::prompt_todo_name()?,
            };

            if let Some(created) = todo_commands::create_todo(config, &name)? {
                println!("{:>5}  {}", created.id, created.to_do_name);
            }
        }
        Commands::Update { id, name } => {
            let todo = ToDo {
                id: *id,
                to_do_name: name.to_owned(),
            };

            todo_commands::update_todo(config, &todo)?;
        }
        Commands::Delete { id } => {
            todo_commands::delete_todo(config, *id)?;
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,actix_web=info"),
    )
    .init();

    let args = TodoArgs::parse();

    if args.start_server {
        let mut config = ServerConfig::from_env();

        if let Some(bind) = args.bind {
            config.bind_address = bind;
        }
        if let Some(database_url) = args.database_url {
            config.database_url = database_url;
        }

        start_server(config)?;

        return Ok(());
    }

    let mut config = ClientConfig::from_env();

    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }

    if let Some(command) = &args.command {
        // failures are reported once and never retried
        if let Err(e) = run_command(command, &config) {
            log::error!("{}", e);
        }
    }

    Ok(())
}
