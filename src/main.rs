use clap::Parser;
use courier::cli::{
    groups, handle_completions, handle_config_init, history, templates, Cli, Commands,
    ConfigCommands, GroupsCommands, HistoryCommands, TemplatesCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => courier::cli::serve::run_serve(args).await,
        Commands::History(cmd) => match cmd {
            HistoryCommands::List(args) => history::handle_history_list(&args)
                .await
                .map(|output| println!("{}", output)),
            HistoryCommands::Clear(args) => history::handle_history_clear(&args)
                .await
                .map(|msg| println!("{}", msg)),
        },
        Commands::Templates(cmd) => match cmd {
            TemplatesCommands::List(args) => templates::handle_templates_list(&args)
                .await
                .map(|output| println!("{}", output)),
        },
        Commands::Groups(cmd) => match cmd {
            GroupsCommands::List(args) => groups::handle_groups_list(&args)
                .await
                .map(|output| println!("{}", output)),
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
