use clap::Parser;
use mosdash::cli::{
    ask, config, handle_completions, handle_init, logs, status, watch, Cli, Commands,
    ConfigCommands, Console,
};
use mosdash::config::DashConfig;

/// File, then `MOSDASH_*` env, then CLI flags.
fn load_config(cli: &Cli) -> Result<DashConfig, Box<dyn std::error::Error>> {
    let mut config = DashConfig::discover(cli.config.as_deref())?.with_env_overrides();
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // These need neither a config file nor a backend.
    match &cli.command {
        Commands::Completions(args) => {
            handle_completions(args);
            return Ok(());
        }
        Commands::Init(args) => {
            println!("{}", handle_init(args)?);
            return Ok(());
        }
        _ => {}
    }

    let dash_config = load_config(&cli)?;
    mosdash::logging::init_tracing(&dash_config.logging)?;
    let console = Console::open(dash_config);

    let output = match &cli.command {
        Commands::Status(args) => status::handle_status(args, &console).await?,
        Commands::Health(args) => status::handle_health(args, &console).await?,
        Commands::Connect(args) => status::handle_connect(args, &console).await?,
        Commands::Upstreams(args) => status::handle_upstreams(args, &console).await?,
        Commands::Logs(args) => logs::handle_logs(args, &console).await?,
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => config::handle_config_show(&console).await?,
            ConfigCommands::Save(args) => config::handle_config_save(args, &console).await?,
            ConfigCommands::Review => config::handle_config_review(&console).await?,
            ConfigCommands::Explain(args) => {
                config::handle_config_explain(args, &console).await?
            }
        },
        Commands::Ask(args) => ask::handle_ask(args, &console).await?,
        Commands::Watch(args) => {
            watch::handle_watch(args, &console).await?;
            String::new()
        }
        Commands::Completions(_) | Commands::Init(_) => String::new(),
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
