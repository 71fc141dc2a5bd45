use anyhow::{Result, bail};
use boxdeck::cli::{self, RuntimeAction, SystemAction};
use boxdeck::infra::PathProbe;
use boxdeck::infra::config::{default_config_dir, load_app_config};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "boxdeck",
    about = "Painel de containers sobre o CLI 'container' da Apple"
)]
struct Cli {
    /// Diretório de configuração (default: ~/.config/boxdeck)
    #[arg(long, env = "BOXDECK_CONFIG_DIR", default_value_os_t = default_config_dir())]
    config_dir: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Runtime(RuntimeAction),
    /// Controle dos serviços do runtime
    System {
        #[command(subcommand)]
        action: SystemAction,
    },
    /// Verifica o binário do runtime e o arquivo de config
    Doctor,
    /// Cria o boxdeck.toml padrão se ainda não existir
    Setup,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let config = load_app_config(&args.config_dir)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Commands::Runtime(action) => cli::runtime::run(action, &config),
        Commands::System { action } => cli::system::run(action, &config),
        Commands::Doctor => {
            if !cli::setup::doctor(&args.config_dir, &config, &PathProbe::new()) {
                bail!("verificação falhou");
            }
            Ok(())
        }
        Commands::Setup => cli::setup::install(&args.config_dir),
    }
}
