use super::runtime::Runtime;
use crate::infra::config::AppConfig;
use anyhow::Result;
use clap::Subcommand;
use std::io::{self, Write};

#[derive(Subcommand)]
pub enum SystemAction {
    /// Inicia os serviços do runtime
    Start,
    /// Para os serviços do runtime
    Stop,
    /// Mostra o status reportado pelo runtime
    Status,
}

pub fn execute(runtime: &Runtime, action: SystemAction, out: &mut impl Write) -> Result<()> {
    match action {
        SystemAction::Start => runtime.system_service.start(),
        SystemAction::Stop => runtime.system_service.stop(),
        SystemAction::Status => {
            let status = runtime.system_service.status()?;
            writeln!(out, "{}", serde_json::to_string_pretty(&status)?)?;
            Ok(())
        }
    }
}

pub fn run(action: SystemAction, config: &AppConfig) -> Result<()> {
    let runtime = Runtime::new(config)?;
    execute(&runtime, action, &mut io::stdout().lock())
}
