use crate::domain::{Container, ContainerRuntime, Image};
use crate::infra::config::AppConfig;
use crate::infra::{AppleContainerRuntime, PathProbe, ProcessExecutor};
use crate::services::{ContainerService, SystemService};
use anyhow::{Result, bail};
use clap::Subcommand;
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Subcommand)]
pub enum RuntimeAction {
    /// Lista os containers
    Ps {
        /// Uma linha JSON por container
        #[arg(long)]
        json: bool,
    },
    /// Lista as imagens
    Images {
        /// Uma linha JSON por imagem
        #[arg(long)]
        json: bool,
    },
    /// Constrói uma imagem a partir de um Dockerfile (contexto: diretório atual)
    Build {
        #[arg(long, short)]
        tag: String,
        #[arg(long, short, default_value = "Dockerfile")]
        file: String,
    },
    /// Cria e inicia um container
    Run {
        #[arg(long)]
        name: String,
        /// Roda em segundo plano
        #[arg(long, short)]
        detach: bool,
        image: String,
    },
    /// Para um container (nome ou id)
    Stop { container: String },
    /// Remove um container (nome ou id)
    Rm {
        #[arg(long, short)]
        force: bool,
        container: String,
    },
    /// Executa um comando dentro de um container
    Exec {
        container: String,
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

pub struct Runtime {
    pub container_service: ContainerService,
    pub system_service: SystemService,
}

impl Runtime {
    /// Wires the real process executor against the configured binary.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let runtime = AppleContainerRuntime::with_binary(
            config.binary(),
            Arc::new(ProcessExecutor::new()),
            &PathProbe::new(),
        )?;
        Ok(Self::with_runtime(Arc::new(runtime)))
    }

    pub fn with_runtime(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self {
            container_service: ContainerService::new(runtime.clone()),
            system_service: SystemService::new(runtime),
        }
    }

    pub fn execute(&self, action: RuntimeAction, out: &mut impl Write) -> Result<()> {
        match action {
            RuntimeAction::Ps { json } => {
                let containers = self.container_service.list()?;
                write_containers(&containers, json, out)
            }
            RuntimeAction::Images { json } => {
                let images = self.container_service.images()?;
                write_images(&images, json, out)
            }
            RuntimeAction::Build { tag, file } => {
                let file = shellexpand::tilde(&file).into_owned();
                self.system_service.build_image(&tag, &file)
            }
            RuntimeAction::Run {
                name,
                detach,
                image,
            } => self.container_service.run(&name, &image, detach),
            RuntimeAction::Stop { container } => self.container_service.stop(&container),
            RuntimeAction::Rm { force, container } => {
                self.container_service.remove(&container, force)
            }
            RuntimeAction::Exec { container, command } => {
                if command.is_empty() {
                    bail!("nenhum comando informado para {container}");
                }
                self.container_service
                    .exec(&container, &shell_words::join(&command))
            }
        }
    }
}

pub fn run(action: RuntimeAction, config: &AppConfig) -> Result<()> {
    let runtime = Runtime::new(config)?;
    runtime.execute(action, &mut io::stdout().lock())
}

pub fn write_containers(containers: &[Container], json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        for container in containers {
            writeln!(out, "{}", serde_json::to_string(container)?)?;
        }
        return Ok(());
    }

    writeln!(out, "{:<14} {:<24} {:<28} {}", "ID", "NAME", "IMAGE", "STATE")?;
    for c in containers {
        writeln!(
            out,
            "{:<14} {:<24} {:<28} {}",
            short_id(&c.id),
            c.name,
            c.image,
            c.state
        )?;
    }
    Ok(())
}

pub fn write_images(images: &[Image], json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        for image in images {
            writeln!(out, "{}", serde_json::to_string(image)?)?;
        }
        return Ok(());
    }

    writeln!(out, "{:<14} {:<32} {}", "ID", "NAME", "TAG")?;
    for i in images {
        writeln!(out, "{:<14} {:<32} {}", short_id(&i.id), i.name, i.tag)?;
    }
    Ok(())
}

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(12) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
