//! Docker tool call sites: argument builders and the tool entry points.
//!
//! Builders are pure: they append flags according to the parameters and pass
//! names, tags and paths through untouched. No shell is involved, so each
//! value reaches Docker as exactly one argument.

use crate::{run_command, ExecutorError, Invoker};
use dm_core::result::CommandResult;
use dm_core::tool;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

/// Program placed at `argv[0]` unless configured otherwise.
pub const DEFAULT_PROGRAM: &str = "docker";

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListContainersParams {
    #[serde(default)]
    pub all: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildImageParams {
    pub tag: String,
    #[serde(default = "default_build_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunContainerParams {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub mount_host: String,
    #[serde(default)]
    pub mount_container: String,
    #[serde(default = "default_interactive")]
    pub interactive: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopContainerParams {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoveContainerParams {
    pub name: String,
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoveImageParams {
    pub tag: String,
    #[serde(default)]
    pub force: bool,
}

fn default_build_path() -> String {
    ".".into()
}

fn default_interactive() -> bool {
    true
}

impl BuildImageParams {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            path: default_build_path(),
        }
    }
}

impl RunContainerParams {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            mount_host: String::new(),
            mount_container: String::new(),
            interactive: default_interactive(),
        }
    }
}

// ---------------------------------------------------------------------------
// Argument builders
// ---------------------------------------------------------------------------

fn base(program: &str, subcommand: &str) -> Vec<String> {
    vec![program.to_string(), subcommand.to_string()]
}

pub fn version_args(program: &str) -> Vec<String> {
    base(program, "--version")
}

pub fn list_containers_args(program: &str, p: &ListContainersParams) -> Vec<String> {
    let mut argv = base(program, "ps");
    if p.all {
        argv.push("-a".into());
    }
    argv
}

pub fn list_images_args(program: &str) -> Vec<String> {
    base(program, "images")
}

pub fn build_image_args(program: &str, p: &BuildImageParams) -> Vec<String> {
    let mut argv = base(program, "build");
    argv.extend(["-t".to_string(), p.tag.clone(), p.path.clone()]);
    argv
}

pub fn run_container_args(program: &str, p: &RunContainerParams) -> Vec<String> {
    let mut argv = base(program, "run");
    argv.extend(["--name".to_string(), p.name.clone()]);
    if !p.mount_host.is_empty() && !p.mount_container.is_empty() {
        argv.push("-v".into());
        argv.push(format!("{}:{}", p.mount_host, p.mount_container));
    }
    argv.push(if p.interactive { "-it" } else { "-d" }.into());
    argv.push(p.image.clone());
    argv
}

pub fn stop_container_args(program: &str, p: &StopContainerParams) -> Vec<String> {
    let mut argv = base(program, "stop");
    argv.push(p.name.clone());
    argv
}

pub fn remove_container_args(program: &str, p: &RemoveContainerParams) -> Vec<String> {
    let mut argv = base(program, "rm");
    if p.force {
        argv.push("-f".into());
    }
    argv.push(p.name.clone());
    argv
}

pub fn remove_image_args(program: &str, p: &RemoveImageParams) -> Vec<String> {
    let mut argv = base(program, "rmi");
    if p.force {
        argv.push("-f".into());
    }
    argv.push(p.tag.clone());
    argv
}

// ---------------------------------------------------------------------------
// DockerTools
// ---------------------------------------------------------------------------

/// The eight Docker tools, bound to an invoker and a program name.
#[derive(Clone)]
pub struct DockerTools {
    program: String,
    invoker: Arc<dyn Invoker>,
}

impl DockerTools {
    pub fn new(invoker: Arc<dyn Invoker>) -> Self {
        Self::with_program(DEFAULT_PROGRAM, invoker)
    }

    pub fn with_program(program: impl Into<String>, invoker: Arc<dyn Invoker>) -> Self {
        Self {
            program: program.into(),
            invoker,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, argv: Vec<String>) -> Result<CommandResult, ExecutorError> {
        run_command(self.invoker.as_ref(), &argv).await
    }

    pub async fn docker_version(&self) -> Result<CommandResult, ExecutorError> {
        self.run(version_args(&self.program)).await
    }

    pub async fn list_containers(
        &self,
        p: &ListContainersParams,
    ) -> Result<CommandResult, ExecutorError> {
        self.run(list_containers_args(&self.program, p)).await
    }

    pub async fn list_images(&self) -> Result<CommandResult, ExecutorError> {
        self.run(list_images_args(&self.program)).await
    }

    pub async fn build_image(&self, p: &BuildImageParams) -> Result<CommandResult, ExecutorError> {
        self.run(build_image_args(&self.program, p)).await
    }

    pub async fn run_container(
        &self,
        p: &RunContainerParams,
    ) -> Result<CommandResult, ExecutorError> {
        self.run(run_container_args(&self.program, p)).await
    }

    pub async fn stop_container(
        &self,
        p: &StopContainerParams,
    ) -> Result<CommandResult, ExecutorError> {
        self.run(stop_container_args(&self.program, p)).await
    }

    pub async fn remove_container(
        &self,
        p: &RemoveContainerParams,
    ) -> Result<CommandResult, ExecutorError> {
        self.run(remove_container_args(&self.program, p)).await
    }

    pub async fn remove_image(&self, p: &RemoveImageParams) -> Result<CommandResult, ExecutorError> {
        self.run(remove_image_args(&self.program, p)).await
    }

    /// Dispatch a tool by name with JSON arguments.
    ///
    /// `null` arguments are treated as an empty object.
    pub async fn call(
        &self,
        name: &str,
        arguments: &serde_json::Value,
    ) -> Result<CommandResult, ExecutorError> {
        tracing::debug!("[DockerTools] call '{name}' with {arguments}");

        match name {
            tool::DOCKER_VERSION => self.docker_version().await,
            tool::LIST_CONTAINERS => self.list_containers(&parse(name, arguments)?).await,
            tool::LIST_IMAGES => self.list_images().await,
            tool::BUILD_IMAGE => self.build_image(&parse(name, arguments)?).await,
            tool::RUN_CONTAINER => self.run_container(&parse(name, arguments)?).await,
            tool::STOP_CONTAINER => self.stop_container(&parse(name, arguments)?).await,
            tool::REMOVE_CONTAINER => self.remove_container(&parse(name, arguments)?).await,
            tool::REMOVE_IMAGE => self.remove_image(&parse(name, arguments)?).await,
            _ => Err(ExecutorError::UnknownTool(name.to_string())),
        }
    }
}

impl std::fmt::Debug for DockerTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockerTools")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

fn parse<T: DeserializeOwned>(tool: &str, arguments: &serde_json::Value) -> Result<T, ExecutorError> {
    let value = if arguments.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        arguments.clone()
    };
    serde_json::from_value(value).map_err(|e| ExecutorError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
