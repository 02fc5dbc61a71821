//! Tool descriptors: the contract each exposed Docker tool advertises.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Tool names
// ---------------------------------------------------------------------------

pub const DOCKER_VERSION: &str = "docker_version";
pub const LIST_CONTAINERS: &str = "list_containers";
pub const LIST_IMAGES: &str = "list_images";
pub const BUILD_IMAGE: &str = "build_image";
pub const RUN_CONTAINER: &str = "run_container";
pub const STOP_CONTAINER: &str = "stop_container";
pub const REMOVE_CONTAINER: &str = "remove_container";
pub const REMOVE_IMAGE: &str = "remove_image";

// ---------------------------------------------------------------------------
// ToolSpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Name clients use in `tools/call`.
    pub name: String,

    /// What this tool does.
    pub description: String,

    /// Parameter declarations, in display order.
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

impl ToolSpec {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: vec![],
        }
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Names of the parameters that have no default.
    pub fn required_params(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| p.is_required())
            .map(|p| p.name.as_str())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub param_type: ParamType,
    #[serde(default)]
    pub description: Option<String>,
    /// Absent means the caller must supply the parameter.
    #[serde(default)]
    pub default_value: Option<Value>,
}

impl ParamSpec {
    pub fn required(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: Some(description.into()),
            default_value: None,
        }
    }

    pub fn optional(
        name: &str,
        param_type: ParamType,
        description: &str,
        default_value: Value,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: Some(description.into()),
            default_value: Some(default_value),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default_value.is_none()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    String,
    Boolean,
}

impl ParamType {
    /// JSON Schema type keyword.
    pub fn schema_type(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Boolean => "boolean",
        }
    }
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// All Docker tools, in the order they are advertised.
pub fn docker_tools() -> Vec<ToolSpec> {
    use serde_json::json;
    use ParamType::{Boolean, String as Text};

    vec![
        ToolSpec::new(DOCKER_VERSION, "Get Docker version info."),
        ToolSpec::new(
            LIST_CONTAINERS,
            "List Docker containers (running only unless `all` is true).",
        )
        .param(ParamSpec::optional(
            "all",
            Boolean,
            "Include stopped containers",
            json!(false),
        )),
        ToolSpec::new(LIST_IMAGES, "List available Docker images."),
        ToolSpec::new(
            BUILD_IMAGE,
            "Build a Docker image with the given tag from a build context path.",
        )
        .param(ParamSpec::required("tag", Text, "Image tag"))
        .param(ParamSpec::optional(
            "path",
            Text,
            "Build context directory",
            json!("."),
        )),
        ToolSpec::new(
            RUN_CONTAINER,
            "Run a Docker container, optionally with a bind mount, interactively (-it) or detached (-d).",
        )
        .param(ParamSpec::required("name", Text, "Container name"))
        .param(ParamSpec::required("image", Text, "Image to run"))
        .param(ParamSpec::optional(
            "mount_host",
            Text,
            "Host path to mount",
            json!(""),
        ))
        .param(ParamSpec::optional(
            "mount_container",
            Text,
            "Path inside the container",
            json!(""),
        ))
        .param(ParamSpec::optional(
            "interactive",
            Boolean,
            "Run with -it when true, detached (-d) otherwise",
            json!(true),
        )),
        ToolSpec::new(STOP_CONTAINER, "Stop a running container.")
            .param(ParamSpec::required("name", Text, "Container name")),
        ToolSpec::new(REMOVE_CONTAINER, "Remove a container by name.")
            .param(ParamSpec::required("name", Text, "Container name"))
            .param(ParamSpec::optional(
                "force",
                Boolean,
                "Force removal of a running container",
                json!(false),
            )),
        ToolSpec::new(REMOVE_IMAGE, "Remove a Docker image by tag.")
            .param(ParamSpec::required("tag", Text, "Image tag"))
            .param(ParamSpec::optional(
                "force",
                Boolean,
                "Force removal of the image",
                json!(false),
            )),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_eight_unique_tools() {
        let tools = docker_tools();
        assert_eq!(tools.len(), 8);

        let mut names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn required_params_are_those_without_defaults() {
        let tools = docker_tools();
        let run = tools.iter().find(|t| t.name == RUN_CONTAINER).unwrap();
        assert_eq!(run.required_params(), vec!["name", "image"]);

        let build = tools.iter().find(|t| t.name == BUILD_IMAGE).unwrap();
        assert_eq!(build.required_params(), vec!["tag"]);

        let version = tools.iter().find(|t| t.name == DOCKER_VERSION).unwrap();
        assert!(version.required_params().is_empty());
    }

    #[test]
    fn param_type_schema_keywords() {
        assert_eq!(ParamType::String.schema_type(), "string");
        assert_eq!(ParamType::Boolean.schema_type(), "boolean");
    }
}
