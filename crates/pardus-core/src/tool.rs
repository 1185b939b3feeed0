//! Tool Descriptors
//!
//! A tool is a named local function the model may ask to run, described
//! by an explicit [`ToolSpec`]. The spec lists parameters in declaration
//! order and carries their type annotations separately; deriving the wire
//! schema fails if any declared parameter is missing an annotation.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value, json};

use crate::error::{PardusError, Result};
use crate::wire::{ParameterSet, ToolSchema};

/// Arguments handed to a tool handler, keyed by parameter name.
pub type ToolArgs = Map<String, Value>;

/// Local function executed when the model calls the tool.
pub type ToolHandler = Box<dyn Fn(&ToolArgs) -> Result<Value> + Send + Sync>;

/// JSON-Schema type of a single tool parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl ParamType {
    /// JSON-Schema type name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

/// Descriptor of a tool: name, description and parameter declarations.
///
/// Parameters are recorded in two pieces. `params` fixes the declaration
/// order; `annotations` maps each parameter to its type. Keeping them
/// separate lets [`ToolSpec::schema`] detect a declared-but-unannotated
/// parameter and name it in the error.
#[derive(Debug, Default, Clone)]
pub struct ToolSpec {
    name: String,
    description: String,
    params: Vec<String>,
    annotations: HashMap<String, ParamType>,
    descriptions: HashMap<String, String>,
    required: Vec<String>,
}

impl ToolSpec {
    /// Create a spec for the named tool.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the tool description shown to the model.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare a parameter with its type annotation.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, kind: ParamType) -> Self {
        let name = name.into();
        self.annotations.insert(name.clone(), kind);
        self.params.push(name);
        self
    }

    /// Declare a parameter without an annotation. Schema derivation will
    /// fail until [`ToolSpec::annotate`] supplies one.
    #[must_use]
    pub fn declared(mut self, name: impl Into<String>) -> Self {
        self.params.push(name.into());
        self
    }

    /// Attach a type annotation to an already declared parameter.
    #[must_use]
    pub fn annotate(mut self, name: impl Into<String>, kind: ParamType) -> Self {
        self.annotations.insert(name.into(), kind);
        self
    }

    /// Attach a description to a parameter. Undescribed parameters get an
    /// empty string in the schema.
    #[must_use]
    pub fn describe(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.descriptions.insert(name.into(), description.into());
        self
    }

    /// Mark parameters as required in the advertised schema. Nothing is
    /// required unless listed here.
    #[must_use]
    pub fn required(mut self, names: &[&str]) -> Self {
        self.required = names.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Tool name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Derive the wire schema advertised to the model.
    ///
    /// # Errors
    ///
    /// Returns [`PardusError::MissingAnnotation`] if any declared
    /// parameter has no type annotation.
    pub fn schema(&self) -> Result<ToolSchema> {
        let mut properties = Map::new();
        for param in &self.params {
            let kind =
                self.annotations
                    .get(param)
                    .ok_or_else(|| PardusError::MissingAnnotation {
                        tool: self.name.clone(),
                        param: param.clone(),
                    })?;
            let description = self.descriptions.get(param).map_or("", String::as_str);
            properties.insert(
                param.clone(),
                json!({
                    "type": kind.as_str(),
                    "description": description,
                }),
            );
        }

        Ok(ToolSchema {
            kind: "function".to_string(),
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: ParameterSet {
                kind: "object".to_string(),
                properties,
            },
            required: self.required.clone(),
            additional_properties: false,
        })
    }
}

/// A registered tool: descriptor plus the local function behind it.
pub struct Tool {
    spec: ToolSpec,
    handler: ToolHandler,
}

impl Tool {
    /// Pair a spec with its handler.
    pub fn new<F>(spec: ToolSpec, handler: F) -> Self
    where
        F: Fn(&ToolArgs) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            spec,
            handler: Box::new(handler),
        }
    }

    /// Tool name
    #[must_use]
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// Tool descriptor
    #[must_use]
    pub const fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    /// Derive the wire schema for this tool.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec has an unannotated parameter.
    pub fn schema(&self) -> Result<ToolSchema> {
        self.spec.schema()
    }

    /// Run the handler with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns whatever error the handler produced.
    pub fn invoke(&self, args: &ToolArgs) -> Result<Value> {
        (self.handler)(args)
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of tools, keyed by name.
///
/// Registration order is preserved; registering a second tool under an
/// existing name replaces the first in place.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A tool with the same name is replaced.
    pub fn register(&mut self, tool: Tool) {
        match self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            Some(slot) => *slot = tool,
            None => self.tools.push(tool),
        }
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Derive wire schemas for every registered tool, in registration
    /// order.
    ///
    /// # Errors
    ///
    /// Returns the first schema-derivation failure.
    pub fn schemas(&self) -> Result<Vec<ToolSchema>> {
        self.tools.iter().map(Tool::schema).collect()
    }

    /// Registered tool names, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(Tool::name).collect()
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
