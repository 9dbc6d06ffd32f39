//! Generator output.

use serde::{Deserialize, Serialize};

/// Content of one generated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputBody {
    Text(String),
    Binary(Vec<u8>),
}

impl OutputBody {
    /// The text content, for text output.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OutputBody::Text(text) => Some(text),
            OutputBody::Binary(_) => None,
        }
    }

    /// The raw bytes of either kind of output.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            OutputBody::Text(text) => text.as_bytes(),
            OutputBody::Binary(bytes) => bytes,
        }
    }
}

/// One generated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedOutput {
    pub name: String,
    pub namespace: String,
    pub folder_name: String,
    pub file_name: String,
    pub body: OutputBody,
}

impl GeneratedOutput {
    /// Create a text artifact.
    pub fn text(
        name: impl Into<String>,
        namespace: impl Into<String>,
        folder_name: impl Into<String>,
        file_name: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            folder_name: folder_name.into(),
            file_name: file_name.into(),
            body: OutputBody::Text(body.into()),
        }
    }
}

/// Everything one generator produced.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorResult {
    pub generator_name: String,
    pub generated_output: Vec<GeneratedOutput>,
}

impl GeneratorResult {
    /// Create an empty result for a generator.
    pub fn new(generator_name: impl Into<String>) -> Self {
        Self {
            generator_name: generator_name.into(),
            generated_output: Vec::new(),
        }
    }

    /// Add an artifact.
    pub fn with_output(mut self, output: GeneratedOutput) -> Self {
        self.generated_output.push(output);
        self
    }
}
