//! Scenario definition and execution.

use crate::assertion::Expectation;
use crate::error::{ScenarioError, ScenarioResult};
use metaed_builder::{NamespaceNode, ParseTree};
use metaed_namespace::ProjectConfiguration;
use metaed_pipeline::{execute_pipeline, ConfigRule, MetaEdConfiguration, MetaEdPlugin, RunReport};
use tracing::debug;

/// A full pipeline run: projects, declarations, plugins and what to expect.
pub struct Scenario {
    name: String,
    projects: Vec<ProjectConfiguration>,
    data_standard_version: Option<String>,
    rules: Vec<(String, ConfigRule)>,
    tree: ParseTree,
    plugins: Vec<MetaEdPlugin>,
    with_unified: bool,
    expectation: Expectation,
}

impl Scenario {
    /// Create a scenario that runs the unified plugin.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            projects: Vec::new(),
            data_standard_version: None,
            rules: Vec::new(),
            tree: ParseTree::new(),
            plugins: Vec::new(),
            with_unified: true,
            expectation: Expectation::new(),
        }
    }

    /// The scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project(mut self, project: ProjectConfiguration) -> Self {
        self.projects.push(project);
        self
    }

    /// Pin the data standard version instead of taking it from the core project.
    pub fn data_standard(mut self, version: impl Into<String>) -> Self {
        self.data_standard_version = Some(version.into());
        self
    }

    /// Add a config rule for a plugin.
    pub fn rule(mut self, short_name: impl Into<String>, rule: ConfigRule) -> Self {
        self.rules.push((short_name.into(), rule));
        self
    }

    /// Add one namespace's declarations.
    pub fn declare(mut self, namespace: NamespaceNode) -> Self {
        self.tree = self.tree.namespace(namespace);
        self
    }

    pub fn plugin(mut self, plugin: MetaEdPlugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Run only the plugins added explicitly.
    pub fn without_unified(mut self) -> Self {
        self.with_unified = false;
        self
    }

    /// Set what the run must report.
    pub fn expect(mut self, f: impl FnOnce(Expectation) -> Expectation) -> Self {
        self.expectation = f(self.expectation);
        self
    }

    /// The configuration this scenario runs with.
    pub fn configuration(&self) -> MetaEdConfiguration {
        let mut configuration = MetaEdConfiguration::new(self.projects.clone());
        if let Some(version) = &self.data_standard_version {
            configuration = configuration.data_standard(version.clone());
        }
        for (short_name, rule) in &self.rules {
            configuration = configuration.rule(short_name.clone(), rule.clone());
        }
        configuration
    }

    /// Execute every stage and return the report, without checking expectations.
    pub fn execute(self) -> ScenarioResult<RunReport> {
        crate::init_tracing();
        let configuration = self.configuration();
        let mut plugins = Vec::with_capacity(self.plugins.len() + 1);
        if self.with_unified {
            plugins.push(metaed_plugin_unified::initialize());
        }
        plugins.extend(self.plugins);

        debug!(scenario = %self.name, plugins = plugins.len(), "running scenario");
        execute_pipeline(configuration, plugins, &self.tree)
            .map_err(|e| ScenarioError::pipeline(&self.name, e))
    }

    /// Execute and check expectations.
    pub fn run(mut self) -> ScenarioResult<RunReport> {
        let name = self.name.clone();
        let expectation = std::mem::take(&mut self.expectation);
        let report = self.execute()?;
        expectation.verify(&name, &report)?;
        Ok(report)
    }
}
