//! The staged pipeline run.

use crate::{
    annotate_model_with_configuration, order_plugins, run_enhancers, run_generators,
    run_validators, GeneratorResult, MetaEdConfiguration, MetaEdPlugin, PipelineError,
    PipelineResult, RunReport,
};
use metaed_builder::{walk_builders, ParseTree};
use metaed_model::MetaEdEnvironment;
use metaed_namespace::initialize_namespaces;
use std::fmt;
use tracing::info;

/// Pipeline stages, in the only order they may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Configured,
    Built,
    Validated,
    Enhanced,
    Generated,
}

impl Stage {
    /// The stage that follows this one.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Configured => Some(Stage::Built),
            Stage::Built => Some(Stage::Validated),
            Stage::Validated => Some(Stage::Enhanced),
            Stage::Enhanced => Some(Stage::Generated),
            Stage::Generated => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Configured => "configured",
            Stage::Built => "built",
            Stage::Validated => "validated",
            Stage::Enhanced => "enhanced",
            Stage::Generated => "generated",
        };
        f.write_str(name)
    }
}

/// One run: an environment, its ordered plugins and the current stage.
pub struct Pipeline {
    env: MetaEdEnvironment,
    plugins: Vec<MetaEdPlugin>,
    configuration: MetaEdConfiguration,
    stage: Stage,
    failed_enhancer_count: usize,
    generator_results: Vec<GeneratorResult>,
}

impl Pipeline {
    /// Order plugins, resolve namespaces and set up plugin records.
    pub fn new(
        configuration: MetaEdConfiguration,
        plugins: Vec<MetaEdPlugin>,
    ) -> PipelineResult<Self> {
        let plugins = order_plugins(plugins)?;
        let mut env = MetaEdEnvironment::new(configuration.resolved_data_standard_version()?);
        initialize_namespaces(&mut env.graph, &configuration.projects)?;

        for plugin in &plugins {
            let target = configuration.plugin_target_version(&plugin.short_name)?;
            let record = env.register_plugin(&plugin.short_name);
            if let Some(version) = target {
                record.target_technology_version = version;
            }
        }

        info!(
            namespaces = env.graph.namespace_count(),
            plugins = plugins.len(),
            data_standard_version = %env.data_standard_version,
            "pipeline configured"
        );
        Ok(Self {
            env,
            plugins,
            configuration,
            stage: Stage::Configured,
            failed_enhancer_count: 0,
            generator_results: Vec::new(),
        })
    }

    /// The stage last completed.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn environment(&self) -> &MetaEdEnvironment {
        &self.env
    }

    pub fn environment_mut(&mut self) -> &mut MetaEdEnvironment {
        &mut self.env
    }

    /// Plugins in run order.
    pub fn plugins(&self) -> &[MetaEdPlugin] {
        &self.plugins
    }

    fn advance(&mut self, to: Stage) -> PipelineResult<()> {
        if self.stage.next() != Some(to) {
            return Err(PipelineError::invalid_stage_transition(self.stage, to));
        }
        self.stage = to;
        Ok(())
    }

    fn check_next(&self, to: Stage) -> PipelineResult<()> {
        if self.stage.next() != Some(to) {
            return Err(PipelineError::invalid_stage_transition(self.stage, to));
        }
        Ok(())
    }

    /// Build the graph from a parse tree and annotate it with config rules.
    ///
    /// A build error leaves the pipeline in the configured stage.
    pub fn build(&mut self, tree: &ParseTree) -> PipelineResult<()> {
        self.check_next(Stage::Built)?;
        walk_builders(&mut self.env, tree)?;
        annotate_model_with_configuration(&mut self.env, &self.configuration);
        info!(entities = self.env.graph.entity_count(), "build complete");
        self.advance(Stage::Built)
    }

    /// Run every validator.
    pub fn validate(&mut self) -> PipelineResult<()> {
        self.check_next(Stage::Validated)?;
        run_validators(&mut self.env, &self.plugins);
        self.advance(Stage::Validated)
    }

    /// Run every enhancer.
    pub fn enhance(&mut self) -> PipelineResult<()> {
        self.check_next(Stage::Enhanced)?;
        self.failed_enhancer_count += run_enhancers(&mut self.env, &self.plugins);
        self.advance(Stage::Enhanced)
    }

    /// Run every generator.
    pub fn generate(&mut self) -> PipelineResult<()> {
        self.check_next(Stage::Generated)?;
        self.generator_results = run_generators(&mut self.env, &self.plugins);
        self.advance(Stage::Generated)
    }

    /// Finish the run.
    pub fn into_report(self) -> RunReport {
        RunReport {
            validation_failures: self.env.validation_failures,
            enhancer_results: self.env.enhancer_results,
            failed_enhancer_count: self.failed_enhancer_count,
            generator_results: self.generator_results,
        }
    }
}

/// Run every stage over a parse tree.
pub fn execute_pipeline(
    configuration: MetaEdConfiguration,
    plugins: Vec<MetaEdPlugin>,
    tree: &ParseTree,
) -> PipelineResult<RunReport> {
    let mut pipeline = Pipeline::new(configuration, plugins)?;
    pipeline.build(tree)?;
    pipeline.validate()?;
    pipeline.enhance()?;
    pipeline.generate()?;
    let report = pipeline.into_report();
    info!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        failed_enhancers = report.failed_enhancer_count,
        "pipeline complete"
    );
    Ok(report)
}
