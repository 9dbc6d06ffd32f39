//! Plugin registration and ordering.

use crate::{GeneratorResult, PipelineError, PipelineResult};
use metaed_core::{EnhancerResult, ValidationFailure};
use metaed_model::MetaEdEnvironment;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

type ValidatorFn = dyn Fn(&MetaEdEnvironment) -> Vec<ValidationFailure> + Send + Sync;
type EnhancerFn = dyn Fn(&mut MetaEdEnvironment) -> EnhancerResult + Send + Sync;
type GeneratorFn = dyn Fn(&MetaEdEnvironment) -> GeneratorResult + Send + Sync;

/// A read-only check over the environment.
pub struct Validator {
    name: String,
    run: Box<ValidatorFn>,
}

impl Validator {
    pub fn new(
        name: impl Into<String>,
        run: impl Fn(&MetaEdEnvironment) -> Vec<ValidationFailure> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            run: Box::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self, env: &MetaEdEnvironment) -> Vec<ValidationFailure> {
        (self.run)(env)
    }
}

/// A pass that annotates the environment in place.
pub struct Enhancer {
    name: String,
    run: Box<EnhancerFn>,
}

impl Enhancer {
    pub fn new(
        name: impl Into<String>,
        run: impl Fn(&mut MetaEdEnvironment) -> EnhancerResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            run: Box::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self, env: &mut MetaEdEnvironment) -> EnhancerResult {
        (self.run)(env)
    }
}

/// A read-only pass producing artifacts.
pub struct Generator {
    name: String,
    run: Box<GeneratorFn>,
}

impl Generator {
    pub fn new(
        name: impl Into<String>,
        run: impl Fn(&MetaEdEnvironment) -> GeneratorResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            run: Box::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self, env: &MetaEdEnvironment) -> GeneratorResult {
        (self.run)(env)
    }
}

/// A named bundle of passes.
pub struct MetaEdPlugin {
    pub short_name: String,
    /// Short names of plugins that must run first.
    pub depends_on: Vec<String>,
    pub validators: Vec<Validator>,
    pub enhancers: Vec<Enhancer>,
    pub generators: Vec<Generator>,
}

impl MetaEdPlugin {
    /// Create a plugin with no passes.
    pub fn new(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            depends_on: Vec::new(),
            validators: Vec::new(),
            enhancers: Vec::new(),
            generators: Vec::new(),
        }
    }

    /// Require another plugin to run first.
    pub fn depends_on(mut self, short_name: impl Into<String>) -> Self {
        self.depends_on.push(short_name.into());
        self
    }

    /// Add a validator.
    pub fn validator(
        mut self,
        name: impl Into<String>,
        run: impl Fn(&MetaEdEnvironment) -> Vec<ValidationFailure> + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Validator::new(name, run));
        self
    }

    /// Add an enhancer. Enhancers run in the order added.
    pub fn enhancer(
        mut self,
        name: impl Into<String>,
        run: impl Fn(&mut MetaEdEnvironment) -> EnhancerResult + Send + Sync + 'static,
    ) -> Self {
        self.enhancers.push(Enhancer::new(name, run));
        self
    }

    /// Add a generator.
    pub fn generator(
        mut self,
        name: impl Into<String>,
        run: impl Fn(&MetaEdEnvironment) -> GeneratorResult + Send + Sync + 'static,
    ) -> Self {
        self.generators.push(Generator::new(name, run));
        self
    }
}

impl fmt::Debug for MetaEdPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |items: Vec<&str>| items.join(", ");
        f.debug_struct("MetaEdPlugin")
            .field("short_name", &self.short_name)
            .field("depends_on", &self.depends_on)
            .field("validators", &names(self.validators.iter().map(Validator::name).collect()))
            .field("enhancers", &names(self.enhancers.iter().map(Enhancer::name).collect()))
            .field("generators", &names(self.generators.iter().map(Generator::name).collect()))
            .finish()
    }
}

/// Order plugins so every plugin follows the plugins it depends on.
///
/// Among plugins whose dependencies are all placed, the earliest registered
/// goes next.
pub fn order_plugins(plugins: Vec<MetaEdPlugin>) -> PipelineResult<Vec<MetaEdPlugin>> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (index, plugin) in plugins.iter().enumerate() {
        if positions.insert(plugin.short_name.clone(), index).is_some() {
            return Err(PipelineError::DuplicatePluginShortName(plugin.short_name.clone()));
        }
    }

    let mut remaining = vec![0usize; plugins.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); plugins.len()];
    for (index, plugin) in plugins.iter().enumerate() {
        let unique: HashSet<&str> = plugin.depends_on.iter().map(String::as_str).collect();
        for dependency in unique {
            let Some(&position) = positions.get(dependency) else {
                return Err(PipelineError::unknown_plugin_dependency(
                    &plugin.short_name,
                    dependency,
                ));
            };
            remaining[index] += 1;
            dependents[position].push(index);
        }
    }

    let mut ready: BTreeSet<usize> = (0..plugins.len()).filter(|i| remaining[*i] == 0).collect();
    let mut order = Vec::with_capacity(plugins.len());
    while let Some(index) = ready.pop_first() {
        order.push(index);
        for dependent in &dependents[index] {
            remaining[*dependent] -= 1;
            if remaining[*dependent] == 0 {
                ready.insert(*dependent);
            }
        }
    }

    if order.len() < plugins.len() {
        let cycle = plugins
            .iter()
            .enumerate()
            .filter(|(index, _)| !order.contains(index))
            .map(|(_, plugin)| plugin.short_name.clone())
            .collect();
        return Err(PipelineError::PluginDependencyCycle(cycle));
    }

    let mut slots: Vec<Option<MetaEdPlugin>> = plugins.into_iter().map(Some).collect();
    Ok(order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect())
}
