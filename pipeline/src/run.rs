//! The validate, enhance and generate passes.

use crate::{GeneratorResult, MetaEdPlugin};
use metaed_core::ValidationFailure;
use metaed_model::MetaEdEnvironment;
use std::any::Any;
use std::thread;
use tracing::{debug, info, warn};

/// Check if there is nothing for enhancers and generators to work on.
///
/// True when building never completed, no namespace exists, or no property
/// was indexed.
pub fn nothing_to_transform(env: &MetaEdEnvironment) -> bool {
    !env.has_built_graph() || env.graph.property_index().is_empty()
}

/// Run every validator of every plugin, in plugin order.
///
/// Failures accumulate on the environment. Returns how many were added.
pub fn run_validators(env: &mut MetaEdEnvironment, plugins: &[MetaEdPlugin]) -> usize {
    let before = env.validation_failures.len();
    for plugin in plugins {
        for validator in &plugin.validators {
            let failures = validator.run(env);
            debug!(
                plugin = %plugin.short_name,
                validator = %validator.name(),
                failures = failures.len(),
                "ran validator"
            );
            env.validation_failures.extend(failures);
        }
    }
    let added = env.validation_failures.len() - before;
    info!(failures = added, "validation complete");
    added
}

/// Run every enhancer of every plugin, sequentially in declared order.
///
/// A failed enhancer is logged and recorded; later enhancers still run.
/// Returns how many enhancers failed.
pub fn run_enhancers(env: &mut MetaEdEnvironment, plugins: &[MetaEdPlugin]) -> usize {
    if nothing_to_transform(env) {
        info!("no built model, skipping enhancers");
        return 0;
    }

    let mut failed = 0;
    for plugin in plugins {
        for enhancer in &plugin.enhancers {
            let result = enhancer.run(env);
            if result.success {
                debug!(plugin = %plugin.short_name, enhancer = %enhancer.name(), "ran enhancer");
            } else {
                failed += 1;
                warn!(
                    plugin = %plugin.short_name,
                    enhancer = %enhancer.name(),
                    failure = ?result.validation_failure.as_ref().map(|f| f.message.as_str()),
                    "enhancer failed"
                );
            }
            env.enhancer_results.push(result);
        }
    }
    info!(failed, "enhancement complete");
    failed
}

/// Run every generator concurrently against a read-only environment.
///
/// Results come back in plugin and generator order. A generator that panics
/// contributes no result; its panic is recorded as an error-category failure
/// and the other generators keep theirs.
pub fn run_generators(
    env: &mut MetaEdEnvironment,
    plugins: &[MetaEdPlugin],
) -> Vec<GeneratorResult> {
    if nothing_to_transform(env) {
        info!("no built model, skipping generators");
        return Vec::new();
    }

    let shared: &MetaEdEnvironment = env;
    let joined: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = plugins
            .iter()
            .flat_map(|plugin| plugin.generators.iter().map(move |generator| (plugin, generator)))
            .map(|(plugin, generator)| {
                (plugin, generator, scope.spawn(move || generator.run(shared)))
            })
            .collect();

        handles
            .into_iter()
            .map(|(plugin, generator, handle)| (plugin, generator, handle.join()))
            .collect()
    });

    let mut results = Vec::with_capacity(joined.len());
    for (plugin, generator, outcome) in joined {
        match outcome {
            Ok(result) => results.push(result),
            Err(payload) => {
                let reason = panic_message(&*payload);
                warn!(
                    plugin = %plugin.short_name,
                    generator = %generator.name(),
                    reason,
                    "generator panicked"
                );
                env.validation_failures.push(ValidationFailure::error(
                    generator.name(),
                    format!(
                        "Generator {} of plugin {} panicked: {}",
                        generator.name(),
                        plugin.short_name,
                        reason
                    ),
                ));
            }
        }
    }

    info!(generators = results.len(), "generation complete");
    results
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
