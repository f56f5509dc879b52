//! Theoria Theory Runner
//!
//! The external driver that turns the enumeration engine into executed
//! tests. Runs each theory once per complete combination of candidate
//! values, depth-first:
//!
//! 1. **Setup**: validate the fixture and build the initial assignment
//! 2. **Enumeration**: for the next unassigned parameter, fetch its
//!    candidate list and recurse once per candidate, in supplier order
//! 3. **Materialization**: on a complete assignment, evaluate the
//!    constructor and method arguments (an unavailable value discards
//!    just that branch)
//! 4. **Execution**: invoke the theory function with the arguments
//! 5. **Reporting**: fold outcomes into a pass/fail result with the
//!    failing combination's descriptions, plus colored suite output
//!
//! Ordering is load-bearing: the first failing combination reported is
//! determined by declaration order across parameters and supplier order
//! within one parameter, so failure reports are reproducible run to run.

use std::rc::Rc;

use crate::assignments::Assignments;
use crate::errors::TheoryError;
use crate::fixture::{ConstructSpec, Fixture};
use crate::signature::{DeclaredNames, NameResolver};
use crate::supplier::{build_default_supplier_registry, SupplierRegistry};
use crate::value::Value;

/// Outcome of one invocation of a theory function.
#[derive(Debug, Clone, PartialEq)]
pub enum TheoryOutcome {
    /// The combination satisfied the theory.
    Passed,
    /// A precondition did not hold for this combination; the invocation
    /// is discounted rather than failed.
    AssumptionViolated(String),
    /// The theory is false for this combination.
    Failed(String),
}

/// The theory function: constructor arguments, then method arguments.
pub type TheoryFn = Box<dyn Fn(&[Value], &[Value]) -> TheoryOutcome>;

/// A named theory method: its formal parameter declaration plus the
/// function to execute per combination.
pub struct Theory {
    name: String,
    params: ConstructSpec,
    run: TheoryFn,
}

impl Theory {
    pub fn new(
        name: impl Into<String>,
        params: ConstructSpec,
        run: impl Fn(&[Value], &[Value]) -> TheoryOutcome + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            run: Box::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &ConstructSpec {
        &self.params
    }
}

/// Result of running one theory across all combinations.
#[derive(Debug, Clone, PartialEq)]
pub enum TheoryResult {
    /// Every reached combination satisfied the theory.
    Pass {
        theory: String,
        /// Number of combinations that actually executed and passed.
        combinations: usize,
    },
    /// The theory failed, or no valid combination was ever reached.
    Fail {
        theory: String,
        error: String,
        /// Descriptions of the assigned candidates at the failure, in
        /// assignment order. Empty when the failure precedes assignment.
        arguments: Vec<String>,
    },
}

/// Configuration for theory execution and reporting.
pub struct TheoryConfig {
    /// Whether an absent candidate value materializes as nil instead of
    /// discarding the branch.
    pub nulls_allowed: bool,
    pub use_colors: bool,
}

impl Default for TheoryConfig {
    fn default() -> Self {
        Self {
            nulls_allowed: false,
            use_colors: atty::is(atty::Stream::Stderr),
        }
    }
}

// Color constants for terminal output
const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";

impl TheoryConfig {
    /// Apply color formatting to text if colors are enabled.
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

// Search bookkeeping threaded through the recursion.
struct RunStats {
    successes: usize,
}

/// Drives theories against one fixture.
pub struct TheoryRunner {
    fixture: Rc<Fixture>,
    resolver: Rc<dyn NameResolver>,
    registry: Rc<SupplierRegistry>,
    config: TheoryConfig,
}

impl TheoryRunner {
    /// A runner with the default name resolver, the canonical supplier
    /// registry, and default configuration.
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture: Rc::new(fixture),
            resolver: Rc::new(DeclaredNames),
            registry: Rc::new(build_default_supplier_registry()),
            config: TheoryConfig::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: impl NameResolver + 'static) -> Self {
        self.resolver = Rc::new(resolver);
        self
    }

    pub fn with_registry(mut self, registry: SupplierRegistry) -> Self {
        self.registry = Rc::new(registry);
        self
    }

    pub fn with_config(mut self, config: TheoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one theory across every combination of candidate values.
    pub fn run_theory(&self, theory: &Theory) -> TheoryResult {
        if let Err(err) = self.fixture.validate() {
            return TheoryResult::Fail {
                theory: theory.name.clone(),
                error: TheoryError::from(err).to_string(),
                arguments: Vec::new(),
            };
        }

        let initial = Assignments::all_unassigned(
            &theory.params,
            Rc::clone(&self.fixture),
            Rc::clone(&self.resolver),
            Rc::clone(&self.registry),
        );

        let mut stats = RunStats { successes: 0 };
        if let Err(failure) = self.explore(theory, &initial, &mut stats) {
            return failure;
        }

        if stats.successes == 0 {
            return TheoryResult::Fail {
                theory: theory.name.clone(),
                error: "never found parameters that satisfied theory assumptions".to_string(),
                arguments: Vec::new(),
            };
        }
        TheoryResult::Pass {
            theory: theory.name.clone(),
            combinations: stats.successes,
        }
    }

    /// Run a set of theories and report the results.
    pub fn run_suite(&self, theories: &[Theory]) -> Vec<TheoryResult> {
        let results: Vec<TheoryResult> = theories
            .iter()
            .map(|theory| self.run_theory(theory))
            .collect();
        report_results(&results, &self.config);
        results
    }

    // Depth-first traversal. Err short-circuits with the final failing
    // result; Ok means this subtree is exhausted.
    fn explore(
        &self,
        theory: &Theory,
        assignments: &Assignments,
        stats: &mut RunStats,
    ) -> Result<(), TheoryResult> {
        if assignments.is_complete() {
            return self.run_with_complete(theory, assignments, stats);
        }

        let potentials = assignments.potentials_for_next().map_err(|err| {
            // Supplier resolution failed: no candidate list exists for
            // this parameter, so the whole theory aborts.
            TheoryResult::Fail {
                theory: theory.name.clone(),
                error: err.to_string(),
                arguments: assignments.argument_descriptions(),
            }
        })?;

        for source in potentials {
            self.explore(theory, &assignments.assign_next(source), stats)?;
        }
        Ok(())
    }

    fn run_with_complete(
        &self,
        theory: &Theory,
        assignments: &Assignments,
        stats: &mut RunStats,
    ) -> Result<(), TheoryResult> {
        let nulls_allowed = self.config.nulls_allowed;

        let constructor_args = match assignments.constructor_arguments(nulls_allowed) {
            Ok(values) => values,
            Err(err) => return self.discard_or_abort(theory, assignments, err),
        };
        let method_args = match assignments.method_arguments(nulls_allowed) {
            Ok(values) => values,
            Err(err) => return self.discard_or_abort(theory, assignments, err),
        };

        match (theory.run)(&constructor_args, &method_args) {
            TheoryOutcome::Passed => {
                stats.successes += 1;
                Ok(())
            }
            TheoryOutcome::AssumptionViolated(_) => Ok(()),
            TheoryOutcome::Failed(message) => Err(TheoryResult::Fail {
                theory: theory.name.clone(),
                error: message,
                arguments: assignments.argument_descriptions(),
            }),
        }
    }

    // A recoverable materialization failure discards just this branch;
    // anything else carries the failure out of the search.
    fn discard_or_abort(
        &self,
        theory: &Theory,
        assignments: &Assignments,
        err: TheoryError,
    ) -> Result<(), TheoryResult> {
        if err.is_recoverable() {
            return Ok(());
        }
        Err(TheoryResult::Fail {
            theory: theory.name.clone(),
            error: err.to_string(),
            arguments: assignments.argument_descriptions(),
        })
    }
}

/// Partition theory results by outcome type.
pub fn partition_results(results: &[TheoryResult]) -> (usize, usize) {
    let passed = results
        .iter()
        .filter(|r| matches!(r, TheoryResult::Pass { .. }))
        .count();
    (passed, results.len() - passed)
}

/// Print theory results with colored output and a summary line.
pub fn report_results(results: &[TheoryResult], config: &TheoryConfig) {
    for result in results {
        match result {
            TheoryResult::Pass {
                theory,
                combinations,
            } => {
                println!(
                    "{}: {} ({} combinations)",
                    config.colorize("PASS", GREEN),
                    theory,
                    combinations
                );
            }
            TheoryResult::Fail { .. } => print_failure(result, config),
        }
    }

    let (passed, failed) = partition_results(results);
    println!(
        "\nTheory summary: total {}, {} {}, {} {}",
        results.len(),
        config.colorize("passed", GREEN),
        passed,
        config.colorize("failed", RED),
        failed,
    );
}

/// Print detailed failure information, including the candidate
/// descriptions of the combination that failed.
pub fn print_failure(result: &TheoryResult, config: &TheoryConfig) {
    if let TheoryResult::Fail {
        theory,
        error,
        arguments,
    } = result
    {
        eprintln!("{}: {}", config.colorize("FAIL", RED), theory);
        eprintln!("  Error: {}", error);
        if !arguments.is_empty() {
            eprintln!("  With arguments: {}", arguments.join(", "));
        }
    }
}
