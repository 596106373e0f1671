//! Quill semantic analyzer
//!
//! Two phases:
//! - build the class hierarchy table (sequential, read-only afterwards)
//! - check field initializers and every method body against it, producing
//!   a [`TypedProgram`]
//!
//! Method bodies are independent, so with `CheckerOptions::parallel` they
//! are checked on scoped worker threads. Results are merged in method order,
//! which makes the outcome identical in both modes. The first error in method
//! order aborts the compilation unit.

pub mod config;
pub mod consteval;
pub mod diagnostic;
pub mod error;
pub mod expr;
pub mod hierarchy;
pub mod method;
pub mod path;
pub mod stmt;
pub mod symbols;
pub mod typed;

pub use config::{CheckerOptions, ConfigError};
pub use diagnostic::{create_files, Diagnostic, ErrorCode, SimpleFiles};
pub use error::{
    CheckWarning, MemberKind, SemanticError, SemanticResult, WarningCode, WarningConfig,
};
pub use hierarchy::{ClassId, ClassTable, FieldId, MethodId};
pub use method::MethodChecker;
pub use path::PathResolver;
pub use symbols::{LocalInfo, LocalSlot, RedeclarationPolicy, ScopeKind, ScopeStack};
pub use typed::{ExprKind, Place, TypedCase, TypedExpr, TypedField, TypedMethod, TypedProgram, TypedStmt, TypedSwitch};

use crate::frontend::ast::{MethodDecl, Program};
use crossbeam_deque::{Injector, Steal};
use parking_lot::Mutex;

/// Output of a successful analysis
#[derive(Debug, Clone)]
pub struct Analysis {
    pub program: TypedProgram,
    pub table: ClassTable,
    /// Warnings in method order
    pub warnings: Vec<CheckWarning>,
}

/// Collects per-method warning batches from concurrent workers
///
/// Each batch is appended whole under the lock, so a batch is never
/// interleaved with another method's.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    batches: Mutex<Vec<(MethodId, Vec<CheckWarning>)>>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, method: MethodId, warnings: Vec<CheckWarning>) {
        if warnings.is_empty() {
            return;
        }
        self.batches.lock().push((method, warnings));
    }

    /// All warnings ordered by method
    pub fn into_sorted(self) -> Vec<CheckWarning> {
        let mut batches = self.batches.into_inner();
        batches.sort_by_key(|(method, _)| *method);
        batches.into_iter().flat_map(|(_, warnings)| warnings).collect()
    }
}

/// Analyse a program: build the class table, then check every field and
/// method against it
#[tracing::instrument(level = "debug", skip_all, fields(root = %program.root.name.name))]
pub fn analyze(program: &Program, options: &CheckerOptions) -> SemanticResult<Analysis> {
    let table = ClassTable::build(program)?;
    let root = table.root();

    let entry = table
        .lookup_method(root, &options.entry_point)
        .map(|m| m.id)
        .ok_or_else(|| SemanticError::MissingEntryPoint {
            class: table.class(root).name.clone(),
            name: options.entry_point.clone(),
            span: program.root.name.span,
        })?;

    // Declarations in the same order the table assigned ids
    let classes = hierarchy::registration_order(program);
    let field_decls: Vec<_> = classes.iter().flat_map(|c| c.fields.iter()).collect();
    let method_decls: Vec<&MethodDecl> = classes.iter().flat_map(|c| c.methods.iter()).collect();

    let fields = field_decls
        .iter()
        .enumerate()
        .map(|(index, decl)| MethodChecker::check_field(&table, options, FieldId(index as u32), decl))
        .collect::<SemanticResult<Vec<_>>>()?;

    let sink = DiagnosticSink::new();
    let results = if options.parallel && method_decls.len() > 1 {
        check_methods_parallel(&table, options, &method_decls, &sink)
    } else {
        check_methods_sequential(&table, options, &method_decls, &sink)
    };
    let methods = results.into_iter().collect::<SemanticResult<Vec<_>>>()?;
    let warnings = sink.into_sorted();

    tracing::debug!(
        fields = fields.len(),
        methods = methods.len(),
        warnings = warnings.len(),
        parallel = options.parallel,
        "analysis complete"
    );

    Ok(Analysis {
        program: TypedProgram {
            name: table.class(root).name.clone(),
            fields,
            methods,
            entry,
        },
        table,
        warnings,
    })
}

fn check_methods_sequential(
    table: &ClassTable,
    options: &CheckerOptions,
    decls: &[&MethodDecl],
    sink: &DiagnosticSink,
) -> Vec<SemanticResult<TypedMethod>> {
    decls
        .iter()
        .enumerate()
        .map(|(index, decl)| check_one(table, options, index, decl, sink))
        .collect()
}

/// Workers pull method indices from a shared injector; results are sorted
/// back into method order before merging
fn check_methods_parallel(
    table: &ClassTable,
    options: &CheckerOptions,
    decls: &[&MethodDecl],
    sink: &DiagnosticSink,
) -> Vec<SemanticResult<TypedMethod>> {
    let injector = Injector::new();
    for index in 0..decls.len() {
        injector.push(index);
    }

    let num_workers = worker_count(decls.len());
    let finished: Mutex<Vec<(usize, SemanticResult<TypedMethod>)>> =
        Mutex::new(Vec::with_capacity(decls.len()));

    let scope_result = crossbeam::thread::scope(|scope| {
        for worker in 0..num_workers {
            let (injector, finished) = (&injector, &finished);
            scope.spawn(move |_| {
                let mut checked = 0usize;
                loop {
                    let index = match injector.steal() {
                        Steal::Success(index) => index,
                        Steal::Empty => break,
                        Steal::Retry => continue,
                    };
                    let result = check_one(table, options, index, decls[index], sink);
                    finished.lock().push((index, result));
                    checked += 1;
                }
                tracing::trace!(worker, checked, "worker finished");
            });
        }
    });
    if let Err(panic) = scope_result {
        std::panic::resume_unwind(panic);
    }

    let mut finished = finished.into_inner();
    finished.sort_by_key(|(index, _)| *index);
    finished.into_iter().map(|(_, result)| result).collect()
}

fn check_one(
    table: &ClassTable,
    options: &CheckerOptions,
    index: usize,
    decl: &MethodDecl,
    sink: &DiagnosticSink,
) -> SemanticResult<TypedMethod> {
    let id = MethodId(index as u32);
    let (method, warnings) = MethodChecker::check_method(table, options, id, decl)?;
    sink.push(id, warnings);
    Ok(method)
}

/// One worker per CPU, never more than there are methods
fn worker_count(jobs: usize) -> usize {
    num_cpus::get().clamp(1, jobs.max(1))
}
