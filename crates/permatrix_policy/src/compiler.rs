//! Matrix compiler: permission matrix in, policy rules out.

use crate::builder::build;
use crate::diagnostic::Diagnostic;
use crate::extract::extract;
use crate::resolver::ActionResolver;
use permatrix_core::{CellFailure, CoreError, CoreResult, PermissionMatrix, PolicyRule};
use tracing::{debug, info, warn};

/// Output from compiling a matrix or a single cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOutput {
    /// Rules in (resource, role, action) emission order
    pub rules: Vec<PolicyRule>,
    /// Non-fatal findings
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilerOutput {
    /// Append another output, keeping order
    pub fn extend(&mut self, other: CompilerOutput) {
        self.rules.extend(other.rules);
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Compiler from permission matrices to policy rules
#[derive(Debug, Clone, Default)]
pub struct MatrixCompiler {
    resolver: ActionResolver,
}

impl MatrixCompiler {
    /// Create a new compiler
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolver: ActionResolver::new(),
        }
    }

    /// Compile a whole matrix.
    ///
    /// Cells are visited resource by resource, then role by role. Every
    /// failing cell is collected before giving up, so one run reports all of
    /// them.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CompileFailed`] if any cell carries an invalid
    /// attribute payload; no rules are returned in that case.
    pub fn compile(&self, matrix: &PermissionMatrix) -> CoreResult<CompilerOutput> {
        let mut output = CompilerOutput::default();
        let mut failures = Vec::new();

        for (row_idx, row) in matrix.rows.iter().enumerate() {
            for (role_idx, role) in matrix.roles.iter().enumerate() {
                let code = matrix.cell(row_idx, role_idx);
                match self.compile_cell(&row.resource, role, code) {
                    Ok(cell) => output.extend(cell),
                    Err(error) => failures.push(CellFailure {
                        resource: row.resource.clone(),
                        role: role.clone(),
                        error: Box::new(error),
                    }),
                }
            }
        }

        if !failures.is_empty() {
            warn!(failed_cells = failures.len(), "matrix compilation failed");
            return Err(CoreError::CompileFailed { failures });
        }

        info!(
            resources = matrix.rows.len(),
            roles = matrix.roles.len(),
            rules = output.rules.len(),
            diagnostics = output.diagnostics.len(),
            "matrix compiled"
        );
        Ok(output)
    }

    /// Compile a single (resource, role) cell.
    ///
    /// Blank cells produce no rules.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidAttributePayload`] if the attribute suffix
    /// is not a JSON object.
    pub fn compile_cell(&self, resource: &str, role: &str, code: &str) -> CoreResult<CompilerOutput> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(CompilerOutput::default());
        }

        let (base, attributes) = extract(code)?;
        let resolution = self.resolver.resolve(base);

        let diagnostics: Vec<Diagnostic> = resolution
            .rejected_grants
            .iter()
            .map(|action| Diagnostic::MeaninglessGrant {
                resource: resource.to_string(),
                role: role.to_string(),
                code: code.to_string(),
                action: *action,
            })
            .collect();
        for diagnostic in &diagnostics {
            warn!(resource, role, code, "{}", diagnostic);
        }

        let rules = build(role, resource, &resolution.entries, &attributes);
        debug!(resource, role, code, rules = rules.len(), "cell resolved");

        Ok(CompilerOutput { rules, diagnostics })
    }
}

/// Compile a matrix with the default compiler
///
/// # Errors
///
/// See [`MatrixCompiler::compile`]
pub fn compile(matrix: &PermissionMatrix) -> CoreResult<CompilerOutput> {
    MatrixCompiler::new().compile(matrix)
}
