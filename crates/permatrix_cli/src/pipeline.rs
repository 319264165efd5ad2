//! Read, compile, write.

use permatrix_core::{CoreResult, PermissionMatrix, TableFormat};
use permatrix_policy::{CompilerOutput, Diagnostic, MatrixCompiler};
use permatrix_table::{MatrixReader, PolicyWriter};
use std::path::{Path, PathBuf};
use tracing::info;

/// Summary of a successful compile run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    /// Where the policy table was written
    pub output: PathBuf,
    /// Number of resources read
    pub resources: usize,
    /// Number of roles read
    pub roles: usize,
    /// Number of rules written
    pub rules: usize,
    /// Meaningless-combination findings
    pub diagnostics: Vec<Diagnostic>,
}

/// Compile the matrix at `input` into a policy table at `output`.
///
/// The output file is only touched once the whole matrix compiled.
///
/// # Errors
///
/// Returns error if reading, compiling, or writing fails
pub fn compile_file(input: &Path, output: &Path, format: &TableFormat) -> CoreResult<CompileReport> {
    info!(input = %input.display(), output = %output.display(), "compiling permission matrix");

    let matrix = MatrixReader::new(format.clone()).read_path(input)?;
    let compiled = MatrixCompiler::new().compile(&matrix)?;
    PolicyWriter::new(format.clone()).write_path(output, &compiled.rules)?;

    Ok(CompileReport {
        output: output.to_path_buf(),
        resources: matrix.rows.len(),
        roles: matrix.roles.len(),
        rules: compiled.rules.len(),
        diagnostics: compiled.diagnostics,
    })
}

/// Expand a single permission code for one resource and role
///
/// # Errors
///
/// Returns error if the code carries an invalid attribute payload
pub fn inspect_code(resource: &str, role: &str, code: &str) -> CoreResult<CompilerOutput> {
    let matrix = PermissionMatrix::new(vec![role.to_string()]).with_row(resource, vec![code.to_string()]);
    MatrixCompiler::new().compile(&matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use permatrix_core::{Action, CoreError};
    use std::fs;

    const ROLES_CSV: &str = "\
Id,Module,Tables,admin,member
1,sales,orders,CRUDGC*,RUO
2,sales,invoices,\"R{\"\"region\"\":\"\"eu\"\"}\",GRO
";

    #[test]
    fn test_compile_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Roles.csv");
        let output = dir.path().join("policy.csv");
        fs::write(&input, ROLES_CSV).unwrap();

        let report = compile_file(&input, &output, &TableFormat::default()).unwrap();
        assert_eq!(report.resources, 2);
        assert_eq!(report.roles, 2);
        assert_eq!(report.rules, 9);
        assert_eq!(report.diagnostics.len(), 1);

        let written = fs::read_to_string(&output).unwrap();
        let expected = "\
subject,domain,object,action,condition,attributes,effect
admin,0,orders,C,none,none,allow
admin,0,orders,GC,check_relationship,none,allow
admin,0,orders,R,none,none,allow
admin,0,orders,U,none,none,allow
admin,0,orders,D,none,none,allow
member,0,orders,R,none,none,allow
member,0,orders,U,check_ownership,none,allow
admin,0,invoices,R,none,\"{\"\"region\"\":\"\"eu\"\"}\",allow
member,0,invoices,R,none,none,allow
";
        assert_eq!(written, expected);
        assert_eq!(report.rules, written.lines().count() - 1);
    }

    #[test]
    fn test_compile_file_twice_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Roles.csv");
        fs::write(&input, ROLES_CSV).unwrap();
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");

        compile_file(&input, &first, &TableFormat::default()).unwrap();
        compile_file(&input, &second, &TableFormat::default()).unwrap();
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_failed_compile_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Roles.csv");
        let output = dir.path().join("policy.csv");
        fs::write(&input, "Id,Module,Tables,admin\n1,sales,orders,CRUD{bad json\n").unwrap();

        let err = compile_file(&input, &output, &TableFormat::default()).unwrap_err();
        assert!(matches!(err, CoreError::CompileFailed { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_compile_file_semicolon_without_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Roles.csv");
        let output = dir.path().join("policy.csv");
        fs::write(&input, "Id;Module;Tables;guest\n1;web;pages;R\n").unwrap();

        let format = TableFormat::default().with_delimiter(';').with_attributes(false);
        compile_file(&input, &output, &format).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "subject;domain;object;action;condition;effect\nguest;0;pages;R;none;allow\n"
        );
    }

    #[test]
    fn test_inspect_code() {
        let output = inspect_code("orders", "clerk", "GC*").unwrap();
        let actions: Vec<Action> = output.rules.iter().map(|r| r.action).collect();
        assert_eq!(actions, vec![Action::Create, Action::GrantCreate]);
    }

    #[test]
    fn test_inspect_invalid_code() {
        assert!(inspect_code("orders", "clerk", "R{oops").is_err());
    }
}
