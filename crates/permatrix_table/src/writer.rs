//! Delimited policy-table writer.

use crate::table_error;
use permatrix_core::{CoreError, CoreResult, PolicyRule, TableFormat};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Output columns, in order, without the optional attributes column
const BASE_HEADER: [&str; 6] = ["subject", "domain", "object", "action", "condition", "effect"];

/// Writes policy rules as a delimited table
#[derive(Debug, Clone, Default)]
pub struct PolicyWriter {
    format: TableFormat,
}

impl PolicyWriter {
    /// Create a writer for the given format
    #[must_use]
    pub fn new(format: TableFormat) -> Self {
        Self { format }
    }

    /// Column names in output order
    #[must_use]
    pub fn header(&self) -> Vec<&'static str> {
        let mut header = BASE_HEADER.to_vec();
        if self.format.include_attributes {
            header.insert(5, "attributes");
        }
        header
    }

    fn record(&self, rule: &PolicyRule) -> Vec<String> {
        let mut fields = vec![
            rule.subject.clone(),
            rule.domain.to_string(),
            rule.object.clone(),
            rule.action.to_string(),
            rule.condition.to_string(),
        ];
        if self.format.include_attributes {
            fields.push(rule.attributes.to_string());
        }
        fields.push(rule.effect.to_string());
        fields
    }

    /// Write the header and every rule to a sink
    ///
    /// # Errors
    ///
    /// Returns error if the format is invalid or the sink fails
    pub fn write<W: Write>(&self, output: W, rules: &[PolicyRule]) -> CoreResult<()> {
        self.format.validate()?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.format.delimiter_byte()?)
            .from_writer(output);

        writer.write_record(self.header()).map_err(table_error)?;
        for rule in rules {
            writer.write_record(self.record(rule)).map_err(table_error)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Render the table to a string
    ///
    /// # Errors
    ///
    /// Returns error if the format is invalid
    pub fn write_to_string(&self, rules: &[PolicyRule]) -> CoreResult<String> {
        let mut buffer = Vec::new();
        self.write(&mut buffer, rules)?;
        String::from_utf8(buffer).map_err(|e| CoreError::Table {
            message: e.to_string(),
        })
    }

    /// Write the table to a file, replacing it atomically.
    ///
    /// The table goes to a temporary file next to `path` which is renamed
    /// over `path` only once fully written.
    ///
    /// # Errors
    ///
    /// Returns error if the temporary file cannot be created, written, or
    /// moved into place
    pub fn write_path(&self, path: impl AsRef<Path>, rules: &[PolicyRule]) -> CoreResult<()> {
        let path = path.as_ref();
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        debug!(tmp = %tmp.path().display(), "writing policy table");
        self.write(tmp.as_file_mut(), rules)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| CoreError::from(e.error))?;

        info!(path = %path.display(), rules = rules.len(), "policy table written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permatrix_core::{Action, AttributeConstraints, AttributeMap, Condition};
    use serde_json::json;

    fn rules() -> Vec<PolicyRule> {
        let mut map = AttributeMap::new();
        map.insert("region".to_string(), json!("eu"));
        map.insert("tier".to_string(), json!(1));
        vec![
            PolicyRule::allow("admin", "orders", Action::Create, Condition::None, AttributeConstraints::None),
            PolicyRule::allow(
                "admin",
                "orders",
                Action::GrantRead,
                Condition::CheckRelationship,
                AttributeConstraints::from_map(map),
            ),
        ]
    }

    #[test]
    fn test_header_with_attributes() {
        let writer = PolicyWriter::default();
        assert_eq!(
            writer.header(),
            vec!["subject", "domain", "object", "action", "condition", "attributes", "effect"]
        );
    }

    #[test]
    fn test_header_without_attributes() {
        let writer = PolicyWriter::new(TableFormat::default().with_attributes(false));
        assert_eq!(
            writer.header(),
            vec!["subject", "domain", "object", "action", "condition", "effect"]
        );
    }

    #[test]
    fn test_write_quotes_payload() {
        let out = PolicyWriter::default().write_to_string(&rules()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "subject,domain,object,action,condition,attributes,effect");
        assert_eq!(lines[1], "admin,0,orders,C,none,none,allow");
        assert_eq!(
            lines[2],
            r#"admin,0,orders,GR,check_relationship,"{""region"":""eu"",""tier"":1}",allow"#
        );
    }

    #[test]
    fn test_write_semicolon_without_attributes() {
        let format = TableFormat::default().with_delimiter(';').with_attributes(false);
        let out = PolicyWriter::new(format).write_to_string(&rules()).unwrap();
        assert_eq!(
            out,
            "subject;domain;object;action;condition;effect\n\
             admin;0;orders;C;none;allow\n\
             admin;0;orders;GR;check_relationship;allow\n"
        );
    }

    #[test]
    fn test_write_empty_rules_has_header() {
        let out = PolicyWriter::default().write_to_string(&[]).unwrap();
        assert_eq!(out, "subject,domain,object,action,condition,attributes,effect\n");
    }

    #[test]
    fn test_write_path_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.csv");
        std::fs::write(&path, "stale").unwrap();

        let writer = PolicyWriter::default();
        writer.write_path(&path, &rules()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, writer.write_to_string(&rules()).unwrap());
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
