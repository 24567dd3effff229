use serde::{Deserialize, Serialize};
use std::fmt;

use crate::status::Status;

/// Automation tool column value for manual cases
pub const MANUAL_TOOL: &str = "NA";

/// The capability set a suite depends on.
///
/// Manual and automated cases both implement it, so a suite never needs to know
/// which variant it holds.
pub trait Case: fmt::Debug + Send {
    fn id(&self) -> &str;

    fn status(&self) -> &Status;

    /// Read-only snapshot used for display and logging
    fn describe(&self) -> CaseDescription;

    /// Overwrite the status unconditionally. Any value is accepted, including
    /// re-recording a case that already has a result.
    fn set_result(&mut self, status: Status);

    /// The fixed 5-column row shared by every case variant
    fn to_row(&self) -> CaseRow;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDescription {
    pub id: String,
    pub name: String,
    pub module: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automation_tool: Option<String>,
}

impl fmt::Display for CaseDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Module: {}, Status: {}",
            self.id, self.name, self.module, self.status
        )?;
        if let Some(tool) = &self.automation_tool {
            write!(f, ", Tool: {}", tool)?;
        }
        Ok(())
    }
}

/// One serialized case: `Test ID, Test Name, Module, Status, Automation Tool`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRow {
    #[serde(rename = "Test ID")]
    pub test_id: String,
    #[serde(rename = "Test Name")]
    pub test_name: String,
    #[serde(rename = "Module")]
    pub module: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Automation Tool")]
    pub automation_tool: String,
}

impl CaseRow {
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.test_id,
            &self.test_name,
            &self.module,
            &self.status,
            &self.automation_tool,
        ]
    }

    pub fn is_manual(&self) -> bool {
        self.automation_tool == MANUAL_TOOL
    }

    /// Rebuild a case from a read-back row. The `NA` sentinel yields a manual
    /// case; any other tool value yields an automated one.
    pub fn into_case(self) -> Box<dyn Case> {
        let manual = self.is_manual();
        let mut base = TestCase::new(self.test_id, self.test_name, self.module);
        base.status = Status::from(self.status);

        if manual {
            Box::new(base)
        } else {
            Box::new(AutomatedTestCase {
                base,
                automation_tool: self.automation_tool,
            })
        }
    }
}

/// A manually executed test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    id: String,
    name: String,
    module: String,
    status: Status,
}

impl TestCase {
    pub fn new(id: impl Into<String>, name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            module: module.into(),
            status: Status::NotExecuted,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    fn row_with_tool(&self, tool: &str) -> CaseRow {
        CaseRow {
            test_id: self.id.clone(),
            test_name: self.name.clone(),
            module: self.module.clone(),
            status: self.status.as_str().to_string(),
            automation_tool: tool.to_string(),
        }
    }
}

impl Case for TestCase {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> &Status {
        &self.status
    }

    fn describe(&self) -> CaseDescription {
        CaseDescription {
            id: self.id.clone(),
            name: self.name.clone(),
            module: self.module.clone(),
            status: self.status.clone(),
            automation_tool: None,
        }
    }

    fn set_result(&mut self, status: Status) {
        self.status = status;
    }

    fn to_row(&self) -> CaseRow {
        self.row_with_tool(MANUAL_TOOL)
    }
}

/// A test case driven by an automation tool (Selenium, Playwright, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomatedTestCase {
    base: TestCase,
    automation_tool: String,
}

impl AutomatedTestCase {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        module: impl Into<String>,
        automation_tool: impl Into<String>,
    ) -> Self {
        Self {
            base: TestCase::new(id, name, module),
            automation_tool: automation_tool.into(),
        }
    }

    pub fn name(&self) -> &str {
        self.base.name()
    }

    pub fn module(&self) -> &str {
        self.base.module()
    }

    pub fn automation_tool(&self) -> &str {
        &self.automation_tool
    }
}

impl Case for AutomatedTestCase {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn status(&self) -> &Status {
        self.base.status()
    }

    fn describe(&self) -> CaseDescription {
        CaseDescription {
            automation_tool: Some(self.automation_tool.clone()),
            ..self.base.describe()
        }
    }

    fn set_result(&mut self, status: Status) {
        self.base.set_result(status);
    }

    fn to_row(&self) -> CaseRow {
        self.base.row_with_tool(&self.automation_tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_case_is_not_executed() {
        let manual = TestCase::new("TC001", "Login Validation", "Authentication");
        let automated = AutomatedTestCase::new("TC003", "Add to Cart", "Cart", "Selenium");

        assert_eq!(manual.status(), &Status::NotExecuted);
        assert_eq!(automated.status(), &Status::NotExecuted);
    }

    #[test]
    fn test_set_result_overwrites_without_validation() {
        let mut case = TestCase::new("TC001", "Login Validation", "Authentication");
        case.set_result(Status::Pass);
        case.set_result(Status::parse("Blocked"));
        assert_eq!(case.status(), &Status::parse("Blocked"));

        case.set_result(Status::Fail);
        assert_eq!(case.status(), &Status::Fail);
    }

    #[test]
    fn test_manual_row_uses_sentinel() {
        let case = TestCase::new("TC002", "Logout Validation", "Authentication");
        let row = case.to_row();
        assert_eq!(
            row.fields(),
            ["TC002", "Logout Validation", "Authentication", "Not Executed", "NA"]
        );
    }

    #[test]
    fn test_automated_row_carries_tool() {
        let mut case = AutomatedTestCase::new("TC004", "Payment Flow", "Checkout", "Playwright");
        case.set_result(Status::Fail);
        assert_eq!(
            case.to_row().fields(),
            ["TC004", "Payment Flow", "Checkout", "Fail", "Playwright"]
        );
    }

    #[test]
    fn test_describe_includes_tool_only_for_automated() {
        let manual = TestCase::new("TC001", "Login Validation", "Authentication");
        let automated = AutomatedTestCase::new("TC003", "Add to Cart", "Cart", "Selenium");

        assert_eq!(manual.describe().automation_tool, None);
        assert_eq!(
            manual.describe().to_string(),
            "ID: TC001, Name: Login Validation, Module: Authentication, Status: Not Executed"
        );
        assert_eq!(
            automated.describe().to_string(),
            "ID: TC003, Name: Add to Cart, Module: Cart, Status: Not Executed, Tool: Selenium"
        );
    }

    #[test]
    fn test_row_rebuilds_matching_variant() {
        let manual = TestCase::new("TC001", "Login Validation", "Authentication").to_row();
        let rebuilt = manual.clone().into_case();
        assert_eq!(rebuilt.describe().automation_tool, None);
        assert_eq!(rebuilt.to_row(), manual);

        let mut automated = AutomatedTestCase::new("TC003", "Add to Cart", "Cart", "Selenium");
        automated.set_result(Status::Pass);
        let row = automated.to_row();
        let rebuilt = row.clone().into_case();
        assert_eq!(rebuilt.status(), &Status::Pass);
        assert_eq!(rebuilt.describe().automation_tool.as_deref(), Some("Selenium"));
        assert_eq!(rebuilt.to_row(), row);
    }
}
