use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::case::{AutomatedTestCase, TestCase};
use crate::suite::TestSuite;

/// TOML description of a suite and its cases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteManifest {
    pub name: String,
    #[serde(default)]
    pub cases: Vec<CaseEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseEntry {
    pub id: String,
    pub name: String,
    pub module: String,
    /// Automation tool; absent for manual cases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
}

impl CaseEntry {
    pub fn manual(id: &str, name: &str, module: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            module: module.to_string(),
            tool: None,
        }
    }

    pub fn automated(id: &str, name: &str, module: &str, tool: &str) -> Self {
        Self {
            tool: Some(tool.to_string()),
            ..Self::manual(id, name, module)
        }
    }
}

impl SuiteManifest {
    /// The regression suite used by `caseledger init`
    pub fn sample() -> Self {
        Self {
            name: "Regression Suite".to_string(),
            cases: vec![
                CaseEntry::manual("TC001", "Login Validation", "Authentication"),
                CaseEntry::manual("TC002", "Logout Validation", "Authentication"),
                CaseEntry::automated("TC003", "Add to Cart", "Cart", "Selenium"),
                CaseEntry::automated("TC004", "Payment Flow", "Checkout", "Playwright"),
            ],
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse suite manifest")
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read suite manifest {}", path.display()))?;
        Self::parse(&contents)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .context("Failed to create manifest directory")?;
            }
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize suite manifest")?;
        fs::write(path, contents)
            .await
            .with_context(|| format!("Failed to write suite manifest {}", path.display()))?;
        Ok(())
    }

    pub fn into_suite(self) -> TestSuite {
        let mut suite = TestSuite::new(self.name);
        for entry in self.cases {
            match entry.tool {
                Some(tool) if !tool.is_empty() => suite.add_case(AutomatedTestCase::new(
                    entry.id,
                    entry.name,
                    entry.module,
                    tool,
                )),
                _ => suite.add_case(TestCase::new(entry.id, entry.name, entry.module)),
            }
        }
        suite
    }
}
