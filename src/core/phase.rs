use std::fmt;

use serde::{Deserialize, Serialize};

/// The four deployment phases. The variant order is the execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    PreInstall,
    CreateInfrastructure,
    RunTests,
    DestroyInfrastructure,
}

impl Phase {
    /// All phases in execution order.
    pub const ALL: [Phase; 4] = [
        Phase::PreInstall,
        Phase::CreateInfrastructure,
        Phase::RunTests,
        Phase::DestroyInfrastructure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::PreInstall => "pre-install",
            Phase::CreateInfrastructure => "create-infrastructure",
            Phase::RunTests => "run-tests",
            Phase::DestroyInfrastructure => "destroy-infrastructure",
        }
    }

    /// Parse a kebab-case phase name. Unknown names return `None`.
    pub fn parse(name: &str) -> Option<Phase> {
        Phase::ALL.iter().copied().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
