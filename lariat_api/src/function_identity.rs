// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT

/// Opaque handle identifying the deployed compute target, as reported by the
/// provider (an ARN or equivalent). Produced once per run and immutable for
/// the run's duration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FunctionIdentity(String);

impl FunctionIdentity {
    pub fn new(identity: String) -> Self {
        Self(identity)
    }

    /// Identity used when simulating a run without deploying anything.
    pub fn placeholder() -> Self {
        Self(String::from("arn:aws:lambda:::function:dry-run-placeholder"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FunctionIdentity {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(fmt, "{}", self.0)
    }
}

impl From<&str> for FunctionIdentity {
    fn from(identity: &str) -> Self {
        Self(identity.to_string())
    }
}
