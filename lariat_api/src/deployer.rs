// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use crate::function_identity::FunctionIdentity;

/// Access-policy document handed to the external deployment subsystem.
/// Opaque to the reconciliation core.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PolicyDocument(pub serde_json::Value);

/// The external deployment subsystem that packages the application and
/// deploys the function. Modeled as an injectable collaborator so the
/// reconciliation core never depends on a concrete deployer.
#[async_trait::async_trait]
pub trait FunctionDeployerAPI: Sync + Send {
    /// Produce the identity of the deployed function for this project.
    async fn build_and_deploy(&mut self, project: &std::path::Path) -> anyhow::Result<FunctionIdentity>;

    /// The default access-policy document, used only when no policy has
    /// been recorded for the project yet.
    fn load_default_policy(&self) -> anyhow::Result<PolicyDocument>;
}
