// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use crate::function_identity::FunctionIdentity;

/// Request to authorize a service principal to invoke the target function.
///
/// The statement identifier is expected to be a pure function of
/// (function, principal, action), so that re-issuing the same grant carries
/// the same identifier and the provider can detect the duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddPermissionRequest {
    pub function: FunctionIdentity,
    pub statement_id: String,
    pub principal: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantOutcome {
    /// The grant was newly issued.
    Granted,
    /// The provider already holds an identical grant; not an error.
    AlreadyGranted,
}

#[async_trait::async_trait]
pub trait InvokePermissionAPI: Sync + Send {
    async fn add_permission(&mut self, request: AddPermissionRequest) -> anyhow::Result<GrantOutcome>;
}
