// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use crate::invoke_permission::{AddPermissionRequest, GrantOutcome, InvokePermissionAPI};

#[derive(Clone)]
pub struct AwsInvokePermissionClient {
    client: aws_sdk_lambda::Client,
}

impl AwsInvokePermissionClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_lambda::Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl InvokePermissionAPI for AwsInvokePermissionClient {
    async fn add_permission(&mut self, request: AddPermissionRequest) -> anyhow::Result<GrantOutcome> {
        match self
            .client
            .add_permission()
            .function_name(request.function.as_str())
            .statement_id(&request.statement_id)
            .action(&request.action)
            .principal(&request.principal)
            .send()
            .await
        {
            Ok(_) => Ok(GrantOutcome::Granted),
            Err(err) => {
                let err = err.into_service_error();
                if err.is_resource_conflict_exception() {
                    Ok(GrantOutcome::AlreadyGranted)
                } else {
                    Err(anyhow::anyhow!(
                        "add-permission failed for principal '{}' on '{}': {}",
                        request.principal,
                        request.function,
                        err
                    ))
                }
            }
        }
    }
}
