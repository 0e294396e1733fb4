// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use lariat_api::deployer::{FunctionDeployerAPI, PolicyDocument};
use lariat_api::function_identity::FunctionIdentity;

/// Record written by the external deployment subsystem after a successful
/// deploy. This tool only ever reads it.
pub const DEPLOYMENT_RECORD_FILE: &str = ".lariat/deployment.json";

/// Access-policy document shipped with the project, used as the default
/// when the record carries no policy yet.
pub const DEFAULT_POLICY_FILE: &str = "policy.json";

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DeploymentRecord {
    pub function_identity: String,
    pub policy: Option<serde_json::Value>,
}

/// Deployment collaborator backed by the record of the external deployment
/// subsystem: the function is already built and deployed, its identity is
/// read from the record.
pub struct RecordedDeployment {
    pub project: std::path::PathBuf,
}

#[async_trait::async_trait]
impl FunctionDeployerAPI for RecordedDeployment {
    async fn build_and_deploy(&mut self, project: &std::path::Path) -> anyhow::Result<FunctionIdentity> {
        let record_path = project.join(DEPLOYMENT_RECORD_FILE);
        if std::fs::metadata(&record_path).is_err() {
            anyhow::bail!(
                "no deployment record at '{}': deploy the function with the deployment pipeline first",
                record_path.display()
            );
        }
        let record: DeploymentRecord = serde_json::from_str(&std::fs::read_to_string(&record_path)?)?;
        if record.policy.is_none() {
            let policy = self.load_default_policy()?;
            log::info!("no access policy recorded for '{}': the default policy document applies", project.display());
            log::debug!("default policy: {}", policy.0);
        }
        Ok(FunctionIdentity::new(record.function_identity))
    }

    fn load_default_policy(&self) -> anyhow::Result<PolicyDocument> {
        let policy_path = self.project.join(DEFAULT_POLICY_FILE);
        match std::fs::metadata(&policy_path) {
            Ok(_) => Ok(PolicyDocument(serde_json::from_str(&std::fs::read_to_string(&policy_path)?)?)),
            Err(_) => Ok(PolicyDocument(serde_json::json!({
                "Version": "2012-10-17",
                "Statement": [],
            }))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_project(label: &str) -> std::path::PathBuf {
        let project = std::env::temp_dir().join(format!("lariat-{}-{}", label, std::process::id()));
        let _ = std::fs::remove_dir_all(&project);
        std::fs::create_dir_all(project.join(".lariat")).unwrap();
        project
    }

    #[tokio::test]
    async fn test_reads_the_function_identity_from_the_record() {
        let project = scratch_project("record");
        std::fs::write(
            project.join(DEPLOYMENT_RECORD_FILE),
            r#"{"function_identity": "arn:aws:lambda:eu-west-1:000000000000:function:app"}"#,
        )
        .unwrap();

        let mut deployer = RecordedDeployment { project: project.clone() };
        let function = deployer.build_and_deploy(&project).await.unwrap();
        assert_eq!(function.as_str(), "arn:aws:lambda:eu-west-1:000000000000:function:app");

        let _ = std::fs::remove_dir_all(&project);
    }

    #[tokio::test]
    async fn test_fails_without_a_record() {
        let project = scratch_project("no-record");
        let mut deployer = RecordedDeployment { project: project.clone() };
        assert!(deployer.build_and_deploy(&project).await.is_err());
        let _ = std::fs::remove_dir_all(&project);
    }

    #[test]
    fn test_default_policy_fallback() {
        let project = scratch_project("policy");
        let deployer = RecordedDeployment { project: project.clone() };
        let policy = deployer.load_default_policy().unwrap();
        assert_eq!(policy.0["Version"], "2012-10-17");

        std::fs::write(project.join(DEFAULT_POLICY_FILE), r#"{"Version": "2012-10-17", "Statement": [{"Sid": "x"}]}"#).unwrap();
        let policy = deployer.load_default_policy().unwrap();
        assert_eq!(policy.0["Statement"][0]["Sid"], "x");

        let _ = std::fs::remove_dir_all(&project);
    }
}
