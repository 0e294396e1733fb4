// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use sha2::Digest;

use lariat_api::function_identity::FunctionIdentity;

/// Action granted to every trigger-originating service principal.
pub const INVOKE_ACTION: &str = "lambda:InvokeFunction";

/// Namespace tag carried by every statement identifier issued by this tool.
const STATEMENT_ID_PREFIX: &str = "lariat-";

/// One issued (or re-found) invoke grant, as reported in the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantRecord {
    pub principal: String,
    pub statement_id: String,
}

#[derive(serde::Serialize)]
struct GrantKey<'a> {
    #[serde(rename = "FunctionName")]
    function_name: &'a str,
    #[serde(rename = "Principal")]
    principal: &'a str,
    #[serde(rename = "Action")]
    action: &'a str,
}

/// Derive the statement identifier for a (function, principal, action)
/// grant: the namespace tag followed by the first 8 hex characters of the
/// digest of the canonical JSON encoding of the grant key. The identifier
/// is a pure function of its inputs, so re-issuing the same grant carries
/// the same identifier across runs.
pub fn statement_id(function: &FunctionIdentity, principal: &str, action: &str) -> String {
    let key = serde_json::to_string(&GrantKey {
        function_name: function.as_str(),
        principal,
        action,
    })
    .unwrap();
    let digest = sha2::Sha256::digest(key.as_bytes());
    format!("{}{}", STATEMENT_ID_PREFIX, &hex::encode(digest)[..8])
}
