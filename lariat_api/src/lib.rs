// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT

#[cfg(feature = "aws_impl")]
pub mod aws_impl;
pub mod deployer;
pub mod function_identity;
pub mod invoke_permission;
pub mod outer;
pub mod schedule;
pub mod storage_notification;
pub mod topic;
pub mod util;
