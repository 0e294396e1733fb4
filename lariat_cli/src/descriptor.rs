// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT

#[derive(Debug, serde::Deserialize)]
pub struct DescriptorSchedule {
    pub name: String,
    pub schedule_expression: Option<String>,
    pub event_pattern: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct DescriptorTopic {
    pub name: String,
    pub handler: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct DescriptorBucket {
    pub name: String,
    pub events: Vec<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

/// The application descriptor (`lariat.toml`), declaring the event-source
/// bindings of an already-built application. The three catalogs are arrays
/// of tables, so the declared order is kept.
#[derive(Debug, serde::Deserialize)]
pub struct ApplicationDescriptor {
    #[serde(default, rename = "schedule")]
    pub schedules: Vec<DescriptorSchedule>,
    #[serde(default, rename = "topic")]
    pub topics: Vec<DescriptorTopic>,
    #[serde(default, rename = "bucket")]
    pub buckets: Vec<DescriptorBucket>,
}
