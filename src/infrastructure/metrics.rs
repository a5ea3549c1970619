// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 提交成功的提取任务数
pub const EXTRACTION_DISPATCHED: &str = "extraction_dispatched_total";
/// 提交失败的提取任务数
pub const EXTRACTION_DISPATCH_FAILED: &str = "extraction_dispatch_failed_total";
/// 已提交但未能写入跟踪记录的任务数
pub const EXTRACTION_UNTRACKED: &str = "extraction_untracked_total";
/// 已删除的数据源数
pub const SOURCES_DELETED: &str = "sources_deleted_total";

pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", settings.listen, e);
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return;
    }

    info!("Metrics exporter listening on {}", addr);
}
