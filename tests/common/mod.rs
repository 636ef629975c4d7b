//! Common test utilities for bulk-dl integration tests

#![allow(dead_code)]

use bulk_dl::{ChannelReporter, Config, DownloadPipeline};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build a pipeline around the default config and a channel reporter.
pub fn channel_pipeline() -> (Arc<DownloadPipeline>, UnboundedReceiver<String>) {
    pipeline_with_config(Config::default())
}

/// Build a pipeline around `config` and a channel reporter.
pub fn pipeline_with_config(config: Config) -> (Arc<DownloadPipeline>, UnboundedReceiver<String>) {
    let (reporter, messages) = ChannelReporter::new();
    let pipeline =
        DownloadPipeline::new(config, Arc::new(reporter)).expect("pipeline should build");
    (Arc::new(pipeline), messages)
}

/// Drain every message currently sitting in the reporter channel.
pub fn drain(messages: &mut UnboundedReceiver<String>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Ok(line) = messages.try_recv() {
        lines.push(line);
    }
    lines
}

/// Serve `body` for GET `route`.
pub async fn mount_body(server: &MockServer, route: &str, body: impl Into<Vec<u8>>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.into()))
        .mount(server)
        .await;
}

/// Serve `body` for GET `route` after `delay`.
pub async fn mount_delayed(server: &MockServer, route: &str, body: &'static [u8], delay: Duration) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Respond with a bare `status` for GET `route`.
pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
