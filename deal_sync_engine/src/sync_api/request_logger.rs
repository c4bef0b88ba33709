use std::fmt::{Arguments, Display};

use log::Level;

use crate::WebhookTopic;

pub const LOG_TARGET: &str = "dss::webhook";

/// Per-request structured logger.
///
/// Every line is tagged with the request correlation id and the webhook topic, both as `log` key-values and as a
/// `[request_id]` prefix on the message, so that the whole life of a delivery can be grepped out of the logs.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    request_id: String,
    topic: WebhookTopic,
}

impl RequestLogger {
    pub fn new<S: Into<String>>(request_id: S, topic: WebhookTopic) -> Self {
        Self { request_id: request_id.into(), topic }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn topic(&self) -> WebhookTopic {
        self.topic
    }

    pub fn log(&self, level: Level, args: Arguments<'_>) {
        log::log!(
            target: LOG_TARGET,
            level,
            request_id = self.request_id.as_str(),
            topic = self.topic.as_str();
            "[{}] {args}",
            self.request_id
        );
    }

    pub fn trace<D: Display>(&self, msg: D) {
        self.log(Level::Trace, format_args!("{msg}"));
    }

    pub fn debug<D: Display>(&self, msg: D) {
        self.log(Level::Debug, format_args!("{msg}"));
    }

    pub fn info<D: Display>(&self, msg: D) {
        self.log(Level::Info, format_args!("{msg}"));
    }

    pub fn warn<D: Display>(&self, msg: D) {
        self.log(Level::Warn, format_args!("{msg}"));
    }

    pub fn error<D: Display>(&self, msg: D) {
        self.log(Level::Error, format_args!("{msg}"));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn carries_request_context() {
        let _ = env_logger::try_init();
        let log = RequestLogger::new("1718000000000-abc123xyz", WebhookTopic::RefundsCreate);
        assert_eq!(log.request_id(), "1718000000000-abc123xyz");
        assert_eq!(log.topic(), WebhookTopic::RefundsCreate);
        log.info(format_args!("Refund {} for order {}", 1, 2));
        log.warn("No deal found");
    }
}
