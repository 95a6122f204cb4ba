// Outbound payload observation.
//
// Every serialized document is handed to the client's observer right before
// it goes on the wire. The observer is chosen at construction time; nothing
// in this crate reads the process environment to decide whether to dump XML.

use std::fmt;

use reqwest::Method;
use url::Url;

/// Receives each fully serialized outbound document before submission.
pub trait PayloadObserver: fmt::Debug + Send + Sync {
    fn outbound(&self, method: &Method, url: &Url, body: &str);
}

/// Discards every payload. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PayloadObserver for NoopObserver {
    fn outbound(&self, _method: &Method, _url: &Url, _body: &str) {}
}

/// Emits payloads as `debug` events under the `vcair_api::payload` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PayloadObserver for TracingObserver {
    fn outbound(&self, method: &Method, url: &Url, body: &str) {
        tracing::debug!(
            target: "vcair_api::payload",
            %method,
            %url,
            "XML DEBUG:\n{body}"
        );
    }
}
