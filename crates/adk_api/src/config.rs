use std::collections::BTreeMap;
use std::time::Duration;

use crate::events::ControlSignal;
use crate::url::DEFAULT_ADK_BASE_URL;

/// Closed set of `event:` labels recognized as control frames.
///
/// The labels are specific to one upstream agent server, so they are
/// configured once here rather than hard-coded at the classification site.
/// Any label outside this set is treated as a plain payload frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlLabels {
    pub session_started: String,
    pub completed: String,
    pub errored: String,
}

impl Default for ControlLabels {
    fn default() -> Self {
        Self {
            session_started: "session_created".to_string(),
            completed: "run_completed".to_string(),
            errored: "run_error".to_string(),
        }
    }
}

impl ControlLabels {
    /// Map an `event:` label to its control signal, if it is one.
    pub fn signal_for(&self, label: &str) -> Option<ControlSignal> {
        if label == self.session_started {
            Some(ControlSignal::SessionStarted)
        } else if label == self.completed {
            Some(ControlSignal::Completed)
        } else if label == self.errored {
            Some(ControlSignal::Errored)
        } else {
            None
        }
    }
}

/// Transport configuration for ADK API requests.
#[derive(Debug, Clone)]
pub struct AdkApiConfig {
    /// Base URL of the ADK API server.
    pub base_url: String,
    /// Registered app whose sessions and runs are addressed.
    pub app_name: String,
    /// Control-frame label set recognized by the classifier.
    pub control_labels: ControlLabels,
    /// Additional headers merged into request headers.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional request timeout for non-streaming calls.
    pub timeout: Option<Duration>,
}

impl Default for AdkApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ADK_BASE_URL.to_string(),
            app_name: String::new(),
            control_labels: ControlLabels::default(),
            extra_headers: BTreeMap::new(),
            timeout: None,
        }
    }
}

impl AdkApiConfig {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_control_labels(mut self, labels: ControlLabels) -> Self {
        self.control_labels = labels;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }
}
