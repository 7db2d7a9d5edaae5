use std::fmt::Debug;
use std::sync::Arc;

use crate::common::DEFAULT_PAGE_SIZE;
use crate::errors::{ErrorKind, QuartermasterError, QuartermasterResult};
use crate::filter::UnknownOperatorPolicy;

/// Engine settings shared by asset lists and filter stores.
///
/// Cloning is cheap; clones share the same settings.
///
/// # Examples
///
/// ```rust,ignore
/// use quartermaster::config::QuartermasterConfig;
/// use quartermaster::filter::UnknownOperatorPolicy;
///
/// let config = QuartermasterConfig::builder()
///     .page_size(25)
///     .unknown_operator_policy(UnknownOperatorPolicy::Reject)
///     .build()?;
/// ```
#[derive(Clone)]
pub struct QuartermasterConfig {
    inner: Arc<ConfigInner>,
}

impl Default for QuartermasterConfig {
    fn default() -> Self {
        QuartermasterConfig {
            inner: Arc::new(ConfigInner {
                page_size: DEFAULT_PAGE_SIZE,
                unknown_operator_policy: UnknownOperatorPolicy::default(),
            }),
        }
    }
}

impl QuartermasterConfig {
    /// Default settings: pages of 10 and [`UnknownOperatorPolicy::Pass`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> QuartermasterBuilder {
        QuartermasterBuilder::new()
    }

    /// Number of records per page.
    pub fn page_size(&self) -> usize {
        self.inner.page_size
    }

    pub fn unknown_operator_policy(&self) -> UnknownOperatorPolicy {
        self.inner.unknown_operator_policy
    }
}

impl Debug for QuartermasterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuartermasterConfig")
            .field("page_size", &self.inner.page_size)
            .field("unknown_operator_policy", &self.inner.unknown_operator_policy)
            .finish()
    }
}

struct ConfigInner {
    page_size: usize,
    unknown_operator_policy: UnknownOperatorPolicy,
}

/// Builder for [QuartermasterConfig].
///
/// The first invalid setting is remembered and reported by [`build`](Self::build).
pub struct QuartermasterBuilder {
    error: Option<QuartermasterError>,
    page_size: usize,
    unknown_operator_policy: UnknownOperatorPolicy,
}

impl Default for QuartermasterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuartermasterBuilder {
    pub fn new() -> Self {
        QuartermasterBuilder {
            error: None,
            page_size: DEFAULT_PAGE_SIZE,
            unknown_operator_policy: UnknownOperatorPolicy::default(),
        }
    }

    /// Sets the page size; must be greater than zero.
    pub fn page_size(mut self, page_size: usize) -> Self {
        if self.error.is_none() && page_size == 0 {
            log::error!("Page size must be greater than zero");
            self.error = Some(QuartermasterError::new(
                "Page size must be greater than zero",
                ErrorKind::ValidationError,
            ));
        }
        self.page_size = page_size;
        self
    }

    pub fn unknown_operator_policy(mut self, policy: UnknownOperatorPolicy) -> Self {
        self.unknown_operator_policy = policy;
        self
    }

    pub fn build(self) -> QuartermasterResult<QuartermasterConfig> {
        if let Some(error) = self.error {
            return Err(error);
        }

        Ok(QuartermasterConfig {
            inner: Arc::new(ConfigInner {
                page_size: self.page_size,
                unknown_operator_policy: self.unknown_operator_policy,
            }),
        })
    }
}
