use std::time::Duration;

/// How the connection retries after the socket drops
#[derive(Debug, Clone, PartialEq)]
pub struct ReconnectPolicy {
    /// `None` retries forever
    pub max_attempts: Option<usize>,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl ReconnectPolicy {
    /// Never reconnect; a dropped socket ends the battle
    pub fn disabled() -> Self {
        Self {
            max_attempts: Some(0),
            ..Self::default()
        }
    }

    /// Delay before the given attempt (1-based)
    pub fn delay_for(&self, attempt: usize) -> Duration {
        let mut delay = self.initial_delay;
        for _ in 1..attempt {
            delay = Duration::from_secs_f64(delay.as_secs_f64() * self.backoff_multiplier)
                .min(self.max_delay);
        }
        delay.min(self.max_delay)
    }

    pub fn allows(&self, attempt: usize) -> bool {
        self.max_attempts.is_none_or(|max| attempt <= max)
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Some(5),
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

/// Client settings, constructed in code
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub url: String,
    pub reconnect: ReconnectPolicy,
    /// Capacity of the inbound, outbound and intent queues
    pub channel_capacity: usize,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_reconnect(mut self, policy: ReconnectPolicy) -> Self {
        self.reconnect = policy;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: crate::DEFAULT_URL.to_string(),
            reconnect: ReconnectPolicy::default(),
            channel_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_is_capped() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(4), Duration::from_secs(8));
        assert_eq!(policy.delay_for(10), Duration::from_secs(30));
    }

    #[test]
    fn test_attempt_limits() {
        let policy = ReconnectPolicy::default();
        assert!(policy.allows(5));
        assert!(!policy.allows(6));

        assert!(!ReconnectPolicy::disabled().allows(1));

        let forever = ReconnectPolicy {
            max_attempts: None,
            ..ReconnectPolicy::default()
        };
        assert!(forever.allows(1000));
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("ws://localhost:5080").with_reconnect(ReconnectPolicy::disabled());
        assert_eq!(config.url, "ws://localhost:5080");
        assert_eq!(config.reconnect.max_attempts, Some(0));
        assert_eq!(config.channel_capacity, 64);
    }
}
