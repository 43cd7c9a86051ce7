use crate::config::CuratorConfig;
use crate::rules::{
    ClassificationRule, HostRule, KeywordRule, LowEngagementRule, ScreenedUrlRule, TypeRule,
    Verdict,
};
use crate::types::{ClassificationResult, Item, Result};
use tracing::{debug, info};

/// Ordered rule chain. The first rejecting rule decides the cause; later rules are not consulted.
pub struct Classifier {
    rules: Vec<Box<dyn ClassificationRule>>,
}

impl Classifier {
    /// The standard chain: host, keyword, type, low engagement, screened URL.
    pub fn from_config(config: &CuratorConfig) -> Result<Self> {
        let discussion_host = config.discussion_host()?;

        let classifier = Self::new()
            .with_rule(Box::new(HostRule::new(config.blocked_hosts.clone())))
            .with_rule(Box::new(KeywordRule::new(&config.screened_keywords)?))
            .with_rule(Box::new(TypeRule))
            .with_rule(Box::new(LowEngagementRule::new(discussion_host, config.min_descendants)))
            .with_rule(Box::new(ScreenedUrlRule::new(config.screened_url_fragments.clone())));

        debug!("Built classifier with rules: {:?}", classifier.rule_names());
        Ok(classifier)
    }

    /// An empty chain accepts everything.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: Box<dyn ClassificationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.rule_name()).collect()
    }

    pub fn classify(&self, item: Item) -> ClassificationResult {
        for rule in &self.rules {
            if let Verdict::Reject(cause) = rule.evaluate(&item) {
                debug!("Item {} rejected by {}: {}", item.id, rule.rule_name(), cause);
                return ClassificationResult::rejected(item, cause);
            }
        }
        ClassificationResult::accepted(item)
    }

    /// One result per item, in input order.
    pub fn classify_all(&self, items: Vec<Item>) -> Vec<ClassificationResult> {
        let results: Vec<ClassificationResult> =
            items.into_iter().map(|item| self.classify(item)).collect();
        let accepted = results.iter().filter(|r| r.is_accepted()).count();
        info!(
            "Classified {} items: {} accepted, {} rejected",
            results.len(),
            accepted,
            results.len() - accepted
        );
        results
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
