use std::collections::HashMap;

/// Immutable lookup from resource-provider namespace to a display label.
///
/// Keys are compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderMap {
    labels: HashMap<String, String>,
}

impl ProviderMap {
    /// Builds a map from `(namespace, label)` pairs.
    #[must_use]
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let labels = entries
            .into_iter()
            .map(|(namespace, label)| (namespace.as_ref().to_ascii_lowercase(), label.into()))
            .collect();

        Self { labels }
    }

    /// Returns the catalog of well-known providers shown in deployment previews.
    #[must_use]
    pub fn well_known() -> Self {
        Self::new([
            ("Microsoft.Web", "Website"),
            ("Microsoft.Cache", "Redis Cache"),
            ("Microsoft.DocumentDb", "DocumentDB"),
            ("Microsoft.Insights", "Application Insights"),
            ("Microsoft.Search", "Search"),
            ("SuccessBricks.ClearDB", "ClearDB"),
            ("Microsoft.BizTalkServices", "Biz Talk Services"),
            ("Microsoft.Sql", "SQL Azure"),
        ])
    }

    /// Returns the label for `namespace`, or the namespace itself when unknown.
    #[must_use]
    pub fn label_for(&self, namespace: &str) -> String {
        self.labels
            .get(namespace.to_ascii_lowercase().as_str())
            .cloned()
            .unwrap_or_else(|| namespace.to_owned())
    }

    /// Maps namespaces to labels, dropping repeated namespaces but keeping first-seen order.
    #[must_use]
    pub fn labels_for<'a, I>(&self, namespaces: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = Vec::<String>::new();
        let mut labels = Vec::new();
        for namespace in namespaces {
            let key = namespace.to_ascii_lowercase();
            if seen.contains(&key) {
                continue;
            }

            seen.push(key);
            labels.push(self.label_for(namespace));
        }

        labels
    }
}
