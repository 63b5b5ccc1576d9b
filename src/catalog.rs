// ABOUTME: Catalog query engine and single-episode fetcher over DynamoDB
// ABOUTME: Filter construction, projected scans with pagination, point lookups

use std::collections::HashMap;
use std::future::Future;

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::debug;

use crate::episode::{EpisodeDetail, EpisodeSummary, Item};
use crate::error::{PodcastError, Result};

/// Caller-supplied listing filters. Absent or empty parameters contribute no
/// constraint; present parameters are combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeFilter {
    /// Exact match on the `podcast` attribute.
    pub podcast: Option<String>,
    /// Case-sensitive substring match on the `title` attribute.
    pub in_title: Option<String>,
}

/// A filter condition ready to execute against the store.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

impl EpisodeFilter {
    /// Build a filter from optional query parameter values. Empty strings are
    /// treated the same as absent parameters.
    pub fn new(podcast: Option<&str>, in_title: Option<&str>) -> Self {
        Self {
            podcast: podcast.filter(|v| !v.is_empty()).map(str::to_string),
            in_title: in_title.filter(|v| !v.is_empty()).map(str::to_string),
        }
    }

    /// The AND of exactly the predicates for present parameters, or `None`
    /// for an unconstrained scan.
    pub fn condition(&self) -> Option<FilterCondition> {
        let mut clauses = Vec::new();
        let mut names = HashMap::new();
        let mut values = HashMap::new();

        if let Some(podcast) = &self.podcast {
            clauses.push("#p = :podcast");
            names.insert("#p".to_string(), "podcast".to_string());
            values.insert(":podcast".to_string(), AttributeValue::S(podcast.clone()));
        }
        if let Some(in_title) = &self.in_title {
            clauses.push("contains(#t, :title)");
            names.insert("#t".to_string(), "title".to_string());
            values.insert(":title".to_string(), AttributeValue::S(in_title.clone()));
        }

        if clauses.is_empty() {
            return None;
        }
        Some(FilterCondition {
            expression: clauses.join(" AND "),
            names,
            values,
        })
    }
}

/// A scan request against the episode table: projection plus optional filter.
#[derive(Debug, Clone)]
pub struct ScanSpec {
    pub table_name: String,
    pub projection: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
    pub filter_expression: Option<String>,
}

impl ScanSpec {
    /// Scan spec for listing episodes: projection restricted to
    /// `id, title, podcast` plus the caller's filter condition.
    pub fn for_listing(table_name: &str, filter: &EpisodeFilter) -> Self {
        let mut names = HashMap::from([
            ("#t".to_string(), "title".to_string()),
            ("#p".to_string(), "podcast".to_string()),
        ]);
        let mut values = HashMap::new();
        let filter_expression = filter.condition().map(|condition| {
            names.extend(condition.names);
            values.extend(condition.values);
            condition.expression
        });
        Self {
            table_name: table_name.to_string(),
            projection: "id, #t, #p".to_string(),
            names,
            values,
            filter_expression,
        }
    }
}

/// A point-lookup request: projection restricted to the detail fields.
#[derive(Debug, Clone)]
pub struct GetSpec {
    pub table_name: String,
    pub projection: String,
    pub names: HashMap<String, String>,
}

impl GetSpec {
    /// Get spec for describing one episode: `id, title, description,
    /// podcast, status`.
    pub fn for_detail(table_name: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            projection: "id, #t, #d, #p, #s".to_string(),
            names: HashMap::from([
                ("#t".to_string(), "title".to_string()),
                ("#d".to_string(), "description".to_string()),
                ("#p".to_string(), "podcast".to_string()),
                ("#s".to_string(), "status".to_string()),
            ]),
        }
    }
}

/// One batch of scan results. No continuation key means the scan is complete.
#[derive(Debug, Clone, Default)]
pub struct ScanPage {
    pub items: Vec<Item>,
    pub last_evaluated_key: Option<Item>,
}

/// Backing-store seam for the catalog. The production implementation wraps
/// the DynamoDB client; tests substitute in-memory fakes.
pub trait EpisodeStore: Send + Sync {
    /// Fetch one scan page, starting after `start_key` when present.
    fn scan_page(
        &self,
        spec: &ScanSpec,
        start_key: Option<Item>,
    ) -> impl Future<Output = Result<ScanPage>> + Send;

    /// Point lookup by primary key with the spec's projection. Absence of the
    /// item is `Ok(None)`, never an error.
    fn get_item(
        &self,
        spec: &GetSpec,
        id: &str,
    ) -> impl Future<Output = Result<Option<Item>>> + Send;
}

/// DynamoDB-backed [`EpisodeStore`].
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
}

impl DynamoStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl EpisodeStore for DynamoStore {
    async fn scan_page(&self, spec: &ScanSpec, start_key: Option<Item>) -> Result<ScanPage> {
        let mut request = self
            .client
            .scan()
            .table_name(&spec.table_name)
            .projection_expression(&spec.projection)
            .set_exclusive_start_key(start_key);
        for (alias, name) in &spec.names {
            request = request.expression_attribute_names(alias, name);
        }
        for (placeholder, value) in &spec.values {
            request = request.expression_attribute_values(placeholder, value.clone());
        }
        if let Some(filter) = &spec.filter_expression {
            request = request.filter_expression(filter);
        }

        let output = request.send().await.map_err(|err| {
            let throttled = err
                .as_service_error()
                .is_some_and(|e| e.is_provisioned_throughput_exceeded_exception());
            if throttled {
                PodcastError::Throttled("Please slow down request rate".to_string())
            } else {
                PodcastError::StoreUnavailable(format!("failed to scan table: {}", err))
            }
        })?;

        Ok(ScanPage {
            items: output.items.unwrap_or_default(),
            last_evaluated_key: output.last_evaluated_key,
        })
    }

    async fn get_item(&self, spec: &GetSpec, id: &str) -> Result<Option<Item>> {
        let mut request = self
            .client
            .get_item()
            .table_name(&spec.table_name)
            .projection_expression(&spec.projection)
            .key("id", AttributeValue::S(id.to_string()));
        for (alias, name) in &spec.names {
            request = request.expression_attribute_names(alias, name);
        }

        let output = request.send().await.map_err(|err| {
            let throttled = err
                .as_service_error()
                .is_some_and(|e| e.is_provisioned_throughput_exceeded_exception());
            if throttled {
                PodcastError::Throttled("Please slow down request rate".to_string())
            } else {
                PodcastError::StoreUnavailable(format!("failed to get item: {}", err))
            }
        })?;

        Ok(output.item.filter(|item| !item.is_empty()))
    }
}

/// Pull-based stream of scan pages. The consumer decides how many pages to
/// pull; exhaustion is signaled by `Ok(None)` once a page arrives without a
/// continuation key.
pub struct ScanPages<'a, S> {
    store: &'a S,
    spec: &'a ScanSpec,
    next_key: Option<Item>,
    exhausted: bool,
}

impl<'a, S: EpisodeStore> ScanPages<'a, S> {
    pub fn new(store: &'a S, spec: &'a ScanSpec) -> Self {
        Self {
            store,
            spec,
            next_key: None,
            exhausted: false,
        }
    }

    /// Fetch the next page, or `None` once the scan is complete.
    pub async fn next_page(&mut self) -> Result<Option<ScanPage>> {
        if self.exhausted {
            return Ok(None);
        }
        let page = self.store.scan_page(self.spec, self.next_key.take()).await?;
        self.next_key = page.last_evaluated_key.clone();
        if self.next_key.is_none() {
            self.exhausted = true;
        }
        Ok(Some(page))
    }
}

/// List episodes matching the filter, aggregating every scan page into one
/// sequence. Order is the store's natural scan order; no sort order is
/// guaranteed across calls. An empty result is valid.
pub async fn list_episodes<S: EpisodeStore>(
    store: &S,
    table_name: &str,
    filter: &EpisodeFilter,
) -> Result<Vec<EpisodeSummary>> {
    let spec = ScanSpec::for_listing(table_name, filter);
    let mut pages = ScanPages::new(store, &spec);
    let mut episodes = Vec::new();
    while let Some(page) = pages.next_page().await? {
        debug!(
            count = page.items.len(),
            more = page.last_evaluated_key.is_some(),
            "scan page received"
        );
        episodes.extend(page.items.iter().map(EpisodeSummary::from_item));
    }
    Ok(episodes)
}

/// Fetch one episode by id with the detail projection. `Ok(None)` when the
/// store has no item for that key.
pub async fn get_episode<S: EpisodeStore>(
    store: &S,
    table_name: &str,
    id: &str,
) -> Result<Option<EpisodeDetail>> {
    let spec = GetSpec::for_detail(table_name);
    let item = store.get_item(&spec, id).await?;
    Ok(item.map(|item| EpisodeDetail::from_item(&item)))
}
