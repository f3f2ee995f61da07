//! Metric Registry
//!
//! Descriptions of the value metrics the screener computes, for listing and
//! lookup by name.

use crate::metrics::ValueMetric;

/// Where a metric's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricSource {
    /// Supplied directly by the data provider
    Provider,
    /// Derived from two provider fields
    Derived,
}

/// Metric metadata
#[derive(Debug, Clone)]
pub struct MetricInfo {
    /// Which metric this describes
    pub metric: ValueMetric,
    /// Metric name (the table column)
    pub name: &'static str,
    /// Report header label
    pub label: &'static str,
    /// Where the value comes from
    pub source: MetricSource,
    /// Brief description of what the metric measures
    pub description: &'static str,
}

/// Get all metric info, in output order
pub fn available_metrics() -> Vec<MetricInfo> {
    ValueMetric::ALL
        .into_iter()
        .map(|metric| {
            let (source, description) = match metric {
                ValueMetric::PriceToEarnings => (
                    MetricSource::Provider,
                    "Share price over trailing earnings per share",
                ),
                ValueMetric::PriceToBook => (
                    MetricSource::Provider,
                    "Share price over book value per share",
                ),
                ValueMetric::PriceToSales => (
                    MetricSource::Provider,
                    "Share price over revenue per share",
                ),
                ValueMetric::EvToEbitda => (
                    MetricSource::Derived,
                    "Enterprise value over EBITDA",
                ),
                ValueMetric::EvToGrossProfit => (
                    MetricSource::Derived,
                    "Enterprise value over gross profit",
                ),
            };
            MetricInfo {
                metric,
                name: metric.column(),
                label: metric.label(),
                source,
                description,
            }
        })
        .collect()
}

/// Get metric info by column name
pub fn get_metric_info(name: &str) -> Option<MetricInfo> {
    available_metrics().into_iter().find(|m| m.name == name)
}
