//! Turns spans with a `metrics` target into prometheus metrics.
//!
//! Every such span is timed from creation to close and reported as
//! `{category}_duration_seconds` and `{category}_total`, labelled with its `name` and `result`
//! fields. Store adapters use it with `category = "db_queries"`.
use {
    axum_prometheus::metrics,
    std::{
        fmt::Debug,
        time::Instant,
    },
    tracing::{
        field::{
            Field,
            Visit,
        },
        span::{
            Attributes,
            Record,
        },
        Id,
        Metadata,
    },
    tracing_subscriber::{
        layer::Context,
        registry::LookupSpan,
        Layer,
    },
};

#[derive(Debug, Clone)]
pub struct MetricsLayerData {
    category:   String,
    started_at: Instant,
    result:     String,
    name:       String,
}

pub struct MetricsLayer;

impl Visit for MetricsLayerData {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "result" {
            self.result = format!("{:?}", value);
        }
    }
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "category" => self.category = value.to_string(),
            "result" => self.result = value.to_string(),
            "name" => self.name = value.to_string(),
            _ => {}
        }
    }
}

impl Default for MetricsLayerData {
    fn default() -> MetricsLayerData {
        MetricsLayerData {
            category:   "unknown".to_string(),
            started_at: Instant::now(),
            result:     "unknown".to_string(),
            name:       "unknown".to_string(),
        }
    }
}

impl MetricsLayerData {
    fn new(name: String) -> MetricsLayerData {
        MetricsLayerData {
            name,
            ..MetricsLayerData::default()
        }
    }
}

/// Spans and events meant for this layer. With `check_tracing_enabled` only spans that also
/// opted into regular tracing through a `tracing_enabled` field match.
pub fn is_metrics(metadata: &Metadata, check_tracing_enabled: bool) -> bool {
    let tracing_check = !check_tracing_enabled
        || metadata
            .fields()
            .iter()
            .any(|f| f.name() == "tracing_enabled");
    tracing_check && metadata.target().starts_with("metrics")
}

impl<S> Layer<S> for MetricsLayer
where
    S: tracing::Subscriber,
    S: for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        match ctx.span(id) {
            Some(span) => {
                let mut data = MetricsLayerData::new(span.metadata().name().to_string());
                attrs.record(&mut data);
                span.extensions_mut().replace(data);
            }
            None => tracing::error!("span not found: {:?}", id),
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        match ctx.span(id) {
            Some(span) => {
                let mut extensions = span.extensions_mut();
                match extensions.get_mut::<MetricsLayerData>() {
                    Some(data) => values.record(data),
                    None => {
                        tracing::warn!("metrics layer not found for span: {:?}", id);
                        extensions.replace(MetricsLayerData::default());
                    }
                }
            }
            None => tracing::error!("span not found: {:?}", id),
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        match ctx.span(&id) {
            Some(span) => match span.extensions().get::<MetricsLayerData>() {
                Some(data) => {
                    let latency = data.started_at.elapsed().as_secs_f64();
                    let labels = [("name", data.name.clone()), ("result", data.result.clone())];
                    metrics::histogram!(format!("{}_duration_seconds", data.category), &labels)
                        .record(latency);
                    metrics::counter!(format!("{}_total", data.category), &labels).increment(1);
                }
                None => tracing::warn!("metrics layer not found for span: {:?}", id),
            },
            None => tracing::error!("span not found: {:?}", id),
        }
    }
}
