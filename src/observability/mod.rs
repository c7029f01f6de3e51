// Observability: pipeline metrics

pub mod metrics;
