mod bigquery_sink;

pub use bigquery_sink::BigQueryMetadataSink;
