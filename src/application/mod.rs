//! Application layer containing the upload orchestration.
//!
//! `UploadPipeline` is the entry point: it loads a spreadsheet, normalizes the
//! rows into payment records, dispatches them through a `PaymentGateway` and
//! aggregates the per-row outcomes into an `UploadReport`.

pub mod dispatcher;
pub mod normalizer;
pub mod pipeline;
pub mod report;
