//! Haircut Recommender Library
//!
//! Serves the distinct attribute labels of a haircut dataset and recommends
//! a haircut by encoding five categorical attributes and running them
//! through a pre-trained ONNX classifier.

pub mod api;
pub mod codec;
pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod row_assembler;
pub mod types;
pub mod validator;

pub use api::{create_router, AppState};
pub use codec::CategoryCodec;
pub use config::AppConfig;
pub use dataset::AttributeCatalog;
pub use error::PredictError;
pub use models::inference::{Classifier, PredictionInvoker};
pub use pipeline::PredictionPipeline;
pub use row_assembler::RowAssembler;
pub use types::{Attribute, EncodedRow, FeatureRecord, Label};
pub use validator::InputValidator;
