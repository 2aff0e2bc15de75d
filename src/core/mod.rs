pub mod types;

pub use types::{
    ExamContext, Finding, ScanResult, ScandeltaError, ScandeltaResult, SeverityLevel,
};
