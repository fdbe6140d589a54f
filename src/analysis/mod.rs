//! 分析层：关键词分类、严重程度、快速修复、常见错误预设、解释请求

pub mod classifier;
pub mod explainer;
pub mod presets;
pub mod quick_fix;
pub mod report;
pub mod severity;

pub use classifier::classify;
pub use explainer::{compose_request, explain, ExplainError, Explainer, SamplingParams, USER_PREFIX};
pub use presets::{CommonError, COMMON_ERRORS};
pub use quick_fix::{quick_fix_for, QuickFix};
pub use report::{Category, ErrorReport, Severity};
pub use severity::severity;
