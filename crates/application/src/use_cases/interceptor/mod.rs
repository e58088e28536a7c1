mod request_interceptor;
mod stats;

pub use request_interceptor::{default_success_predicate, RequestInterceptor, SuccessPredicate};
pub use stats::InterceptorStats;
