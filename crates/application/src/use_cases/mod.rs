pub mod interceptor;
pub mod resolver;

pub use interceptor::{InterceptorStats, RequestInterceptor, SuccessPredicate};
pub use resolver::{CustomResolver, ResolverCache, ResolverStats};
