//! Path-suffix routing.

use produtos_core::{Method, ProductId};

/// What a request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// CORS preflight.
    Preflight,
    /// Create a record.
    Create,
    /// List every record.
    List,
    /// Fetch one record.
    Get(ProductId),
    /// Partially update one record.
    Update(ProductId),
    /// Remove one record.
    Delete(ProductId),
    /// No route for this method.
    Unsupported(Method),
}

impl Route {
    /// Resolve a method and path.
    ///
    /// The last `/`-separated segment (after stripping trailing slashes) is
    /// the record id. For `GET` a segment equal to `collection` addresses the
    /// whole collection; `PUT` and `DELETE` always take it as an id. Any
    /// prefix before it is ignored.
    pub fn resolve(method: &Method, path: &str, collection: &str) -> Self {
        let segment = last_segment(path);

        match method {
            Method::Options => Route::Preflight,
            Method::Post => Route::Create,
            Method::Get if segment == collection => Route::List,
            Method::Get => Route::Get(ProductId::new(segment)),
            Method::Put => Route::Update(ProductId::new(segment)),
            Method::Delete => Route::Delete(ProductId::new(segment)),
            other => Route::Unsupported(other.clone()),
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Preflight => "preflight",
            Route::Create => "create",
            Route::List => "list",
            Route::Get(_) => "get",
            Route::Update(_) => "update",
            Route::Delete(_) => "delete",
            Route::Unsupported(_) => "unsupported",
        }
    }
}

fn last_segment(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((_, last)) => last,
        None => trimmed,
    }
}
