//! Zero-cost HTTP abstraction traits for the account deletion flow.
//!
//! The deletion logic never touches a framework type. Framework crates implement
//! these traits on newtype wrappers of their own request and response builder types
//! and hand those to the framework-agnostic handlers.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  farewell_core: Defines HTTP traits      │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  farewell_axum: Newtype wrappers         │
//! │  struct AxumRequest(axum::Request)       │
//! │  impl HttpRequest for AxumRequest { }    │  ← Zero cost!
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  Deletion handlers use HttpRequest and   │
//! │  ResponseBuilder (generic over framework)│
//! └──────────────────────────────────────────┘
//! ```

/// Trait for HTTP requests the deletion routes need to inspect.
///
/// Implementors return `&str` references straight out of the framework's request,
/// no allocation or copying.
pub trait HttpRequest {
    /// Get a header value by name.
    ///
    /// Header lookup should be case-insensitive.
    /// Returns `None` if the header doesn't exist or isn't valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Get a cookie value by name.
    fn cookie(&self, name: &str) -> Option<&str>;

    /// Get the HTTP method (GET, POST, etc.)
    fn method(&self) -> &str;

    /// Get the request path
    fn path(&self) -> &str;

    /// Get the raw query string, without the leading `?`
    fn query(&self) -> Option<&str>;

    /// Whether the query string carries `name`, either bare (`?rest`) or with any
    /// value other than `false`/`0`.
    fn has_query_flag(&self, name: &str) -> bool {
        self.query().is_some_and(|query| {
            query.split('&').any(|pair| {
                let mut parts = pair.splitn(2, '=');
                parts.next() == Some(name)
                    && !matches!(parts.next(), Some("false") | Some("0"))
            })
        })
    }
}

/// Trait for building HTTP responses.
///
/// Builder pattern, allowing method chaining:
/// ```ignore
/// builder
///     .status(403)
///     .json_body(json!({"message": "The phrase is incorrect"}))
///     .build()
/// ```
pub trait ResponseBuilder: Sized {
    /// The final response type produced by this builder
    type Response;

    /// Set the HTTP status code
    fn status(self, code: u16) -> Self;

    /// Add an HTTP header
    fn header(self, name: &str, value: &str) -> Self;

    /// Add a Set-Cookie header
    fn cookie(self, cookie_value: &str) -> Self {
        self.header("set-cookie", cookie_value)
    }

    /// Set a JSON body with Content-Type header
    fn json_body(self, body: serde_json::Value) -> Self;

    /// Set an HTML body with Content-Type header
    fn html_body(self, body: String) -> Self;

    /// Attach a typed value to the response for downstream middleware.
    fn extension<T>(self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static;

    /// Build the final response
    fn build(self) -> Self::Response;
}

/// Helper methods for the responses the deletion routes produce.
///
/// Automatically implemented for all types that implement `ResponseBuilder`.
pub trait ResponseHelpers: ResponseBuilder {
    /// Create a 200 OK JSON response
    fn ok_json(self, body: serde_json::Value) -> Self::Response {
        self.status(200).json_body(body).build()
    }

    /// Create a 200 OK HTML response
    fn ok_html(self, body: String) -> Self::Response {
        self.status(200).html_body(body).build()
    }

    /// Create a 403 Forbidden response carrying a user-facing message and an error code
    fn forbidden(self, message: &str, error: &str) -> Self::Response {
        self.status(403)
            .json_body(serde_json::json!({ "message": message, "error": error }))
            .build()
    }

    /// Create a 401 Unauthorized response
    fn unauthorized(self, message: &str) -> Self::Response {
        self.status(401)
            .json_body(serde_json::json!({ "error": message }))
            .build()
    }

    /// Create a 303 See Other redirect
    fn see_other(self, location: &str) -> Self::Response {
        self.status(303).header("location", location).build()
    }
}

// Blanket implementation for all ResponseBuilder types
impl<T: ResponseBuilder> ResponseHelpers for T {}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock request for testing
    struct MockRequest {
        headers: std::collections::HashMap<String, String>,
        cookies: std::collections::HashMap<String, String>,
        method: String,
        path: String,
        query: Option<String>,
    }

    impl HttpRequest for MockRequest {
        fn header(&self, name: &str) -> Option<&str> {
            let name_lower = name.to_lowercase();
            self.headers
                .iter()
                .find(|(k, _)| k.to_lowercase() == name_lower)
                .map(|(_, v)| v.as_str())
        }

        fn cookie(&self, name: &str) -> Option<&str> {
            self.cookies.get(name).map(|s| s.as_str())
        }

        fn method(&self) -> &str {
            &self.method
        }

        fn path(&self) -> &str {
            &self.path
        }

        fn query(&self) -> Option<&str> {
            self.query.as_deref()
        }
    }

    fn request(query: Option<&str>) -> MockRequest {
        MockRequest {
            headers: std::collections::HashMap::new(),
            cookies: std::collections::HashMap::new(),
            method: "POST".to_string(),
            path: "/deleteaccount".to_string(),
            query: query.map(String::from),
        }
    }

    #[test]
    fn test_http_request_trait() {
        let mut req = request(None);
        req.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        req.cookies
            .insert("farewell.sid".to_string(), "abc123".to_string());

        assert_eq!(req.method(), "POST");
        assert_eq!(req.path(), "/deleteaccount");
        assert_eq!(req.header("content-type"), Some("application/json")); // case-insensitive
        assert_eq!(req.cookie("farewell.sid"), Some("abc123"));
    }

    #[test]
    fn test_query_flag() {
        assert!(request(Some("rest")).has_query_flag("rest"));
        assert!(request(Some("a=1&rest=true")).has_query_flag("rest"));
        assert!(!request(Some("rest=false")).has_query_flag("rest"));
        assert!(!request(Some("rest=0")).has_query_flag("rest"));
        assert!(!request(Some("restless=1")).has_query_flag("rest"));
        assert!(!request(None).has_query_flag("rest"));
    }
}
