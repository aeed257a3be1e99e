pub fn analyze_endpoint() -> &'static str {
    "/api/analyze"
}

pub fn health_endpoint() -> &'static str {
    "/health"
}
