use serde::Serialize;

/// One search result as printed on stdout
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub id: usize,
    pub label: String,
    pub text: String,
}
