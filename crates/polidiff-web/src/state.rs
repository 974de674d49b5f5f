use polidiff_core::CompareOptions;

/// Shared application state accessible from all handlers.
///
/// The server itself is stateless across requests: each `/compare` call
/// carries both documents, so only the configuration lives here.
pub struct AppState {
    pub topics: Vec<String>,
    pub options: CompareOptions,
}
