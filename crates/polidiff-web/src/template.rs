use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../templates/index.html");

/// Render the index page, injecting the effective topic list.
pub fn render_index(topics: &[String]) -> Html<String> {
    let topics_json = serde_json::to_string(topics).unwrap_or_else(|_| "[]".to_string());
    let html = INDEX_HTML.replace("{{ topics_json }}", &topics_json);
    Html(html)
}
