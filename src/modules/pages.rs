//! Application shell for page routes.
//!
//! Every page navigation serves the same client-app shell; which pages a
//! caller may actually land on is decided upstream by the session router,
//! which redirects across role namespaces before this handler runs.

use axum::response::Html;

const APP_SHELL: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Hanapbuhay</title>
    <link rel="stylesheet" href="/assets/app.css" />
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/assets/app.js"></script>
  </body>
</html>
"#;

pub async fn app_shell() -> Html<&'static str> {
    Html(APP_SHELL)
}
